//! HistoryStore trait definition.
//!
//! Conversation history persistence keyed by thread id. This is the explicit
//! interface behind multi-turn state: the pipeline appends messages and reads
//! them back, and the implementation owns ordering and durability.
//! Implementations live in recall-infra (e.g., `PgHistoryStore`).

use recall_types::error::RepositoryError;
use recall_types::llm::Message;

/// Repository trait for per-thread conversation history.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait HistoryStore: Send + Sync {
    /// Load the full message history for a thread, oldest first.
    ///
    /// An unknown thread yields an empty history.
    fn load_history(
        &self,
        thread_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Append a message to a thread's history.
    fn append_message(
        &self,
        thread_id: &str,
        message: &Message,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
