//! FactStore trait definition.
//!
//! Long-term fact persistence with semantic retrieval, partitioned by
//! thread. Implementations live in recall-infra (e.g., `PgFactStore`).
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).
//!
//! Both operations are infallible by contract: failures are reported through
//! the outcome enums, not `Result`, because a broken memory subsystem must
//! never abort a conversation turn.

use recall_types::memory::{Recall, StoreOutcome};

/// Repository trait for thread-scoped fact storage and semantic retrieval.
pub trait FactStore: Send + Sync {
    /// Embed `content` and store it as a fact for `thread_id`.
    ///
    /// A fact is only written when the embedding call succeeds.
    fn store(
        &self,
        thread_id: &str,
        content: &str,
    ) -> impl std::future::Future<Output = StoreOutcome> + Send;

    /// Retrieve up to `k` facts for `thread_id` nearest to `query`,
    /// ascending by distance, deduplicated preserving first-seen order.
    ///
    /// Never returns another thread's facts.
    fn retrieve(
        &self,
        thread_id: &str,
        query: &str,
        k: usize,
    ) -> impl std::future::Future<Output = Recall> + Send;
}

/// Default number of facts injected into a turn's context.
pub const DEFAULT_RETRIEVAL_K: usize = 3;
