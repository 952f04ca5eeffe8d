//! Postgres implementation of `HistoryStore`.
//!
//! The explicit conversation-state collaborator: messages are appended per
//! thread and read back oldest first. Roles are stored as text and parsed
//! on the way out.

use std::str::FromStr;

use sqlx::postgres::PgPool;
use sqlx::Row;

use recall_core::chat::history::HistoryStore;
use recall_types::error::RepositoryError;
use recall_types::llm::{Message, MessageRole};

/// Postgres-backed conversation history.
pub struct PgHistoryStore {
    pool: PgPool,
}

impl PgHistoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl HistoryStore for PgHistoryStore {
    async fn load_history(&self, thread_id: &str) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT role, content FROM messages WHERE thread_id = $1 ORDER BY id ASC",
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter()
            .map(|row| {
                let role: String = row.try_get("role").map_err(map_sqlx_error)?;
                let content: String = row.try_get("content").map_err(map_sqlx_error)?;
                let role = MessageRole::from_str(&role).map_err(RepositoryError::Query)?;
                Ok(Message { role, content })
            })
            .collect()
    }

    async fn append_message(
        &self,
        thread_id: &str,
        message: &Message,
    ) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO messages (thread_id, role, content) VALUES ($1, $2, $3)")
            .bind(thread_id)
            .bind(message.role.to_string())
            .bind(&message.content)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection
        }
        other => RepositoryError::Query(other.to_string()),
    }
}
