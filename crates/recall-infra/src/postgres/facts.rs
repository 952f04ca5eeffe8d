//! Postgres/pgvector implementation of `FactStore`.
//!
//! A fact row is only written when its embedding succeeded; retrieval is a
//! nearest-neighbor query with the pgvector cosine operator `<=>`, always
//! restricted to the requesting thread. Failures never escape: they are
//! logged and reported through the outcome enums.

use sqlx::postgres::PgPool;
use sqlx::Row;

use recall_core::memory::embedder::{vector_literal, Embedder};
use recall_core::memory::store::FactStore;
use recall_types::memory::{Recall, StoreOutcome};

/// Postgres-backed fact store with pluggable embedder.
pub struct PgFactStore<E: Embedder> {
    pool: PgPool,
    embedder: E,
}

impl<E: Embedder> PgFactStore<E> {
    pub fn new(pool: PgPool, embedder: E) -> Self {
        Self { pool, embedder }
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }
}

impl<E: Embedder> FactStore for PgFactStore<E> {
    async fn store(&self, thread_id: &str, content: &str) -> StoreOutcome {
        if !self.embedder.is_available() {
            return StoreOutcome::Skipped;
        }
        let Some(embedding) = self.embedder.embed(content).await else {
            return StoreOutcome::Skipped;
        };

        let result = sqlx::query(
            "INSERT INTO facts (thread_id, content, embedding) VALUES ($1, $2, CAST($3 AS vector))",
        )
        .bind(thread_id)
        .bind(content)
        .bind(vector_literal(&embedding))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => StoreOutcome::Stored,
            Err(e) => {
                tracing::warn!(error = %e, "fact insert failed");
                StoreOutcome::Failed
            }
        }
    }

    async fn retrieve(&self, thread_id: &str, query: &str, k: usize) -> Recall {
        if !self.embedder.is_available() {
            return Recall::Unavailable;
        }
        let Some(embedding) = self.embedder.embed(query).await else {
            return Recall::Unavailable;
        };

        let result = sqlx::query(
            "SELECT content FROM facts
             WHERE thread_id = $1
             ORDER BY embedding <=> CAST($2 AS vector) ASC
             LIMIT $3",
        )
        .bind(thread_id)
        .bind(vector_literal(&embedding))
        .bind(k as i64)
        .fetch_all(&self.pool)
        .await;

        match result {
            Ok(rows) => {
                let contents = rows
                    .iter()
                    .filter_map(|row| row.try_get::<String, _>("content").ok());
                Recall::Facts(dedup_preserving_order(contents))
            }
            Err(e) => {
                tracing::warn!(error = %e, "fact retrieval query failed");
                Recall::Unavailable
            }
        }
    }
}

/// Trim, drop empties, and deduplicate keeping the first occurrence.
fn dedup_preserving_order(contents: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for content in contents {
        let trimmed = content.trim();
        if !trimmed.is_empty() && !out.iter().any(|seen| seen == trimmed) {
            out.push(trimmed.to_string());
        }
    }
    out
}
