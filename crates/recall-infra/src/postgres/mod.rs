//! Postgres persistence for Recall.
//!
//! One shared `PgPool`; the `facts` table carries pgvector embeddings for
//! semantic retrieval, the `messages` table carries per-thread conversation
//! history. Schema setup happens at connect time because the vector column
//! dimension comes from configuration.

pub mod facts;
pub mod history;
pub mod pool;
