//! Postgres pool construction and schema initialization.
//!
//! Requires the pgvector extension to be installable in the target database.
//! Tables are created if absent; `facts.embedding` takes its dimension from
//! `EMBEDDING_DIM`, which is why this is runtime DDL rather than a checked
//! migration.

use sqlx::postgres::{PgPool, PgPoolOptions};

/// Connect to Postgres and ensure the schema exists.
pub async fn connect(pg_conn_str: &str, embedding_dim: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(pg_conn_str)
        .await?;
    init_schema(&pool, embedding_dim).await?;
    Ok(pool)
}

async fn init_schema(pool: &PgPool, embedding_dim: u32) -> Result<(), sqlx::Error> {
    sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
        .execute(pool)
        .await?;

    sqlx::query(&format!(
        "CREATE TABLE IF NOT EXISTS facts (
            id SERIAL PRIMARY KEY,
            thread_id TEXT NOT NULL,
            content TEXT NOT NULL,
            embedding vector({embedding_dim})
        )"
    ))
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS facts_thread_idx ON facts (thread_id)")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS messages (
            id BIGSERIAL PRIMARY KEY,
            thread_id TEXT NOT NULL,
            role TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS messages_thread_idx ON messages (thread_id)")
        .execute(pool)
        .await?;

    Ok(())
}
