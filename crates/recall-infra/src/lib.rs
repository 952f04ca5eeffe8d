//! Infrastructure layer for Recall.
//!
//! Contains implementations of the traits defined in `recall-core`:
//! the environment configuration loader, the OpenAI-compatible chat provider
//! and embedder, and the Postgres/pgvector fact and history stores.

pub mod config;
pub mod llm;
pub mod postgres;
