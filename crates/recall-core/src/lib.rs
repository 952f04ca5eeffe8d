//! Business logic and repository trait definitions for Recall.
//!
//! This crate defines the "ports" (provider, embedder, and store traits) that
//! the infrastructure layer implements, plus the per-turn conversation logic.
//! It depends only on `recall-types` -- never on `recall-infra` or any
//! database/IO crate.

pub mod chat;
pub mod llm;
pub mod memory;
