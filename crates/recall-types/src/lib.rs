//! Shared domain types for Recall.
//!
//! This crate contains the domain types used across the Recall pipeline:
//! LLM messages and requests, fact-memory outcome types, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod error;
pub mod llm;
pub mod memory;
