//! Long-term memory abstractions for Recall.
//!
//! This module defines the `Embedder` and `FactStore` traits that the
//! infrastructure layer implements, and the `FactExtractor` that uses an LLM
//! to pull facts worth remembering out of user messages.

pub mod embedder;
pub mod extractor;
pub mod store;
