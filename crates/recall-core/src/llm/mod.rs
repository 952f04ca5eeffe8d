//! LLM provider abstraction for Recall.
//!
//! Defines the `LlmProvider` trait that concrete providers in recall-infra
//! implement.

pub mod provider;
