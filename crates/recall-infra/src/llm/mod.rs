//! OpenAI-compatible clients for Recall.
//!
//! Both the chat provider and the embedder talk to the same configurable
//! base URL, so any OpenAI-compatible endpoint works.

pub mod embedder;
pub mod openai_compat;
