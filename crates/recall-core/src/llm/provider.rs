//! LlmProvider trait definition.
//!
//! This is the core abstraction the pipeline calls for both fact extraction
//! and response generation. Uses RPITIT (native async fn in traits,
//! Rust 2024 edition). Implementations live in recall-infra.

use recall_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends (OpenAI-compatible endpoints).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai-compat").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
