//! Embedder trait for text-to-vector conversion.
//!
//! Defines the interface for embedding text into vectors for semantic search.
//! Implementations (e.g., the OpenAI embeddings endpoint) live in recall-infra.
//!
//! Embedding is a best-effort subsystem: a failed or unconfigured backend
//! yields `None`, and the conversation continues without semantic memory.

/// Trait for converting text into embedding vectors.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait Embedder: Send + Sync {
    /// Whether the embedding backend is usable at all.
    ///
    /// `false` means the process runs in degraded mode for its whole
    /// lifetime: no facts are stored and retrieval answers `Unavailable`.
    fn is_available(&self) -> bool;

    /// Embed a single text into a vector.
    ///
    /// Returns `None` when the backend is unavailable or the call fails.
    /// Failures are logged by the implementation, never propagated.
    fn embed(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Option<Vec<f32>>> + Send;

    /// The model name used for embeddings (e.g., "text-embedding-3-small").
    fn model_name(&self) -> &str;

    /// The dimensionality of the output vectors.
    fn dimension(&self) -> usize;
}

/// Format a vector as a pgvector literal: bracketed, comma-separated,
/// 8 decimal digits per component.
///
/// The result is meant to be bound as text and cast with `CAST($n AS vector)`.
pub fn vector_literal(values: &[f32]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.8}")).collect();
    format!("[{}]", parts.join(", "))
}
