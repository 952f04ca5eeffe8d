//! OpenAI-backed embedding generator.
//!
//! Implements the `Embedder` trait from `recall-core` against the OpenAI
//! embeddings endpoint. When no embedding model is configured the embedder
//! is permanently unavailable and the process runs without semantic memory;
//! individual call failures are logged and absorbed the same way.

use async_openai::config::OpenAIConfig;
use async_openai::types::{CreateEmbeddingRequestArgs, EmbeddingInput};
use async_openai::Client;
use secrecy::{ExposeSecret, SecretString};

use recall_core::memory::embedder::Embedder;

/// Remote embedder speaking the OpenAI embeddings API.
///
/// Does NOT derive Debug: the client holds the API key.
pub struct OpenAiEmbedder {
    client: Client<OpenAIConfig>,
    model: Option<String>,
    dimension: usize,
}

impl OpenAiEmbedder {
    /// Create an embedder; `model = None` puts it in degraded mode.
    pub fn new(
        api_key: &SecretString,
        base_url: &str,
        model: Option<String>,
        dimension: usize,
    ) -> Self {
        if model.is_none() {
            tracing::warn!("no embedding model configured; semantic memory disabled");
        }
        let config = OpenAIConfig::new()
            .with_api_key(api_key.expose_secret())
            .with_api_base(base_url);
        Self {
            client: Client::with_config(config),
            model,
            dimension,
        }
    }
}

impl Embedder for OpenAiEmbedder {
    fn is_available(&self) -> bool {
        self.model.is_some()
    }

    async fn embed(&self, text: &str) -> Option<Vec<f32>> {
        let model = self.model.as_deref()?;

        let request = match CreateEmbeddingRequestArgs::default()
            .model(model)
            .input(EmbeddingInput::String(text.to_string()))
            .dimensions(self.dimension as u32)
            .build()
        {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "failed to build embedding request");
                return None;
            }
        };

        match self.client.embeddings().create(request).await {
            Ok(response) => {
                let embedding = response.data.into_iter().next().map(|d| d.embedding);
                if embedding.is_none() {
                    tracing::warn!("embedding response contained no vectors");
                }
                embedding
            }
            Err(e) => {
                tracing::warn!(error = %e, "embedding call failed");
                None
            }
        }
    }

    fn model_name(&self) -> &str {
        self.model.as_deref().unwrap_or("(disabled)")
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
