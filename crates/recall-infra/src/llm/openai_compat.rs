//! OpenAI-compatible LLM provider implementation.
//!
//! A single [`OpenAiCompatProvider`] serves any endpoint that speaks the
//! OpenAI chat-completions API via a configurable base URL. Uses
//! [`async_openai`] for type-safe request/response handling.

use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use async_openai::Client;
use secrecy::{ExposeSecret, SecretString};

use recall_core::llm::provider::LlmProvider;
use recall_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, MessageRole, Usage,
};

/// Provider for any OpenAI-compatible chat-completions API.
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct OpenAiCompatProvider {
    client: Client<OpenAIConfig>,
}

impl OpenAiCompatProvider {
    pub fn new(api_key: &SecretString, base_url: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.expose_secret())
            .with_api_base(base_url);
        Self {
            client: Client::with_config(config),
        }
    }

    /// Build an OpenAI request from a generic [`CompletionRequest`].
    fn build_request(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();

        if let Some(ref system) = request.system {
            messages.push(ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage {
                    content: ChatCompletionRequestSystemMessageContent::Text(system.clone()),
                    name: None,
                },
            ));
        }

        for msg in &request.messages {
            let oai_msg = match msg.role {
                MessageRole::System => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage {
                        content: ChatCompletionRequestSystemMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    },
                ),
                MessageRole::User => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    },
                ),
                MessageRole::Assistant => ChatCompletionRequestMessage::Assistant(
                    ChatCompletionRequestAssistantMessage {
                        content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                            msg.content.clone(),
                        )),
                        ..Default::default()
                    },
                ),
            };
            messages.push(oai_msg);
        }

        CreateChatCompletionRequest {
            model: request.model.clone(),
            messages,
            temperature: request.temperature.map(|t| t as f32),
            ..Default::default()
        }
    }
}

impl LlmProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        "openai-compat"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        let oai_request = self.build_request(request);

        let response = self
            .client
            .chat()
            .create(oai_request)
            .await
            .map_err(map_openai_error)?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        let usage = response
            .usage
            .map(|u| Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            model: response.model,
            usage,
        })
    }
}

fn map_openai_error(err: async_openai::error::OpenAIError) -> LlmError {
    use async_openai::error::OpenAIError;

    match err {
        OpenAIError::ApiError(api_err) => {
            if api_err.message.contains("Incorrect API key")
                || api_err.message.contains("Invalid API key")
            {
                LlmError::AuthenticationFailed
            } else {
                LlmError::Provider {
                    message: api_err.message,
                }
            }
        }
        OpenAIError::JSONDeserialize(e) => LlmError::Deserialization(e.to_string()),
        OpenAIError::InvalidArgument(msg) => LlmError::InvalidRequest(msg),
        other => LlmError::Provider {
            message: other.to_string(),
        },
    }
}
