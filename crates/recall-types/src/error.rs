use thiserror::Error;

use crate::llm::LlmError;

/// Errors raised while loading startup configuration.
///
/// All of these are fatal: the process must not proceed to any network or
/// database call with incomplete configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {reason}")]
    InvalidVar { var: &'static str, reason: String },
}

/// Errors from repository operations (used by trait definitions in recall-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// Errors that abort a conversation turn.
///
/// Memory and extraction failures degrade silently and never surface here;
/// only the primary response call and history persistence do.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("llm error: {0}")]
    Llm(#[from] LlmError),

    #[error("history error: {0}")]
    History(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingVar("OPENAI_API_KEY");
        assert_eq!(
            err.to_string(),
            "required environment variable OPENAI_API_KEY is not set"
        );
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_chat_error_wraps_llm_error() {
        let err: ChatError = LlmError::AuthenticationFailed.into();
        assert!(err.to_string().contains("authentication failed"));
    }
}
