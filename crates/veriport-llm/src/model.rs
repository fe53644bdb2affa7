use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to a chat-completion backend
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

/// A single system + user exchange sent to a chat model
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Role/backstory instructions for the model
    pub system: String,
    /// The task prompt itself
    pub user: String,
}

impl ChatRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// The core abstraction over chat-completion backends
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Model identifier as the provider knows it (e.g., "gpt-5")
    fn name(&self) -> &str;

    /// Send one request and return the assistant's text
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;
}
