/*!
 * Provider implementations for the model service.
 *
 * This module contains client implementations for various LLM providers:
 * - OpenAI: OpenAI API integration (also used for LM Studio)
 * - Anthropic: Anthropic API integration
 * - Ollama: Local LLM server
 * - Mock: in-process fake used by tests
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;

use anyhow::{Result, anyhow};

use crate::app_config::{ModelProvider, ValidationConfig};
use crate::errors::ProviderError;

pub mod anthropic;
pub mod mock;
pub mod ollama;
pub mod openai;

use self::anthropic::Anthropic;
use self::ollama::Ollama;
use self::openai::OpenAI;

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

impl Role {
    /// Wire name used by every supported API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// A single role-tagged message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: Role,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// Provider-neutral completion request: a message list plus a randomness parameter
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Conversation to complete, in order
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature; 0.0 is the least random
    pub temperature: f32,
}

impl CompletionRequest {
    /// Create an empty request with the given temperature
    pub fn new(temperature: f32) -> Self {
        Self {
            messages: Vec::new(),
            temperature,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Concatenated content of all user messages
    pub fn user_text(&self) -> String {
        self.messages
            .iter()
            .filter(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Common trait for all LLM providers
///
/// This is the single blocking boundary the validation core talks to. Every
/// implementation turns a role-tagged message list into one text completion.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Complete a request and return the generated text
    ///
    /// # Arguments
    /// * `request` - The messages and temperature to submit
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The completion text or an error
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

#[async_trait]
impl<P: Provider + ?Sized> Provider for Box<P> {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        (**self).complete(request).await
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        (**self).test_connection().await
    }
}

/// Build the concrete client selected by the configuration
pub fn create_provider(config: &ValidationConfig) -> Result<Box<dyn Provider>> {
    let timeout = Duration::from_secs(config.get_timeout_secs());
    let model = config.get_model();
    let max_tokens = config.get_max_tokens();

    let provider: Box<dyn Provider> = match config.provider {
        ModelProvider::OpenAI => Box::new(OpenAI::new(
            config.get_api_key(),
            config.get_endpoint(),
            model,
            max_tokens,
            timeout,
        )),
        ModelProvider::LMStudio => {
            // LM Studio accepts any bearer token
            let api_key = {
                let k = config.get_api_key();
                if k.is_empty() { "lm-studio".to_string() } else { k }
            };
            Box::new(OpenAI::new(api_key, config.get_endpoint(), model, max_tokens, timeout))
        }
        ModelProvider::Anthropic => Box::new(Anthropic::new(
            config.get_api_key(),
            config.get_endpoint(),
            model,
            max_tokens,
            timeout,
        )),
        ModelProvider::Ollama => {
            let endpoint = config.get_endpoint();
            if endpoint.is_empty() {
                return Err(anyhow!("Ollama endpoint cannot be empty"));
            }
            Box::new(Ollama::from_endpoint(&endpoint, model, timeout)?)
        }
    };

    Ok(provider)
}
