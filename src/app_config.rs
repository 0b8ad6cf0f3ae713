use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Validation config
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Model service provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    // @provider: OpenAI
    #[default]
    OpenAI,
    // @provider: Anthropic
    Anthropic,
    // @provider: Ollama
    Ollama,
    // @provider: LM Studio (OpenAI-compatible local server)
    LMStudio,
}

impl ModelProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Ollama => "Ollama",
            Self::LMStudio => "LM Studio",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenAI => "openai".to_string(),
            Self::Anthropic => "anthropic".to_string(),
            Self::Ollama => "ollama".to_string(),
            Self::LMStudio => "lmstudio".to_string(),
        }
    }

    // @returns: Environment variable consulted when no API key is configured
    pub fn api_key_env_var(&self) -> Option<&'static str> {
        match self {
            Self::OpenAI => Some("OPENAI_API_KEY"),
            Self::Anthropic => Some("ANTHROPIC_API_KEY"),
            Self::Ollama | Self::LMStudio => None,
        }
    }

    fn requires_api_key(&self) -> bool {
        matches!(self, Self::OpenAI | Self::Anthropic)
    }
}

impl std::fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for ModelProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            "ollama" => Ok(Self::Ollama),
            "lmstudio" => Ok(Self::LMStudio),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Max tokens generated per call
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: ModelProvider) -> Self {
        Self {
            provider_type: provider_type.to_lowercase_string(),
            model: default_model(&provider_type),
            api_key: String::new(),
            endpoint: default_endpoint(&provider_type),
            timeout_secs: default_timeout_secs(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Validation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ValidationConfig {
    /// Model provider to use
    #[serde(default)]
    pub provider: ModelProvider,

    /// Available model providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common validation settings
    #[serde(default)]
    pub common: ValidationCommonConfig,
}

/// Validation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ValidationCommonConfig {
    /// Maximum characters per chunk sent to the model
    #[serde(default = "default_max_chars_per_chunk")]
    pub max_chars_per_chunk: usize,

    /// Temperature parameter for text generation
    /// 0.0 is the least random setting the providers accept
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Language of the translated script, used in prompts
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Title printed at the top of rendered reports
    #[serde(default = "default_report_title")]
    pub report_title: String,
}

impl Default for ValidationCommonConfig {
    fn default() -> Self {
        Self {
            max_chars_per_chunk: default_max_chars_per_chunk(),
            temperature: default_temperature(),
            target_language: default_target_language(),
            report_title: default_report_title(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_max_chars_per_chunk() -> usize {
    12000
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_temperature() -> f32 {
    0.0
}

fn default_target_language() -> String {
    "PySpark".to_string()
}

fn default_report_title() -> String {
    "ETL Conversion Validation Report".to_string()
}

fn default_model(provider: &ModelProvider) -> String {
    match provider {
        ModelProvider::OpenAI => "gpt-4o".to_string(),
        ModelProvider::Anthropic => "claude-3-5-sonnet-latest".to_string(),
        ModelProvider::Ollama => "llama3.1".to_string(),
        // Placeholder; users should set to the loaded model name in LM Studio
        ModelProvider::LMStudio => "local-model".to_string(),
    }
}

fn default_endpoint(provider: &ModelProvider) -> String {
    match provider {
        ModelProvider::OpenAI => "https://api.openai.com/v1".to_string(),
        ModelProvider::Anthropic => "https://api.anthropic.com".to_string(),
        ModelProvider::Ollama => "http://localhost:11434".to_string(),
        ModelProvider::LMStudio => "http://localhost:1234/v1".to_string(),
    }
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let common = &self.validation.common;

        if common.max_chars_per_chunk == 0 {
            return Err(anyhow!("max_chars_per_chunk must be greater than zero"));
        }

        if !(0.0..=2.0).contains(&common.temperature) {
            return Err(anyhow!(
                "temperature must be between 0.0 and 2.0, got {}",
                common.temperature
            ));
        }

        if common.target_language.trim().is_empty() {
            return Err(anyhow!("target_language cannot be empty"));
        }

        let provider = &self.validation.provider;
        if provider.requires_api_key() && self.validation.get_api_key().is_empty() {
            return Err(anyhow!(
                "API key is required for {} provider (set it in the config or {})",
                provider.display_name(),
                provider.api_key_env_var().unwrap_or("the environment")
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            validation: ValidationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl ValidationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &ModelProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get a mutable provider configuration, inserting defaults when absent
    pub fn provider_config_mut(&mut self, provider_type: &ModelProvider) -> &mut ProviderConfig {
        let provider_str = provider_type.to_lowercase_string();
        let index = match self.available_providers.iter().position(|p| p.provider_type == provider_str) {
            Some(index) => index,
            None => {
                self.available_providers.push(ProviderConfig::new(provider_type.clone()));
                self.available_providers.len() - 1
            }
        };
        &mut self.available_providers[index]
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        self.get_active_provider_config()
            .filter(|p| !p.model.is_empty())
            .map(|p| p.model.clone())
            .unwrap_or_else(|| default_model(&self.provider))
    }

    /// Get the API key for the active provider, falling back to the environment
    pub fn get_api_key(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.api_key.is_empty() {
                return provider_config.api_key.clone();
            }
        }

        self.provider.api_key_env_var()
            .and_then(|var| std::env::var(var).ok())
            .unwrap_or_default()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        self.get_active_provider_config()
            .filter(|p| !p.endpoint.is_empty())
            .map(|p| p.endpoint.clone())
            .unwrap_or_else(|| default_endpoint(&self.provider))
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        self.get_active_provider_config()
            .map(|p| p.timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or_else(default_timeout_secs)
    }

    /// Get the token budget per call for the active provider
    pub fn get_max_tokens(&self) -> u32 {
        self.get_active_provider_config()
            .map(|p| p.max_tokens)
            .filter(|tokens| *tokens > 0)
            .unwrap_or_else(default_max_tokens)
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            provider: ModelProvider::default(),
            available_providers: vec![
                ProviderConfig::new(ModelProvider::OpenAI),
                ProviderConfig::new(ModelProvider::Anthropic),
                ProviderConfig::new(ModelProvider::Ollama),
                ProviderConfig::new(ModelProvider::LMStudio),
            ],
            common: ValidationCommonConfig::default(),
        }
    }
}
