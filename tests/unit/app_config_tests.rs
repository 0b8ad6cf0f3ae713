/*!
 * Tests for application configuration functionality
 */

use etlcheck::app_config::{Config, LogLevel, ModelProvider, ProviderConfig};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();
    let common = &config.validation.common;

    assert_eq!(common.max_chars_per_chunk, 12_000);
    assert_eq!(common.temperature, 0.0);
    assert_eq!(common.target_language, "PySpark");
    assert_eq!(common.report_title, "ETL Conversion Validation Report");
    assert_eq!(config.validation.provider, ModelProvider::OpenAI);
    assert_eq!(config.validation.available_providers.len(), 4);
    assert_eq!(config.log_level, LogLevel::Info);

    let openai = config.validation.get_provider_config(&ModelProvider::OpenAI)
        .expect("OpenAI provider config should exist");
    assert_eq!(openai.timeout_secs, 300);
    assert_eq!(openai.max_tokens, 4096);
    assert_eq!(openai.endpoint, "https://api.openai.com/v1");
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    config.validation.provider = ModelProvider::Ollama;
    assert!(config.validate().is_ok());

    config.validation.common.max_chars_per_chunk = 0;
    assert!(config.validate().is_err());
    config.validation.common.max_chars_per_chunk = 100;

    config.validation.common.temperature = 2.5;
    assert!(config.validate().is_err());
    config.validation.common.temperature = 0.0;

    config.validation.common.target_language = "  ".to_string();
    assert!(config.validate().is_err());
    config.validation.common.target_language = "PySpark".to_string();

    config.validation.provider = ModelProvider::Anthropic;
    config.validation.provider_config_mut(&ModelProvider::Anthropic).api_key = "sk-ant-test".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation_withMissingApiKey_shouldFailUnlessEnvProvidesOne() {
    let mut config = Config::default();
    config.validation.provider = ModelProvider::OpenAI;
    config.validation.provider_config_mut(&ModelProvider::OpenAI).api_key.clear();

    if std::env::var("OPENAI_API_KEY").map(|k| k.is_empty()).unwrap_or(true) {
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}

/// Partial JSON falls back to defaults for everything missing
#[test]
fn test_config_deserialize_withPartialJson_shouldFillDefaults() {
    let json = r#"{
        "validation": {
            "provider": "ollama",
            "available_providers": [{ "type": "ollama", "model": "qwen2.5-coder" }],
            "common": { "max_chars_per_chunk": 5000 }
        }
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.validation.provider, ModelProvider::Ollama);
    assert_eq!(config.validation.get_model(), "qwen2.5-coder");
    assert_eq!(config.validation.get_endpoint(), "http://localhost:11434");
    assert_eq!(config.validation.get_timeout_secs(), 300);
    assert_eq!(config.validation.common.max_chars_per_chunk, 5000);
    assert_eq!(config.validation.common.target_language, "PySpark");
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_config_serialize_shouldRoundTripProviderType() {
    let config = Config::default();
    let json = serde_json::to_string_pretty(&config).unwrap();
    assert!(json.contains(r#""type": "lmstudio""#));

    let parsed: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.validation.available_providers.len(), 4);
}

#[test]
fn test_providerConfigMut_withUnknownProvider_shouldInsertDefaults() {
    let mut config = Config::default();
    config.validation.available_providers.clear();

    config.validation.provider_config_mut(&ModelProvider::Anthropic).model = "claude-x".to_string();
    config.validation.provider = ModelProvider::Anthropic;

    assert_eq!(config.validation.available_providers.len(), 1);
    assert_eq!(config.validation.get_model(), "claude-x");
    assert_eq!(config.validation.get_endpoint(), "https://api.anthropic.com");
}

#[test]
fn test_modelProvider_fromStr_shouldAcceptKnownNames() {
    assert_eq!("OpenAI".parse::<ModelProvider>().unwrap(), ModelProvider::OpenAI);
    assert_eq!("lmstudio".parse::<ModelProvider>().unwrap(), ModelProvider::LMStudio);
    assert!("bard".parse::<ModelProvider>().is_err());
    assert_eq!(ModelProvider::Anthropic.to_string(), "anthropic");
}

#[test]
fn test_providerConfig_new_shouldUseProviderDefaults() {
    let config = ProviderConfig::new(ModelProvider::LMStudio);
    assert_eq!(config.provider_type, "lmstudio");
    assert_eq!(config.endpoint, "http://localhost:1234/v1");
    assert!(config.api_key.is_empty());
}

#[test]
fn test_logLevel_toLevelFilter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
