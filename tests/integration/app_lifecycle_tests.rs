/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use etlcheck::app_config::{Config, ModelProvider};
use etlcheck::app_controller::Controller;

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert_eq!(controller.config().validation.common.max_chars_per_chunk, 12_000);
    Ok(())
}

/// Test the controller with custom configuration
#[test]
fn test_controller_withCustomConfig_shouldKeepIt() -> Result<()> {
    let mut config = Config::default();
    config.validation.provider = ModelProvider::Ollama;
    config.validation.common.target_language = "Scala Spark".to_string();

    let controller = Controller::with_config(config)?;
    assert_eq!(controller.config().validation.provider, ModelProvider::Ollama);
    assert_eq!(controller.config().validation.common.target_language, "Scala Spark");
    Ok(())
}

/// Config written as the CLI writes its default file loads back identically
#[test]
fn test_defaultConfigFile_shouldLoadBack() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("conf.json");

    std::fs::write(&path, serde_json::to_string_pretty(&Config::default())?)?;
    let loaded: Config = serde_json::from_reader(std::fs::File::open(&path)?)?;

    assert_eq!(loaded.validation.get_model(), "gpt-4o");
    assert_eq!(loaded.validation.common.report_title, "ETL Conversion Validation Report");
    Ok(())
}

/// Ping against an unreachable local server reports a connection failure
#[test]
fn test_ping_withUnreachableOllama_shouldFail() -> Result<()> {
    let mut config = Config::default();
    config.validation.provider = ModelProvider::Ollama;
    let ollama = config.validation.provider_config_mut(&ModelProvider::Ollama);
    ollama.endpoint = "http://127.0.0.1:9".to_string();
    ollama.timeout_secs = 2;

    let controller = Controller::with_config(config)?;
    let result = tokio_test::block_on(controller.ping());
    assert!(result.is_err());
    Ok(())
}
