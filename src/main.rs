// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use etlcheck::app_config::{self, Config, ModelProvider};
use etlcheck::{Controller, RunOutcome, ValidationRequest};

/// CLI Wrapper for ModelProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliModelProvider {
    #[value(name = "openai")]
    OpenAI,
    Anthropic,
    Ollama,
    #[value(name = "lmstudio")]
    LMStudio,
}

impl From<CliModelProvider> for ModelProvider {
    fn from(cli_provider: CliModelProvider) -> Self {
        match cli_provider {
            CliModelProvider::OpenAI => ModelProvider::OpenAI,
            CliModelProvider::Anthropic => ModelProvider::Anthropic,
            CliModelProvider::Ollama => ModelProvider::Ollama,
            CliModelProvider::LMStudio => ModelProvider::LMStudio,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// Options shared by every command that talks to a provider
#[derive(Parser, Debug)]
struct ProviderArgs {
    /// Model provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliModelProvider>,

    /// Model name to use
    #[arg(short, long)]
    model: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Informatica export (XML)
    #[arg(long, value_name = "FILE")]
    informatica: Option<PathBuf>,

    /// Datastage export (DSX/XML)
    #[arg(long, value_name = "FILE")]
    datastage: Option<PathBuf>,

    /// Converted script to validate
    #[arg(long, value_name = "FILE")]
    target: Option<PathBuf>,

    /// Output directory for the report and corrected script
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Maximum characters per chunk
    #[arg(long)]
    max_chars: Option<usize>,

    /// Language of the converted script (e.g. 'PySpark')
    #[arg(short, long)]
    target_language: Option<String>,

    #[command(flatten)]
    provider: ProviderArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a converted script against its ETL export
    Validate(ValidateArgs),

    /// Test the connection to the configured provider
    Ping(ProviderArgs),

    /// Generate shell completions for etlcheck
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// etlcheck - ETL conversion validator
///
/// Compares a legacy ETL export with its AI-converted script and reports
/// correct parts, potential issues, missing logic and suggested improvements.
#[derive(Parser, Debug)]
#[command(name = "etlcheck")]
#[command(version)]
#[command(about = "AI-assisted validation of ETL conversions")]
#[command(long_about = "etlcheck splits an Informatica or Datastage export and its converted script into chunks,
asks a model to review every chunk pair, and writes PDF and DOCX reports plus a corrected script.

EXAMPLES:
    etlcheck validate --informatica m_load.xml --target load.py
    etlcheck validate --datastage job.dsx --target job.py -o reports/ -f
    etlcheck validate -p ollama -m llama3.1 --informatica m.xml --target m.py
    etlcheck ping -p anthropic
    etlcheck completions bash > etlcheck.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically. API keys may also come from OPENAI_API_KEY or
    ANTHROPIC_API_KEY.

SUPPORTED PROVIDERS:
    openai    - OpenAI API (requires API key)
    anthropic - Anthropic Claude API (requires API key)
    ollama    - Local Ollama server
    lmstudio  - LM Studio local server (OpenAI-compatible on http://localhost:1234/v1)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI colour for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logger starts at trace; the effective level is applied through set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    let result = match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "etlcheck", &mut std::io::stdout());
            return Ok(());
        }
        Commands::Validate(args) => run_validate(args).await,
        Commands::Ping(args) => run_ping(args).await,
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run_validate(args: ValidateArgs) -> Result<()> {
    let mut config = load_config(&args.provider)?;

    if let Some(max_chars) = args.max_chars {
        config.validation.common.max_chars_per_chunk = max_chars;
    }
    if let Some(target_language) = &args.target_language {
        config.validation.common.target_language = target_language.clone();
    }

    config.validate().context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    let request = ValidationRequest {
        informatica: args.informatica,
        datastage: args.datastage,
        target: args.target,
        output_dir: args.output_dir,
        force_overwrite: args.force_overwrite,
    };

    match controller.run(request).await? {
        RunOutcome::Completed(_) => {}
        RunOutcome::Skipped(artifacts) => {
            warn!("Output exists: {}", artifacts.pdf.display());
        }
    }

    Ok(())
}

async fn run_ping(args: ProviderArgs) -> Result<()> {
    let config = load_config(&args)?;
    config.validate().context("Configuration validation failed")?;

    Controller::with_config(config)?.ping().await
}

/// Load or create the configuration, then apply CLI overrides
fn load_config(options: &ProviderArgs) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(provider) = &options.provider {
        config.validation.provider = provider.clone().into();
    }

    if let Some(model) = &options.model {
        let provider = config.validation.provider.clone();
        config.validation.provider_config_mut(&provider).model = model.clone();
    }

    match &options.log_level {
        Some(log_level) => config.log_level = log_level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    Ok(config)
}
