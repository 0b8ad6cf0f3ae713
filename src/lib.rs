/*!
 * # etlcheck - ETL conversion validator
 *
 * A Rust library for checking AI-assisted conversions of legacy ETL exports
 * (Informatica, Datastage) into modern scripts such as PySpark.
 *
 * ## Features
 *
 * - Split source and target into fixed-size character chunks
 * - Validate every chunk pair against a model service:
 *   - OpenAI API (and LM Studio)
 *   - Anthropic API
 *   - Ollama (local LLM)
 * - Request a corrected script for the first chunk pair
 * - Bucket the free-form report into four finding categories
 * - Render the findings as PDF and DOCX documents
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `validation`: Validation core:
 *   - `validation::chunker`: Character chunking
 *   - `validation::orchestrator`: Chunk-pair validation and correction calls
 *   - `validation::sections`: Section parsing of the merged report
 * - `report`: PDF and DOCX rendering
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `providers`: Client implementations for various LLM providers:
 *   - `providers::ollama`: Ollama API client
 *   - `providers::openai`: OpenAI API client
 *   - `providers::anthropic`: Anthropic API client
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod validation;
pub mod report;
pub mod app_controller;
pub mod providers;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunOutcome, RunSummary, ValidationRequest};
pub use validation::{EtlKind, SectionedReport, ValidationOrchestrator, chunk_text, parse_sections};
pub use report::{ReportFormat, ReportRenderer};
pub use errors::{AppError, ProviderError, RenderError, ValidationError};
