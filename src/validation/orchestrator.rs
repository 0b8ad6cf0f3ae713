/*!
 * Validation orchestrator.
 *
 * Drives one model call per positional chunk pair, merges the responses,
 * then issues a single correction call built from chunk 0 of each side.
 * Calls are issued strictly one after another. The first failure aborts
 * the run and every response gathered before it is discarded.
 */

use log::{debug, info};
use std::time::Instant;

use crate::errors::ValidationError;
use crate::providers::Provider;

use super::chunker::{DEFAULT_MAX_CHARS, chunk_text};
use super::document::{CorrectedScript, SourceDocument, TargetDocument, ValidationReport};
use super::prompts::PromptBuilder;

/// Options for one validation run
#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    /// Maximum characters per chunk
    pub max_chars: usize,
    /// Sampling temperature for every call
    pub temperature: f32,
    /// Language of the translated script, used in prompts
    pub target_language: String,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            temperature: 0.0,
            target_language: "PySpark".to_string(),
        }
    }
}

/// Result of a complete run
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    /// Number of chunks the source was split into
    pub source_chunks: usize,
    /// Number of chunks the target was split into
    pub target_chunks: usize,
    /// Per-pair responses in index order
    pub report: ValidationReport,
    /// Script proposed by the correction call
    pub corrected: CorrectedScript,
}

impl ValidationOutcome {
    /// Model calls issued: one per pair plus the correction
    pub fn calls_issued(&self) -> usize {
        self.report.len() + 1
    }
}

type ProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

/// Coordinates validation and correction calls against a model service
pub struct ValidationOrchestrator<'a, P: Provider + ?Sized> {
    provider: &'a P,
    options: OrchestratorOptions,
    progress: Option<ProgressCallback>,
}

/// Positional pairing: `i` ranges over the longer side, the shorter side yields ""
pub fn pair_chunks<'c>(source_chunks: &'c [String], target_chunks: &'c [String]) -> Vec<(&'c str, &'c str)> {
    let pairs = source_chunks.len().max(target_chunks.len());
    (0..pairs)
        .map(|i| {
            (
                source_chunks.get(i).map(String::as_str).unwrap_or(""),
                target_chunks.get(i).map(String::as_str).unwrap_or(""),
            )
        })
        .collect()
}

impl<'a, P: Provider + ?Sized> ValidationOrchestrator<'a, P> {
    /// Create an orchestrator over an injected model service
    pub fn new(provider: &'a P, options: OrchestratorOptions) -> Self {
        Self {
            provider,
            options,
            progress: None,
        }
    }

    /// Report `(completed_pairs, total_pairs)` after each validation call
    pub fn with_progress(mut self, callback: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    fn prompts(&self, source_kind: &str) -> PromptBuilder {
        PromptBuilder::new(source_kind, &self.options.target_language, self.options.temperature)
    }

    /// Chunk both documents, validate every pair, then request a correction
    pub async fn run(
        &self,
        source: &SourceDocument,
        target: &TargetDocument,
    ) -> Result<ValidationOutcome, ValidationError> {
        let source_chunks = chunk_text(&source.text, self.options.max_chars)?;
        let target_chunks = chunk_text(&target.text, self.options.max_chars)?;
        let source_kind = source.kind.display_name();

        info!(
            "Validating {} ({} chunks) against {} ({} chunks)",
            source.name, source_chunks.len(), target.name, target_chunks.len()
        );

        let report = self.validate_chunks(source_kind, &source_chunks, &target_chunks).await?;
        let corrected = self.correct(source_kind, &source_chunks, &target_chunks).await?;

        Ok(ValidationOutcome {
            source_chunks: source_chunks.len(),
            target_chunks: target_chunks.len(),
            report,
            corrected,
        })
    }

    /// One call per positional chunk pair; responses are trimmed and kept in order
    pub async fn validate_chunks(
        &self,
        source_kind: &str,
        source_chunks: &[String],
        target_chunks: &[String],
    ) -> Result<ValidationReport, ValidationError> {
        let prompts = self.prompts(source_kind);
        let pairs = pair_chunks(source_chunks, target_chunks);
        let total = pairs.len();
        let mut parts = Vec::with_capacity(total);

        for (index, (source_chunk, target_chunk)) in pairs.into_iter().enumerate() {
            debug!(
                "Part {}/{}: {} source chars, {} target chars",
                index + 1,
                total,
                source_chunk.chars().count(),
                target_chunk.chars().count()
            );

            let start = Instant::now();
            let request = prompts.validation_request(index, source_chunk, target_chunk);
            let response = self.provider.complete(request).await.map_err(|source| {
                ValidationError::ExternalServiceFailure {
                    stage: format!("validation part {}", index + 1),
                    source,
                }
            })?;
            debug!("Part {} answered in {:?}", index + 1, start.elapsed());

            parts.push(response.trim().to_string());

            if let Some(progress) = &self.progress {
                progress(index + 1, total);
            }
        }

        Ok(ValidationReport::new(parts))
    }

    /// Single correction call from chunk 0 of each side; findings are not used
    pub async fn correct(
        &self,
        source_kind: &str,
        source_chunks: &[String],
        target_chunks: &[String],
    ) -> Result<CorrectedScript, ValidationError> {
        let source_chunk = source_chunks.first().map(String::as_str).unwrap_or("");
        let target_chunk = target_chunks.first().map(String::as_str).unwrap_or("");

        let request = self.prompts(source_kind).correction_request(source_chunk, target_chunk);
        let response = self.provider.complete(request).await.map_err(|source| {
            ValidationError::ExternalServiceFailure {
                stage: "correction".to_string(),
                source,
            }
        })?;

        Ok(CorrectedScript::new(response.trim()))
    }
}
