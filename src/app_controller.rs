use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::app_config::Config;
use crate::errors::ValidationError;
use crate::file_utils::FileManager;
use crate::providers::{self, Provider};
use crate::report::{ReportFormat, ReportRenderer};
use crate::validation::{
    Category, EtlKind, OrchestratorOptions, SourceDocument, TargetDocument, ValidationOrchestrator,
    parse_sections,
};

// @module: Application controller for conversion validation

/// Input files and output options for one validation run
#[derive(Debug, Clone, Default)]
pub struct ValidationRequest {
    /// Informatica export; preferred when both sources are given
    pub informatica: Option<PathBuf>,
    /// Datastage export
    pub datastage: Option<PathBuf>,
    /// Converted script to validate
    pub target: Option<PathBuf>,
    /// Where artifacts are written; defaults to the target's directory
    pub output_dir: Option<PathBuf>,
    /// Replace artifacts left by a previous run
    pub force_overwrite: bool,
}

/// Files produced by a run
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPaths {
    pub pdf: PathBuf,
    pub docx: PathBuf,
    pub corrected: PathBuf,
}

impl ArtifactPaths {
    /// Derive artifact names from the target file
    pub fn for_target(target: &Path, output_dir: &Path) -> Self {
        let corrected_ext = target
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_else(|| "txt".to_string());

        Self {
            pdf: FileManager::generate_output_path(target, output_dir, "validation", ReportFormat::Pdf.extension()),
            docx: FileManager::generate_output_path(target, output_dir, "validation", ReportFormat::Docx.extension()),
            corrected: FileManager::generate_output_path(target, output_dir, "corrected", &corrected_ext),
        }
    }

    /// Path of a rendered report
    pub fn report(&self, format: ReportFormat) -> &Path {
        match format {
            ReportFormat::Pdf => &self.pdf,
            ReportFormat::Docx => &self.docx,
        }
    }

    pub fn all(&self) -> [&Path; 3] {
        [&self.pdf, &self.docx, &self.corrected]
    }

    fn any_exists(&self) -> bool {
        self.all().iter().any(|p| p.exists())
    }
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub source_kind: EtlKind,
    pub chunk_pairs: usize,
    pub calls_issued: usize,
    /// Findings per category, in report order
    pub findings: Vec<(Category, usize)>,
    pub merged_report: String,
    pub artifacts: ArtifactPaths,
}

/// What a run ended up doing
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Completed(RunSummary),
    /// Artifacts already existed and overwriting was not requested
    Skipped(ArtifactPaths),
}

/// Main application controller for conversion validation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Test the connection to the configured provider
    pub async fn ping(&self) -> Result<()> {
        let provider = providers::create_provider(&self.config.validation)?;
        provider.test_connection().await?;
        info!(
            "Connected to {} ({})",
            self.config.validation.provider.display_name(),
            self.config.validation.get_model()
        );
        Ok(())
    }

    /// Run the full workflow against the configured provider
    pub async fn run(&self, request: ValidationRequest) -> Result<RunOutcome> {
        let (source_path, _, _) = Self::resolve_inputs(&request)?;
        let provider = providers::create_provider(&self.config.validation)?;
        info!(
            "{}: {} - {}",
            source_path.display(),
            self.config.validation.provider.display_name(),
            self.config.validation.get_model()
        );
        self.run_with_provider(&provider, request).await
    }

    /// Run the full workflow against an injected provider
    pub async fn run_with_provider<P: Provider + ?Sized>(
        &self,
        provider: &P,
        request: ValidationRequest,
    ) -> Result<RunOutcome> {
        let start_time = std::time::Instant::now();
        let (source_path, source_kind, target_path) = Self::resolve_inputs(&request)?;

        let output_dir = match &request.output_dir {
            Some(dir) => dir.clone(),
            None => target_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };

        let artifacts = ArtifactPaths::for_target(&target_path, &output_dir);
        if artifacts.any_exists() && !request.force_overwrite {
            warn!("Skipping, validation artifacts already exist (use -f to force overwrite)");
            return Ok(RunOutcome::Skipped(artifacts));
        }

        let source = SourceDocument::from_bytes(
            display_name(&source_path),
            source_kind,
            FileManager::read_bytes(&source_path)?,
        );
        let target = TargetDocument::from_bytes(display_name(&target_path), FileManager::read_bytes(&target_path)?);

        for (name, dropped) in [(&source.name, source.dropped_bytes), (&target.name, target.dropped_bytes)] {
            if dropped > 0 {
                warn!("{}: dropped {} bytes of invalid UTF-8", name, dropped);
            }
        }

        let common = &self.config.validation.common;
        let options = OrchestratorOptions {
            max_chars: common.max_chars_per_chunk,
            temperature: common.temperature,
            target_language: common.target_language.clone(),
        };

        let progress_bar = ProgressBar::new(0);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} parts ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Validating");

        let pb = progress_bar.clone();
        let orchestrator = ValidationOrchestrator::new(provider, options).with_progress(move |completed, total| {
            pb.set_length(total as u64);
            pb.set_position(completed as u64);
        });

        let result = orchestrator.run(&source, &target).await;
        progress_bar.finish_and_clear();
        let outcome = result?;

        let merged_report = outcome.report.merged();
        println!("{}", merged_report);

        let sections = parse_sections(&merged_report);
        let renderer = ReportRenderer::new(common.report_title.clone());

        FileManager::ensure_dir(&output_dir)?;
        for format in ReportFormat::ALL {
            let bytes = renderer.render(&sections, format)?;
            let path = artifacts.report(format);
            FileManager::write_bytes(path, &bytes)?;
            info!("Success: {}", path.display());
        }
        FileManager::write_to_file(&artifacts.corrected, outcome.corrected.as_str())?;
        info!("Success: {}", artifacts.corrected.display());

        let summary = RunSummary {
            run_id: Uuid::new_v4(),
            source_kind,
            chunk_pairs: outcome.report.len(),
            calls_issued: outcome.calls_issued(),
            findings: sections.iter().map(|(c, f)| (c, f.len())).collect(),
            merged_report,
            artifacts,
        };

        let findings = summary
            .findings
            .iter()
            .map(|(c, n)| format!("{}: {}", c.title(), n))
            .collect::<Vec<_>>()
            .join(", ");
        info!(
            "Run {} complete in {}. {} pairs, {} calls. {}",
            summary.run_id,
            Self::format_duration(start_time.elapsed()),
            summary.chunk_pairs,
            summary.calls_issued,
            findings
        );

        Ok(RunOutcome::Completed(summary))
    }

    /// Pick the source export and check both inputs exist
    fn resolve_inputs(request: &ValidationRequest) -> Result<(PathBuf, EtlKind, PathBuf), ValidationError> {
        let (source, kind) = match (&request.informatica, &request.datastage) {
            (Some(path), _) => (path.clone(), EtlKind::Informatica),
            (None, Some(path)) => (path.clone(), EtlKind::Datastage),
            (None, None) => {
                warn!("Please provide both the source file and the converted file");
                return Err(ValidationError::InputMissing("no Informatica or Datastage export given".to_string()));
            }
        };

        let Some(target) = request.target.clone() else {
            warn!("Please provide both the source file and the converted file");
            return Err(ValidationError::InputMissing("no converted script given".to_string()));
        };

        for path in [&source, &target] {
            if !FileManager::file_exists(path) {
                warn!("Input file does not exist: {}", path.display());
                return Err(ValidationError::InputMissing(format!("{} does not exist", path.display())));
            }
        }

        Ok((source, kind, target))
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
