/*!
 * Report rendering.
 *
 * Turns a `SectionedReport` into downloadable documents:
 * - `pdf`: fixed-layout, page-oriented document
 * - `docx`: flow document
 *
 * Both list the four categories in the same fixed order, each with a
 * heading followed by bullets or a `No findings` placeholder.
 */

use crate::errors::RenderError;
use crate::validation::sections::SectionedReport;

pub mod docx;
pub mod pdf;

/// Placeholder written under a category that has no findings
pub const NO_FINDINGS: &str = "No findings";

/// Output document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Pdf,
    Docx,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 2] = [ReportFormat::Pdf, ReportFormat::Docx];

    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }
}

/// Renders sectioned reports under a fixed title
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    title: String,
}

impl ReportRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Serialize the report in the requested format
    pub fn render(&self, report: &SectionedReport, format: ReportFormat) -> Result<Vec<u8>, RenderError> {
        match format {
            ReportFormat::Pdf => pdf::render(&self.title, report),
            ReportFormat::Docx => docx::render(&self.title, report),
        }
    }
}
