/*!
 * Flow document rendering via docx-rs.
 */

use docx_rs::{Docx, Paragraph, Run};
use std::io::Cursor;

use crate::errors::RenderError;
use crate::validation::sections::SectionedReport;

use super::NO_FINDINGS;

// Sizes are in half-points
const TITLE_SIZE: usize = 36;
const HEADING_SIZE: usize = 28;
const BODY_SIZE: usize = 22;

fn text_paragraph(text: &str, size: usize, bold: bool) -> Paragraph {
    let mut run = Run::new().add_text(text).size(size);
    if bold {
        run = run.bold();
    }
    Paragraph::new().add_run(run)
}

/// Render the report as DOCX bytes
pub fn render(title: &str, report: &SectionedReport) -> Result<Vec<u8>, RenderError> {
    let mut docx = Docx::new().add_paragraph(text_paragraph(title, TITLE_SIZE, true));

    for (category, findings) in report.iter() {
        docx = docx.add_paragraph(text_paragraph(category.title(), HEADING_SIZE, true));

        if findings.is_empty() {
            docx = docx.add_paragraph(text_paragraph(NO_FINDINGS, BODY_SIZE, false));
            continue;
        }

        for finding in findings {
            docx = docx.add_paragraph(text_paragraph(&format!("• {}", finding), BODY_SIZE, false));
        }
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| RenderError::Docx(e.to_string()))?;

    Ok(buffer.into_inner())
}
