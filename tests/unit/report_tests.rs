/*!
 * Tests for PDF and DOCX report rendering
 */

use anyhow::Result;
use etlcheck::report::{NO_FINDINGS, ReportFormat, ReportRenderer};
use etlcheck::validation::sections::{Category, SectionedReport, parse_sections};
use crate::common;

const TITLE: &str = "ETL Conversion Validation Report";

/// All-empty report: both formats show four headings, each with the placeholder
#[test]
fn test_render_withAllCategoriesEmpty_shouldShowPlaceholderFourTimes() -> Result<()> {
    let renderer = ReportRenderer::new(TITLE);
    let report = SectionedReport::new();

    let pdf = renderer.render(&report, ReportFormat::Pdf)?;
    assert_eq!(common::count_occurrences(&pdf, format!("({})", NO_FINDINGS).as_bytes()), 4);
    for category in Category::ALL {
        assert_eq!(common::count_occurrences(&pdf, format!("({})", category.title()).as_bytes()), 1);
    }

    let xml = common::read_docx_document_xml(&renderer.render(&report, ReportFormat::Docx)?)?;
    assert_eq!(xml.matches(NO_FINDINGS).count(), 4);
    for category in Category::ALL {
        assert_eq!(xml.matches(category.title()).count(), 1);
    }

    Ok(())
}

#[test]
fn test_renderDocx_shouldListHeadingsInFixedOrderAfterTitle() -> Result<()> {
    let report = parse_sections("💡 Suggested improvements\n- cache lookups\n✅ Correct parts\n- reads orders\n");
    let xml = common::read_docx_document_xml(&ReportRenderer::new(TITLE).render(&report, ReportFormat::Docx)?)?;

    let mut positions = vec![xml.find(TITLE).unwrap()];
    positions.extend(Category::ALL.iter().map(|c| xml.find(c.title()).unwrap()));
    assert!(positions.windows(2).all(|p| p[0] < p[1]));

    assert!(xml.contains("• reads orders"));
    assert!(xml.contains("• cache lookups"));
    assert_eq!(xml.matches(NO_FINDINGS).count(), 2);
    Ok(())
}

#[test]
fn test_renderDocx_shouldEscapeMarkupInFindings() -> Result<()> {
    let mut report = SectionedReport::new();
    report.push(Category::PotentialIssues, "amount < 0 && status <> 'A'");

    let bytes = ReportRenderer::new(TITLE).render(&report, ReportFormat::Docx)?;
    let xml = common::read_docx_document_xml(&bytes)?;
    assert!(xml.contains("amount &lt; 0"));
    Ok(())
}

#[test]
fn test_renderPdf_withFindings_shouldWriteBulletsAndDropEmptyPlaceholder() -> Result<()> {
    let mut report = SectionedReport::new();
    report.push(Category::PotentialIssues, "first issue");
    report.push(Category::PotentialIssues, "second issue");

    let pdf = ReportRenderer::new(TITLE).render(&report, ReportFormat::Pdf)?;

    assert!(pdf.starts_with(b"%PDF-"));
    assert_eq!(common::count_occurrences(&pdf, b"(\x95 first issue)"), 1);
    assert_eq!(common::count_occurrences(&pdf, b"(\x95 second issue)"), 1);
    assert_eq!(common::count_occurrences(&pdf, b"(No findings)"), 3);
    Ok(())
}

#[test]
fn test_renderPdf_withLongFinding_shouldWrapLines() -> Result<()> {
    let mut report = SectionedReport::new();
    report.push(Category::MissingLogic, "word ".repeat(100));

    let pdf = ReportRenderer::new(TITLE).render(&report, ReportFormat::Pdf)?;
    let lines = common::count_occurrences(&pdf, b" Tj ET");

    // title, 4 headings, 3 placeholders and a wrapped finding
    assert!(lines > 9);
    Ok(())
}

#[test]
fn test_reportFormat_extension_shouldMatchFormat() {
    assert_eq!(ReportFormat::Pdf.extension(), "pdf");
    assert_eq!(ReportFormat::Docx.extension(), "docx");
}
