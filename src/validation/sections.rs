/*!
 * Heuristic section parser for free-form validation reports.
 *
 * Lines are bucketed by heading keywords (case-insensitive substring match).
 * After a heading, lines starting with `-` or `•` are findings of that
 * category until the next heading. Everything else is dropped. Output that
 * deviates from the expected wording simply leaves categories empty.
 */

use serde::Serialize;
use std::collections::BTreeMap;

/// The four fixed finding categories, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    CorrectParts,
    PotentialIssues,
    MissingLogic,
    SuggestedImprovements,
}

impl Category {
    /// All categories in report order
    pub const ALL: [Category; 4] = [
        Category::CorrectParts,
        Category::PotentialIssues,
        Category::MissingLogic,
        Category::SuggestedImprovements,
    ];

    /// Heading used in rendered documents
    pub fn title(&self) -> &'static str {
        match self {
            Self::CorrectParts => "Correct Parts",
            Self::PotentialIssues => "Potential Issues",
            Self::MissingLogic => "Missing Logic",
            Self::SuggestedImprovements => "Suggested Improvements",
        }
    }

    /// Lowercase phrase that marks this category's heading in model output
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::CorrectParts => "correct parts",
            Self::PotentialIssues => "potential issues",
            Self::MissingLogic => "missing logic",
            Self::SuggestedImprovements => "suggested improvements",
        }
    }

    /// Category whose heading phrase occurs in `line`, first match wins
    pub fn from_heading(line: &str) -> Option<Self> {
        let lower = line.to_lowercase();
        Self::ALL.into_iter().find(|c| lower.contains(c.keyword()))
    }
}

/// Findings grouped by category; all four categories are always present
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionedReport {
    sections: BTreeMap<Category, Vec<String>>,
}

impl Default for SectionedReport {
    fn default() -> Self {
        Self {
            sections: Category::ALL.into_iter().map(|c| (c, Vec::new())).collect(),
        }
    }
}

impl SectionedReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Findings of one category, in the order they were seen
    pub fn findings(&self, category: Category) -> &[String] {
        self.sections.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append a finding to a category
    pub fn push(&mut self, category: Category, finding: impl Into<String>) {
        self.sections.entry(category).or_default().push(finding.into());
    }

    /// Categories with their findings, in report order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        Category::ALL.into_iter().map(move |c| (c, self.findings(c)))
    }

    /// Total number of findings across all categories
    pub fn total_findings(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_findings() == 0
    }
}

const BULLET_MARKERS: [char; 2] = ['-', '•'];

/// Parse a merged report into the four categories
pub fn parse_sections(report: &str) -> SectionedReport {
    let mut sections = SectionedReport::new();
    let mut current: Option<Category> = None;

    for raw in report.lines() {
        let line = raw.trim();

        if let Some(category) = Category::from_heading(line) {
            current = Some(category);
            continue;
        }

        if let Some(category) = current {
            if line.starts_with(BULLET_MARKERS) {
                let finding = line.trim_start_matches(BULLET_MARKERS).trim();
                sections.push(category, finding);
            }
        }
    }

    sections
}
