/*!
 * Transient documents handled during one validation run.
 */

use serde::{Deserialize, Serialize};

use crate::file_utils::decode_utf8_dropping_invalid;

/// Separator placed between per-chunk responses in the merged report
pub const REPORT_SEPARATOR: &str = "\n\n";

/// Tool that produced the legacy ETL export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EtlKind {
    Informatica,
    Datastage,
}

impl EtlKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Informatica => "Informatica",
            Self::Datastage => "Datastage",
        }
    }
}

/// Raw text of the uploaded ETL export
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// File name as supplied by the user
    pub name: String,
    /// Export flavour
    pub kind: EtlKind,
    /// Raw bytes as read
    pub bytes: Vec<u8>,
    /// Best-effort UTF-8 text with invalid bytes dropped
    pub text: String,
    /// Number of bytes lost while decoding
    pub dropped_bytes: usize,
}

impl SourceDocument {
    pub fn from_bytes(name: impl Into<String>, kind: EtlKind, bytes: Vec<u8>) -> Self {
        let (text, dropped_bytes) = decode_utf8_dropping_invalid(&bytes);
        Self {
            name: name.into(),
            kind,
            bytes,
            text,
            dropped_bytes,
        }
    }
}

/// Raw text of the uploaded translated script
#[derive(Debug, Clone)]
pub struct TargetDocument {
    /// File name as supplied by the user
    pub name: String,
    /// Raw bytes as read
    pub bytes: Vec<u8>,
    /// Best-effort UTF-8 text with invalid bytes dropped
    pub text: String,
    /// Number of bytes lost while decoding
    pub dropped_bytes: usize,
}

impl TargetDocument {
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let (text, dropped_bytes) = decode_utf8_dropping_invalid(&bytes);
        Self {
            name: name.into(),
            bytes,
            text,
            dropped_bytes,
        }
    }
}

/// Ordered per-chunk model responses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    parts: Vec<String>,
}

impl ValidationReport {
    pub fn new(parts: Vec<String>) -> Self {
        Self { parts }
    }

    /// Responses in chunk order
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// All responses joined by a blank line
    pub fn merged(&self) -> String {
        self.parts.join(REPORT_SEPARATOR)
    }
}

/// Script text proposed by the correction call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectedScript(String);

impl CorrectedScript {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
