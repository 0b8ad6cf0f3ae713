/*!
 * Conversion validation core.
 *
 * - `chunker`: fixed-size character chunking
 * - `document`: source/target documents, merged report, corrected script
 * - `prompts`: validation and correction prompt templates
 * - `orchestrator`: sequential chunk-pair validation and the correction call
 * - `sections`: keyword-based bucketing of report lines into four categories
 */

pub mod chunker;
pub mod document;
pub mod orchestrator;
pub mod prompts;
pub mod sections;

// Re-export main types for easier usage
pub use self::chunker::{Chunks, DEFAULT_MAX_CHARS, chunk_text};
pub use self::document::{CorrectedScript, EtlKind, SourceDocument, TargetDocument, ValidationReport};
pub use self::orchestrator::{OrchestratorOptions, ValidationOrchestrator, ValidationOutcome, pair_chunks};
pub use self::prompts::{PromptBuilder, PromptTemplate};
pub use self::sections::{Category, SectionedReport, parse_sections};
