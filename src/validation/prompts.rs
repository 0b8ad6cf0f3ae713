/*!
 * Prompt templates for validation and correction calls.
 *
 * Templates use `{name}` placeholders. Rendering is a single pass over the
 * template, so placeholder-like text inside substituted chunks is left alone.
 */

use crate::providers::{ChatMessage, CompletionRequest};

/// A prompt template with `{name}` placeholders
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// Per-chunk validation prompt; asks for the four fixed sections.
    pub const CHUNK_VALIDATION: &'static str = r#"You are validating {source_kind} to {target_language} conversion (Part {part}).

{source_kind} Input (chunk {part}):
{source_chunk}

{target_language} Output (chunk {part}):
{target_chunk}

Validate correctness for this chunk.
Provide sections:
- ✅ Correct parts
- ⚠️ Potential issues
- ❌ Missing logic
- 💡 Suggested improvements"#;

    /// System prompt for the correction call.
    pub const CORRECTION_SYSTEM: &'static str = "You are an expert {target_language} converter.";

    /// User prompt for the correction call.
    pub const CORRECTION_USER: &'static str = r#"{source_kind} Input (first chunk):
{source_chunk}

{target_language} Output (first chunk):
{target_chunk}

Based on the {source_kind} input and {target_language} output, rewrite the {target_language} code so that it
fully and correctly implements the {source_kind} logic.

IMPORTANT:
- Return only the corrected {target_language} code.
- If the original file is already correct, return the same code unchanged."#;

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Render the template; unknown placeholders are kept verbatim.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let replacement = after.find('}').and_then(|close| {
                let name = &after[..close];
                vars.iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| (*value, close))
            });

            match replacement {
                Some((value, close)) => {
                    out.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }
}

/// Builds the requests sent to the model service
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    source_kind: String,
    target_language: String,
    temperature: f32,
}

impl PromptBuilder {
    pub fn new(source_kind: &str, target_language: &str, temperature: f32) -> Self {
        Self {
            source_kind: source_kind.to_string(),
            target_language: target_language.to_string(),
            temperature,
        }
    }

    /// Request validating one chunk pair; `index` is zero-based.
    pub fn validation_request(&self, index: usize, source_chunk: &str, target_chunk: &str) -> CompletionRequest {
        let part = (index + 1).to_string();
        let prompt = PromptTemplate::new(PromptTemplate::CHUNK_VALIDATION).render(&[
            ("source_kind", self.source_kind.as_str()),
            ("target_language", self.target_language.as_str()),
            ("part", part.as_str()),
            ("source_chunk", source_chunk),
            ("target_chunk", target_chunk),
        ]);

        CompletionRequest::new(self.temperature).add_message(ChatMessage::user(prompt))
    }

    /// Request rewriting the first target chunk against the first source chunk.
    pub fn correction_request(&self, source_chunk: &str, target_chunk: &str) -> CompletionRequest {
        let vars = [
            ("source_kind", self.source_kind.as_str()),
            ("target_language", self.target_language.as_str()),
            ("source_chunk", source_chunk),
            ("target_chunk", target_chunk),
        ];
        let system = PromptTemplate::new(PromptTemplate::CORRECTION_SYSTEM).render(&vars);
        let user = PromptTemplate::new(PromptTemplate::CORRECTION_USER).render(&vars);

        CompletionRequest::new(self.temperature)
            .add_message(ChatMessage::system(system))
            .add_message(ChatMessage::user(user))
    }
}
