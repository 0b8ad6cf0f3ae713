/*!
 * Fixed-size text chunking.
 *
 * Text is cut purely by character count: no overlap, no awareness of
 * statements or lines. Concatenating the chunks reproduces the input.
 */

use crate::errors::ValidationError;

/// Default maximum number of characters per chunk
pub const DEFAULT_MAX_CHARS: usize = 12000;

/// Lazy iterator over contiguous chunks of at most `max_chars` characters
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    rest: &'a str,
    max_chars: usize,
}

impl<'a> Chunks<'a> {
    /// Create a chunk iterator, failing fast when `max_chars` is zero
    pub fn new(text: &'a str, max_chars: usize) -> Result<Self, ValidationError> {
        if max_chars == 0 {
            return Err(ValidationError::InvalidArgument(
                "max_chars must be greater than zero".to_string(),
            ));
        }
        Ok(Self { rest: text, max_chars })
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        // Byte offset of the character just past the chunk, or the whole tail
        let split_at = self.rest
            .char_indices()
            .nth(self.max_chars)
            .map(|(offset, _)| offset)
            .unwrap_or(self.rest.len());

        let (chunk, rest) = self.rest.split_at(split_at);
        self.rest = rest;
        Some(chunk)
    }
}

/// Split text into owned chunks of at most `max_chars` characters
pub fn chunk_text(text: &str, max_chars: usize) -> Result<Vec<String>, ValidationError> {
    Ok(Chunks::new(text, max_chars)?.map(str::to_string).collect())
}
