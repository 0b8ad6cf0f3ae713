/*!
 * Tests for fixed-size character chunking
 */

use etlcheck::errors::ValidationError;
use etlcheck::validation::chunker::{Chunks, DEFAULT_MAX_CHARS, chunk_text};

/// Concatenating the chunks gives back the input
#[test]
fn test_chunkText_withMultiByteText_shouldRoundTrip() {
    let text = "SELECT naïve, café FROM t WHERE x = '→' -- ✅ done\n".repeat(37);
    for max in [1, 2, 7, 64, 1000] {
        let chunks = chunk_text(&text, max).unwrap();
        assert_eq!(chunks.concat(), text);
    }
}

/// Chunk count is the ceiling of length over max
#[test]
fn test_chunkText_shouldProduceCeilingChunkCount() {
    let text = "x".repeat(25_001);
    let chunks = chunk_text(&text, 12_000).unwrap();

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].chars().count(), 12_000);
    assert_eq!(chunks[1].chars().count(), 12_000);
    assert_eq!(chunks[2].chars().count(), 1);
}

/// Every chunk but the last is exactly max characters long
#[test]
fn test_chunkText_shouldFillAllButLastChunk() {
    let text = "é".repeat(10);
    let chunks = chunk_text(&text, 3).unwrap();

    let lengths: Vec<usize> = chunks.iter().map(|c| c.chars().count()).collect();
    assert_eq!(lengths, vec![3, 3, 3, 1]);
}

#[test]
fn test_chunkText_withEmptyInput_shouldReturnNoChunks() {
    assert!(chunk_text("", 10).unwrap().is_empty());
}

#[test]
fn test_chunkText_withZeroMax_shouldBeInvalidArgument() {
    assert!(matches!(chunk_text("abc", 0), Err(ValidationError::InvalidArgument(_))));
    assert!(matches!(Chunks::new("", 0), Err(ValidationError::InvalidArgument(_))));
}

#[test]
fn test_chunks_shouldBeLazyAndBorrowed() {
    let text = "abcdef";
    let mut chunks = Chunks::new(text, 4).unwrap();
    assert_eq!(chunks.next(), Some("abcd"));
    assert_eq!(chunks.next(), Some("ef"));
    assert_eq!(chunks.next(), None);
}

/// A 15000-char source and a 5000-char target at the default size pair up as 2 and 1
#[test]
fn test_chunkText_withDefaultSize_shouldSplitLargeSourceInTwo() {
    let source = "s".repeat(15_000);
    let target = "t".repeat(5_000);

    assert_eq!(chunk_text(&source, DEFAULT_MAX_CHARS).unwrap().len(), 2);
    assert_eq!(chunk_text(&target, DEFAULT_MAX_CHARS).unwrap().len(), 1);
}
