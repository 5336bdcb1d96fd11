use crate::error::{Result, ScoreError};

pub const DEFAULT_CHUNK_SIZE: usize = 5000;

/// Splits `text` into consecutive slices of `size` characters.
///
/// Boundaries are purely positional: words and sentences may be cut. The
/// last slice holds the remainder. Empty text yields no chunks.
pub fn chunk(text: &str, size: usize) -> Result<Vec<&str>> {
    if size == 0 {
        return Err(ScoreError::InvalidArgument(
            "chunk size must be greater than zero".to_string(),
        ));
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (offset, _) in text.char_indices() {
        if count == size {
            chunks.push(&text[start..offset]);
            start = offset;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }

    Ok(chunks)
}
