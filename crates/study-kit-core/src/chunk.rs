//! Line-boundary text chunker for narration.
//!
//! Splits long explanation text into chunks of at most `max_length`
//! characters so each can be narrated on its own. Splitting happens only
//! between paragraphs (lines), never inside one.
//!
//! # Algorithm
//!
//! 1. Split text into paragraphs on `\n`, each keeping its own line break.
//! 2. Accumulate paragraphs into a buffer until adding the next one would
//!    push the buffer past `max_length`.
//! 3. When exceeded, flush the buffer as a chunk and start a new one with
//!    that paragraph.
//! 4. Flush whatever remains.
//!
//! A single paragraph longer than `max_length` is kept whole as its own
//! chunk. Concatenating the returned chunks reproduces the input exactly.
//!
//! # Example
//!
//! ```rust
//! use study_kit_core::chunk::chunk_text;
//!
//! let chunks = chunk_text("First line.\nSecond line.\n", 16).unwrap();
//! assert_eq!(chunks, vec!["First line.\n", "Second line.\n"]);
//! assert_eq!(chunks.concat(), "First line.\nSecond line.\n");
//! ```

use crate::error::{Result, StudyError};

/// Default chunk size, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 4000;

/// Split `text` into chunks of whole paragraphs, each at most `max_length`
/// characters unless a single paragraph is longer.
///
/// Length is counted in Unicode scalar values.
///
/// # Guarantees
///
/// - `chunks.concat() == text`.
/// - Empty input yields no chunks.
/// - Chunk boundaries fall only right after a `\n`.
///
/// # Errors
///
/// [`StudyError::InvalidArgument`] if `max_length` is zero.
pub fn chunk_text(text: &str, max_length: usize) -> Result<Vec<String>> {
    if max_length == 0 {
        return Err(StudyError::InvalidArgument(
            "max_length must be > 0".to_string(),
        ));
    }

    let mut chunks = Vec::new();
    let mut current_buf = String::new();
    let mut current_len = 0usize;

    for para in text.split_inclusive('\n') {
        let para_len = para.chars().count();

        if current_len + para_len > max_length && !current_buf.is_empty() {
            chunks.push(std::mem::take(&mut current_buf));
            current_len = 0;
        }

        current_buf.push_str(para);
        current_len += para_len;
    }

    if !current_buf.is_empty() {
        chunks.push(current_buf);
    }

    Ok(chunks)
}

/// [`chunk_text`] with [`DEFAULT_MAX_LENGTH`].
pub fn chunk_text_default(text: &str) -> Result<Vec<String>> {
    chunk_text(text, DEFAULT_MAX_LENGTH)
}

/// Convert a signed length setting into a valid `max_length`.
///
/// # Errors
///
/// [`StudyError::InvalidArgument`] if `value <= 0`.
pub fn max_length_from(value: i64) -> Result<usize> {
    if value <= 0 {
        return Err(StudyError::InvalidArgument(format!(
            "max_length must be > 0, got {}",
            value
        )));
    }
    usize::try_from(value)
        .map_err(|_| StudyError::InvalidArgument(format!("max_length {} is too large", value)))
}
