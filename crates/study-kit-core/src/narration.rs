//! On-demand narration queue.
//!
//! Long explanations are narrated one chunk at a time. The queue holds the
//! chunk list produced by [`chunk_text`] and hands chunks out in order as
//! the caller asks for them.

use crate::chunk::chunk_text;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct NarrationQueue {
    chunks: Vec<String>,
    cursor: usize,
}

impl NarrationQueue {
    /// Chunk `text` for narration.
    ///
    /// # Errors
    ///
    /// Propagates [`chunk_text`]'s error for a zero `max_length`.
    pub fn new(text: &str, max_length: usize) -> Result<Self> {
        Ok(Self {
            chunks: chunk_text(text, max_length)?,
            cursor: 0,
        })
    }

    /// Whether the text needed more than one narration request.
    pub fn is_multi_part(&self) -> bool {
        self.chunks.len() > 1
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    /// Hand out the next chunk with its zero-based index.
    pub fn next_chunk(&mut self) -> Option<(usize, &str)> {
        let index = self.cursor;
        let chunk = self.chunks.get(index)?;
        self.cursor += 1;
        Some((index, chunk.as_str()))
    }

    /// Chunks not yet handed out.
    pub fn remaining(&self) -> usize {
        self.chunks.len() - self.cursor
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}
