//! `study chunk`: split a text file into narration chunks.
//!
//! The chunking itself lives in [`study_kit_core::chunk`]; this module
//! resolves the length limit, reads the file, and prints the result.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use study_kit_core::chunk::{chunk_text, max_length_from};
use study_kit_core::quiz::decode_text;

use crate::config::Config;
use crate::output::OutputFormat;

/// Summary of one chunk, as printed by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkSummary {
    pub index: usize,
    pub chars: usize,
    pub lines: usize,
    /// Set when a single line is longer than the limit.
    pub oversized: bool,
    pub text: String,
}

/// Chunk `text` and describe each chunk.
pub fn summarize_chunks(text: &str, max_length: usize) -> Result<Vec<ChunkSummary>> {
    let chunks = chunk_text(text, max_length)?;
    Ok(chunks
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            let chars = text.chars().count();
            ChunkSummary {
                index,
                chars,
                lines: text.split_inclusive('\n').count(),
                oversized: chars > max_length,
                text,
            }
        })
        .collect())
}

/// Resolve the effective limit: CLI override first, then config.
pub fn resolve_max_length(config: &Config, override_len: Option<i64>) -> Result<usize> {
    match override_len {
        Some(value) => max_length_from(value).context("Invalid --max-length"),
        None => config.chunking.max_length(),
    }
}

pub fn run_chunk(
    config: &Config,
    path: &Path,
    max_length: Option<i64>,
    format: OutputFormat,
) -> Result<()> {
    let max_length = resolve_max_length(config, max_length)?;
    let raw = std::fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let text = decode_text(&raw).with_context(|| format!("Invalid text file: {}", path.display()))?;

    let summaries = summarize_chunks(text, max_length)?;
    for s in summaries.iter().filter(|s| s.oversized) {
        tracing::warn!(
            index = s.index,
            chars = s.chars,
            max_length,
            "line exceeds max_length and was kept as one chunk"
        );
    }

    match format {
        OutputFormat::Json => {
            let chunks: Vec<&str> = summaries.iter().map(|s| s.text.as_str()).collect();
            println!("{}", serde_json::to_string_pretty(&chunks)?);
        }
        OutputFormat::Text => {
            println!("{:<6} {:>7} {:>6}  PREVIEW", "CHUNK", "CHARS", "LINES");
            for s in &summaries {
                println!(
                    "{:<6} {:>7} {:>6}  {}",
                    s.index,
                    s.chars,
                    s.lines,
                    preview(&s.text, 48)
                );
            }
            println!("{} chunk(s), max_length {}", summaries.len(), max_length);
        }
    }

    Ok(())
}

/// First line of `text`, cut to `width` characters.
fn preview(text: &str, width: usize) -> String {
    let first = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let mut out: String = first.chars().take(width).collect();
    if first.chars().count() > width {
        out.push('…');
    }
    out
}
