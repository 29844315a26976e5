//! `study explain`: generate an explanation and plan its narration.
//!
//! Also home to the helpers other commands use to obtain an explanation,
//! either from a saved file (`--from`) or from the generator.

use anyhow::{Context, Result};
use std::path::Path;

use study_kit_core::narration::NarrationQueue;
use study_kit_core::quiz::decode_text;

use crate::config::Config;
use crate::generate::{create_generator, Generator};
use crate::prompts::{explanation_prompt, DetailLevel};

/// An explanation together with its narration chunks.
#[derive(Debug)]
pub struct Explanation {
    pub text: String,
    pub narration: NarrationQueue,
}

pub async fn explain(
    generator: &dyn Generator,
    topic: &str,
    detail: DetailLevel,
    max_length: usize,
) -> Result<Explanation> {
    tracing::debug!(model = generator.model_name(), topic, %detail, "generating explanation");
    let text = generator
        .generate(&explanation_prompt(topic, detail))
        .await
        .with_context(|| format!("Failed to explain '{}'", topic))?;
    let narration = NarrationQueue::new(&text, max_length)?;
    Ok(Explanation { text, narration })
}

/// Read a previously saved explanation.
pub fn read_explanation(path: &Path) -> Result<String> {
    let raw = std::fs::read(path)
        .with_context(|| format!("Failed to read explanation file: {}", path.display()))?;
    let text = decode_text(&raw)
        .with_context(|| format!("Invalid explanation file: {}", path.display()))?;
    if text.trim().is_empty() {
        anyhow::bail!("Explanation file is empty: {}", path.display());
    }
    Ok(text.to_string())
}

/// The explanation in `from` if given, otherwise a fresh one from
/// `generator` at the default detail level.
pub async fn explanation_source(
    generator: &dyn Generator,
    topic: &str,
    from: Option<&Path>,
) -> Result<String> {
    match from {
        Some(path) => read_explanation(path),
        None => {
            tracing::info!(topic, "no explanation given, generating one first");
            generator
                .generate(&explanation_prompt(topic, DetailLevel::default()))
                .await
                .with_context(|| format!("Failed to explain '{}'", topic))
        }
    }
}

pub async fn run_explain(
    config: &Config,
    topic: &str,
    detail: DetailLevel,
    save_to: Option<&Path>,
) -> Result<()> {
    let generator = create_generator(&config.generation)?;
    let max_length = config.chunking.max_length()?;
    let explanation = explain(generator.as_ref(), topic, detail, max_length).await?;

    if let Some(path) = save_to {
        std::fs::write(path, &explanation.text)
            .with_context(|| format!("Failed to write explanation: {}", path.display()))?;
        tracing::info!(path = %path.display(), "saved explanation");
    }

    println!("{}", explanation.text.trim_end());
    println!();
    if explanation.narration.is_multi_part() {
        println!(
            "Narration: {} parts of up to {} characters",
            explanation.narration.len(),
            max_length
        );
    } else {
        println!("Narration: 1 part");
    }
    Ok(())
}
