//! Study material commands: `study notes`, `study summary`, `study practice`.
//!
//! Each one turns an explanation of a topic into a different study aid.
//! The explanation comes from `--from <file>` (for example one saved with
//! `study explain --save`) or is generated first.

use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;

use crate::config::{check_num_problems, Config};
use crate::explain::explanation_source;
use crate::generate::{create_generator, Generator};
use crate::prompts::{practice_problems_prompt, study_notes_prompt, summary_prompt, Difficulty};

/// The kind of study aid to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    Notes,
    Summary,
    Practice {
        difficulty: Difficulty,
        num_problems: u32,
    },
}

impl Material {
    pub fn prompt(&self, topic: &str, explanation: &str) -> String {
        match *self {
            Material::Notes => study_notes_prompt(topic, explanation),
            Material::Summary => summary_prompt(topic, explanation),
            Material::Practice {
                difficulty,
                num_problems,
            } => practice_problems_prompt(topic, explanation, difficulty, num_problems),
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Material::Notes => f.write_str("study notes"),
            Material::Summary => f.write_str("summary"),
            Material::Practice { .. } => f.write_str("practice problems"),
        }
    }
}

/// Ask `generator` for `material` about `topic`, grounded on `explanation`.
pub async fn generate_material(
    generator: &dyn Generator,
    topic: &str,
    explanation: &str,
    material: Material,
) -> Result<String> {
    if let Material::Practice { num_problems, .. } = material {
        check_num_problems(num_problems)?;
    }
    tracing::debug!(model = generator.model_name(), topic, %material, "generating study material");

    let text = generator
        .generate(&material.prompt(topic, explanation))
        .await
        .with_context(|| format!("Failed to generate {} for '{}'", material, topic))?;
    if text.trim().is_empty() {
        anyhow::bail!("Model returned empty {} for '{}'", material, topic);
    }
    Ok(text)
}

pub async fn run_material(
    config: &Config,
    topic: &str,
    from: Option<&Path>,
    material: Material,
) -> Result<()> {
    let generator = create_generator(&config.generation)?;
    let explanation = explanation_source(generator.as_ref(), topic, from).await?;
    let text = generate_material(generator.as_ref(), topic, &explanation, material).await?;
    println!("{}", text.trim_end());
    Ok(())
}
