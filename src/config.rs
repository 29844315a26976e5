//! TOML configuration for the `study` CLI.
//!
//! ```toml
//! [chunking]
//! max_length = 4000
//!
//! [quiz]
//! num_questions = 5
//! difficulty = "medium"
//!
//! [practice]
//! num_problems = 3
//! difficulty = "medium"
//!
//! [generation]
//! provider = "gemini"
//! model = "gemini-2.0-flash"
//! timeout_secs = 60
//! max_retries = 3
//! ```
//!
//! Every section is optional; missing values take the defaults shown above
//! (with `provider = "disabled"`).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use study_kit_core::chunk::{max_length_from, DEFAULT_MAX_LENGTH};

use crate::prompts::Difficulty;

/// Smallest and largest quiz size the prompt will ask for.
pub const MIN_QUESTIONS: u32 = 3;
pub const MAX_QUESTIONS: u32 = 10;

/// Smallest and largest practice problem set.
pub const MIN_PROBLEMS: u32 = 1;
pub const MAX_PROBLEMS: u32 = 10;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub quiz: QuizConfig,
    #[serde(default)]
    pub practice: PracticeConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingConfig {
    /// Signed so that a negative value in the file is reported, not
    /// rejected by the TOML parser with a less helpful message.
    #[serde(default = "default_max_length")]
    pub max_length: i64,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
        }
    }
}

impl ChunkingConfig {
    /// The validated chunk limit.
    pub fn max_length(&self) -> Result<usize> {
        max_length_from(self.max_length).context("Invalid chunking.max_length")
    }
}

fn default_max_length() -> i64 {
    DEFAULT_MAX_LENGTH as i64
}

#[derive(Debug, Deserialize, Clone)]
pub struct QuizConfig {
    #[serde(default = "default_num_questions")]
    pub num_questions: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            num_questions: default_num_questions(),
            difficulty: Difficulty::default(),
        }
    }
}

fn default_num_questions() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct PracticeConfig {
    #[serde(default = "default_num_problems")]
    pub num_problems: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            num_problems: default_num_problems(),
            difficulty: Difficulty::default(),
        }
    }
}

fn default_num_problems() -> u32 {
    3
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl GenerationConfig {
    pub fn is_enabled(&self) -> bool {
        self.provider != "disabled"
    }
}

fn default_provider() -> String {
    "disabled".to_string()
}
fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_max_retries() -> u32 {
    3
}

impl Config {
    /// Defaults used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }
}

/// Validate a quiz size against [`MIN_QUESTIONS`]..=[`MAX_QUESTIONS`].
pub fn check_num_questions(n: u32) -> Result<u32> {
    if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&n) {
        anyhow::bail!(
            "number of questions must be between {} and {}, got {}",
            MIN_QUESTIONS,
            MAX_QUESTIONS,
            n
        );
    }
    Ok(n)
}

/// Validate a practice set size against [`MIN_PROBLEMS`]..=[`MAX_PROBLEMS`].
pub fn check_num_problems(n: u32) -> Result<u32> {
    if !(MIN_PROBLEMS..=MAX_PROBLEMS).contains(&n) {
        anyhow::bail!(
            "number of problems must be between {} and {}, got {}",
            MIN_PROBLEMS,
            MAX_PROBLEMS,
            n
        );
    }
    Ok(n)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    // Validate chunking
    config.chunking.max_length()?;

    // Validate quiz
    check_num_questions(config.quiz.num_questions).context("Invalid quiz.num_questions")?;

    // Validate practice
    check_num_problems(config.practice.num_problems).context("Invalid practice.num_problems")?;

    // Validate generation
    if config.generation.timeout_secs == 0 {
        anyhow::bail!("generation.timeout_secs must be > 0");
    }
    if config.generation.model.trim().is_empty() {
        anyhow::bail!("generation.model must not be empty");
    }

    match config.generation.provider.as_str() {
        "disabled" | "gemini" => {}
        other => anyhow::bail!(
            "Unknown generation provider: '{}'. Must be disabled or gemini.",
            other
        ),
    }

    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

/// Load `path` if it exists, otherwise fall back to [`Config::minimal`].
///
/// A file that exists but fails to parse or validate is still an error.
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        Ok(Config::minimal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.chunking.max_length().unwrap(), 4000);
        assert_eq!(config.quiz.num_questions, 5);
        assert_eq!(config.quiz.difficulty, Difficulty::Medium);
        assert_eq!(config.practice.num_problems, 3);
        assert!(!config.generation.is_enabled());
        assert_eq!(config.generation.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_full_file() {
        let config = parse_config(
            r#"
[chunking]
max_length = 1200

[quiz]
num_questions = 8
difficulty = "hard"

[practice]
num_problems = 4
difficulty = "easy"

[generation]
provider = "gemini"
model = "gemini-1.5-pro"
timeout_secs = 10
max_retries = 1
"#,
        )
        .unwrap();
        assert_eq!(config.chunking.max_length().unwrap(), 1200);
        assert_eq!(config.quiz.num_questions, 8);
        assert_eq!(config.quiz.difficulty, Difficulty::Hard);
        assert_eq!(config.practice.num_problems, 4);
        assert_eq!(config.practice.difficulty, Difficulty::Easy);
        assert!(config.generation.is_enabled());
        assert_eq!(config.generation.max_retries, 1);
    }

    #[test]
    fn test_zero_max_length_rejected() {
        let err = parse_config("[chunking]\nmax_length = 0\n").unwrap_err();
        assert!(format!("{:#}", err).contains("max_length"));
    }

    #[test]
    fn test_negative_max_length_rejected() {
        assert!(parse_config("[chunking]\nmax_length = -5\n").is_err());
    }

    #[test]
    fn test_question_count_bounds() {
        assert!(parse_config("[quiz]\nnum_questions = 2\n").is_err());
        assert!(parse_config("[quiz]\nnum_questions = 11\n").is_err());
        assert!(parse_config("[quiz]\nnum_questions = 10\n").is_ok());
    }

    #[test]
    fn test_practice_bounds_and_difficulty() {
        assert!(parse_config("[practice]\nnum_problems = 0\n").is_err());
        assert!(parse_config("[practice]\nnum_problems = 11\n").is_err());
        assert!(parse_config("[practice]\ndifficulty = \"extreme\"\n").is_err());
        assert!(parse_config("[practice]\nnum_problems = 1\n").is_ok());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let err = parse_config("[generation]\nprovider = \"openai\"\n").unwrap_err();
        assert!(err.to_string().contains("Unknown generation provider"));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = load_or_default(Path::new("/nonexistent/study.toml")).unwrap();
        assert_eq!(config.quiz.num_questions, 5);
    }
}
