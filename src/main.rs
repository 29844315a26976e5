//! # Study Kit CLI (`study`)
//!
//! The `study` binary extracts quizzes from generated text, runs them
//! interactively, chunks long text for narration, and talks to the
//! configured generative model.
//!
//! ## Usage
//!
//! ```bash
//! study --config ./config/study.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `study quiz parse <file>` | Extract quiz questions from a text file |
//! | `study quiz take <file>` | Take a quiz interactively on stdin |
//! | `study quiz generate <topic>` | Generate a quiz with the configured model |
//! | `study chunk <file>` | Split a text file into narration chunks |
//! | `study explain <topic>` | Generate an explanation and plan its narration |
//! | `study notes <topic>` | Generate structured study notes |
//! | `study summary <topic>` | Generate a bullet-point summary |
//! | `study practice <topic>` | Generate practice problems with solutions |
//!
//! `notes`, `summary`, `practice` and `quiz generate` accept `--from <file>`
//! to ground the output on a saved explanation (`study explain --save`).
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`
//! (e.g. `RUST_LOG=study_kit=debug` shows skipped quiz blocks).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use study_kit::material::{self, Material};
use study_kit::output::OutputFormat;
use study_kit::prompts::{DetailLevel, Difficulty};
use study_kit::quiz::GenerateOptions;
use study_kit::{chunk, config, explain, quiz};

/// Study Kit CLI: quizzes and narration chunks from generated study material.
#[derive(Parser)]
#[command(
    name = "study",
    about = "Study Kit: quizzes and narration chunks from generated study material",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/study.toml`. If the file does not exist,
    /// built-in defaults are used.
    #[arg(long, global = true, default_value = "./config/study.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Work with multiple-choice quizzes.
    Quiz {
        #[command(subcommand)]
        action: QuizAction,
    },

    /// Split a text file into narration chunks.
    ///
    /// Chunks break only between lines. A line longer than the limit is
    /// kept whole as its own chunk.
    Chunk {
        /// Text file to split.
        path: PathBuf,

        /// Maximum chunk length in characters (overrides `[chunking].max_length`).
        #[arg(long, allow_negative_numbers = true)]
        max_length: Option<i64>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Generate an explanation of a topic.
    ///
    /// Requires a generation provider in the config file.
    Explain {
        topic: String,

        #[arg(long, value_enum, default_value_t = DetailLevel::Medium)]
        detail: DetailLevel,

        /// Also write the explanation text to this file.
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Generate structured study notes for a topic.
    Notes {
        topic: String,

        /// Saved explanation to build on (generated first if omitted).
        #[arg(long)]
        from: Option<PathBuf>,
    },

    /// Generate a bullet-point summary of a topic.
    Summary {
        topic: String,

        /// Saved explanation to build on (generated first if omitted).
        #[arg(long)]
        from: Option<PathBuf>,
    },

    /// Generate practice problems with step-by-step solutions.
    Practice {
        topic: String,

        /// Saved explanation to build on (generated first if omitted).
        #[arg(long)]
        from: Option<PathBuf>,

        /// Number of problems, 1 to 10 (overrides `[practice].num_problems`).
        #[arg(long)]
        count: Option<u32>,

        /// Overrides `[practice].difficulty`.
        #[arg(long, value_enum)]
        difficulty: Option<Difficulty>,
    },
}

/// Quiz subcommands.
#[derive(Subcommand)]
enum QuizAction {
    /// Extract quiz questions from a text file.
    ///
    /// Blocks that do not follow the Q/A/B/C/D/answer layout are skipped;
    /// run with `RUST_LOG=debug` to see why.
    Parse {
        path: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Take a quiz from a text file, answering on stdin.
    Take { path: PathBuf },

    /// Generate a quiz about a topic with the configured model.
    Generate {
        topic: String,

        /// Number of questions, 3 to 10 (overrides `[quiz].num_questions`).
        #[arg(long)]
        questions: Option<u32>,

        /// Overrides `[quiz].difficulty`.
        #[arg(long, value_enum)]
        difficulty: Option<Difficulty>,

        /// Saved explanation to base the questions on.
        #[arg(long)]
        from: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Parsing and taking quizzes never needs config
    match &cli.command {
        Commands::Quiz {
            action: QuizAction::Parse { path, format },
        } => {
            quiz::run_quiz_parse(path, *format)?;
            return Ok(());
        }
        Commands::Quiz {
            action: QuizAction::Take { path },
        } => {
            quiz::run_quiz_take(path)?;
            return Ok(());
        }
        _ => {}
    }

    let cfg = config::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Quiz { action } => match action {
            QuizAction::Generate {
                topic,
                questions,
                difficulty,
                from,
                format,
            } => {
                let options = GenerateOptions {
                    from: from.as_deref(),
                    num_questions: questions,
                    difficulty,
                };
                quiz::run_quiz_generate(&cfg, &topic, options, format).await?;
            }
            QuizAction::Parse { .. } | QuizAction::Take { .. } => {
                // Handled above (before config loading)
                unreachable!()
            }
        },
        Commands::Chunk {
            path,
            max_length,
            format,
        } => {
            chunk::run_chunk(&cfg, &path, max_length, format)?;
        }
        Commands::Explain {
            topic,
            detail,
            save,
        } => {
            explain::run_explain(&cfg, &topic, detail, save.as_deref()).await?;
        }
        Commands::Notes { topic, from } => {
            material::run_material(&cfg, &topic, from.as_deref(), Material::Notes).await?;
        }
        Commands::Summary { topic, from } => {
            material::run_material(&cfg, &topic, from.as_deref(), Material::Summary).await?;
        }
        Commands::Practice {
            topic,
            from,
            count,
            difficulty,
        } => {
            let practice = Material::Practice {
                difficulty: difficulty.unwrap_or(cfg.practice.difficulty),
                num_problems: count.unwrap_or(cfg.practice.num_problems),
            };
            material::run_material(&cfg, &topic, from.as_deref(), practice).await?;
        }
    }

    Ok(())
}
