//! # Study Kit
//!
//! Turn generated study material into something you can quiz on and listen
//! to. The `study` CLI asks a generative model for explanations and quizzes,
//! extracts structured multiple-choice questions from the model's free-form
//! answer, runs interactive quizzes, and splits long text into
//! narration-sized chunks.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────────┐   ┌──────────────┐
//! │  Generator  │──▶│  study-kit-core  │──▶│     CLI      │
//! │  (Gemini)   │   │ extract / chunk  │   │   (study)    │
//! └─────────────┘   │ score / narrate  │   └──────────────┘
//!                   └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! study quiz parse quiz.txt --format json
//! study quiz take quiz.txt
//! study chunk explanation.txt --max-length 2000
//! GEMINI_API_KEY=... study quiz generate "photosynthesis" --questions 5
//! GEMINI_API_KEY=... study explain "photosynthesis" --save photo.txt
//! GEMINI_API_KEY=... study practice "photosynthesis" --from photo.txt --difficulty hard
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`generate`] | Generative model client |
//! | [`prompts`] | Prompt templates |
//! | [`quiz`] | Quiz parse / generate / take commands |
//! | [`chunk`] | Chunk command |
//! | [`explain`] | Explanation command |
//! | [`material`] | Notes, summary and practice problem commands |
//! | [`output`] | Output formats |

pub mod chunk;
pub mod config;
pub mod explain;
pub mod generate;
pub mod material;
pub mod output;
pub mod prompts;
pub mod quiz;
