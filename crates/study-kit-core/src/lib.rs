//! # Study Kit Core
//!
//! Pure text-processing logic for Study Kit: the quiz extractor, the
//! narration chunker, quiz scoring, and the data model they share.
//!
//! This crate performs no I/O, holds no global state, and has no async
//! runtime. Every function may be called concurrently from any thread.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`quiz`] | Extract structured questions from model output |
//! | [`chunk`] | Split long text into narration-sized chunks |
//! | [`narration`] | Hand out chunks one at a time |
//! | [`score`] | Take and grade a quiz |
//! | [`models`] | `QuizQuestion` and friends |
//! | [`error`] | `StudyError` |

pub mod chunk;
pub mod error;
pub mod models;
pub mod narration;
pub mod quiz;
pub mod score;

pub use error::StudyError;
pub use models::{ChoiceLabel, QuizOptions, QuizQuestion};
