//! Core data types produced by the quiz extractor.
//!
//! A [`QuizQuestion`] is always complete: the extractor never builds one
//! until it has seen a question, all four options, and an answer letter.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, StudyError};

/// One of the four multiple-choice labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChoiceLabel {
    A,
    B,
    C,
    D,
}

impl ChoiceLabel {
    /// All labels in presentation order.
    pub const ALL: [ChoiceLabel; 4] = [
        ChoiceLabel::A,
        ChoiceLabel::B,
        ChoiceLabel::C,
        ChoiceLabel::D,
    ];

    /// Parse a label letter, ignoring case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(ChoiceLabel::A),
            'B' => Some(ChoiceLabel::B),
            'C' => Some(ChoiceLabel::C),
            'D' => Some(ChoiceLabel::D),
            _ => None,
        }
    }

    /// The uppercase letter for this label.
    pub fn as_char(self) -> char {
        match self {
            ChoiceLabel::A => 'A',
            ChoiceLabel::B => 'B',
            ChoiceLabel::C => 'C',
            ChoiceLabel::D => 'D',
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ChoiceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl std::str::FromStr for ChoiceLabel {
    type Err = StudyError;

    /// Accepts a single letter `a`–`d` in either case, surrounding
    /// whitespace ignored.
    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => ChoiceLabel::from_char(c).ok_or_else(|| {
                StudyError::InvalidArgument(format!("'{}' is not one of A, B, C, D", s.trim()))
            }),
            _ => Err(StudyError::InvalidArgument(format!(
                "expected a single letter A-D, got '{}'",
                s.trim()
            ))),
        }
    }
}

/// The four option texts of a question, one per [`ChoiceLabel`].
///
/// Serializes as `{"A": "...", "B": "...", "C": "...", "D": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOptions {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
}

impl QuizOptions {
    pub fn new(options: [String; 4]) -> Self {
        let [a, b, c, d] = options;
        Self { a, b, c, d }
    }

    pub fn get(&self, label: ChoiceLabel) -> &str {
        match label {
            ChoiceLabel::A => &self.a,
            ChoiceLabel::B => &self.b,
            ChoiceLabel::C => &self.c,
            ChoiceLabel::D => &self.d,
        }
    }

    /// Iterate `(label, text)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (ChoiceLabel, &str)> {
        ChoiceLabel::ALL.into_iter().map(move |l| (l, self.get(l)))
    }
}

/// A structured multiple-choice question extracted from free-form text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// The number written after `Q` in the source, passed through as-is.
    pub question_number: u32,
    pub question_text: String,
    pub options: QuizOptions,
    pub correct_answer: ChoiceLabel,
}

impl QuizQuestion {
    pub fn is_correct(&self, answer: ChoiceLabel) -> bool {
        self.correct_answer == answer
    }
}

/// Internal helper used by the extractor to collect options by position.
#[derive(Debug, Default)]
pub(crate) struct OptionSlots([Option<String>; 4]);

impl OptionSlots {
    pub(crate) fn set(&mut self, label: ChoiceLabel, text: String) {
        self.0[label.index()] = Some(text);
    }

    pub(crate) fn into_options(self) -> Option<QuizOptions> {
        let [a, b, c, d] = self.0;
        Some(QuizOptions::new([a?, b?, c?, d?]))
    }
}
