//! Taking and scoring a quiz.
//!
//! A [`QuizAttempt`] walks a list of [`QuizQuestion`]s with a cursor,
//! records one answer per question, and produces a [`QuizResult`].
//! [`QuizAttempt::retry`] starts over on the same questions.

use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::error::{Result, StudyError};
use crate::models::{ChoiceLabel, QuizQuestion};

/// Coarse grading of a percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    /// 70% or better.
    Strong,
    /// 50% up to 70%.
    Fair,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            ScoreBand::Strong
        } else if score >= 50.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Weak
        }
    }
}

/// One row of the post-quiz review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewItem {
    pub question: QuizQuestion,
    pub given: Option<ChoiceLabel>,
}

impl ReviewItem {
    pub fn is_correct(&self) -> bool {
        self.given == Some(self.question.correct_answer)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizResult {
    pub correct: usize,
    pub total: usize,
    /// Percentage in `0.0..=100.0`.
    pub score: f64,
    pub band: ScoreBand,
    /// Wall-clock time from the start (or last retry) to scoring.
    pub time_taken: Duration,
    pub review: Vec<ReviewItem>,
}

/// An in-progress quiz.
#[derive(Debug, Clone)]
pub struct QuizAttempt {
    questions: Vec<QuizQuestion>,
    current: usize,
    answers: BTreeMap<usize, ChoiceLabel>,
    started: Instant,
}

impl QuizAttempt {
    /// Start an attempt over `questions`.
    ///
    /// # Errors
    ///
    /// [`StudyError::InvalidInput`] if there are no questions.
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self> {
        if questions.is_empty() {
            return Err(StudyError::InvalidInput(
                "a quiz needs at least one question".to_string(),
            ));
        }
        Ok(Self {
            questions,
            current: 0,
            answers: BTreeMap::new(),
            started: Instant::now(),
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &QuizQuestion {
        &self.questions[self.current]
    }

    /// The answer already given for the current question, if any.
    pub fn current_answer(&self) -> Option<ChoiceLabel> {
        self.answers.get(&self.current).copied()
    }

    /// Advance the cursor. Returns `false` at the last question.
    pub fn next_question(&mut self) -> bool {
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Move the cursor back. Returns `false` at the first question.
    pub fn previous_question(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Record `label` for the current question and report whether it was
    /// correct.
    ///
    /// # Errors
    ///
    /// [`StudyError::InvalidArgument`] if the question was already answered.
    pub fn answer(&mut self, label: ChoiceLabel) -> Result<bool> {
        if self.answers.contains_key(&self.current) {
            return Err(StudyError::InvalidArgument(format!(
                "question {} has already been answered",
                self.current + 1
            )));
        }
        self.answers.insert(self.current, label);
        Ok(self.current().is_correct(label))
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() == self.questions.len()
    }

    /// Time since the attempt started or was last retried.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Clear every answer and go back to the first question, keeping the
    /// questions. Restarts the timer.
    pub fn retry(&mut self) {
        self.answers.clear();
        self.current = 0;
        self.started = Instant::now();
    }

    /// Score the attempt. Unanswered questions count as incorrect.
    ///
    /// The attempt is left intact so it can be [retried](Self::retry).
    pub fn finish(&self) -> QuizResult {
        let total = self.questions.len();
        let review: Vec<ReviewItem> = self
            .questions
            .iter()
            .enumerate()
            .map(|(i, question)| ReviewItem {
                given: self.answers.get(&i).copied(),
                question: question.clone(),
            })
            .collect();
        let correct = review.iter().filter(|r| r.is_correct()).count();
        let score = correct as f64 / total as f64 * 100.0;

        QuizResult {
            correct,
            total,
            score,
            band: ScoreBand::from_score(score),
            time_taken: self.elapsed(),
            review,
        }
    }
}
