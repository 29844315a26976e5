//! Quiz extraction from free-form model output.
//!
//! Parses text that loosely follows this template into [`QuizQuestion`]s:
//!
//! ```text
//! Q1: What is 2+2?
//! A. 3
//! B. 4
//! C. 5
//! D. 6
//! Correct Answer: B
//! ```
//!
//! # Algorithm
//!
//! A line-oriented state machine rather than one large pattern:
//!
//! 1. Each line is classified as a question header (`Q<n>:`), an option
//!    label (`A.`–`D.`, either case), an answer marker (`Correct Answer:`,
//!    `Correct:` or `Answer:`, any case), or plain text. Leading markdown
//!    decoration (`#`, `*`, `_`, `>`) and list bullets (`-`, `+`) are
//!    ignored, and decoration may sit before a header's or marker's colon
//!    (`**Q1**:`, `**Answer**:`).
//! 2. A header opens a block. The block then expects `A.`, `B.`, `C.`, `D.`
//!    and a marker, in that order. Plain lines continue the current field.
//! 3. Any label out of order ends the block as [`BlockOutcome::Skipped`].
//!    A header always opens a fresh block, so a malformed block never
//!    swallows the next one.
//! 4. The marker is followed by a single letter `A`–`D` (same line, or the
//!    next non-blank line), optionally wrapped as `(B)` or `[B]`. That
//!    completes the block as
//!    [`BlockOutcome::Matched`].
//!
//! Text outside blocks is ignored. Work is linear in the input length.

use std::fmt;

use crate::error::{Result, StudyError};
use crate::models::{ChoiceLabel, OptionSlots, QuizQuestion};

/// Answer marker words, longest first so `Correct Answer:` wins over
/// `Correct:`. Matched case-insensitively and followed by a colon.
const ANSWER_MARKERS: [&str; 3] = ["correct answer", "correct", "answer"];

/// Characters treated as markdown decoration around labels.
const DECORATION: &[char] = &['#', '*', '_', '>'];

/// List bullets, skipped only at the start of a line.
const BULLETS: &[char] = &['-', '+'];

/// Brackets allowed around the answer letter.
const ANSWER_OPENERS: &[char] = &['(', '['];

/// The next label a block is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Option(ChoiceLabel),
    Answer,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Option(label) => write!(f, "option {}", label),
            Slot::Answer => write!(f, "answer marker"),
        }
    }
}

/// Why a block did not produce a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    EmptyQuestion,
    EmptyOption(ChoiceLabel),
    /// A label appeared while a different one was expected.
    OutOfOrder { expected: Slot, found: Slot },
    /// A new `Q<n>:` header appeared before the block was complete.
    Interrupted { expected: Slot },
    /// The text after the answer marker is not a single letter A-D.
    InvalidAnswer(String),
    /// Input ended before the block was complete.
    Truncated { expected: Slot },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyQuestion => write!(f, "question text is empty"),
            SkipReason::EmptyOption(label) => write!(f, "option {} is empty", label),
            SkipReason::OutOfOrder { expected, found } => {
                write!(f, "expected {} but found {}", expected, found)
            }
            SkipReason::Interrupted { expected } => {
                write!(f, "next question started while expecting {}", expected)
            }
            SkipReason::InvalidAnswer(text) => write!(f, "invalid answer '{}'", text),
            SkipReason::Truncated { expected } => {
                write!(f, "text ended while expecting {}", expected)
            }
        }
    }
}

/// Result of one block attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    Matched(QuizQuestion),
    Skipped {
        question_number: u32,
        reason: SkipReason,
    },
}

/// Extract every well-formed quiz block from `raw_text`, in input order.
///
/// Malformed blocks are omitted. No match is an empty vector, not an error.
pub fn extract_quiz(raw_text: &str) -> Vec<QuizQuestion> {
    scan_blocks(raw_text)
        .into_iter()
        .filter_map(|outcome| match outcome {
            BlockOutcome::Matched(q) => Some(q),
            BlockOutcome::Skipped { .. } => None,
        })
        .collect()
}

/// Like [`extract_quiz`], for raw bytes of unknown encoding.
///
/// # Errors
///
/// [`StudyError::InvalidInput`] if `raw` is not valid UTF-8 text.
pub fn extract_quiz_bytes(raw: &[u8]) -> Result<Vec<QuizQuestion>> {
    Ok(extract_quiz(decode_text(raw)?))
}

/// Borrow `raw` as text.
///
/// # Errors
///
/// [`StudyError::InvalidInput`] if `raw` is not valid UTF-8.
pub fn decode_text(raw: &[u8]) -> Result<&str> {
    std::str::from_utf8(raw)
        .map_err(|e| StudyError::InvalidInput(format!("input is not UTF-8 text: {}", e)))
}

/// Run the block state machine and report every block attempt.
///
/// One [`BlockOutcome`] is produced per `Q<n>:` header, in order.
pub fn scan_blocks(raw_text: &str) -> Vec<BlockOutcome> {
    let mut outcomes = Vec::new();
    let mut open: Option<Block> = None;

    for line in raw_text.lines() {
        let kind = classify(line);

        // A header always closes whatever is open and starts over.
        if let LineKind::Header { number, rest } = kind {
            if let Some(block) = open.take() {
                outcomes.push(block.skip(SkipReason::Interrupted {
                    expected: block.expected(),
                }));
            }
            open = Some(Block::new(number, rest));
            continue;
        }

        let Some(mut block) = open.take() else {
            continue;
        };
        match block.feed(line, kind) {
            Step::Continue => open = Some(block),
            Step::Done(outcome) => outcomes.push(outcome),
        }
    }

    if let Some(block) = open {
        outcomes.push(block.skip(SkipReason::Truncated {
            expected: block.expected(),
        }));
    }

    outcomes
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    Header { number: u32, rest: &'a str },
    Option { label: ChoiceLabel, rest: &'a str },
    Marker { rest: &'a str },
    Text,
}

fn strip_decoration(s: &str) -> &str {
    s.trim_start_matches(|c: char| c.is_whitespace() || DECORATION.contains(&c))
}

fn strip_line_start(s: &str) -> &str {
    s.trim_start_matches(|c: char| {
        c.is_whitespace() || DECORATION.contains(&c) || BULLETS.contains(&c)
    })
}

fn classify(line: &str) -> LineKind<'_> {
    let s = strip_line_start(line);

    if let Some((number, rest)) = parse_header(s) {
        return LineKind::Header { number, rest };
    }

    let mut chars = s.chars();
    if let (Some(first), Some('.')) = (chars.next(), chars.next()) {
        if let Some(label) = ChoiceLabel::from_char(first) {
            let rest = &s[2..];
            // `a.m.` or `D.C.` are words, not labels.
            if rest.is_empty()
                || rest.starts_with(|c: char| c.is_whitespace() || DECORATION.contains(&c))
            {
                return LineKind::Option {
                    label,
                    rest: strip_decoration(rest),
                };
            }
        }
    }

    match parse_marker(s) {
        Some(rest) => LineKind::Marker { rest },
        None => LineKind::Text,
    }
}

/// Parse an answer marker (decoration allowed before the colon, as in
/// `**Correct Answer**:`) and return the text after it.
fn parse_marker(s: &str) -> Option<&str> {
    ANSWER_MARKERS.iter().find_map(|marker| {
        let head = s.get(..marker.len())?;
        if !head.eq_ignore_ascii_case(marker) {
            return None;
        }
        let rest = s[marker.len()..]
            .trim_start_matches(DECORATION)
            .strip_prefix(':')?;
        Some(strip_decoration(rest))
    })
}

/// Parse `Q<digits>:` (decoration allowed before the colon, as in `**Q1**:`).
fn parse_header(s: &str) -> Option<(u32, &str)> {
    let after_q = s.strip_prefix('Q')?;
    let digits_len = after_q
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(after_q.len());
    if digits_len == 0 {
        return None;
    }
    let number: u32 = after_q[..digits_len].parse().ok()?;
    let after_digits = after_q[digits_len..].trim_start_matches(DECORATION);
    let rest = after_digits.strip_prefix(':')?;
    Some((number, strip_decoration(rest)))
}

/// Read the answer letter at the start of `s`.
fn parse_answer_letter(s: &str) -> Option<ChoiceLabel> {
    let mut chars = s
        .trim_start_matches(|c: char| {
            c.is_whitespace() || DECORATION.contains(&c) || ANSWER_OPENERS.contains(&c)
        })
        .chars();
    let label = ChoiceLabel::from_char(chars.next()?)?;
    match chars.next() {
        Some(c) if c.is_alphanumeric() => None,
        _ => Some(label),
    }
}

enum Step {
    Continue,
    Done(BlockOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Question,
    Option(ChoiceLabel),
    /// Marker seen with nothing after it; the letter is on a later line.
    AwaitingLetter,
}

/// One open block attempt.
struct Block {
    number: u32,
    question: String,
    options: OptionSlots,
    field: Field,
    buffer: String,
}

impl Block {
    fn new(number: u32, rest: &str) -> Self {
        Self {
            number,
            question: String::new(),
            options: OptionSlots::default(),
            field: Field::Question,
            buffer: rest.to_string(),
        }
    }

    fn expected(&self) -> Slot {
        match self.field {
            Field::Question => Slot::Option(ChoiceLabel::A),
            Field::Option(ChoiceLabel::A) => Slot::Option(ChoiceLabel::B),
            Field::Option(ChoiceLabel::B) => Slot::Option(ChoiceLabel::C),
            Field::Option(ChoiceLabel::C) => Slot::Option(ChoiceLabel::D),
            Field::Option(ChoiceLabel::D) | Field::AwaitingLetter => Slot::Answer,
        }
    }

    fn skip(&self, reason: SkipReason) -> BlockOutcome {
        BlockOutcome::Skipped {
            question_number: self.number,
            reason,
        }
    }

    /// Move the buffered text into the field it belongs to.
    fn commit(&mut self) -> std::result::Result<(), SkipReason> {
        let text = self.buffer.trim().to_string();
        self.buffer.clear();
        match self.field {
            Field::Question if text.is_empty() => Err(SkipReason::EmptyQuestion),
            Field::Question => {
                self.question = text;
                Ok(())
            }
            Field::Option(label) if text.is_empty() => Err(SkipReason::EmptyOption(label)),
            Field::Option(label) => {
                self.options.set(label, text);
                Ok(())
            }
            Field::AwaitingLetter => Ok(()),
        }
    }

    fn feed(&mut self, line: &str, kind: LineKind<'_>) -> Step {
        if self.field == Field::AwaitingLetter {
            if line.trim().is_empty() {
                return Step::Continue;
            }
            return Step::Done(self.finish(strip_line_start(line)));
        }

        let found = match kind {
            LineKind::Option { label, .. } => Slot::Option(label),
            LineKind::Marker { .. } => Slot::Answer,
            LineKind::Text | LineKind::Header { .. } => {
                self.buffer.push('\n');
                self.buffer.push_str(line);
                return Step::Continue;
            }
        };

        let expected = self.expected();
        if found != expected {
            return Step::Done(self.skip(SkipReason::OutOfOrder { expected, found }));
        }
        if let Err(reason) = self.commit() {
            return Step::Done(self.skip(reason));
        }

        match kind {
            LineKind::Option { label, rest } => {
                self.field = Field::Option(label);
                self.buffer.push_str(rest);
                Step::Continue
            }
            LineKind::Marker { rest } if rest.trim().is_empty() => {
                self.field = Field::AwaitingLetter;
                Step::Continue
            }
            LineKind::Marker { rest } => Step::Done(self.finish(rest)),
            LineKind::Text | LineKind::Header { .. } => Step::Continue,
        }
    }

    fn finish(&mut self, answer_text: &str) -> BlockOutcome {
        let Some(correct_answer) = parse_answer_letter(answer_text) else {
            return self.skip(SkipReason::InvalidAnswer(answer_text.trim().to_string()));
        };
        let options = std::mem::take(&mut self.options).into_options();
        match options {
            Some(options) => BlockOutcome::Matched(QuizQuestion {
                question_number: self.number,
                question_text: std::mem::take(&mut self.question),
                options,
                correct_answer,
            }),
            // Unreachable in practice: the marker is only accepted after D.
            None => self.skip(SkipReason::Truncated {
                expected: Slot::Option(ChoiceLabel::D),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = "Q1: What is 2+2?\nA. 3\nB. 4\nC. 5\nD. 6\nCorrect Answer: B\n";

    #[test]
    fn test_single_block_fields() {
        let qs = extract_quiz(SIMPLE);
        assert_eq!(qs.len(), 1);
        let q = &qs[0];
        assert_eq!(q.question_number, 1);
        assert_eq!(q.question_text, "What is 2+2?");
        assert_eq!(q.options.get(ChoiceLabel::A), "3");
        assert_eq!(q.options.get(ChoiceLabel::B), "4");
        assert_eq!(q.options.get(ChoiceLabel::C), "5");
        assert_eq!(q.options.get(ChoiceLabel::D), "6");
        assert_eq!(q.correct_answer, ChoiceLabel::B);
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_quiz("").is_empty());
        assert!(scan_blocks("no questions here\njust prose").is_empty());
    }

    #[test]
    fn test_classify_labels() {
        assert_eq!(
            classify("Q12: Why?"),
            LineKind::Header {
                number: 12,
                rest: "Why?"
            }
        );
        assert_eq!(
            classify("**Q3**: Bold header"),
            LineKind::Header {
                number: 3,
                rest: "Bold header"
            }
        );
        assert_eq!(
            classify("  b. lower"),
            LineKind::Option {
                label: ChoiceLabel::B,
                rest: "lower"
            }
        );
        assert_eq!(classify("a.m. is morning"), LineKind::Text);
        assert_eq!(classify("Question: not a header"), LineKind::Text);
        assert_eq!(classify("CORRECT ANSWER: c"), LineKind::Marker { rest: "c" });
        assert_eq!(classify("Answer:"), LineKind::Marker { rest: "" });
        assert_eq!(classify("Q: no number"), LineKind::Text);
        assert_eq!(classify("Answers: plural"), LineKind::Text);
    }

    #[test]
    fn test_classify_bullets_and_bold_markers() {
        assert_eq!(
            classify("- A. 3"),
            LineKind::Option {
                label: ChoiceLabel::A,
                rest: "3"
            }
        );
        assert_eq!(
            classify("+ d. last"),
            LineKind::Option {
                label: ChoiceLabel::D,
                rest: "last"
            }
        );
        assert_eq!(classify("- Correct Answer: B"), LineKind::Marker { rest: "B" });
        assert_eq!(classify("**Correct Answer**: B"), LineKind::Marker { rest: "B" });
        assert_eq!(classify("**Answer:** c"), LineKind::Marker { rest: "c" });
        assert_eq!(classify("- prose about cells"), LineKind::Text);
        assert_eq!(classify("-5 is negative"), LineKind::Text);
    }

    #[test]
    fn test_bulleted_block() {
        let text = "Q1: What is 2+2?\n- a supporting note\n\
                    - A. 3\n- B. 4\n- C. 5\n- D. -6\n- Correct Answer: B\n";
        let qs = extract_quiz(text);
        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].question_text, "What is 2+2?\n- a supporting note");
        assert_eq!(qs[0].options.a, "3");
        assert_eq!(qs[0].options.d, "-6");
        assert_eq!(qs[0].correct_answer, ChoiceLabel::B);
    }

    #[test]
    fn test_bold_marker_and_bracketed_letter() {
        let text = "Q1: x?\nA. 1\nB. 2\nC. 3\nD. 4\n**Correct Answer**: (B)\n\n\
                    Q2: y?\nA. 1\nB. 2\nC. 3\nD. 4\nAnswer:\n- [d]\n";
        let qs = extract_quiz(text);
        assert_eq!(qs.len(), 2);
        assert_eq!(qs[0].correct_answer, ChoiceLabel::B);
        assert_eq!(qs[1].correct_answer, ChoiceLabel::D);
    }

    #[test]
    fn test_header_number_overflow_is_text() {
        assert_eq!(classify("Q99999999999: huge"), LineKind::Text);
    }

    #[test]
    fn test_answer_letter_rules() {
        assert_eq!(parse_answer_letter("b"), Some(ChoiceLabel::B));
        assert_eq!(parse_answer_letter("**D**"), Some(ChoiceLabel::D));
        assert_eq!(parse_answer_letter("C. 5"), Some(ChoiceLabel::C));
        assert_eq!(parse_answer_letter("C) 5"), Some(ChoiceLabel::C));
        assert_eq!(parse_answer_letter("(B)"), Some(ChoiceLabel::B));
        assert_eq!(parse_answer_letter("[**a**]"), Some(ChoiceLabel::A));
        assert_eq!(parse_answer_letter("(Both)"), None);
        assert_eq!(parse_answer_letter("Both"), None);
        assert_eq!(parse_answer_letter("E"), None);
        assert_eq!(parse_answer_letter(""), None);
    }

    #[test]
    fn test_multiline_fields_are_joined() {
        let text = "Q2: Which statement\nis true?\nA. first\nline two\nB. b\nC. c\nD. d\nAnswer: a";
        let qs = extract_quiz(text);
        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].question_text, "Which statement\nis true?");
        assert_eq!(qs[0].options.a, "first\nline two");
        assert_eq!(qs[0].correct_answer, ChoiceLabel::A);
    }

    #[test]
    fn test_answer_on_following_line() {
        let text = "Q1: x?\nA. 1\nB. 2\nC. 3\nD. 4\nCorrect Answer:\n\n  D\n";
        let qs = extract_quiz(text);
        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].correct_answer, ChoiceLabel::D);
    }

    #[test]
    fn test_missing_option_reports_reason() {
        let text = "Q1: x?\nA. 1\nB. 2\nC. 3\nCorrect: A\n";
        let outcomes = scan_blocks(text);
        assert_eq!(
            outcomes,
            vec![BlockOutcome::Skipped {
                question_number: 1,
                reason: SkipReason::OutOfOrder {
                    expected: Slot::Option(ChoiceLabel::D),
                    found: Slot::Answer,
                },
            }]
        );
    }

    #[test]
    fn test_interrupted_block_resynchronizes() {
        let text = "Q1: broken\nA. 1\nB. 2\nQ2: ok?\nA. 1\nB. 2\nC. 3\nD. 4\nAnswer: C\n";
        let outcomes = scan_blocks(text);
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(
            outcomes[0],
            BlockOutcome::Skipped {
                question_number: 1,
                reason: SkipReason::Interrupted { .. }
            }
        ));
        match &outcomes[1] {
            BlockOutcome::Matched(q) => {
                assert_eq!(q.question_number, 2);
                assert_eq!(q.correct_answer, ChoiceLabel::C);
            }
            other => panic!("expected match, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_and_invalid_answer() {
        let truncated = scan_blocks("Q4: x?\nA. 1\nB. 2");
        assert!(matches!(
            truncated[0],
            BlockOutcome::Skipped {
                reason: SkipReason::Truncated {
                    expected: Slot::Option(ChoiceLabel::C)
                },
                ..
            }
        ));

        let invalid = scan_blocks("Q5: x?\nA. 1\nB. 2\nC. 3\nD. 4\nAnswer: None of these");
        assert_eq!(
            invalid,
            vec![BlockOutcome::Skipped {
                question_number: 5,
                reason: SkipReason::InvalidAnswer("None of these".to_string()),
            }]
        );
    }

    #[test]
    fn test_empty_fields_skip_block() {
        let outcomes = scan_blocks("Q1:\nA. 1\nB. 2\nC. 3\nD. 4\nAnswer: A");
        assert!(matches!(
            outcomes[0],
            BlockOutcome::Skipped {
                reason: SkipReason::EmptyQuestion,
                ..
            }
        ));

        let outcomes = scan_blocks("Q1: x?\nA. 1\nB.\nC. 3\nD. 4\nAnswer: A");
        assert!(matches!(
            outcomes[0],
            BlockOutcome::Skipped {
                reason: SkipReason::EmptyOption(ChoiceLabel::B),
                ..
            }
        ));
    }

    #[test]
    fn test_non_utf8_bytes_rejected() {
        let err = extract_quiz_bytes(&[0x51, 0x31, 0x3a, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, StudyError::InvalidInput(_)));
        assert_eq!(extract_quiz_bytes(SIMPLE.as_bytes()).unwrap().len(), 1);
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = SIMPLE.replace('\n', "\r\n");
        let qs = extract_quiz(&text);
        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].options.d, "6");
    }
}
