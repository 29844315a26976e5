//! Quiz commands: parse, generate, and take.
//!
//! These runners sit between the CLI and [`study_kit_core::quiz`]:
//! they read files, call the generator, log skipped blocks, and print.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::Path;

use study_kit_core::quiz::{decode_text, scan_blocks, BlockOutcome};
use study_kit_core::score::{QuizAttempt, QuizResult, ScoreBand};
use study_kit_core::{ChoiceLabel, QuizQuestion};

use crate::config::{check_num_questions, Config};
use crate::explain::read_explanation;
use crate::generate::{create_generator, Generator};
use crate::output::OutputFormat;
use crate::prompts::{quiz_prompt, Difficulty};

/// Extract questions from `text`, logging every block that was skipped.
pub fn extract_logged(text: &str) -> Vec<QuizQuestion> {
    let mut questions = Vec::new();
    for outcome in scan_blocks(text) {
        match outcome {
            BlockOutcome::Matched(q) => questions.push(q),
            BlockOutcome::Skipped {
                question_number,
                reason,
            } => {
                tracing::debug!(question_number, %reason, "skipped malformed quiz block");
            }
        }
    }
    tracing::info!(count = questions.len(), "extracted quiz questions");
    questions
}

/// Read a quiz text file.
pub fn read_quiz_file(path: &Path) -> Result<Vec<QuizQuestion>> {
    let raw = std::fs::read(path)
        .with_context(|| format!("Failed to read quiz file: {}", path.display()))?;
    let text =
        decode_text(&raw).with_context(|| format!("Invalid quiz file: {}", path.display()))?;
    Ok(extract_logged(text))
}

/// Ask `generator` for a quiz on `topic` and extract its questions.
///
/// An answer with no parseable block yields an empty vector.
pub async fn generate_quiz(
    generator: &dyn Generator,
    topic: &str,
    explanation: Option<&str>,
    num_questions: u32,
    difficulty: Difficulty,
) -> Result<Vec<QuizQuestion>> {
    let num_questions = check_num_questions(num_questions)?;
    let prompt = quiz_prompt(topic, explanation, num_questions, difficulty);
    tracing::debug!(
        model = generator.model_name(),
        topic,
        num_questions,
        %difficulty,
        grounded = explanation.is_some(),
        "generating quiz"
    );

    let text = generator
        .generate(&prompt)
        .await
        .with_context(|| format!("Failed to generate quiz about '{}'", topic))?;

    let questions = extract_logged(&text);
    if questions.len() < num_questions as usize {
        tracing::warn!(
            requested = num_questions,
            parsed = questions.len(),
            "model returned fewer well-formed questions than requested"
        );
    }
    Ok(questions)
}

pub fn format_question(q: &QuizQuestion) -> String {
    let mut out = format!("Q{}: {}\n", q.question_number, q.question_text);
    for (label, text) in q.options.iter() {
        out.push_str(&format!("  {}. {}\n", label, text));
    }
    out
}

fn print_questions(questions: &[QuizQuestion], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(questions)?);
        }
        OutputFormat::Text => {
            if questions.is_empty() {
                println!("No quiz questions found.");
                return Ok(());
            }
            for q in questions {
                print!("{}", format_question(q));
                println!("  Answer: {}\n", q.correct_answer);
            }
            println!("{} question(s)", questions.len());
        }
    }
    Ok(())
}

pub fn run_quiz_parse(path: &Path, format: OutputFormat) -> Result<()> {
    let questions = read_quiz_file(path)?;
    print_questions(&questions, format)
}

/// Options for `study quiz generate` beyond the topic.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions<'a> {
    /// Saved explanation to ground the questions on.
    pub from: Option<&'a Path>,
    pub num_questions: Option<u32>,
    pub difficulty: Option<Difficulty>,
}

pub async fn run_quiz_generate(
    config: &Config,
    topic: &str,
    options: GenerateOptions<'_>,
    format: OutputFormat,
) -> Result<()> {
    let explanation = options.from.map(read_explanation).transpose()?;
    let generator = create_generator(&config.generation)?;
    let n = options.num_questions.unwrap_or(config.quiz.num_questions);
    let difficulty = options.difficulty.unwrap_or(config.quiz.difficulty);
    let questions =
        generate_quiz(generator.as_ref(), topic, explanation.as_deref(), n, difficulty).await?;
    print_questions(&questions, format)
}

/// Run an interactive quiz, reading one answer per line from `input`.
///
/// Invalid letters are re-prompted. End of input stops the quiz early;
/// remaining questions count as unanswered. After a completed run the
/// taker may retry the same questions. Returns the last result.
pub fn take_quiz<R: BufRead, W: Write>(
    questions: Vec<QuizQuestion>,
    mut input: R,
    mut out: W,
) -> Result<QuizResult> {
    let mut attempt = QuizAttempt::new(questions)?;

    loop {
        let completed = ask_questions(&mut attempt, &mut input, &mut out)?;
        let result = attempt.finish();
        write_result(&result, &mut out)?;

        if !completed || !ask_retry(&mut input, &mut out)? {
            return Ok(result);
        }
        attempt.retry();
        writeln!(out, "\nRetrying with the same questions.\n")?;
    }
}

/// Ask every question once. Returns `false` if input ran out first.
fn ask_questions<R: BufRead, W: Write>(
    attempt: &mut QuizAttempt,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    let total = attempt.len();

    loop {
        let q = attempt.current();
        writeln!(out, "Question {} of {}", attempt.current_index() + 1, total)?;
        write!(out, "{}", format_question(q))?;

        let label = loop {
            write!(out, "Your answer (A-D): ")?;
            out.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                return Ok(false);
            }
            match line.parse::<ChoiceLabel>() {
                Ok(label) => break label,
                Err(e) => writeln!(out, "{}", e)?,
            }
        };

        if attempt.answer(label)? {
            writeln!(out, "Correct!\n")?;
        } else {
            writeln!(
                out,
                "Incorrect. The correct answer is {}.\n",
                attempt.current().correct_answer
            )?;
        }

        if !attempt.next_question() {
            return Ok(true);
        }
    }
}

fn ask_retry<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<bool> {
    write!(out, "\nRetry the quiz? (y/N): ")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(false);
    }
    Ok(matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn write_result<W: Write>(result: &QuizResult, out: &mut W) -> Result<()> {
    let band = match result.band {
        ScoreBand::Strong => "strong",
        ScoreBand::Fair => "fair",
        ScoreBand::Weak => "needs review",
    };
    writeln!(out, "Score: {:.1}% ({})", result.score, band)?;
    writeln!(
        out,
        "You answered {} out of {} questions correctly",
        result.correct, result.total
    )?;
    writeln!(
        out,
        "Time taken: {:.1} seconds",
        result.time_taken.as_secs_f64()
    )?;
    writeln!(out)?;
    writeln!(out, "Review:")?;
    for (i, item) in result.review.iter().enumerate() {
        let given = item
            .given
            .map(|l| l.to_string())
            .unwrap_or_else(|| "not answered".to_string());
        let mark = if item.is_correct() { "✓" } else { "✗" };
        writeln!(
            out,
            "  {} {}. {} (yours: {}, correct: {})",
            mark,
            i + 1,
            item.question.question_text,
            given,
            item.question.correct_answer
        )?;
    }
    Ok(())
}

pub fn run_quiz_take(path: &Path) -> Result<()> {
    let questions = read_quiz_file(path)?;
    if questions.is_empty() {
        println!("No quiz questions found.");
        return Ok(());
    }
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    take_quiz(questions, stdin.lock(), stdout.lock())?;
    Ok(())
}
