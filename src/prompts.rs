//! Prompt templates sent to the generator.
//!
//! The quiz prompt asks for exactly the block layout that
//! [`study_kit_core::quiz`] parses. Notes, summary and practice prompts
//! are grounded on an explanation the caller already has.

use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;

/// How much detail an explanation should carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DetailLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DetailLevel::Low => "low",
            DetailLevel::Medium => "medium",
            DetailLevel::High => "high",
        };
        f.write_str(s)
    }
}

/// Difficulty of generated quiz questions and practice problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(s)
    }
}

pub fn explanation_prompt(topic: &str, detail: DetailLevel) -> String {
    format!(
        "Create a comprehensive explanation about '{topic}'.\n\
         Make it {detail} level of detail, clear, and easy to understand.\n\
         Include key concepts, important details, and real-world examples.\n\
         Structure it in a way that's suitable for audio narration."
    )
}

fn grounding(topic: &str, explanation: &str) -> String {
    format!("Based on this explanation about '{topic}':\n\n{explanation}\n\n")
}

/// Build the quiz prompt. `explanation` grounds the questions when the
/// caller already has one.
pub fn quiz_prompt(
    topic: &str,
    explanation: Option<&str>,
    num_questions: u32,
    difficulty: Difficulty,
) -> String {
    let mut prompt = match explanation {
        Some(text) => grounding(topic, text),
        None => format!("The topic is '{topic}'.\n\n"),
    };
    prompt.push_str(&format!(
        "Create {num_questions} multiple-choice quiz questions at {difficulty} difficulty \
         to test understanding of key concepts.\n\
         For each question, provide 4 options and indicate the correct answer.\n\
         Format as:\n\
         \n\
         Q1: [Question]\n\
         A. [Option A]\n\
         B. [Option B]\n\
         C. [Option C]\n\
         D. [Option D]\n\
         Correct Answer: [Letter]\n\
         \n\
         Then repeat for Q2 through Q{num_questions}."
    ));
    prompt
}

pub fn study_notes_prompt(topic: &str, explanation: &str) -> String {
    let mut prompt = grounding(topic, explanation);
    prompt.push_str(
        "Create structured study notes with the following:\n\
         1. Main concept definitions\n\
         2. Key points organized by subtopics\n\
         3. Important relationships between concepts\n\
         4. A logical hierarchy of information\n\
         \n\
         Format it clearly with headers, bullet points, and numbering where appropriate.",
    );
    prompt
}

pub fn summary_prompt(topic: &str, explanation: &str) -> String {
    let mut prompt = grounding(topic, explanation);
    prompt.push_str(
        "Create a concise bullet-point summary that captures the essential information.\n\
         Focus on the most important concepts, facts, and takeaways.\n\
         Keep each bullet point brief but informative.",
    );
    prompt
}

pub fn practice_problems_prompt(
    topic: &str,
    explanation: &str,
    difficulty: Difficulty,
    num_problems: u32,
) -> String {
    let mut prompt = grounding(topic, explanation);
    prompt.push_str(&format!(
        "Create {num_problems} {difficulty}-level practice problems or exercises \
         that would help someone master this topic.\n\
         For each problem:\n\
         1. Clearly state the problem or exercise\n\
         2. Provide step-by-step solution or approach\n\
         3. Include any relevant tips or hints\n\
         \n\
         Format with clear separation between problems, and clearly label \
         the problem statement and solution parts."
    ));
    prompt
}
