//! Property-based tests for the narration chunker
//!
//! These tests check the two guarantees callers rely on:
//! - concatenating the chunks reproduces the input exactly
//! - every chunk fits the limit unless it is one oversized line

use proptest::prelude::*;
use study_kit_core::chunk::{chunk_text, max_length_from};

/// Generate text made of short lines, blank lines, and the odd long line
fn text_strategy() -> impl Strategy<Value = String> {
    let line = prop_oneof![
        // Ordinary sentences
        "[a-zA-Z ,.]{1,40}",
        // Blank lines
        Just(String::new()),
        // Non-ASCII content
        "[éüßλ漢字 ]{1,12}",
        // Long lines that may exceed the limit on their own
        "[a-z ]{60,120}",
    ];
    (prop::collection::vec(line, 0..30), any::<bool>()).prop_map(|(lines, trailing)| {
        let mut text = lines.join("\n");
        if trailing && !text.is_empty() {
            text.push('\n');
        }
        text
    })
}

proptest! {
    #[test]
    fn concatenation_reproduces_input(text in text_strategy(), max_length in 1usize..200) {
        let chunks = chunk_text(&text, max_length).unwrap();
        prop_assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn chunks_respect_limit_unless_single_line(text in text_strategy(), max_length in 1usize..200) {
        let chunks = chunk_text(&text, max_length).unwrap();
        for chunk in &chunks {
            let len = chunk.chars().count();
            let lines = chunk.split_inclusive('\n').count();
            prop_assert!(
                len <= max_length || lines == 1,
                "chunk of {} chars over {} lines exceeds {}",
                len,
                lines,
                max_length
            );
        }
    }

    #[test]
    fn chunks_end_on_line_boundaries(text in text_strategy(), max_length in 1usize..200) {
        let chunks = chunk_text(&text, max_length).unwrap();
        if let Some((_, init)) = chunks.split_last() {
            for chunk in init {
                prop_assert!(chunk.ends_with('\n'));
            }
        }
        prop_assert!(chunks.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn short_text_is_one_chunk(text in "[a-z\n]{1,50}") {
        let chunks = chunk_text(&text, 100).unwrap();
        prop_assert_eq!(chunks, vec![text]);
    }

    #[test]
    fn non_positive_lengths_rejected(value in i64::MIN..=0) {
        prop_assert!(max_length_from(value).is_err());
    }
}
