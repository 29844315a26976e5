use study_kit_core::quiz::{extract_quiz, scan_blocks, BlockOutcome};
use study_kit_core::ChoiceLabel;

const MODEL_OUTPUT: &str = "Sure! Here is a quiz about photosynthesis.

Q1: What pigment absorbs light in plants?
A. Chlorophyll
B. Keratin
C. Melanin
D. Hemoglobin
Correct Answer: A

Q2: Where does the Calvin cycle take place?
A. Thylakoid membrane
B. Stroma
C. Nucleus
D. Mitochondria
Correct Answer: B

Q3: Which gas is released as a by-product?
A. Nitrogen
B. Carbon dioxide
C. Oxygen
D. Hydrogen
Correct Answer: C

Good luck!
";

#[test]
fn test_blocks_returned_in_input_order() {
    let qs = extract_quiz(MODEL_OUTPUT);
    let numbers: Vec<u32> = qs.iter().map(|q| q.question_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(qs[1].question_text, "Where does the Calvin cycle take place?");
    assert_eq!(qs[2].options.get(ChoiceLabel::C), "Oxygen");
}

#[test]
fn test_known_block_fields() {
    let qs = extract_quiz("Q1: What is 2+2?\nA. 3\nB. 4\nC. 5\nD. 6\nCorrect Answer: B");
    assert_eq!(qs.len(), 1);
    let q = &qs[0];
    assert_eq!(q.question_number, 1);
    assert_eq!(q.question_text, "What is 2+2?");
    let options: Vec<(ChoiceLabel, &str)> = q.options.iter().collect();
    assert_eq!(
        options,
        vec![
            (ChoiceLabel::A, "3"),
            (ChoiceLabel::B, "4"),
            (ChoiceLabel::C, "5"),
            (ChoiceLabel::D, "6"),
        ]
    );
    assert_eq!(q.correct_answer, ChoiceLabel::B);
}

#[test]
fn test_missing_option_does_not_corrupt_next_block() {
    let text = "Q1: Broken?\nA. 1\nB. 2\nC. 3\nCorrect Answer: A\n\n\
                Q2: Fine?\nA. yes\nB. no\nC. maybe\nD. never\nCorrect Answer: A\n";
    let qs = extract_quiz(text);
    assert_eq!(qs.len(), 1);
    assert_eq!(qs[0].question_number, 2);
    assert_eq!(qs[0].question_text, "Fine?");
    assert_eq!(qs[0].options.d, "never");

    let outcomes = scan_blocks(text);
    assert_eq!(outcomes.len(), 2);
    assert!(matches!(outcomes[0], BlockOutcome::Skipped { question_number: 1, .. }));
}

#[test]
fn test_lowercase_labels_and_marker() {
    let text = "Q7: Pick one\na. first\nb. second\nc. third\nd. fourth\ncorrect: d\n";
    let qs = extract_quiz(text);
    assert_eq!(qs.len(), 1);
    assert_eq!(qs[0].options.a, "first");
    assert_eq!(qs[0].correct_answer, ChoiceLabel::D);
    assert_eq!(serde_json::to_value(&qs[0]).unwrap()["correct_answer"], "D");
}

#[test]
fn test_all_marker_spellings() {
    for marker in ["Correct Answer:", "Correct:", "Answer:", "ANSWER:", "correct answer:"] {
        let text = format!("Q1: x?\nA. 1\nB. 2\nC. 3\nD. 4\n{} c", marker);
        let qs = extract_quiz(&text);
        assert_eq!(qs.len(), 1, "marker {:?} not accepted", marker);
        assert_eq!(qs[0].correct_answer, ChoiceLabel::C);
    }
}

#[test]
fn test_question_numbers_pass_through() {
    let text = "Q5: x?\nA. 1\nB. 2\nC. 3\nD. 4\nAnswer: A\n\
                Q5: y?\nA. 1\nB. 2\nC. 3\nD. 4\nAnswer: B\n\
                Q2: z?\nA. 1\nB. 2\nC. 3\nD. 4\nAnswer: C\n";
    let numbers: Vec<u32> = extract_quiz(text).iter().map(|q| q.question_number).collect();
    assert_eq!(numbers, vec![5, 5, 2]);
}

#[test]
fn test_markdown_decorated_output() {
    let text = "### Q1: Capital of France?\n- ignored bullet\n**A.** Paris\n**B.** Rome\n\
                **C.** Madrid\n**D.** Berlin\n**Correct Answer:** A\n";
    let qs = extract_quiz(text);
    assert_eq!(qs.len(), 1);
    assert_eq!(qs[0].question_text, "Capital of France?\n- ignored bullet");
    assert_eq!(qs[0].options.a, "Paris");
    assert_eq!(qs[0].correct_answer, ChoiceLabel::A);
}

#[test]
fn test_dash_bulleted_output() {
    let text = "Q1: What is 2+2?\n- A. 3\n- B. 4\n- C. 5\n- D. 6\n- Correct Answer: B\n\n\
                Q2: Which gas do plants absorb?\n- note: think photosynthesis\n\
                + A. Oxygen\n+ B. Carbon dioxide\n+ C. Helium\n+ D. Neon\n+ **Answer**: (b)\n";
    let qs = extract_quiz(text);
    assert_eq!(qs.len(), 2);
    assert_eq!(qs[0].options.a, "3");
    assert_eq!(qs[0].correct_answer, ChoiceLabel::B);
    assert_eq!(
        qs[1].question_text,
        "Which gas do plants absorb?\n- note: think photosynthesis"
    );
    assert_eq!(qs[1].options.b, "Carbon dioxide");
    assert_eq!(qs[1].correct_answer, ChoiceLabel::B);
}

#[test]
fn test_prose_without_blocks() {
    assert!(extract_quiz("I could not generate a quiz for that topic.").is_empty());
}
