use super::common::quals;
use crate::screening::matching::{evaluate, Qualification, QualificationMatcher};

#[test]
fn reports_only_the_unmatched_qualification() {
    let outcome = evaluate(
        "I have a Bachelor's Degree and know Python",
        &quals(&["Bachelor's Degree", "Python Programming"]),
    );

    assert!(!outcome.passed());
    assert_eq!(outcome.missing, quals(&["Python Programming"]));
}

#[test]
fn empty_document_misses_everything() {
    let outcome = evaluate("", &quals(&["anything"]));

    assert!(!outcome.passed());
    assert_eq!(outcome.missing, quals(&["anything"]));
}

#[test]
fn blank_qualification_is_always_found() {
    let outcome = evaluate("Rust developer", &quals(&["", "Rust", "Haskell"]));

    assert_eq!(outcome.missing, quals(&["Haskell"]));
    assert!(evaluate("", &quals(&[""])).passed());
}

#[test]
fn passed_iff_nothing_missing() {
    let qualification_sets = [
        quals(&["rust"]),
        quals(&["rust", "sql"]),
        quals(&["kubernetes", "sql", "rust"]),
    ];
    for text in ["", "Rust and SQL", "kubernetes"] {
        for qualifications in &qualification_sets {
            let outcome = evaluate(text, qualifications);
            assert_eq!(outcome.passed(), outcome.missing.is_empty());
        }
    }
}

#[test]
fn missing_preserves_input_order_and_duplicates() {
    let qualifications = quals(&["Go", "Rust", "Go", "COBOL", "Python"]);
    let outcome = evaluate("Rust and Python", &qualifications);

    assert_eq!(outcome.missing, quals(&["Go", "Go", "COBOL"]));
}

#[test]
fn case_of_text_or_phrase_does_not_matter() {
    let text = "Led Project Management for a Python Programming team";
    let qualifications = quals(&["project management", "PYTHON programming", "Kotlin"]);

    let baseline = evaluate(text, &qualifications);
    assert_eq!(evaluate(&text.to_uppercase(), &qualifications), baseline);
    assert_eq!(evaluate(&text.to_lowercase(), &qualifications), baseline);

    let shouted: Vec<Qualification> = qualifications
        .iter()
        .map(|q| Qualification::new(q.as_str().to_uppercase()))
        .collect();
    let shouted_outcome = evaluate(text, &shouted);
    assert_eq!(shouted_outcome.missing, quals(&["KOTLIN"]));
}

#[test]
fn containment_ignores_word_boundaries() {
    let outcome = evaluate("Experienced in JavaScript", &quals(&["java", "script"]));
    assert!(outcome.passed());
}

#[test]
fn matcher_can_be_reused_across_documents() {
    let matcher = QualificationMatcher::new(&quals(&["SQL", "Rust"]));

    assert!(matcher.evaluate("rust, sql").passed());
    assert_eq!(matcher.evaluate("rust").missing, quals(&["SQL"]));
    assert_eq!(matcher.evaluate("").missing, quals(&["SQL", "Rust"]));
}
