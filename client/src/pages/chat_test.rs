use super::*;

#[test]
fn normalize_question_trims_whitespace() {
    assert_eq!(normalize_question("  what is a spot price?\n"), Some("what is a spot price?".to_owned()));
}

#[test]
fn normalize_question_rejects_blank_input() {
    assert_eq!(normalize_question(""), None);
    assert_eq!(normalize_question(" \t\n"), None);
}
