use super::*;

// --- clock ---

#[test]
fn now_ms_is_past_2020() {
    assert!(now_ms() > 1_577_836_800_000);
}

// --- email shape ---

#[test]
fn accepts_plain_addresses() {
    assert!(is_valid_email("ana@example.com"));
    assert!(is_valid_email("dev+canvas@team.example.org"));
}

#[test]
fn rejects_missing_at_sign() {
    assert!(!is_valid_email("example.com"));
    assert!(!is_valid_email(""));
}

#[test]
fn rejects_empty_local_part() {
    assert!(!is_valid_email("@example.com"));
}

#[test]
fn rejects_undotted_domain() {
    assert!(!is_valid_email("ana@localhost"));
    assert!(!is_valid_email("ana@example."));
    assert!(!is_valid_email("ana@.com"));
}

#[test]
fn rejects_double_at_and_whitespace() {
    assert!(!is_valid_email("ana@@example.com"));
    assert!(!is_valid_email("ana @example.com"));
    assert!(!is_valid_email("ana@exa mple.com"));
}

// --- errors ---

#[test]
fn error_display_names_the_id() {
    let err = StoreError::ArtifactNotFound(7);
    assert_eq!(err.to_string(), "artifact not found: 7");
    let err = StoreError::TeamNotFound(3);
    assert_eq!(err.to_string(), "team not found: 3");
}
