use santa_core::errors::{ErrorInfo, SantaError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("participant", "Alexa")
        .with_context("reason", "example")
}

#[test]
fn roster_error_surface() {
    let err = SantaError::Roster(sample_info("duplicate-participant", "listed twice"));
    assert_eq!(err.code(), "duplicate-participant");
    assert!(err.info().context.contains_key("participant"));
}

#[test]
fn constraint_error_surface() {
    let err = SantaError::Constraint(sample_info("unknown-participant", "not on roster"));
    assert_eq!(err.info().code, "unknown-participant");
}

#[test]
fn insufficient_participants_message_matches_cli_wording() {
    let err = SantaError::insufficient_participants(2, 2);
    assert!(err.is_insufficient_participants());
    assert!(!err.is_no_feasible_assignment());
    assert_eq!(
        err.info().message,
        "At least 3 people must be participating to exchange 2 gifts"
    );
    assert_eq!(err.info().context.get("participants"), Some(&"2".to_string()));
}

#[test]
fn exhausted_retries_carry_a_hint() {
    let err = SantaError::no_feasible_assignment(50, 3, 1);
    assert!(err.is_no_feasible_assignment());
    assert_eq!(err.info().context.get("attempts"), Some(&"50".to_string()));
    assert!(err.info().hint.is_some());
}

#[test]
fn display_includes_context_and_hint() {
    let info = ErrorInfo::new("E001", "problem")
        .with_context("giver", "Ben")
        .with_hint("try again");
    let rendered = SantaError::Config(info).to_string();
    assert_eq!(
        rendered,
        "config error: problem (code: E001) | context: [giver=Ben] | hint: try again"
    );
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = SantaError::Serde(ErrorInfo::new("config-parse", "bad yaml"));
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["family"], "Serde");
    assert_eq!(json["detail"]["code"], "config-parse");
    let decoded: SantaError = serde_json::from_value(json).expect("deserialize");
    assert_eq!(decoded, err);
}
