use santa_core::{Participant, Roster, SantaError};

#[test]
fn roster_keeps_input_order() {
    let roster = Roster::new(["Kate", "Alexa", "Ben"]).unwrap();
    let names: Vec<&str> = roster.iter().map(Participant::as_str).collect();
    assert_eq!(names, ["Kate", "Alexa", "Ben"]);
    assert_eq!(roster.len(), 3);
    assert!(roster.contains("Alexa"));
    assert!(!roster.contains("Ryan"));
}

#[test]
fn duplicates_are_rejected() {
    let err = Roster::new(["Kate", "Ben", "Kate"]).unwrap_err();
    match err {
        SantaError::Roster(info) => {
            assert_eq!(info.code, "duplicate-participant");
            assert_eq!(info.context.get("participant"), Some(&"Kate".to_string()));
            assert_eq!(info.context.get("index"), Some(&"2".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn blank_names_are_rejected() {
    let err = Roster::new(["Kate", "  "]).unwrap_err();
    assert_eq!(err.code(), "empty-participant");
}

#[test]
fn capacity_requires_more_people_than_gifts() {
    let roster = Roster::new(["A", "B"]).unwrap();
    assert!(roster.check_capacity(1).is_ok());
    assert!(roster.check_capacity(2).unwrap_err().is_insufficient_participants());
    assert_eq!(roster.check_capacity(0).unwrap_err().code(), "invalid-gift-count");
}

#[test]
fn roster_deserialization_validates() {
    let roster: Roster = serde_json::from_str(r#"["A","B","C"]"#).unwrap();
    assert_eq!(roster.len(), 3);
    assert!(serde_json::from_str::<Roster>(r#"["A","A"]"#).is_err());
    assert_eq!(serde_json::to_string(&roster).unwrap(), r#"["A","B","C"]"#);
}
