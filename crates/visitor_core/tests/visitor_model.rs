use uuid::Uuid;
use visitor_core::{parse_full_name, Visitor, VisitorValidationError};

#[test]
fn new_visitor_gets_a_fresh_id() {
    let first = Visitor::new("Ryan", "Dahl").unwrap();
    let second = Visitor::new("Ryan", "Dahl").unwrap();

    assert!(!first.id.is_nil());
    assert_ne!(first.id, second.id);
    assert_eq!(first.full_name(), "Ryan Dahl");
}

#[test]
fn serialization_uses_flat_camel_case_wire_shape() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let visitor = Visitor::with_id(id, "Ludwig", "van der Waals").unwrap();

    let json = serde_json::to_value(&visitor).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": "11111111-2222-4333-8444-555555555555",
            "firstName": "Ludwig",
            "familyName": "van der Waals",
        })
    );

    let decoded: Visitor = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, visitor);
}

#[test]
fn with_id_rejects_structurally_invalid_records() {
    assert_eq!(
        Visitor::with_id(Uuid::nil(), "Ryan", "Dahl").unwrap_err(),
        VisitorValidationError::NilId
    );
    assert_eq!(
        Visitor::new("  ", "Dahl").unwrap_err(),
        VisitorValidationError::EmptyFirstName
    );
    assert_eq!(
        Visitor::new("Ryan", "").unwrap_err(),
        VisitorValidationError::EmptyFamilyName
    );
    assert_eq!(
        Visitor::new("Ryan", "Dahl2").unwrap_err(),
        VisitorValidationError::InvalidCharacters
    );
}

#[test]
fn renamed_returns_new_value_and_leaves_original_untouched() {
    let original = Visitor::new("Ryan", "Dahl").unwrap();
    let renamed = original.renamed("Ryan", "Dahlberg").unwrap();

    assert_eq!(renamed.id, original.id);
    assert_eq!(renamed.family_name, "Dahlberg");
    assert_eq!(original.family_name, "Dahl");
}

#[test]
fn from_parsed_carries_multi_word_family_name() {
    let parsed = parse_full_name("Ludwig van Beethoven").unwrap();
    let visitor = Visitor::from_parsed(parsed).unwrap();

    assert_eq!(visitor.first_name, "Ludwig");
    assert_eq!(visitor.family_name, "van Beethoven");
}
