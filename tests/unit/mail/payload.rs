use super::*;

fn jane() -> ContactPayload {
    ContactPayload {
        name: "Jane".into(),
        email: "jane@example.com".into(),
        message: "Hello".into(),
        ..ContactPayload::default()
    }
}

#[test]
fn missing_fields_deserialize_as_empty() {
    let p: ContactPayload = serde_json::from_str(r#"{"email": "a@b.co"}"#).unwrap();
    assert_eq!(p.name, "");
    assert_eq!(p.message, "");
    assert_eq!(p.phone, None);

    let p: ContactPayload = serde_json::from_str(r#"{"name": null, "email": "a@b.co"}"#).unwrap();
    assert_eq!(p.name, "");
}

#[test]
fn blank_optional_fields_read_as_absent() {
    let p = ContactPayload {
        phone: Some("   ".into()),
        subject: Some(" Site vitrine ".into()),
        ..jane()
    };
    assert_eq!(p.phone(), None);
    assert_eq!(p.subject(), Some("Site vitrine"));
}

#[test]
fn valid_payload_passes() {
    assert_eq!(validate_payload(&jane()), Ok(()));
}

#[test]
fn required_fields_are_checked_after_trim() {
    for p in [
        ContactPayload { name: "  ".into(), ..jane() },
        ContactPayload { email: String::new(), ..jane() },
        ContactPayload { message: "\n".into(), ..jane() },
    ] {
        assert_eq!(
            validate_payload(&p),
            Err(DispatchError::InvalidInput(MSG_REQUIRED_FIELDS.into()))
        );
    }
}

#[test]
fn malformed_email_is_rejected() {
    let p = ContactPayload {
        email: "not-an-email".into(),
        ..jane()
    };
    let err = validate_payload(&p).unwrap_err();
    assert_eq!(err.to_string(), MSG_INVALID_EMAIL);
    assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[test]
fn serializes_without_absent_optionals() {
    let v = serde_json::to_value(jane()).unwrap();
    assert_eq!(
        v,
        serde_json::json!({"name": "Jane", "email": "jane@example.com", "message": "Hello"})
    );
}
