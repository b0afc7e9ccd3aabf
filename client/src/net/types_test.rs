use super::*;

// =============================================================
// Role
// =============================================================

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
}

#[test]
fn role_default_is_user() {
    assert_eq!(Role::default(), Role::User);
}

#[test]
fn role_parse_accepts_wire_names_only() {
    assert_eq!(Role::parse("admin"), Some(Role::Admin));
    assert_eq!(Role::parse(" user "), Some(Role::User));
    assert_eq!(Role::parse("root"), None);
}

// =============================================================
// User / UserDraft
// =============================================================

#[test]
fn user_without_created_time_omits_field() {
    let user = User { id: 1, username: "cqk".to_owned(), role: Role::Admin, created_time: None };
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json, serde_json::json!({ "id": 1, "username": "cqk", "role": "admin" }));
}

#[test]
fn user_parses_seed_record_shape() {
    let raw = r#"{"id":2,"username":"lyy","role":"user","created_time":"2025-11-30 10:16:04"}"#;
    let user: User = serde_json::from_str(raw).unwrap();
    assert_eq!(user.role, Role::User);
    assert_eq!(user.created_time.as_deref(), Some("2025-11-30 10:16:04"));
    assert!(!user.is_admin());
}

#[test]
fn draft_with_only_username_defaults_role() {
    let draft: UserDraft = serde_json::from_str(r#"{"username":"z"}"#).unwrap();
    assert_eq!(draft.role, Role::User);
    assert!(draft.password.is_none());
}

#[test]
fn draft_into_user_drops_password() {
    let draft = UserDraft { username: "z".to_owned(), role: Role::Admin, password: Some("pw".to_owned()) };
    let user = draft.into_user(42);
    assert_eq!(user.id, 42);
    assert_eq!(user.username, "z");
    assert_eq!(user.role, Role::Admin);
    let json = serde_json::to_string(&user).unwrap();
    assert!(!json.contains("pw"));
}

// =============================================================
// ChatEvent
// =============================================================

#[test]
fn chat_event_parses_upstream_payloads() {
    let start: ChatEvent = serde_json::from_str(r#"{"type":"start","timestamp":1.5}"#).unwrap();
    assert_eq!(start, ChatEvent::Start { timestamp: Some(1.5) });

    let content: ChatEvent = serde_json::from_str(r#"{"type":"content","content":"电力"}"#).unwrap();
    assert_eq!(content, ChatEvent::Content { content: "电力".to_owned() });

    let end: ChatEvent =
        serde_json::from_str(r#"{"type":"end","complete_response":"done","timestamp":2.0}"#).unwrap();
    assert!(end.is_terminal());

    let error: ChatEvent = serde_json::from_str(r#"{"type":"error","error":"boom"}"#).unwrap();
    assert_eq!(error, ChatEvent::Error { error: "boom".to_owned() });
}

#[test]
fn chat_event_content_is_not_terminal() {
    assert!(!ChatEvent::Content { content: String::new() }.is_terminal());
    assert!(!ChatEvent::Start { timestamp: None }.is_terminal());
}
