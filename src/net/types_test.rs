use super::*;

// =============================================================
// Helpers
// =============================================================

fn make_identity() -> Identity {
    Identity {
        id: "demo-user".to_owned(),
        email: "demo@example.com".to_owned(),
        username: "demouser".to_owned(),
        display_name: None,
        avatar_url: None,
        verified: true,
    }
}

// =============================================================
// Identity
// =============================================================

#[test]
fn identity_serializes_camel_case() {
    let mut identity = make_identity();
    identity.display_name = Some("Demo".to_owned());
    identity.avatar_url = Some("https://example.com/a.png".to_owned());
    let json = serde_json::to_value(&identity).unwrap();
    assert_eq!(json["displayName"], "Demo");
    assert_eq!(json["avatarUrl"], "https://example.com/a.png");
    assert!(json.get("display_name").is_none());
}

#[test]
fn identity_omits_absent_optionals() {
    let json = serde_json::to_value(make_identity()).unwrap();
    assert!(json.get("displayName").is_none());
    assert!(json.get("avatarUrl").is_none());
}

#[test]
fn identity_verified_defaults_false_when_missing() {
    let identity: Identity =
        serde_json::from_str(r#"{"id":"u1","email":"a@b.com","username":"a"}"#).unwrap();
    assert!(!identity.verified);
    assert_eq!(identity.display_name, None);
}

#[test]
fn label_prefers_display_name() {
    let mut identity = make_identity();
    assert_eq!(identity.label(), "demouser");
    identity.display_name = Some("Demo User".to_owned());
    assert_eq!(identity.label(), "Demo User");
}

#[test]
fn label_ignores_blank_display_name() {
    let mut identity = make_identity();
    identity.display_name = Some("   ".to_owned());
    assert_eq!(identity.label(), "demouser");
}

#[test]
fn merged_overwrites_only_present_fields() {
    let identity = make_identity();
    let merged = identity.merged(&ProfileUpdate::display_name("New Name"));
    assert_eq!(merged.display_name.as_deref(), Some("New Name"));
    assert_eq!(merged.username, "demouser");
    assert_eq!(merged.id, identity.id);
    assert!(merged.verified);
}

#[test]
fn merged_with_empty_update_is_identity() {
    let identity = make_identity();
    assert_eq!(identity.merged(&ProfileUpdate::default()), identity);
}

#[test]
fn profile_update_is_empty() {
    assert!(ProfileUpdate::default().is_empty());
    assert!(!ProfileUpdate::display_name("x").is_empty());
}

// =============================================================
// normalize_email
// =============================================================

#[test]
fn normalize_email_trims_and_lowercases() {
    assert_eq!(normalize_email("  Demo@Example.COM "), Some("demo@example.com".to_owned()));
}

#[test]
fn normalize_email_rejects_malformed() {
    assert_eq!(normalize_email(""), None);
    assert_eq!(normalize_email("no-at-sign"), None);
    assert_eq!(normalize_email("@example.com"), None);
    assert_eq!(normalize_email("demo@"), None);
    assert_eq!(normalize_email("a@b@c"), None);
}
