use super::*;
use crate::util::storage::MemoryStorage;

fn provider() -> (DemoIdentityProvider, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    (DemoIdentityProvider::new(storage.clone(), Duration::ZERO), storage)
}

fn registration(email: &str) -> Registration {
    Registration {
        email: email.to_owned(),
        password: "hunter22".to_owned(),
        username: "newbie".to_owned(),
        display_name: Some("New Bie".to_owned()),
    }
}

// =============================================================
// verify_credentials
// =============================================================

#[tokio::test]
async fn demo_account_signs_in() {
    let (provider, storage) = provider();
    let identity = provider
        .verify_credentials(DEMO_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();
    assert_eq!(identity.id, "demo-user");
    assert_eq!(identity.email, "demo@example.com");
    assert_eq!(identity.username, "demouser");
    assert!(identity.verified);
    assert_eq!(storage.get(CREDENTIAL_KEY).as_deref(), Some("demo-user"));
}

#[tokio::test]
async fn wrong_password_is_rejected_without_credential() {
    let (provider, storage) = provider();
    let err = provider
        .verify_credentials(DEMO_EMAIL, "nope")
        .await
        .unwrap_err();
    assert_eq!(err, IdentityError::InvalidCredentials);
    assert_eq!(storage.get(CREDENTIAL_KEY), None);
}

#[tokio::test]
async fn unknown_email_is_rejected() {
    let (provider, _) = provider();
    let err = provider
        .verify_credentials("ghost@example.com", DEMO_PASSWORD)
        .await
        .unwrap_err();
    assert_eq!(err, IdentityError::InvalidCredentials);
}

// =============================================================
// create_identity
// =============================================================

#[tokio::test]
async fn create_identity_issues_unverified_uuid_identity() {
    let (provider, storage) = provider();
    let identity = provider
        .create_identity(&registration("new@example.com"))
        .await
        .unwrap();
    assert!(!identity.verified);
    assert!(Uuid::parse_str(&identity.id).is_ok());
    assert_eq!(identity.username, "newbie");
    assert_eq!(identity.display_name.as_deref(), Some("New Bie"));
    assert_eq!(storage.get(CREDENTIAL_KEY), Some(identity.id.clone()));

    let again = provider
        .verify_credentials("new@example.com", "hunter22")
        .await
        .unwrap();
    assert_eq!(again, identity);
}

#[tokio::test]
async fn create_identity_rejects_taken_email() {
    let (provider, _) = provider();
    let err = provider
        .create_identity(&registration(DEMO_EMAIL))
        .await
        .unwrap_err();
    assert_eq!(err, IdentityError::EmailTaken);
}

// =============================================================
// current_identity / invalidate
// =============================================================

#[tokio::test]
async fn current_identity_none_without_credential() {
    let (provider, _) = provider();
    assert_eq!(provider.current_identity().await.unwrap(), None);
}

#[tokio::test]
async fn current_identity_survives_new_provider_on_same_storage() {
    let (provider, storage) = provider();
    provider
        .verify_credentials(DEMO_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();

    let reloaded = DemoIdentityProvider::new(storage, Duration::ZERO);
    let current = reloaded.current_identity().await.unwrap().unwrap();
    assert_eq!(current.id, DEMO_USER_ID);
}

#[tokio::test]
async fn current_identity_rejects_stale_credential() {
    let (provider, storage) = provider();
    storage.set(CREDENTIAL_KEY, "vanished");
    assert_eq!(provider.current_identity().await.unwrap_err(), IdentityError::UnknownIdentity);
}

#[tokio::test]
async fn invalidate_clears_credential() {
    let (provider, storage) = provider();
    provider
        .verify_credentials(DEMO_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();
    provider.invalidate().await.unwrap();
    assert_eq!(storage.get(CREDENTIAL_KEY), None);
    assert_eq!(provider.current_identity().await.unwrap(), None);
}

// =============================================================
// apply_profile_update
// =============================================================

#[tokio::test]
async fn profile_update_is_persisted_in_account() {
    let (provider, _) = provider();
    let updated = provider
        .apply_profile_update(DEMO_USER_ID, &ProfileUpdate::display_name("New Name"))
        .await
        .unwrap();
    assert_eq!(updated.display_name.as_deref(), Some("New Name"));

    let signed_in = provider
        .verify_credentials(DEMO_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();
    assert_eq!(signed_in.display_name.as_deref(), Some("New Name"));
}

#[tokio::test]
async fn profile_update_unknown_id_fails() {
    let (provider, _) = provider();
    let err = provider
        .apply_profile_update("nobody", &ProfileUpdate::display_name("x"))
        .await
        .unwrap_err();
    assert_eq!(err, IdentityError::UnknownIdentity);
}
