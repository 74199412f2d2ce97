//! Identity provider seam and the in-browser demo implementation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store never verifies credentials itself; it delegates to an
//! [`IdentityProvider`]. Production deployments plug in a real identity
//! service. [`DemoIdentityProvider`] stands in for it with a seeded demo
//! account and simulated network latency.
//!
//! TRADE-OFFS
//! ==========
//! Provider futures are `?Send` so browser implementations can await
//! `gloo-timers`/fetch futures directly. The provider value itself is
//! `Send + Sync` so the store can live in Leptos context.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use uuid::Uuid;

use super::types::{Identity, ProfileUpdate, Registration};
use crate::util::storage::KeyValueStore;

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "demo123";
pub const DEMO_USER_ID: &str = "demo-user";

/// Storage key holding the id of the identity the demo provider signed in.
pub const CREDENTIAL_KEY: &str = "auth-credential";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account with this email already exists")]
    EmailTaken,
    #[error("unknown identity")]
    UnknownIdentity,
    #[error("identity service unavailable: {0}")]
    Unavailable(String),
}

/// External identity collaborator.
#[async_trait::async_trait(?Send)]
pub trait IdentityProvider: Send + Sync {
    /// Check an email/password pair and return the matching identity.
    async fn verify_credentials(&self, email: &str, password: &str) -> Result<Identity, IdentityError>;

    /// Create a new, unverified identity.
    async fn create_identity(&self, registration: &Registration) -> Result<Identity, IdentityError>;

    /// Identity attached to the previously stored credential, if any.
    async fn current_identity(&self) -> Result<Option<Identity>, IdentityError>;

    /// Invalidate the stored credential.
    async fn invalidate(&self) -> Result<(), IdentityError>;

    /// Apply a profile edit and return the acknowledged identity.
    async fn apply_profile_update(&self, id: &str, update: &ProfileUpdate) -> Result<Identity, IdentityError>;
}

/// Wait out simulated network latency. Browser-only; elsewhere resolves at once.
pub async fn simulate_latency(latency: Duration) {
    if latency.is_zero() {
        return;
    }
    #[cfg(feature = "hydrate")]
    {
        gloo_timers::future::sleep(latency).await;
    }
}

struct Account {
    password: String,
    identity: Identity,
}

/// Demo identity provider with one seeded account.
///
/// Accounts live in memory; the signed-in identity id is remembered in the
/// supplied key-value store under [`CREDENTIAL_KEY`], so the demo account
/// survives a page reload.
pub struct DemoIdentityProvider {
    accounts: Mutex<HashMap<String, Account>>,
    storage: Arc<dyn KeyValueStore>,
    latency: Duration,
}

impl DemoIdentityProvider {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, latency: Duration) -> Self {
        let demo = Account {
            password: DEMO_PASSWORD.to_owned(),
            identity: Identity {
                id: DEMO_USER_ID.to_owned(),
                email: DEMO_EMAIL.to_owned(),
                username: "demouser".to_owned(),
                display_name: Some("Demo User".to_owned()),
                avatar_url: None,
                verified: true,
            },
        };
        let mut accounts = HashMap::new();
        accounts.insert(DEMO_EMAIL.to_owned(), demo);
        Self { accounts: Mutex::new(accounts), storage, latency }
    }

    fn accounts(&self) -> std::sync::MutexGuard<'_, HashMap<String, Account>> {
        self.accounts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn find_by_id(&self, id: &str) -> Option<Identity> {
        self.accounts()
            .values()
            .find(|account| account.identity.id == id)
            .map(|account| account.identity.clone())
    }

    fn remember(&self, identity: &Identity) {
        self.storage.set(CREDENTIAL_KEY, &identity.id);
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityProvider for DemoIdentityProvider {
    async fn verify_credentials(&self, email: &str, password: &str) -> Result<Identity, IdentityError> {
        simulate_latency(self.latency).await;
        let identity = {
            let accounts = self.accounts();
            let account = accounts
                .get(email)
                .ok_or(IdentityError::InvalidCredentials)?;
            if account.password != password {
                return Err(IdentityError::InvalidCredentials);
            }
            account.identity.clone()
        };
        self.remember(&identity);
        Ok(identity)
    }

    async fn create_identity(&self, registration: &Registration) -> Result<Identity, IdentityError> {
        simulate_latency(self.latency).await;
        let identity = {
            let mut accounts = self.accounts();
            if accounts.contains_key(&registration.email) {
                return Err(IdentityError::EmailTaken);
            }
            let identity = Identity {
                id: Uuid::new_v4().to_string(),
                email: registration.email.clone(),
                username: registration.username.clone(),
                display_name: registration.display_name.clone(),
                avatar_url: None,
                verified: false,
            };
            accounts.insert(
                registration.email.clone(),
                Account { password: registration.password.clone(), identity: identity.clone() },
            );
            identity
        };
        self.remember(&identity);
        Ok(identity)
    }

    async fn current_identity(&self) -> Result<Option<Identity>, IdentityError> {
        simulate_latency(self.latency).await;
        let Some(id) = self.storage.get(CREDENTIAL_KEY) else {
            return Ok(None);
        };
        self.find_by_id(&id)
            .map(Some)
            .ok_or(IdentityError::UnknownIdentity)
    }

    async fn invalidate(&self) -> Result<(), IdentityError> {
        simulate_latency(self.latency).await;
        self.storage.remove(CREDENTIAL_KEY);
        Ok(())
    }

    async fn apply_profile_update(&self, id: &str, update: &ProfileUpdate) -> Result<Identity, IdentityError> {
        simulate_latency(self.latency).await;
        let mut accounts = self.accounts();
        let account = accounts
            .values_mut()
            .find(|account| account.identity.id == id)
            .ok_or(IdentityError::UnknownIdentity)?;
        account.identity = account.identity.merged(update);
        Ok(account.identity.clone())
    }
}
