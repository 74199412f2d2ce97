//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`SessionStore`] is the single source of truth for who is signed in. Route
//! guards and user-aware components read [`Session`] snapshots (mirrored into
//! a Leptos signal by the app root); only the store's operations mutate it.
//!
//! DESIGN
//! ======
//! - `is_authenticated` is written together with `user` under one lock, so a
//!   reader never sees them disagree.
//! - Every provider-backed operation holds a FIFO operation slot for its whole
//!   duration. Overlapping calls therefore run in invocation order and a slow
//!   stale response cannot overwrite a newer one.
//! - Commits are compare-and-set against a revision counter read after the
//!   slot is acquired.
//! - `is_loading` is driven by an in-flight counter: it stays true while any
//!   operation is running or queued.
//! - Initialization is one-shot, tracked by [`InitPhase`] inside the store
//!   rather than in any consuming view.
//!
//! ERROR HANDLING
//! ==============
//! Initialization failures are logged and absorbed into the signed-out state.
//! Mutating operations return [`SessionError`] for the caller to surface as a
//! form-level message; a failed operation never commits partial state.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::net::identity::{IdentityError, IdentityProvider};
use crate::net::types::{Identity, ProfileUpdate, Registration, normalize_email};
use crate::util::storage::{KeyValueStore, load_json, save_json};

// =============================================================================
// SESSION
// =============================================================================

/// Current authentication snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user: Option<Identity>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl Default for Session {
    /// Process-start state: nobody signed in, resolution pending.
    fn default() -> Self {
        Self { user: None, is_authenticated: false, is_loading: true }
    }
}

/// Durable subset of [`Session`]. Never carries `is_loading`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub user: Option<Identity>,
    pub is_authenticated: bool,
}

impl From<&Session> for PersistedSession {
    fn from(session: &Session) -> Self {
        Self { user: session.user.clone(), is_authenticated: session.is_authenticated }
    }
}

/// Progress of the one-shot startup reconciliation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InitPhase {
    #[default]
    Uninitialized,
    InFlight,
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("Enter a valid email address.")]
    InvalidEmail,
    #[error("An account with this email already exists.")]
    EmailTaken,
    #[error("You need to be signed in to do that.")]
    NotAuthenticated,
    #[error("The session changed while the request was in flight.")]
    Superseded,
    #[error("Identity service error: {0}")]
    Provider(IdentityError),
}

impl From<IdentityError> for SessionError {
    fn from(e: IdentityError) -> Self {
        match e {
            IdentityError::InvalidCredentials => Self::InvalidCredentials,
            IdentityError::EmailTaken => Self::EmailTaken,
            other => Self::Provider(other),
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

type Listener = Arc<dyn Fn(&Session) + Send + Sync>;

struct Inner {
    session: Session,
    phase: InitPhase,
    in_flight: usize,
    revision: u64,
    listeners: Vec<Listener>,
}

/// Process-wide session store. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Inner>>,
    slot: Arc<tokio::sync::Mutex<()>>,
    provider: Arc<dyn IdentityProvider>,
    storage: Arc<dyn KeyValueStore>,
    storage_key: Arc<str>,
}

impl SessionStore {
    /// Build a store, rehydrating `user` from the snapshot under `storage_key`.
    ///
    /// `is_authenticated` is re-derived from the restored user and
    /// `is_loading` starts true until the first operation settles.
    #[must_use]
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        storage: Arc<dyn KeyValueStore>,
        storage_key: impl Into<String>,
    ) -> Self {
        let storage_key: Arc<str> = Arc::from(storage_key.into());
        let mut session = Session::default();
        if let Some(snapshot) = load_json::<PersistedSession>(storage.as_ref(), &storage_key) {
            if snapshot.is_authenticated != snapshot.user.is_some() {
                log::warn!("persisted session flags disagree with stored user; re-deriving");
            }
            session.is_authenticated = snapshot.user.is_some();
            session.user = snapshot.user;
        }

        Self {
            inner: Arc::new(Mutex::new(Inner {
                session,
                phase: InitPhase::Uninitialized,
                in_flight: 0,
                revision: 0,
                listeners: Vec::new(),
            })),
            slot: Arc::new(tokio::sync::Mutex::new(())),
            provider,
            storage,
            storage_key,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current session snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.lock().session.clone()
    }

    #[must_use]
    pub fn init_phase(&self) -> InitPhase {
        self.lock().phase
    }

    fn current_user(&self) -> Option<Identity> {
        self.lock().session.user.clone()
    }

    fn revision(&self) -> u64 {
        self.lock().revision
    }

    /// Register a listener called with the new snapshot after every change.
    ///
    /// Listeners run outside the store lock and may read the store.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        self.lock().listeners.push(Arc::new(listener));
    }

    fn publish(&self) {
        let (session, listeners) = {
            let inner = self.lock();
            (inner.session.clone(), inner.listeners.clone())
        };
        for listener in &listeners {
            listener(&session);
        }
    }

    fn begin(&self) -> InFlight<'_> {
        let changed = {
            let mut inner = self.lock();
            inner.in_flight += 1;
            !std::mem::replace(&mut inner.session.is_loading, true)
        };
        if changed {
            self.publish();
        }
        InFlight { store: self }
    }

    /// Commit `user` if no other commit landed since `expected` was read.
    fn commit(&self, expected: u64, user: Option<Identity>) -> bool {
        let persisted = {
            let mut inner = self.lock();
            if inner.revision != expected {
                log::warn!(
                    "dropping stale session commit (expected revision {expected}, found {})",
                    inner.revision
                );
                return false;
            }
            inner.revision += 1;
            inner.session.is_authenticated = user.is_some();
            inner.session.user = user;
            if inner.phase == InitPhase::Uninitialized {
                inner.phase = InitPhase::Resolved;
            }
            PersistedSession::from(&inner.session)
        };
        save_json(self.storage.as_ref(), &self.storage_key, &persisted);
        self.publish();
        true
    }

    fn claim_initialization(&self) -> bool {
        let mut inner = self.lock();
        if inner.phase != InitPhase::Uninitialized {
            log::debug!("session initialization skipped ({:?})", inner.phase);
            return false;
        }
        inner.phase = InitPhase::InFlight;
        true
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Reconcile the stored session with the identity provider.
    ///
    /// Runs at most once per store: a second call while the first is in flight,
    /// or after the session was resolved, returns without touching anything.
    pub async fn initialize(&self) {
        if !self.claim_initialization() {
            return;
        }
        let mut attempt = InitAttempt { store: self, resolved: false };
        let _flight = self.begin();
        let _slot = self.slot.lock().await;
        let revision = self.revision();

        let user = match self.provider.current_identity().await {
            Ok(user) => user,
            Err(e) => {
                log::warn!("session initialization failed, continuing signed out: {e}");
                None
            }
        };
        let signed_in = user.is_some();
        self.commit(revision, user);
        attempt.resolve();
        log::debug!("session initialized (signed_in={signed_in})");
    }

    /// Sign in with an email/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidCredentials`] when the provider rejects
    /// the pair; the session is left untouched on every error.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, SessionError> {
        let email = normalize_email(email).unwrap_or_else(|| email.trim().to_ascii_lowercase());
        let _flight = self.begin();
        let _slot = self.slot.lock().await;
        let revision = self.revision();

        let identity = self
            .provider
            .verify_credentials(&email, password)
            .await
            .inspect_err(|e| log::debug!("sign-in rejected: {e}"))?;
        if !self.commit(revision, Some(identity.clone())) {
            return Err(SessionError::Superseded);
        }
        log::info!("signed in as {}", identity.username);
        Ok(identity)
    }

    /// Create an account and sign in as it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidEmail`] for a malformed address (without
    /// touching the session) and [`SessionError::EmailTaken`] or a provider
    /// error when the provider refuses the account.
    pub async fn register(&self, registration: Registration) -> Result<Identity, SessionError> {
        let email = normalize_email(&registration.email).ok_or(SessionError::InvalidEmail)?;
        let registration = Registration { email, ..registration };
        let _flight = self.begin();
        let _slot = self.slot.lock().await;
        let revision = self.revision();

        let identity = self.provider.create_identity(&registration).await?;
        if !self.commit(revision, Some(identity.clone())) {
            return Err(SessionError::Superseded);
        }
        log::info!("registered {}", identity.username);
        Ok(identity)
    }

    /// Sign out. The local session is cleared even if invalidation fails.
    pub async fn logout(&self) {
        let _flight = self.begin();
        let _slot = self.slot.lock().await;
        let revision = self.revision();

        if let Err(e) = self.provider.invalidate().await {
            log::warn!("credential invalidation failed, clearing local session anyway: {e}");
        }
        self.commit(revision, None);
        log::info!("signed out");
    }

    /// Apply a partial profile edit once the provider acknowledges it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] without any state change when
    /// nobody is signed in, or the provider's error when it refuses the edit.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<Identity, SessionError> {
        if self.current_user().is_none() {
            return Err(SessionError::NotAuthenticated);
        }
        let _flight = self.begin();
        let _slot = self.slot.lock().await;
        let revision = self.revision();
        // A queued sign-out may have run while we waited for the slot.
        let user = self.current_user().ok_or(SessionError::NotAuthenticated)?;

        let acknowledged = self.provider.apply_profile_update(&user.id, &update).await?;
        if !self.commit(revision, Some(acknowledged.clone())) {
            return Err(SessionError::Superseded);
        }
        Ok(acknowledged)
    }
}

/// In-flight mark for one operation; clears `is_loading` when the last one drops.
struct InFlight<'a> {
    store: &'a SessionStore,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let changed = {
            let mut inner = self.store.lock();
            inner.in_flight = inner.in_flight.saturating_sub(1);
            inner.in_flight == 0 && std::mem::replace(&mut inner.session.is_loading, false)
        };
        if changed {
            self.store.publish();
        }
    }
}

/// Returns the init phase to `Uninitialized` if initialization is abandoned
/// before it resolves, so a later mount can retry.
struct InitAttempt<'a> {
    store: &'a SessionStore,
    resolved: bool,
}

impl InitAttempt<'_> {
    fn resolve(&mut self) {
        self.store.lock().phase = InitPhase::Resolved;
        self.resolved = true;
    }
}

impl Drop for InitAttempt<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            let mut inner = self.store.lock();
            if inner.phase == InitPhase::InFlight {
                inner.phase = InitPhase::Uninitialized;
            }
        }
    }
}
