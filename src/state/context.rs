//! Reactive bridge between [`SessionStore`] and Leptos components.
//!
//! The store stays framework-free; the app root mirrors its snapshots into an
//! `RwSignal<Session>` so views re-render on every session change.

use std::sync::Arc;

use leptos::prelude::*;

use super::session::{Session, SessionStore};
use crate::config::AppConfig;
use crate::net::identity::DemoIdentityProvider;
use crate::util::storage::{BrowserStorage, KeyValueStore};

/// Session store plus its reactive mirror, provided via context.
#[derive(Clone)]
pub struct SessionContext {
    pub store: SessionStore,
    pub session: RwSignal<Session>,
}

impl SessionContext {
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        let session = RwSignal::new(store.snapshot());
        // The signal may already be disposed when a late operation settles.
        store.subscribe(move |next| {
            let _ = session.try_set(next.clone());
        });
        Self { store, session }
    }
}

/// Build the browser session store and provide it to the component tree.
pub fn provide_session(config: &AppConfig) -> SessionContext {
    let storage: Arc<dyn KeyValueStore> = Arc::new(BrowserStorage);
    let provider = Arc::new(DemoIdentityProvider::new(storage.clone(), config.simulated_latency));
    let store = SessionStore::new(provider, storage, config.storage_key.clone());
    let ctx = SessionContext::new(store);
    provide_context(ctx.clone());
    ctx
}

/// Fetch the session context provided by the app root.
pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
