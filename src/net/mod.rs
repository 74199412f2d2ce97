//! Identity provider seam and the DTOs it exchanges.
//!
//! SYSTEM CONTEXT
//! ==============
//! `identity` defines the provider trait plus the local demo backend, and
//! `types` defines the identity and profile payloads shared with the store.

pub mod identity;
pub mod types;
