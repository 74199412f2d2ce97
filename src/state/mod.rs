//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` holds the framework-free store and its invariants; `context`
//! adapts it to Leptos signals and context.

pub mod context;
pub mod session;
