//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the shared session from Leptos context; none of them own
//! session state of their own.

pub mod route_guard;
pub mod user_menu;
