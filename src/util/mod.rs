//! Utility helpers shared across UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `storage` isolates browser persistence behind a small trait and `guard`
//! holds the pure routing decision, keeping both testable off the browser.

pub mod guard;
pub mod storage;
