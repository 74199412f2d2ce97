//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its form state and wraps its body in a `RouteGuard`, so the
//! auth gate is declared next to the view it protects.

pub mod dashboard;
pub mod login;
pub mod profile;
pub mod register;
