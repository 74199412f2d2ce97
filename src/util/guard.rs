//! Route-guard decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every guarded route applies the same render/redirect policy. The decision
//! is a pure function of the session, the current path, and the guard's
//! configuration; the `RouteGuard` component only wires it to signals and
//! navigation.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::state::session::Session;

/// What a guard wants for the subtree it wraps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session unresolved, or already standing on the redirect target.
    Wait,
    Render,
    RedirectTo(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardConfig {
    /// `true` for signed-in-only views, `false` for guest-only views.
    pub require_auth: bool,
    pub redirect_target: String,
}

impl GuardConfig {
    /// Signed-in-only view; visitors are sent to `login_path`.
    #[must_use]
    pub fn protected(login_path: impl Into<String>) -> Self {
        Self { require_auth: true, redirect_target: login_path.into() }
    }

    /// Guest-only view (login, register); signed-in users are sent to `dashboard_path`.
    #[must_use]
    pub fn guest_only(dashboard_path: impl Into<String>) -> Self {
        Self { require_auth: false, redirect_target: dashboard_path.into() }
    }
}

fn trim_trailing_slash(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

fn same_path(a: &str, b: &str) -> bool {
    trim_trailing_slash(a) == trim_trailing_slash(b)
}

/// Decide what the guard shows for `session` at `current_path`.
#[must_use]
pub fn decide(session: &Session, current_path: &str, config: &GuardConfig) -> GuardDecision {
    if session.is_loading {
        return GuardDecision::Wait;
    }
    if config.require_auth == session.is_authenticated {
        return GuardDecision::Render;
    }
    if same_path(current_path, &config.redirect_target) {
        GuardDecision::Wait
    } else {
        GuardDecision::RedirectTo(config.redirect_target.clone())
    }
}

/// Target to navigate to when `next` is a redirect newly entered from `previous`.
///
/// Re-evaluations that keep yielding the same redirect return `None`, so one
/// transition produces one navigation.
#[must_use]
pub fn redirect_on_transition<'a>(previous: Option<&GuardDecision>, next: &'a GuardDecision) -> Option<&'a str> {
    match next {
        GuardDecision::RedirectTo(target) if previous != Some(next) => Some(target.as_str()),
        _ => None,
    }
}
