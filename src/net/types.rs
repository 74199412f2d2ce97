//! Identity DTOs shared by the session store and the identity provider.
//!
//! DESIGN
//! ======
//! Field names serialize in camelCase so the persisted `auth-storage` snapshot
//! keeps the same shape the browser has always stored.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// A signed-in user as issued by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Stable identity identifier (`"demo-user"` or a UUID string).
    pub id: String,
    /// Normalized (trimmed, lowercase) email address.
    pub email: String,
    /// Unique handle.
    pub username: String,
    /// Human-friendly name, if the user set one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Avatar image URL, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Whether the email address has been verified.
    #[serde(default)]
    pub verified: bool,
}

impl Identity {
    /// Name to show in page chrome: display name when set, else the username.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }

    /// Return a copy with every field present in `update` overwritten.
    #[must_use]
    pub fn merged(&self, update: &ProfileUpdate) -> Self {
        let mut next = self.clone();
        if let Some(username) = &update.username {
            next.username.clone_from(username);
        }
        if let Some(display_name) = &update.display_name {
            next.display_name = Some(display_name.clone());
        }
        if let Some(avatar_url) = &update.avatar_url {
            next.avatar_url = Some(avatar_url.clone());
        }
        next
    }
}

/// Partial profile edit. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn display_name(name: impl Into<String>) -> Self {
        Self { display_name: Some(name.into()), ..Self::default() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.display_name.is_none() && self.avatar_url.is_none()
    }
}

/// Sign-up form payload handed to the identity provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub username: String,
    pub display_name: Option<String>,
}

/// Trim and lowercase an email address.
///
/// Returns `None` unless the result has exactly one `@` with non-empty local
/// and domain parts.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}
