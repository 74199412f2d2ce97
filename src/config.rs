//! Application configuration parsed from environment variables.
//!
//! In the browser the process environment is empty, so every value falls back
//! to its default; SSR deployments can override them.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::time::Duration;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const PROFILE_PATH: &str = "/profile";
pub const DEFAULT_STORAGE_KEY: &str = "auth-storage";
pub const DEFAULT_SIMULATED_LATENCY_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must not be blank")]
    Blank { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Where unauthenticated visitors of protected views are sent.
    pub login_path: String,
    /// Where authenticated visitors of guest-only views are sent.
    pub dashboard_path: String,
    /// Key of the persisted session snapshot.
    pub storage_key: String,
    /// Latency the demo identity provider simulates per call.
    pub simulated_latency: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            login_path: LOGIN_PATH.to_owned(),
            dashboard_path: DASHBOARD_PATH.to_owned(),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            simulated_latency: Duration::from_millis(DEFAULT_SIMULATED_LATENCY_MS),
        }
    }
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PROMPTPACK_STORAGE_KEY`: default `auth-storage`
    /// - `PROMPTPACK_SIMULATED_LATENCY_MS`: default 500
    ///
    /// Redirect paths always match the app's route table and are not read
    /// from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage key override is blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        let storage_key = match std::env::var("PROMPTPACK_STORAGE_KEY") {
            Ok(raw) if raw.trim().is_empty() => {
                return Err(ConfigError::Blank { var: "PROMPTPACK_STORAGE_KEY" });
            }
            Ok(raw) => raw.trim().to_owned(),
            Err(_) => DEFAULT_STORAGE_KEY.to_owned(),
        };
        let simulated_latency = Duration::from_millis(env_parse_u64(
            "PROMPTPACK_SIMULATED_LATENCY_MS",
            DEFAULT_SIMULATED_LATENCY_MS,
        ));

        Ok(Self { storage_key, simulated_latency, ..Self::default() })
    }

    /// Like [`AppConfig::from_env`], but logs and falls back to defaults on error.
    #[must_use]
    pub fn from_env_or_default() -> Self {
        Self::from_env().unwrap_or_else(|e| {
            log::warn!("invalid configuration, using defaults: {e}");
            Self::default()
        })
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}
