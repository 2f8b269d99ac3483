//! Environment access as an injectable capability

use std::collections::HashMap;

/// Read-only view of environment variables.
///
/// The client never touches `std::env` directly; settings are assembled from
/// whatever `EnvSource` the caller hands in.
pub trait EnvSource {
    /// Look up a variable, `None` when unset
    fn var(&self, name: &str) -> Option<String>;

    /// Look up a variable, falling back to `default` when unset or blank
    fn get_env(&self, name: &str, default: &str) -> String {
        self.var(name)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    }
}

/// The process environment, with `.env` applied on load
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ProcessEnv {
    /// Load `.env` from the working directory (if present) and return the source
    pub fn load() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self
    }
}

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).map(|value| value.to_string())
    }
}
