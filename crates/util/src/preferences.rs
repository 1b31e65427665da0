//! Client configuration persistence.
//!
//! A tiny JSON-backed store records where the backend lives and under which
//! key the admin token is kept. The file is written to the standard
//! configuration directory (`~/.config/provadmin/config.json` on most
//! platforms) and is safe to read/write from multiple threads thanks to the
//! internal `Mutex`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dirs_next::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::expand_tilde;

/// Environment variable allowing callers to override the config file path.
pub const CONFIG_PATH_ENV: &str = "PROVADMIN_CONFIG_PATH";
/// Environment variable overriding the backend origin.
pub const API_BASE_ENV: &str = "PROVADMIN_API_BASE";

/// Default filename for the JSON payload.
pub const CONFIG_FILE_NAME: &str = "config.json";
/// Backend origin used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8001";
/// Fixed key under which the admin bearer token is stored.
pub const DEFAULT_TOKEN_KEY: &str = "admin_token";

/// Hostnames allowed to use plain http.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// Error surfaced when reading or writing preferences fails.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// I/O failure (for example, permissions or missing directory).
    #[error("preferences I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("preferences serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The configured backend origin is unusable.
    #[error("invalid API base '{url}': {reason}")]
    InvalidApiBase { url: String, reason: String },
}

/// Persisted preference values.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesPayload {
    /// Backend origin, e.g. `https://admin.example.com`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Credential-store key holding the admin token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_key: Option<String>,
}

/// Thread-safe preferences store backed by a JSON file.
#[derive(Debug, Default)]
pub struct UserPreferences {
    path: PathBuf,
    payload: Mutex<PreferencesPayload>,
    persist_to_disk: bool,
}

impl UserPreferences {
    /// Load the store from the default path (or `PROVADMIN_CONFIG_PATH`).
    pub fn new() -> Result<Self, PreferencesError> {
        Self::at(default_preferences_path())
    }

    /// Load the store from an explicit path. A missing file yields defaults.
    pub fn at(path: PathBuf) -> Result<Self, PreferencesError> {
        let payload = load_payload(&path)?;
        Ok(Self {
            path,
            payload: Mutex::new(payload),
            persist_to_disk: true,
        })
    }

    /// Build an in-memory store used as a fallback when the config directory cannot be accessed.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            payload: Mutex::new(PreferencesPayload::default()),
            persist_to_disk: false,
        }
    }

    /// Path to the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> PreferencesPayload {
        self.payload.lock().expect("preferences lock poisoned").clone()
    }

    /// Backend origin: `PROVADMIN_API_BASE`, then the file, then the default.
    pub fn api_base(&self) -> String {
        env::var(API_BASE_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .or_else(|| self.snapshot().api_base)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }

    pub fn token_key(&self) -> String {
        self.snapshot()
            .token_key
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TOKEN_KEY.to_string())
    }

    /// Persist a new backend origin after validating it.
    pub fn set_api_base(&self, api_base: Option<String>) -> Result<(), PreferencesError> {
        if let Some(candidate) = api_base.as_deref() {
            validate_api_base(candidate)?;
        }
        let mut payload = self.payload.lock().expect("preferences lock poisoned");
        payload.api_base = api_base;
        if self.persist_to_disk {
            self.save_locked(&payload)?;
        }
        Ok(())
    }

    fn save_locked(&self, payload: &PreferencesPayload) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(payload)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

/// Validate that a backend origin is acceptable.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS
pub fn validate_api_base(base: &str) -> Result<(), PreferencesError> {
    let invalid = |reason: String| PreferencesError::InvalidApiBase {
        url: base.to_string(),
        reason,
    };
    let parsed = Url::parse(base).map_err(|error| invalid(error.to_string()))?;
    let host_name = parsed.host_str().ok_or_else(|| invalid("missing host".to_string()))?;

    if LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed))
    {
        return Ok(());
    }

    if parsed.scheme() != "https" {
        return Err(invalid(format!(
            "must use https for non-localhost hosts; got '{}://'",
            parsed.scheme()
        )));
    }
    Ok(())
}

fn default_preferences_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("provadmin")
        .join(CONFIG_FILE_NAME)
}

fn load_payload(path: &Path) -> Result<PreferencesPayload, PreferencesError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(payload) => Ok(payload),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse config file; using defaults"
                );
                Ok(PreferencesPayload::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(PreferencesPayload::default()),
        Err(error) => Err(PreferencesError::Io(error)),
    }
}
