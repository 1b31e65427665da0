//! Resolution and storage of the admin bearer token.
//!
//! The token is looked up once at start-up and handed to the API client as an
//! explicit session; nothing reads it again from ambient storage afterwards.

use thiserror::Error;
use tracing::debug;

static SERVICE: &str = "provadmin";

/// Environment variable consulted before any credential store.
pub const TOKEN_ENV_VAR: &str = "PROVADMIN_TOKEN";
/// Environment variable used to select the secret storage backend.
pub const SECRETS_BACKEND_ENV_VAR: &str = "PROVADMIN_SECRETS_BACKEND";

/// Secret storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretsBackend {
    /// Store the token in the OS keychain (`keyring-rs`).
    Keychain,
    /// Read the token from the process environment variable named after the key.
    Environment,
}

impl SecretsBackend {
    fn from_env_var(raw: Option<String>) -> Self {
        match raw.unwrap_or_default().trim().to_ascii_lowercase().as_str() {
            "env" => Self::Environment,
            _ => Self::Keychain,
        }
    }
}

/// Determine the currently configured secrets backend.
pub fn secrets_backend() -> SecretsBackend {
    let configured_value = std::env::var(SECRETS_BACKEND_ENV_VAR).ok();
    SecretsBackend::from_env_var(configured_value)
}

/// Errors raised by the credential store.
#[derive(Debug, Error, Clone)]
pub enum CredentialError {
    #[error("Keyring error for {name}: {error}")]
    KeyringError { name: String, error: String },

    #[error("Credential store for {name} is read-only with the environment backend")]
    ReadOnly { name: String },
}

/// Handle on the stored admin token under a fixed key.
#[derive(Debug, Clone)]
pub struct TokenStore {
    key: String,
    backend: SecretsBackend,
}

impl TokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_backend(key, secrets_backend())
    }

    pub fn with_backend(key: impl Into<String>, backend: SecretsBackend) -> Self {
        Self {
            key: key.into(),
            backend,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Resolve the token: `PROVADMIN_TOKEN` first, then the configured backend.
    ///
    /// A missing entry is not an error; the caller proceeds without credentials
    /// and lets the backend reject the request.
    pub fn resolve(&self) -> Result<Option<String>, CredentialError> {
        if let Some(token) = non_empty_env(TOKEN_ENV_VAR) {
            debug!("Resolved admin token from {} -> [REDACTED]", TOKEN_ENV_VAR);
            return Ok(Some(token));
        }
        match self.backend {
            SecretsBackend::Environment => Ok(non_empty_env(&self.env_name())),
            SecretsBackend::Keychain => {
                let entry = self.entry()?;
                match entry.get_password() {
                    Ok(token) => {
                        debug!("Resolved admin token from keychain: {} -> [REDACTED]", self.key);
                        Ok(Some(token).filter(|token| !token.trim().is_empty()))
                    }
                    Err(keyring::Error::NoEntry) => Ok(None),
                    Err(error) => Err(self.keyring_error(error)),
                }
            }
        }
    }

    /// Store a token in the OS keychain.
    pub fn save(&self, token: &str) -> Result<(), CredentialError> {
        if self.backend == SecretsBackend::Environment {
            return Err(CredentialError::ReadOnly { name: self.key.clone() });
        }
        self.entry()?
            .set_password(token)
            .map_err(|error| self.keyring_error(error))?;
        debug!("Stored admin token in keychain: {}", self.key);
        Ok(())
    }

    /// Remove the token from the OS keychain. Removing a missing entry succeeds.
    pub fn clear(&self) -> Result<(), CredentialError> {
        if self.backend == SecretsBackend::Environment {
            return Err(CredentialError::ReadOnly { name: self.key.clone() });
        }
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => {
                debug!("Removed admin token from keychain: {}", self.key);
                Ok(())
            }
            Err(error) => Err(self.keyring_error(error)),
        }
    }

    /// Environment variable read by the environment backend (`admin_token` -> `ADMIN_TOKEN`).
    fn env_name(&self) -> String {
        self.key.to_ascii_uppercase().replace('-', "_")
    }

    fn entry(&self) -> Result<keyring::Entry, CredentialError> {
        keyring::Entry::new(SERVICE, &self.key).map_err(|error| self.keyring_error(error))
    }

    fn keyring_error(&self, error: keyring::Error) -> CredentialError {
        CredentialError::KeyringError {
            name: self.key.clone(),
            error: error.to_string(),
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_backend_defaults_to_keychain_when_env_var_is_missing() {
        temp_env::with_var(SECRETS_BACKEND_ENV_VAR, None::<&str>, || {
            assert_eq!(secrets_backend(), SecretsBackend::Keychain);
        });
    }

    #[test]
    fn secrets_backend_uses_environment_when_configured() {
        temp_env::with_var(SECRETS_BACKEND_ENV_VAR, Some("env"), || {
            assert_eq!(secrets_backend(), SecretsBackend::Environment);
        });
    }

    #[test]
    fn token_env_var_wins_over_backend() {
        temp_env::with_vars(
            [(TOKEN_ENV_VAR, Some("from-env")), ("ADMIN_TOKEN", Some("from-key"))],
            || {
                let store = TokenStore::with_backend("admin_token", SecretsBackend::Environment);
                assert_eq!(store.resolve().expect("resolve").as_deref(), Some("from-env"));
            },
        );
    }

    #[test]
    fn environment_backend_reads_upper_cased_key() {
        temp_env::with_vars([(TOKEN_ENV_VAR, None::<&str>), ("ADMIN_TOKEN", Some("abc"))], || {
            let store = TokenStore::with_backend("admin_token", SecretsBackend::Environment);
            assert_eq!(store.resolve().expect("resolve").as_deref(), Some("abc"));
        });
    }

    #[test]
    fn missing_token_is_not_an_error() {
        temp_env::with_vars([(TOKEN_ENV_VAR, None::<&str>), ("ADMIN_TOKEN", None)], || {
            let store = TokenStore::with_backend("admin_token", SecretsBackend::Environment);
            assert_eq!(store.resolve().expect("resolve"), None);
        });
    }

    #[test]
    fn environment_backend_is_read_only() {
        let store = TokenStore::with_backend("admin_token", SecretsBackend::Environment);
        assert!(matches!(store.save("x"), Err(CredentialError::ReadOnly { .. })));
        assert!(matches!(store.clear(), Err(CredentialError::ReadOnly { .. })));
    }
}
