use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

/// The two values the session persists between launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    AccessToken,
    RefreshToken,
}

impl CredentialKey {
    pub const ALL: [CredentialKey; 2] = [CredentialKey::AccessToken, CredentialKey::RefreshToken];

    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKey::AccessToken => "accessToken",
            CredentialKey::RefreshToken => "refreshToken",
        }
    }
}

/// Access/refresh token pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    pub fn get(&self, key: CredentialKey) -> &str {
        match key {
            CredentialKey::AccessToken => &self.access_token,
            CredentialKey::RefreshToken => &self.refresh_token,
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Credential store lock poisoned")]
    Poisoned,
}

/// Durable key-value storage for the session's tokens.
///
/// Implementations must serialize their own reads and writes. The pair helpers
/// (`save`, `clear`, `rotate`) have non-atomic default implementations built on
/// the single-key operations; stores that can do better should override them so
/// a reader never observes half of a replaced pair.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: CredentialKey) -> Result<Option<String>, StoreError>;

    fn set(&self, key: CredentialKey, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: CredentialKey) -> Result<(), StoreError>;

    /// Both tokens, or `None` if either one is missing.
    fn load(&self) -> Result<Option<Credentials>, StoreError> {
        let access = self.get(CredentialKey::AccessToken)?;
        let refresh = self.get(CredentialKey::RefreshToken)?;
        Ok(access.zip(refresh).map(|(a, r)| Credentials::new(a, r)))
    }

    fn save(&self, credentials: &Credentials) -> Result<(), StoreError> {
        for key in CredentialKey::ALL {
            self.set(key, credentials.get(key))?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        for key in CredentialKey::ALL {
            self.remove(key)?;
        }
        Ok(())
    }

    /// Replace the stored pair only if the stored refresh token is still
    /// `previous_refresh`. Returns whether the replacement happened.
    fn rotate(&self, previous_refresh: &str, next: &Credentials) -> Result<bool, StoreError> {
        if self.get(CredentialKey::RefreshToken)?.as_deref() != Some(previous_refresh) {
            return Ok(false);
        }
        self.save(next)?;
        Ok(true)
    }
}

/// Process-local credential store.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    values: Mutex<HashMap<CredentialKey, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: &Credentials) -> Self {
        let values = CredentialKey::ALL
            .into_iter()
            .map(|key| (key, credentials.get(key).to_string()))
            .collect();
        Self {
            values: Mutex::new(values),
        }
    }

    fn values(&self) -> Result<MutexGuard<'_, HashMap<CredentialKey, String>>, StoreError> {
        self.values.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: CredentialKey) -> Result<Option<String>, StoreError> {
        Ok(self.values()?.get(&key).cloned())
    }

    fn set(&self, key: CredentialKey, value: &str) -> Result<(), StoreError> {
        self.values()?.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: CredentialKey) -> Result<(), StoreError> {
        self.values()?.remove(&key);
        Ok(())
    }

    fn save(&self, credentials: &Credentials) -> Result<(), StoreError> {
        let mut values = self.values()?;
        for key in CredentialKey::ALL {
            values.insert(key, credentials.get(key).to_string());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.values()?.clear();
        Ok(())
    }

    fn rotate(&self, previous_refresh: &str, next: &Credentials) -> Result<bool, StoreError> {
        let mut values = self.values()?;
        if values.get(&CredentialKey::RefreshToken).map(String::as_str) != Some(previous_refresh) {
            return Ok(false);
        }
        for key in CredentialKey::ALL {
            values.insert(key, next.get(key).to_string());
        }
        Ok(true)
    }
}
