use crate::error::AuthError;
use onico_api::{CredentialKey, CredentialStore, Credentials, StoreError};
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

type Entries = BTreeMap<String, String>;

/// Credential store backed by a JSON file readable only by the current user.
pub struct FileCredentialStore {
    token_path: PathBuf,
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new() -> Result<Self, AuthError> {
        let cache_dir = Self::get_cache_dir()?;
        Self::at(cache_dir.join("credentials.json"))
    }

    /// Store credentials at an explicit location.
    pub fn at(token_path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let token_path = token_path.into();

        // Create cache directory if it doesn't exist
        if let Some(parent) = token_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    AuthError::Configuration(format!("Failed to create cache directory: {}", e))
                })?;
            }
        }

        Ok(Self {
            token_path,
            lock: Mutex::new(()),
        })
    }

    fn get_cache_dir() -> Result<PathBuf, AuthError> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| AuthError::Configuration("Could not find cache directory".into()))?
            .join("onicotech");
        Ok(cache_dir)
    }

    pub fn path(&self) -> &Path {
        &self.token_path
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.lock.lock().map_err(|_| StoreError::Poisoned)
    }

    fn read(&self) -> Result<Entries, StoreError> {
        if !self.token_path.exists() {
            return Ok(Entries::new());
        }

        let json = fs::read_to_string(&self.token_path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn write(&self, entries: &Entries) -> Result<(), StoreError> {
        if entries.is_empty() {
            if self.token_path.exists() {
                fs::remove_file(&self.token_path)?;
            }
            return Ok(());
        }

        let json = serde_json::to_string_pretty(entries)?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        // Owner read/write only, from the moment the file exists
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.token_path)?;

        // `mode` only applies on creation; tighten files left by older runs
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }

        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

fn insert_pair(entries: &mut Entries, credentials: &Credentials) {
    for key in CredentialKey::ALL {
        entries.insert(key.as_str().to_string(), credentials.get(key).to_string());
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: CredentialKey) -> Result<Option<String>, StoreError> {
        let _guard = self.guard()?;
        Ok(self.read()?.remove(key.as_str()))
    }

    fn set(&self, key: CredentialKey, value: &str) -> Result<(), StoreError> {
        let _guard = self.guard()?;
        let mut entries = self.read()?;
        entries.insert(key.as_str().to_string(), value.to_string());
        self.write(&entries)
    }

    fn remove(&self, key: CredentialKey) -> Result<(), StoreError> {
        let _guard = self.guard()?;
        let mut entries = self.read()?;
        if entries.remove(key.as_str()).is_some() {
            self.write(&entries)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<Option<Credentials>, StoreError> {
        let _guard = self.guard()?;
        let mut entries = self.read()?;
        let access = entries.remove(CredentialKey::AccessToken.as_str());
        let refresh = entries.remove(CredentialKey::RefreshToken.as_str());
        Ok(access.zip(refresh).map(|(a, r)| Credentials::new(a, r)))
    }

    fn save(&self, credentials: &Credentials) -> Result<(), StoreError> {
        let _guard = self.guard()?;
        let mut entries = self.read()?;
        insert_pair(&mut entries, credentials);
        self.write(&entries)
    }

    fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.guard()?;
        let mut entries = self.read().unwrap_or_default();
        for key in CredentialKey::ALL {
            entries.remove(key.as_str());
        }
        self.write(&entries)
    }

    fn rotate(&self, previous_refresh: &str, next: &Credentials) -> Result<bool, StoreError> {
        let _guard = self.guard()?;
        let mut entries = self.read()?;
        if entries.get(CredentialKey::RefreshToken.as_str()).map(String::as_str)
            != Some(previous_refresh)
        {
            return Ok(false);
        }
        insert_pair(&mut entries, next);
        self.write(&entries)?;
        Ok(true)
    }
}
