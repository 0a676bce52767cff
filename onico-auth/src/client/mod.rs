mod config;
mod session;
mod token_storage;

pub use config::Settings;
pub use session::{Session, SessionState};
pub use token_storage::FileCredentialStore;

use crate::error::AuthError;
use onico_api::Client;
use std::sync::Arc;
use std::time::Duration;

/// Build the API client described by `settings`, backed by the credentials
/// file so a previous session is picked up.
pub fn connect(settings: &Settings) -> Result<Client, AuthError> {
    settings.validate().map_err(AuthError::Configuration)?;

    let store = match &settings.credentials_path {
        Some(path) => FileCredentialStore::at(path)?,
        None => FileCredentialStore::new()?,
    };
    tracing::debug!(path = %store.path().display(), "Using credentials file");

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()
        .map_err(|e| AuthError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Client::new(settings.base_url.clone(), Arc::new(store)).with_http_client(http))
}
