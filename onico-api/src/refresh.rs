use std::future::Future;
use tokio::sync::{broadcast, Mutex};

use crate::error::ApiError;
use crate::store::{CredentialKey, CredentialStore, Credentials};

const EVENT_CAPACITY: usize = 16;

/// Broadcast to subscribers when the session can no longer be recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Expired,
}

/// Single-flight coordinator for exchanging the refresh token.
///
/// Only one exchange runs at a time. Callers that were rejected with a token
/// that has since been replaced skip the exchange and retry with the stored
/// token instead.
pub struct TokenRefresher {
    gate: Mutex<()>,
    events: broadcast::Sender<SessionEvent>,
}

impl TokenRefresher {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            gate: Mutex::new(()),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Recover from an authorization failure of a request that carried `stale`.
    ///
    /// `Ok(())` means the store now holds an access token worth retrying with.
    /// Any terminal failure clears the store, emits [`SessionEvent::Expired`]
    /// and returns [`ApiError::SessionExpired`].
    pub async fn refresh<F, Fut>(
        &self,
        store: &dyn CredentialStore,
        stale: Option<&str>,
        exchange: F,
    ) -> Result<(), ApiError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<Credentials, ApiError>>,
    {
        let _guard = self.gate.lock().await;

        let current = store.get(CredentialKey::AccessToken)?;
        match (stale, current.as_deref()) {
            (_, Some(current)) if Some(current) != stale => {
                tracing::debug!("Access token already replaced, retrying without refresh");
                return Ok(());
            }
            (Some(_), None) => {
                // Logged out, or a concurrent refresh already failed and signalled.
                tracing::debug!("Credentials cleared while waiting for refresh");
                return Err(ApiError::SessionExpired);
            }
            _ => {}
        }

        let Some(refresh_token) = store.get(CredentialKey::RefreshToken)? else {
            tracing::warn!("No refresh token stored, session expired");
            return Err(self.expire(store));
        };

        tracing::debug!("Exchanging refresh token");
        match exchange(refresh_token.clone()).await {
            Ok(next) => {
                if store.rotate(&refresh_token, &next)? {
                    tracing::info!("Access token refreshed");
                    Ok(())
                } else if store.get(CredentialKey::AccessToken)?.is_some() {
                    tracing::debug!("Credentials replaced during refresh, discarding new pair");
                    Ok(())
                } else {
                    tracing::info!("Logged out during refresh, discarding new pair");
                    Err(ApiError::SessionExpired)
                }
            }
            Err(e) => {
                tracing::warn!("Token refresh failed: {}", e);
                Err(self.expire(store))
            }
        }
    }

    fn expire(&self, store: &dyn CredentialStore) -> ApiError {
        if let Err(e) = store.clear() {
            tracing::error!("Failed to clear credentials: {}", e);
        }
        // No subscribers is not an error.
        let _ = self.events.send(SessionEvent::Expired);
        ApiError::SessionExpired
    }
}

impl Default for TokenRefresher {
    fn default() -> Self {
        Self::new()
    }
}
