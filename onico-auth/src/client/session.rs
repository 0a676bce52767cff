use crate::error::AuthError;
use onico_api::endpoints::auth::{AuthResponse, UserProfile};
use onico_api::{ApiError, Client, CredentialKey, CredentialStore, Request, SessionEvent};
use secrecy::SecretString;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Snapshot published to session observers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub is_authenticated: bool,
    pub current_user: Option<UserProfile>,
}

/// Observable authentication state on top of a [`Client`].
///
/// The credentials themselves live in the client's store; this type only
/// tracks whether they exist and who they belong to.
pub struct Session {
    client: Arc<Client>,
    state: watch::Sender<SessionState>,
}

impl Session {
    /// Stored credentials are trusted optimistically until
    /// [`initialize`](Self::initialize) has checked them.
    pub fn new(client: Arc<Client>) -> Self {
        let is_authenticated = match client.credentials().get(CredentialKey::AccessToken) {
            Ok(token) => token.is_some(),
            Err(e) => {
                tracing::warn!("Failed to read stored credentials: {}", e);
                false
            }
        };

        let (state, _) = watch::channel(SessionState {
            is_authenticated,
            current_user: None,
        });
        Self { client, state }
    }

    pub fn client(&self) -> &Arc<Client> {
        &self.client
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.state.borrow().current_user.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Load the profile for restored credentials, logging out if that fails.
    pub async fn initialize(&self) {
        if !self.is_authenticated() {
            return;
        }

        match self.refresh_profile().await {
            Ok(user) => tracing::info!(user = %user.id, "Session restored"),
            Err(e) => {
                tracing::warn!("Failed to restore session: {}", e);
                self.logout();
            }
        }
    }

    /// Log out whenever the client reports that the session expired.
    ///
    /// The spawned task does not keep the session alive and ends once the
    /// session is dropped.
    pub fn watch_expiry(self: &Arc<Self>) -> JoinHandle<()> {
        let mut events = self.client.subscribe();
        let session = Arc::downgrade(self);

        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(SessionEvent::Expired) => {
                        let Some(session) = session.upgrade() else {
                            break;
                        };
                        tracing::warn!("Session expired, logging out");
                        session.logout();
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "Session events lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    pub async fn login(
        &self,
        email: impl Into<String>,
        password: SecretString,
    ) -> Result<UserProfile, AuthError> {
        let response = self
            .client
            .send(Request::auth().login(email, password))
            .await?;
        self.sign_in(response)
    }

    pub async fn register(
        &self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: SecretString,
    ) -> Result<UserProfile, AuthError> {
        let response = self
            .client
            .send(Request::auth().register(first_name, last_name, email, password))
            .await?;
        self.sign_in(response)
    }

    /// Forget the credentials and reset the published state. Safe to repeat.
    pub fn logout(&self) {
        if let Err(e) = self.client.credentials().clear() {
            tracing::warn!("Failed to clear stored credentials: {}", e);
        }

        let was_authenticated = self.state.send_replace(SessionState::default()).is_authenticated;
        if was_authenticated {
            tracing::info!("Logged out");
        }
    }

    /// Only a session that is still authenticated when the profile arrives
    /// is updated; a logout during the fetch wins.
    pub async fn refresh_profile(&self) -> Result<UserProfile, AuthError> {
        let user = self.client.send(Request::auth().profile()).await?;

        let updated = self.state.send_if_modified(|state| {
            if !state.is_authenticated {
                return false;
            }
            state.current_user = Some(user.clone());
            true
        });
        if !updated {
            tracing::debug!("Logged out while loading the profile");
            return Err(ApiError::SessionExpired.into());
        }
        Ok(user)
    }

    fn sign_in(&self, response: AuthResponse) -> Result<UserProfile, AuthError> {
        self.client.credentials().save(&response.credentials())?;
        tracing::info!(user = %response.user.id, "Signed in");

        self.state.send_replace(SessionState {
            is_authenticated: true,
            current_user: Some(response.user.clone()),
        });
        Ok(response.user)
    }
}
