use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{StatusCode, Url};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::endpoints::auth::RefreshToken;
use crate::endpoints::{Request, RequestData, Upload};
use crate::error::ApiError;
use crate::refresh::{SessionEvent, TokenRefresher};
use crate::store::{CredentialKey, CredentialStore, Credentials};

const JSON: &str = "application/json";
/// Stand-in body for `204 No Content` and empty 2xx responses.
const EMPTY_BODY: &[u8] = b"{}";

/// Status and fully read body of one attempt.
struct RawResponse {
    status: StatusCode,
    body: Vec<u8>,
}

/// HTTP client for the salon backend.
///
/// Owns the transport and a handle to the credential store. Every attempt reads
/// the access token from the store, so a refreshed token is picked up by all
/// requests without further coordination.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
    refresher: TokenRefresher,
}

impl Client {
    pub fn new(base_url: impl Into<String>, store: Arc<dyn CredentialStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            store,
            refresher: TokenRefresher::new(),
        }
    }

    /// Replace the transport, e.g. one configured with timeouts.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Receive [`SessionEvent::Expired`] whenever a refresh fails for good.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.refresher.subscribe()
    }

    /// Absolute URL for a backend path such as `/photos/{id}/thumbnail`.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// Send a request, recovering once from an authorization failure.
    ///
    /// A `401` on the first attempt of an authenticated request hands over to
    /// the refresh coordinator and, if it succeeds, the request is sent one more
    /// time with the new token. Whatever the second attempt returns is final.
    pub async fn send<R>(&self, request: R) -> Result<R::Output, ApiError>
    where
        R: Request,
    {
        let token = self.access_token::<R>()?;
        let response = self.dispatch(&request, token.as_deref()).await?;

        if !(R::AUTHENTICATED && response.status == StatusCode::UNAUTHORIZED) {
            return Self::complete::<R>(response);
        }

        tracing::debug!(endpoint = %request.endpoint(), "Unauthorized, refreshing credentials");
        self.refresher
            .refresh(self.store.as_ref(), token.as_deref(), |refresh_token| {
                self.exchange(refresh_token)
            })
            .await?;

        let Some(token) = self.access_token::<R>()? else {
            return Err(ApiError::SessionExpired);
        };
        let response = self.dispatch(&request, Some(&token)).await?;
        Self::complete::<R>(response)
    }

    /// Send a request exactly once, without refresh handling.
    pub async fn execute<R>(&self, request: &R) -> Result<R::Output, ApiError>
    where
        R: Request,
    {
        let token = self.access_token::<R>()?;
        let response = self.dispatch(request, token.as_deref()).await?;
        Self::complete::<R>(response)
    }

    async fn exchange(&self, refresh_token: String) -> Result<Credentials, ApiError> {
        self.execute(&RefreshToken::new(refresh_token)).await
    }

    fn access_token<R: Request>(&self) -> Result<Option<String>, ApiError> {
        if R::AUTHENTICATED {
            Ok(self.store.get(CredentialKey::AccessToken)?)
        } else {
            Ok(None)
        }
    }

    async fn dispatch<R>(&self, request: &R, token: Option<&str>) -> Result<RawResponse, ApiError>
    where
        R: Request,
    {
        let endpoint = request.endpoint();
        let url = self.url(&endpoint)?;

        let mut builder = self.http.request(R::METHOD, url);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        builder = match request.data() {
            RequestData::Empty => builder.header(CONTENT_TYPE, JSON),
            RequestData::Json(data) => {
                let body = serde_json::to_vec(data).map_err(|e| {
                    ApiError::Network(format!("failed to encode request body: {}", e))
                })?;
                builder.header(CONTENT_TYPE, JSON).body(body)
            }
            RequestData::Query(data) => builder.header(CONTENT_TYPE, JSON).query(data),
            RequestData::Multipart(upload) => builder.multipart(multipart_form(upload)?),
        };

        tracing::debug!(
            method = %R::METHOD,
            endpoint = %endpoint,
            authenticated = token.is_some(),
            "Sending request"
        );

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(endpoint = %endpoint, "Request failed: {}", e);
            ApiError::Network(e.to_string())
        })?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(endpoint = %endpoint, status = status.as_u16(), "Received response");
        Ok(RawResponse { status, body })
    }

    fn complete<R>(response: RawResponse) -> Result<R::Output, ApiError>
    where
        R: Request,
    {
        let status = response.status;

        if status.is_success() {
            let body: &[u8] = if status == StatusCode::NO_CONTENT || response.body.is_empty() {
                EMPTY_BODY
            } else {
                &response.body
            };
            let payload = R::decode(body).map_err(|e| {
                tracing::warn!("Failed to decode response: {}", e);
                ApiError::Decoding(e.to_string())
            })?;
            return R::output(payload);
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(ApiError::from_status(status.as_u16(), &response.body));
        }

        Err(ApiError::InvalidResponse)
    }
}

fn multipart_form(upload: Upload) -> Result<Form, ApiError> {
    let file = Part::bytes(upload.bytes)
        .file_name(upload.file_name)
        .mime_str(upload.mime)?;
    let form = upload
        .fields
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value));
    Ok(form.part(upload.file_field, file))
}

