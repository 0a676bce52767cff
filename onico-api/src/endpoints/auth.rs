use super::{required, Method, NoData, Request, RequestData};
use crate::error::ApiError;
use crate::store::Credentials;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use uuid::Uuid;

// Common

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn expose<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}

// Requests

#[derive(Debug, Serialize)]
pub struct Login {
    email: String,
    #[serde(serialize_with = "expose")]
    password: SecretString,
}

impl Login {
    pub fn new(email: impl Into<String>, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }
}

impl Request for Login {
    type Data = Self;
    type Response = AuthResponse;
    type Output = AuthResponse;
    const METHOD: Method = Method::POST;
    const AUTHENTICATED: bool = false;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/login".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }

    fn decode(body: &[u8]) -> Result<Option<Self::Response>, serde_json::Error> {
        serde_json::from_slice(body).map(Some)
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        required(payload)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Register {
    first_name: String,
    last_name: String,
    email: String,
    #[serde(serialize_with = "expose")]
    password: SecretString,
}

impl Register {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password,
        }
    }
}

impl Request for Register {
    type Data = Self;
    type Response = AuthResponse;
    type Output = AuthResponse;
    const METHOD: Method = Method::POST;
    const AUTHENTICATED: bool = false;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/register".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }

    fn decode(body: &[u8]) -> Result<Option<Self::Response>, serde_json::Error> {
        serde_json::from_slice(body).map(Some)
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        required(payload)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshToken {
    refresh_token: String,
}

impl RefreshToken {
    pub fn new(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: refresh_token.into(),
        }
    }
}

impl Request for RefreshToken {
    type Data = Self;
    type Response = TokenResponse;
    type Output = Credentials;
    const METHOD: Method = Method::POST;
    const AUTHENTICATED: bool = false;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/refresh".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }

    fn decode(body: &[u8]) -> Result<Option<Self::Response>, serde_json::Error> {
        serde_json::from_slice(body).map(Some)
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        required(payload).map(Credentials::from)
    }
}

#[derive(Default, Debug, Clone)]
pub struct GetProfile;

impl Request for GetProfile {
    type Data = NoData;
    type Response = UserProfile;
    type Output = UserProfile;

    fn endpoint(&self) -> Cow<'_, str> {
        "/me".into()
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        required(payload)
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

impl AuthResponse {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.token, &self.refresh_token)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub refresh_token: String,
}

impl From<TokenResponse> for Credentials {
    fn from(tokens: TokenResponse) -> Self {
        Credentials::new(tokens.token, tokens.refresh_token)
    }
}
