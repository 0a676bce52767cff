pub mod appointments;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod expenses;
pub mod photos;
pub mod promotions;
pub mod services;
pub mod system;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;

use crate::error::ApiError;

pub use reqwest::Method;

/// Uniform wrapper around every JSON payload the backend returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub message: Option<String>,
}

/// Body of an outgoing request.
pub enum RequestData<T> {
    Empty,
    Json(T),
    Query(T),
    Multipart(Upload),
}

/// A multipart form carrying text fields and one file part.
///
/// Kept as plain data so the form can be rebuilt when a request is retried.
#[derive(Debug, Clone)]
pub struct Upload {
    pub fields: Vec<(&'static str, String)>,
    pub file_field: &'static str,
    pub file_name: &'static str,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn jpeg(file_field: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            fields: Vec::new(),
            file_field,
            file_name: "photo.jpg",
            mime: "image/jpeg",
            bytes,
        }
    }

    pub fn text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((name, value.into()));
        self
    }
}

/// A single backend operation: where it lives, how it is sent, and how its
/// payload becomes the caller's output.
pub trait Request {
    type Data: Serialize;
    type Response: DeserializeOwned;
    type Output;

    const METHOD: Method = Method::GET;
    const AUTHENTICATED: bool = true;

    fn endpoint(&self) -> Cow<'_, str>;

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }

    /// Decode a 2xx body. Most endpoints wrap their payload in an [`Envelope`].
    fn decode(body: &[u8]) -> Result<Option<Self::Response>, serde_json::Error> {
        serde_json::from_slice::<Envelope<Self::Response>>(body).map(|envelope| envelope.data)
    }

    /// Per-endpoint policy for a present or absent payload.
    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError>;
}

/// Single-entity endpoints treat a missing payload as a contract violation.
pub(crate) fn required<T>(payload: Option<T>) -> Result<T, ApiError> {
    payload.ok_or(ApiError::InvalidResponse)
}

/// List endpoints treat a missing payload as an empty list.
pub(crate) fn list<T>(payload: Option<Vec<T>>) -> Result<Vec<T>, ApiError> {
    Ok(payload.unwrap_or_default())
}

/// Treat an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Payload type for endpoints whose response body is ignored.
pub type Ignored = serde::de::IgnoredAny;

/// Placeholder body type for requests without data.
pub type NoData = ();

/// Money amounts travel as integer euro cents.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(i64);

impl Cents {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn inner(&self) -> i64 {
        self.0
    }

    pub fn as_euros(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for Cents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Cents> for i64 {
    fn from(value: Cents) -> Self {
        value.0
    }
}

impl std::ops::Add for Cents {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self(0), |acc, x| acc + x)
    }
}

impl std::fmt::Display for Cents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}€{}.{:02}", sign, abs / 100, abs % 100)
    }
}
