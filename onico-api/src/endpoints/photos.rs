use super::{list, required, Ignored, Method, NoData, Request, RequestData, Upload};
use crate::error::ApiError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt::Display;
use uuid::Uuid;

// Common

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoKind {
    Before,
    After,
    #[serde(other)]
    Other,
}

impl Display for PhotoKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Before => f.write_str("before"),
            Self::After => f.write_str("after"),
            Self::Other => f.write_str("other"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: Uuid,
    pub appointment_id: Uuid,
    #[serde(rename = "type")]
    pub kind: PhotoKind,
    pub created_at: DateTime<Utc>,
}

impl Photo {
    pub fn thumbnail_path(&self) -> String {
        format!("/photos/{}/thumbnail", self.id)
    }

    pub fn original_path(&self) -> String {
        format!("/photos/{}/view", self.id)
    }
}

// Requests

#[derive(Debug, Clone)]
pub struct ListAppointmentPhotos {
    appointment_id: Uuid,
}

impl ListAppointmentPhotos {
    pub fn new(appointment_id: Uuid) -> Self {
        Self { appointment_id }
    }
}

impl Request for ListAppointmentPhotos {
    type Data = NoData;
    type Response = Vec<Photo>;
    type Output = Vec<Photo>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/appointments/{}/photos", self.appointment_id).into()
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        list(payload)
    }
}

/// JPEG upload attached to an appointment.
#[derive(Debug, Clone)]
pub struct UploadPhoto {
    appointment_id: Uuid,
    kind: PhotoKind,
    image: Vec<u8>,
}

impl UploadPhoto {
    pub fn new(appointment_id: Uuid, kind: PhotoKind, image: Vec<u8>) -> Self {
        Self {
            appointment_id,
            kind,
            image,
        }
    }
}

impl Request for UploadPhoto {
    type Data = NoData;
    type Response = Photo;
    type Output = Photo;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/appointments/{}/photos", self.appointment_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Multipart(
            Upload::jpeg("image", self.image.clone())
                .text("appointmentId", self.appointment_id.to_string())
                .text("type", self.kind.to_string()),
        )
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        required(payload)
    }
}

#[derive(Debug, Clone)]
pub struct DeletePhoto {
    id: Uuid,
}

impl DeletePhoto {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl Request for DeletePhoto {
    type Data = NoData;
    type Response = Ignored;
    type Output = ();
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/photos/{}", self.id).into()
    }

    fn output(_: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        Ok(())
    }
}
