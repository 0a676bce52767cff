use super::{list, required, Cents, Ignored, Method, NoData, Request, RequestData};
use crate::error::ApiError;
use crate::macros::setter;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;

// Common

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub price: Cents,
    /// Minutes
    pub duration: u32,
    pub active: bool,
}

impl Service {
    pub fn new(name: impl Into<String>, price: impl Into<Cents>, duration: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            price: price.into(),
            duration,
            active: true,
        }
    }

    setter!(opt description: String);
    setter!(active: bool);

    pub fn formatted_duration(&self) -> String {
        let (hours, minutes) = (self.duration / 60, self.duration % 60);
        match (hours, minutes) {
            (0, m) => format!("{} min", m),
            (h, 0) => format!("{}h", h),
            (h, m) => format!("{}h {}min", h, m),
        }
    }
}

// Requests

#[derive(Default, Debug, Clone)]
pub struct ListServices;

impl Request for ListServices {
    type Data = NoData;
    type Response = Vec<Service>;
    type Output = Vec<Service>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/services".into()
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        list(payload)
    }
}

#[derive(Debug, Clone)]
pub struct CreateService {
    service: Service,
}

impl CreateService {
    pub fn new(service: Service) -> Self {
        Self { service }
    }
}

impl Request for CreateService {
    type Data = Service;
    type Response = Service;
    type Output = Service;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/services".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.service)
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        required(payload)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateService {
    id: Uuid,
    service: Service,
}

impl UpdateService {
    pub fn new(id: Uuid, service: Service) -> Self {
        Self { id, service }
    }
}

impl Request for UpdateService {
    type Data = Service;
    type Response = Service;
    type Output = Service;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/services/{}", self.id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.service)
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        required(payload)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteService {
    id: Uuid,
}

impl DeleteService {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl Request for DeleteService {
    type Data = NoData;
    type Response = Ignored;
    type Output = ();
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/services/{}", self.id).into()
    }

    fn output(_: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_formatting() {
        assert_eq!(Service::new("Manicure", Cents::new(2500), 45).formatted_duration(), "45 min");
        assert_eq!(Service::new("Gel", Cents::new(4000), 60).formatted_duration(), "1h");
        assert_eq!(Service::new("Refill", Cents::new(5500), 95).formatted_duration(), "1h 35min");
    }
}
