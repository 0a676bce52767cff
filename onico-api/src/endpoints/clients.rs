use super::appointments::Appointment;
use super::photos::Photo;
use super::{list, required, Ignored, Method, NoData, Request, RequestData};
use crate::error::ApiError;
use crate::macros::setter;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;

// Common

/// A customer of the salon (served under `/clients`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

impl Customer {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: None,
            email: None,
            notes: None,
        }
    }

    setter!(opt phone: String);
    setter!(opt email: String);
    setter!(opt notes: String);

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// Requests

#[derive(Default, Debug, Clone)]
pub struct ListClients;

impl Request for ListClients {
    type Data = NoData;
    type Response = Vec<Customer>;
    type Output = Vec<Customer>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/clients".into()
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        list(payload)
    }
}

#[derive(Debug, Clone)]
pub struct GetClient {
    id: Uuid,
}

impl GetClient {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl Request for GetClient {
    type Data = NoData;
    type Response = Customer;
    type Output = Customer;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/clients/{}", self.id).into()
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        required(payload)
    }
}

#[derive(Debug, Clone)]
pub struct CreateClient {
    client: Customer,
}

impl CreateClient {
    pub fn new(client: Customer) -> Self {
        Self { client }
    }
}

impl Request for CreateClient {
    type Data = Customer;
    type Response = Customer;
    type Output = Customer;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/clients".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.client)
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        required(payload)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateClient {
    id: Uuid,
    client: Customer,
}

impl UpdateClient {
    pub fn new(id: Uuid, client: Customer) -> Self {
        Self { id, client }
    }
}

impl Request for UpdateClient {
    type Data = Customer;
    type Response = Customer;
    type Output = Customer;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/clients/{}", self.id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.client)
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        required(payload)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteClient {
    id: Uuid,
}

impl DeleteClient {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl Request for DeleteClient {
    type Data = NoData;
    type Response = Ignored;
    type Output = ();
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/clients/{}", self.id).into()
    }

    fn output(_: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ListClientAppointments {
    id: Uuid,
}

impl ListClientAppointments {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl Request for ListClientAppointments {
    type Data = NoData;
    type Response = Vec<Appointment>;
    type Output = Vec<Appointment>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/clients/{}/appointments", self.id).into()
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        list(payload)
    }
}

#[derive(Debug, Clone)]
pub struct ListClientPhotos {
    id: Uuid,
}

impl ListClientPhotos {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl Request for ListClientPhotos {
    type Data = NoData;
    type Response = Vec<Photo>;
    type Output = Vec<Photo>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/clients/{}/photos", self.id).into()
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        list(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_customer_omits_id() {
        let customer = Customer::new("Giulia", "Rossi").phone("+39 333 1234567");
        let body = serde_json::to_value(&customer).unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["firstName"], "Giulia");
        assert_eq!(body["phone"], "+39 333 1234567");
        assert!(body["email"].is_null());
    }
}
