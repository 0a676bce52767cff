use super::clients::Customer;
use super::services::Service;
use super::{list, required, Cents, Ignored, Method, NoData, Request, RequestData};
use crate::error::ApiError;
use crate::macros::setter;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;

// Common

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Cancelled,
    Rescheduled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Option<Uuid>,
    pub date: NaiveDate,
    /// `HH:MM`
    pub start_time: String,
    pub end_time: Option<String>,
    pub client_id: Uuid,
    pub client: Option<Customer>,
    pub services: Option<Vec<Service>>,
    pub service_ids: Option<Vec<Uuid>>,
    pub total_price: Option<Cents>,
    pub notes: Option<String>,
    pub status: Option<AppointmentStatus>,
}

impl Appointment {
    pub fn time_range(&self) -> String {
        match &self.end_time {
            Some(end) => format!("{} - {}", self.start_time, end),
            None => self.start_time.clone(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == Some(AppointmentStatus::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub date: NaiveDate,
    pub start_time: String,
    pub client_id: Uuid,
    pub service_ids: Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewAppointment {
    pub fn new(
        date: NaiveDate,
        start_time: impl Into<String>,
        client_id: Uuid,
        service_ids: Vec<Uuid>,
    ) -> Self {
        Self {
            date,
            start_time: start_time.into(),
            client_id,
            service_ids,
            notes: None,
        }
    }

    setter!(opt notes: String);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentUpdate {
    pub date: NaiveDate,
    pub start_time: String,
    pub client_id: Uuid,
    pub service_ids: Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: AppointmentStatus,
}

impl AppointmentUpdate {
    pub fn from_new(appointment: NewAppointment, status: AppointmentStatus) -> Self {
        Self {
            date: appointment.date,
            start_time: appointment.start_time,
            client_id: appointment.client_id,
            service_ids: appointment.service_ids,
            notes: appointment.notes,
            status,
        }
    }

    setter!(opt notes: String);
    setter!(status: AppointmentStatus);
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListAppointments {
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
}

impl ListAppointments {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt date: NaiveDate);
}

impl Request for ListAppointments {
    type Data = Self;
    type Response = Vec<Appointment>;
    type Output = Vec<Appointment>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/appointments".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        if self.date.is_some() {
            RequestData::Query(self)
        } else {
            RequestData::Empty
        }
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        list(payload)
    }
}

#[derive(Debug, Clone)]
pub struct GetAppointment {
    id: Uuid,
}

impl GetAppointment {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl Request for GetAppointment {
    type Data = NoData;
    type Response = Appointment;
    type Output = Appointment;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/appointments/{}", self.id).into()
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        required(payload)
    }
}

#[derive(Debug, Clone)]
pub struct CreateAppointment {
    appointment: NewAppointment,
}

impl CreateAppointment {
    pub fn new(appointment: NewAppointment) -> Self {
        Self { appointment }
    }
}

impl Request for CreateAppointment {
    type Data = NewAppointment;
    type Response = Appointment;
    type Output = Appointment;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/appointments".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.appointment)
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        required(payload)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateAppointment {
    id: Uuid,
    appointment: AppointmentUpdate,
}

impl UpdateAppointment {
    pub fn new(id: Uuid, appointment: AppointmentUpdate) -> Self {
        Self { id, appointment }
    }
}

impl Request for UpdateAppointment {
    type Data = AppointmentUpdate;
    type Response = Appointment;
    type Output = Appointment;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/appointments/{}", self.id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.appointment)
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        required(payload)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteAppointment {
    id: Uuid,
}

impl DeleteAppointment {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl Request for DeleteAppointment {
    type Data = NoData;
    type Response = Ignored;
    type Output = ();
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/appointments/{}", self.id).into()
    }

    fn output(_: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_decodes_with_nested_client() {
        let json = r#"{
            "id": "a3b1f0e2-1111-4c1e-9a0e-2b5b1c4f7d10",
            "date": "2026-03-14",
            "startTime": "09:30",
            "endTime": "10:15",
            "clientId": "6f1c2a34-8a55-4e2f-9a61-0c7d8f1b2e3a",
            "client": {
                "id": "6f1c2a34-8a55-4e2f-9a61-0c7d8f1b2e3a",
                "firstName": "Giulia",
                "lastName": "Rossi",
                "phone": null,
                "email": null,
                "notes": null
            },
            "services": null,
            "serviceIds": [],
            "totalPrice": 4500,
            "notes": null,
            "status": "rescheduled"
        }"#;
        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appointment.time_range(), "09:30 - 10:15");
        assert_eq!(appointment.total_price, Some(Cents::new(4500)));
        assert_eq!(appointment.status, Some(AppointmentStatus::Rescheduled));
        assert!(!appointment.is_cancelled());
    }

    #[test]
    fn update_carries_status() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let new = NewAppointment::new(date, "09:30", Uuid::nil(), vec![]);
        let update = AppointmentUpdate::from_new(new, AppointmentStatus::Scheduled)
            .status(AppointmentStatus::Cancelled);
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body["status"], "cancelled");
        assert_eq!(body["date"], "2026-03-14");
        assert!(body.get("notes").is_none());
    }
}
