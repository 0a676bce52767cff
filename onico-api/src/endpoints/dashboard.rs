use super::appointments::Appointment;
use super::{null_as_default, required, Cents, NoData, Request};
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;

// Common

/// Home-screen summary; every counter defaults to zero when the backend omits it.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub next_appointments: Vec<Appointment>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_clients: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub new_clients_this_month: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub monthly_earnings: Cents,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub top_spenders: Vec<TopSpender>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub top_services: Vec<TopService>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub monthly_revenue: Vec<MonthlyRevenue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub flop_spenders: Vec<TopSpender>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub flop_services: Vec<TopService>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unreliable_clients: Vec<UnreliableClient>,
}

impl AdvancedStats {
    pub fn is_empty(&self) -> bool {
        self.top_spenders.is_empty()
            && self.top_services.is_empty()
            && self.monthly_revenue.is_empty()
            && self.flop_spenders.is_empty()
            && self.flop_services.is_empty()
            && self.unreliable_clients.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopSpender {
    pub id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    /// Cents
    pub total_spend: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopService {
    pub id: Option<Uuid>,
    pub name: String,
    pub usage_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenue {
    /// `YYYY-MM`
    pub month: String,
    /// Cents
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreliableClient {
    pub id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub count: u32,
}

// Requests

#[derive(Default, Debug, Clone)]
pub struct GetDashboard;

impl Request for GetDashboard {
    type Data = NoData;
    type Response = DashboardData;
    type Output = DashboardData;

    fn endpoint(&self) -> Cow<'_, str> {
        "/dashboard".into()
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        required(payload)
    }
}

#[derive(Default, Debug, Clone)]
pub struct GetStats;

impl Request for GetStats {
    type Data = NoData;
    type Response = AdvancedStats;
    type Output = AdvancedStats;

    fn endpoint(&self) -> Cow<'_, str> {
        "/dashboard/stats".into()
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        required(payload)
    }
}
