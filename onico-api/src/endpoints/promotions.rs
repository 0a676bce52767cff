use super::{list, required, Ignored, Method, NoData, Request, RequestData};
use crate::error::ApiError;
use crate::macros::setter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub discount_percent: f64,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub active: bool,
    pub client_ids: Option<Vec<Uuid>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Promotion {
    /// Active and within its date window at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        if !self.active {
            return false;
        }
        if self.start_date.is_some_and(|start| now < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| now > end) {
            return false;
        }
        true
    }

    pub fn applies_to(&self, client_id: Uuid) -> bool {
        match &self.client_ids {
            Some(ids) if !ids.is_empty() => ids.contains(&client_id),
            _ => true,
        }
    }
}

/// Fields a caller controls when creating or editing a promotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub discount_percent: f64,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ids: Option<Vec<Uuid>>,
}

impl PromotionDraft {
    pub fn new(name: impl Into<String>, discount_percent: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            discount_percent,
            start_date: None,
            end_date: None,
            active: true,
            client_ids: None,
        }
    }

    setter!(opt description: String);
    setter!(opt start_date: DateTime<Utc>);
    setter!(opt end_date: DateTime<Utc>);
    setter!(opt client_ids: Vec<Uuid>);
    setter!(active: bool);
}

impl From<&Promotion> for PromotionDraft {
    fn from(promotion: &Promotion) -> Self {
        Self {
            name: promotion.name.clone(),
            description: promotion.description.clone(),
            discount_percent: promotion.discount_percent,
            start_date: promotion.start_date,
            end_date: promotion.end_date,
            active: promotion.active,
            client_ids: promotion.client_ids.clone(),
        }
    }
}

// Requests

#[derive(Default, Debug, Clone)]
pub struct ListPromotions {
    active_only: bool,
}

impl ListPromotions {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(active_only: bool);
}

impl Request for ListPromotions {
    type Data = NoData;
    type Response = Vec<Promotion>;
    type Output = Vec<Promotion>;

    fn endpoint(&self) -> Cow<'_, str> {
        if self.active_only {
            "/promotions/active".into()
        } else {
            "/promotions".into()
        }
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        list(payload)
    }
}

#[derive(Debug, Clone)]
pub struct CreatePromotion {
    promotion: PromotionDraft,
}

impl CreatePromotion {
    pub fn new(promotion: PromotionDraft) -> Self {
        Self { promotion }
    }
}

impl Request for CreatePromotion {
    type Data = PromotionDraft;
    type Response = Promotion;
    type Output = Promotion;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/promotions".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.promotion)
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        required(payload)
    }
}

#[derive(Debug, Clone)]
pub struct UpdatePromotion {
    id: Uuid,
    promotion: PromotionDraft,
}

impl UpdatePromotion {
    pub fn new(id: Uuid, promotion: PromotionDraft) -> Self {
        Self { id, promotion }
    }
}

impl Request for UpdatePromotion {
    type Data = PromotionDraft;
    type Response = Promotion;
    type Output = Promotion;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/promotions/{}", self.id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.promotion)
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        required(payload)
    }
}

#[derive(Debug, Clone)]
pub struct DeletePromotion {
    id: Uuid,
}

impl DeletePromotion {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl Request for DeletePromotion {
    type Data = NoData;
    type Response = Ignored;
    type Output = ();
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/promotions/{}", self.id).into()
    }

    fn output(_: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        Ok(())
    }
}
