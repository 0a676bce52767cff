use super::{list, required, Cents, Ignored, Method, NoData, Request, RequestData, Upload};
use crate::error::ApiError;
use crate::macros::setter;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;

// Common

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Rent,
    Products,
    Equipment,
    Utilities,
    Marketing,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePhoto {
    pub id: Uuid,
    pub expense_id: Uuid,
    pub created_at: Option<String>,
}

impl ExpensePhoto {
    pub fn thumbnail_path(&self) -> String {
        format!("/expense-photos/{}/thumbnail", self.id)
    }

    pub fn original_path(&self) -> String {
        format!("/expense-photos/{}/view", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub description: String,
    pub amount: Cents,
    pub category: ExpenseCategory,
    pub payment_method: PaymentMethod,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_recurring: bool,
    pub notes: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub photos: Vec<ExpensePhoto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Expense {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<Cents>,
        category: ExpenseCategory,
        payment_method: PaymentMethod,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            description: description.into(),
            amount: amount.into(),
            category,
            payment_method,
            date,
            is_recurring: false,
            notes: None,
            photos: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    setter!(is_recurring: bool);
    setter!(opt notes: String);
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListExpenses {
    /// `YYYY-MM`
    #[serde(skip_serializing_if = "Option::is_none")]
    month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<ExpenseCategory>,
}

impl ListExpenses {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt month: String);
    setter!(opt category: ExpenseCategory);
}

impl Request for ListExpenses {
    type Data = Self;
    type Response = Vec<Expense>;
    type Output = Vec<Expense>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/expenses".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        if self.month.is_some() || self.category.is_some() {
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
pub struct GetExpense {
    id: Uuid,
}

impl GetExpense {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl Request for GetExpense {
    type Data = NoData;
    type Response = Expense;
    type Output = Expense;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/expenses/{}", self.id).into()
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        required(payload)
    }
}

#[derive(Debug, Clone)]
pub struct CreateExpense {
    expense: Expense,
}

impl CreateExpense {
    pub fn new(expense: Expense) -> Self {
        Self { expense }
    }
}

impl Request for CreateExpense {
    type Data = Expense;
    type Response = Expense;
    type Output = Expense;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/expenses".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.expense)
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        required(payload)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateExpense {
    id: Uuid,
    expense: Expense,
}

impl UpdateExpense {
    pub fn new(id: Uuid, expense: Expense) -> Self {
        Self { id, expense }
    }
}

impl Request for UpdateExpense {
    type Data = Expense;
    type Response = Expense;
    type Output = Expense;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/expenses/{}", self.id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.expense)
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        required(payload)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteExpense {
    id: Uuid,
}

impl DeleteExpense {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl Request for DeleteExpense {
    type Data = NoData;
    type Response = Ignored;
    type Output = ();
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/expenses/{}", self.id).into()
    }

    fn output(_: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        Ok(())
    }
}

/// Receipt photo attached to an expense.
#[derive(Debug, Clone)]
pub struct UploadExpensePhoto {
    expense_id: Uuid,
    image: Vec<u8>,
}

impl UploadExpensePhoto {
    pub fn new(expense_id: Uuid, image: Vec<u8>) -> Self {
        Self { expense_id, image }
    }
}

impl Request for UploadExpensePhoto {
    type Data = NoData;
    type Response = ExpensePhoto;
    type Output = ExpensePhoto;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/expenses/{}/photos", self.expense_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Multipart(
            Upload::jpeg("image", self.image.clone())
                .text("expenseId", self.expense_id.to_string()),
        )
    }

    fn output(payload: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        required(payload)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteExpensePhoto {
    id: Uuid,
}

impl DeleteExpensePhoto {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl Request for DeleteExpensePhoto {
    type Data = NoData;
    type Response = Ignored;
    type Output = ();
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/expense-photos/{}", self.id).into()
    }

    fn output(_: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_photos_decode_as_empty() {
        let json = r#"{
            "id": "e1e1f0e2-3333-4c1e-9a0e-2b5b1c4f7d10",
            "description": "Gel polish restock",
            "amount": 12990,
            "category": "products",
            "paymentMethod": "card",
            "date": "2026-02-03",
            "notes": null,
            "photos": null
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert!(expense.photos.is_empty());
        assert!(!expense.is_recurring);
        assert_eq!(expense.category, ExpenseCategory::Products);
        assert_eq!(expense.payment_method, PaymentMethod::Card);
    }

    #[test]
    fn filters_are_sent_only_when_set() {
        assert!(matches!(ListExpenses::new().data(), RequestData::Empty));

        let request = ListExpenses::new()
            .month("2026-02")
            .category(ExpenseCategory::Rent);
        assert!(matches!(request.data(), RequestData::Query(_)));
        let query = serde_json::to_value(&request).unwrap();
        assert_eq!(query, serde_json::json!({"month": "2026-02", "category": "rent"}));
    }
}
