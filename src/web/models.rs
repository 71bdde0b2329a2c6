use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EnquiryRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub ticket_no: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct QuotationRow {
    pub id: i64,
    pub ticket_no: String,
    pub company: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub product: String,
    pub quantity: String,
    pub delivery: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LoiSubmissionRow {
    pub id: i64,
    pub company_name: String,
    pub rep_name: String,
    pub email: String,
    pub phone: String,
    pub product: String,
    pub quantity: String,
    pub submission_date: DateTime<Utc>,
    pub loi_data: Value,
}
