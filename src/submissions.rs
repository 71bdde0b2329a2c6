use anyhow::{Context, Result, anyhow};
use chrono::{Duration, Utc};
use serde_json::Value;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::tickets::{self, ENQUIRY_PREFIX, QUOTATION_PREFIX, TICKET_INSERT_ATTEMPTS};

const ENQUIRY_TICKET_CONSTRAINT: &str = "enquiries_ticket_no_key";
const QUOTATION_TICKET_CONSTRAINT: &str = "quotations_ticket_no_key";

#[derive(Clone, Debug)]
pub struct EnquiryFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Clone, Debug)]
pub struct QuotationFields {
    pub company: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub product: String,
    pub quantity: String,
    pub delivery: String,
    pub message: String,
}

#[derive(Clone, Debug)]
pub struct LoiFields {
    pub company_name: String,
    pub rep_name: String,
    pub email: String,
    pub phone: String,
    pub product: String,
    pub quantity: String,
    pub loi_data: Value,
}

/// Inserts a contact-form enquiry and returns its generated ticket number.
/// Ticket collisions are resolved by regenerating, bounded by
/// [`TICKET_INSERT_ATTEMPTS`].
pub async fn record_enquiry(
    pool: &PgPool,
    ttl_days: i64,
    fields: &EnquiryFields,
) -> Result<String> {
    let now = Utc::now();
    let expires_at = now + Duration::days(ttl_days);

    for attempt in 1..=TICKET_INSERT_ATTEMPTS {
        let ticket_no = tickets::generate(ENQUIRY_PREFIX, now);

        let result = sqlx::query(
            "INSERT INTO enquiries (name, email, message, ticket_no, created_at, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.message)
        .bind(&ticket_no)
        .bind(now)
        .bind(expires_at)
        .execute(pool)
        .await;

        match result {
            Ok(_) => return Ok(ticket_no),
            Err(sqlx::Error::Database(db_err))
                if db_err.constraint() == Some(ENQUIRY_TICKET_CONSTRAINT) =>
            {
                warn!(attempt, %ticket_no, "enquiry ticket collision, regenerating");
            }
            Err(err) => return Err(err).context("failed to insert enquiry"),
        }
    }

    Err(anyhow!(
        "exhausted {TICKET_INSERT_ATTEMPTS} ticket attempts for enquiry"
    ))
}

/// Inserts a quotation request and returns its generated ticket number.
pub async fn record_quotation(
    pool: &PgPool,
    ttl_days: i64,
    fields: &QuotationFields,
) -> Result<String> {
    let now = Utc::now();
    let expires_at = now + Duration::days(ttl_days);

    for attempt in 1..=TICKET_INSERT_ATTEMPTS {
        let ticket_no = tickets::generate(QUOTATION_PREFIX, now);

        let result = sqlx::query(
            "INSERT INTO quotations
             (ticket_no, company, name, email, phone, product, quantity, delivery, message, created_at, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(&ticket_no)
        .bind(&fields.company)
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(&fields.product)
        .bind(&fields.quantity)
        .bind(&fields.delivery)
        .bind(&fields.message)
        .bind(now)
        .bind(expires_at)
        .execute(pool)
        .await;

        match result {
            Ok(_) => return Ok(ticket_no),
            Err(sqlx::Error::Database(db_err))
                if db_err.constraint() == Some(QUOTATION_TICKET_CONSTRAINT) =>
            {
                warn!(attempt, %ticket_no, "quotation ticket collision, regenerating");
            }
            Err(err) => return Err(err).context("failed to insert quotation"),
        }
    }

    Err(anyhow!(
        "exhausted {TICKET_INSERT_ATTEMPTS} ticket attempts for quotation"
    ))
}

/// Inserts an LOI submission. LOI rows carry no ticket and never expire; the
/// structured contract fields arrive as an opaque JSON blob.
pub async fn record_loi(pool: &PgPool, fields: &LoiFields) -> Result<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO loi_submissions
         (company_name, rep_name, email, phone, product, quantity, submission_date, loi_data)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING id",
    )
    .bind(&fields.company_name)
    .bind(&fields.rep_name)
    .bind(&fields.email)
    .bind(&fields.phone)
    .bind(&fields.product)
    .bind(&fields.quantity)
    .bind(Utc::now())
    .bind(&fields.loi_data)
    .fetch_one(pool)
    .await
    .context("failed to insert LOI submission")?;

    Ok(id)
}

/// Deletes quotation rows whose `expires_at` has passed and returns the count
/// removed. Runs synchronously at the start of every quotation read path;
/// there is no background sweep.
pub async fn sweep_expired_quotations(pool: &PgPool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM quotations WHERE expires_at < $1")
        .bind(Utc::now())
        .execute(pool)
        .await
        .context("failed to sweep expired quotations")?;

    let deleted = result.rows_affected();
    if deleted > 0 {
        info!(deleted, "removed expired quotations");
    }
    Ok(deleted)
}
