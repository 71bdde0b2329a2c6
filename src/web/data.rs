use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::models::{EnquiryRow, LoiSubmissionRow, QuotationRow};

/// Listing endpoints cap their result sets; the tables are unbounded but the
/// dashboard only ever shows the most recent page.
pub const LISTING_LIMIT: i64 = 50;

pub async fn fetch_enquiries(pool: &PgPool) -> sqlx::Result<Vec<EnquiryRow>> {
    sqlx::query_as::<_, EnquiryRow>(
        "SELECT id, name, email, message, ticket_no, created_at, expires_at
         FROM enquiries ORDER BY created_at DESC LIMIT $1",
    )
    .bind(LISTING_LIMIT)
    .fetch_all(pool)
    .await
}

pub async fn fetch_quotations(pool: &PgPool) -> sqlx::Result<Vec<QuotationRow>> {
    sqlx::query_as::<_, QuotationRow>(
        "SELECT id, ticket_no, company, name, email, phone, product, quantity, delivery, message, created_at, expires_at
         FROM quotations ORDER BY created_at DESC LIMIT $1",
    )
    .bind(LISTING_LIMIT)
    .fetch_all(pool)
    .await
}

pub async fn fetch_quotation_by_ticket(
    pool: &PgPool,
    ticket_no: &str,
) -> sqlx::Result<Option<QuotationRow>> {
    sqlx::query_as::<_, QuotationRow>(
        "SELECT id, ticket_no, company, name, email, phone, product, quantity, delivery, message, created_at, expires_at
         FROM quotations WHERE ticket_no = $1",
    )
    .bind(ticket_no)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_loi_submissions(pool: &PgPool) -> sqlx::Result<Vec<LoiSubmissionRow>> {
    sqlx::query_as::<_, LoiSubmissionRow>(
        "SELECT id, company_name, rep_name, email, phone, product, quantity, submission_date, loi_data
         FROM loi_submissions ORDER BY submission_date DESC LIMIT $1",
    )
    .bind(LISTING_LIMIT)
    .fetch_all(pool)
    .await
}

pub async fn count_table(pool: &PgPool, table: Table) -> sqlx::Result<i64> {
    sqlx::query_scalar(table.count_query()).fetch_one(pool).await
}

pub async fn count_visits_since(pool: &PgPool, cutoff: DateTime<Utc>) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM visits WHERE visited_at >= $1")
        .bind(cutoff)
        .fetch_one(pool)
        .await
}

#[derive(Clone, Copy, Debug)]
pub enum Table {
    Enquiries,
    Quotations,
    LoiSubmissions,
}

impl Table {
    fn count_query(self) -> &'static str {
        match self {
            Table::Enquiries => "SELECT COUNT(*) FROM enquiries",
            Table::Quotations => "SELECT COUNT(*) FROM quotations",
            Table::LoiSubmissions => "SELECT COUNT(*) FROM loi_submissions",
        }
    }
}
