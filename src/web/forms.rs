use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, warn};

use crate::{
    notify,
    submissions::{self, EnquiryFields, LoiFields, QuotationFields},
    web::{AppState, responses::SubmissionReply},
};

#[derive(Deserialize)]
pub struct ContactPayload {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
pub struct QuoteRequestPayload {
    #[serde(default)]
    company: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    product: String,
    #[serde(default)]
    quantity: String,
    #[serde(default)]
    delivery: String,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
pub struct LoiPayload {
    #[serde(default)]
    company_name: String,
    #[serde(default)]
    rep_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    product: String,
    #[serde(default)]
    quantity: String,
    #[serde(default)]
    loi_data: Value,
}

pub async fn contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactPayload>,
) -> (StatusCode, Json<SubmissionReply>) {
    let missing = missing_fields(&[
        ("name", &payload.name),
        ("email", &payload.email),
        ("message", &payload.message),
    ]);
    if !missing.is_empty() {
        return validation_failure(&missing);
    }

    let fields = EnquiryFields {
        name: payload.name.trim().to_owned(),
        email: payload.email.trim().to_owned(),
        message: payload.message.trim().to_owned(),
    };

    let ticket_no = match submissions::record_enquiry(
        state.pool_ref(),
        state.config().enquiry_ttl_days,
        &fields,
    )
    .await
    {
        Ok(ticket_no) => ticket_no,
        Err(err) => {
            error!(?err, "failed to record enquiry");
            return storage_failure("Failed to send message. Please try again later.");
        }
    };

    // Notification loss is tolerated once the row is written.
    let (subject, body) = notify::enquiry_email(&fields, &ticket_no);
    if !state.mailer().notify(&fields.email, &subject, body).await {
        warn!(%ticket_no, "enquiry recorded but operator notification failed");
    }

    (
        StatusCode::OK,
        Json(SubmissionReply::ok_with_ticket(
            "Your message has been sent successfully!",
            ticket_no,
        )),
    )
}

pub async fn quote_request(
    State(state): State<AppState>,
    Json(payload): Json<QuoteRequestPayload>,
) -> (StatusCode, Json<SubmissionReply>) {
    let missing = missing_fields(&[
        ("company", &payload.company),
        ("name", &payload.name),
        ("email", &payload.email),
        ("phone", &payload.phone),
        ("product", &payload.product),
        ("quantity", &payload.quantity),
        ("delivery", &payload.delivery),
    ]);
    if !missing.is_empty() {
        return validation_failure(&missing);
    }

    let fields = QuotationFields {
        company: payload.company.trim().to_owned(),
        name: payload.name.trim().to_owned(),
        email: payload.email.trim().to_owned(),
        phone: payload.phone.trim().to_owned(),
        product: payload.product.trim().to_owned(),
        quantity: payload.quantity.trim().to_owned(),
        delivery: payload.delivery.trim().to_owned(),
        message: payload.message.trim().to_owned(),
    };

    let ticket_no = match submissions::record_quotation(
        state.pool_ref(),
        state.config().quotation_ttl_days,
        &fields,
    )
    .await
    {
        Ok(ticket_no) => ticket_no,
        Err(err) => {
            error!(?err, "failed to record quotation");
            return storage_failure("Failed to submit inquiry. Please try again later.");
        }
    };

    let (subject, body) = notify::quotation_email(&fields, &ticket_no);
    if !state.mailer().notify(&fields.email, &subject, body).await {
        warn!(%ticket_no, "quotation recorded but operator notification failed");
    }

    (
        StatusCode::OK,
        Json(SubmissionReply::ok_with_ticket(
            "Your inquiry has been submitted successfully!",
            ticket_no,
        )),
    )
}

pub async fn loi_submission(
    State(state): State<AppState>,
    Json(payload): Json<LoiPayload>,
) -> (StatusCode, Json<SubmissionReply>) {
    let missing = loi_missing_fields(&payload);
    if !missing.is_empty() {
        return validation_failure(&missing);
    }

    let fields = LoiFields {
        company_name: payload.company_name.trim().to_owned(),
        rep_name: payload.rep_name.trim().to_owned(),
        email: payload.email.trim().to_owned(),
        phone: payload.phone.trim().to_owned(),
        product: payload.product.trim().to_owned(),
        quantity: payload.quantity.trim().to_owned(),
        loi_data: payload.loi_data,
    };

    if let Err(err) = submissions::record_loi(state.pool_ref(), &fields).await {
        error!(?err, "failed to record LOI submission");
        return storage_failure("Failed to submit LOI. Please try again later.");
    }

    let (subject, body) = notify::loi_email(&fields);
    if !state.mailer().notify(&fields.email, &subject, body).await {
        warn!(company = %fields.company_name, "LOI recorded but operator notification failed");
    }

    (
        StatusCode::OK,
        Json(SubmissionReply::ok(
            "Your LOI has been submitted successfully!",
        )),
    )
}

/// An LOI without its contract blob is just a contact record; `loi_data` is
/// required alongside the string fields.
fn loi_missing_fields(payload: &LoiPayload) -> Vec<&'static str> {
    let mut missing = missing_fields(&[
        ("company_name", &payload.company_name),
        ("rep_name", &payload.rep_name),
        ("email", &payload.email),
        ("phone", &payload.phone),
        ("product", &payload.product),
        ("quantity", &payload.quantity),
    ]);
    if payload.loi_data.is_null() {
        missing.push("loi_data");
    }
    missing
}

/// Returns the names of required fields that are absent or blank, in the
/// order they were declared.
fn missing_fields(required: &[(&'static str, &str)]) -> Vec<&'static str> {
    required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}

fn validation_failure(missing: &[&'static str]) -> (StatusCode, Json<SubmissionReply>) {
    (
        StatusCode::BAD_REQUEST,
        Json(SubmissionReply::failure(format!(
            "Missing required fields: {}",
            missing.join(", ")
        ))),
    )
}

fn storage_failure(message: &str) -> (StatusCode, Json<SubmissionReply>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(SubmissionReply::failure(message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loi_payload(value: serde_json::Value) -> LoiPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn loi_without_contract_data_is_rejected() {
        let payload = loi_payload(json!({
            "company_name": "Acme Metals",
            "rep_name": "Cy",
            "email": "cy@acme.example",
            "phone": "+1 555 0101",
            "product": "Aluminium ingot",
            "quantity": "1000 MT"
        }));
        assert!(payload.loi_data.is_null());
        assert_eq!(loi_missing_fields(&payload), vec!["loi_data"]);
    }

    #[test]
    fn loi_with_contract_data_passes_validation() {
        let payload = loi_payload(json!({
            "company_name": "Acme Metals",
            "rep_name": "Cy",
            "email": "cy@acme.example",
            "phone": "+1 555 0101",
            "product": "Aluminium ingot",
            "quantity": "1000 MT",
            "loi_data": {"incoterms": "FOB"}
        }));
        assert!(loi_missing_fields(&payload).is_empty());
    }

    #[test]
    fn missing_fields_reports_blank_and_absent() {
        let missing = missing_fields(&[
            ("name", "Ada"),
            ("email", "   "),
            ("message", ""),
        ]);
        assert_eq!(missing, vec!["email", "message"]);
    }

    #[test]
    fn missing_fields_empty_for_complete_input() {
        let missing = missing_fields(&[("name", "Ada"), ("email", "a@b.c")]);
        assert!(missing.is_empty());
    }

    #[test]
    fn validation_failure_names_every_missing_key() {
        let (status, Json(reply)) = validation_failure(&["email", "phone"]);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!reply.success);
        assert_eq!(reply.message, "Missing required fields: email, phone");
    }
}
