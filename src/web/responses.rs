use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

/// Canonical JSON payload for admin API errors.
#[derive(Debug, Serialize, Clone)]
pub struct ApiMessage {
    pub error: String,
}

impl ApiMessage {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Ad-hoc success/failure envelope used by the public form endpoints. The
/// admin API returns bare rows instead; the two shapes are intentionally
/// different.
#[derive(Debug, Serialize, Clone)]
pub struct SubmissionReply {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_no: Option<String>,
}

impl SubmissionReply {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            ticket_no: None,
        }
    }

    pub fn ok_with_ticket(message: impl Into<String>, ticket_no: String) -> Self {
        Self {
            success: true,
            message: message.into(),
            ticket_no: Some(ticket_no),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ticket_no: None,
        }
    }
}

/// Helper for handlers that need to return `(StatusCode, Json<ApiMessage>)`.
pub fn json_error(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<ApiMessage>) {
    (status, Json(ApiMessage::new(message)))
}
