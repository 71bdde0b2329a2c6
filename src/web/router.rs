use axum::{
    Router,
    http::{HeaderValue, Method, StatusCode, header},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::web::{AppState, admin, auth, forms, visits};

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(state.config().cors_allow_origin.as_deref());

    Router::new()
        .route("/api/contact", post(forms::contact))
        .route("/api/quote-request", post(forms::quote_request))
        .route("/api/loi-submission", post(forms::loi_submission))
        .route(
            "/admin/login",
            get(auth::login_page).post(auth::process_login),
        )
        .route("/admin/logout", get(auth::logout))
        .route("/admin/dashboard", get(admin::dashboard))
        .route("/admin/api/stats", get(admin::stats))
        .route("/admin/api/enquiries", get(admin::list_enquiries))
        .route("/admin/api/quotations", get(admin::list_quotations))
        .route(
            "/admin/api/quotations/search/ticket/:ticket_no",
            get(admin::search_quotation),
        )
        .route("/admin/api/loi-submissions", get(admin::list_loi_submissions))
        .route("/healthz", get(healthz))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            visits::record_visit,
        ))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(allow_origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    match allow_origin {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(value) => layer.allow_origin(value),
            Err(_) => {
                warn!(origin, "CORS_ALLOW_ORIGIN is not a valid header value, allowing any");
                layer.allow_origin(Any)
            }
        },
        None => layer.allow_origin(Any),
    }
}

async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}
