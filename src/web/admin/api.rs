use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::error;

use crate::{
    submissions, tickets,
    web::{
        AppState,
        data::{self, Table},
        responses::json_error,
    },
};

use super::auth::require_admin_user;

#[derive(Serialize)]
pub struct StatsResponse {
    pub total_enquiries: i64,
    pub total_quotations: i64,
    pub total_lois: i64,
    pub visits_7d: i64,
    pub visits_30d: i64,
}

pub async fn stats(State(state): State<AppState>, jar: CookieJar) -> Response {
    let _admin = match require_admin_user(&state, &jar).await {
        Ok(user) => user,
        Err(redirect) => return redirect.into_response(),
    };

    let pool = state.pool();
    let now = Utc::now();

    let counts = tokio::try_join!(
        data::count_table(&pool, Table::Enquiries),
        data::count_table(&pool, Table::Quotations),
        data::count_table(&pool, Table::LoiSubmissions),
        data::count_visits_since(&pool, now - Duration::days(7)),
        data::count_visits_since(&pool, now - Duration::days(30)),
    );

    match counts {
        Ok((total_enquiries, total_quotations, total_lois, visits_7d, visits_30d)) => {
            Json(StatsResponse {
                total_enquiries,
                total_quotations,
                total_lois,
                visits_7d,
                visits_30d,
            })
            .into_response()
        }
        Err(err) => {
            error!(?err, "failed to compute dashboard stats");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to load stats").into_response()
        }
    }
}

pub async fn list_enquiries(State(state): State<AppState>, jar: CookieJar) -> Response {
    let _admin = match require_admin_user(&state, &jar).await {
        Ok(user) => user,
        Err(redirect) => return redirect.into_response(),
    };

    match data::fetch_enquiries(state.pool_ref()).await {
        Ok(rows) => Json(rows).into_response(),
        Err(err) => {
            error!(?err, "failed to list enquiries");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to load enquiries")
                .into_response()
        }
    }
}

pub async fn list_quotations(State(state): State<AppState>, jar: CookieJar) -> Response {
    let _admin = match require_admin_user(&state, &jar).await {
        Ok(user) => user,
        Err(redirect) => return redirect.into_response(),
    };

    // Expired rows are purged before every quotation read.
    if let Err(err) = submissions::sweep_expired_quotations(state.pool_ref()).await {
        error!(?err, "expiry sweep failed before quotation listing");
    }

    match data::fetch_quotations(state.pool_ref()).await {
        Ok(rows) => Json(rows).into_response(),
        Err(err) => {
            error!(?err, "failed to list quotations");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to load quotations",
            )
            .into_response()
        }
    }
}

pub async fn search_quotation(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(ticket_no): Path<String>,
) -> Response {
    let _admin = match require_admin_user(&state, &jar).await {
        Ok(user) => user,
        Err(redirect) => return redirect.into_response(),
    };

    if !tickets::is_well_formed(&ticket_no) {
        return json_error(StatusCode::NOT_FOUND, "Quotation not found").into_response();
    }

    if let Err(err) = submissions::sweep_expired_quotations(state.pool_ref()).await {
        error!(?err, "expiry sweep failed before quotation search");
    }

    match data::fetch_quotation_by_ticket(state.pool_ref(), &ticket_no).await {
        Ok(Some(row)) => Json(row).into_response(),
        Ok(None) => json_error(StatusCode::NOT_FOUND, "Quotation not found").into_response(),
        Err(err) => {
            error!(?err, %ticket_no, "failed to search quotation");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to search quotations",
            )
            .into_response()
        }
    }
}

pub async fn list_loi_submissions(State(state): State<AppState>, jar: CookieJar) -> Response {
    let _admin = match require_admin_user(&state, &jar).await {
        Ok(user) => user,
        Err(redirect) => return redirect.into_response(),
    };

    match data::fetch_loi_submissions(state.pool_ref()).await {
        Ok(rows) => Json(rows).into_response(),
        Err(err) => {
            error!(?err, "failed to list LOI submissions");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to load LOI submissions",
            )
            .into_response()
        }
    }
}
