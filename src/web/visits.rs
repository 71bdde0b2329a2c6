use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::web::AppState;

/// Records one `visits` row per inbound request for the dashboard counters.
/// A failed insert never blocks the request itself.
pub async fn record_visit(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    let ip_address = client_ip(&request, addr);

    if let Err(err) = sqlx::query("INSERT INTO visits (ip_address, user_agent, path) VALUES ($1, $2, $3)")
        .bind(&ip_address)
        .bind(&user_agent)
        .bind(&path)
        .execute(state.pool_ref())
        .await
    {
        warn!(?err, "failed to record visit");
    }

    next.run(request).await
}

/// Prefers the first hop of `X-Forwarded-For` when a proxy sits in front,
/// falling back to the peer address.
fn client_ip(request: &Request, addr: SocketAddr) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| addr.ip().to_string())
}
