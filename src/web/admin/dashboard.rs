use axum::{
    extract::State,
    response::{Html, Redirect},
};
use axum_extra::extract::cookie::CookieJar;

use crate::web::{AppState, templates::render_dashboard_page};

use super::auth::require_admin_user;

pub async fn dashboard(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Html<String>, Redirect> {
    let admin = require_admin_user(&state, &jar).await?;
    Ok(Html(render_dashboard_page(&admin.username)))
}
