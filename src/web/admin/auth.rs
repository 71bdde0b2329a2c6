use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::web::{
    AppState, AuthUser,
    auth::{self, SESSION_COOKIE},
};

/// Resolves the session cookie to a live admin session, redirecting to the
/// login entry point otherwise.
pub async fn require_admin_user(state: &AppState, jar: &CookieJar) -> Result<AuthUser, Redirect> {
    let Some(token_cookie) = jar.get(SESSION_COOKIE) else {
        return Err(Redirect::to("/admin/login"));
    };

    let token = match Uuid::parse_str(token_cookie.value()) {
        Ok(token) => token,
        Err(_) => return Err(Redirect::to("/admin/login")),
    };

    let pool = state.pool();
    match auth::fetch_admin_by_session(&pool, token).await {
        Ok(Some(user)) => Ok(user),
        _ => Err(Redirect::to("/admin/login")),
    }
}
