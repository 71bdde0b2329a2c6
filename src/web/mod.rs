pub mod admin;
pub mod auth;
pub mod data;
pub mod forms;
pub mod models;
pub mod responses;
pub mod router;
pub mod state;
pub mod templates;
pub mod visits;

pub use auth::{AuthUser, SESSION_COOKIE, SESSION_TTL_DAYS};
pub use state::AppState;
pub use templates::escape_html;
