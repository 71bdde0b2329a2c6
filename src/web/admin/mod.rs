mod api;
mod auth;
mod dashboard;

pub use api::{list_enquiries, list_loi_submissions, list_quotations, search_quotation, stats};
pub use auth::require_admin_user;
pub use dashboard::dashboard;
