use axum::{Router, routing::get};

use crate::presentation::AppState;
use crate::presentation::handlers::register::{register, register_page};

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/register", get(register_page).post(register))
}
