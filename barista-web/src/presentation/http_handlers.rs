use axum::{Router, routing::get};

use super::handlers::pages::{healthz, not_found};
use super::{AppState, routes};

pub(crate) fn routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .merge(routes::router())
        .fallback(not_found)
        .with_state(state)
}
