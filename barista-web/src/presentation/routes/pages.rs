use axum::{Router, routing::get};

use crate::presentation::AppState;
use crate::presentation::handlers::pages::{get_blog, home, list_blogs};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/blogs", get(list_blogs))
        .route("/blogs/", get(list_blogs))
        .route("/blogs/{id}", get(get_blog))
}
