use axum::Router;

use super::AppState;

pub(crate) mod pages;
pub(crate) mod register;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .merge(pages::router())
        .merge(register::router())
}
