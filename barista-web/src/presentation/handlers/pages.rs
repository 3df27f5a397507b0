use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use barista_client::BackendError;
use serde::Serialize;
use tera::Context;

use crate::infrastructure::templates::{BLOG, BLOGS, HOME, NOT_FOUND};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;

pub(crate) async fn home(State(state): State<AppState>) -> AppResult<Html<String>> {
    render_listing(&state, HOME).await
}

pub(crate) async fn list_blogs(State(state): State<AppState>) -> AppResult<Html<String>> {
    render_listing(&state, BLOGS).await
}

async fn render_listing(state: &AppState, template: &str) -> AppResult<Html<String>> {
    let blogs = state.backend.list_blogs().await?;

    let mut context = Context::new();
    context.insert("Blogs", &blogs);
    Ok(Html(state.templates.render(template, &context)?))
}

pub(crate) async fn get_blog(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Response> {
    // нечисловой id не может указывать на пост
    let Ok(Path(id)) = id else {
        return not_found_page(&state);
    };

    match state.backend.get_blog(id).await {
        Ok(blog) => Ok(Html(state.templates.render_value(BLOG, &blog)?).into_response()),
        Err(BackendError::NotFound) => not_found_page(&state),
        Err(err) => Err(err.into()),
    }
}

pub(crate) async fn not_found(State(state): State<AppState>) -> AppResult<Response> {
    not_found_page(&state)
}

fn not_found_page(state: &AppState) -> AppResult<Response> {
    let html = state.templates.render(NOT_FOUND, &Context::new())?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthzResponse {
    status: &'static str,
}

pub(crate) async fn healthz() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}
