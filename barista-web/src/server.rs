use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::info;

use crate::infrastructure::settings::Settings;
use crate::presentation::middleware::limits::apply_limits;
use crate::presentation::middleware::trace::apply_trace;
use crate::presentation::{AppState, http_handlers};

pub(crate) async fn run_http(settings: &Settings, port: u16, state: AppState) -> anyhow::Result<()> {
    let app = build_router(settings, state);

    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("app listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

pub(crate) fn build_router(settings: &Settings, state: AppState) -> Router {
    let app = http_handlers::routes(state)
        .nest_service("/static", ServeDir::new(&settings.static_dir))
        .nest_service("/js", ServeDir::new(&settings.js_dir));
    let app = apply_limits(
        app,
        settings.http_request_body_limit_bytes,
        settings.http_request_timeout(),
    );
    apply_trace(app)
}
