use std::time::Duration;

use axum::{Router, http::StatusCode};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Ограничивает размер входящего тела и общее время обработки запроса.
/// По таймауту future обработчика сбрасывается вместе с исходящим вызовом.
pub(crate) fn apply_limits(router: Router, body_limit_bytes: usize, timeout: Duration) -> Router {
    router
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json,
        body::Body,
        http::{Request, header},
        routing::{get, post},
    };
    use tower::ServiceExt;

    fn router() -> Router {
        Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            )
            .route(
                "/echo",
                post(|Json(body): Json<serde_json::Value>| async move { Json(body) }),
            )
    }

    #[tokio::test]
    async fn slow_handler_answers_408() {
        let app = apply_limits(router(), 1024, Duration::from_millis(20));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/slow")
                    .body(Body::empty())
                    .expect("request must build"),
            )
            .await
            .expect("router is infallible");

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn declared_oversized_body_answers_413() {
        let app = apply_limits(router(), 16, Duration::from_secs(5));
        let body = serde_json::json!({"padding": "x".repeat(64)}).to_string();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/echo")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::CONTENT_LENGTH, body.len())
                    .body(Body::from(body))
                    .expect("request must build"),
            )
            .await
            .expect("router is infallible");

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn body_within_limit_passes_through() {
        let app = apply_limits(router(), 1024, Duration::from_secs(5));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/echo")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"ok":true}"#))
                    .expect("request must build"),
            )
            .await
            .expect("router is infallible");

        assert_eq!(response.status(), StatusCode::OK);
    }
}
