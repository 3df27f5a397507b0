use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use barista_client::BackendError;
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

use crate::application::registration_service::RegistrationError;
use crate::infrastructure::templates::TemplateError;

const INTERNAL: &str = "internal server error";

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("request rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("internal error: {0}")]
    Internal(&'static str),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Отказ экстрактора. Слишком большое тело сохраняет 413, любой другой
    /// разбор тела отвечает 400.
    fn rejected(status: StatusCode, message: String) -> Self {
        let status = if status == StatusCode::PAYLOAD_TOO_LARGE {
            status
        } else {
            StatusCode::BAD_REQUEST
        };
        Self::Rejected { status, message }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            // Ошибки загрузки страниц отдают текст ошибки как есть.
            AppError::Backend(err) => {
                error!("backend request failed: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            AppError::Registration(err) => match err {
                RegistrationError::BotDetected { .. } => {
                    (StatusCode::UNAUTHORIZED, "unauthorized".to_string())
                }
                RegistrationError::DuplicateUsername { .. } => {
                    (StatusCode::BAD_REQUEST, "user already exists".to_string())
                }
                RegistrationError::Assessment(_)
                | RegistrationError::Lookup(_)
                | RegistrationError::Create(_)
                | RegistrationError::Login(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL.to_string())
                }
            },
            AppError::Template(err) => {
                error!("template rendering failed: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL.to_string())
            }
            AppError::Validation(err) => {
                warn!("registration input rejected: {err}");
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            AppError::Rejected { status, message } => {
                warn!(%status, "request body rejected: {message}");
                (status, message)
            }
            AppError::Internal(reason) => {
                error!("internal error: {reason}");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL.to_string())
            }
        };

        (status, msg).into_response()
    }
}
