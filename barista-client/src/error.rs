use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки, возвращаемые `barista-client`.
pub enum BackendError {
    /// Не удалось отправить запрос или прочитать ответ.
    #[error("backend transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Тело ответа не совпадает с ожидаемым JSON.
    #[error("backend decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// Запрошенный ресурс не найден (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Backend ответил неуспешным статусом.
    #[error("backend rejected request with status {status}: {body}")]
    Status {
        /// HTTP-статус ответа backend.
        status: u16,
        /// Тело ответа backend, для диагностики.
        body: String,
    },
}

/// Результат операций `barista-client`.
pub type BackendResult<T> = Result<T, BackendError>;

impl BackendError {
    pub(crate) fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status {
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            _ => Self::Status {
                status: status.as_u16(),
                body,
            },
        }
    }

    /// HTTP-статус backend, если он есть в ошибке.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound => Some(404),
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            Self::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}
