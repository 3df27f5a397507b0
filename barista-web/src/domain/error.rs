use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum DomainError {
    #[error("session token is empty")]
    EmptySessionToken,

    #[error("session token contains byte {byte:#04x} at {position}, not allowed in a cookie value")]
    InvalidSessionToken { byte: u8, position: usize },
}
