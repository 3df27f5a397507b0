use std::fmt;

use barista_client::Credentials;

use super::error::DomainError;

/// Одна попытка регистрации: собирается из формы и живёт только
/// до конца обработки запроса.
#[derive(Clone, PartialEq)]
pub(crate) struct RegistrationRequest {
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) token: String,
}

impl RegistrationRequest {
    pub(crate) fn credentials(&self) -> Credentials<'_> {
        Credentials {
            username: &self.username,
            password: &self.password,
        }
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Непрозрачный подписанный токен, который backend выдаёт при входе.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct SessionToken(String);

impl SessionToken {
    pub(crate) fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    /// Возвращает токен, если он целиком состоит из cookie-octet (RFC 6265, 4.1.1).
    ///
    /// Пробел, `"`, `,`, `;` и `\` запрещены: иначе значение могло бы
    /// дописать в `Set-Cookie` собственные атрибуты.
    pub(crate) fn cookie_value(&self) -> Result<&str, DomainError> {
        if self.0.is_empty() {
            return Err(DomainError::EmptySessionToken);
        }
        match self.0.bytes().position(|byte| !is_cookie_octet(byte)) {
            Some(position) => Err(DomainError::InvalidSessionToken {
                byte: self.0.as_bytes()[position],
                position,
            }),
            None => Ok(&self.0),
        }
    }
}

fn is_cookie_octet(byte: u8) -> bool {
    matches!(byte, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}
