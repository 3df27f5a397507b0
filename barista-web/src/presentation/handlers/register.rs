use axum::{
    Form, Json,
    extract::{FromRequest, Request, State},
    http::{
        HeaderValue, StatusCode,
        header::{CONTENT_TYPE, LOCATION, SET_COOKIE},
    },
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tera::Context;
use tracing::error;
use validator::Validate;

use crate::domain::registration::{RegistrationRequest, SessionToken};
use crate::infrastructure::templates::REGISTER;
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::cors::credentialed_cors_headers;

pub(crate) const SESSION_COOKIE_NAME: &str = "barista_auth_token";
const SESSION_TTL_SECONDS: u64 = 24 * 60 * 60;

#[derive(Deserialize, Validate)]
pub(crate) struct RegisterDto {
    #[validate(length(min = 1))]
    pub(crate) username: String,
    #[validate(length(min = 1))]
    pub(crate) password: String,
    // виджет reCAPTCHA присылает токен под этим именем
    #[serde(alias = "g-recaptcha-response")]
    #[validate(length(min = 1))]
    pub(crate) token: String,
}

impl From<RegisterDto> for RegistrationRequest {
    fn from(dto: RegisterDto) -> Self {
        Self {
            username: dto.username,
            password: dto.password,
            token: dto.token,
        }
    }
}

/// Тело регистрации: JSON или urlencoded-форма, в зависимости от `Content-Type`.
pub(crate) struct RegisterPayload(pub(crate) RegisterDto);

impl<S> FromRequest<S> for RegisterPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        let dto = if is_json {
            let Json(dto) = Json::<RegisterDto>::from_request(req, state).await?;
            dto
        } else {
            let Form(dto) = Form::<RegisterDto>::from_request(req, state).await?;
            dto
        };

        Ok(Self(dto))
    }
}

pub(crate) async fn register_page(State(state): State<AppState>) -> AppResult<Html<String>> {
    let mut context = Context::new();
    context.insert("site_key", state.site_key.as_ref());
    Ok(Html(state.templates.render(REGISTER, &context)?))
}

pub(crate) async fn register(
    State(state): State<AppState>,
    RegisterPayload(dto): RegisterPayload,
) -> AppResult<Response> {
    dto.validate()?;

    let token = state.registration.register(dto.into()).await?;
    let cookie = session_cookie(&token)?;

    let mut headers = credentialed_cors_headers(&state.cors_origin);
    headers.insert(SET_COOKIE, cookie);
    headers.insert(LOCATION, HeaderValue::from_static("/"));

    Ok((StatusCode::FOUND, headers).into_response())
}

pub(crate) fn session_cookie(token: &SessionToken) -> AppResult<HeaderValue> {
    let value = token.cookie_value().map_err(|err| {
        error!("backend issued an unusable session token: {err}");
        AppError::Internal("session token is not a valid cookie value")
    })?;
    let cookie = format!(
        "{SESSION_COOKIE_NAME}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_TTL_SECONDS}"
    );
    HeaderValue::from_str(&cookie)
        .map_err(|_| AppError::Internal("session cookie is not a valid header value"))
}
