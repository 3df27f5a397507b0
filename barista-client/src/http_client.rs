use reqwest::{Client, Method, Response, StatusCode, header::CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::error::{BackendError, BackendResult};
use crate::models::{BlogPost, Credentials, User, UsernameLookup};

/// Заголовок с именем серверного действия для action-запроса.
pub const SERVER_ACTION_HEADER: &str = "Server-Action";

const USERS_PATH: &str = "/v1/users";
const GET_BY_USERNAME_ACTION: &str = "GetByUsername";

#[derive(Debug, Clone, Copy)]
/// Ограничения времени для каждого исходящего запроса.
pub struct Timeouts {
    /// Время на установку соединения.
    pub connect: Duration,
    /// Время на весь запрос, включая чтение тела.
    pub total: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(3),
            total: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone)]
/// HTTP-клиент для работы с REST API backend.
///
/// Клонируется дёшево: клоны делят один пул соединений.
pub struct BackendClient {
    base_url: String,
    client: Client,
}

impl BackendClient {
    /// Создаёт клиент для backend с базовым URL `base_url`.
    pub fn new(base_url: impl Into<String>, timeouts: Timeouts) -> BackendResult<Self> {
        let client = Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.total)
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn read_body(response: Response) -> String {
        response.text().await.unwrap_or_default()
    }

    async fn reject(response: Response) -> BackendError {
        let status = response.status();
        let body = Self::read_body(response).await;
        BackendError::from_status(status, body)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> BackendResult<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> BackendResult<T> {
        let response = self
            .client
            .request(Method::GET, self.endpoint(path))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        Self::decode(response).await
    }

    /// Получает все посты (`GET /v1/blogs`).
    pub async fn list_blogs(&self) -> BackendResult<Vec<BlogPost>> {
        self.get_json("/v1/blogs").await
    }

    /// Получает пост по идентификатору (`GET /v1/blogs/{id}`).
    ///
    /// Ответ 404 превращается в [`BackendError::NotFound`].
    pub async fn get_blog(&self, id: i64) -> BackendResult<BlogPost> {
        self.get_json(&format!("/v1/blogs/{id}")).await
    }

    /// Отправляет `POST` с заголовком [`SERVER_ACTION_HEADER`] и текстовым телом.
    ///
    /// Ответ возвращается как есть, с любым статусом. Ошибкой считается
    /// только сбой транспорта.
    pub async fn server_action(
        &self,
        path: &str,
        action: &str,
        body: impl Into<String>,
    ) -> BackendResult<Response> {
        let response = self
            .client
            .request(Method::POST, self.endpoint(path))
            .header(SERVER_ACTION_HEADER, action)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(body.into())
            .send()
            .await?;
        Ok(response)
    }

    /// Спрашивает у backend, занят ли `username`.
    ///
    /// 404 значит свободен, любой другой статус значит занят. Тело
    /// ответа не-2xx не читается.
    pub async fn find_user_by_username(&self, username: &str) -> BackendResult<UsernameLookup> {
        let response = self
            .server_action(USERS_PATH, GET_BY_USERNAME_ACTION, username)
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(UsernameLookup::Available);
        }

        let user = if status.is_success() {
            Self::decode::<User>(response).await.ok()
        } else {
            drop(response);
            None
        };

        Ok(UsernameLookup::Taken {
            status: status.as_u16(),
            user,
        })
    }

    /// Регистрирует пользователя (`POST /register`).
    pub async fn register(&self, credentials: Credentials<'_>) -> BackendResult<()> {
        let response = self
            .client
            .request(Method::POST, self.endpoint("/register"))
            .json(&credentials)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        Ok(())
    }

    /// Выполняет вход (`POST /login`) и возвращает сессионный токен из тела ответа.
    pub async fn login(&self, credentials: Credentials<'_>) -> BackendResult<String> {
        let response = self
            .client
            .request(Method::POST, self.endpoint("/login"))
            .json(&credentials)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            debug!(%status, "backend login rejected");
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body.trim().to_string())
    }
}
