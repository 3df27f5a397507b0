use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Публичная модель поста.
pub struct BlogPost {
    /// Идентификатор поста.
    pub id: i64,
    /// Логин автора.
    pub owner_username: String,
    /// Заголовок поста.
    pub title: String,
    /// HTML поста, уже очищенный backend; выводится без экранирования.
    pub content: String,
    /// Дата и время создания поста (UTC).
    pub created_at: DateTime<Utc>,
    /// Дата и время последнего обновления поста (UTC).
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Пользователь в том виде, в каком его отдаёт backend. Локально не хранится.
pub struct User {
    /// Логин.
    pub username: String,
    /// Непрозрачное представление хеша пароля.
    pub password_hash: i64,
    /// Роль пользователя.
    pub role: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
/// Учётные данные для `/register` и `/login` на backend.
pub struct Credentials<'a> {
    /// Логин.
    pub username: &'a str,
    /// Пароль в открытом виде.
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
/// Результат поиска пользователя по логину.
pub enum UsernameLookup {
    /// Backend ответил 404: логин свободен.
    Available,
    /// Backend ответил любым другим статусом.
    Taken {
        /// HTTP-статус ответа backend.
        status: u16,
        /// Пользователь, если backend ответил 2xx с разборчивым телом.
        user: Option<User>,
    },
}
