//! Клиентская библиотека для API backend Barista.
//!
//! Покрывает эндпоинты, нужные веб-фронтенду: список и получение постов,
//! поиск пользователя через запрос с `Server-Action`, регистрацию
//! и вход.
//!
//! Каждый вызов - один запрос без повторов. Таймауты задаются
//! через [`Timeouts`] и действуют на каждый вызов отдельно.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{BackendError, BackendResult};
pub use http_client::{BackendClient, SERVER_ACTION_HEADER, Timeouts};
pub use models::{BlogPost, Credentials, User, UsernameLookup};
