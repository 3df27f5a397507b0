use std::sync::Arc;

use axum::http::HeaderValue;
use barista_client::BackendClient;

use crate::application::registration_service::RegistrationService;
use crate::infrastructure::templates::Templates;

pub(crate) mod app_error;
pub(crate) mod cors;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod routes;


#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) backend: BackendClient,
    pub(crate) templates: Arc<Templates>,
    pub(crate) registration: Arc<RegistrationService>,
    pub(crate) site_key: Arc<str>,
    pub(crate) cors_origin: HeaderValue,
}

impl AppState {
    pub(crate) fn new(
        backend: BackendClient,
        templates: Arc<Templates>,
        registration: Arc<RegistrationService>,
        site_key: impl Into<Arc<str>>,
        cors_origin: HeaderValue,
    ) -> Self {
        Self {
            backend,
            templates,
            registration,
            site_key: site_key.into(),
            cors_origin,
        }
    }
}
