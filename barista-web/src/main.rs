use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use barista_client::BackendClient;
use clap::Parser;

mod application;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::registration_service::RegistrationService;
use infrastructure::logging::init_logging;
use infrastructure::recaptcha::RecaptchaEnterprise;
use infrastructure::settings::Settings;
use infrastructure::templates::Templates;
use presentation::AppState;

#[derive(Debug, Parser)]
#[command(name = "barista-web", version, about = "Server-rendered front end for the Barista blog")]
struct Cli {
    /// Порт, на котором запускается приложение.
    #[arg(long, default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let templates = Templates::load(&settings.templates_glob)
        .with_context(|| format!("failed to parse templates {}", settings.templates_glob))?;

    let backend = BackendClient::new(settings.backend_url.clone(), settings.upstream_timeouts())
        .context("failed to build backend client")?;
    let assessor =
        RecaptchaEnterprise::new(settings.recaptcha.clone(), settings.upstream_timeouts())
            .context("failed to build risk assessment client")?;
    let registration = RegistrationService::new(backend.clone(), Arc::new(assessor));

    let cors_origin = HeaderValue::from_str(&settings.cors_origin)
        .with_context(|| format!("invalid CORS_ORIGIN {:?}", settings.cors_origin))?;

    let state = AppState::new(
        backend,
        Arc::new(templates),
        Arc::new(registration),
        settings.recaptcha.site_key.as_str(),
        cors_origin,
    );

    server::run_http(&settings, cli.port, state).await
}
