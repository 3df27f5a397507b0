use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use barista_client::Timeouts;

const DEFAULT_RECAPTCHA_ENDPOINT: &str = "https://recaptchaenterprise.googleapis.com";

#[derive(Debug, Clone)]
pub(crate) struct RecaptchaSettings {
    pub(crate) project_id: String,
    pub(crate) site_key: String,
    pub(crate) api_key: String,
    pub(crate) endpoint: String,
}

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) backend_url: String,
    pub(crate) recaptcha: RecaptchaSettings,
    pub(crate) templates_glob: String,
    pub(crate) static_dir: PathBuf,
    pub(crate) js_dir: PathBuf,
    pub(crate) cors_origin: String,
    pub(crate) log_level: String,
    pub(crate) http_request_body_limit_bytes: usize,
    pub(crate) http_request_timeout_secs: u64,
    pub(crate) upstream_timeout_secs: u64,
    pub(crate) upstream_connect_timeout_secs: u64,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        let backend_url = get_or("BACKEND_URL", "http://localhost:8080");

        let recaptcha = RecaptchaSettings {
            project_id: get_required("RECAPTCHA_PROJECT_ID")
                .context("RECAPTCHA_PROJECT_ID is required")?,
            site_key: get_required("RECAPTCHA_KEY").context("RECAPTCHA_KEY is required")?,
            api_key: get_required("RECAPTCHA_API_KEY")
                .context("RECAPTCHA_API_KEY is required")?,
            endpoint: get_or("RECAPTCHA_ENDPOINT", DEFAULT_RECAPTCHA_ENDPOINT),
        };

        let templates_glob = get_or("TEMPLATES_GLOB", "templates/**/*.html");
        let static_dir = PathBuf::from(get_or("STATIC_DIR", "static"));
        let js_dir = PathBuf::from(get_or("JS_DIR", "js"));
        let cors_origin = get_or("CORS_ORIGIN", "http://localhost");
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());
        let http_request_body_limit_bytes =
            parse_usize_env("HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;
        let http_request_timeout_secs = parse_u64_env("HTTP_REQUEST_TIMEOUT_SECS", 10)?;
        let upstream_timeout_secs = parse_u64_env("UPSTREAM_TIMEOUT_SECS", 5)?;
        let upstream_connect_timeout_secs = parse_u64_env("UPSTREAM_CONNECT_TIMEOUT_SECS", 3)?;

        Ok(Self {
            backend_url,
            recaptcha,
            templates_glob,
            static_dir,
            js_dir,
            cors_origin,
            log_level,
            http_request_body_limit_bytes,
            http_request_timeout_secs,
            upstream_timeout_secs,
            upstream_connect_timeout_secs,
        })
    }

    pub(crate) fn upstream_timeouts(&self) -> Timeouts {
        Timeouts {
            connect: Duration::from_secs(self.upstream_connect_timeout_secs),
            total: Duration::from_secs(self.upstream_timeout_secs),
        }
    }

    pub(crate) fn http_request_timeout(&self) -> Duration {
        Duration::from_secs(self.http_request_timeout_secs)
    }
}

fn get_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn get_required(key: &str) -> Result<String> {
    let value = std::env::var(key)?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_usize_env(key: &str, default: usize) -> Result<usize> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_u64_env(key: &str, default: u64) -> Result<u64> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
