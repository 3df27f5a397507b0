use std::sync::Arc;

use barista_client::{BackendClient, BackendError, UsernameLookup};
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::application::risk::{
    AssessmentError, REGISTER_ACTION, RiskAssessor, assess, passes_threshold,
};
use crate::domain::registration::{RegistrationRequest, SessionToken};

#[derive(Debug, Error)]
pub(crate) enum RegistrationError {
    #[error("risk assessment failed: {0}")]
    Assessment(#[from] AssessmentError),

    #[error("potential bot (score {score})")]
    BotDetected { score: f64 },

    #[error("user already exists (lookup status {status})")]
    DuplicateUsername { status: u16 },

    #[error("username lookup failed: {0}")]
    Lookup(#[source] BackendError),

    #[error("account creation failed: {0}")]
    Create(#[source] BackendError),

    #[error("login failed: {0}")]
    Login(#[source] BackendError),
}

/// Цепочка регистрации: оценка риска, проверка дубликата, создание
/// пользователя, вход. Каждый шаг выполняется только после успеха предыдущего.
pub(crate) struct RegistrationService {
    backend: BackendClient,
    assessor: Arc<dyn RiskAssessor>,
}

impl RegistrationService {
    pub(crate) fn new(backend: BackendClient, assessor: Arc<dyn RiskAssessor>) -> Self {
        Self { backend, assessor }
    }

    #[instrument(skip_all, fields(username = %req.username))]
    pub(crate) async fn register(
        &self,
        req: RegistrationRequest,
    ) -> Result<SessionToken, RegistrationError> {
        self.check_risk(&req).await?;
        self.ensure_username_available(&req.username).await?;
        self.create_account(&req).await?;
        let token = self.login(&req).await?;

        info!("user registered");
        Ok(token)
    }

    async fn check_risk(&self, req: &RegistrationRequest) -> Result<f64, RegistrationError> {
        let assessment = assess(self.assessor.as_ref(), &req.token, REGISTER_ACTION)
            .await
            .inspect_err(|err| error!("risk assessment failed: {err}"))?;

        if !passes_threshold(assessment.score) {
            warn!(score = assessment.score, "potential bot rejected");
            return Err(RegistrationError::BotDetected {
                score: assessment.score,
            });
        }

        Ok(assessment.score)
    }

    async fn ensure_username_available(&self, username: &str) -> Result<(), RegistrationError> {
        let lookup = self
            .backend
            .find_user_by_username(username)
            .await
            .map_err(|err| {
                error!("username lookup failed: {err}");
                RegistrationError::Lookup(err)
            })?;

        match lookup {
            UsernameLookup::Available => Ok(()),
            UsernameLookup::Taken { status, .. } => {
                if !(200..300).contains(&status) {
                    warn!(status, "username lookup answered an error status; treating as taken");
                } else {
                    warn!("username already taken");
                }
                Err(RegistrationError::DuplicateUsername { status })
            }
        }
    }

    async fn create_account(&self, req: &RegistrationRequest) -> Result<(), RegistrationError> {
        self.backend
            .register(req.credentials())
            .await
            .map_err(|err| {
                error!("registering user with backend failed: {err}");
                RegistrationError::Create(err)
            })
    }

    async fn login(&self, req: &RegistrationRequest) -> Result<SessionToken, RegistrationError> {
        let raw = self
            .backend
            .login(req.credentials())
            .await
            .map_err(|err| {
                error!("logging in user with backend failed: {err}");
                RegistrationError::Login(err)
            })?;

        Ok(SessionToken::new(raw))
    }
}
