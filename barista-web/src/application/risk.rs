use async_trait::async_trait;
use thiserror::Error;

/// Действие, для которого должен быть выпущен токен регистрации.
pub(crate) const REGISTER_ACTION: &str = "register";

/// Оценка строго ниже порога считается ботом.
pub(crate) const BOT_SCORE_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RiskAssessment {
    pub(crate) valid: bool,
    pub(crate) invalid_reason: Option<String>,
    pub(crate) action: String,
    pub(crate) score: f64,
}

#[derive(Debug, Error)]
pub(crate) enum AssessmentError {
    #[error("invalid token: {reason}")]
    InvalidToken { reason: String },

    #[error("unexpected action {actual:?}, expected {expected:?}")]
    ActionMismatch { expected: String, actual: String },

    #[error("assessment transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("assessment service answered {status}: {body}")]
    Service { status: u16, body: String },

    #[error("assessment decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Оценивает токен проверки, присланный клиентом.
#[async_trait]
pub(crate) trait RiskAssessor: Send + Sync {
    async fn create_assessment(
        &self,
        token: &str,
        expected_action: &str,
    ) -> Result<RiskAssessment, AssessmentError>;
}

/// Запрашивает оценку и отклоняет невалидные токены и токены,
/// выпущенные для другого действия.
pub(crate) async fn assess(
    assessor: &dyn RiskAssessor,
    token: &str,
    expected_action: &str,
) -> Result<RiskAssessment, AssessmentError> {
    let assessment = assessor.create_assessment(token, expected_action).await?;

    if !assessment.valid {
        return Err(AssessmentError::InvalidToken {
            reason: assessment
                .invalid_reason
                .unwrap_or_else(|| "unspecified".to_string()),
        });
    }

    if assessment.action != expected_action {
        return Err(AssessmentError::ActionMismatch {
            expected: expected_action.to_string(),
            actual: assessment.action,
        });
    }

    Ok(assessment)
}

pub(crate) fn passes_threshold(score: f64) -> bool {
    score >= BOT_SCORE_THRESHOLD
}
