use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::risk::{AssessmentError, RiskAssessment, RiskAssessor};
use crate::infrastructure::settings::RecaptchaSettings;
use barista_client::Timeouts;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventDto<'a> {
    token: &'a str,
    site_key: &'a str,
    expected_action: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateAssessmentDto<'a> {
    event: EventDto<'a>,
}

// Сервис не присылает поля со значениями по умолчанию.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TokenPropertiesDto {
    valid: bool,
    invalid_reason: Option<String>,
    action: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RiskAnalysisDto {
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssessmentDto {
    #[serde(default)]
    token_properties: TokenPropertiesDto,
    #[serde(default)]
    risk_analysis: RiskAnalysisDto,
}

impl From<AssessmentDto> for RiskAssessment {
    fn from(value: AssessmentDto) -> Self {
        Self {
            valid: value.token_properties.valid,
            invalid_reason: value
                .token_properties
                .invalid_reason
                .filter(|reason| !reason.is_empty()),
            action: value.token_properties.action,
            score: value.risk_analysis.score,
        }
    }
}

/// Оценки reCAPTCHA Enterprise через REST API.
pub(crate) struct RecaptchaEnterprise {
    client: Client,
    settings: RecaptchaSettings,
}

impl RecaptchaEnterprise {
    pub(crate) fn new(
        settings: RecaptchaSettings,
        timeouts: Timeouts,
    ) -> Result<Self, AssessmentError> {
        let client = Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.total)
            .build()?;

        Ok(Self { client, settings })
    }

    fn assessments_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/assessments",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.project_id
        )
    }
}

#[async_trait]
impl RiskAssessor for RecaptchaEnterprise {
    async fn create_assessment(
        &self,
        token: &str,
        expected_action: &str,
    ) -> Result<RiskAssessment, AssessmentError> {
        let payload = CreateAssessmentDto {
            event: EventDto {
                token,
                site_key: &self.settings.site_key,
                expected_action,
            },
        };

        let response = self
            .client
            .request(Method::POST, self.assessments_url())
            .query(&[("key", self.settings.api_key.as_str())])
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(AssessmentError::Service {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let dto: AssessmentDto = serde_json::from_slice(&body)?;
        debug!(
            valid = dto.token_properties.valid,
            action = %dto.token_properties.action,
            score = dto.risk_analysis.score,
            "assessment created"
        );
        Ok(dto.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn assessor(server: &MockServer) -> RecaptchaEnterprise {
        RecaptchaEnterprise::new(
            RecaptchaSettings {
                project_id: "barista-prod".to_string(),
                site_key: "site-key".to_string(),
                api_key: "api-key".to_string(),
                endpoint: format!("{}/", server.uri()),
            },
            Timeouts::default(),
        )
        .expect("assessor must build")
    }

    #[tokio::test]
    async fn create_assessment_posts_event_and_reads_score() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/projects/barista-prod/assessments"))
            .and(query_param("key", "api-key"))
            .and(body_json(json!({
                "event": {
                    "token": "client-token",
                    "siteKey": "site-key",
                    "expectedAction": "register"
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "projects/barista-prod/assessments/abc",
                "tokenProperties": {"valid": true, "action": "register"},
                "riskAnalysis": {"score": 0.9, "reasons": []}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let assessment = assessor(&server)
            .create_assessment("client-token", "register")
            .await
            .expect("assessment must succeed");

        assert!(assessment.valid);
        assert_eq!(assessment.action, "register");
        assert_eq!(assessment.score, 0.9);
    }

    #[tokio::test]
    async fn create_assessment_defaults_omitted_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tokenProperties": {"invalidReason": "EXPIRED"}
            })))
            .mount(&server)
            .await;

        let assessment = assessor(&server)
            .create_assessment("stale", "register")
            .await
            .expect("assessment must succeed");

        assert!(!assessment.valid);
        assert_eq!(assessment.invalid_reason.as_deref(), Some("EXPIRED"));
        assert_eq!(assessment.score, 0.0);
    }

    #[tokio::test]
    async fn create_assessment_reports_service_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let err = assessor(&server)
            .create_assessment("client-token", "register")
            .await
            .expect_err("assessment must fail");

        assert!(matches!(
            err,
            AssessmentError::Service { status: 403, ref body } if body.contains("API key")
        ));
    }
}
