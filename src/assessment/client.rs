use async_trait::async_trait;
use std::fmt;
use tracing::{debug, info};

use crate::assessment::{AssessmentRequest, AssessmentResult};

pub const ASSESS_CREDIT_PATH: &str = "/api/assess-credit";

/// The one notice shown to the applicant, whatever went wrong
pub const ASSESSMENT_FAILURE_NOTICE: &str =
    "Unable to complete assessment. Please try again later or contact support.";

/// The scoring service could not produce a usable result.
///
/// Transport errors, non-success statuses and unreadable bodies all collapse
/// into this one condition. `reason` is kept for the logs only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentFailure {
    reason: String,
}

impl AssessmentFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for AssessmentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "assessment failed: {}", self.reason)
    }
}

impl std::error::Error for AssessmentFailure {}

/// Anything able to score an assessment request
#[async_trait]
pub trait ScoringService: Send + Sync {
    async fn assess(
        &self,
        request: &AssessmentRequest,
    ) -> Result<AssessmentResult, AssessmentFailure>;
}

/// Scoring service reached over HTTP.
///
/// Performs exactly one POST per call: no retry, no backoff, no caching and
/// no client-side timeout.
#[derive(Debug, Clone)]
pub struct HttpScoringClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpScoringClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().build()?;
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), ASSESS_CREDIT_PATH);
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ScoringService for HttpScoringClient {
    async fn assess(
        &self,
        request: &AssessmentRequest,
    ) -> Result<AssessmentResult, AssessmentFailure> {
        info!(
            "Submitting credit assessment for '{}' to {}",
            request.business_name, self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| AssessmentFailure::new(format!("transport error: {}", e)))?;

        let status = response.status();
        info!("Received response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AssessmentFailure::new(format!(
                "scoring service returned {}: {}",
                status, error_text
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AssessmentFailure::new(format!("failed to read body: {}", e)))?;
        debug!("Response body: {}", body);

        serde_json::from_str(&body)
            .map_err(|e| AssessmentFailure::new(format!("unparseable response body: {}", e)))
    }
}
