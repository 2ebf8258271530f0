use serde::{Deserialize, Serialize};

use crate::assessment::{AssessmentDraft, AssessmentSummary, AssessmentView};
use crate::session::{FlowState, Session, UserType};

/// Request payload for the login endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_type: UserType,
}

/// One form edit: the field's wire name and its raw text
#[derive(Debug, Deserialize)]
pub struct FieldUpdate {
    pub name: String,
    pub value: String,
}

/// Current position in the flow, plus the draft while it matters
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub state: FlowState,
    pub user_type: Option<UserType>,
    pub draft: AssessmentDraft,
}

impl SessionResponse {
    pub fn from_session(session: &Session) -> Self {
        Self {
            state: session.state(),
            user_type: session.user_type(),
            draft: session.draft().clone(),
        }
    }
}

/// What the dashboard renders for the signed-in user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub user_type: Option<UserType>,
    pub assessment: Option<AssessmentView>,
    pub summary: Option<AssessmentSummary>,
}

impl DashboardResponse {
    pub fn new(user_type: Option<UserType>, assessment: Option<AssessmentView>) -> Self {
        let summary = assessment.as_ref().map(AssessmentView::summary);
        Self {
            user_type,
            assessment,
            summary,
        }
    }
}

/// Response payload for the health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Service is healthy".to_string(),
        }
    }
}
