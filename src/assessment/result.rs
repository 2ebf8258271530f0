use serde::{Deserialize, Serialize};

pub const DEFAULT_EMPOWR_SCORE: f64 = 78.0;
pub const DEFAULT_INTEREST_RATE: f64 = 8.5;

/// Decision returned by the scoring service.
///
/// Every field is optional and unknown fields are ignored, so the service can
/// grow its response without breaking this client. `null` reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssessmentResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empowr_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskLevel {
    /// Case-insensitive match on the service's tier name
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(RiskLevel::Low),
            "medium" => Some(RiskLevel::Medium),
            "high" => Some(RiskLevel::High),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

/// Display-ready view of an assessment decision
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentView {
    pub is_approved: bool,
    pub risk_level: RiskLevel,
    pub empowr_score: f64,
    pub amount: f64,
    pub interest_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Applies the fallback rules to a raw result. Pure, never fails.
///
/// An explicit `approved` flag takes precedence over `recommendation`; the
/// recommendation only decides when the flag is absent.
pub fn interpret(result: &AssessmentResult) -> AssessmentView {
    let is_approved = match result.approved {
        Some(approved) => approved,
        None => result.recommendation.as_deref() == Some("approved"),
    };

    // unrecognized tiers read as the default tier
    let risk_level = result
        .risk_level
        .as_deref()
        .and_then(RiskLevel::parse)
        .unwrap_or_default();

    AssessmentView {
        is_approved,
        risk_level,
        empowr_score: result
            .empowr_score
            .or(result.score)
            .unwrap_or(DEFAULT_EMPOWR_SCORE),
        amount: result.approved_amount.or(result.loan_amount).unwrap_or(0.0),
        interest_rate: result.interest_rate.unwrap_or(DEFAULT_INTEREST_RATE),
        message: result.message.clone(),
    }
}

/// Wording shown next to the decision on the business dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSummary {
    pub headline: String,
    pub detail: String,
    pub amount_label: String,
    pub risk_label: String,
}

impl AssessmentView {
    pub fn summary(&self) -> AssessmentSummary {
        let (headline, detail, amount_label) = if self.is_approved {
            (
                "Pre-Approved!",
                "Congratulations! Your business qualifies for financing.",
                "Approved Amount",
            )
        } else {
            (
                "Under Review",
                "Your application needs additional review.",
                "Requested Amount",
            )
        };

        AssessmentSummary {
            headline: headline.to_string(),
            detail: detail.to_string(),
            amount_label: amount_label.to_string(),
            risk_label: self.risk_level.label().to_string(),
        }
    }
}
