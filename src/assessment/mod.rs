pub mod client;
pub mod options;
pub mod request;
pub mod result;

pub use client::{
    ASSESSMENT_FAILURE_NOTICE, AssessmentFailure, HttpScoringClient, ScoringService,
};
pub use options::FormOptions;
pub use request::{AssessmentDraft, AssessmentRequest, DraftField, UnknownFieldError, build_request};
pub use result::{AssessmentResult, AssessmentSummary, AssessmentView, RiskLevel, interpret};
