use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{error, info};

use crate::assessment::{
    AssessmentDraft, AssessmentFailure, AssessmentRequest, AssessmentResult, AssessmentView,
    DraftField, ScoringService, build_request, interpret,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Business,
    Lender,
}

/// Where the user is in the login -> assessment -> dashboard flow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FlowState {
    #[default]
    Unauthenticated,
    FillingAssessment,
    Submitting,
    AssessmentComplete,
    Dashboard,
}

#[derive(Debug)]
pub enum SessionError {
    /// The action is not available from the current state
    InvalidTransition {
        state: FlowState,
        action: &'static str,
    },
    /// A submission is outstanding; the flow is locked until it settles
    SubmissionInFlight,
    /// Required form fields were blank at submit time
    MissingFields(Vec<DraftField>),
    AssessmentFailed(AssessmentFailure),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidTransition { state, action } => {
                write!(f, "cannot {} while in state {:?}", action, state)
            }
            SessionError::SubmissionInFlight => {
                write!(f, "an assessment submission is already in progress")
            }
            SessionError::MissingFields(fields) => {
                let names: Vec<&str> = fields.iter().map(|field| field.as_str()).collect();
                write!(f, "required fields are missing: {}", names.join(", "))
            }
            SessionError::AssessmentFailed(failure) => write!(f, "{}", failure),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::AssessmentFailed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Everything the UI holds for the signed-in user
#[derive(Debug, Default)]
pub struct Session {
    state: FlowState,
    user_type: Option<UserType>,
    draft: AssessmentDraft,
    result: Option<AssessmentResult>,
}

impl Session {
    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.user_type
    }

    pub fn draft(&self) -> &AssessmentDraft {
        &self.draft
    }

    pub fn result(&self) -> Option<&AssessmentResult> {
        self.result.as_ref()
    }

    pub fn assessment_view(&self) -> Option<AssessmentView> {
        self.result.as_ref().map(interpret)
    }

    fn require(&self, expected: FlowState, action: &'static str) -> Result<(), SessionError> {
        if self.state == expected {
            Ok(())
        } else if self.state == FlowState::Submitting {
            Err(SessionError::SubmissionInFlight)
        } else {
            Err(SessionError::InvalidTransition {
                state: self.state,
                action,
            })
        }
    }

    fn transition(&mut self, next: FlowState) {
        info!("Session state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Business owners go on to the assessment form, lenders straight to their dashboard
    pub fn login(&mut self, user_type: UserType) -> Result<FlowState, SessionError> {
        self.require(FlowState::Unauthenticated, "log in")?;
        self.user_type = Some(user_type);
        match user_type {
            UserType::Business => self.transition(FlowState::FillingAssessment),
            UserType::Lender => self.transition(FlowState::Dashboard),
        }
        Ok(self.state)
    }

    pub fn update_field(
        &mut self,
        field: DraftField,
        raw_value: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.require(FlowState::FillingAssessment, "edit the assessment")?;
        self.draft.update_field(field, raw_value);
        Ok(())
    }

    /// Leaves the form and returns to the login screen
    pub fn back_to_login(&mut self) -> Result<(), SessionError> {
        self.require(FlowState::FillingAssessment, "leave the assessment")?;
        self.reset();
        Ok(())
    }

    /// Gates on required fields and flips the in-flight flag.
    ///
    /// On a gap the session stays on the form and no request is built.
    pub fn begin_submission(&mut self) -> Result<AssessmentRequest, SessionError> {
        self.require(FlowState::FillingAssessment, "submit the assessment")?;

        let missing = self.draft.missing_required();
        if !missing.is_empty() {
            return Err(SessionError::MissingFields(missing));
        }

        self.transition(FlowState::Submitting);
        Ok(build_request(&self.draft))
    }

    /// Stores the result and moves on to the dashboard
    pub fn complete_submission(
        &mut self,
        result: AssessmentResult,
    ) -> Result<AssessmentView, SessionError> {
        if self.state != FlowState::Submitting {
            return Err(SessionError::InvalidTransition {
                state: self.state,
                action: "complete a submission",
            });
        }

        self.transition(FlowState::AssessmentComplete);
        let view = interpret(&result);
        self.result = Some(result);
        self.draft = AssessmentDraft::default();
        self.transition(FlowState::Dashboard);
        Ok(view)
    }

    /// Back to the form with the draft untouched
    pub fn fail_submission(&mut self) -> Result<(), SessionError> {
        if self.state != FlowState::Submitting {
            return Err(SessionError::InvalidTransition {
                state: self.state,
                action: "fail a submission",
            });
        }
        self.transition(FlowState::FillingAssessment);
        Ok(())
    }

    /// Clears every session field. Not possible while a submission is in flight.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        match self.state {
            FlowState::Submitting => Err(SessionError::SubmissionInFlight),
            FlowState::Unauthenticated => Err(SessionError::InvalidTransition {
                state: self.state,
                action: "log out",
            }),
            _ => {
                self.reset();
                Ok(())
            }
        }
    }

    fn reset(&mut self) {
        self.transition(FlowState::Unauthenticated);
        *self = Session::default();
    }
}

/// Process-wide handle on the session, shared by every request handler
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<Mutex<Session>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock().await
    }

    /// Runs one submission against the scoring service.
    ///
    /// The lock is released while the call is outstanding; the `Submitting`
    /// state keeps other submits and edits out in the meantime. The exchange
    /// runs on its own task, so it settles the session even if the caller
    /// stops waiting.
    pub async fn submit(
        &self,
        scoring: Arc<dyn ScoringService>,
    ) -> Result<Submitted, SessionError> {
        let request = self.lock().await.begin_submission()?;

        let context = self.clone();
        let exchange = tokio::spawn(async move {
            let outcome = scoring.assess(&request).await;
            context.settle(outcome).await
        });

        match exchange.await {
            Ok(settled) => settled,
            Err(join_error) => {
                // the task panicked before settling
                error!("Assessment task aborted: {}", join_error);
                self.lock().await.fail_submission()?;
                Err(SessionError::AssessmentFailed(AssessmentFailure::new(
                    format!("assessment task aborted: {}", join_error),
                )))
            }
        }
    }

    async fn settle(
        &self,
        outcome: Result<AssessmentResult, AssessmentFailure>,
    ) -> Result<Submitted, SessionError> {
        let mut session = self.lock().await;
        match outcome {
            Ok(result) => {
                let view = session.complete_submission(result)?;
                Ok(Submitted {
                    user_type: session.user_type(),
                    view,
                })
            }
            Err(failure) => {
                error!("Assessment API error: {}", failure);
                session.fail_submission()?;
                Err(SessionError::AssessmentFailed(failure))
            }
        }
    }
}

/// A settled submission, read in the same critical section that stored it
#[derive(Debug, Clone, PartialEq)]
pub struct Submitted {
    pub user_type: Option<UserType>,
    pub view: AssessmentView,
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::Notify;

    fn filled_session() -> Session {
        let mut session = Session::default();
        session.login(UserType::Business).unwrap();
        for field in DraftField::ALL {
            let value = match field {
                DraftField::AnnualRevenue => "120000",
                DraftField::YearsInBusiness => "4",
                DraftField::EmployeeCount => "7",
                DraftField::CreditScore => "",
                DraftField::MonthlyExpenses => "8000",
                DraftField::LoanAmount => "30000",
                _ => "filled",
            };
            session.update_field(field, value).unwrap();
        }
        session
    }

    struct FixedScoring(Result<AssessmentResult, AssessmentFailure>);

    #[async_trait]
    impl ScoringService for FixedScoring {
        async fn assess(
            &self,
            _request: &AssessmentRequest,
        ) -> Result<AssessmentResult, AssessmentFailure> {
            self.0.clone()
        }
    }

    /// Answers only once `release` is notified
    struct GatedScoring {
        release: Notify,
    }

    #[async_trait]
    impl ScoringService for GatedScoring {
        async fn assess(
            &self,
            _request: &AssessmentRequest,
        ) -> Result<AssessmentResult, AssessmentFailure> {
            self.release.notified().await;
            Ok(AssessmentResult {
                empowr_score: Some(81.0),
                ..Default::default()
            })
        }
    }

    async fn wait_until_settled(context: &SessionContext) -> FlowState {
        for _ in 0..200 {
            let state = context.lock().await.state();
            if state != FlowState::Submitting {
                return state;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        context.lock().await.state()
    }

    #[test]
    fn test_login_routes_by_user_type() {
        let mut business = Session::default();
        assert_eq!(
            business.login(UserType::Business).unwrap(),
            FlowState::FillingAssessment
        );

        let mut lender = Session::default();
        assert_eq!(lender.login(UserType::Lender).unwrap(), FlowState::Dashboard);
        assert!(lender.assessment_view().is_none());
    }

    #[test]
    fn test_missing_fields_keep_session_on_form() {
        let mut session = filled_session();
        session.update_field(DraftField::Location, "").unwrap();

        match session.begin_submission() {
            Err(SessionError::MissingFields(fields)) => {
                assert_eq!(fields, vec![DraftField::Location])
            }
            other => panic!("expected missing fields, got {:?}", other),
        }
        assert_eq!(session.state(), FlowState::FillingAssessment);
    }

    #[test]
    fn test_in_flight_submission_blocks_edits_and_resubmits() {
        let mut session = filled_session();
        session.begin_submission().unwrap();
        assert_eq!(session.state(), FlowState::Submitting);

        assert!(matches!(
            session.begin_submission(),
            Err(SessionError::SubmissionInFlight)
        ));
        assert!(matches!(
            session.update_field(DraftField::Email, "x"),
            Err(SessionError::SubmissionInFlight)
        ));
        assert!(matches!(
            session.logout(),
            Err(SessionError::SubmissionInFlight)
        ));
    }

    #[test]
    fn test_failed_submission_preserves_draft() {
        let mut session = filled_session();
        let before = session.draft().clone();

        session.begin_submission().unwrap();
        session.fail_submission().unwrap();

        assert_eq!(session.state(), FlowState::FillingAssessment);
        assert_eq!(session.draft(), &before);
        assert!(session.result().is_none());
    }

    #[test]
    fn test_logout_clears_everything() {
        let mut session = filled_session();
        session.begin_submission().unwrap();
        session
            .complete_submission(AssessmentResult {
                approved: Some(true),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(session.state(), FlowState::Dashboard);
        assert!(session.result().is_some());

        session.logout().unwrap();
        assert_eq!(session.state(), FlowState::Unauthenticated);
        assert_eq!(session.user_type(), None);
        assert!(session.result().is_none());
        assert_eq!(session.draft(), &AssessmentDraft::default());
    }

    #[test]
    fn test_back_to_login_resets_session() {
        let mut session = filled_session();
        session.back_to_login().unwrap();
        assert_eq!(session.state(), FlowState::Unauthenticated);
        assert_eq!(session.draft(), &AssessmentDraft::default());
    }

    #[test]
    fn test_actions_out_of_order_are_rejected() {
        let mut session = Session::default();
        assert!(matches!(
            session.begin_submission(),
            Err(SessionError::InvalidTransition { .. })
        ));
        assert!(session.logout().is_err());
        assert!(session.fail_submission().is_err());

        session.login(UserType::Lender).unwrap();
        assert!(session.login(UserType::Business).is_err());
        assert_eq!(session.state(), FlowState::Dashboard);
    }

    #[tokio::test]
    async fn test_submit_success_lands_on_dashboard() {
        let context = SessionContext::new();
        *context.lock().await = filled_session();

        let scoring = FixedScoring(Ok(AssessmentResult {
            approved: Some(true),
            empowr_score: Some(87.0),
            approved_amount: Some(75000.0),
            interest_rate: Some(7.2),
            ..Default::default()
        }));

        let submitted = context.submit(Arc::new(scoring)).await.unwrap();
        assert_eq!(submitted.user_type, Some(UserType::Business));
        assert!(submitted.view.is_approved);
        assert_eq!(submitted.view.amount, 75000.0);

        let session = context.lock().await;
        assert_eq!(session.state(), FlowState::Dashboard);
        assert_eq!(session.assessment_view(), Some(submitted.view));
    }

    #[tokio::test]
    async fn test_submit_failure_returns_to_form() {
        let context = SessionContext::new();
        *context.lock().await = filled_session();
        let draft = context.lock().await.draft().clone();

        let scoring = FixedScoring(Err(AssessmentFailure::new("scoring service returned 500")));
        let err = context.submit(Arc::new(scoring)).await.unwrap_err();
        assert!(matches!(err, SessionError::AssessmentFailed(_)));

        let session = context.lock().await;
        assert_eq!(session.state(), FlowState::FillingAssessment);
        assert_eq!(session.draft(), &draft);
    }

    #[tokio::test]
    async fn test_abandoned_submit_still_settles_session() {
        let context = SessionContext::new();
        *context.lock().await = filled_session();
        let scoring = Arc::new(GatedScoring {
            release: Notify::new(),
        });

        // the caller gives up while the scoring call is outstanding
        let abandoned =
            tokio::time::timeout(Duration::from_millis(50), context.submit(scoring.clone())).await;
        assert!(abandoned.is_err());
        assert_eq!(context.lock().await.state(), FlowState::Submitting);

        scoring.release.notify_one();
        assert_eq!(wait_until_settled(&context).await, FlowState::Dashboard);

        let mut session = context.lock().await;
        assert_eq!(session.assessment_view().unwrap().empowr_score, 81.0);
        session.logout().unwrap();
        assert_eq!(session.state(), FlowState::Unauthenticated);
    }
}
