//! Registration workflow: create the account, sign in, then commit the session.

use std::{collections::BTreeMap, sync::Arc};

use shared::{
    domain::{FormField, RegistrationInput},
    error::ValidationError,
    protocol::SignInRequest,
};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    api::AuthApi,
    error::{RegistrationError, StepFailure},
    reducer::{reduce, FormEvent, FormState, Transition},
    session::{Session, SessionStore},
    validation::ValidationResult,
};

/// The two-call handshake. Callers validate the input first; nothing here re-checks it.
pub struct RegistrationWorkflow {
    api: Arc<dyn AuthApi>,
    sessions: Arc<SessionStore>,
}

impl RegistrationWorkflow {
    pub fn new(api: Arc<dyn AuthApi>, sessions: Arc<SessionStore>) -> Self {
        Self { api, sessions }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub async fn create_account(&self, input: &RegistrationInput) -> Result<(), RegistrationError> {
        info!(email = %input.email, "creating account");
        match self.api.create_user(input).await {
            Ok(res) if res.success => Ok(()),
            Ok(res) => {
                warn!(email = %input.email, message = ?res.message, "account creation rejected");
                Err(RegistrationError::CreateAccount(StepFailure::Rejected {
                    message: res.message,
                }))
            }
            Err(err) => {
                warn!(email = %input.email, error = %err, "account creation request failed");
                Err(RegistrationError::CreateAccount(err.into()))
            }
        }
    }

    /// Signs in with the credentials just registered and, on success, writes the session.
    pub async fn sign_in(&self, input: &RegistrationInput) -> Result<Session, RegistrationError> {
        let request = SignInRequest::from_input(input);
        let failure = match self.api.sign_in(&request).await {
            Ok(res) if res.success => match res.user {
                Some(profile) => return Ok(self.sessions.establish(profile, res.token).await),
                None => StepFailure::Rejected {
                    message: Some("sign-in response carried no user record".to_string()),
                },
            },
            Ok(res) => StepFailure::Rejected {
                message: res.message,
            },
            Err(err) => StepFailure::Api(err),
        };
        // No compensation: the remote account stays and the user has to sign in manually.
        warn!(
            email = %input.email,
            error = %failure,
            "account created but sign-in failed; no local session"
        );
        Err(RegistrationError::SignIn(failure))
    }

    pub async fn submit(&self, input: &RegistrationInput) -> Result<Session, RegistrationError> {
        self.create_account(input).await?;
        self.sign_in(input).await
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Invalid(ValidationError),
    AlreadySubmitting,
    Failed(RegistrationError),
    SessionEstablished(Session),
}

/// What the form layer needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub values: RegistrationInput,
    pub field_errors: BTreeMap<FormField, String>,
    pub error: Option<String>,
    pub submitting: bool,
}

/// One per form instance.
pub struct RegistrationController {
    workflow: RegistrationWorkflow,
    form: Mutex<FormState>,
}

impl RegistrationController {
    pub fn new(workflow: RegistrationWorkflow) -> Self {
        Self {
            workflow,
            form: Mutex::new(FormState::default()),
        }
    }

    pub fn workflow(&self) -> &RegistrationWorkflow {
        &self.workflow
    }

    // Submission events are only sent from `submit`, so the phase cannot be
    // moved from outside the controller.
    async fn dispatch(&self, event: FormEvent) -> Transition {
        let mut guard = self.form.lock().await;
        let transition = reduce(&guard, event);
        *guard = transition.state.clone();
        transition
    }

    pub async fn change_field(&self, field: FormField, value: impl Into<String>) -> ValidationResult {
        self.dispatch(FormEvent::FieldChanged {
            field,
            value: value.into(),
        })
        .await
        .validation
        .unwrap_or(Ok(()))
    }

    pub async fn blur_field(&self, field: FormField) {
        self.dispatch(FormEvent::FieldBlurred(field)).await;
    }

    pub async fn state(&self) -> FormState {
        self.form.lock().await.clone()
    }

    pub async fn view(&self) -> FormView {
        let state = self.form.lock().await;
        let field_errors = FormField::ALL
            .into_iter()
            .filter_map(|field| state.display_error(field).map(|err| (field, err)))
            .collect();
        FormView {
            values: state.values.clone(),
            field_errors,
            error: state.error.clone(),
            submitting: state.is_submitting(),
        }
    }

    /// Validates the current values and runs the handshake. A call made while
    /// another submission is in flight does nothing.
    pub async fn submit(&self) -> SubmitOutcome {
        let transition = self.dispatch(FormEvent::SubmitPressed).await;
        let Some(input) = transition.submission else {
            return match transition.validation {
                Some(Err(err)) => SubmitOutcome::Invalid(err),
                _ => SubmitOutcome::AlreadySubmitting,
            };
        };

        if let Err(err) = self.workflow.create_account(&input).await {
            return self.fail(err).await;
        }
        self.dispatch(FormEvent::AccountCreated).await;

        match self.workflow.sign_in(&input).await {
            Ok(session) => {
                self.dispatch(FormEvent::SubmitSucceeded).await;
                SubmitOutcome::SessionEstablished(session)
            }
            Err(err) => self.fail(err).await,
        }
    }

    async fn fail(&self, err: RegistrationError) -> SubmitOutcome {
        self.dispatch(FormEvent::SubmitFailed {
            message: err.user_message().to_string(),
        })
        .await;
        SubmitOutcome::Failed(err)
    }
}

#[cfg(test)]
#[path = "tests/registration_tests.rs"]
mod tests;
