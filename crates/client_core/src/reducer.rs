//! Sign-up form state and its transitions.
//!
//! Every change to the form goes through [`reduce`], which takes the current
//! state and one event and returns the next state. The submission phase kept
//! here is the only record of whether a submission is in flight.

use std::collections::BTreeSet;

use shared::domain::{FormField, RegistrationInput};

use crate::validation::{field_errors, validate, FieldErrors, ValidationResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    CreatingAccount,
    SigningIn,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub values: RegistrationInput,
    pub touched: BTreeSet<FormField>,
    pub error: Option<String>,
    pub phase: SubmissionPhase,
}

impl FormState {
    pub fn is_submitting(&self) -> bool {
        self.phase != SubmissionPhase::Idle
    }

    /// Inline error for `field`, hidden until the user has left the field once.
    pub fn display_error(&self, field: FormField) -> Option<String> {
        if !self.touched.contains(&field) {
            return None;
        }
        field_errors(&self.values)
            .get(field)
            .map(|err| err.to_string())
    }

    pub fn field_errors(&self) -> FieldErrors {
        field_errors(&self.values)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    FieldChanged { field: FormField, value: String },
    FieldBlurred(FormField),
    SubmitPressed,
    AccountCreated,
    SubmitSucceeded,
    SubmitFailed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: FormState,
    pub validation: Option<ValidationResult>,
    /// Payload to send when this transition starts a submission.
    pub submission: Option<RegistrationInput>,
}

impl Transition {
    fn state(state: FormState) -> Self {
        Self {
            state,
            validation: None,
            submission: None,
        }
    }
}

pub fn reduce(state: &FormState, event: FormEvent) -> Transition {
    let mut next = state.clone();
    match event {
        FormEvent::FieldChanged { field, value } => {
            next.values.set(field, value);
            let validation = validate(&next.values);
            Transition {
                state: next,
                validation: Some(validation),
                submission: None,
            }
        }
        FormEvent::FieldBlurred(field) => {
            next.touched.insert(field);
            Transition::state(next)
        }
        FormEvent::SubmitPressed => {
            if state.is_submitting() {
                return Transition::state(next);
            }
            next.touched.extend(FormField::ALL);
            let validation = validate(&next.values);
            let submission = match &validation {
                Ok(()) => {
                    next.error = None;
                    next.phase = SubmissionPhase::CreatingAccount;
                    Some(next.values.clone())
                }
                Err(err) => {
                    next.error = Some(err.to_string());
                    None
                }
            };
            Transition {
                state: next,
                validation: Some(validation),
                submission,
            }
        }
        FormEvent::AccountCreated => {
            if state.phase == SubmissionPhase::CreatingAccount {
                next.phase = SubmissionPhase::SigningIn;
            }
            Transition::state(next)
        }
        FormEvent::SubmitSucceeded => Transition::state(FormState::default()),
        FormEvent::SubmitFailed { message } => {
            next.phase = SubmissionPhase::Idle;
            next.error = Some(message);
            Transition::state(next)
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
