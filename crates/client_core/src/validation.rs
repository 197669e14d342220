//! Client-side rules for the sign-up form.

use std::sync::LazyLock;

use regex::Regex;
use shared::{
    domain::{FormField, RegistrationInput},
    error::ValidationError,
};

pub const MIN_NAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

pub type ValidationResult = Result<(), ValidationError>;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn trimmed_len(value: &str) -> usize {
    value.trim().chars().count()
}

/// Whole-form check. Rules run in a fixed order and the first failure wins.
pub fn validate(input: &RegistrationInput) -> ValidationResult {
    if FormField::ALL
        .iter()
        .any(|field| input.get(*field).trim().is_empty())
    {
        return Err(ValidationError::RequiredAllFields);
    }
    if trimmed_len(&input.full_name) < MIN_NAME_LEN {
        return Err(ValidationError::InvalidName);
    }
    if !is_valid_email(&input.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if trimmed_len(&input.password) < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if input.password != input.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub full_name: Option<ValidationError>,
    pub email: Option<ValidationError>,
    pub password: Option<ValidationError>,
    pub confirm_password: Option<ValidationError>,
}

impl FieldErrors {
    pub fn get(&self, field: FormField) -> Option<ValidationError> {
        match field {
            FormField::FullName => self.full_name,
            FormField::Email => self.email,
            FormField::Password => self.password,
            FormField::ConfirmPassword => self.confirm_password,
        }
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|field| self.get(*field).is_none())
    }
}

/// Independent per-field checks used for inline hints next to each input.
pub fn field_errors(input: &RegistrationInput) -> FieldErrors {
    let full_name = if input.full_name.trim().is_empty() {
        Some(ValidationError::NameRequired)
    } else if trimmed_len(&input.full_name) < MIN_NAME_LEN {
        Some(ValidationError::InvalidName)
    } else {
        None
    };

    let email = if input.email.trim().is_empty() {
        Some(ValidationError::EmailRequired)
    } else if !is_valid_email(&input.email) {
        Some(ValidationError::InvalidEmail)
    } else {
        None
    };

    let password = if input.password.trim().is_empty() {
        Some(ValidationError::PasswordRequired)
    } else if trimmed_len(&input.password) < MIN_PASSWORD_LEN {
        Some(ValidationError::PasswordTooShort)
    } else {
        None
    };

    let confirm_password =
        (input.password != input.confirm_password).then_some(ValidationError::PasswordMismatch);

    FieldErrors {
        full_name,
        email,
        password,
        confirm_password,
    }
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
