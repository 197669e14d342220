use thiserror::Error;

use crate::domain::FormField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required all fields!")]
    RequiredAllFields,
    #[error("Name is required!")]
    NameRequired,
    #[error("Invalid name!")]
    InvalidName,
    #[error("Email is required!")]
    EmailRequired,
    #[error("Invalid email!")]
    InvalidEmail,
    #[error("Password is required!")]
    PasswordRequired,
    #[error("Password is less than 8 characters!")]
    PasswordTooShort,
    #[error("Password does not match!")]
    PasswordMismatch,
}

impl ValidationError {
    /// Field the error belongs to; `None` when it concerns the whole form.
    pub fn field(self) -> Option<FormField> {
        match self {
            ValidationError::RequiredAllFields => None,
            ValidationError::NameRequired | ValidationError::InvalidName => {
                Some(FormField::FullName)
            }
            ValidationError::EmailRequired | ValidationError::InvalidEmail => {
                Some(FormField::Email)
            }
            ValidationError::PasswordRequired | ValidationError::PasswordTooShort => {
                Some(FormField::Password)
            }
            ValidationError::PasswordMismatch => Some(FormField::ConfirmPassword),
        }
    }
}
