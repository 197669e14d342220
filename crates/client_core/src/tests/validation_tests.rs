use super::*;

fn valid_input() -> RegistrationInput {
    RegistrationInput::new("John Smith", "john@example.com", "password123", "password123")
}

#[test]
fn accepts_fully_valid_input() {
    assert_eq!(validate(&valid_input()), Ok(()));
}

#[test]
fn validation_is_repeatable() {
    let input = RegistrationInput::new("Jo", "john@example.com", "password123", "password123");
    let first = validate(&input);
    let second = validate(&input);
    assert_eq!(first, second);
    assert_eq!(first, Err(ValidationError::InvalidName));
}

#[test]
fn blank_fields_fail_before_any_other_rule() {
    for field in FormField::ALL {
        for blank in ["", "   ", "\t\n"] {
            let mut input = valid_input();
            input.set(field, blank);
            assert_eq!(
                validate(&input),
                Err(ValidationError::RequiredAllFields),
                "field {field} blank as {blank:?}"
            );
        }
    }

    // An otherwise-invalid name does not mask the missing field.
    let input = RegistrationInput::new("Jo", "", "short", "other");
    assert_eq!(validate(&input), Err(ValidationError::RequiredAllFields));
}

#[test]
fn short_names_are_rejected_after_trimming() {
    for name in ["Jo", "  Jo  ", "A"] {
        let mut input = valid_input();
        input.full_name = name.to_string();
        assert_eq!(validate(&input), Err(ValidationError::InvalidName), "{name:?}");
    }

    let mut input = valid_input();
    input.full_name = "Ann".to_string();
    assert_eq!(validate(&input), Ok(()));
}

#[test]
fn name_length_counts_characters() {
    let mut input = valid_input();
    input.full_name = "Zoë".to_string();
    assert_eq!(validate(&input), Ok(()));
}

#[test]
fn email_shape_is_checked() {
    for bad in ["not-an-email", "a@b", "@example.com", "john@", "john@@example.com", "john doe@example.com"] {
        let mut input = valid_input();
        input.email = bad.to_string();
        assert_eq!(validate(&input), Err(ValidationError::InvalidEmail), "{bad:?}");
    }

    for good in ["a@b.com", "john.smith@example.co.uk", "j-s@mail.example.org"] {
        assert!(is_valid_email(good), "{good:?}");
    }
}

#[test]
fn plus_addresses_and_long_tlds_are_accepted() {
    for good in ["a+b@example.com", "x@example.info", "first.last+tag@sub.example.museum"] {
        let mut input = valid_input();
        input.email = good.to_string();
        assert_eq!(validate(&input), Ok(()), "{good:?}");
    }
}

#[test]
fn non_ascii_addresses_are_rejected() {
    for bad in ["jöhn@exämple.com", "джон@пример.рф", "john@example.c"] {
        assert!(!is_valid_email(bad), "{bad:?}");
    }
}

#[test]
fn short_passwords_are_rejected_after_trimming() {
    let mut input = valid_input();
    input.password = "short".to_string();
    input.confirm_password = "short".to_string();
    assert_eq!(validate(&input), Err(ValidationError::PasswordTooShort));

    input.password = "  1234567  ".to_string();
    input.confirm_password = input.password.clone();
    assert_eq!(validate(&input), Err(ValidationError::PasswordTooShort));
}

#[test]
fn confirmation_must_match_exactly() {
    for confirm in ["Password123", "password123 ", "password12"] {
        let mut input = valid_input();
        input.confirm_password = confirm.to_string();
        assert_eq!(validate(&input), Err(ValidationError::PasswordMismatch), "{confirm:?}");
    }
}

#[test]
fn error_messages_match_form_copy() {
    assert_eq!(ValidationError::RequiredAllFields.to_string(), "Required all fields!");
    assert_eq!(ValidationError::InvalidName.to_string(), "Invalid name!");
    assert_eq!(ValidationError::InvalidEmail.to_string(), "Invalid email!");
    assert_eq!(
        ValidationError::PasswordTooShort.to_string(),
        "Password is less than 8 characters!"
    );
    assert_eq!(ValidationError::PasswordMismatch.to_string(), "Password does not match!");
}

#[test]
fn whole_form_errors_point_at_first_offending_field() {
    assert_eq!(ValidationError::RequiredAllFields.field(), None);
    assert_eq!(ValidationError::InvalidEmail.field(), Some(FormField::Email));
    assert_eq!(
        ValidationError::PasswordMismatch.field(),
        Some(FormField::ConfirmPassword)
    );
}

#[test]
fn field_errors_are_reported_independently() {
    let errors = field_errors(&RegistrationInput::new("", "nope", "short", "shorter"));
    assert_eq!(errors.full_name, Some(ValidationError::NameRequired));
    assert_eq!(errors.email, Some(ValidationError::InvalidEmail));
    assert_eq!(errors.password, Some(ValidationError::PasswordTooShort));
    assert_eq!(errors.confirm_password, Some(ValidationError::PasswordMismatch));

    let errors = field_errors(&RegistrationInput::new("Jo", " ", "", ""));
    assert_eq!(errors.full_name, Some(ValidationError::InvalidName));
    assert_eq!(errors.email, Some(ValidationError::EmailRequired));
    assert_eq!(errors.password, Some(ValidationError::PasswordRequired));
    assert_eq!(errors.confirm_password, None);

    assert!(field_errors(&valid_input()).is_empty());
}
