//! Field validators shared by the record forms
//!
//! Used through `#[validate(custom = "...")]` on the form structs.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

use crate::utils::errors::{validation_error, AppError};
use crate::utils::money::Amount;

pub const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

lazy_static! {
    pub static ref USERNAME_RE: Regex = Regex::new(r"^[\w.@+-]+$").unwrap();
}

fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// A `DECIMAL(10,2)` value that is not negative.
pub fn validate_amount(value: &Decimal) -> Result<(), ValidationError> {
    let amount = Amount::try_from(*value).map_err(|e| error("decimal", e.to_string()))?;
    if amount.is_negative() {
        return Err(error(
            "min_value",
            "Ensure this value is greater than or equal to 0.",
        ));
    }
    Ok(())
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "This field is required."));
    }
    Ok(())
}

pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < 8 {
        return Err(error(
            "password_too_short",
            "This password is too short. It must contain at least 8 characters.",
        ));
    }
    if value.chars().all(|c| c.is_ascii_digit()) {
        return Err(error(
            "password_entirely_numeric",
            "This password is entirely numeric.",
        ));
    }
    Ok(())
}

/// Starts a form's error set from its derived validation result, so that
/// checks needing the store can add to it.
pub fn collect_errors(result: Result<(), ValidationErrors>) -> ValidationErrors {
    result.err().unwrap_or_else(ValidationErrors::new)
}

pub fn add_field_error(
    errors: &mut ValidationErrors,
    field: &'static str,
    message: impl Into<Cow<'static, str>>,
) {
    errors.add(field, error("invalid", message));
}

pub fn ensure_valid(errors: ValidationErrors) -> Result<(), AppError> {
    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// Unwraps a form field that derived validation has already checked with
/// `required`.
pub fn required<T>(value: Option<T>, field: &'static str) -> Result<T, AppError> {
    value.ok_or_else(|| validation_error(field, "This field is required."))
}

pub fn to_amount(value: Decimal, field: &'static str) -> Result<Amount, AppError> {
    Amount::try_from(value).map_err(|e| validation_error(field, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_amount_rejects_negative_values() {
        let err = validate_amount(&Decimal::from_str("-0.01").unwrap()).unwrap_err();
        assert_eq!(err.code, "min_value");
    }

    #[test]
    fn test_amount_rejects_extra_places() {
        let err = validate_amount(&Decimal::from_str("12.345").unwrap()).unwrap_err();
        assert_eq!(err.code, "decimal");
    }

    #[test]
    fn test_amount_accepts_zero() {
        assert!(validate_amount(&Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_not_blank() {
        assert!(validate_not_blank("  ").is_err());
        assert!(validate_not_blank("V-100").is_ok());
    }

    #[test]
    fn test_password_rules() {
        assert_eq!(validate_password("short").unwrap_err().code, "password_too_short");
        assert_eq!(
            validate_password("1234567890").unwrap_err().code,
            "password_entirely_numeric"
        );
        assert!(validate_password("correct-horse").is_ok());
    }

    #[test]
    fn test_collected_errors_are_reported_together() {
        assert!(ensure_valid(collect_errors(Ok(()))).is_ok());

        let mut errors = collect_errors(Ok(()));

        add_field_error(&mut errors, "vehicle", "Select a valid choice.");
        add_field_error(&mut errors, "driver", "Select a valid choice.");
        match ensure_valid(errors) {
            Err(AppError::Validation(e)) => assert_eq!(e.field_errors().len(), 2),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_username_pattern() {
        assert!(USERNAME_RE.is_match("fleet.admin+ops@depot"));
        assert!(!USERNAME_RE.is_match("fleet admin"));
    }
}
