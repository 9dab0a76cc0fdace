//! Field-level validation shared by entity drafts and patches.

use rust_decimal::Decimal;
use serde_json::json;

use super::Error;

/// A single field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be a valid email address")]
    InvalidEmail { field: &'static str },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
}

impl FieldValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field }
            | Self::InvalidEmail { field }
            | Self::Negative { field }
            | Self::NotPositive { field } => field,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Empty { .. } => "empty",
            Self::InvalidEmail { .. } => "invalid_email",
            Self::Negative { .. } => "negative",
            Self::NotPositive { .. } => "not_positive",
        }
    }
}

impl From<FieldValidationError> for Error {
    fn from(value: FieldValidationError) -> Self {
        Error::invalid_request(value.to_string())
            .with_details(json!({ "field": value.field(), "code": value.code() }))
    }
}

pub(crate) fn non_empty(field: &'static str, value: &str) -> Result<(), FieldValidationError> {
    if value.trim().is_empty() {
        return Err(FieldValidationError::Empty { field });
    }
    Ok(())
}

pub(crate) fn email(field: &'static str, value: &str) -> Result<(), FieldValidationError> {
    non_empty(field, value)?;
    let trimmed = value.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(FieldValidationError::InvalidEmail { field }),
    }
}

pub(crate) fn non_negative(field: &'static str, value: Decimal) -> Result<(), FieldValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(FieldValidationError::Negative { field });
    }
    Ok(())
}

pub(crate) fn positive(field: &'static str, value: i32) -> Result<(), FieldValidationError> {
    if value <= 0 {
        return Err(FieldValidationError::NotPositive { field });
    }
    Ok(())
}

/// Run `check` against an optional patch field.
pub(crate) fn optional<T, F>(value: Option<&T>, check: F) -> Result<(), FieldValidationError>
where
    T: ?Sized,
    F: FnOnce(&T) -> Result<(), FieldValidationError>,
{
    value.map_or(Ok(()), check)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("ada@example.com", true)]
    #[case("  ada@example.com ", true)]
    #[case("ada.example.com", false)]
    #[case("@example.com", false)]
    #[case("ada@", false)]
    #[case("   ", false)]
    fn email_checks_shape(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(email("emailAddress", value).is_ok(), valid);
    }

    #[rstest]
    fn negative_decimals_are_rejected() {
        assert!(non_negative("cost", Decimal::new(-1, 2)).is_err());
        assert!(non_negative("cost", Decimal::ZERO).is_ok());
        assert!(non_negative("cost", Decimal::new(49_900, 2)).is_ok());
    }

    #[rstest]
    fn converts_to_invalid_request_with_field_details() {
        let error: Error = FieldValidationError::Empty { field: "name" }.into();
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("details present");
        assert_eq!(details["field"], "name");
        assert_eq!(details["code"], "empty");
    }
}
