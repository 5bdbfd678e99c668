//! Errors raised by the accounting model before anything reaches the store.

use thiserror::Error;

/// Malformed user input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be a positive number (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("no transaction with id {0}")]
    UnknownTransaction(i64),

    #[error("no vault with id {0}")]
    UnknownVault(i64),

    #[error("invalid {field}: {value:?}")]
    Malformed { field: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccountingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Advisory: the store is the authority on balances.
    #[error("insufficient funds: requested {requested:.2}, available {available:.2}")]
    InsufficientFunds { requested: f64, available: f64 },
}

pub type Result<T> = std::result::Result<T, AccountingError>;

/// Require a finite, strictly positive amount.
pub(crate) fn positive(field: &'static str, value: f64) -> std::result::Result<f64, ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive { field, value })
    }
}

/// Require non-blank text; returns it trimmed.
pub(crate) fn required<'a>(field: &'static str, value: &'a str) -> std::result::Result<&'a str, ValidationError> {
    let v = value.trim();
    if v.is_empty() {
        Err(ValidationError::Missing { field })
    } else {
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_rejects_zero_negative_nan() {
        assert!(positive("amount", 0.0).is_err());
        assert!(positive("amount", -5.0).is_err());
        assert!(positive("amount", f64::NAN).is_err());
        assert!(positive("amount", f64::INFINITY).is_err());
        assert_eq!(positive("amount", 12.5), Ok(12.5));
    }

    #[test]
    fn test_required_trims() {
        assert_eq!(required("name", "  Trip "), Ok("Trip"));
        assert_eq!(
            required("name", "   "),
            Err(ValidationError::Missing { field: "name" })
        );
    }

    #[test]
    fn test_insufficient_funds_message() {
        let err = AccountingError::InsufficientFunds {
            requested: 500.0,
            available: 300.0,
        };
        assert_eq!(
            err.to_string(),
            "insufficient funds: requested 500.00, available 300.00"
        );
    }
}
