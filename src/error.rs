// Copyright 2026 Hypermesh Foundation. All rights reserved.
// House Engine - Request Validation Errors

//! Errors raised while validating a [`SimulationRequest`](crate::SimulationRequest).
//!
//! Validation runs before the first simulation step, so a rejected request
//! never produces a partial run. Stuck or capped runs are not errors; they
//! are reported through [`Termination`](crate::Termination).

/// A request field was malformed or out of range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    #[error("field '{field}' must be an integer, got {value:?}")]
    NotAnInteger { field: String, value: String },

    #[error("field '{field}' must be non-negative, got {value}")]
    Negative { field: String, value: i64 },

    #[error("field '{field}' must be a boolean, got {value:?}")]
    InvalidBool { field: String, value: String },

    #[error("max_iterations must be at least 1")]
    ZeroIterations,

    #[error("malformed request: {reason}")]
    Malformed { reason: String },
}

impl ValidationError {
    pub(crate) fn not_an_integer(field: &str, value: &str) -> Self {
        Self::NotAnInteger { field: field.to_string(), value: value.to_string() }
    }

    pub(crate) fn negative(field: &str, value: i64) -> Self {
        Self::Negative { field: field.to_string(), value }
    }
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed { reason: err.to_string() }
    }
}

/// Result alias for request validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        let err = ValidationError::not_an_integer("seed", "abc");
        assert_eq!(err.to_string(), "field 'seed' must be an integer, got \"abc\"");

        let err = ValidationError::negative("initial_spare_tokens", -3);
        assert_eq!(err.to_string(), "field 'initial_spare_tokens' must be non-negative, got -3");
    }

    #[test]
    fn json_errors_become_malformed() {
        let json_err = serde_json::from_str::<u32>("not json").expect_err("test: invalid json");
        let err = ValidationError::from(json_err);
        assert!(matches!(err, ValidationError::Malformed { .. }), "got: {err}");
    }
}
