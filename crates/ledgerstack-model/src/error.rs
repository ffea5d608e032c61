//! Remote-reported error records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One error entry from a response's `Errors` collection.
///
/// These are business-level failures reported by the remote service
/// (validation messages, rejected fields, API exceptions). They are decoded
/// as plain data and returned inside a successfully parsed envelope; they
/// are never raised as Rust errors. An envelope with a non-empty error
/// sequence is a failed request from the caller's point of view, inspected
/// via `ApiResponse::success`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiError {
    /// Provider error code or number, when present.
    pub code: Option<String>,
    /// Human-readable description or message.
    pub description: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, &self.description) {
            (Some(code), Some(desc)) => write!(f, "{code}: {desc}"),
            (Some(code), None) => f.write_str(code),
            (None, Some(desc)) => f.write_str(desc),
            (None, None) => f.write_str("unspecified remote error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_display_code_and_description() {
        let err = ApiError {
            code: Some("10".to_owned()),
            description: Some("A validation exception occurred".to_owned()),
        };
        assert_eq!(err.to_string(), "10: A validation exception occurred");
    }

    #[test]
    fn test_should_display_description_alone() {
        let err = ApiError {
            code: None,
            description: Some("Email address must be valid".to_owned()),
        };
        assert_eq!(err.to_string(), "Email address must be valid");
    }
}
