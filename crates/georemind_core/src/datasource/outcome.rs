//! Success/error envelope returned by every data-source operation.

use serde::{Deserialize, Serialize};

/// Result of a data-source call.
///
/// Errors are carried as data; nothing crosses the data-source boundary
/// as a panic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Outcome<T> {
    Success(T),
    Error {
        message: String,
        code: Option<i32>,
    },
}

impl<T> Outcome<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            code: None,
        }
    }

    pub fn error_with_code(message: impl Into<String>, code: i32) -> Self {
        Self::Error {
            message: message.into(),
            code: Some(code),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Returns the error message, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Error { message, .. } => Some(message.as_str()),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Error { message, code } => Outcome::Error { message, code },
        }
    }

    /// Converts into a `Result`, keeping only the error message.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Error { message, .. } => Err(message),
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for Outcome<T> {
    fn from(value: Result<T, E>) -> Self {
        match value {
            Ok(value) => Self::Success(value),
            Err(err) => Self::error(err.to_string()),
        }
    }
}
