//! Error codes for command diagnostics.
//!
//! Codes in the `E1xx` range are raised while matching command text against
//! the layout rules.

use std::fmt;

/// Stable identifier of a class of diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// No layout rule matches the command text.
    E100,
    /// A number in the command does not fit in a count.
    E101,
}

impl ErrorCode {
    /// Returns the error code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unrecognized command",
            ErrorCode::E101 => "number out of range",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
