//! The core diagnostic type for the command parser.

use std::fmt;

use crate::{
    error::{error_code::ErrorCode, label::Label},
    span::Span,
};

/// Why a command was rejected, with the parts of the text to blame.
///
/// ```text
/// error[E100]: unrecognized command
///   |
/// 1 | stack the containers
///   | ^^^^^^^^^^^^^^^^^^^^ no layout rule matches this text
///   |
///   = help: try `place 10 containers in 2 rows`
/// ```
///
/// Every diagnostic the parser produces is an error; a command either yields
/// a [`ParsedCommand`](gantry_core::command::ParsedCommand) or is rejected.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Starts an error diagnostic with no code, labels or help.
    ///
    /// ```
    /// # use gantry_parser::error::{Diagnostic, ErrorCode};
    /// # use gantry_parser::Span;
    ///
    /// let diag = Diagnostic::error("number is too large")
    ///     .with_code(ErrorCode::E101)
    ///     .with_label(Span::new(6..17), "does not fit in a 32-bit count");
    /// assert_eq!(diag.to_string(), "error[E101]: number is too large");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Labels in the order they were added; the primary label comes first.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Marks `span` as the place the problem is.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Marks `span` as context for the primary label.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "error[{code}]: {}", self.message),
            None => write!(f, "error: {}", self.message),
        }
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_error() {
        let diag = Diagnostic::error("unrecognized command");

        assert_eq!(diag.message(), "unrecognized command");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
        assert_eq!(diag.to_string(), "error: unrecognized command");
    }

    #[test]
    fn test_overflow_shape() {
        let diag = Diagnostic::error("number is too large")
            .with_code(ErrorCode::E101)
            .with_label(Span::new(6..17), "here")
            .with_secondary_label(Span::new(0..28), "in this phrase")
            .with_help("use a smaller number");

        assert_eq!(diag.to_string(), "error[E101]: number is too large");
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
        assert_eq!(diag.help(), Some("use a smaller number"));
    }
}
