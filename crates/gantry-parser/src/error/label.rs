//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// Whether a label marks the problem itself or only gives context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emphasis {
    Primary,
    Secondary,
}

/// A message attached to a range of the command text.
///
/// An out-of-range number gets a primary label on its digits and a secondary
/// label on the phrase it was read for:
///
/// ```text
/// error[E101]: number is too large
///   |
/// 1 | place 99999999999 containers
///   | ------^^^^^^^^^^^-----------
///   |       |          |
///   |       |          read as part of this phrase
///   |       does not fit in a 32-bit count
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    emphasis: Emphasis,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self::new(span, message, Emphasis::Primary)
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self::new(span, message, Emphasis::Secondary)
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.emphasis == Emphasis::Primary
    }

    pub fn is_secondary(&self) -> bool {
        self.emphasis == Emphasis::Secondary
    }

    fn new(span: Span, message: impl Into<String>, emphasis: Emphasis) -> Self {
        Self {
            span,
            message: message.into(),
            emphasis,
        }
    }
}
