//! Error and diagnostic system for the Gantry command parser.
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error message with an optional error code, labeled
//! source locations, and help text. Diagnostics are wrapped in [`ParseError`]
//! when returned from [`parse`](crate::parse).
//!
//! # Example
//!
//! ```
//! # use gantry_parser::error::{Diagnostic, ErrorCode};
//! # use gantry_parser::Span;
//!
//! let diag = Diagnostic::error("unrecognized command")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Span::new(0..12), "no layout rule matches this text")
//!     .with_help("try `create a line of 5 containers`");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
