//! # Gantry Parser
//!
//! Turns short natural-language layout commands into a
//! [`ParsedCommand`](gantry_core::command::ParsedCommand).
//!
//! Four command shapes are recognized, tried in this order:
//!
//! | Shape | Example | Result |
//! |-------|---------|--------|
//! | place count | `place 6 containers` | `place`, count 6 |
//! | grid | `arrange containers in a grid 3x4` | `arrange`, grid, rows 3, columns 4 |
//! | line | `create a line of 5 containers` | `create`, line, count 5 |
//! | circle | `place containers in a circle with radius 15` | `place`, circle, radius 15 |
//!
//! Any matched command that also contains `N rows` becomes a rows layout with
//! `N` rows. Matching is case-insensitive and ignores surrounding words.
//!
//! ## Usage
//!
//! ```
//! # use gantry_core::command::{Action, CommandPattern};
//! # use gantry_parser::{parse, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let command = parse("Place 10 containers in 2 rows")?;
//!
//!     assert_eq!(command.action(), Action::Place);
//!     assert_eq!(command.count(), Some(10));
//!     assert_eq!(command.pattern(), Some(CommandPattern::Rows));
//!     Ok(())
//! }
//! ```

pub mod error;
mod parser;
#[cfg(test)]
mod parser_tests;
mod span;

pub use error::ParseError;
pub use span::Span;

use log::debug;

use gantry_core::command::ParsedCommand;

use error::{Diagnostic, ErrorCode};

const COMMAND_HELP: &str = "try `place 10 containers in 2 rows`, \
`arrange containers in a grid 4x4`, `create a line of 10 containers` \
or `place containers in a circle with radius 15`";

/// Parses a command, returning `None` when no rule matches.
///
/// A rule whose phrase holds a number too large for a count is skipped, so a
/// later rule may still match. Oversized numbers elsewhere are ignored.
///
/// # Example
///
/// ```
/// # use gantry_parser::parse_command;
/// assert!(parse_command("create a line of 5 containers").is_some());
/// assert!(parse_command("stack the containers").is_none());
/// ```
pub fn parse_command(text: &str) -> Option<ParsedCommand> {
    let normalized = text.trim().to_lowercase();
    parser::evaluate(&normalized).command
}

/// Parses a command, reporting why it was rejected.
///
/// This is the strict variant of [`parse_command`]: besides failing with
/// [`ErrorCode::E100`] when no rule matches, it fails with one
/// [`ErrorCode::E101`] diagnostic per command phrase whose number is too
/// large for a count, even if another rule could have matched. Oversized
/// numbers that belong to no phrase are ignored like any other word.
///
/// Label spans are byte offsets into `text`.
pub fn parse(text: &str) -> Result<ParsedCommand, ParseError> {
    let trimmed = text.trim();
    let lead = text.len() - text.trim_start().len();
    let whole = Span::new(lead..lead + trimmed.len());
    let normalized = trimmed.to_lowercase();

    let evaluation = parser::evaluate(&normalized);

    if !evaluation.overflows.is_empty() {
        // Lowercasing can change byte lengths outside ASCII; fall back to
        // labeling the whole command when offsets no longer line up.
        let aligned = normalized.len() == trimmed.len();
        let diagnostics = evaluation
            .overflows
            .iter()
            .map(|overflow| {
                let diag = Diagnostic::error("number is too large")
                    .with_code(ErrorCode::E101)
                    .with_help("counts, grid sizes and radii must be at most 4294967295");
                if aligned {
                    diag.with_label(
                        overflow.span().shift(lead),
                        "does not fit in a 32-bit count",
                    )
                    .with_secondary_label(overflow.phrase().shift(lead), "read as part of this phrase")
                } else {
                    diag.with_label(whole, "contains a number that does not fit in a 32-bit count")
                }
            })
            .collect::<Vec<_>>();
        return Err(ParseError::new(diagnostics));
    }

    match evaluation.command {
        Some(command) => {
            debug!(
                action = command.action().to_string(),
                pattern = command.pattern().map(|p| p.to_string());
                "Parsed layout command"
            );
            Ok(command)
        }
        None => Err(Diagnostic::error("unrecognized command")
            .with_code(ErrorCode::E100)
            .with_label(whole, "no layout rule matches this text")
            .with_help(COMMAND_HELP)
            .into()),
    }
}
