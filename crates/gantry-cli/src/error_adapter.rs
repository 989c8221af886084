//! Turns a [`GantryError`] into miette reports.
//!
//! A parse failure can carry several diagnostics; each becomes its own
//! report with the command text as its source snippet. Every other error is
//! a single report without a snippet.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceCode, SourceSpan};

use gantry::GantryError;
use gantry_parser::error::Diagnostic;

const SITE_HELP: &str = r#"site documents look like {"bounds": {"min": [x, y, z], "max": [x, y, z]}, "placements": [...]}"#;

/// One error report, ready for a miette handler.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A parser diagnostic together with the command text it points into.
    Command { diag: &'a Diagnostic, src: &'a str },
    /// Any failure that has no command text to underline.
    Failure(&'a GantryError),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Command { diag, .. } => f.write_str(diag.message()),
            Reportable::Failure(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Command { .. } => None,
            Reportable::Failure(err) => std::error::Error::source(*err),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Command { diag, .. } => diag
                .code()
                .map(|code| Box::new(code) as Box<dyn fmt::Display>),
            Reportable::Failure(err) => {
                failure_code(err).map(|code| Box::new(code) as Box<dyn fmt::Display>)
            }
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self {
            Reportable::Command { diag, .. } => diag.help()?,
            Reportable::Failure(GantryError::Site(_)) => SITE_HELP,
            Reportable::Failure(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            Reportable::Command { src, .. } => Some(src as &dyn SourceCode),
            Reportable::Failure(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Reportable::Command { diag, .. } = self else {
            return None;
        };
        if diag.labels().is_empty() {
            return None;
        }

        Some(Box::new(diag.labels().iter().map(|label| {
            let span = SourceSpan::new(label.span().start().into(), label.span().len());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

fn failure_code(err: &GantryError) -> Option<&'static str> {
    match err {
        GantryError::Io(_) => Some("gantry::io"),
        GantryError::Parse { .. } => None,
        GantryError::Site(_) => Some("gantry::site"),
        GantryError::Config(_) => Some("gantry::config"),
        GantryError::Serialize(_) => Some("gantry::serialize"),
    }
}

/// Splits `err` into the reports to render, one per parse diagnostic.
pub fn to_reportables(err: &GantryError) -> Vec<Reportable<'_>> {
    match err {
        GantryError::Parse { err, src } => err
            .diagnostics()
            .iter()
            .map(|diag| Reportable::Command {
                diag,
                src: src.as_str(),
            })
            .collect(),
        _ => vec![Reportable::Failure(err)],
    }
}
