//! The structured form of a layout command.
//!
//! A [`ParsedCommand`] is produced by the command parser from a short text
//! command, or constructed directly by a host, and consumed once by the
//! layout generator.
//!
//! # Examples
//!
//! ```
//! # use gantry_core::command::{Action, CommandParams, CommandPattern, ParsedCommand};
//! let command = ParsedCommand::new(Action::Arrange)
//!     .with_pattern(CommandPattern::Grid)
//!     .with_params(CommandParams::default().with_rows(3).with_columns(4));
//!
//! assert_eq!(command.action(), Action::Arrange);
//! assert_eq!(command.params().and_then(|p| p.columns()), Some(4));
//! assert_eq!(command.module_type(), "HD5");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identifier::ModuleKind;

/// What a command asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Place,
    Arrange,
    Create,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Place => write!(f, "place"),
            Action::Arrange => write!(f, "arrange"),
            Action::Create => write!(f, "create"),
        }
    }
}

/// The arrangement a command asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandPattern {
    Grid,
    Line,
    Circle,
    Rows,
}

impl fmt::Display for CommandPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandPattern::Grid => write!(f, "grid"),
            CommandPattern::Line => write!(f, "line"),
            CommandPattern::Circle => write!(f, "circle"),
            CommandPattern::Rows => write!(f, "rows"),
        }
    }
}

/// Numeric parameters attached to a command. Every field is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    columns: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    radius: Option<f64>,
    /// Direction of a line, in radians.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    angle: Option<f64>,
}

impl CommandParams {
    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn with_columns(mut self, columns: u32) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = Some(angle);
        self
    }

    pub fn rows(&self) -> Option<u32> {
        self.rows
    }

    pub fn columns(&self) -> Option<u32> {
        self.columns
    }

    pub fn spacing(&self) -> Option<f64> {
        self.spacing
    }

    pub fn radius(&self) -> Option<f64> {
        self.radius
    }

    pub fn angle(&self) -> Option<f64> {
        self.angle
    }
}

/// A structured layout command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedCommand {
    action: Action,
    module_type: ModuleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pattern: Option<CommandPattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    params: Option<CommandParams>,
}

impl ParsedCommand {
    /// Creates a command for the default module kind with no count, pattern or params
    pub fn new(action: Action) -> Self {
        Self {
            action,
            module_type: ModuleKind::default(),
            count: None,
            pattern: None,
            params: None,
        }
    }

    pub fn with_module_type(mut self, module_type: ModuleKind) -> Self {
        self.module_type = module_type;
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_pattern(mut self, pattern: CommandPattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Replaces the whole parameter bag
    pub fn with_params(mut self, params: CommandParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn module_type(&self) -> ModuleKind {
        self.module_type
    }

    pub fn count(&self) -> Option<u32> {
        self.count
    }

    pub fn pattern(&self) -> Option<CommandPattern> {
        self.pattern
    }

    pub fn params(&self) -> Option<&CommandParams> {
        self.params.as_ref()
    }
}
