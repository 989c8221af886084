//! Ready-made layout commands offered to users as starting points.

use serde::Serialize;

/// A named layout command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    name: &'static str,
    description: &'static str,
    command: &'static str,
}

impl Preset {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Command text accepted by the layout generator.
    pub fn command(&self) -> &'static str {
        self.command
    }
}

const PRESETS: [Preset; 4] = [
    Preset {
        name: "Grid 4x4",
        description: "16 modules in a 4x4 grid",
        command: "arrange containers in a grid 4x4",
    },
    Preset {
        name: "Line of 10",
        description: "10 modules in a straight line",
        command: "create a line of 10 containers",
    },
    Preset {
        name: "Circle of 8",
        description: "8 modules in a circle",
        command: "place containers in a circle with radius 15",
    },
    Preset {
        name: "2 Rows",
        description: "10 modules in 2 rows",
        command: "place 10 containers in 2 rows",
    },
];

/// Returns the predefined layouts in display order.
pub fn presets() -> &'static [Preset] {
    &PRESETS
}

/// Looks a preset up by its display name, ignoring ASCII case.
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}
