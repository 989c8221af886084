//! Placed modules, placement suggestions and site documents.
//!
//! These are the values exchanged between the layout engine and its host:
//! the host hands the engine a roster of [`ModulePlacement`]s and receives new
//! placements or ranked [`PlacementSuggestion`]s back.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Bounds, Position, Rotation},
    identifier::ModuleKind,
};

/// A module instance placed on the site.
///
/// The `id` is assigned by whoever creates the placement and must be unique
/// within any roster handed to the engine. The engine never deduplicates.
///
/// # Examples
///
/// ```
/// # use gantry_core::{geometry::Position, identifier::ModuleKind, placement::ModulePlacement};
/// let placement = ModulePlacement::new("module_0", ModuleKind::default(), Position::new(1.0, 0.0, 2.0));
///
/// assert_eq!(placement.id(), "module_0");
/// assert_eq!(placement.kind(), "HD5");
/// assert!(placement.rotation().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModulePlacement {
    id: String,
    #[serde(rename = "type")]
    kind: ModuleKind,
    position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rotation: Option<Rotation>,
}

impl ModulePlacement {
    pub fn new(id: impl Into<String>, kind: ModuleKind, position: Position) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            rotation: None,
        }
    }

    /// Sets the rotation carried through to the rendering layer
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ModuleKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn rotation(&self) -> Option<Rotation> {
        self.rotation
    }
}

/// Why a position was suggested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuggestionReason {
    /// A free cell of the site-filling grid.
    #[serde(rename = "optimal grid placement")]
    Grid,

    /// A free cardinal neighbor of an existing module.
    #[serde(rename = "optimal adjacent placement")]
    Adjacent,
}

impl SuggestionReason {
    /// Human-readable justification shown next to the suggestion
    pub fn as_str(self) -> &'static str {
        match self {
            SuggestionReason::Grid => "optimal grid placement",
            SuggestionReason::Adjacent => "optimal adjacent placement",
        }
    }
}

impl fmt::Display for SuggestionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored candidate position for a new module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementSuggestion {
    position: Position,
    confidence: f64,
    reason: SuggestionReason,
}

impl PlacementSuggestion {
    /// Creates a suggestion; `confidence` is clamped into `[0, 1]`.
    pub fn new(position: Position, confidence: f64, reason: SuggestionReason) -> Self {
        Self {
            position,
            confidence: confidence.clamp(0.0, 1.0),
            reason,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Preference score in `[0, 1]`; higher is more preferred
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn reason(&self) -> SuggestionReason {
        self.reason
    }
}

/// A roster of placed modules with optional site bounds.
///
/// This is the document hosts use to hand a whole site to the engine, for
/// instance as a JSON file:
///
/// ```json
/// {
///   "bounds": { "min": [0, 0, 0], "max": [100, 0, 60] },
///   "placements": [
///     { "id": "a", "type": "HD5", "position": [10, 0, 10] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Site {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bounds: Option<Bounds>,
    #[serde(default)]
    placements: Vec<ModulePlacement>,
}

impl Site {
    pub fn new(bounds: Option<Bounds>, placements: Vec<ModulePlacement>) -> Self {
        Self { bounds, placements }
    }

    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    pub fn placements(&self) -> &[ModulePlacement] {
        &self.placements
    }
}
