//! Configuration types for the Gantry engine.
//!
//! All types implement [`serde::Deserialize`] so hosts can load them from
//! TOML or any other serde format. Every section and field is optional and
//! falls back to the engine defaults.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`SiteConfig`] - Module footprints, collision margin and default site size.
//! - [`LayoutConfig`] - Placement cap and identifier prefix for generated layouts.
//! - [`SnapConfig`] - Grid size and reach of snapping.
//! - [`SuggestConfig`] - How many suggestions to produce.
//!
//! # Example
//!
//! ```
//! # use gantry::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.site().margin(), 0.5);
//! assert_eq!(config.layout().id_prefix(), "module");
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use gantry_core::{geometry::Footprint, identifier::ModuleKind};

use crate::{
    collision::DEFAULT_MARGIN,
    layout::{DEFAULT_ID_PREFIX, DEFAULT_MAX_PLACEMENTS},
    snap::{DEFAULT_GRID_SIZE, DEFAULT_SNAP_DISTANCE},
    suggest::{DEFAULT_OPTIMIZE_COUNT, DEFAULT_SITE_EXTENT, DEFAULT_SUGGESTION_COUNT},
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Site and module geometry section.
    #[serde(default)]
    site: SiteConfig,

    /// Layout generation section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Snapping section.
    #[serde(default)]
    snap: SnapConfig,

    /// Suggestion section.
    #[serde(default)]
    suggest: SuggestConfig,
}

impl AppConfig {
    pub fn new(
        site: SiteConfig,
        layout: LayoutConfig,
        snap: SnapConfig,
        suggest: SuggestConfig,
    ) -> Self {
        Self {
            site,
            layout,
            snap,
            suggest,
        }
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn snap(&self) -> &SnapConfig {
        &self.snap
    }

    pub fn suggest(&self) -> &SuggestConfig {
        &self.suggest
    }

    /// Checks that every numeric setting is usable.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending setting.
    pub fn validate(&self) -> Result<(), String> {
        let site = &self.site;
        check_non_negative("site.margin", site.margin)?;
        check_positive("site.extent", site.extent)?;
        check_footprint("site.footprint", site.footprint)?;
        for (kind, footprint) in &site.footprints {
            check_footprint(&format!("site.footprints.{kind}"), *footprint)?;
        }
        check_positive("snap.grid_size", self.snap.grid_size)?;
        check_non_negative("snap.snap_distance", self.snap.snap_distance)?;
        Ok(())
    }
}

fn check_positive(name: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("`{name}` must be a positive number, got {value}"))
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("`{name}` must be a non-negative number, got {value}"))
    }
}

fn check_footprint(name: &str, footprint: Footprint) -> Result<(), String> {
    check_positive(&format!("{name}.length"), footprint.length())?;
    check_positive(&format!("{name}.width"), footprint.width())?;
    check_non_negative(&format!("{name}.height"), footprint.height())
}

/// Module geometry and site defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Safety margin added to the collision radius, in meters.
    margin: f64,

    /// Edge of the square site assumed when no bounds are given, in meters.
    extent: f64,

    /// Footprint of the default module kind.
    footprint: Footprint,

    /// Footprints of other module kinds, keyed by kind name.
    footprints: IndexMap<String, Footprint>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            extent: DEFAULT_SITE_EXTENT,
            footprint: Footprint::default(),
            footprints: IndexMap::new(),
        }
    }
}

impl SiteConfig {
    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn extent(&self) -> f64 {
        self.extent
    }

    /// Returns the footprint of the default module kind.
    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// Returns the footprint for `kind`, falling back to the default
    /// footprint for kinds without an entry.
    pub fn footprint_for(&self, kind: ModuleKind) -> Footprint {
        self.footprints
            .get(kind.to_string().as_str())
            .copied()
            .unwrap_or(self.footprint)
    }
}

/// Layout generation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Largest number of placements a single command may produce.
    max_placements: usize,

    /// Prefix of generated identifiers (`<prefix>_<n>`).
    id_prefix: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_placements: DEFAULT_MAX_PLACEMENTS,
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
        }
    }
}

impl LayoutConfig {
    pub fn max_placements(&self) -> usize {
        self.max_placements
    }

    pub fn id_prefix(&self) -> &str {
        &self.id_prefix
    }
}

/// Snapping settings.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    grid_size: f64,
    snap_distance: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            snap_distance: DEFAULT_SNAP_DISTANCE,
        }
    }
}

impl SnapConfig {
    /// Grid cell size used when a caller does not pass one, in meters.
    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    /// Reach of smart snapping, in meters.
    pub fn snap_distance(&self) -> f64 {
        self.snap_distance
    }
}

/// Suggestion settings.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    count: usize,
    optimize_count: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_SUGGESTION_COUNT,
            optimize_count: DEFAULT_OPTIMIZE_COUNT,
        }
    }
}

impl SuggestConfig {
    /// Suggestions returned when a caller does not ask for a count.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Suggestions attached to a space report.
    pub fn optimize_count(&self) -> usize {
        self.optimize_count
    }
}
