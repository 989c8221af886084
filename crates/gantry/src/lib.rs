//! Gantry - spatial layout and placement for modular equipment sites.
//!
//! Turns short layout commands such as `place 10 containers in 2 rows` into
//! concrete module positions, and answers the questions a site editor asks
//! about them: is this spot free, where does it snap to, where could the
//! next module go, and does the site keep its safety spacing.
//!
//! Positions use X and Z as the horizontal ground plane and Y as elevation.
//! All distances are in meters.

pub mod collision;
pub mod config;
pub mod layout;
pub mod pattern;
pub mod presets;
pub mod snap;
pub mod suggest;

mod error;

pub use gantry_core::{command, geometry, identifier, placement};

pub use error::GantryError;

use log::{debug, info, trace};

use collision::{CollisionChecker, Validation};
use command::ParsedCommand;
use config::AppConfig;
use geometry::{Footprint, Position};
use identifier::ModuleKind;
use layout::{IdSource, LayoutGenerator, SequentialIds};
use placement::{ModulePlacement, PlacementSuggestion, Site};
use suggest::{SafetyReport, SpaceReport, SuggestionService};

/// Entry point tying the engine components to one configuration.
///
/// # Examples
///
/// ```
/// use gantry::{SitePlanner, geometry::Position};
///
/// let planner = SitePlanner::default();
/// let placements = planner.generate_layout("place 10 containers in 2 rows", Position::default());
///
/// assert_eq!(placements.len(), 10);
/// assert_eq!(placements[0].id(), "module_0");
/// ```
#[derive(Debug, Default)]
pub struct SitePlanner {
    config: AppConfig,
}

impl SitePlanner {
    /// Create a new planner with the given configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use gantry::{SitePlanner, config::AppConfig};
    ///
    /// let planner = SitePlanner::new(AppConfig::default());
    /// assert_eq!(planner.config().layout().max_placements(), 10_000);
    /// ```
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a layout command, reporting unrecognized text as an error.
    ///
    /// # Errors
    ///
    /// Returns [`GantryError::Parse`] when no command shape matches or a
    /// number does not fit.
    ///
    /// # Examples
    ///
    /// ```
    /// use gantry::{SitePlanner, command::CommandPattern};
    ///
    /// let planner = SitePlanner::default();
    /// let command = planner.parse_command("arrange containers in a grid 3x4").unwrap();
    /// assert_eq!(command.pattern(), Some(CommandPattern::Grid));
    ///
    /// assert!(planner.parse_command("banana").is_err());
    /// ```
    pub fn parse_command(&self, text: &str) -> Result<ParsedCommand, GantryError> {
        info!("Parsing layout command");

        let command =
            gantry_parser::parse(text).map_err(|err| GantryError::new_parse_error(err, text))?;

        trace!(command:?; "Parsed command");
        Ok(command)
    }

    /// Generate placements for a command around `center`.
    ///
    /// Identifiers are `<prefix>_0`, `<prefix>_1`, ... with the configured
    /// prefix. Unrecognized text yields no placements.
    pub fn generate_layout(&self, text: &str, center: Position) -> Vec<ModulePlacement> {
        let mut ids = self.sequential_ids();
        match gantry_parser::parse_command(text) {
            Some(command) => self.layout_with_ids(&command, center, &mut ids),
            None => {
                info!(text; "Layout command not recognized");
                Vec::new()
            }
        }
    }

    /// Like [`generate_layout`](Self::generate_layout) but fails on text
    /// that is not a command.
    ///
    /// # Errors
    ///
    /// Returns [`GantryError::Parse`] for unrecognized commands.
    pub fn layout(&self, text: &str, center: Position) -> Result<Vec<ModulePlacement>, GantryError> {
        let command = self.parse_command(text)?;
        Ok(self.layout_with_ids(&command, center, &mut self.sequential_ids()))
    }

    /// Lay out a parsed command with identifiers drawn from `ids`.
    pub fn layout_with_ids(
        &self,
        command: &ParsedCommand,
        center: Position,
        ids: &mut impl IdSource,
    ) -> Vec<ModulePlacement> {
        let footprint = self.config.site().footprint_for(command.module_type());
        let generator = LayoutGenerator::new(footprint)
            .with_max_placements(self.config.layout().max_placements());

        let placements = generator.layout_from_command(command, center, ids);
        info!(action = command.action().to_string(), count = placements.len(); "Layout generated");
        placements
    }

    /// Check whether a module may be placed at `candidate` on `site`.
    pub fn validate(&self, candidate: Position, site: &Site) -> Validation {
        let validation = self
            .checker()
            .validate_placement(candidate, site.placements(), site.bounds());
        debug!(candidate:?, valid = validation.is_valid(); "Placement validated");
        validation
    }

    /// Snap a free-form position.
    ///
    /// With a site the position is first aligned with the nearest module in
    /// reach. Grid snapping follows when `grid_size` is given, or with the
    /// configured grid size when there is no site.
    pub fn snap(&self, position: Position, site: Option<&Site>, grid_size: Option<f64>) -> Position {
        let snap_config = self.config.snap();
        let mut snapped = position;

        if let Some(site) = site {
            snapped = snap::smart_snap(snapped, site.placements(), snap_config.snap_distance());
        }

        let grid_size = match (grid_size, site) {
            (Some(grid_size), _) => Some(grid_size),
            (None, None) => Some(snap_config.grid_size()),
            (None, Some(_)) => None,
        };
        if let Some(grid_size) = grid_size {
            snapped = snap::snap_to_grid(snapped, grid_size);
        }

        debug!(from:? = position, to:? = snapped; "Position snapped");
        snapped
    }

    /// Suggest positions for new modules on `site`, best first.
    ///
    /// Uses the configured count when `count` is `None`.
    pub fn suggest(&self, site: &Site, count: Option<usize>) -> Vec<PlacementSuggestion> {
        let count = count.unwrap_or_else(|| self.config.suggest().count());
        info!(existing = site.placements().len(), count; "Suggesting placements");
        self.suggestion_service()
            .suggest_placements(site.placements(), site.bounds(), count)
    }

    /// Report how much of `site` is used and where more modules fit.
    pub fn optimize(&self, site: &Site) -> SpaceReport {
        info!(existing = site.placements().len(); "Optimizing site space");
        self.suggestion_service()
            .optimize_space(site.placements(), site.bounds())
    }

    /// Audit the spacing between every pair of modules on `site`.
    pub fn audit(&self, site: &Site) -> SafetyReport {
        info!(existing = site.placements().len(); "Auditing site safety");
        self.suggestion_service().check_safety_rules(site.placements())
    }

    /// Decode a site document from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GantryError::Site`] when the document is malformed or
    /// contains non-finite coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use gantry::SitePlanner;
    ///
    /// let site = SitePlanner::load_site(
    ///     r#"{"placements": [{"id": "a", "type": "HD5", "position": [0, 0, 0]}]}"#,
    /// ).unwrap();
    /// assert_eq!(site.placements().len(), 1);
    /// assert!(site.bounds().is_none());
    /// ```
    pub fn load_site(json: &str) -> Result<Site, GantryError> {
        let site: Site =
            serde_json::from_str(json).map_err(|err| GantryError::Site(err.to_string()))?;

        if let Some(module) = site
            .placements()
            .iter()
            .find(|module| !module.position().is_finite())
        {
            return Err(GantryError::Site(format!(
                "module `{}` has a non-finite position",
                module.id()
            )));
        }

        debug!(placements = site.placements().len(), bounded = site.bounds().is_some(); "Site loaded");
        Ok(site)
    }

    fn footprint(&self) -> Footprint {
        self.config.site().footprint_for(ModuleKind::default())
    }

    fn checker(&self) -> CollisionChecker {
        CollisionChecker::new(self.footprint()).with_margin(self.config.site().margin())
    }

    fn suggestion_service(&self) -> SuggestionService {
        SuggestionService::new(self.checker())
            .with_site_extent(self.config.site().extent())
            .with_optimize_count(self.config.suggest().optimize_count())
    }

    fn sequential_ids(&self) -> SequentialIds {
        SequentialIds::new(self.config.layout().id_prefix())
    }
}
