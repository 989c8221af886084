//! Integration tests for the SitePlanner API
//!
//! These tests walk the public API through the typical editing session:
//! generate a layout, then validate, snap, suggest and audit against it.

use float_cmp::approx_eq;

use gantry::{
    GantryError, SitePlanner,
    collision::{CollisionChecker, InvalidReason, Validation},
    command::{Action, CommandPattern},
    config::AppConfig,
    geometry::{Bounds, Position},
    identifier::ModuleKind,
    placement::{ModulePlacement, Site, SuggestionReason},
};

fn site_from(placements: Vec<ModulePlacement>, bounds: Option<Bounds>) -> Site {
    Site::new(bounds, placements)
}

#[test]
fn test_rows_command_end_to_end() {
    let planner = SitePlanner::default();

    let command = planner
        .parse_command("place 10 containers in 2 rows")
        .expect("Failed to parse command");
    assert_eq!(command.action(), Action::Place);
    assert_eq!(command.pattern(), Some(CommandPattern::Rows));
    assert_eq!(command.count(), Some(10));
    assert_eq!(command.params().and_then(|p| p.rows()), Some(2));

    let placements = planner.generate_layout("place 10 containers in 2 rows", Position::default());
    assert_eq!(placements.len(), 10);

    let mut rows: Vec<f64> = placements.iter().map(|p| p.position().z()).collect();
    rows.dedup_by(|a, b| approx_eq!(f64, *a, *b, epsilon = 1e-9));
    assert_eq!(rows.len(), 2, "expected two rows, got z values {rows:?}");
    for z in rows {
        let in_row = placements
            .iter()
            .filter(|p| approx_eq!(f64, p.position().z(), z, epsilon = 1e-9))
            .count();
        assert_eq!(in_row, 5);
    }

    // Neighbors sit `width + 2` apart: clear of the audit minimum of
    // `width + 1`, but inside the collision radius used for new placements.
    let neighbor = placements[0].position().horizontal_distance(placements[1].position());
    assert!(neighbor < CollisionChecker::default().threshold());
    let audit = planner.audit(&site_from(placements, None));
    assert!(audit.is_valid(), "violations: {:?}", audit.violations());
}

#[test]
fn test_grid_command_is_centered() {
    let planner = SitePlanner::default();
    let center = Position::new(40.0, 0.0, 25.0);

    let placements = planner.generate_layout("arrange containers in a grid 3x4", center);
    assert_eq!(placements.len(), 12);

    let n = placements.len() as f64;
    let mean_x = placements.iter().map(|p| p.position().x()).sum::<f64>() / n;
    let mean_z = placements.iter().map(|p| p.position().z()).sum::<f64>() / n;
    assert!(approx_eq!(f64, mean_x, center.x(), epsilon = 1e-9));
    assert!(approx_eq!(f64, mean_z, center.z(), epsilon = 1e-9));
}

#[test]
fn test_line_command_is_evenly_spaced() {
    let planner = SitePlanner::default();
    let placements = planner.generate_layout("create a line of 5 containers", Position::default());
    assert_eq!(placements.len(), 5);

    let gaps: Vec<f64> = placements
        .windows(2)
        .map(|pair| pair[0].position().horizontal_distance(pair[1].position()))
        .collect();
    for gap in &gaps {
        assert!(approx_eq!(f64, *gap, gaps[0], epsilon = 1e-9));
    }
    assert!(placements.iter().all(|p| p.position().z() == 0.0));
}

#[test]
fn test_unrecognized_command() {
    let planner = SitePlanner::default();

    assert!(planner.generate_layout("banana", Position::default()).is_empty());
    assert!(gantry_parser::parse_command("banana").is_none());

    match planner.layout("banana", Position::default()) {
        Err(GantryError::Parse { err, src }) => {
            assert_eq!(src, "banana");
            assert!(err.to_string().contains("E100"));
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_close_modules_fail_audit() {
    let planner = SitePlanner::default();
    let site = site_from(
        vec![
            ModulePlacement::new("a", ModuleKind::default(), Position::new(0.0, 0.0, 0.0)),
            ModulePlacement::new("b", ModuleKind::default(), Position::new(1.0, 0.0, 0.0)),
        ],
        None,
    );

    let report = planner.audit(&site);
    assert!(!report.is_valid());
    assert_eq!(report.violations().len(), 1);
    assert_eq!(
        report.violations()[0].to_string(),
        "modules a and b too close (1.00m < 3.438m)"
    );
}

#[test]
fn test_validate_against_generated_layout() {
    let planner = SitePlanner::default();
    let placements = planner.generate_layout("arrange containers in a grid 2x2", Position::default());
    let bounds = Bounds::centered_square(60.0);
    let site = site_from(placements, Some(bounds));

    assert_eq!(
        planner.validate(Position::new(0.5, 0.0, 0.5), &site),
        Validation::Invalid(InvalidReason::Collision)
    );
    assert_eq!(
        planner.validate(Position::new(40.0, 0.0, 0.0), &site),
        Validation::Invalid(InvalidReason::OutOfBounds)
    );
    assert!(planner.validate(Position::new(20.0, 0.0, 20.0), &site).is_valid());
}

#[test]
fn test_suggestions_fit_around_layout() {
    let planner = SitePlanner::default();
    let bounds = Bounds::new(Position::new(0.0, 0.0, 0.0), Position::new(80.0, 0.0, 50.0));
    let placements = planner.generate_layout("place 10 containers in 2 rows", bounds.center());
    let site = site_from(placements, Some(bounds));

    let suggestions = planner.suggest(&site, Some(8));
    assert_eq!(suggestions.len(), 8);
    for suggestion in &suggestions {
        assert_eq!(suggestion.reason(), SuggestionReason::Grid);
        assert!(planner.validate(suggestion.position(), &site).is_valid());
    }

    let default_count = planner.suggest(&site, None);
    assert_eq!(default_count.len(), planner.config().suggest().count());
}

#[test]
fn test_optimize_report() {
    let planner = SitePlanner::default();
    let placements = planner.generate_layout("place 4 containers", Position::default());
    let report = planner.optimize(&site_from(placements, None));

    let expected = 4.0 * 12.196 * 2.438 / 40_000.0 * 100.0;
    assert!(approx_eq!(f64, report.efficiency(), expected, epsilon = 1e-9));
    assert_eq!(report.suggestions().len(), 10);
}

#[test]
fn test_snap_modes() {
    let planner = SitePlanner::default();

    // No site: grid snap with the configured size.
    assert_eq!(
        planner.snap(Position::new(3.4, 0.0, 7.6), None, None),
        Position::new(3.0, 0.0, 8.0)
    );

    // Site without grid: smart snap only.
    let site = site_from(
        vec![ModulePlacement::new("a", ModuleKind::default(), Position::new(10.0, 0.0, 10.0))],
        None,
    );
    assert_eq!(
        planner.snap(Position::new(10.3, 0.0, 11.2), Some(&site), None),
        Position::new(10.0, 0.0, 11.2)
    );

    // Site and grid: smart snap, then grid.
    assert_eq!(
        planner.snap(Position::new(10.3, 0.0, 11.2), Some(&site), Some(2.0)),
        Position::new(10.0, 0.0, 12.0)
    );
}

#[test]
fn test_config_changes_ids_and_cap() {
    let config: AppConfig = toml::from_str(
        r#"
        [layout]
        max_placements = 5
        id_prefix = "unit"
        "#,
    )
    .expect("Failed to parse config");
    let planner = SitePlanner::new(config);

    let small = planner.generate_layout("place 3 containers", Position::default());
    let ids: Vec<_> = small.iter().map(|p| p.id()).collect();
    assert_eq!(ids, ["unit_0", "unit_1", "unit_2"]);

    assert!(planner.generate_layout("place 6 containers", Position::default()).is_empty());
}

#[test]
fn test_load_site_document() {
    let site = SitePlanner::load_site(
        r#"{
            "bounds": { "min": [0, 0, 0], "max": [100, 0, 60] },
            "placements": [
                { "id": "a", "type": "HD5", "position": [10, 0, 10] },
                { "id": "b", "type": "HD5", "position": [30, 0, 10], "rotation": [0, 1.57, 0] }
            ]
        }"#,
    )
    .expect("Failed to load site");

    assert_eq!(site.placements().len(), 2);
    assert_eq!(site.bounds().map(|b| b.width()), Some(100.0));
    assert!(site.placements()[1].rotation().is_some());

    let err = SitePlanner::load_site("{ not json").unwrap_err();
    assert!(matches!(err, GantryError::Site(_)));
}

#[test]
fn test_presets_generate_layouts() {
    let planner = SitePlanner::default();
    for preset in gantry::presets::presets() {
        let placements = planner
            .layout(preset.command(), Position::default())
            .expect("Preset should parse");
        assert!(!placements.is_empty(), "preset {} is empty", preset.name());
    }
}
