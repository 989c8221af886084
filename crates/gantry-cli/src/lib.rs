//! CLI logic for the Gantry site layout tool.
//!
//! Every subcommand reads its inputs (command text, positions, JSON site
//! documents), runs one [`SitePlanner`] operation and writes the result as
//! pretty-printed JSON to the output file or stdout.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::{fs, path::Path};

use log::{info, warn};
use serde::Serialize;

use gantry::{GantryError, SitePlanner, placement::Site, presets};

/// Run the Gantry CLI application
///
/// # Errors
///
/// Returns `GantryError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Unrecognized layout commands
/// - Malformed site documents
/// - Results that cannot be encoded as JSON
pub fn run(args: &Args) -> Result<(), GantryError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let planner = SitePlanner::new(app_config);

    let json = match &args.command {
        Command::Layout { text, center } => {
            info!(center:? = center; "Generating layout");
            to_json(&planner.layout(text, *center)?)?
        }
        Command::Validate { site, at } => {
            let site = read_site(site)?;
            to_json(&planner.validate(*at, &site))?
        }
        Command::Snap { at, grid, site } => {
            let site = site.as_deref().map(read_site).transpose()?;
            to_json(&planner.snap(*at, site.as_ref(), *grid))?
        }
        Command::Suggest { site, count } => {
            let site = read_site(site)?;
            to_json(&planner.suggest(&site, *count))?
        }
        Command::Optimize { site } => {
            let site = read_site(site)?;
            to_json(&planner.optimize(&site))?
        }
        Command::Audit { site } => {
            let site = read_site(site)?;
            let report = planner.audit(&site);
            for violation in report.violations() {
                warn!(
                    first = violation.first(),
                    second = violation.second(),
                    distance = violation.distance();
                    "Safety violation"
                );
            }
            to_json(&report)?
        }
        Command::Presets => to_json(presets::presets())?,
    };

    write_output(args.output.as_deref(), &json)
}

fn read_site(path: &Path) -> Result<Site, GantryError> {
    info!(path = path.display().to_string(); "Reading site document");
    let json = fs::read_to_string(path)?;
    SitePlanner::load_site(&json)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, GantryError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn write_output(output: Option<&str>, json: &str) -> Result<(), GantryError> {
    match output {
        Some(path) => {
            fs::write(path, format!("{json}\n"))?;
            info!(output_file = path; "Result written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
