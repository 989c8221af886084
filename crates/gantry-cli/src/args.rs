//! Command-line argument definitions for the Gantry CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Each [`Command`] maps to one engine operation; site
//! documents are read from JSON files and results are written as JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use gantry::geometry::Position;

/// Command-line arguments for the Gantry site layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the output JSON file (defaults to stdout)
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

/// Operations offered by the CLI
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate module placements from a layout command
    Layout {
        /// Layout command, e.g. "place 10 containers in 2 rows"
        #[arg(value_name = "COMMAND")]
        text: String,

        /// Center of the layout as x,y,z
        #[arg(long, default_value = "0,0,0", allow_hyphen_values = true)]
        center: Position,
    },

    /// Check whether a module fits at a position
    Validate {
        /// Site document (JSON)
        #[arg(long)]
        site: PathBuf,

        /// Candidate position as x,y,z
        #[arg(long, allow_hyphen_values = true)]
        at: Position,
    },

    /// Snap a position to nearby modules and/or a grid
    Snap {
        /// Position to snap as x,y,z
        #[arg(long, allow_hyphen_values = true)]
        at: Position,

        /// Grid cell size in meters
        #[arg(long)]
        grid: Option<f64>,

        /// Site document (JSON) whose modules attract the position
        #[arg(long)]
        site: Option<PathBuf>,
    },

    /// Suggest positions for new modules
    Suggest {
        /// Site document (JSON)
        #[arg(long)]
        site: PathBuf,

        /// Number of suggestions (defaults to the configured count)
        #[arg(long)]
        count: Option<usize>,
    },

    /// Report site utilization with suggestions
    Optimize {
        /// Site document (JSON)
        #[arg(long)]
        site: PathBuf,
    },

    /// Check the spacing between all modules of a site
    Audit {
        /// Site document (JSON)
        #[arg(long)]
        site: PathBuf,
    },

    /// List the predefined layouts
    Presets,
}
