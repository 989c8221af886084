//! Gantry Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Gantry layout
//! engine, its command parser and its command-line interface. It includes:
//!
//! - **Geometry**: Positions, rotations, site bounds and module footprints ([`geometry`] module)
//! - **Identifiers**: String-interned module kinds ([`identifier::ModuleKind`])
//! - **Placements**: Placed modules, suggestions and site documents ([`placement`] module)
//! - **Commands**: The structured form of a layout command ([`command`] module)

pub mod command;
pub mod geometry;
pub mod identifier;
pub mod placement;
