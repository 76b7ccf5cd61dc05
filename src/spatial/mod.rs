//! Spatial data structures: tiles, the board and towns
//!
//! This module contains spatial-related functionality including:
//! - Sides, roads and tile faces
//! - Board geometry and edge slot numbering
//! - Pattern strings, towns and their paths

/// Board positions, adjacency and edge slots
pub mod grid;
/// Town roads stitched across tiles
pub mod path;
/// Town and synonym pattern strings
pub mod pattern;
/// Tile sides and road segments
pub mod road;
/// Tile faces, catalogues and directions
pub mod tiles;
/// Towns built from patterns
pub mod town;

pub use town::Town;
