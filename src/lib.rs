//! Exhaustive search and theme scoring for the Nine Tiles Panic board game
//!
//! A town is nine double-sided tiles on a 3x3 board. The crate decides which
//! of the 9! * 8^9 placements form legal towns and scores each on the 26
//! theme cards, either by brute force or through road-topology synonyms that
//! collapse the space to 254,088 arrangements before mapping back.

#![forbid(unsafe_code)]

/// Enumerators, feasibility checks, synonym mapping and the batch runner
pub mod algorithm;
/// Food chain resolution, theme scoring and run statistics
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Tiles, board geometry, patterns and towns
pub mod spatial;

pub use io::error::{Result, TownError};
