//! Town feasibility: road continuity across shared edges and no closed loops
//!
//! Both checks depend only on road topology, so a synonym town is feasible
//! exactly when every game town it stands for is.

use crate::io::configuration::EDGE_SLOT_COUNT;
use crate::spatial::grid::{ADJACENCIES, edge_slot, facing_side};
use crate::spatial::pattern::SynonymPattern;
use crate::spatial::tiles::{Catalogue, TileFace};
use petgraph::unionfind::UnionFind;
use std::fmt;

/// Why a syntactically valid town cannot be built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Infeasibility {
    /// One side of a shared edge has a road end and the other does not
    RoadMismatch {
        /// Later position in row-major order
        position: usize,
        /// Earlier neighbour it disagrees with
        neighbour: usize,
    },
    /// A road closes on itself without reaching the border
    ClosedLoop {
        /// Slot at which the loop closed
        slot: u8,
    },
    /// The catalogue has no face for the requested direction
    MissingFace {
        /// Position of the placement
        position: usize,
    },
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoadMismatch {
                position,
                neighbour,
            } => write!(
                f,
                "road ends of positions {neighbour} and {position} do not meet"
            ),
            Self::ClosedLoop { slot } => write!(f, "road loop closes at slot {slot}"),
            Self::MissingFace { position } => {
                write!(f, "tile at position {position} has no such face")
            }
        }
    }
}

/// First continuity fault between placed neighbours
pub fn find_mismatch(faces: &[&TileFace]) -> Option<Infeasibility> {
    ADJACENCIES.iter().find_map(|&(position, neighbour)| {
        let own = facing_side(position, neighbour)?;
        let other = facing_side(neighbour, position)?;
        let own_end = faces.get(position)?.has_road_end(own);
        let other_end = faces.get(neighbour)?.has_road_end(other);
        (own_end != other_end).then_some(Infeasibility::RoadMismatch {
            position,
            neighbour,
        })
    })
}

/// First road segment that closes a loop among the stitched roads
pub fn find_loop(faces: &[&TileFace]) -> Option<Infeasibility> {
    let mut components = UnionFind::<usize>::new(EDGE_SLOT_COUNT);
    for (position, face) in faces.iter().enumerate() {
        for road in &face.roads {
            let from = edge_slot(position, road.initial);
            let to = edge_slot(position, road.terminal);
            if !components.union(from as usize, to as usize) {
                return Some(Infeasibility::ClosedLoop { slot: to });
            }
        }
    }
    None
}

/// Why the faces cannot form a town, or `None` when they can
pub fn find_infeasibility(faces: &[&TileFace]) -> Option<Infeasibility> {
    find_mismatch(faces).or_else(|| find_loop(faces))
}

/// Resolve the synonym faces of a pattern in board order
pub fn synonym_faces(pattern: &SynonymPattern) -> Option<Vec<&'static TileFace>> {
    let catalogue = Catalogue::synonym();
    pattern
        .placements()
        .iter()
        .map(|placement| catalogue.face(placement.tile, placement.direction))
        .collect()
}

/// Whether a synonym arrangement forms a town
pub fn synonym_feasible(pattern: &SynonymPattern) -> bool {
    synonym_faces(pattern).is_some_and(|faces| find_infeasibility(&faces).is_none())
}
