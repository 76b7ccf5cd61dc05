//! Town-wide roads stitched from the placed tiles' road segments
//!
//! Each road segment becomes one edge between two global edge slots. In a
//! feasible town every component is a simple chain whose two ends are border
//! slots, and is listed from its lower ("left") end to its higher ("right")
//! end.

use crate::algorithm::bitset::IndexBitset;
use crate::analysis::onroad::{Agent, Alien, Hamburger, Heading, OnRoad, resolve_food_chain};
use crate::io::configuration::EDGE_SLOT_COUNT;
use crate::spatial::grid::{OUTER_SLOTS, edge_slot, is_outer_slot};
use crate::spatial::tiles::TileFace;
use petgraph::graphmap::UnGraphMap;

/// What a road segment carries into the town graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadMarker {
    /// Agent facing the given slot
    Agent {
        /// Global slot the agent faces
        facing: u8,
    },
    /// Alien facing the given slot
    Alien {
        /// Global slot the alien faces
        facing: u8,
    },
    /// At least one hamburger
    Hamburger,
}

impl RoadMarker {
    /// Actor met when walking the segment from slot `from` to slot `to`
    ///
    /// An agent or alien faces left when it looks back at `from`.
    pub fn walked(self, from: u8, to: u8) -> Option<OnRoad> {
        let heading = |facing: u8| {
            if facing == from {
                Some(Heading::Left)
            } else if facing == to {
                Some(Heading::Right)
            } else {
                None
            }
        };
        match self {
            Self::Agent { facing } => heading(facing).map(|h| OnRoad::Agent(Agent::new(h))),
            Self::Alien { facing } => heading(facing).map(|h| OnRoad::Alien(Alien::new(h))),
            Self::Hamburger => Some(OnRoad::Hamburger(Hamburger::new())),
        }
    }
}

/// Graph of road segments keyed by global edge slot
pub type RoadGraph = UnGraphMap<u8, Option<RoadMarker>>;

/// Stitch every face's roads into one slot graph
///
/// `faces` holds the face at each position in board order.
pub fn road_graph(faces: &[&TileFace]) -> RoadGraph {
    let mut graph = RoadGraph::with_capacity(EDGE_SLOT_COUNT, EDGE_SLOT_COUNT);
    for (position, face) in faces.iter().enumerate() {
        for road in &face.roads {
            let marker = if let Some(side) = road.agent {
                Some(RoadMarker::Agent {
                    facing: edge_slot(position, side),
                })
            } else if let Some(side) = road.alien {
                Some(RoadMarker::Alien {
                    facing: edge_slot(position, side),
                })
            } else if road.hamburgers > 0 {
                Some(RoadMarker::Hamburger)
            } else {
                None
            };
            graph.add_edge(
                edge_slot(position, road.initial),
                edge_slot(position, road.terminal),
                marker,
            );
        }
    }
    graph
}

/// One road of the finished town
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    /// Lower border slot
    pub left_end: u8,
    /// Higher border slot
    pub right_end: u8,
    /// Tiles the road crosses
    pub length: usize,
    /// Actors from left to right, with the food chain resolved
    pub objects: Vec<OnRoad>,
}

impl Path {
    /// Agents on this road
    pub fn agent_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|object| matches!(object, OnRoad::Agent(_)))
            .count()
    }

    /// Aliens on this road that no agent holds
    pub fn free_alien_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|object| object.is_free_alien())
            .count()
    }
}

/// Walk every border-to-border chain of an acyclic road graph
///
/// Chains are found from the lowest unvisited border slot, so each is listed
/// left to right. Components without a border slot are skipped; a feasible
/// town has none.
pub fn trace_paths(graph: &RoadGraph) -> Vec<Path> {
    let mut visited = IndexBitset::new(EDGE_SLOT_COUNT);
    let mut paths = Vec::new();

    for &start in &OUTER_SLOTS {
        if !graph.contains_node(start) || visited.contains(start as usize) {
            continue;
        }
        visited.insert(start as usize);

        let mut previous: Option<u8> = None;
        let mut current = start;
        let mut length = 0;
        let mut objects = Vec::new();

        while let Some(next) = graph
            .neighbors(current)
            .find(|&neighbour| Some(neighbour) != previous)
        {
            if let Some(object) = graph
                .edge_weight(current, next)
                .copied()
                .flatten()
                .and_then(|marker| marker.walked(current, next))
            {
                objects.push(object);
            }
            length += 1;
            previous = Some(current);
            current = next;
            visited.insert(current as usize);
            if is_outer_slot(current) || length > EDGE_SLOT_COUNT {
                break;
            }
        }

        paths.push(Path {
            left_end: start,
            right_end: current,
            length,
            objects: resolve_food_chain(&objects),
        });
    }

    paths
}
