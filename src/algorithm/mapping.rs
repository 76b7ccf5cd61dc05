//! Tables that turn synonym arrangements back into game patterns
//!
//! Every class lists the game placements (tile, direction) whose face has the
//! class topology at synonym rotation 0. A synonym tile turned `s` steps is
//! then realized by the same placement turned `s` further.

use crate::algorithm::bitset::IndexBitset;
use crate::io::configuration::{SYNONYM_CLASS_COUNT, SYNONYM_ROTATIONS, TILE_COUNT};
use crate::spatial::pattern::{Pattern, SynonymPattern};
use crate::spatial::tiles::{Catalogue, DIRECTION_COUNT, Direction, Placement, TileFace};
use std::fmt;
use std::sync::LazyLock;

/// Which realizations a table keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// Every game face with the class topology
    Complete,
    /// One face per group of faces that always score alike
    ScoreEquivalent,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::ScoreEquivalent => write!(f, "score-equivalent"),
        }
    }
}

/// Hand-picked realizations as (tile, direction digit), per class
const SCORE_EQUIVALENT: [&[(u8, u8)]; SYNONYM_CLASS_COUNT] = [
    &[(0, 0), (3, 0), (5, 4)],
    &[(1, 0), (2, 6), (5, 0), (8, 0)],
    &[
        (0, 4),
        (2, 1),
        (4, 1),
        (7, 1),
        (0, 6),
        (2, 3),
        (4, 3),
        (7, 3),
    ],
    &[(3, 4), (6, 4), (7, 4), (8, 4), (6, 6), (7, 6)],
    &[
        (1, 4),
        (4, 4),
        (6, 0),
        (1, 5),
        (4, 5),
        (6, 1),
        (1, 6),
        (6, 2),
        (1, 7),
        (4, 7),
        (6, 3),
    ],
];

static COMPLETE_TABLE: LazyLock<MappingTable> = LazyLock::new(MappingTable::build_complete);
static SCORE_EQUIVALENT_TABLE: LazyLock<MappingTable> =
    LazyLock::new(MappingTable::build_score_equivalent);

/// Synonym class to game placement table
#[derive(Debug, Clone)]
pub struct MappingTable {
    kind: TableKind,
    realizations: [Vec<Placement>; SYNONYM_CLASS_COUNT],
}

fn synonym_topology(class: u8, rotation: u8) -> Option<u16> {
    Catalogue::synonym()
        .face(class, Direction::from_parts(true, rotation))
        .map(TileFace::topology)
}

impl MappingTable {
    /// Table listing every realization, so expansion reaches every feasible town
    pub fn complete() -> &'static Self {
        &COMPLETE_TABLE
    }

    /// Smaller table whose towns cover every reachable score vector
    pub fn score_equivalent() -> &'static Self {
        &SCORE_EQUIVALENT_TABLE
    }

    /// Table selected by `kind`
    pub fn of_kind(kind: TableKind) -> &'static Self {
        match kind {
            TableKind::Complete => Self::complete(),
            TableKind::ScoreEquivalent => Self::score_equivalent(),
        }
    }

    fn build_complete() -> Self {
        let game = Catalogue::original();
        let realizations = std::array::from_fn(|class| {
            let Some(target) = synonym_topology(class as u8, 0) else {
                return Vec::new();
            };
            (0..TILE_COUNT as u8)
                .flat_map(|tile| {
                    (0..DIRECTION_COUNT)
                        .filter_map(Direction::new)
                        .map(move |direction| Placement { tile, direction })
                })
                .filter(|placement| {
                    game.face(placement.tile, placement.direction)
                        .is_some_and(|face| face.topology() == target)
                })
                .collect()
        });
        Self {
            kind: TableKind::Complete,
            realizations,
        }
    }

    fn build_score_equivalent() -> Self {
        let realizations = SCORE_EQUIVALENT.map(|entries| {
            entries
                .iter()
                .filter_map(|&(tile, digit)| {
                    Direction::new(digit).map(|direction| Placement { tile, direction })
                })
                .collect()
        });
        Self {
            kind: TableKind::ScoreEquivalent,
            realizations,
        }
    }

    /// Which table this is
    pub const fn kind(&self) -> TableKind {
        self.kind
    }

    /// Realizations of one class at rotation 0, empty for an unknown class
    pub fn realizations(&self, class: u8) -> &[Placement] {
        self.realizations
            .get(class as usize)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every game pattern the table assigns to `synonym`
    ///
    /// Positions are filled class by class, lower positions first, trying
    /// realizations in table order; a tile already placed is skipped.
    pub fn expand(&self, synonym: &SynonymPattern) -> Vec<Pattern> {
        let mut slots: Vec<(u8, usize)> = synonym
            .classes()
            .iter()
            .enumerate()
            .map(|(position, &class)| (class, position))
            .collect();
        slots.sort_unstable();

        let mut expansion = Expansion {
            table: self,
            rotations: *synonym.rotations(),
            placements: [Placement {
                tile: 0,
                direction: Direction::default(),
            }; TILE_COUNT],
            used: IndexBitset::new(TILE_COUNT),
            patterns: Vec::new(),
        };
        expansion.fill(&slots);
        expansion.patterns
    }

    /// Synonym arrangement whose topology matches `pattern` at every position
    pub fn reduce(pattern: &Pattern) -> Option<SynonymPattern> {
        let game = Catalogue::original();
        let mut classes = [0; TILE_COUNT];
        let mut rotations = [0; TILE_COUNT];

        for ((placement, class), rotation) in pattern
            .placements()
            .iter()
            .zip(classes.iter_mut())
            .zip(rotations.iter_mut())
        {
            let topology = game.face(placement.tile, placement.direction)?.topology();
            let (found_class, found_rotation) = (0..SYNONYM_CLASS_COUNT as u8)
                .zip(SYNONYM_ROTATIONS)
                .flat_map(|(class, distinct)| (0..distinct).map(move |rotation| (class, rotation)))
                .find(|&(class, rotation)| synonym_topology(class, rotation) == Some(topology))?;
            *class = found_class;
            *rotation = found_rotation;
        }

        SynonymPattern::new(classes, rotations).ok()
    }

    /// Whether expanding the reduced arrangement of `pattern` yields it
    pub fn covers(&self, pattern: &Pattern) -> bool {
        let Some(synonym) = Self::reduce(pattern) else {
            return false;
        };
        pattern
            .placements()
            .iter()
            .zip(synonym.classes())
            .zip(synonym.rotations())
            .all(|((placement, &class), &rotation)| {
                let base = placement.direction.rotated(4 - rotation);
                self.realizations(class)
                    .iter()
                    .any(|entry| entry.tile == placement.tile && entry.direction == base)
            })
    }
}

/// Backtracking state for one expansion
struct Expansion<'a> {
    table: &'a MappingTable,
    rotations: [u8; TILE_COUNT],
    placements: [Placement; TILE_COUNT],
    used: IndexBitset,
    patterns: Vec<Pattern>,
}

impl Expansion<'_> {
    fn fill(&mut self, slots: &[(u8, usize)]) {
        let Some((&(class, position), rest)) = slots.split_first() else {
            self.patterns.push(Pattern::from_permutation(self.placements));
            return;
        };
        let rotation = self.rotations.get(position).copied().unwrap_or(0);
        let table = self.table;

        for &entry in table.realizations(class) {
            let tile = entry.tile as usize;
            if self.used.contains(tile) {
                continue;
            }
            self.used.insert(tile);
            if let Some(placement) = self.placements.get_mut(position) {
                *placement = Placement {
                    tile: entry.tile,
                    direction: entry.direction.rotated(rotation),
                };
            }
            self.fill(rest);
            self.used.remove(tile);
        }
    }
}
