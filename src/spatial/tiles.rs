//! Tile faces, tile catalogues and placement directions
//!
//! Two catalogues exist: the nine double-sided tiles of the game, and five
//! single-sided synonym tiles that keep only road topology. Both are pure
//! data and are memoized once per process in [`Catalogue`] together with
//! every rotated face.

use crate::spatial::road::{Road, Side};
use std::fmt;
use std::sync::LazyLock;

/// Number of placement directions (two faces times four rotations)
pub const DIRECTION_COUNT: u8 = 8;

/// Off-road markers printed on a face
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Occupants {
    /// Dogs
    pub dogs: u8,
    /// Citizens drawn as girls
    pub girls: u8,
    /// Citizens drawn as boys
    pub boys: u8,
    /// Houses
    pub houses: u8,
    /// UFOs
    pub ufos: u8,
    /// Agents standing beside the roads
    pub offroad_agents: u8,
    /// Aliens already captured beside the roads
    pub offroad_captured_aliens: u8,
}

impl Occupants {
    /// Girls plus boys
    pub const fn citizens(&self) -> u8 {
        self.girls + self.boys
    }
}

/// One printed side of a tile
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TileFace {
    /// Zero to two roads, with pairwise distinct edges
    pub roads: Vec<Road>,
    /// Off-road markers
    pub occupants: Occupants,
}

impl TileFace {
    /// Face with the given roads and no markers
    pub fn new(roads: Vec<Road>) -> Self {
        Self {
            roads,
            occupants: Occupants::default(),
        }
    }

    /// Replace the off-road markers
    #[must_use]
    pub const fn with_occupants(mut self, occupants: Occupants) -> Self {
        self.occupants = occupants;
        self
    }

    /// The face after `steps` quarter turns
    #[must_use]
    pub fn rotated(&self, steps: u8) -> Self {
        Self {
            roads: self.roads.iter().map(|road| road.rotated(steps)).collect(),
            occupants: self.occupants,
        }
    }

    /// Whether any road ends on `side`
    pub fn has_road_end(&self, side: Side) -> bool {
        self.roads.iter().any(|road| road.touches(side))
    }

    /// Bit per edge that carries a road end
    pub fn road_mask(&self) -> u8 {
        self.roads.iter().fold(0, |mask, road| {
            mask | (1 << road.initial.index()) | (1 << road.terminal.index())
        })
    }

    /// Road topology ignoring every occupant
    ///
    /// Two faces share a topology exactly when they connect the same edge
    /// pairs.
    pub fn topology(&self) -> u16 {
        self.roads
            .iter()
            .fold(0, |bits, road| bits | road.connection_bit())
    }

    /// Agents on and beside the roads
    pub fn agent_count(&self) -> u8 {
        self.occupants.offroad_agents
            + self.roads.iter().filter(|road| road.agent.is_some()).count() as u8
    }

    /// Whether any alien, captured or not, is printed on the face
    pub fn has_alien(&self) -> bool {
        self.occupants.offroad_captured_aliens > 0
            || self.roads.iter().any(|road| road.alien.is_some())
    }

    /// Whether the face has no road at all
    pub const fn is_roadless(&self) -> bool {
        self.roads.is_empty()
    }
}

impl fmt::Display for TileFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (index, road) in self.roads.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{road}")?;
        }
        write!(f, "]")
    }
}

/// A tile: one front face and, for the game tiles, one back face
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Catalogue index
    pub id: u8,
    /// Face shown by directions 0 to 3
    pub front: TileFace,
    /// Face shown by directions 4 to 7
    pub back: Option<TileFace>,
}

impl Tile {
    /// Face shown in `direction`, rotated into place
    ///
    /// Returns `None` when the direction asks for a back face the tile lacks.
    pub fn face(&self, direction: Direction) -> Option<TileFace> {
        let side = if direction.is_front() {
            Some(&self.front)
        } else {
            self.back.as_ref()
        };
        side.map(|face| face.rotated(direction.rotation()))
    }
}

/// Face and anticlockwise rotation of a placed tile, encoded as `0..8`
///
/// Values 0 to 3 show the front rotated that many steps; 4 to 7 show the back
/// rotated `value - 4` steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Direction(u8);

impl Direction {
    /// Direction from its digit value
    pub const fn new(value: u8) -> Option<Self> {
        if value < DIRECTION_COUNT {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Direction from a face choice and a rotation
    pub const fn from_parts(front: bool, rotation: u8) -> Self {
        Self(if front { 0 } else { 4 } + rotation % 4)
    }

    /// Digit value in `0..8`
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether the front face is shown
    pub const fn is_front(self) -> bool {
        self.0 < 4
    }

    /// Quarter turns applied to the shown face
    pub const fn rotation(self) -> u8 {
        self.0 % 4
    }

    /// Same face, rotated `steps` further
    #[must_use]
    pub const fn rotated(self, steps: u8) -> Self {
        Self::from_parts(self.is_front(), self.rotation() + steps)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tile placed in a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placement {
    /// Catalogue index
    pub tile: u8,
    /// Shown face and rotation
    pub direction: Direction,
}

/// The nine game tiles
pub fn original_tiles() -> Vec<Tile> {
    use Side::{Bottom, Left, Right, Top};

    let tile = |id: u8, front: TileFace, back: TileFace| Tile {
        id,
        front,
        back: Some(back),
    };

    vec![
        tile(
            0,
            TileFace::new(vec![]).with_occupants(Occupants {
                dogs: 2,
                offroad_agents: 1,
                offroad_captured_aliens: 1,
                ..Occupants::default()
            }),
            TileFace::new(vec![
                Road::new(Top, Left).with_hamburgers(1),
                Road::new(Bottom, Right),
            ])
            .with_occupants(Occupants {
                dogs: 1,
                ..Occupants::default()
            }),
        ),
        tile(
            1,
            TileFace::new(vec![Road::new(Top, Left).with_alien(Left)]).with_occupants(
                Occupants {
                    houses: 1,
                    ..Occupants::default()
                },
            ),
            TileFace::new(vec![
                Road::new(Top, Bottom).with_agent(Bottom),
                Road::new(Left, Right),
            ])
            .with_occupants(Occupants {
                dogs: 1,
                ..Occupants::default()
            }),
        ),
        tile(
            2,
            TileFace::new(vec![
                Road::new(Top, Right).with_agent(Top),
                Road::new(Left, Bottom),
            ])
            .with_occupants(Occupants {
                boys: 1,
                ..Occupants::default()
            }),
            TileFace::new(vec![Road::new(Bottom, Right).with_hamburgers(1)]).with_occupants(
                Occupants {
                    dogs: 1,
                    ..Occupants::default()
                },
            ),
        ),
        tile(
            3,
            TileFace::new(vec![]).with_occupants(Occupants {
                houses: 2,
                ufos: 1,
                ..Occupants::default()
            }),
            TileFace::new(vec![Road::new(Top, Bottom).with_hamburgers(1)]).with_occupants(
                Occupants {
                    houses: 1,
                    ..Occupants::default()
                },
            ),
        ),
        tile(
            4,
            TileFace::new(vec![
                Road::new(Top, Right).with_alien(Top),
                Road::new(Left, Bottom),
            ])
            .with_occupants(Occupants {
                houses: 1,
                ..Occupants::default()
            }),
            TileFace::new(vec![
                Road::new(Top, Bottom),
                Road::new(Left, Right).with_hamburgers(1),
            ])
            .with_occupants(Occupants {
                boys: 1,
                ..Occupants::default()
            }),
        ),
        tile(
            5,
            TileFace::new(vec![Road::new(Top, Left).with_hamburgers(1)]).with_occupants(
                Occupants {
                    houses: 1,
                    ..Occupants::default()
                },
            ),
            TileFace::new(vec![]).with_occupants(Occupants {
                girls: 1,
                boys: 1,
                ufos: 1,
                ..Occupants::default()
            }),
        ),
        tile(
            6,
            TileFace::new(vec![
                Road::new(Top, Bottom).with_alien(Top),
                Road::new(Left, Right),
            ])
            .with_occupants(Occupants {
                houses: 1,
                ..Occupants::default()
            }),
            TileFace::new(vec![Road::new(Top, Bottom).with_agent(Bottom)]).with_occupants(
                Occupants {
                    girls: 1,
                    ..Occupants::default()
                },
            ),
        ),
        tile(
            7,
            TileFace::new(vec![
                Road::new(Top, Right).with_hamburgers(1),
                Road::new(Left, Bottom),
            ])
            .with_occupants(Occupants {
                dogs: 1,
                ..Occupants::default()
            }),
            TileFace::new(vec![Road::new(Top, Bottom).with_alien(Bottom)]).with_occupants(
                Occupants {
                    boys: 1,
                    ..Occupants::default()
                },
            ),
        ),
        tile(
            8,
            TileFace::new(vec![Road::new(Top, Left).with_agent(Left)]).with_occupants(
                Occupants {
                    girls: 1,
                    ..Occupants::default()
                },
            ),
            TileFace::new(vec![Road::new(Top, Bottom).with_hamburgers(1)]).with_occupants(
                Occupants {
                    dogs: 1,
                    ..Occupants::default()
                },
            ),
        ),
    ]
}

/// One front-only tile per road topology, ordered as the synonym classes
///
/// Class 0 has no road, 1 a single curve, 2 two curves, 3 a single straight
/// and 4 two crossing straights.
pub fn synonym_tiles() -> Vec<Tile> {
    use Side::{Bottom, Left, Right, Top};

    let tile = |id: u8, roads: Vec<Road>| Tile {
        id,
        front: TileFace::new(roads),
        back: None,
    };

    vec![
        tile(0, vec![]),
        tile(1, vec![Road::new(Top, Left)]),
        tile(2, vec![Road::new(Top, Left), Road::new(Bottom, Right)]),
        tile(3, vec![Road::new(Top, Bottom)]),
        tile(4, vec![Road::new(Top, Bottom), Road::new(Left, Right)]),
    ]
}

/// A tile set with every oriented face computed up front
#[derive(Debug)]
pub struct Catalogue {
    oriented: Vec<[Option<TileFace>; DIRECTION_COUNT as usize]>,
}

static ORIGINAL: LazyLock<Catalogue> = LazyLock::new(|| Catalogue::new(&original_tiles()));
static SYNONYM: LazyLock<Catalogue> = LazyLock::new(|| Catalogue::new(&synonym_tiles()));

impl Catalogue {
    /// Precompute all orientations of `tiles`
    pub fn new(tiles: &[Tile]) -> Self {
        let oriented = tiles
            .iter()
            .map(|tile| {
                std::array::from_fn(|value| {
                    Direction::new(value as u8).and_then(|direction| tile.face(direction))
                })
            })
            .collect();
        Self { oriented }
    }

    /// The nine game tiles
    pub fn original() -> &'static Self {
        &ORIGINAL
    }

    /// The five synonym tiles
    pub fn synonym() -> &'static Self {
        &SYNONYM
    }

    /// Rotated face of `tile` in `direction`
    pub fn face(&self, tile: u8, direction: Direction) -> Option<&TileFace> {
        self.oriented
            .get(tile as usize)
            .and_then(|faces| faces.get(direction.value() as usize))
            .and_then(Option::as_ref)
    }
}
