//! The 26 theme cards and the points a finished town scores on each
//!
//! Every theme is a pure function of a feasible town: its faces, its road
//! segments and its paths with resolved food chains.

use crate::analysis::onroad::{Heading, OnRoad};
use crate::io::configuration::{THEME_COUNT, TILE_COUNT};
use crate::io::error::{Result, TownError, invalid_parameter};
use crate::spatial::grid::largest_adjacent_region;
use crate::spatial::tiles::TileFace;
use crate::spatial::town::Town;
use itertools::Itertools;
use std::fmt;
use std::str::FromStr;
use strum::{EnumCount, EnumIter, IntoEnumIterator};

/// A theme card, numbered as printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCount)]
#[repr(u8)]
pub enum Theme {
    /// Most aliens captured
    CapturedAliens = 1,
    /// Most aliens caught between two agents
    SandwichedAliens = 2,
    /// Largest group of adjacent tiles with dogs
    DogNeighbourhood = 3,
    /// Finish the town first
    FastestCompletion = 4,
    /// Longest road
    LongestRoad = 5,
    /// Most curves
    Curves = 6,
    /// Most houses
    Houses = 7,
    /// Largest free aliens times hamburgers
    AliensTimesHamburgers = 8,
    /// Most agents
    Agents = 9,
    /// Most roads
    Roads = 10,
    /// Most tiles without roads
    RoadlessTiles = 11,
    /// Most dogs
    Dogs = 12,
    /// Most roads of equal length
    EqualLengthRoads = 13,
    /// Most agents on one road
    AgentsOnOneRoad = 14,
    /// Fewest roads
    FewestRoads = 15,
    /// Most hamburgers in front of one alien
    HamburgersAhead = 16,
    /// Largest UFOs times free aliens
    UfosTimesAliens = 17,
    /// Most aliens on one road facing an agent
    AliensFacingAgents = 18,
    /// Most free aliens on one road
    AliensOnOneRoad = 19,
    /// Most agent, alien and hamburger chains
    FoodChains = 20,
    /// Largest group of adjacent tiles without aliens
    AlienFreeNeighbourhood = 21,
    /// Largest group of adjacent tiles with citizens
    CitizenNeighbourhood = 22,
    /// Largest group of adjacent tiles with houses
    HouseNeighbourhood = 23,
    /// Most citizen and dog pairs
    CitizenDogPairs = 24,
    /// Most girls
    Girls = 25,
    /// Most boys
    Boys = 26,
}

impl Theme {
    /// Theme from its card number
    pub fn from_number(number: u8) -> Option<Self> {
        Self::iter().find(|theme| theme.number() == number)
    }

    /// Card number, 1 to 26
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Short card text
    pub const fn description(self) -> &'static str {
        match self {
            Self::CapturedAliens => "most aliens captured",
            Self::SandwichedAliens => "most aliens caught between two agents",
            Self::DogNeighbourhood => "largest group of adjacent dog tiles",
            Self::FastestCompletion => "finish the town first",
            Self::LongestRoad => "longest road",
            Self::Curves => "most curves",
            Self::Houses => "most houses",
            Self::AliensTimesHamburgers => "largest aliens times hamburgers",
            Self::Agents => "most agents",
            Self::Roads => "most roads",
            Self::RoadlessTiles => "most tiles without roads",
            Self::Dogs => "most dogs",
            Self::EqualLengthRoads => "most roads of the same length",
            Self::AgentsOnOneRoad => "most agents on one road",
            Self::FewestRoads => "fewest roads",
            Self::HamburgersAhead => "most hamburgers in front of one alien",
            Self::UfosTimesAliens => "largest UFOs times aliens",
            Self::AliensFacingAgents => "most aliens on one road facing an agent",
            Self::AliensOnOneRoad => "most aliens on one road",
            Self::FoodChains => "most agent-alien-hamburger chains",
            Self::AlienFreeNeighbourhood => "largest group of adjacent alien-free tiles",
            Self::CitizenNeighbourhood => "largest group of adjacent citizen tiles",
            Self::HouseNeighbourhood => "largest group of adjacent house tiles",
            Self::CitizenDogPairs => "most citizen and dog pairs",
            Self::Girls => "most girls",
            Self::Boys => "most boys",
        }
    }

    /// Whether the points depend on road shape alone
    ///
    /// These themes score a synonym town exactly as every game town it
    /// stands for.
    pub const fn is_topological(self) -> bool {
        matches!(
            self,
            Self::FastestCompletion
                | Self::LongestRoad
                | Self::Curves
                | Self::Roads
                | Self::RoadlessTiles
                | Self::EqualLengthRoads
                | Self::FewestRoads
        )
    }

    /// Points one resolved path scores on a per-road theme
    ///
    /// Returns `None` for themes that do not read the actors of a single path.
    pub fn path_points(self, objects: &[OnRoad]) -> Option<i32> {
        match self {
            Self::SandwichedAliens => Some(sandwiched_aliens(objects)),
            Self::HamburgersAhead => Some(hamburgers_ahead(objects)),
            Self::AliensFacingAgents => Some(aliens_facing_agents(objects)),
            Self::FoodChains => Some(food_chains(objects)),
            _ => None,
        }
    }

    /// Points a town scores on this theme
    pub fn evaluate(self, town: &Town) -> i32 {
        let faces = town.faces();
        let paths = town.paths();
        let objects = || paths.iter().flat_map(|path| path.objects.iter());
        let total = |count: fn(&TileFace) -> u8| -> i32 {
            faces.iter().map(|face| i32::from(count(*face))).sum()
        };
        let free_aliens = || objects().filter(|object| object.is_free_alien()).count() as i32;

        match self {
            Self::CapturedAliens => {
                let on_road = objects()
                    .filter(|object| matches!(object, OnRoad::Alien(alien) if !alien.is_free()))
                    .count() as i32;
                on_road + total(|face| face.occupants.offroad_captured_aliens)
            }
            Self::SandwichedAliens | Self::HamburgersAhead | Self::AliensFacingAgents => paths
                .iter()
                .filter_map(|path| self.path_points(&path.objects))
                .max()
                .unwrap_or(0),
            Self::DogNeighbourhood => region(faces, |face| face.occupants.dogs > 0),
            Self::FastestCompletion => 0,
            Self::LongestRoad => paths.iter().map(|path| path.length).max().unwrap_or(0) as i32,
            Self::Curves => town.roads().filter(|road| road.is_curve()).count() as i32,
            Self::Houses => total(|face| face.occupants.houses),
            Self::AliensTimesHamburgers => {
                let hamburgers = objects()
                    .filter(|object| matches!(object, OnRoad::Hamburger(_)))
                    .count() as i32;
                free_aliens() * hamburgers
            }
            Self::Agents => total(TileFace::agent_count),
            Self::Roads => paths.len() as i32,
            Self::RoadlessTiles => faces.iter().filter(|face| face.is_roadless()).count() as i32,
            Self::Dogs => total(|face| face.occupants.dogs),
            Self::EqualLengthRoads => paths
                .iter()
                .map(|path| path.length)
                .counts()
                .into_values()
                .max()
                .unwrap_or(0) as i32,
            Self::AgentsOnOneRoad => paths
                .iter()
                .map(|path| path.agent_count())
                .max()
                .unwrap_or(0) as i32,
            Self::FewestRoads => -(paths.len() as i32),
            Self::UfosTimesAliens => total(|face| face.occupants.ufos) * free_aliens(),
            Self::AliensOnOneRoad => paths
                .iter()
                .map(|path| path.free_alien_count())
                .max()
                .unwrap_or(0) as i32,
            Self::FoodChains => paths
                .iter()
                .filter_map(|path| self.path_points(&path.objects))
                .sum(),
            Self::AlienFreeNeighbourhood => region(faces, |face| !face.has_alien()),
            Self::CitizenNeighbourhood => region(faces, |face| face.occupants.citizens() > 0),
            Self::HouseNeighbourhood => region(faces, |face| face.occupants.houses > 0),
            Self::CitizenDogPairs => total(|face| face.occupants.citizens())
                .min(total(|face| face.occupants.dogs)),
            Self::Girls => total(|face| face.occupants.girls),
            Self::Boys => total(|face| face.occupants.boys),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>2} {}", self.number(), self.description())
    }
}

fn region(faces: &[&TileFace], marked: impl Fn(&TileFace) -> bool) -> i32 {
    let mut mask = [false; TILE_COUNT];
    for (flag, face) in mask.iter_mut().zip(faces) {
        *flag = marked(*face);
    }
    largest_adjacent_region(&mask) as i32
}

// Aliens between a right-facing agent and the next left-facing agent
fn sandwiched_aliens(objects: &[OnRoad]) -> i32 {
    let mut best = 0;
    let mut armed = false;
    let mut caught = 0;
    for object in objects {
        if !armed {
            armed = object.is_agent_facing(Heading::Right);
            continue;
        }
        match object {
            OnRoad::Alien(_) => caught += 1,
            OnRoad::Agent(agent) => {
                if agent.heading == Heading::Left {
                    best = best.max(caught);
                    armed = false;
                }
                caught = 0;
            }
            OnRoad::Hamburger(_) => {}
        }
    }
    best
}

// Hamburgers in the facing direction of a single free alien
fn hamburgers_ahead(objects: &[OnRoad]) -> i32 {
    let mut best = 0;
    let mut hamburgers = 0;
    let mut right_alien = false;
    for object in objects {
        match object {
            OnRoad::Hamburger(_) => hamburgers += 1,
            OnRoad::Alien(alien) if alien.is_free() => {
                if right_alien {
                    best = best.max(hamburgers);
                    if alien.heading == Heading::Left {
                        right_alien = false;
                    }
                } else if alien.heading == Heading::Right {
                    right_alien = true;
                } else {
                    best = best.max(hamburgers);
                }
                hamburgers = 0;
            }
            _ => {}
        }
    }
    if right_alien {
        best = best.max(hamburgers);
    }
    best
}

// Aliens in a run between agents that look towards one of them
fn aliens_facing_agents(objects: &[OnRoad]) -> i32 {
    let mut best = 0;
    let mut agent_seen = false;
    let mut facing_right = 0;
    let mut facing_left = 0;
    for object in objects {
        match object {
            OnRoad::Agent(_) => {
                if agent_seen {
                    best = best.max(facing_left);
                }
                best = best.max(facing_right);
                agent_seen = true;
                facing_right = 0;
                facing_left = 0;
            }
            OnRoad::Alien(alien) => match alien.heading {
                Heading::Right => facing_right += 1,
                Heading::Left => facing_left += 1,
            },
            OnRoad::Hamburger(_) => {}
        }
    }
    if agent_seen {
        best = best.max(facing_left);
    }
    best
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ChainEnd {
    Open,
    Agent,
    Alien,
    Hamburger,
}

// Consecutive agent>alien>hamburger and hamburger<alien<agent triples
fn food_chains(objects: &[OnRoad]) -> i32 {
    let mut chains = 0;
    let mut rightward = ChainEnd::Open;
    let mut leftward = ChainEnd::Open;
    for object in objects {
        match rightward {
            ChainEnd::Agent => {
                rightward = if object.is_alien_facing(Heading::Right) {
                    ChainEnd::Alien
                } else {
                    ChainEnd::Open
                };
            }
            ChainEnd::Alien => {
                if matches!(object, OnRoad::Hamburger(_)) {
                    chains += 1;
                }
                rightward = ChainEnd::Open;
            }
            ChainEnd::Open | ChainEnd::Hamburger => {}
        }
        if rightward == ChainEnd::Open && object.is_agent_facing(Heading::Right) {
            rightward = ChainEnd::Agent;
        }

        match leftward {
            ChainEnd::Hamburger => {
                leftward = if object.is_alien_facing(Heading::Left) {
                    ChainEnd::Alien
                } else {
                    ChainEnd::Open
                };
            }
            ChainEnd::Alien => {
                if object.is_agent_facing(Heading::Left) {
                    chains += 1;
                }
                leftward = ChainEnd::Open;
            }
            ChainEnd::Open | ChainEnd::Agent => {}
        }
        if leftward == ChainEnd::Open && matches!(object, OnRoad::Hamburger(_)) {
            leftward = ChainEnd::Hamburger;
        }
    }
    chains
}

/// Points on all 26 themes, indexed by card number minus one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThemePoints([i32; THEME_COUNT]);

impl ThemePoints {
    /// Score a feasible town on every theme
    pub fn evaluate(town: &Town) -> Self {
        let mut points = [0; THEME_COUNT];
        for (slot, theme) in points.iter_mut().zip(Theme::iter()) {
            *slot = theme.evaluate(town);
        }
        Self(points)
    }

    /// Wrap precomputed points
    pub const fn from_array(points: [i32; THEME_COUNT]) -> Self {
        Self(points)
    }

    /// Points on one theme
    pub fn get(&self, theme: Theme) -> i32 {
        self.0
            .get(theme.number() as usize - 1)
            .copied()
            .unwrap_or(0)
    }

    /// Points in card order
    pub const fn as_array(&self) -> &[i32; THEME_COUNT] {
        &self.0
    }

    /// Theme and points pairs in card order
    pub fn iter(&self) -> impl Iterator<Item = (Theme, i32)> + '_ {
        Theme::iter().zip(self.0.iter().copied())
    }
}

impl fmt::Display for ThemePoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(","))
    }
}

impl FromStr for ThemePoints {
    type Err = TownError;

    fn from_str(s: &str) -> Result<Self> {
        let values: Vec<i32> = s
            .split(',')
            .map(|field| field.trim().parse::<i32>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|error| invalid_parameter("points", &s, &error))?;
        let points: [i32; THEME_COUNT] = values.try_into().map_err(|values: Vec<i32>| {
            invalid_parameter(
                "points",
                &s,
                &format!("expected {THEME_COUNT} values, found {}", values.len()),
            )
        })?;
        Ok(Self(points))
    }
}
