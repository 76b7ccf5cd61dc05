//! Pattern strings for game towns and synonym towns
//!
//! A town pattern is 18 digits: the tile id at each position, then the
//! direction of each tile. A synonym pattern has the same shape but names a
//! road class and a plain rotation at each position.

use crate::algorithm::bitset::IndexBitset;
use crate::io::configuration::{PATTERN_LENGTH, SYNONYM_CLASS_COUNT, TILE_COUNT};
use crate::io::error::{PatternFault, Result, malformed_pattern};
use crate::spatial::tiles::{Direction, Placement};
use std::fmt;
use std::str::FromStr;

/// Split a pattern into its two digit halves
fn digits(pattern: &str) -> Result<([u8; TILE_COUNT], [u8; TILE_COUNT])> {
    let found = pattern.chars().count();
    if found != PATTERN_LENGTH {
        return Err(malformed_pattern(
            pattern,
            PatternFault::WrongLength {
                expected: PATTERN_LENGTH,
                found,
            },
        ));
    }

    let mut first = [0; TILE_COUNT];
    let mut second = [0; TILE_COUNT];
    for (index, ch) in pattern.chars().enumerate() {
        let digit = ch
            .to_digit(10)
            .ok_or_else(|| malformed_pattern(pattern, PatternFault::NonDigit { index }))?
            as u8;
        let slot = if index < TILE_COUNT {
            first.get_mut(index)
        } else {
            second.get_mut(index - TILE_COUNT)
        };
        if let Some(slot) = slot {
            *slot = digit;
        }
    }
    Ok((first, second))
}

/// A validated town pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pattern {
    placements: [Placement; TILE_COUNT],
}

impl Pattern {
    /// Parse and validate an 18-digit town pattern
    ///
    /// # Errors
    ///
    /// Returns [`crate::TownError::MalformedPattern`] naming the first fault:
    /// wrong length, a non-digit, a tile or direction out of range, or a
    /// repeated tile.
    pub fn parse(pattern: &str) -> Result<Self> {
        let (tiles, directions) = digits(pattern)?;
        Self::from_digits(tiles, directions).map_err(|fault| malformed_pattern(pattern, fault))
    }

    /// Build a pattern from tile ids and direction digits
    ///
    /// # Errors
    ///
    /// Returns the first fault found in the two halves.
    pub fn from_digits(
        tiles: [u8; TILE_COUNT],
        directions: [u8; TILE_COUNT],
    ) -> std::result::Result<Self, PatternFault> {
        let mut placements = [Placement {
            tile: 0,
            direction: Direction::default(),
        }; TILE_COUNT];

        for (position, &digit) in tiles.iter().enumerate() {
            if digit as usize >= TILE_COUNT {
                return Err(PatternFault::TileOutOfRange { position, digit });
            }
        }

        for (position, (&tile, &digit)) in tiles.iter().zip(directions.iter()).enumerate() {
            let direction =
                Direction::new(digit).ok_or(PatternFault::DirectionOutOfRange { position, digit })?;
            if let Some(placement) = placements.get_mut(position) {
                *placement = Placement { tile, direction };
            }
        }
        let mut used = IndexBitset::new(TILE_COUNT);
        for &tile in &tiles {
            if used.contains(tile as usize) {
                return Err(PatternFault::DuplicateTile { tile });
            }
            used.insert(tile as usize);
        }

        Ok(Self { placements })
    }

    /// Build a pattern from placements, checking that each tile appears once
    ///
    /// # Errors
    ///
    /// Returns the first fault found.
    pub fn from_placements(
        placements: [Placement; TILE_COUNT],
    ) -> std::result::Result<Self, PatternFault> {
        Self::from_digits(
            placements.map(|placement| placement.tile),
            placements.map(|placement| placement.direction.value()),
        )
    }

    /// Wrap placements whose tiles are already known to be a permutation
    pub(crate) const fn from_permutation(placements: [Placement; TILE_COUNT]) -> Self {
        Self { placements }
    }

    /// Placement at every position
    pub const fn placements(&self) -> &[Placement; TILE_COUNT] {
        &self.placements
    }

    /// Placement at one position
    pub fn placement(&self, position: usize) -> Option<Placement> {
        self.placements.get(position).copied()
    }
}

impl FromStr for Pattern {
    type Err = crate::io::error::TownError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for placement in &self.placements {
            write!(f, "{}", placement.tile)?;
        }
        for placement in &self.placements {
            write!(f, "{}", placement.direction)?;
        }
        Ok(())
    }
}

/// A town built from synonym tiles: a road class and rotation per position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SynonymPattern {
    classes: [u8; TILE_COUNT],
    rotations: [u8; TILE_COUNT],
}

impl SynonymPattern {
    /// Parse and validate an 18-digit synonym pattern
    ///
    /// # Errors
    ///
    /// Returns [`crate::TownError::MalformedPattern`] for a wrong length, a
    /// non-digit, a class outside 0 to 4 or a rotation outside 0 to 3.
    pub fn parse(pattern: &str) -> Result<Self> {
        let (classes, rotations) = digits(pattern)?;
        Self::new(classes, rotations).map_err(|fault| malformed_pattern(pattern, fault))
    }

    /// Build a synonym pattern from its two halves
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range class or rotation.
    pub fn new(
        classes: [u8; TILE_COUNT],
        rotations: [u8; TILE_COUNT],
    ) -> std::result::Result<Self, PatternFault> {
        for (position, (&class, &rotation)) in classes.iter().zip(rotations.iter()).enumerate() {
            if class as usize >= SYNONYM_CLASS_COUNT {
                return Err(PatternFault::SynonymClassOutOfRange {
                    position,
                    digit: class,
                });
            }
            if rotation >= 4 {
                return Err(PatternFault::SynonymRotationOutOfRange {
                    position,
                    digit: rotation,
                });
            }
        }
        Ok(Self { classes, rotations })
    }

    /// Road class at every position
    pub const fn classes(&self) -> &[u8; TILE_COUNT] {
        &self.classes
    }

    /// Rotation at every position
    pub const fn rotations(&self) -> &[u8; TILE_COUNT] {
        &self.rotations
    }

    /// Synonym tiles as front-face placements
    pub fn placements(&self) -> [Placement; TILE_COUNT] {
        std::array::from_fn(|position| Placement {
            tile: self.classes.get(position).copied().unwrap_or(0),
            direction: Direction::from_parts(
                true,
                self.rotations.get(position).copied().unwrap_or(0),
            ),
        })
    }

    /// How many positions hold each class
    pub fn class_counts(&self) -> [usize; SYNONYM_CLASS_COUNT] {
        let mut counts = [0; SYNONYM_CLASS_COUNT];
        for &class in &self.classes {
            if let Some(count) = counts.get_mut(class as usize) {
                *count += 1;
            }
        }
        counts
    }
}

impl FromStr for SynonymPattern {
    type Err = crate::io::error::TownError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SynonymPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for class in &self.classes {
            write!(f, "{class}")?;
        }
        for rotation in &self.rotations {
            write!(f, "{rotation}")?;
        }
        Ok(())
    }
}
