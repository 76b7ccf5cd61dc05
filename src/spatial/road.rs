//! Tile-local road segments and the four tile edges they connect
//!
//! Edges are numbered anticlockwise from the top: 0 top, 1 left, 2 bottom,
//! 3 right. Rotating a tile one step maps edge `e` to `(e + 1) % 4`, and the
//! facing of any agent or alien on the road rotates with it.

use std::fmt;
use strum::{EnumCount, EnumIter};

/// One of the four edges of a square tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCount)]
#[repr(u8)]
pub enum Side {
    /// Edge 0
    Top = 0,
    /// Edge 1
    Left = 1,
    /// Edge 2
    Bottom = 2,
    /// Edge 3
    Right = 3,
}

impl Side {
    /// Side for a numeric edge, wrapping modulo 4
    pub const fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Self::Top,
            1 => Self::Left,
            2 => Self::Bottom,
            _ => Self::Right,
        }
    }

    /// Numeric edge value in `0..4`
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Side reached after `steps` quarter turns
    #[must_use]
    pub const fn rotated(self, steps: u8) -> Self {
        Self::from_index(self.index() + steps % 4)
    }

    /// Side directly across the tile
    #[must_use]
    pub const fn opposite(self) -> Self {
        self.rotated(2)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// A road crossing one tile between two of its edges
///
/// A road carries at most one on-road occupant in play: an agent if present,
/// otherwise an alien, otherwise its hamburgers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Road {
    /// Edge the road is listed from
    pub initial: Side,
    /// Edge the road is listed to
    pub terminal: Side,
    /// Edge an on-road agent faces, if any
    pub agent: Option<Side>,
    /// Edge an on-road alien faces, if any
    pub alien: Option<Side>,
    /// Hamburgers lying on the road
    pub hamburgers: u8,
}

impl Road {
    /// Bare road between two edges
    pub const fn new(initial: Side, terminal: Side) -> Self {
        Self {
            initial,
            terminal,
            agent: None,
            alien: None,
            hamburgers: 0,
        }
    }

    /// Place an agent facing `facing`
    #[must_use]
    pub const fn with_agent(mut self, facing: Side) -> Self {
        self.agent = Some(facing);
        self
    }

    /// Place an alien facing `facing`
    #[must_use]
    pub const fn with_alien(mut self, facing: Side) -> Self {
        self.alien = Some(facing);
        self
    }

    /// Place `count` hamburgers on the road
    #[must_use]
    pub const fn with_hamburgers(mut self, count: u8) -> Self {
        self.hamburgers = count;
        self
    }

    /// The same road after `steps` quarter turns of its tile
    #[must_use]
    pub const fn rotated(self, steps: u8) -> Self {
        Self {
            initial: self.initial.rotated(steps),
            terminal: self.terminal.rotated(steps),
            agent: match self.agent {
                Some(side) => Some(side.rotated(steps)),
                None => None,
            },
            alien: match self.alien {
                Some(side) => Some(side.rotated(steps)),
                None => None,
            },
            hamburgers: self.hamburgers,
        }
    }

    /// Whether the road turns a corner rather than crossing straight over
    pub const fn is_curve(&self) -> bool {
        (self.initial.index() + self.terminal.index()) % 2 == 1
    }

    /// Whether one of the road's ends lies on `side`
    pub fn touches(&self, side: Side) -> bool {
        self.initial == side || self.terminal == side
    }

    /// Whether the road joins exactly these two edges, in either order
    pub fn connects(&self, a: Side, b: Side) -> bool {
        (self.initial == a && self.terminal == b) || (self.initial == b && self.terminal == a)
    }

    /// Bit pattern of the edge pair, independent of listing order
    ///
    /// Bit `4 * low + high` is set, where `low < high` are the edge indices.
    pub const fn connection_bit(&self) -> u16 {
        let (low, high) = if self.initial.index() < self.terminal.index() {
            (self.initial.index(), self.terminal.index())
        } else {
            (self.terminal.index(), self.initial.index())
        };
        1 << (low * 4 + high)
    }
}

impl fmt::Display for Road {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.initial, self.terminal)?;
        if let Some(side) = self.agent {
            write!(f, " agent>{side}")?;
        } else if let Some(side) = self.alien {
            write!(f, " alien>{side}")?;
        } else if self.hamburgers > 0 {
            write!(f, " hamburger x{}", self.hamburgers)?;
        }
        Ok(())
    }
}
