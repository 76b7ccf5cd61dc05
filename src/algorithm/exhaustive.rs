//! Exhaustive enumeration of every game pattern
//!
//! Tile orders run through all permutations in lexicographic order; for each
//! order the nine directions run as a base-8 odometer with position 0 most
//! significant. The iterator holds only the current pattern, so it can be
//! paused, resumed from any pattern and driven one item at a time.

use crate::io::configuration::TILE_COUNT;
use crate::spatial::pattern::Pattern;
use crate::spatial::tiles::{DIRECTION_COUNT, Direction, Placement};
use std::iter::FusedIterator;

/// Direction assignments per tile order (8^9)
pub const DIRECTION_ASSIGNMENTS: u64 = 1 << (3 * TILE_COUNT);

/// Tile orders (9!)
pub const TILE_ORDERS: u64 = 362_880;

/// Every pattern (9! * 8^9)
pub const PATTERN_COUNT: u64 = TILE_ORDERS * DIRECTION_ASSIGNMENTS;

/// Rearrange into the next lexicographic permutation
///
/// Returns `false`, leaving the slice unchanged, when it is already the last.
pub fn next_permutation(items: &mut [u8]) -> bool {
    let Some(pivot) = (1..items.len())
        .rev()
        .find(|&index| items.get(index - 1) < items.get(index))
        .map(|index| index - 1)
    else {
        return false;
    };
    let pivot_value = items.get(pivot).copied();
    let Some(successor) = (pivot + 1..items.len())
        .rev()
        .find(|&index| items.get(index).copied() > pivot_value)
    else {
        return false;
    };
    items.swap(pivot, successor);
    if let Some(tail) = items.get_mut(pivot + 1..) {
        tail.reverse();
    }
    true
}

/// Lexicographic rank of a permutation of `0..n`
pub fn permutation_rank(items: &[u8]) -> u64 {
    let mut rank = 0;
    for (index, &item) in items.iter().enumerate() {
        let smaller_after = items
            .iter()
            .skip(index + 1)
            .filter(|&&later| later < item)
            .count() as u64;
        let remaining = items.len() - index - 1;
        rank += smaller_after * (1..=remaining as u64).product::<u64>();
    }
    rank
}

fn direction_digits(counter: u64) -> [u8; TILE_COUNT] {
    std::array::from_fn(|position| {
        let shift = 3 * (TILE_COUNT - 1 - position);
        ((counter >> shift) & u64::from(DIRECTION_COUNT - 1)) as u8
    })
}

/// Lazy sequence of all 9! * 8^9 patterns
#[derive(Debug, Clone)]
pub struct ExhaustiveSearch {
    tiles: [u8; TILE_COUNT],
    counter: u64,
    exhausted: bool,
}

impl Default for ExhaustiveSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl ExhaustiveSearch {
    /// Start at `012345678000000000`
    pub fn new() -> Self {
        Self {
            tiles: std::array::from_fn(|index| index as u8),
            counter: 0,
            exhausted: false,
        }
    }

    /// Resume at `pattern`, which is yielded first
    pub fn starting_at(pattern: &Pattern) -> Self {
        let placements = pattern.placements();
        let counter = placements.iter().fold(0, |counter, placement| {
            (counter << 3) | u64::from(placement.direction.value())
        });
        Self {
            tiles: placements.map(|placement| placement.tile),
            counter,
            exhausted: false,
        }
    }

    /// Patterns not yet yielded
    pub fn remaining(&self) -> u64 {
        if self.exhausted {
            return 0;
        }
        let later_orders = TILE_ORDERS - permutation_rank(&self.tiles) - 1;
        later_orders * DIRECTION_ASSIGNMENTS + (DIRECTION_ASSIGNMENTS - self.counter)
    }

    fn current(&self) -> Pattern {
        let directions = direction_digits(self.counter);
        let mut placements = [Placement {
            tile: 0,
            direction: Direction::default(),
        }; TILE_COUNT];
        for ((placement, &tile), &digit) in
            placements.iter_mut().zip(&self.tiles).zip(&directions)
        {
            *placement = Placement {
                tile,
                direction: Direction::from_parts(digit < 4, digit),
            };
        }
        Pattern::from_permutation(placements)
    }
}

impl Iterator for ExhaustiveSearch {
    type Item = Pattern;

    fn next(&mut self) -> Option<Pattern> {
        if self.exhausted {
            return None;
        }
        let pattern = self.current();

        self.counter += 1;
        if self.counter == DIRECTION_ASSIGNMENTS {
            self.counter = 0;
            if !next_permutation(&mut self.tiles) {
                self.exhausted = true;
            }
        }
        Some(pattern)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining()).ok();
        (remaining.unwrap_or(usize::MAX), remaining)
    }
}

impl FusedIterator for ExhaustiveSearch {}

/// Every game pattern in search order, feasible or not
pub fn search_all() -> ExhaustiveSearch {
    ExhaustiveSearch::new()
}
