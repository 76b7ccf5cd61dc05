//! Fixed 3x3 board geometry and the global edge-slot numbering
//!
//! Positions run row-major from 0 to 8. Every tile edge maps onto one of 36
//! global slots; a shared internal edge is the bottom or right slot of the
//! upper or left tile, so both neighbours name the same slot.
//!
//! ```text
//! +-0-+--4-+-8-+
//! 1   3    7  11
//! +-2-+--6-+10-+
//! 13  15  19  23
//! +-14+-18-+22-+
//! 25  27  31  35
//! +-26+-30-+34-+
//! ```

use crate::io::configuration::{GRID_SIDE, TILE_COUNT};
use crate::spatial::road::Side;
use ndarray::Array2;

/// Slots on the town border, ascending
pub const OUTER_SLOTS: [u8; 12] = [0, 1, 4, 8, 11, 13, 23, 25, 26, 30, 34, 35];

/// Slots shared between two tiles, ascending
pub const INNER_SLOTS: [u8; 12] = [2, 3, 6, 7, 10, 14, 15, 18, 19, 22, 27, 31];

/// Adjacent pairs as (position, earlier neighbour), in checking order
///
/// Each later position is compared with its already placed neighbours, so a
/// town reports the first mismatch a row-major placement would hit.
pub const ADJACENCIES: [(usize, usize); 12] = [
    (1, 0),
    (2, 1),
    (3, 0),
    (4, 1),
    (4, 3),
    (5, 2),
    (5, 4),
    (6, 3),
    (7, 4),
    (7, 6),
    (8, 5),
    (8, 7),
];

/// Row of a position
pub const fn row(position: usize) -> usize {
    position / GRID_SIDE
}

/// Column of a position
pub const fn column(position: usize) -> usize {
    position % GRID_SIDE
}

/// Positions sharing an edge with `position`, ascending
pub fn neighbours(position: usize) -> Vec<usize> {
    if position >= TILE_COUNT {
        return Vec::new();
    }
    let mut found = Vec::with_capacity(4);
    if row(position) > 0 {
        found.push(position - GRID_SIDE);
    }
    if column(position) > 0 {
        found.push(position - 1);
    }
    if column(position) + 1 < GRID_SIDE {
        found.push(position + 1);
    }
    if row(position) + 1 < GRID_SIDE {
        found.push(position + GRID_SIDE);
    }
    found
}

/// Edge of the tile at `position` that touches the tile at `neighbour`
pub fn facing_side(position: usize, neighbour: usize) -> Option<Side> {
    if !neighbours(position).contains(&neighbour) {
        return None;
    }
    Some(if neighbour + GRID_SIDE == position {
        Side::Top
    } else if neighbour + 1 == position {
        Side::Left
    } else if neighbour == position + GRID_SIDE {
        Side::Bottom
    } else {
        Side::Right
    })
}

/// Global slot of edge `side` of the tile at `position`
pub const fn edge_slot(position: usize, side: Side) -> u8 {
    let slot = match side {
        Side::Top if row(position) > 0 => (position - GRID_SIDE) * 4 + 2,
        Side::Left if column(position) > 0 => (position - 1) * 4 + 3,
        _ => position * 4 + side.index() as usize,
    };
    slot as u8
}

/// Whether a slot lies on the town border
pub fn is_outer_slot(slot: u8) -> bool {
    OUTER_SLOTS.binary_search(&slot).is_ok()
}

/// Size of the largest 4-connected group of marked positions
///
/// Returns 0 when nothing is marked.
pub fn largest_adjacent_region(marked: &[bool; TILE_COUNT]) -> usize {
    let board = Array2::from_shape_fn((GRID_SIDE, GRID_SIDE), |(r, c)| {
        marked.get(r * GRID_SIDE + c).copied().unwrap_or(false)
    });
    let mut seen = Array2::from_elem((GRID_SIDE, GRID_SIDE), false);
    let mut largest = 0;

    for start in 0..TILE_COUNT {
        let cell = [row(start), column(start)];
        if !board.get(cell).copied().unwrap_or(false) || seen.get(cell).copied().unwrap_or(true)
        {
            continue;
        }

        let mut size = 0;
        let mut stack = vec![start];
        if let Some(flag) = seen.get_mut(cell) {
            *flag = true;
        }
        while let Some(position) = stack.pop() {
            size += 1;
            for next in neighbours(position) {
                let next_cell = [row(next), column(next)];
                if !board.get(next_cell).copied().unwrap_or(false)
                    || seen.get(next_cell).copied().unwrap_or(true)
                {
                    continue;
                }
                if let Some(flag) = seen.get_mut(next_cell) {
                    *flag = true;
                }
                stack.push(next);
            }
        }
        largest = largest.max(size);
    }

    largest
}
