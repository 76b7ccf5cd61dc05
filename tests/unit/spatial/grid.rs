//! Tests for board geometry and edge-slot numbering

#[cfg(test)]
mod tests {
    use ninetiles::spatial::grid::{
        ADJACENCIES, INNER_SLOTS, OUTER_SLOTS, column, edge_slot, facing_side, is_outer_slot,
        largest_adjacent_region, neighbours, row,
    };
    use ninetiles::spatial::road::Side;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    // Tests row-major coordinates and neighbours
    // Verified by wrapping columns across rows
    #[test]
    fn test_neighbours() {
        assert_eq!((row(5), column(5)), (1, 2));
        assert_eq!(neighbours(0), vec![1, 3]);
        assert_eq!(neighbours(4), vec![1, 3, 5, 7]);
        assert_eq!(neighbours(5), vec![2, 4, 8]);
        assert!(neighbours(9).is_empty());
    }

    // Tests the side a tile shows to each neighbour
    // Verified by swapping left and right
    #[test]
    fn test_facing_side() {
        assert_eq!(facing_side(4, 1), Some(Side::Top));
        assert_eq!(facing_side(4, 3), Some(Side::Left));
        assert_eq!(facing_side(4, 7), Some(Side::Bottom));
        assert_eq!(facing_side(4, 5), Some(Side::Right));
        assert_eq!(facing_side(2, 3), None);
    }

    // Tests shared edges resolve to one slot from both tiles
    // Verified by giving every tile its own four slots
    #[test]
    fn test_shared_slots() {
        for &(position, neighbour) in &ADJACENCIES {
            let side = facing_side(position, neighbour).expect("adjacent");
            assert_eq!(
                edge_slot(position, side),
                edge_slot(neighbour, side.opposite()),
                "positions {position} and {neighbour}"
            );
        }
        assert_eq!(edge_slot(4, Side::Top), 6);
        assert_eq!(edge_slot(4, Side::Left), 15);
        assert_eq!(edge_slot(8, Side::Right), 35);
    }

    // Tests every slot is either border or inner, never both
    // Verified by adding slot 2 to the border
    #[test]
    fn test_slot_partition() {
        let mut slots = HashSet::new();
        for position in 0..9 {
            for side in Side::iter() {
                slots.insert(edge_slot(position, side));
            }
        }
        assert_eq!(slots.len(), 24);
        for slot in slots {
            assert_ne!(is_outer_slot(slot), INNER_SLOTS.contains(&slot), "slot {slot}");
        }
        assert!(OUTER_SLOTS.windows(2).all(|pair| pair.first() < pair.last()));
    }

    // Tests the largest 4-connected region
    // Verified by counting diagonal neighbours as adjacent
    #[test]
    fn test_largest_adjacent_region() {
        assert_eq!(largest_adjacent_region(&[false; 9]), 0);
        assert_eq!(largest_adjacent_region(&[true; 9]), 9);
        let diagonal = [true, false, false, false, true, false, false, false, true];
        assert_eq!(largest_adjacent_region(&diagonal), 1);
        let split = [true, true, false, false, false, true, true, false, true];
        assert_eq!(largest_adjacent_region(&split), 2);
        let ring = [true, true, true, true, false, true, true, true, true];
        assert_eq!(largest_adjacent_region(&ring), 8);
    }
}
