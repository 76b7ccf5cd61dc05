//! Tests for road continuity and closed-loop detection

#[cfg(test)]
mod tests {
    use ninetiles::algorithm::feasibility::{
        Infeasibility, find_infeasibility, find_loop, find_mismatch, synonym_faces,
        synonym_feasible,
    };
    use ninetiles::spatial::pattern::{Pattern, SynonymPattern};
    use ninetiles::spatial::tiles::{Catalogue, TileFace};

    fn faces(pattern: &str) -> Vec<&'static TileFace> {
        let pattern = Pattern::parse(pattern).expect("valid pattern");
        pattern
            .placements()
            .iter()
            .map(|placement| {
                Catalogue::original()
                    .face(placement.tile, placement.direction)
                    .expect("face exists")
            })
            .collect()
    }

    // Tests a known legal town passes both checks
    // Verified by flipping the continuity comparison
    #[test]
    fn test_feasible_town() {
        let faces = faces("206745813361230035");
        assert_eq!(find_mismatch(&faces), None);
        assert_eq!(find_loop(&faces), None);
        assert_eq!(find_infeasibility(&faces), None);
    }

    // Tests the first mismatch in checking order is reported
    // Verified by iterating adjacencies in reverse
    #[test]
    fn test_first_mismatch_reported() {
        let faces = faces("012345678000000000");
        assert_eq!(
            find_mismatch(&faces),
            Some(Infeasibility::RoadMismatch {
                position: 1,
                neighbour: 0
            })
        );
    }

    // Tests four curves around one internal corner close a loop
    // Verified by ignoring the union result
    #[test]
    fn test_closed_loop_detected() {
        let synonym = SynonymPattern::parse("110110000210300000").expect("valid synonym");
        let faces = synonym_faces(&synonym).expect("synonym faces exist");
        assert_eq!(find_mismatch(&faces), None);
        assert_eq!(
            find_loop(&faces),
            Some(Infeasibility::ClosedLoop { slot: 15 })
        );
        assert!(!synonym_feasible(&synonym));
    }

    // Tests mismatches take precedence over loops
    // Verified by running the loop check first
    #[test]
    fn test_mismatch_checked_first() {
        let faces = faces("012345678000000000");
        assert!(matches!(
            find_infeasibility(&faces),
            Some(Infeasibility::RoadMismatch { .. })
        ));
    }

    // Tests an empty synonym town is feasible
    // Verified by treating roadless neighbours as mismatched
    #[test]
    fn test_roadless_town_feasible() {
        let synonym = SynonymPattern::parse("000000000000000000").expect("valid synonym");
        assert!(synonym_feasible(&synonym));
    }

    // Tests a straight road crossing the whole top row
    // Verified by mapping left edges to their own slot
    #[test]
    fn test_straight_row_feasible() {
        let synonym = SynonymPattern::parse("333000000111000000").expect("valid synonym");
        assert!(synonym_feasible(&synonym));

        let broken = SynonymPattern::parse("303000000101000000").expect("valid synonym");
        assert!(!synonym_feasible(&broken));
    }

    // Tests the display of each reason
    // Verified by swapping the positions in the message
    #[test]
    fn test_display() {
        let mismatch = Infeasibility::RoadMismatch {
            position: 4,
            neighbour: 1,
        };
        assert_eq!(
            mismatch.to_string(),
            "road ends of positions 1 and 4 do not meet"
        );
        assert_eq!(
            Infeasibility::ClosedLoop { slot: 15 }.to_string(),
            "road loop closes at slot 15"
        );
    }
}
