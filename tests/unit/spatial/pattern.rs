//! Tests for pattern parsing and validation

#[cfg(test)]
mod tests {
    use ninetiles::TownError;
    use ninetiles::io::error::PatternFault;
    use ninetiles::spatial::pattern::{Pattern, SynonymPattern};
    use ninetiles::spatial::tiles::{Direction, Placement};

    fn fault(pattern: &str) -> Option<PatternFault> {
        match Pattern::parse(pattern) {
            Err(TownError::MalformedPattern { fault, .. }) => Some(fault),
            _ => None,
        }
    }

    // Tests a valid pattern keeps tile and direction per position
    // Verified by reading directions from the first half
    #[test]
    fn test_parse_and_display() {
        let pattern: Pattern = "206745813361230035".parse().expect("valid pattern");
        assert_eq!(
            pattern.placement(0),
            Some(Placement {
                tile: 2,
                direction: Direction::new(3).expect("valid digit"),
            })
        );
        assert_eq!(pattern.placement(9), None);
        assert_eq!(pattern.to_string(), "206745813361230035");
    }

    // Tests each kind of malformed pattern
    // Verified by checking duplicates before ranges
    #[test]
    fn test_faults() {
        assert_eq!(
            fault("2067458133612300"),
            Some(PatternFault::WrongLength {
                expected: 18,
                found: 16
            })
        );
        assert_eq!(
            fault("20674581336123003a"),
            Some(PatternFault::NonDigit { index: 17 })
        );
        assert_eq!(
            fault("906745813361230035"),
            Some(PatternFault::TileOutOfRange {
                position: 0,
                digit: 9
            })
        );
        assert_eq!(
            fault("206745813361230038"),
            Some(PatternFault::DirectionOutOfRange {
                position: 8,
                digit: 8
            })
        );
        assert_eq!(
            fault("226745813361230035"),
            Some(PatternFault::DuplicateTile { tile: 2 })
        );
        assert_eq!(fault("206745813361230035"), None);
    }

    // Tests placements round trip through the checked constructor
    // Verified by skipping the duplicate check for placements
    #[test]
    fn test_from_placements() {
        let pattern = Pattern::parse("012345678765432100").expect("valid pattern");
        assert_eq!(Pattern::from_placements(*pattern.placements()), Ok(pattern));

        let mut doubled = *pattern.placements();
        if let Some(placement) = doubled.get_mut(1) {
            placement.tile = 0;
        }
        assert_eq!(
            Pattern::from_placements(doubled),
            Err(PatternFault::DuplicateTile { tile: 0 })
        );
    }

    // Tests synonym patterns accept repeated classes and bound the digits
    // Verified by rejecting repeated classes as duplicate tiles
    #[test]
    fn test_synonym_pattern() {
        let synonym = SynonymPattern::parse("224221113000100031").expect("valid synonym");
        assert_eq!(synonym.class_counts(), [0, 3, 4, 1, 1]);
        assert_eq!(synonym.classes(), &[2, 2, 4, 2, 2, 1, 1, 1, 3]);
        assert_eq!(synonym.rotations(), &[0, 0, 0, 1, 0, 0, 0, 3, 1]);
        assert_eq!(synonym.to_string(), "224221113000100031");

        let last = synonym.placements();
        assert_eq!(last.get(7).map(|p| p.direction.value()), Some(3));

        assert!(SynonymPattern::parse("524221113000100031").is_err());
        assert!(SynonymPattern::parse("224221113000100041").is_err());
    }
}
