//! Tests for run counters and per-theme leaders

#[cfg(test)]
mod tests {
    use ninetiles::analysis::statistics::{SearchStats, ThemeLeaders, disagreeing_themes};
    use ninetiles::analysis::themes::{Theme, ThemePoints};
    use ninetiles::spatial::pattern::Pattern;

    fn points_with(theme: Theme, value: i32) -> ThemePoints {
        let mut points = [0; 26];
        if let Some(slot) = points.get_mut(theme.number() as usize - 1) {
            *slot = value;
        }
        ThemePoints::from_array(points)
    }

    // Tests only topological themes are compared
    // Verified by comparing every theme
    #[test]
    fn test_disagreeing_themes() {
        let synonym = points_with(Theme::Curves, 3);
        assert_eq!(
            disagreeing_themes(&synonym, &points_with(Theme::Curves, 4)),
            vec![Theme::Curves]
        );
        // Dogs depend on occupants, not road shape
        assert!(disagreeing_themes(&synonym, &points_with(Theme::Curves, 3)).is_empty());
        let mut dogs = *synonym.as_array();
        if let Some(slot) = dogs.get_mut(Theme::Dogs.number() as usize - 1) {
            *slot = 5;
        }
        assert!(disagreeing_themes(&synonym, &ThemePoints::from_array(dogs)).is_empty());
    }

    // Tests the first pattern reaching a best score is kept
    // Verified by replacing leaders on equal scores
    #[test]
    fn test_leaders_keep_first_best() {
        let first = Pattern::parse("012345678000000000").expect("valid pattern");
        let second = Pattern::parse("012345678000000001").expect("valid pattern");
        let third = Pattern::parse("012345678000000002").expect("valid pattern");

        let mut leaders = ThemeLeaders::new();
        assert_eq!(leaders.leader(Theme::Dogs), None);

        leaders.record(&first, &points_with(Theme::Dogs, 2));
        leaders.record(&second, &points_with(Theme::Dogs, 2));
        assert_eq!(leaders.leader(Theme::Dogs), Some((2, first)));

        leaders.record(&third, &points_with(Theme::Dogs, 3));
        assert_eq!(leaders.leader(Theme::Dogs), Some((3, third)));
        assert_eq!(leaders.leader(Theme::Boys), Some((0, first)));
        assert_eq!(leaders.iter().count(), 26);
    }

    // Tests negative scores still produce a leader
    // Verified by starting every leader at zero
    #[test]
    fn test_negative_leader() {
        let pattern = Pattern::parse("012345678000000000").expect("valid pattern");
        let mut leaders = ThemeLeaders::new();
        leaders.record(&pattern, &points_with(Theme::FewestRoads, -5));
        assert_eq!(leaders.leader(Theme::FewestRoads), Some((-5, pattern)));
    }

    // Tests counters and completion fraction
    // Verified by dividing by done instead of total
    #[test]
    fn test_search_stats() {
        let mut stats = SearchStats::new(4);
        assert!(stats.completion().abs() < f64::EPSILON);
        stats.partitions_done = 1;
        assert!((stats.completion() - 0.25).abs() < f64::EPSILON);

        let pattern = Pattern::parse("206745813361230035").expect("valid pattern");
        stats.record_town(&pattern, &points_with(Theme::Roads, 4));
        assert_eq!(stats.towns, 1);
        assert_eq!(stats.leaders.leader(Theme::Roads), Some((4, pattern)));

        assert!((SearchStats::new(0).completion() - 1.0).abs() < f64::EPSILON);
    }

    // Tests the one-line summary
    // Verified by omitting the gap counter
    #[test]
    fn test_stats_display() {
        let stats = SearchStats {
            examined: 10,
            towns: 7,
            gaps: 2,
            disagreements: 1,
            ..SearchStats::new(3)
        };
        assert_eq!(
            stats.to_string(),
            "examined 10 | towns 7 | gaps 2 | disagreements 1"
        );
    }
}
