//! Tests for the search pipelines, the batch runner and random verification

#[cfg(test)]
mod tests {
    use ninetiles::algorithm::executor::{
        BatchRunner, RunConfig, SearchEvent, SearchMode, TownRecord, expand_group,
        random_pattern, search_point, search_point_2step, verify_random,
    };
    use ninetiles::algorithm::mapping::{MappingTable, TableKind};
    use ninetiles::io::configuration::RESULT_CHANNEL_CAPACITY;
    use ninetiles::io::error::invalid_parameter;
    use ninetiles::spatial::pattern::{Pattern, SynonymPattern};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;
    use std::sync::atomic::Ordering;

    const REFERENCE: &str = "206745813361230035";
    const REFERENCE_SYNONYM: &str = "224221113000100031";

    fn config(mode: SearchMode, limit: Option<u64>) -> RunConfig {
        RunConfig {
            mode,
            table: TableKind::ScoreEquivalent,
            limit,
            jobs: Some(1),
        }
    }

    // Tests scoring keeps the pattern and rejects infeasible towns
    // Verified by scoring before the feasibility check
    #[test]
    fn test_town_record_score() {
        let pattern = Pattern::parse(REFERENCE).expect("valid pattern");
        let record = TownRecord::score(&pattern).expect("feasible town");
        assert_eq!(record.pattern, pattern);
        assert_eq!(record.points.as_array().get(5), Some(&11));

        let broken = Pattern::parse("012345678000000000").expect("valid pattern");
        assert_eq!(TownRecord::score(&broken), None);
    }

    // Tests a feasible arrangement expands without gaps or disagreements
    // Verified by comparing every theme instead of the topological ones
    #[test]
    fn test_expand_group() {
        let synonym = SynonymPattern::parse(REFERENCE_SYNONYM).expect("valid synonym");
        let group = expand_group(&synonym, MappingTable::score_equivalent(), true);

        assert_eq!(group.synonym, synonym);
        assert_eq!(group.towns.len(), 9_216);
        assert_eq!(group.gaps, 0);
        assert_eq!(group.disagreements, 0);

        let synonym_points = group.synonym_points.expect("synonym town is feasible");
        // Roads and curves come from road shape alone
        assert_eq!(synonym_points.as_array().get(9), Some(&4));
        assert_eq!(synonym_points.as_array().get(5), Some(&11));
    }

    // Tests synonym points are skipped unless asked for
    // Verified by always scoring the synonym town
    #[test]
    fn test_expand_group_without_synonym_points() {
        let synonym = SynonymPattern::parse(REFERENCE_SYNONYM).expect("valid synonym");
        let group = expand_group(&synonym, MappingTable::score_equivalent(), false);
        assert_eq!(group.synonym_points, None);
        assert_eq!(group.disagreements, 0);
    }

    // Tests an arrangement with no realization counts as one gap
    // Verified by leaving gaps at zero for empty expansions
    #[test]
    fn test_expand_group_gap() {
        let synonym = SynonymPattern::parse("000000000000000000").expect("valid synonym");
        let group = expand_group(&synonym, MappingTable::complete(), false);
        assert!(group.towns.is_empty());
        assert_eq!(group.gaps, 1);
    }

    // Tests the lazy pipelines yield feasible towns in arrangement order
    // Verified by yielding infeasible realizations as towns
    #[test]
    fn test_lazy_pipelines() {
        let towns: Vec<TownRecord> = search_point(MappingTable::score_equivalent())
            .take(20)
            .collect();
        assert_eq!(towns.len(), 20);
        assert!(towns.iter().all(|record| TownRecord::score(&record.pattern).is_some()));

        let first_group = search_point_2step(MappingTable::score_equivalent())
            .next()
            .expect("at least one arrangement");
        assert_eq!(first_group.synonym.to_string(), "000111122000121300");
        assert!(first_group.synonym_points.is_some());
    }

    // Tests the runner stops once the town limit is reached
    // Verified by checking the limit only after each partition
    #[test]
    fn test_runner_limit() {
        let runner = BatchRunner::new(config(SearchMode::Synonym, Some(5)));
        let mut patterns = Vec::new();
        let stats = runner
            .run(
                |event| {
                    if let SearchEvent::Town(record) = event {
                        patterns.push(record.pattern);
                    }
                    Ok(())
                },
                |_| {},
            )
            .expect("run succeeds");

        assert_eq!(patterns.len(), 5);
        assert_eq!(stats.towns, 5);
        assert!(runner.cancel_flag().load(Ordering::Relaxed));
        let unique: HashSet<Pattern> = patterns.iter().copied().collect();
        assert_eq!(unique.len(), patterns.len());
    }

    // Tests workers blocked on a full result channel are released at the limit
    // Verified by keeping the receiver alive until the workers finish
    #[test]
    fn test_runner_limit_past_channel_capacity() {
        let limit = 3 * RESULT_CHANNEL_CAPACITY as u64;
        let runner = BatchRunner::new(RunConfig {
            jobs: Some(4),
            ..config(SearchMode::Synonym, Some(limit))
        });
        let mut towns = 0_u64;
        let stats = runner
            .run(
                |event| {
                    if towns == 0 {
                        std::thread::sleep(std::time::Duration::from_millis(50));
                    }
                    if let SearchEvent::Town(_) = event {
                        towns += 1;
                    }
                    Ok(())
                },
                |_| {},
            )
            .expect("run succeeds");

        assert_eq!(towns, limit);
        assert_eq!(stats.towns, limit);
        assert!(runner.cancel_flag().load(Ordering::Relaxed));
    }

    // Tests the two-step runner delivers whole groups
    // Verified by splitting groups into town events
    #[test]
    fn test_runner_two_step_groups() {
        let runner = BatchRunner::new(config(SearchMode::TwoStep, Some(1)));
        let mut groups = 0;
        let stats = runner
            .run(
                |event| {
                    assert!(matches!(event, SearchEvent::Group(_)));
                    groups += 1;
                    Ok(())
                },
                |_| {},
            )
            .expect("run succeeds");
        assert!(groups >= 1);
        assert!(stats.towns >= 1);
        assert!(stats.leaders.iter().count() > 0);
    }

    // Tests a sink failure stops the run and is returned
    // Verified by ignoring the sink result
    #[test]
    fn test_runner_sink_error() {
        let runner = BatchRunner::new(config(SearchMode::Synonym, None));
        let outcome = runner.run(
            |_| Err(invalid_parameter("sink", &"towns.csv", &"closed")),
            |_| {},
        );
        assert!(outcome.is_err());
    }

    // Tests a cancelled runner finishes without results
    // Verified by ignoring the cancel flag in the workers
    #[test]
    fn test_runner_cancelled_before_start() {
        let runner = BatchRunner::new(config(SearchMode::Synonym, None));
        runner.cancel_flag().store(true, Ordering::Relaxed);
        let stats = runner.run(|_| Ok(()), |_| {}).expect("run succeeds");
        assert_eq!(stats.towns, 0);
        assert_eq!(stats.partitions_done, 0);
    }

    // Tests random patterns place each tile once with valid directions
    // Verified by sampling tiles with replacement
    #[test]
    fn test_random_pattern() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let pattern = random_pattern(&mut rng);
            let tiles: HashSet<u8> = pattern.placements().iter().map(|p| p.tile).collect();
            assert_eq!(tiles.len(), 9);
            let reparsed = Pattern::parse(&pattern.to_string()).expect("round trips");
            assert_eq!(reparsed, pattern);
        }
    }

    // Tests random verification agrees with the synonym pipeline
    // Verified by reducing with the wrong rotation direction
    #[test]
    fn test_verify_random() {
        let report = verify_random(300, 42, MappingTable::complete());
        assert_eq!(report.samples, 300);
        assert!(report.mismatches.is_empty());
        assert_eq!(report.covered, report.feasible);
        assert_eq!(report.disagreements, 0);
        assert!(report.is_consistent(TableKind::Complete));

        let again = verify_random(300, 42, MappingTable::complete());
        assert_eq!(again, report);
    }

    // Tests the reduced table may miss towns without failing verification
    // Verified by requiring full coverage for every table
    #[test]
    fn test_verify_reduced_table() {
        let report = verify_random(300, 3, MappingTable::score_equivalent());
        assert!(report.covered <= report.feasible);
        assert!(report.is_consistent(TableKind::ScoreEquivalent));
    }

    // Tests search mode names
    // Verified by swapping the two-step and synonym labels
    #[test]
    fn test_search_mode_display() {
        assert_eq!(SearchMode::Exhaustive.to_string(), "exhaustive");
        assert_eq!(SearchMode::Synonym.to_string(), "synonym");
        assert_eq!(SearchMode::TwoStep.to_string(), "two-step");
    }
}
