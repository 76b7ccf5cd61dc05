//! Tests for command-line parsing and single-pattern commands

#[cfg(test)]
mod tests {
    use clap::Parser;
    use ninetiles::algorithm::executor::SearchMode;
    use ninetiles::io::cli::{Cli, Command, CommandRunner};
    use ninetiles::algorithm::mapping::MappingTable;
    use ninetiles::io::store::{read_records, read_synonyms};
    use std::path::PathBuf;
    use tempfile::TempDir;

    // Tests search defaults
    // Verified by defaulting to the exhaustive pipeline
    #[test]
    fn test_search_defaults() {
        let cli = Cli::try_parse_from(["ninetiles", "search"]).expect("parses");
        assert!(!cli.quiet);
        match cli.command {
            Command::Search {
                mode,
                output,
                synonym_output,
                reduced,
                limit,
                jobs,
            } => {
                assert_eq!(mode, SearchMode::Synonym);
                assert_eq!(output, PathBuf::from("towns.csv"));
                assert_eq!(synonym_output, None);
                assert!(!reduced);
                assert_eq!(limit, None);
                assert_eq!(jobs, None);
            }
            other => unreachable!("expected search, got {other:?}"),
        }
    }

    // Tests search flags and the global quiet switch
    // Verified by declaring quiet on the top level only
    #[test]
    fn test_search_flags() {
        let cli = Cli::try_parse_from([
            "ninetiles", "search", "--mode", "two-step", "--reduced", "-l", "10", "-j", "2",
            "--synonym-output", "syn.csv", "-q",
        ])
        .expect("parses");
        assert!(cli.quiet);
        match cli.command {
            Command::Search {
                mode,
                synonym_output,
                reduced,
                limit,
                jobs,
                ..
            } => {
                assert_eq!(mode, SearchMode::TwoStep);
                assert_eq!(synonym_output, Some(PathBuf::from("syn.csv")));
                assert!(reduced);
                assert_eq!(limit, Some(10));
                assert_eq!(jobs, Some(2));
            }
            other => unreachable!("expected search, got {other:?}"),
        }
    }

    // Tests verify defaults and unknown modes
    // Verified by accepting free-form mode names
    #[test]
    fn test_verify_and_rejections() {
        let cli = Cli::try_parse_from(["ninetiles", "verify", "-n", "50"]).expect("parses");
        match cli.command {
            Command::Verify {
                samples,
                seed,
                reduced,
            } => {
                assert_eq!(samples, 50);
                assert_eq!(seed, 42);
                assert!(!reduced);
            }
            other => unreachable!("expected verify, got {other:?}"),
        }

        assert!(Cli::try_parse_from(["ninetiles", "search", "--mode", "fast"]).is_err());
        assert!(Cli::try_parse_from(["ninetiles", "render", "50"]).is_err());
        assert!(Cli::try_parse_from(["ninetiles"]).is_err());
    }

    // Tests score accepts infeasible towns and rejects malformed ones
    // Verified by treating infeasibility as an error
    #[test]
    fn test_score_command() {
        let run = |pattern: &str| {
            let cli = Cli::try_parse_from(["ninetiles", "-q", "score", pattern]).expect("parses");
            CommandRunner::new(cli).run()
        };
        assert!(run("206745813361230035").is_ok());
        assert!(run("012345678000000000").is_ok());
        assert!(run("0123").is_err());
    }

    // Tests render writes the requested file
    // Verified by ignoring the output path
    #[test]
    fn test_render_command() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("face.png");
        let cli = Cli::try_parse_from([
            "ninetiles",
            "render",
            "46",
            "-o",
            path.to_str().expect("utf-8 path"),
        ])
        .expect("parses");
        CommandRunner::new(cli).run().expect("renders");
        assert!(path.exists());
    }

    // Tests a limited quiet search writes exactly the limit
    // Verified by flushing before the final events
    #[test]
    fn test_search_command_with_limit() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("towns.csv");
        let cli = Cli::try_parse_from([
            "ninetiles",
            "-q",
            "search",
            "--reduced",
            "-l",
            "3",
            "-j",
            "1",
            "-o",
            path.to_str().expect("utf-8 path"),
        ])
        .expect("parses");
        CommandRunner::new(cli).run().expect("search runs");
        assert_eq!(read_records(&path).expect("reads").len(), 3);
    }

    // Tests synonym mode lists each arrangement ahead of its towns
    // Verified by writing arrangements only in two-step mode
    #[test]
    fn test_search_synonym_output() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let towns = dir.path().join("towns.csv");
        let synonyms = dir.path().join("synonyms.csv");
        let cli = Cli::try_parse_from([
            "ninetiles",
            "-q",
            "search",
            "--mode",
            "synonym",
            "-l",
            "5",
            "-j",
            "1",
            "-o",
            towns.to_str().expect("utf-8 path"),
            "--synonym-output",
            synonyms.to_str().expect("utf-8 path"),
        ])
        .expect("parses");
        CommandRunner::new(cli).run().expect("search runs");

        let listed: Vec<_> = read_synonyms(&synonyms)
            .expect("reads")
            .into_iter()
            .map(|(synonym, points)| {
                assert_eq!(points, None);
                synonym
            })
            .collect();
        assert!(!listed.is_empty());
        for record in read_records(&towns).expect("reads") {
            let synonym = MappingTable::reduce(&record.pattern).expect("every face has a class");
            assert!(listed.contains(&synonym), "{} has no listed arrangement", record.pattern);
        }
    }

    // Tests a synonym listing is refused for the exhaustive pipeline
    // Verified by silently ignoring the flag
    #[test]
    fn test_exhaustive_synonym_output_rejected() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let towns = dir.path().join("towns.csv");
        let synonyms = dir.path().join("synonyms.csv");
        let cli = Cli::try_parse_from([
            "ninetiles",
            "-q",
            "search",
            "--mode",
            "exhaustive",
            "-o",
            towns.to_str().expect("utf-8 path"),
            "--synonym-output",
            synonyms.to_str().expect("utf-8 path"),
        ])
        .expect("parses");
        assert!(CommandRunner::new(cli).run().is_err());
        assert!(!towns.exists());
        assert!(!synonyms.exists());
    }

    // Tests check accepts fresh results and flags a tampered record
    // Verified by comparing patterns only
    #[test]
    fn test_check_command() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("towns.csv");
        let check = || {
            let cli = Cli::try_parse_from([
                "ninetiles",
                "-q",
                "check",
                path.to_str().expect("utf-8 path"),
            ])
            .expect("parses");
            CommandRunner::new(cli).run()
        };

        std::fs::write(
            &path,
            "206745813361230035,0,0,1,0,6,11,5,12,2,4,0,2,1,1,-4,1,0,1,2,0,4,1,5,2,1,1\n",
        )
        .expect("writes");
        assert!(check().is_ok());

        std::fs::write(
            &path,
            "206745813361230035,9,0,1,0,6,11,5,12,2,4,0,2,1,1,-4,1,0,1,2,0,4,1,5,2,1,1\n",
        )
        .expect("writes");
        assert!(check().is_err());
    }

    // Tests zero workers are refused before any work
    // Verified by letting rayon pick a default for zero
    #[test]
    fn test_zero_jobs_rejected() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("towns.csv");
        let cli = Cli::try_parse_from([
            "ninetiles",
            "-q",
            "search",
            "-j",
            "0",
            "-o",
            path.to_str().expect("utf-8 path"),
        ])
        .expect("parses");
        assert!(CommandRunner::new(cli).run().is_err());
        assert!(!path.exists());
    }
}
