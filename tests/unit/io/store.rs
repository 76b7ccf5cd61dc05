//! Tests for result files: writing, appending and parsing lines

#[cfg(test)]
mod tests {
    use ninetiles::TownError;
    use ninetiles::algorithm::executor::TownRecord;
    use ninetiles::analysis::themes::ThemePoints;
    use ninetiles::io::store::{
        ResultWriter, parse_synonym_line, parse_town_line, read_records, read_synonyms,
    };
    use ninetiles::spatial::pattern::{Pattern, SynonymPattern};
    use tempfile::TempDir;

    const REFERENCE: &str = "206745813361230035";
    const REFERENCE_LINE: &str =
        "206745813361230035,0,0,1,0,6,11,5,12,2,4,0,2,1,1,-4,1,0,1,2,0,4,1,5,2,1,1";

    fn reference_record() -> TownRecord {
        TownRecord::score(&Pattern::parse(REFERENCE).expect("valid pattern"))
            .expect("feasible town")
    }

    // Tests a town record is written as one comma separated line
    // Verified by writing the points before the pattern
    #[test]
    fn test_write_town_line() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("towns.csv");

        let mut writer = ResultWriter::open(&path).expect("opens");
        writer.write_town(&reference_record()).expect("writes");
        writer.flush().expect("flushes");

        let contents = std::fs::read_to_string(&path).expect("readable");
        assert_eq!(contents, format!("{REFERENCE_LINE}\n"));
    }

    // Tests reopening a file appends instead of truncating
    // Verified by opening with truncate
    #[test]
    fn test_append_and_read_back() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("towns.csv");
        let record = reference_record();

        for _ in 0..2 {
            let mut writer = ResultWriter::open(&path).expect("opens");
            writer.write_town(&record).expect("writes");
            writer.flush().expect("flushes");
        }

        let records = read_records(&path).expect("reads");
        assert_eq!(records, vec![record.clone(), record]);
    }

    // Tests synonym lines with and without points
    // Verified by always writing points
    #[test]
    fn test_synonym_lines() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("synonyms.csv");
        let synonym = SynonymPattern::parse("224221113000100031").expect("valid synonym");
        let points = reference_record().points;

        let mut writer = ResultWriter::open(&path).expect("opens");
        writer.write_synonym(&synonym, None).expect("writes");
        writer.write_synonym(&synonym, Some(&points)).expect("writes");
        writer.flush().expect("flushes");

        let listing = read_synonyms(&path).expect("reads");
        assert_eq!(listing, vec![(synonym, None), (synonym, Some(points))]);
    }

    // Tests blank lines are skipped and line numbers stay one-based
    // Verified by counting only non-blank lines
    #[test]
    fn test_malformed_line_number() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("towns.csv");
        std::fs::write(&path, format!("{REFERENCE_LINE}\n\n{REFERENCE}\n")).expect("writable");

        match read_records(&path) {
            Err(TownError::MalformedRecord { line, reason }) => {
                assert_eq!(line, 3);
                assert_eq!(reason, "missing points");
            }
            other => unreachable!("expected a malformed record, got {other:?}"),
        }
    }

    // Tests malformed patterns and points are rejected
    // Verified by accepting short point lists
    #[test]
    fn test_parse_errors() {
        assert!(parse_town_line(REFERENCE_LINE, 1).is_ok());
        assert!(parse_town_line("206745813361230039,0", 1).is_err());
        assert!(parse_town_line("206745813361230035,1,2", 1).is_err());
        assert!(parse_synonym_line("22422111300010003", 1).is_err());

        let (synonym, points) = parse_synonym_line("224221113000100031", 2).expect("parses");
        assert_eq!(synonym.to_string(), "224221113000100031");
        assert_eq!(points, None::<ThemePoints>);
    }

    // Tests a missing file reports a file system error
    // Verified by returning an empty listing for missing files
    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let outcome = read_records(&dir.path().join("absent.csv"));
        assert!(matches!(outcome, Err(TownError::FileSystem { .. })));
    }
}
