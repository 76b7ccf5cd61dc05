//! Flat-text result files, one record per line
//!
//! A town line is `pattern,p1,...,p26`. A synonym line is the synonym pattern,
//! optionally followed by its 26 points. Writers append to an existing file.

use crate::algorithm::executor::TownRecord;
use crate::analysis::themes::ThemePoints;
use crate::io::error::{Result, TownError, WithContext};
use crate::spatial::pattern::{Pattern, SynonymPattern};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Buffered line writer over a result file
pub struct ResultWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl ResultWriter {
    /// Open `path` for appending, creating it when missing
    ///
    /// # Errors
    ///
    /// Returns [`TownError::FileSystem`] if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_path(path, "open for append")?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    /// Append one town record
    ///
    /// # Errors
    ///
    /// Returns [`TownError::FileSystem`] if the write fails.
    pub fn write_town(&mut self, record: &TownRecord) -> Result<()> {
        writeln!(self.writer, "{},{}", record.pattern, record.points).with_path(&self.path, "write")
    }

    /// Append one synonym arrangement, with its points when known
    ///
    /// # Errors
    ///
    /// Returns [`TownError::FileSystem`] if the write fails.
    pub fn write_synonym(
        &mut self,
        synonym: &SynonymPattern,
        points: Option<&ThemePoints>,
    ) -> Result<()> {
        match points {
            Some(points) => writeln!(self.writer, "{synonym},{points}"),
            None => writeln!(self.writer, "{synonym}"),
        }
        .with_path(&self.path, "write")
    }

    /// Push buffered lines to disk
    ///
    /// # Errors
    ///
    /// Returns [`TownError::FileSystem`] if the flush fails.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().with_path(&self.path, "flush")
    }
}

fn malformed(line: usize, error: &TownError) -> TownError {
    TownError::MalformedRecord {
        line,
        reason: error.to_string(),
    }
}

/// Parse one town line; `line` is the one-based line number for errors
///
/// # Errors
///
/// Returns [`TownError::MalformedRecord`] when the pattern or any point is
/// malformed, or points are missing.
pub fn parse_town_line(text: &str, line: usize) -> Result<TownRecord> {
    let (pattern, points) = text.split_once(',').ok_or_else(|| TownError::MalformedRecord {
        line,
        reason: "missing points".to_string(),
    })?;
    Ok(TownRecord {
        pattern: Pattern::parse(pattern.trim()).map_err(|error| malformed(line, &error))?,
        points: points.parse().map_err(|error| malformed(line, &error))?,
    })
}

/// Parse one synonym line; `line` is the one-based line number for errors
///
/// # Errors
///
/// Returns [`TownError::MalformedRecord`] when the pattern or the points are
/// malformed.
pub fn parse_synonym_line(text: &str, line: usize) -> Result<(SynonymPattern, Option<ThemePoints>)> {
    let (pattern, points) = match text.split_once(',') {
        Some((pattern, points)) => (pattern, Some(points)),
        None => (text, None),
    };
    let synonym = SynonymPattern::parse(pattern.trim()).map_err(|error| malformed(line, &error))?;
    let points = points
        .map(str::parse::<ThemePoints>)
        .transpose()
        .map_err(|error| malformed(line, &error))?;
    Ok((synonym, points))
}

fn read_lines<T>(path: &Path, parse: impl Fn(&str, usize) -> Result<T>) -> Result<Vec<T>> {
    let file = File::open(path).with_path(path, "open")?;
    let mut records = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let text = line.with_path(path, "read")?;
        if text.trim().is_empty() {
            continue;
        }
        records.push(parse(&text, index + 1)?);
    }
    Ok(records)
}

/// Read every town record of a result file, skipping blank lines
///
/// # Errors
///
/// Returns [`TownError::FileSystem`] if the file cannot be read, or
/// [`TownError::MalformedRecord`] for the first bad line.
pub fn read_records(path: &Path) -> Result<Vec<TownRecord>> {
    read_lines(path, parse_town_line)
}

/// Read every synonym arrangement of a listing, skipping blank lines
///
/// # Errors
///
/// Returns [`TownError::FileSystem`] if the file cannot be read, or
/// [`TownError::MalformedRecord`] for the first bad line.
pub fn read_synonyms(path: &Path) -> Result<Vec<(SynonymPattern, Option<ThemePoints>)>> {
    read_lines(path, parse_synonym_line)
}
