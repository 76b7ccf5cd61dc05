//! Command-line interface: batch searches, listings and single-pattern tools

use crate::algorithm::executor::{
    BatchRunner, RunConfig, SearchEvent, SearchMode, TownRecord, expand_group, verify_random,
};
use crate::algorithm::mapping::{MappingTable, TableKind};
use crate::algorithm::synonym::search_synonym;
use crate::analysis::statistics::SearchStats;
use crate::io::configuration::{
    DEFAULT_OUTPUT, DEFAULT_SAMPLES, DEFAULT_SEED, DEFAULT_SYNONYM_OUTPUT,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::Renderable;
use crate::io::progress::ProgressManager;
use crate::io::store::{ResultWriter, read_records, read_synonyms};
use crate::spatial::town::Town;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "ninetiles")]
#[command(
    author,
    version,
    about = "Find and score every legal Nine Tiles Panic town"
)]
/// Command-line arguments for the town search tool
pub struct Cli {
    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Subcommands of the town search tool
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search every town and write `pattern,p1,...,p26` lines
    Search {
        /// Search pipeline
        #[arg(short, long, value_enum, default_value_t = SearchMode::Synonym)]
        mode: SearchMode,
        /// File receiving town records
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
        /// File receiving synonym arrangements (synonym and two-step modes)
        #[arg(long)]
        synonym_output: Option<PathBuf>,
        /// Map arrangements through the score-equivalent table
        #[arg(short, long)]
        reduced: bool,
        /// Stop after this many towns
        #[arg(short, long)]
        limit: Option<u64>,
        /// Worker threads (all cores when omitted)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// List every feasible synonym arrangement
    Synonyms {
        /// File receiving the listing
        #[arg(short, long, default_value = DEFAULT_SYNONYM_OUTPUT)]
        output: PathBuf,
    },

    /// Map a saved synonym listing to scored game towns
    Expand {
        /// Synonym listing to read
        #[arg(value_name = "FILE")]
        input: PathBuf,
        /// File receiving town records
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
        /// Map arrangements through the score-equivalent table
        #[arg(short, long)]
        reduced: bool,
    },

    /// Print theme-by-theme points of one town
    Score {
        /// 18-digit town pattern
        #[arg(value_name = "PATTERN")]
        pattern: String,
    },

    /// Re-score every town of a result file and report stored points that differ
    Check {
        /// Result file to read
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Draw a face (2 digits) or a town (18 digits) as PNG
    Render {
        /// Face code or town pattern
        #[arg(value_name = "PATTERN")]
        pattern: String,
        /// PNG file to write
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Cross-check random game patterns against the synonym pipeline
    Verify {
        /// Patterns to draw
        #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLES)]
        samples: usize,
        /// Random seed for reproducible sampling
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        /// Check the score-equivalent table instead of the complete one
        #[arg(short, long)]
        reduced: bool,
    },
}

const fn table_kind(reduced: bool) -> TableKind {
    if reduced {
        TableKind::ScoreEquivalent
    } else {
        TableKind::Complete
    }
}

/// Runs one parsed command with optional progress display
pub struct CommandRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl CommandRunner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = (!cli.quiet).then(ProgressManager::new);
        Self {
            cli,
            progress_manager,
        }
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is malformed, a file cannot be read or
    /// written, or the worker pool cannot be built.
    pub fn run(&mut self) -> Result<()> {
        match self.cli.command.clone() {
            Command::Search {
                mode,
                output,
                synonym_output,
                reduced,
                limit,
                jobs,
            } => {
                let config = RunConfig {
                    mode,
                    table: table_kind(reduced),
                    limit,
                    jobs,
                };
                self.search(config, &output, synonym_output.as_deref())
            }
            Command::Synonyms { output } => self.list_synonyms(&output),
            Command::Expand {
                input,
                output,
                reduced,
            } => self.expand(&input, &output, table_kind(reduced)),
            Command::Score { pattern } => Self::score(&pattern),
            Command::Check { input } => Self::check(&input),
            Command::Render { pattern, output } => {
                Renderable::Pattern(pattern).export_png(&output)
            }
            Command::Verify {
                samples,
                seed,
                reduced,
            } => Self::verify(samples, seed, table_kind(reduced)),
        }
    }

    fn search(
        &mut self,
        config: RunConfig,
        output: &Path,
        synonym_output: Option<&Path>,
    ) -> Result<()> {
        if config.jobs == Some(0) {
            return Err(invalid_parameter("jobs", &0, &"must be at least 1"));
        }
        if let Some(path) = synonym_output
            && config.mode == SearchMode::Exhaustive
        {
            return Err(invalid_parameter(
                "synonym-output",
                &path.display(),
                &"exhaustive mode produces no synonym arrangements",
            ));
        }
        let start_time = Instant::now();
        let mut towns = ResultWriter::open(output)?;
        let mut synonyms = synonym_output.map(ResultWriter::open).transpose()?;

        let runner = BatchRunner::new(config);
        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(&config.mode.to_string(), 0);
        }
        let progress_manager = self.progress_manager.as_ref();

        let stats = runner.run(
            |event| {
                match event {
                    SearchEvent::Town(record) => towns.write_town(record)?,
                    SearchEvent::Arrangement(synonym) => {
                        if let Some(writer) = synonyms.as_mut() {
                            writer.write_synonym(synonym, None)?;
                        }
                    }
                    SearchEvent::Group(group) => {
                        if let Some(writer) = synonyms.as_mut() {
                            writer.write_synonym(&group.synonym, group.synonym_points.as_ref())?;
                        }
                        for record in &group.towns {
                            towns.write_town(record)?;
                        }
                    }
                }
                Ok(())
            },
            |stats| {
                if let Some(pm) = progress_manager {
                    pm.update(stats);
                }
            },
        )?;

        towns.flush()?;
        if let Some(writer) = synonyms.as_mut() {
            writer.flush()?;
        }
        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }
        self.summarize(&stats, start_time);
        Ok(())
    }

    fn list_synonyms(&self, output: &Path) -> Result<()> {
        let mut writer = ResultWriter::open(output)?;
        let mut count = 0_u64;
        for synonym in search_synonym() {
            writer.write_synonym(&synonym, None)?;
            count += 1;
        }
        writer.flush()?;

        // Allow print for user feedback on the finished listing
        #[allow(clippy::print_stderr)]
        if !self.cli.quiet {
            eprintln!("{count} synonym arrangements written to {}", output.display());
        }
        Ok(())
    }

    fn expand(&mut self, input: &Path, output: &Path, kind: TableKind) -> Result<()> {
        let start_time = Instant::now();
        let table = MappingTable::of_kind(kind);
        let arrangements = read_synonyms(input)?;
        let mut writer = ResultWriter::open(output)?;
        let mut stats = SearchStats::new(arrangements.len() as u64);

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize("expand", stats.partitions_total);
        }
        for (synonym, _) in &arrangements {
            let group = expand_group(synonym, table, false);
            stats.examined += 1;
            stats.gaps += group.gaps;
            for record in &group.towns {
                writer.write_town(record)?;
                stats.record_town(&record.pattern, &record.points);
            }
            stats.partitions_done += 1;
            if let Some(ref pm) = self.progress_manager {
                pm.update(&stats);
            }
        }
        writer.flush()?;

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }
        self.summarize(&stats, start_time);
        Ok(())
    }

    // Allow print for command output
    #[allow(clippy::print_stdout)]
    fn score(pattern: &str) -> Result<()> {
        let town = Town::new(pattern)?;
        match town.theme_points() {
            Some(points) => {
                for (theme, point) in points.iter() {
                    println!("{:>2} {:<48} {point:>3}", theme.number(), theme.description());
                }
            }
            None => {
                let reason = town
                    .infeasibility()
                    .map_or_else(String::new, |reason| reason.to_string());
                println!("{pattern}: infeasible ({reason})");
            }
        }
        Ok(())
    }

    // Allow print for command output
    #[allow(clippy::print_stdout)]
    fn check(input: &Path) -> Result<()> {
        let records = read_records(input)?;
        let mut differing = 0_usize;
        for record in &records {
            if TownRecord::score(&record.pattern).as_ref() != Some(record) {
                differing += 1;
                println!("points differ: {}", record.pattern);
            }
        }
        println!("{} records, {differing} differ", records.len());
        if differing == 0 {
            Ok(())
        } else {
            Err(invalid_parameter(
                "input",
                &input.display(),
                &"stored points differ from a fresh score",
            ))
        }
    }

    // Allow print for command output
    #[allow(clippy::print_stdout)]
    fn verify(samples: usize, seed: u64, kind: TableKind) -> Result<()> {
        let report = verify_random(samples, seed, MappingTable::of_kind(kind));
        println!(
            "{} samples, {} feasible, {} covered by the {kind} table, {} disagreements",
            report.samples, report.feasible, report.covered, report.disagreements
        );
        for pattern in &report.mismatches {
            println!("feasibility mismatch: {pattern}");
        }
        if report.is_consistent(kind) {
            println!("consistent");
            Ok(())
        } else {
            Err(invalid_parameter(
                "samples",
                &samples,
                &"random patterns disagree with the synonym pipeline",
            ))
        }
    }

    // Allow print for the end-of-run summary
    #[allow(clippy::print_stderr)]
    fn summarize(&self, stats: &SearchStats, start_time: Instant) {
        if self.cli.quiet {
            return;
        }
        eprintln!("{stats} in {:.1?}", start_time.elapsed());
        for (theme, point, pattern) in stats.leaders.iter() {
            eprintln!("{:>2} {:<48} {point:>3} {pattern}", theme.number(), theme.description());
        }
    }
}
