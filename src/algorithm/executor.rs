//! Search drivers: the pruned pipelines and the parallel batch runner
//!
//! The pipelines are lazy iterators usable one item at a time. The runner
//! splits the same work into partitions, evaluates them on a rayon pool and
//! funnels every result through one bounded channel to a single consumer.

use crate::algorithm::exhaustive::{DIRECTION_ASSIGNMENTS, ExhaustiveSearch, next_permutation};
use crate::algorithm::feasibility::synonym_feasible;
use crate::algorithm::mapping::{MappingTable, TableKind};
use crate::algorithm::synonym::{arrangements_for, class_arrangements, search_synonym};
use crate::analysis::statistics::{SearchStats, disagreeing_themes};
use crate::analysis::themes::ThemePoints;
use crate::io::configuration::{CANCEL_CHECK_INTERVAL, RESULT_CHANNEL_CAPACITY, TILE_COUNT};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::pattern::{Pattern, SynonymPattern};
use crate::spatial::tiles::{DIRECTION_COUNT, Direction, Placement};
use crate::spatial::town::Town;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;

/// A feasible game town and its points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TownRecord {
    /// Game pattern
    pub pattern: Pattern,
    /// Points on every theme
    pub points: ThemePoints,
}

impl TownRecord {
    /// Build and score a pattern, `None` when the town is infeasible
    pub fn score(pattern: &Pattern) -> Option<Self> {
        Town::from_pattern(pattern)
            .theme_points()
            .map(|points| Self {
                pattern: *pattern,
                points,
            })
    }
}

/// One synonym arrangement with its own points and its game towns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymGroup {
    /// The arrangement
    pub synonym: SynonymPattern,
    /// Points of the synonym town itself; only topological themes are
    /// meaningful
    pub synonym_points: Option<ThemePoints>,
    /// Game towns mapped from the arrangement
    pub towns: Vec<TownRecord>,
    /// Mapped patterns that failed re-validation, or one when nothing mapped
    pub gaps: u64,
    /// Topological theme mismatches against the synonym points
    pub disagreements: u64,
}

/// Map one arrangement back to game towns and score them
///
/// Synonym points are computed only when `with_synonym_points` is set.
pub fn expand_group(
    synonym: &SynonymPattern,
    table: &MappingTable,
    with_synonym_points: bool,
) -> SynonymGroup {
    let synonym_points = if with_synonym_points {
        Town::from_synonym(synonym).theme_points()
    } else {
        None
    };

    let patterns = table.expand(synonym);
    let mut gaps = u64::from(patterns.is_empty());
    let mut disagreements = 0;
    let mut towns = Vec::with_capacity(patterns.len());

    for pattern in &patterns {
        let Some(record) = TownRecord::score(pattern) else {
            gaps += 1;
            continue;
        };
        if let Some(synonym_points) = &synonym_points {
            disagreements += disagreeing_themes(synonym_points, &record.points).len() as u64;
        }
        towns.push(record);
    }

    SynonymGroup {
        synonym: *synonym,
        synonym_points,
        towns,
        gaps,
        disagreements,
    }
}

/// Mode B: every scored town reached through the synonym arrangements
pub fn search_point(table: &'static MappingTable) -> impl Iterator<Item = TownRecord> {
    search_synonym().flat_map(move |synonym| expand_group(&synonym, table, false).towns)
}

/// Mode C: every arrangement with its synonym points and scored towns
pub fn search_point_2step(table: &'static MappingTable) -> impl Iterator<Item = SynonymGroup> {
    search_synonym().map(move |synonym| expand_group(&synonym, table, true))
}

/// Which pipeline a batch run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum SearchMode {
    /// Every game pattern, checked one by one
    Exhaustive,
    /// Synonym arrangements mapped back to game towns
    Synonym,
    /// As synonym, also scoring each arrangement
    TwoStep,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhaustive => write!(f, "exhaustive"),
            Self::Synonym => write!(f, "synonym"),
            Self::TwoStep => write!(f, "two-step"),
        }
    }
}

/// Batch run parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Pipeline
    pub mode: SearchMode,
    /// Mapping table for the synonym pipelines
    pub table: TableKind,
    /// Stop after this many towns
    pub limit: Option<u64>,
    /// Worker threads, all cores when unset
    pub jobs: Option<usize>,
}

/// Result delivered to the consumer of a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// A scored town
    Town(TownRecord),
    /// A feasible arrangement; its towns follow as [`SearchEvent::Town`]
    Arrangement(SynonymPattern),
    /// A scored arrangement with its towns
    Group(SynonymGroup),
}

enum Message {
    Event(SearchEvent),
    PartitionDone {
        examined: u64,
        gaps: u64,
        disagreements: u64,
    },
}

#[derive(Debug, Clone, Copy)]
enum Partition {
    TileOrder([u8; TILE_COUNT]),
    Classes([u8; TILE_COUNT]),
}

fn tile_orders() -> Vec<[u8; TILE_COUNT]> {
    let mut tiles: [u8; TILE_COUNT] = std::array::from_fn(|index| index as u8);
    let mut orders = vec![tiles];
    while next_permutation(&mut tiles) {
        orders.push(tiles);
    }
    orders
}

/// Parallel search that streams results to a single consumer
pub struct BatchRunner {
    config: RunConfig,
    cancelled: Arc<AtomicBool>,
}

impl BatchRunner {
    /// Prepare a run
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag shared with the workers; setting it stops the run early
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    fn partitions(&self) -> Vec<Partition> {
        match self.config.mode {
            SearchMode::Exhaustive => tile_orders()
                .into_iter()
                .map(Partition::TileOrder)
                .collect(),
            SearchMode::Synonym | SearchMode::TwoStep => class_arrangements()
                .map(Partition::Classes)
                .collect(),
        }
    }

    /// Run the search, handing every result to `sink` on the calling thread
    ///
    /// `progress` sees the running statistics after each finished partition.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker pool cannot be built or `sink` fails;
    /// the workers are stopped before returning.
    pub fn run<S, P>(&self, mut sink: S, mut progress: P) -> Result<SearchStats>
    where
        S: FnMut(&SearchEvent) -> Result<()>,
        P: FnMut(&SearchStats),
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.jobs.unwrap_or(0))
            .build()
            .map_err(|error| invalid_parameter("jobs", &format!("{:?}", self.config.jobs), &error))?;

        let partitions = self.partitions();
        let mut stats = SearchStats::new(partitions.len() as u64);
        let (sender, receiver) = mpsc::sync_channel::<Message>(RESULT_CHANNEL_CAPACITY);
        let config = self.config;
        let cancelled = &self.cancelled;

        thread::scope(|scope| {
            scope.spawn(move || {
                pool.install(|| {
                    partitions.par_iter().for_each_with(sender, |sender, partition| {
                        if !cancelled.load(Ordering::Relaxed) {
                            evaluate(*partition, config, cancelled, sender);
                        }
                    });
                });
            });

            let outcome = consume(&receiver, config.limit, &mut stats, &mut sink, &mut progress);
            cancelled.store(true, Ordering::Relaxed);
            drop(receiver);
            outcome
        })?;

        Ok(stats)
    }
}

fn consume<S, P>(
    receiver: &mpsc::Receiver<Message>,
    limit: Option<u64>,
    stats: &mut SearchStats,
    sink: &mut S,
    progress: &mut P,
) -> Result<()>
where
    S: FnMut(&SearchEvent) -> Result<()>,
    P: FnMut(&SearchStats),
{
    for message in receiver {
        match message {
            Message::Event(event) => {
                match &event {
                    SearchEvent::Town(record) => stats.record_town(&record.pattern, &record.points),
                    SearchEvent::Arrangement(_) => {}
                    SearchEvent::Group(group) => {
                        for record in &group.towns {
                            stats.record_town(&record.pattern, &record.points);
                        }
                    }
                }
                sink(&event)?;
                if limit.is_some_and(|limit| stats.towns >= limit) {
                    return Ok(());
                }
            }
            Message::PartitionDone {
                examined,
                gaps,
                disagreements,
            } => {
                stats.partitions_done += 1;
                stats.examined += examined;
                stats.gaps += gaps;
                stats.disagreements += disagreements;
                progress(stats);
            }
        }
    }
    Ok(())
}

/// Evaluate one partition; a closed channel or the cancel flag stops it
fn evaluate(
    partition: Partition,
    config: RunConfig,
    cancelled: &AtomicBool,
    sender: &mpsc::SyncSender<Message>,
) {
    let mut examined = 0;
    let mut gaps = 0;
    let mut disagreements = 0;

    match partition {
        Partition::TileOrder(tiles) => {
            let first = Pattern::from_permutation(tiles.map(|tile| Placement {
                tile,
                direction: Direction::default(),
            }));
            for pattern in ExhaustiveSearch::starting_at(&first).take(DIRECTION_ASSIGNMENTS as usize)
            {
                examined += 1;
                if examined % CANCEL_CHECK_INTERVAL == 0 && cancelled.load(Ordering::Relaxed) {
                    return;
                }
                let Some(record) = TownRecord::score(&pattern) else {
                    continue;
                };
                if sender.send(Message::Event(SearchEvent::Town(record))).is_err() {
                    return;
                }
            }
        }
        Partition::Classes(classes) => {
            let table = MappingTable::of_kind(config.table);
            let two_step = config.mode == SearchMode::TwoStep;
            for synonym in arrangements_for(&classes) {
                if cancelled.load(Ordering::Relaxed) {
                    return;
                }
                examined += 1;
                let group = expand_group(&synonym, table, two_step);
                gaps += group.gaps;
                disagreements += group.disagreements;

                let sent = if two_step {
                    sender.send(Message::Event(SearchEvent::Group(group))).is_ok()
                } else {
                    sender
                        .send(Message::Event(SearchEvent::Arrangement(synonym)))
                        .is_ok()
                        && group.towns.into_iter().all(|record| {
                            sender
                                .send(Message::Event(SearchEvent::Town(record)))
                                .is_ok()
                        })
                };
                if !sent {
                    return;
                }
            }
        }
    }

    let _ = sender.send(Message::PartitionDone {
        examined,
        gaps,
        disagreements,
    });
}

/// Outcome of checking random game patterns against the synonym pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    /// Patterns drawn
    pub samples: usize,
    /// Patterns whose town is feasible
    pub feasible: usize,
    /// Feasible patterns the mapping table reaches
    pub covered: usize,
    /// Patterns where town feasibility and synonym feasibility disagree
    pub mismatches: Vec<Pattern>,
    /// Topological theme disagreements on feasible patterns
    pub disagreements: u64,
}

impl VerifyReport {
    /// Whether every check passed for a table of `kind`
    ///
    /// The score-equivalent table is allowed to miss feasible patterns.
    pub fn is_consistent(&self, kind: TableKind) -> bool {
        self.mismatches.is_empty()
            && self.disagreements == 0
            && (kind == TableKind::ScoreEquivalent || self.covered == self.feasible)
    }
}

/// Draw a uniformly random game pattern
pub fn random_pattern(rng: &mut impl Rng) -> Pattern {
    let mut tiles: [u8; TILE_COUNT] = std::array::from_fn(|index| index as u8);
    tiles.shuffle(rng);
    let mut placements = tiles.map(|tile| Placement {
        tile,
        direction: Direction::default(),
    });
    for placement in &mut placements {
        let digit = rng.random_range(0..DIRECTION_COUNT);
        placement.direction = Direction::from_parts(digit < 4, digit);
    }
    Pattern::from_permutation(placements)
}

/// Cross-check `samples` seeded random patterns against the synonym pipeline
pub fn verify_random(samples: usize, seed: u64, table: &MappingTable) -> VerifyReport {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut report = VerifyReport {
        samples,
        ..VerifyReport::default()
    };

    for _ in 0..samples {
        let pattern = random_pattern(&mut rng);
        let town = Town::from_pattern(&pattern);
        let synonym = MappingTable::reduce(&pattern);
        let synonym_ok = synonym.as_ref().is_some_and(synonym_feasible);

        if town.is_valid() != synonym_ok {
            report.mismatches.push(pattern);
            continue;
        }
        let (Some(points), Some(synonym)) = (town.theme_points(), synonym) else {
            continue;
        };

        report.feasible += 1;
        if table.covers(&pattern) {
            report.covered += 1;
        }
        if let Some(synonym_points) = Town::from_synonym(&synonym).theme_points() {
            report.disagreements += disagreeing_themes(&synonym_points, &points).len() as u64;
        }
    }

    report
}
