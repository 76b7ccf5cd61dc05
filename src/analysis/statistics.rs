//! Run statistics and per-theme leaders gathered while a search streams

use crate::analysis::themes::{Theme, ThemePoints};
use crate::io::configuration::THEME_COUNT;
use crate::spatial::pattern::Pattern;
use std::fmt;
use strum::IntoEnumIterator;

/// Topological themes whose synonym points differ from a game town's
pub fn disagreeing_themes(synonym_points: &ThemePoints, points: &ThemePoints) -> Vec<Theme> {
    Theme::iter()
        .filter(|theme| theme.is_topological())
        .filter(|&theme| synonym_points.get(theme) != points.get(theme))
        .collect()
}

/// Best score seen on each theme and the first pattern reaching it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeLeaders {
    best: [Option<(i32, Pattern)>; THEME_COUNT],
}

impl ThemeLeaders {
    /// No town seen yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `pattern` for every theme it strictly improves
    pub fn record(&mut self, pattern: &Pattern, points: &ThemePoints) {
        for (slot, (_, point)) in self.best.iter_mut().zip(points.iter()) {
            let improves = slot.is_none_or(|(best, _)| point > best);
            if improves {
                *slot = Some((point, *pattern));
            }
        }
    }

    /// Best point and its pattern for one theme
    pub fn leader(&self, theme: Theme) -> Option<(i32, Pattern)> {
        self.best
            .get(theme.number() as usize - 1)
            .copied()
            .flatten()
    }

    /// Leaders in card order, skipping themes with no town yet
    pub fn iter(&self) -> impl Iterator<Item = (Theme, i32, Pattern)> + '_ {
        Theme::iter()
            .zip(self.best.iter())
            .filter_map(|(theme, best)| best.map(|(point, pattern)| (theme, point, pattern)))
    }
}

/// Counters for one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Work partitions scheduled
    pub partitions_total: u64,
    /// Work partitions finished
    pub partitions_done: u64,
    /// Candidates looked at: game patterns in exhaustive mode, synonym
    /// arrangements otherwise
    pub examined: u64,
    /// Feasible towns scored
    pub towns: u64,
    /// Realizations that failed re-validation plus arrangements with none
    pub gaps: u64,
    /// Theme disagreements between synonym and game points
    pub disagreements: u64,
    /// Per-theme best towns
    pub leaders: ThemeLeaders,
}

impl SearchStats {
    /// Start a run over `partitions_total` partitions
    pub fn new(partitions_total: u64) -> Self {
        Self {
            partitions_total,
            ..Self::default()
        }
    }

    /// Count one scored town
    pub fn record_town(&mut self, pattern: &Pattern, points: &ThemePoints) {
        self.towns += 1;
        self.leaders.record(pattern, points);
    }

    /// Fraction of partitions finished
    pub const fn completion(&self) -> f64 {
        if self.partitions_total == 0 {
            return 1.0;
        }
        self.partitions_done as f64 / self.partitions_total as f64
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "examined {} | towns {} | gaps {} | disagreements {}",
            self.examined, self.towns, self.gaps, self.disagreements
        )
    }
}
