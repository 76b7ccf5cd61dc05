//! Scoring: the on-road food chain, theme cards and run statistics

/// Agents, aliens and hamburgers on a road
pub mod onroad;
/// Run statistics and per-theme leaders
pub mod statistics;
/// The 26 theme cards
pub mod themes;
