//! Search algorithms: feasibility checks, enumerators and the batch runner

/// Fixed-capacity index bitset used for tile and slot bookkeeping
pub mod bitset;
/// Exhaustive enumeration of every game pattern
pub mod exhaustive;
/// Search pipelines and the parallel batch runner
pub mod executor;
/// Road continuity and closed-loop checks
pub mod feasibility;
/// Synonym class to game placement tables
pub mod mapping;
/// Feasible synonym arrangements
pub mod synonym;
