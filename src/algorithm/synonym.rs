//! Stage one of the pruned search: feasible synonym arrangements
//!
//! Class vectors run in base-5 order with position 0 most significant and
//! are kept only when no class appears more often than game faces share its
//! topology. Each kept vector then runs through every distinct rotation
//! assignment, class by class; within a class the last position turns
//! fastest.

use crate::algorithm::feasibility::synonym_feasible;
use crate::io::configuration::{
    SYNONYM_CLASS_COUNT, SYNONYM_CLASS_LIMITS, SYNONYM_ROTATIONS, TILE_COUNT,
};
use crate::spatial::pattern::SynonymPattern;

/// Every class vector, unfiltered (5^9)
pub const CLASS_VECTOR_COUNT: u32 = 1_953_125;

fn class_vector(index: u32) -> [u8; TILE_COUNT] {
    let base = SYNONYM_CLASS_COUNT as u32;
    let mut classes = [0; TILE_COUNT];
    let mut rest = index;
    for class in classes.iter_mut().rev() {
        *class = (rest % base) as u8;
        rest /= base;
    }
    classes
}

/// Whether no class exceeds its limit
pub fn within_limits(classes: &[u8; TILE_COUNT]) -> bool {
    let mut counts = [0; SYNONYM_CLASS_COUNT];
    for &class in classes {
        if let Some(count) = counts.get_mut(class as usize) {
            *count += 1;
        }
    }
    counts
        .iter()
        .zip(SYNONYM_CLASS_LIMITS)
        .all(|(&count, limit)| count <= limit)
}

/// Class vectors within the class limits, in base-5 order
pub fn class_arrangements() -> impl Iterator<Item = [u8; TILE_COUNT]> {
    (0..CLASS_VECTOR_COUNT)
        .map(class_vector)
        .filter(within_limits)
}

/// Every rotation assignment for one class vector
///
/// Positions are grouped by class, lowest class slowest. Class 0 and class 4
/// look the same at every rotation and always get rotation 0.
pub fn rotation_assignments(classes: &[u8; TILE_COUNT]) -> Vec<[u8; TILE_COUNT]> {
    let mut slots: Vec<(u8, usize)> = classes
        .iter()
        .enumerate()
        .map(|(position, &class)| (class, position))
        .collect();
    slots.sort_unstable();
    let radices: Vec<u8> = slots
        .iter()
        .map(|&(class, _)| SYNONYM_ROTATIONS.get(class as usize).copied().unwrap_or(1))
        .collect();

    let mut digits = vec![0_u8; slots.len()];
    let mut assignments = Vec::new();
    loop {
        let mut rotations = [0; TILE_COUNT];
        for (&(_, position), &digit) in slots.iter().zip(&digits) {
            if let Some(rotation) = rotations.get_mut(position) {
                *rotation = digit;
            }
        }
        assignments.push(rotations);

        // Odometer step, last slot fastest
        let mut carried = true;
        for (digit, &radix) in digits.iter_mut().zip(&radices).rev() {
            *digit += 1;
            if *digit < radix {
                carried = false;
                break;
            }
            *digit = 0;
        }
        if carried {
            return assignments;
        }
    }
}

/// Feasible synonym arrangements for one class vector
pub fn arrangements_for(classes: &[u8; TILE_COUNT]) -> Vec<SynonymPattern> {
    rotation_assignments(classes)
        .into_iter()
        .filter_map(|rotations| SynonymPattern::new(*classes, rotations).ok())
        .filter(synonym_feasible)
        .collect()
}

/// Every feasible synonym arrangement in search order
pub fn search_synonym() -> impl Iterator<Item = SynonymPattern> {
    class_arrangements().flat_map(|classes| arrangements_for(&classes))
}
