//! A concrete 3x3 placement, its feasibility and its roads
//!
//! Construction never fails once the pattern is valid: an infeasible town is
//! kept with its reason and simply has no theme points.

use crate::algorithm::feasibility::{Infeasibility, find_infeasibility};
use crate::analysis::themes::{Theme, ThemePoints};
use crate::io::configuration::TILE_COUNT;
use crate::io::error::Result;
use crate::spatial::path::{Path, road_graph, trace_paths};
use crate::spatial::pattern::{Pattern, SynonymPattern};
use crate::spatial::road::Road;
use crate::spatial::tiles::{Catalogue, Placement, TileFace};
use std::fmt;

/// A town built from one pattern
#[derive(Debug, Clone)]
pub struct Town {
    placements: [Placement; TILE_COUNT],
    faces: Vec<&'static TileFace>,
    infeasibility: Option<Infeasibility>,
    paths: Vec<Path>,
}

impl Town {
    /// Build a game town from an 18-digit pattern
    ///
    /// # Errors
    ///
    /// Returns [`crate::TownError::MalformedPattern`] when the pattern is
    /// rejected; an infeasible but well-formed town is not an error.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self::from_pattern(&Pattern::parse(pattern)?))
    }

    /// Build a game town from a validated pattern
    pub fn from_pattern(pattern: &Pattern) -> Self {
        Self::build(*pattern.placements(), Catalogue::original())
    }

    /// Build a town of synonym tiles
    pub fn from_synonym(pattern: &SynonymPattern) -> Self {
        Self::build(pattern.placements(), Catalogue::synonym())
    }

    fn build(placements: [Placement; TILE_COUNT], catalogue: &'static Catalogue) -> Self {
        let mut faces = Vec::with_capacity(TILE_COUNT);
        for (position, placement) in placements.iter().enumerate() {
            let Some(face) = catalogue.face(placement.tile, placement.direction) else {
                return Self {
                    placements,
                    faces: Vec::new(),
                    infeasibility: Some(Infeasibility::MissingFace { position }),
                    paths: Vec::new(),
                };
            };
            faces.push(face);
        }

        let infeasibility = find_infeasibility(&faces);
        let paths = if infeasibility.is_none() {
            trace_paths(&road_graph(&faces))
        } else {
            Vec::new()
        };

        Self {
            placements,
            faces,
            infeasibility,
            paths,
        }
    }

    /// Whether the tiles fit together into a town
    pub const fn is_valid(&self) -> bool {
        self.infeasibility.is_none()
    }

    /// Why the town cannot be built, if it cannot
    pub const fn infeasibility(&self) -> Option<Infeasibility> {
        self.infeasibility
    }

    /// Tile and direction at every position
    pub const fn placements(&self) -> &[Placement; TILE_COUNT] {
        &self.placements
    }

    /// The pattern string this town was built from
    pub fn pattern(&self) -> String {
        self.to_string()
    }

    /// Face at every position, empty when a face was missing
    pub fn faces(&self) -> &[&'static TileFace] {
        &self.faces
    }

    /// Every road segment of every face
    pub fn roads(&self) -> impl Iterator<Item = &Road> + '_ {
        self.faces.iter().flat_map(|face| face.roads.iter())
    }

    /// Town roads with resolved food chains, empty for infeasible towns
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Points for one theme card, or `None` for an infeasible town
    pub fn theme_point(&self, theme: Theme) -> Option<i32> {
        self.is_valid().then(|| theme.evaluate(self))
    }

    /// Points for every theme card, or `None` for an infeasible town
    pub fn theme_points(&self) -> Option<ThemePoints> {
        self.is_valid().then(|| ThemePoints::evaluate(self))
    }
}

impl fmt::Display for Town {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for placement in &self.placements {
            write!(f, "{}", placement.tile)?;
        }
        for placement in &self.placements {
            write!(f, "{}", placement.direction)?;
        }
        Ok(())
    }
}
