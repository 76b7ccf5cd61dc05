//! PNG rendering of tile faces and towns

use crate::io::configuration::{
    AGENT_COLOR, ALIEN_COLOR, BACKGROUND_COLOR, CHAR_COLOR, GRID_SIDE, HAMBURGER_COLOR,
    MARKER_PIXELS, OCCUPANT_COLORS, ROAD_COLOR, ROAD_WIDTH, TILE_PIXELS,
};
use crate::io::error::{PatternFault, Result, TownError, WithContext, malformed_pattern};
use crate::spatial::road::{Road, Side};
use crate::spatial::tiles::{Catalogue, Direction, TileFace};
use crate::spatial::town::Town;
use image::{Rgb, RgbImage};
use std::path::Path;

/// Something that can be drawn
#[derive(Debug, Clone)]
pub enum Renderable {
    /// A single face, drawn as one tile
    Face(TileFace),
    /// A whole town, drawn as a 3x3 board
    Town(Town),
    /// A 2-digit `tile direction` pair or an 18-digit town pattern
    Pattern(String),
}

impl Renderable {
    /// Draw into a new image
    ///
    /// # Errors
    ///
    /// Returns [`TownError::MalformedPattern`] when a pattern string is
    /// neither a valid face code nor a valid town pattern.
    pub fn render(&self) -> Result<RgbImage> {
        match self {
            Self::Face(face) => {
                let mut canvas = blank(1);
                draw_face(&mut canvas, face, 0, 0);
                Ok(canvas)
            }
            Self::Town(town) => {
                let mut canvas = blank(GRID_SIDE as u32);
                for (position, face) in town.faces().iter().enumerate() {
                    let x = (position % GRID_SIDE) as u32 * TILE_PIXELS;
                    let y = (position / GRID_SIDE) as u32 * TILE_PIXELS;
                    draw_face(&mut canvas, face, x, y);
                }
                Ok(canvas)
            }
            Self::Pattern(pattern) => resolve(pattern)?.render(),
        }
    }

    /// Render and save as PNG, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails, the directory cannot be created,
    /// or the image cannot be written.
    pub fn export_png(&self, output_path: &Path) -> Result<()> {
        let canvas = self.render()?;
        if let Some(parent) = output_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
        }
        canvas
            .save(output_path)
            .map_err(|source| TownError::ImageExport {
                path: output_path.to_path_buf(),
                source,
            })
    }
}

fn resolve(pattern: &str) -> Result<Renderable> {
    let digits: Vec<u8> = pattern
        .chars()
        .map(|ch| ch.to_digit(10).map(|digit| digit as u8))
        .collect::<Option<_>>()
        .unwrap_or_default();

    match digits.as_slice() {
        &[tile, digit] => {
            let direction = Direction::new(digit).ok_or_else(|| {
                malformed_pattern(
                    pattern,
                    PatternFault::DirectionOutOfRange { position: 0, digit },
                )
            })?;
            Catalogue::original()
                .face(tile, direction)
                .cloned()
                .map(Renderable::Face)
                .ok_or_else(|| {
                    malformed_pattern(
                        pattern,
                        PatternFault::TileOutOfRange { position: 0, digit: tile },
                    )
                })
        }
        _ => Town::new(pattern).map(Renderable::Town),
    }
}

fn blank(tiles_per_side: u32) -> RgbImage {
    let side = tiles_per_side * TILE_PIXELS;
    RgbImage::from_pixel(side, side, Rgb(BACKGROUND_COLOR))
}

fn fill_rect(canvas: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: [u8; 3]) {
    for py in y..y + height {
        for px in x..x + width {
            if let Some(pixel) = canvas.get_pixel_mut_checked(px, py) {
                *pixel = Rgb(color);
            }
        }
    }
}

fn side_midpoint(side: Side) -> (i64, i64) {
    let half = i64::from(TILE_PIXELS / 2);
    let full = i64::from(TILE_PIXELS);
    match side {
        Side::Top => (half, 0),
        Side::Left => (0, half),
        Side::Bottom => (half, full),
        Side::Right => (full, half),
    }
}

/// Corner a curve bends around: x from its vertical side, y from its horizontal one
fn curve_corner(road: &Road) -> (i64, i64) {
    let full = i64::from(TILE_PIXELS);
    let x = if road.touches(Side::Right) { full } else { 0 };
    let y = if road.touches(Side::Bottom) { full } else { 0 };
    (x, y)
}

/// Point halfway along a road, tile-local
fn road_midpoint(road: &Road) -> (i64, i64) {
    if road.is_curve() {
        let (cx, cy) = curve_corner(road);
        let offset = (f64::from(TILE_PIXELS / 2) * std::f64::consts::FRAC_1_SQRT_2) as i64;
        let half = i64::from(TILE_PIXELS / 2);
        (cx + (half - cx).signum() * offset, cy + (half - cy).signum() * offset)
    } else {
        let half = i64::from(TILE_PIXELS / 2);
        (half, half)
    }
}

fn draw_road(canvas: &mut RgbImage, road: &Road, x0: u32, y0: u32) {
    let half_width = f64::from(ROAD_WIDTH) / 2.0;
    let radius = f64::from(TILE_PIXELS) / 2.0;

    for py in 0..TILE_PIXELS {
        for px in 0..TILE_PIXELS {
            let on_road = if road.is_curve() {
                let (cx, cy) = curve_corner(road);
                let dx = f64::from(px) + 0.5 - cx as f64;
                let dy = f64::from(py) + 0.5 - cy as f64;
                ((dx * dx + dy * dy).sqrt() - radius).abs() <= half_width
            } else if road.touches(Side::Top) {
                (f64::from(px) + 0.5 - radius).abs() <= half_width
            } else {
                (f64::from(py) + 0.5 - radius).abs() <= half_width
            };
            if !on_road {
                continue;
            }
            if let Some(pixel) = canvas.get_pixel_mut_checked(x0 + px, y0 + py) {
                *pixel = Rgb(ROAD_COLOR);
            }
        }
    }
}

/// Marker square at the road midpoint, with a dark notch toward `facing`
fn draw_road_marker(
    canvas: &mut RgbImage,
    road: &Road,
    x0: u32,
    y0: u32,
    color: [u8; 3],
    facing: Option<Side>,
) {
    let (mx, my) = road_midpoint(road);
    let half = i64::from(MARKER_PIXELS / 2);
    let left = (i64::from(x0) + mx - half).max(0) as u32;
    let top = (i64::from(y0) + my - half).max(0) as u32;
    fill_rect(canvas, left, top, MARKER_PIXELS, MARKER_PIXELS, color);

    if let Some(side) = facing {
        let (sx, sy) = side_midpoint(side);
        let nx = (mx + (sx - mx).signum() * half).max(0);
        let ny = (my + (sy - my).signum() * half).max(0);
        let notch = MARKER_PIXELS / 3;
        fill_rect(
            canvas,
            ((i64::from(x0) + nx) as u32).saturating_sub(notch / 2),
            ((i64::from(y0) + ny) as u32).saturating_sub(notch / 2),
            notch,
            notch,
            CHAR_COLOR,
        );
    }
}

fn draw_face(canvas: &mut RgbImage, face: &TileFace, x0: u32, y0: u32) {
    for road in &face.roads {
        draw_road(canvas, road, x0, y0);
    }
    for road in &face.roads {
        if let Some(side) = road.agent {
            draw_road_marker(canvas, road, x0, y0, AGENT_COLOR, Some(side));
        } else if let Some(side) = road.alien {
            draw_road_marker(canvas, road, x0, y0, ALIEN_COLOR, Some(side));
        } else if road.hamburgers > 0 {
            draw_road_marker(canvas, road, x0, y0, HAMBURGER_COLOR, None);
        }
    }

    // Off-road markers along the top-left inner edge
    let occupants = face.occupants;
    let counts = [
        occupants.dogs,
        occupants.girls,
        occupants.boys,
        occupants.houses,
        occupants.ufos,
        occupants.offroad_agents,
        occupants.offroad_captured_aliens,
    ];
    let step = MARKER_PIXELS + 2;
    let mut slot = 0;
    for (&count, &color) in counts.iter().zip(OCCUPANT_COLORS.iter()) {
        for _ in 0..count {
            fill_rect(canvas, x0 + 3 + slot * step, y0 + 3, MARKER_PIXELS, MARKER_PIXELS, color);
            slot += 1;
        }
    }

    // Tile outline
    fill_rect(canvas, x0, y0, TILE_PIXELS, 1, CHAR_COLOR);
    fill_rect(canvas, x0, y0 + TILE_PIXELS - 1, TILE_PIXELS, 1, CHAR_COLOR);
    fill_rect(canvas, x0, y0, 1, TILE_PIXELS, CHAR_COLOR);
    fill_rect(canvas, x0 + TILE_PIXELS - 1, y0, 1, TILE_PIXELS, CHAR_COLOR);
}
