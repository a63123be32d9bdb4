//! Hex grid rasterization of the plate world
//!
//! Projects the continuous plate world onto an offset hex grid and paints
//! terrain. Hexes are unit-width and pointy-topped: odd rows shift half a
//! tile right and consecutive rows sit 3/4 of a tile apart, so the grid's
//! continuous extent is `(width + 0.5) x (0.75 * height + 0.25)`. Plate
//! sites live in that same space, which keeps region areas proportional to
//! the tiles they receive.
//!
//! Rasterization runs two passes. The first resolves every tile's owning
//! plate by nearest site, drawing nothing. The second walks the grid in
//! strict row-major order (y outer, x inner) and performs the conditional
//! terrain draws; each tile finishes all of its draws before the next tile
//! starts, so the draw schedule is a pure function of the plate layout.

use glam::DVec2;
use tracing::debug;

use crate::config::MapConfig;
use crate::error::{Result, WorldGenError};
use crate::generation::{nearest_region, Region};
use crate::geometry::Bounds;
use crate::plates::Plate;
use crate::rng::GenRng;
use crate::terrain::TerrainType;

/// Vertical distance between consecutive hex rows, in tile widths.
pub const ROW_SPACING: f64 = 0.75;

/// Horizontal shift applied to odd rows, in tile widths.
pub const ODD_ROW_SHIFT: f64 = 0.5;

/// One tile of the generated map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCell {
    /// Column in the offset grid
    pub x: i32,
    /// Row in the offset grid
    pub y: i32,
    /// Terrain painted onto this tile
    pub terrain: TerrainType,
    /// Region/plate owning this tile
    pub plate_id: usize,
}

/// Continuous extent of a hex grid, shared with the plate world
pub fn world_bounds(width: u32, height: u32) -> Bounds {
    Bounds::from_extent(
        width as f64 + ODD_ROW_SHIFT,
        height as f64 * ROW_SPACING + (1.0 - ROW_SPACING),
    )
}

/// Center of a grid tile in continuous space
///
/// `(x + 0.5, 0.75y + 0.5)`, plus another half-tile to the right on odd
/// rows.
pub fn hex_center(x: i32, y: i32) -> DVec2 {
    let shift = if y & 1 == 1 { ODD_ROW_SHIFT } else { 0.0 };
    DVec2::new(x as f64 + 0.5 + shift, y as f64 * ROW_SPACING + 0.5)
}

/// The six neighbors of a tile in an odd-row-shifted hex grid
///
/// Order: east, west, then the two row-above and two row-below neighbors.
/// Coordinates may fall outside the grid; callers decide what off-map
/// means (water for erosion, ineligible for island seeding).
pub fn hex_neighbors(x: i32, y: i32) -> [(i32, i32); 6] {
    if y & 1 == 0 {
        [
            (x + 1, y),
            (x - 1, y),
            (x, y - 1),
            (x - 1, y - 1),
            (x, y + 1),
            (x - 1, y + 1),
        ]
    } else {
        [
            (x + 1, y),
            (x - 1, y),
            (x + 1, y - 1),
            (x, y - 1),
            (x + 1, y + 1),
            (x, y + 1),
        ]
    }
}

/// Parameters for the terrain pass
#[derive(Debug, Clone, Copy)]
pub struct RasterParams {
    /// Chance a land tile turns rough
    pub rough_chance: f64,
    /// Chance a tile on a mountainous plate turns to mountains
    pub mountain_chance: f64,
    /// Chance a coastal land tile erodes to water
    pub erosion_chance: f64,
    /// Chance an ocean tile next to a land plate sprouts an island
    pub island_chance: f64,
    /// Rows at each map edge forced to water
    pub polar_rows: u32,
}

impl RasterParams {
    /// Pull the terrain-pass parameters out of a map configuration
    pub fn from_config(config: &MapConfig) -> Self {
        Self {
            rough_chance: config.rules.rough_chance,
            mountain_chance: config.rules.mountain_chance,
            erosion_chance: config.rules.erosion_chance,
            island_chance: config.island_chance(),
            polar_rows: config.rules.polar_rows,
        }
    }
}

/// Rasterize the plate world onto a `width x height` hex grid
///
/// Returns tiles in row-major order (`cells[y * width + x]` is tile
/// `(x, y)`). Per tile, in order:
///
/// 1. The owning plate is the nearest region to the tile center.
/// 2. Polar rows are water, unconditionally and without draws.
/// 3. Tiles of water plates are water; outside the polar band, a tile
///    touching a land plate may instead sprout a flat island (one draw).
/// 4. Tiles of land plates start flat, may roll rough (one draw), may roll
///    mountains if their plate is mountainous (one draw), and erode to
///    water with one further draw if any neighbor, off-map included,
///    belongs to a non-land plate.
///
/// Eroded tiles stay on their land plate and are never island candidates,
/// so raising or lowering any chance never shifts another tile's draws.
pub fn rasterize(
    width: u32,
    height: u32,
    regions: &[Region],
    plates: &[Plate],
    params: &RasterParams,
    rng: &mut GenRng,
) -> Result<Vec<HexCell>> {
    if regions.is_empty() {
        return Err(WorldGenError::GenerationFailed(
            "cannot rasterize with no regions".to_string(),
        ));
    }
    if regions.len() != plates.len() {
        return Err(WorldGenError::GenerationFailed(format!(
            "plate count {} does not match region count {}",
            plates.len(),
            regions.len()
        )));
    }

    let w = width as i32;
    let h = height as i32;
    let polar = params.polar_rows as i32;
    let tile_count = width as usize * height as usize;

    // Pass 1: resolve plate ownership for every tile. Pure geometry, no
    // draws, so neighbor lookups in pass 2 can read this grid instead of
    // re-querying sites.
    let mut plate_ids = Vec::with_capacity(tile_count);
    for y in 0..h {
        for x in 0..w {
            plate_ids.push(nearest_region(regions, hex_center(x, y)));
        }
    }

    let plate_at = |x: i32, y: i32| -> Option<usize> {
        if x < 0 || y < 0 || x >= w || y >= h {
            None
        } else {
            Some(plate_ids[(y * w + x) as usize])
        }
    };

    // Pass 2: terrain draws in strict row-major order.
    let mut cells = Vec::with_capacity(tile_count);
    for y in 0..h {
        let in_polar_band = y < polar || y >= h - polar;
        for x in 0..w {
            let plate_id = plate_ids[(y * w + x) as usize];
            let plate = &plates[plate_id];

            let mut terrain = TerrainType::Water;
            if plate.is_land && !in_polar_band {
                terrain = TerrainType::Flat;
                if rng.chance(params.rough_chance) {
                    terrain = TerrainType::Rough;
                }
                if plate.is_mountainous && rng.chance(params.mountain_chance) {
                    terrain = TerrainType::Mountainous;
                }
                // off-map neighbors count as water
                let coastal = hex_neighbors(x, y).iter().any(|&(nx, ny)| match plate_at(nx, ny) {
                    Some(pid) => !plates[pid].is_land,
                    None => true,
                });
                if coastal && rng.chance(params.erosion_chance) {
                    terrain = TerrainType::Water;
                }
            } else if !plate.is_land && !in_polar_band {
                let near_land = hex_neighbors(x, y)
                    .iter()
                    .any(|&(nx, ny)| matches!(plate_at(nx, ny), Some(pid) if plates[pid].is_land));
                if near_land && rng.chance(params.island_chance) {
                    terrain = TerrainType::Flat;
                }
            }

            cells.push(HexCell {
                x,
                y,
                terrain,
                plate_id,
            });
        }
    }

    let water = cells.iter().filter(|c| c.terrain.is_water()).count();
    debug!(
        "rasterized {}x{} grid: {} water / {} land tiles",
        width,
        height,
        water,
        cells.len() - water
    );

    Ok(cells)
}
