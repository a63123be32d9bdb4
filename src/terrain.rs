//! Terrain classification and map statistics
//!
//! The terrain vocabulary is a closed set: the rasterizer only ever emits
//! flat, rough, mountainous, or water tiles. Volcano is reserved for
//! post-generation events and is counted with mountains wherever totals
//! are reported.

use crate::raster::HexCell;

/// Tile terrain classes produced by world generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainType {
    /// Open land (plains, grassland)
    Flat,
    /// Broken land (hills, badlands)
    Rough,
    /// Mountain ranges
    Mountainous,
    /// Volcanic peak; never generated, reserved for in-game events
    Volcano,
    /// Ocean
    #[default]
    Water,
}

impl TerrainType {
    /// Check if this terrain is water
    pub fn is_water(&self) -> bool {
        matches!(self, TerrainType::Water)
    }

    /// Check if this terrain is land
    pub fn is_land(&self) -> bool {
        !self.is_water()
    }

    /// Get a human-readable name for this terrain
    pub fn name(&self) -> &'static str {
        match self {
            TerrainType::Flat => "Flat",
            TerrainType::Rough => "Rough",
            TerrainType::Mountainous => "Mountains",
            TerrainType::Volcano => "Volcano",
            TerrainType::Water => "Water",
        }
    }
}

/// Tile tallies for a generated map
///
/// `mountain` includes volcano tiles; `water_percent` and `land_percent`
/// always sum to 100 for a non-empty map.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainStatistics {
    /// Total number of tiles
    pub total: usize,
    /// Water tiles
    pub water: usize,
    /// Flat land tiles
    pub flat: usize,
    /// Rough land tiles
    pub rough: usize,
    /// Mountain tiles (including volcanoes)
    pub mountain: usize,
    /// Water share of the map, 0-100
    pub water_percent: f64,
    /// Land share of the map, 0-100
    pub land_percent: f64,
}

/// Tally terrain across a generated grid
pub fn summarize(cells: &[HexCell]) -> TerrainStatistics {
    let mut water = 0;
    let mut flat = 0;
    let mut rough = 0;
    let mut mountain = 0;

    for cell in cells {
        match cell.terrain {
            TerrainType::Water => water += 1,
            TerrainType::Flat => flat += 1,
            TerrainType::Rough => rough += 1,
            TerrainType::Mountainous | TerrainType::Volcano => mountain += 1,
        }
    }

    let total = cells.len();
    let (water_percent, land_percent) = if total == 0 {
        (0.0, 0.0)
    } else {
        let water_percent = water as f64 / total as f64 * 100.0;
        (water_percent, 100.0 - water_percent)
    };

    TerrainStatistics {
        total,
        water,
        flat,
        rough,
        mountain,
        water_percent,
        land_percent,
    }
}
