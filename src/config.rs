//! World Map Configuration and Builder
//!
//! This module provides configuration types for deterministic hex world map
//! generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, WorldGenError};
use crate::rng::seed_from_text;

/// Largest accepted grid dimension per axis.
///
/// Grid coordinates are `i32` in tile space; the cap keeps every custom
/// size far from that range and bounds worst-case generation cost.
pub const MAX_DIMENSION: u32 = 512;

/// Map size presets following the usual strategy-game ladder
///
/// Each size maps to fixed grid dimensions and landmass targets so maps of
/// the same class play consistently.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapSize {
    /// Duel map: 44x26 tiles, 6 plates
    Duel,
    /// Tiny map: 56x36 tiles, 9 plates
    Tiny,
    /// Small map: 66x42 tiles, 12 plates
    Small,
    /// Standard map: 80x52 tiles, 18 plates (default)
    Standard,
    /// Large map: 96x60 tiles, 24 plates
    Large,
    /// Huge map: 106x66 tiles, 30 plates
    Huge,
    /// Custom grid dimensions (up to [`MAX_DIMENSION`] per axis); derived
    /// parameters scale with area
    Custom {
        /// Grid width in tiles
        width: u32,
        /// Grid height in tiles
        height: u32,
    },
}

impl MapSize {
    /// Get the grid dimensions (width, height) in tiles for this map size
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            MapSize::Duel => (44, 26),
            MapSize::Tiny => (56, 36),
            MapSize::Small => (66, 42),
            MapSize::Standard => (80, 52),
            MapSize::Large => (96, 60),
            MapSize::Huge => (106, 66),
            MapSize::Custom { width, height } => (width, height),
        }
    }

    /// Get the default number of tectonic plates for this map size
    ///
    /// Custom sizes derive the count from grid area, keeping roughly one
    /// plate per 230 tiles with a floor of 4.
    pub fn plate_count(self) -> usize {
        match self {
            MapSize::Duel => 6,
            MapSize::Tiny => 9,
            MapSize::Small => 12,
            MapSize::Standard => 18,
            MapSize::Large => 24,
            MapSize::Huge => 30,
            MapSize::Custom { width, height } => {
                ((width as usize * height as usize) / 230).max(4)
            }
        }
    }

    /// Get the target total landmass magnitude for this map size
    ///
    /// Sets the scale of the per-plate size draws; larger targets mean
    /// larger continents relative to plate count.
    pub fn total_landmass(self) -> f64 {
        match self {
            MapSize::Duel => 6.0,
            MapSize::Tiny => 9.0,
            MapSize::Small => 12.0,
            MapSize::Standard => 18.0,
            MapSize::Large => 24.0,
            MapSize::Huge => 30.0,
            MapSize::Custom { .. } => self.plate_count() as f64,
        }
    }

    /// Get the minimum accumulated landmass enforced after plate growth
    pub fn min_landmass(self) -> f64 {
        match self {
            MapSize::Duel => 4.0,
            MapSize::Tiny => 6.0,
            MapSize::Small => 8.0,
            MapSize::Standard => 12.0,
            MapSize::Large => 16.0,
            MapSize::Huge => 20.0,
            MapSize::Custom { .. } => self.total_landmass() * (2.0 / 3.0),
        }
    }

    /// Get the nominal number of coastal island chains for this map size
    pub fn coastal_island_count(self) -> u32 {
        match self {
            MapSize::Duel => 2,
            MapSize::Tiny => 3,
            MapSize::Small => 4,
            MapSize::Standard => 5,
            MapSize::Large => 6,
            MapSize::Huge => 7,
            MapSize::Custom { width, .. } => (width / 16).max(1),
        }
    }

    /// Get the total tile budget spread across coastal islands
    pub fn island_total_size(self) -> f64 {
        match self {
            MapSize::Duel => 4.0,
            MapSize::Tiny => 6.0,
            MapSize::Small => 8.0,
            MapSize::Standard => 10.0,
            MapSize::Large => 12.0,
            MapSize::Huge => 14.0,
            MapSize::Custom { .. } => self.coastal_island_count() as f64 * 2.0,
        }
    }

    /// Get a human-readable name for this map size
    pub fn name(self) -> &'static str {
        match self {
            MapSize::Duel => "Duel",
            MapSize::Tiny => "Tiny",
            MapSize::Small => "Small",
            MapSize::Standard => "Standard",
            MapSize::Large => "Large",
            MapSize::Huge => "Huge",
            MapSize::Custom { .. } => "Custom",
        }
    }
}

impl Default for MapSize {
    fn default() -> Self {
        MapSize::Standard
    }
}

/// Tunable terrain and classification rules
///
/// Every magic number of the generation pipeline lives here so the
/// algorithms stay parameter-free. The defaults are calibrated for roughly
/// 55-70% water on preset sizes; raising `land_fraction` toward 0.6 pushes
/// maps toward half land.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainRules {
    /// Fraction of plates that become land, `[0, 1]`
    ///
    /// The land plate count is `floor(plate_count * land_fraction)`; a
    /// result of zero legally produces an all-water map.
    pub land_fraction: f64,

    /// Number of plate growth iterations after land selection
    pub growth_iterations: usize,

    /// Percent chance `[0, 100]` that a land plate is mountainous
    pub mountain_percent: f64,

    /// Per-tile chance `[0, 1]` that a land tile is rough instead of flat
    pub rough_chance: f64,

    /// Per-tile chance `[0, 1]` that a tile on a mountainous plate becomes
    /// mountains (drawn after the rough roll)
    pub mountain_chance: f64,

    /// Per-tile chance `[0, 1]` that a coastal land tile erodes to water
    pub erosion_chance: f64,

    /// Per-tile chance `[0, 1]` that an ocean tile next to land sprouts an
    /// island; `None` derives the chance from the map size's island budget
    pub island_chance: Option<f64>,

    /// Rows at the top and bottom of the map forced to water
    pub polar_rows: u32,
}

impl TerrainRules {
    fn validate(&self) -> Result<()> {
        check_unit_interval("land fraction", self.land_fraction)?;
        check_unit_interval("rough chance", self.rough_chance)?;
        check_unit_interval("mountain chance", self.mountain_chance)?;
        check_unit_interval("erosion chance", self.erosion_chance)?;
        if let Some(chance) = self.island_chance {
            check_unit_interval("island chance", chance)?;
        }
        if !(0.0..=100.0).contains(&self.mountain_percent) {
            return Err(WorldGenError::InvalidConfig(format!(
                "mountain percent must be within [0, 100] (got {})",
                self.mountain_percent
            )));
        }
        Ok(())
    }
}

impl Default for TerrainRules {
    fn default() -> Self {
        Self {
            land_fraction: 0.45,
            growth_iterations: 5,
            mountain_percent: 33.0,
            rough_chance: 0.25,
            mountain_chance: 0.35,
            erosion_chance: 0.03,
            island_chance: None,
            polar_rows: 2,
        }
    }
}

fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(WorldGenError::InvalidConfig(format!(
            "{} must be within [0, 1] (got {})",
            name, value
        )));
    }
    Ok(())
}

/// Configuration for deterministic world map generation
///
/// The same configuration always produces the identical map: one seed feeds
/// a single random stream that every phase draws from in a fixed order.
///
/// # Serialization
///
/// Only the configuration is serialized (well under 100 bytes), not the
/// generated map. The map is regenerated from the configuration when
/// loading a save file.
///
/// # Example
///
/// ```rust
/// use hexplate::*;
///
/// let config = MapConfigBuilder::new()
///     .seed(42)
///     .map_size(MapSize::Small)
///     .build()
///     .unwrap();
///
/// // Config is serializable (with "serde" feature)
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: MapConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config.seed, restored.seed);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    /// Random seed for deterministic map generation
    ///
    /// The same seed (with the same size, plate count, and rules) always
    /// produces the exact same map, tile for tile.
    pub seed: u64,

    /// Map size preset (determines grid dimensions and landmass targets)
    pub map_size: MapSize,

    /// Number of tectonic plates / Voronoi regions
    ///
    /// Defaults to the map size's preset count; override for denser or
    /// sparser continents.
    pub plate_count: usize,

    /// Number of Lloyd relaxation iterations applied to plate seed points
    ///
    /// - 0: Raw scatter (irregular plates)
    /// - 3: Default, evens out plate areas without erasing variety
    /// - 10+: Diminishing returns
    pub relax_iterations: usize,

    /// Convergence threshold for Lloyd relaxation, in world units
    ///
    /// Relaxation stops early once the maximum site displacement in an
    /// iteration falls below this threshold. 0.0 (the default) disables the
    /// cutoff so exactly `relax_iterations` passes run.
    pub relax_convergence: f64,

    /// Terrain classification rules and tunables
    pub rules: TerrainRules,
}

impl MapConfig {
    /// Get the grid width in tiles
    #[inline]
    pub fn width(&self) -> u32 {
        self.map_size.dimensions().0
    }

    /// Get the grid height in tiles
    #[inline]
    pub fn height(&self) -> u32 {
        self.map_size.dimensions().1
    }

    /// Get the grid dimensions (width, height) in tiles
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.map_size.dimensions()
    }

    /// Get the effective island chance per eligible ocean tile
    ///
    /// Uses the explicit rule override when set, otherwise spreads the map
    /// size's island budget over the grid area.
    pub fn island_chance(&self) -> f64 {
        self.rules.island_chance.unwrap_or_else(|| {
            let (width, height) = self.dimensions();
            let area = (width as f64) * (height as f64);
            if area == 0.0 {
                return 0.0;
            }
            let budget =
                self.map_size.coastal_island_count() as f64 * self.map_size.island_total_size();
            (budget / area).min(1.0)
        })
    }

    /// Validate the configuration
    ///
    /// The builder validates on the way in, but configs can also be built
    /// literally or deserialized; generation re-checks before any phase runs.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.dimensions();
        if width == 0 || height == 0 {
            return Err(WorldGenError::InvalidConfig(format!(
                "map dimensions must be positive (got {}x{})",
                width, height
            )));
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(WorldGenError::InvalidConfig(format!(
                "map dimensions must be <= {} per axis (got {}x{})",
                MAX_DIMENSION, width, height
            )));
        }
        if self.plate_count == 0 {
            return Err(WorldGenError::InvalidConfig(
                "plate count must be at least 1".to_string(),
            ));
        }
        if self.plate_count > 4096 {
            return Err(WorldGenError::InvalidConfig(format!(
                "plate count must be <= 4096 (got {})",
                self.plate_count
            )));
        }
        if self.relax_iterations > 20 {
            return Err(WorldGenError::InvalidConfig(format!(
                "relaxation iterations must be <= 20 (got {})",
                self.relax_iterations
            )));
        }
        if !self.relax_convergence.is_finite() || self.relax_convergence < 0.0 {
            return Err(WorldGenError::InvalidConfig(format!(
                "relaxation convergence must be >= 0 (got {})",
                self.relax_convergence
            )));
        }
        self.rules.validate()
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfigBuilder::new().build().unwrap()
    }
}

/// Builder for creating MapConfig with validation
///
/// Uses the builder pattern to create configurations with sensible defaults.
///
/// # Example
///
/// ```rust
/// use hexplate::*;
///
/// // Use defaults
/// let config = MapConfigBuilder::new().build().unwrap();
///
/// // Customize
/// let config = MapConfigBuilder::new()
///     .seed_text("island hopping")
///     .map_size(MapSize::Tiny)
///     .relax_iterations(5)
///     .unwrap()
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct MapConfigBuilder {
    seed: Option<u64>,
    map_size: MapSize,
    plate_count: Option<usize>,
    relax_iterations: usize,
    relax_convergence: f64,
    rules: TerrainRules,
}

impl MapConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - map_size: Standard (80x52 tiles)
    /// - plate_count: From the map size preset
    /// - relax_iterations: 3
    /// - relax_convergence: 0.0 (run all iterations)
    /// - rules: [`TerrainRules::default`]
    pub fn new() -> Self {
        Self {
            seed: None,
            map_size: MapSize::default(),
            plate_count: None,
            relax_iterations: 3,
            relax_convergence: 0.0,
            rules: TerrainRules::default(),
        }
    }

    /// Set the random seed for map generation
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the seed from text, folded through a stable hash
    ///
    /// Lets players share maps as phrases instead of numbers.
    pub fn seed_text(mut self, text: &str) -> Self {
        self.seed = Some(seed_from_text(text));
        self
    }

    /// Set the map size preset
    pub fn map_size(mut self, size: MapSize) -> Self {
        self.map_size = size;
        self
    }

    /// Override the number of tectonic plates
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the count is 0 or greater than 4096
    pub fn plate_count(mut self, count: usize) -> Result<Self> {
        if count == 0 || count > 4096 {
            return Err(WorldGenError::InvalidConfig(format!(
                "plate count must be within [1, 4096] (got {})",
                count
            )));
        }
        self.plate_count = Some(count);
        Ok(self)
    }

    /// Set the number of Lloyd relaxation iterations
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if iterations > 20 (excessive and impractical)
    pub fn relax_iterations(mut self, iterations: usize) -> Result<Self> {
        if iterations > 20 {
            return Err(WorldGenError::InvalidConfig(format!(
                "relaxation iterations must be <= 20 (got {})",
                iterations
            )));
        }
        self.relax_iterations = iterations;
        Ok(self)
    }

    /// Set the convergence threshold for Lloyd relaxation, in world units
    ///
    /// Relaxation stops early when the largest site displacement of an
    /// iteration falls below the threshold; 0.0 disables the cutoff.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the threshold is negative or not finite
    pub fn relax_convergence(mut self, threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(WorldGenError::InvalidConfig(format!(
                "relaxation convergence must be >= 0 (got {})",
                threshold
            )));
        }
        self.relax_convergence = threshold;
        Ok(self)
    }

    /// Replace the terrain rules wholesale
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if any chance lies outside its range
    pub fn rules(mut self, rules: TerrainRules) -> Result<Self> {
        rules.validate()?;
        self.rules = rules;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for zero-sized custom dimensions or any rule
    /// the setters did not already reject.
    pub fn build(self) -> Result<MapConfig> {
        let seed = self.seed.unwrap_or_else(rand::random);
        let plate_count = self.plate_count.unwrap_or_else(|| self.map_size.plate_count());

        let config = MapConfig {
            seed,
            map_size: self.map_size,
            plate_count,
            relax_iterations: self.relax_iterations,
            relax_convergence: self.relax_convergence,
            rules: self.rules,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for MapConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
