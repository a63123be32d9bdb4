//! Voronoi-based hex world map generation
//!
//! A standalone library for generating tile-based world maps from tectonic
//! plates, suitable for use with any game engine (Bevy, Godot, etc.)
//!
//! Generation is fully deterministic: a configuration (seed, size, rules)
//! always yields the identical map, tile for tile, so save files only need
//! to store the configuration.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hexplate::*;
//!
//! // Generate a world map
//! let config = MapConfigBuilder::new()
//!     .seed(42)
//!     .map_size(MapSize::Small)
//!     .relax_iterations(3).unwrap()
//!     .build().unwrap();
//!
//! let map = WorldMap::generate(config).unwrap();
//!
//! // Inspect the result
//! let stats = map.statistics();
//! println!("Generated {} tiles, {:.1}% water", map.cell_count(), stats.water_percent);
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-region lookups using KD-tree
//! - `serde`: Enables serialization support for configuration and tiles

// Modules
pub mod error;
pub mod config;
pub mod rng;
pub mod geometry;
pub mod generation;
pub mod plates;
pub mod raster;
pub mod terrain;
pub mod map;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{WorldGenError, Result};
pub use config::{MapConfig, MapConfigBuilder, MapSize, TerrainRules};
pub use map::WorldMap;
pub use rng::GenRng;
pub use geometry::Bounds;
pub use generation::{Region, RelaxOptions};
pub use plates::{Plate, PlateParams};
pub use raster::{HexCell, RasterParams};
pub use terrain::{TerrainType, TerrainStatistics};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
