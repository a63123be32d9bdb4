//! WorldMap main structure

use crate::config::MapConfig;
use crate::error::{Result, WorldGenError};
use crate::generation::{generate_regions, Region};
use crate::geometry::Bounds;
use crate::plates::{simulate_plates, Plate, PlateParams};
use crate::raster::{hex_neighbors, rasterize, world_bounds, HexCell, RasterParams};
use crate::rng::GenRng;
use crate::terrain::{summarize, TerrainStatistics};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;
#[cfg(feature = "spatial-index")]
use glam::DVec2;

/// A complete generated world map
///
/// Owns every intermediate of the pipeline: the Voronoi regions, the plate
/// simulation results, and the rasterized hex grid, plus the random-stream
/// snapshot taken between simulation and rasterization so the grid can be
/// rebuilt bit-identically on demand.
///
/// # Examples
///
/// ```
/// use hexplate::*;
///
/// let config = MapConfigBuilder::new()
///     .seed(42)
///     .map_size(MapSize::Duel)
///     .build()
///     .unwrap();
///
/// let map = WorldMap::generate(config).unwrap();
/// println!("Generated {} tiles", map.cell_count());
///
/// // Query tiles
/// if let Some(cell) = map.cell_at(3, 2) {
///     println!("Tile (3,2) terrain: {:?}", cell.terrain);
/// }
/// ```
#[derive(Clone)]
pub struct WorldMap {
    /// Configuration used to generate this map
    config: MapConfig,

    /// Continuous extent shared by sites and tile centers
    bounds: Bounds,

    /// Voronoi regions (indexed by region ID)
    regions: Vec<Region>,

    /// Tectonic plates, one per region
    plates: Vec<Plate>,

    /// Rasterized tiles in row-major order
    cells: Vec<HexCell>,

    /// Stream snapshot taken right before rasterization
    raster_rng: GenRng,

    /// Spatial index for fast position-to-region lookups (optional, requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl WorldMap {
    /// Generate a world map from a configuration
    ///
    /// Runs the full pipeline in order: validate, scatter and relax plate
    /// seed points, tessellate, simulate plates, rasterize the hex grid.
    /// All phases share one seeded stream, so the configuration alone
    /// determines the output.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` before any phase runs if the configuration
    /// fails validation (zero dimensions, zero plates, out-of-range
    /// chances).
    ///
    /// # Example
    ///
    /// ```
    /// use hexplate::*;
    ///
    /// let config = MapConfigBuilder::new()
    ///     .seed(12345)
    ///     .map_size(MapSize::Duel)
    ///     .build()
    ///     .unwrap();
    ///
    /// let map = WorldMap::generate(config).unwrap();
    /// assert_eq!(map.cell_count(), 44 * 26);
    /// ```
    pub fn generate(config: MapConfig) -> Result<Self> {
        config.validate()?;

        let (width, height) = config.dimensions();
        let bounds = world_bounds(width, height);
        let mut rng = GenRng::new(config.seed);

        let regions = generate_regions(&config, &bounds, &mut rng);

        let plate_params = PlateParams::from_config(&config);
        let plates = simulate_plates(&regions, &bounds, &plate_params, &mut rng);

        // snapshot the stream so the derived grid can be replayed later
        let raster_rng = rng.clone();

        let raster_params = RasterParams::from_config(&config);
        let cells = rasterize(width, height, &regions, &plates, &raster_params, &mut rng)?;

        #[cfg(feature = "spatial-index")]
        let spatial_index = {
            let sites: Vec<DVec2> = regions.iter().map(|r| r.site).collect();
            SpatialIndex::new(&sites)
        };

        Ok(Self {
            config,
            bounds,
            regions,
            plates,
            cells,
            raster_rng,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    /// Get the configuration used to generate this map
    #[inline]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Get the continuous world extent shared by sites and tile centers
    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Get the grid width in tiles
    #[inline]
    pub fn width(&self) -> u32 {
        self.config.width()
    }

    /// Get the grid height in tiles
    #[inline]
    pub fn height(&self) -> u32 {
        self.config.height()
    }

    /// Get the number of tiles on this map
    ///
    /// # Example
    ///
    /// ```
    /// # use hexplate::*;
    /// # let config = MapConfigBuilder::new().seed(1).map_size(MapSize::Duel).build().unwrap();
    /// # let map = WorldMap::generate(config).unwrap();
    /// assert_eq!(map.cell_count(), (map.width() * map.height()) as usize);
    /// ```
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Get all tiles in row-major order (`cells()[y * width + x]`)
    #[inline]
    pub fn cells(&self) -> &[HexCell] {
        &self.cells
    }

    /// Get a tile by grid coordinates
    ///
    /// Returns `None` outside the grid.
    ///
    /// # Example
    ///
    /// ```
    /// # use hexplate::*;
    /// # let config = MapConfigBuilder::new().seed(1).map_size(MapSize::Duel).build().unwrap();
    /// # let map = WorldMap::generate(config).unwrap();
    /// assert!(map.cell_at(0, 0).is_some());
    /// assert!(map.cell_at(-1, 0).is_none());
    /// ```
    pub fn cell_at(&self, x: i32, y: i32) -> Option<&HexCell> {
        let (width, height) = self.config.dimensions();
        if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
            return None;
        }
        self.cells.get(y as usize * width as usize + x as usize)
    }

    /// Get all Voronoi regions
    #[inline]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Get a region by ID
    #[inline]
    pub fn region(&self, id: usize) -> Option<&Region> {
        self.regions.get(id)
    }

    /// Get a region by ID, failing with `RegionNotFound` for unknown IDs
    ///
    /// The `?`-friendly counterpart of [`region`](Self::region), for callers
    /// resolving IDs that arrive from outside the map (saved games, network
    /// messages).
    ///
    /// # Example
    ///
    /// ```
    /// # use hexplate::*;
    /// # let config = MapConfigBuilder::new().seed(1).map_size(MapSize::Duel).build().unwrap();
    /// # let map = WorldMap::generate(config).unwrap();
    /// assert!(map.try_region(0).is_ok());
    /// assert!(map.try_region(9999).is_err());
    /// ```
    pub fn try_region(&self, id: usize) -> Result<&Region> {
        self.regions.get(id).ok_or(WorldGenError::RegionNotFound(id))
    }

    /// Get all tectonic plates
    #[inline]
    pub fn plates(&self) -> &[Plate] {
        &self.plates
    }

    /// Get a plate by ID
    #[inline]
    pub fn plate(&self, id: usize) -> Option<&Plate> {
        self.plates.get(id)
    }

    /// Tally terrain across the map
    ///
    /// # Example
    ///
    /// ```
    /// # use hexplate::*;
    /// # let config = MapConfigBuilder::new().seed(7).map_size(MapSize::Duel).build().unwrap();
    /// # let map = WorldMap::generate(config).unwrap();
    /// let stats = map.statistics();
    /// assert_eq!(stats.total, map.cell_count());
    /// assert!((stats.water_percent + stats.land_percent - 100.0).abs() < 1e-9);
    /// ```
    pub fn statistics(&self) -> TerrainStatistics {
        summarize(&self.cells)
    }

    /// Rebuild the hex grid from the stored stream snapshot
    ///
    /// Replays rasterization with the original parameters; the result is
    /// identical to [`cells`](Self::cells), tile for tile.
    pub fn rebuild_grid(&self) -> Result<Vec<HexCell>> {
        self.rebuild_grid_with(&RasterParams::from_config(&self.config))
    }

    /// Rebuild the hex grid with different terrain-pass parameters
    ///
    /// The plate world and the stream snapshot are reused, so a retuned
    /// chance reads the very same draws as the original run. Stronger
    /// erosion can only turn land tiles to water, never shuffle unrelated
    /// tiles.
    ///
    /// # Example
    ///
    /// ```
    /// # use hexplate::*;
    /// # let config = MapConfigBuilder::new().seed(7).map_size(MapSize::Duel).build().unwrap();
    /// # let map = WorldMap::generate(config).unwrap();
    /// let mut params = RasterParams::from_config(map.config());
    /// params.erosion_chance = 0.0;
    /// let calm = map.rebuild_grid_with(&params).unwrap();
    /// let calm_land = calm.iter().filter(|c| c.terrain.is_land()).count();
    /// let land = map.cells().iter().filter(|c| c.terrain.is_land()).count();
    /// assert!(calm_land >= land);
    /// ```
    pub fn rebuild_grid_with(&self, params: &RasterParams) -> Result<Vec<HexCell>> {
        let mut rng = self.raster_rng.clone();
        let (width, height) = self.config.dimensions();
        rasterize(width, height, &self.regions, &self.plates, params, &mut rng)
    }

    /// Find the region owning a world position (requires spatial-index feature)
    ///
    /// Uses the KD-tree index for O(log n) lookups, for cursor picking and
    /// placement queries in continuous space.
    ///
    /// # Example
    ///
    /// ```
    /// # use hexplate::*;
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// # let config = MapConfigBuilder::new().seed(3).map_size(MapSize::Duel).build().unwrap();
    /// # let map = WorldMap::generate(config).unwrap();
    /// let site = map.region(0).unwrap().site;
    /// assert_eq!(map.region_at(site), 0);
    /// # }
    /// ```
    #[cfg(feature = "spatial-index")]
    pub fn region_at(&self, position: DVec2) -> usize {
        self.spatial_index.find_nearest(position)
    }

    /// Find tiles within a given hop count of a tile (BFS)
    ///
    /// Walks hex adjacency outward up to `hops` steps, clipping at the map
    /// edge. Returns coordinates in row-major order, including the center
    /// tile; empty if the center lies outside the grid.
    ///
    /// # Example
    ///
    /// ```
    /// # use hexplate::*;
    /// # let config = MapConfigBuilder::new().seed(3).map_size(MapSize::Duel).build().unwrap();
    /// # let map = WorldMap::generate(config).unwrap();
    /// // an interior tile and its six neighbors
    /// assert_eq!(map.cells_within_hops(10, 10, 1).len(), 7);
    /// ```
    pub fn cells_within_hops(&self, x: i32, y: i32, hops: usize) -> Vec<(i32, i32)> {
        if self.cell_at(x, y).is_none() {
            return vec![];
        }

        let mut visited = std::collections::HashSet::new();
        let mut current = vec![(x, y)];
        visited.insert((x, y));

        // BFS with hop limit
        for _ in 0..hops {
            let mut next = Vec::new();
            for &(cx, cy) in &current {
                for &(nx, ny) in hex_neighbors(cx, cy).iter() {
                    if self.cell_at(nx, ny).is_some() && visited.insert((nx, ny)) {
                        next.push((nx, ny));
                    }
                }
            }
            current = next;
        }

        let mut result: Vec<(i32, i32)> = visited.into_iter().collect();
        result.sort_by_key(|&(cx, cy)| (cy, cx));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MapConfigBuilder, MapSize, TerrainRules};
    use crate::terrain::TerrainType;

    fn duel_map(seed: u64) -> WorldMap {
        let config = MapConfigBuilder::new()
            .seed(seed)
            .map_size(MapSize::Duel)
            .build()
            .unwrap();
        WorldMap::generate(config).unwrap()
    }

    #[test]
    fn test_map_generation() {
        let map = duel_map(42);

        assert_eq!(map.cell_count(), 44 * 26);
        assert_eq!(map.regions().len(), map.config().plate_count);
        assert_eq!(map.plates().len(), map.regions().len());
        for cell in map.cells() {
            assert!(cell.plate_id < map.plates().len());
        }
    }

    #[test]
    fn test_cell_lookup() {
        let map = duel_map(42);

        let cell = map.cell_at(5, 3).unwrap();
        assert_eq!((cell.x, cell.y), (5, 3));

        assert!(map.cell_at(44, 0).is_none());
        assert!(map.cell_at(0, 26).is_none());
        assert!(map.cell_at(-1, 5).is_none());
    }

    #[test]
    fn test_try_region_lookup() {
        let map = duel_map(42);

        let region = map.try_region(0).unwrap();
        assert_eq!(region.id, 0);

        let err = map.try_region(map.regions().len()).unwrap_err();
        assert!(matches!(err, WorldGenError::RegionNotFound(id) if id == map.regions().len()));
    }

    #[test]
    fn test_full_determinism() {
        let first = duel_map(1234);
        let second = duel_map(1234);

        assert_eq!(first.cells(), second.cells());
        assert_eq!(first.plates(), second.plates());
        for (a, b) in first.regions().iter().zip(second.regions().iter()) {
            assert_eq!(a.site, b.site);
            assert_eq!(a.vertices, b.vertices);
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let first = duel_map(1);
        let second = duel_map(2);

        assert!(first
            .regions()
            .iter()
            .zip(second.regions().iter())
            .any(|(a, b)| a.site != b.site));
    }

    #[test]
    fn test_rebuild_grid_matches_original() {
        let map = duel_map(77);
        let rebuilt = map.rebuild_grid().unwrap();
        assert_eq!(rebuilt.as_slice(), map.cells());
    }

    #[test]
    fn test_rebuild_with_stronger_erosion_only_loses_land() {
        let map = duel_map(55);
        let mut params = RasterParams::from_config(map.config());
        params.erosion_chance = 0.6;
        let eroded = map.rebuild_grid_with(&params).unwrap();

        for (original, after) in map.cells().iter().zip(eroded.iter()) {
            if after.terrain.is_land() {
                assert!(original.terrain.is_land());
            }
        }
    }

    #[test]
    fn test_statistics_consistency() {
        let map = duel_map(9);
        let stats = map.statistics();

        assert_eq!(stats.total, map.cell_count());
        assert_eq!(
            stats.water + stats.flat + stats.rough + stats.mountain,
            stats.total
        );
        assert!((stats.water_percent + stats.land_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_polar_rows_always_water() {
        for seed in 1..=5 {
            let map = duel_map(seed);
            let polar = map.config().rules.polar_rows as i32;
            let height = map.height() as i32;
            for cell in map.cells() {
                if cell.y < polar || cell.y >= height - polar {
                    assert!(cell.terrain.is_water(), "seed {seed} tile ({},{})", cell.x, cell.y);
                }
            }
        }
    }

    #[test]
    fn test_land_fraction_zero_floods_the_world() {
        let mut rules = TerrainRules::default();
        rules.land_fraction = 0.0;
        let config = MapConfigBuilder::new()
            .seed(5)
            .map_size(MapSize::Duel)
            .rules(rules)
            .unwrap()
            .build()
            .unwrap();
        let map = WorldMap::generate(config).unwrap();

        let stats = map.statistics();
        assert_eq!(stats.water, stats.total);
        assert_eq!(stats.land_percent, 0.0);
    }

    #[test]
    fn test_water_share_stays_in_band() {
        // documented acceptance band: per-seed water within [35, 88] percent,
        // mean over the sample within [50, 75]
        let mut sum = 0.0;
        let seeds = 50;
        for seed in 0..seeds {
            let config = MapConfigBuilder::new()
                .seed(seed)
                .map_size(MapSize::Custom {
                    width: 64,
                    height: 40,
                })
                .plate_count(16)
                .unwrap()
                .build()
                .unwrap();
            let map = WorldMap::generate(config).unwrap();
            let water = map.statistics().water_percent;

            assert!(
                (35.0..=88.0).contains(&water),
                "seed {seed} water share {water:.1}% out of band"
            );
            sum += water;
        }

        let mean = sum / seeds as f64;
        assert!(
            (50.0..=75.0).contains(&mean),
            "mean water share {mean:.1}% out of band"
        );
    }

    #[test]
    fn test_small_grid_scenario() {
        // a 10x6 grid with 4 plates exercises every edge: polar rows cover
        // two thirds of it and plates are tiny
        let build = |seed| {
            let mut rules = TerrainRules::default();
            rules.land_fraction = 0.6;
            let config = MapConfigBuilder::new()
                .seed(seed)
                .map_size(MapSize::Custom {
                    width: 10,
                    height: 6,
                })
                .plate_count(4)
                .unwrap()
                .rules(rules)
                .unwrap()
                .build()
                .unwrap();
            WorldMap::generate(config).unwrap()
        };

        let first = build(1);
        let again = build(1);
        let other = build(2);

        assert_eq!(first.cell_count(), 60);
        assert_eq!(first.cells(), again.cells());
        for (a, b) in first.regions().iter().zip(again.regions().iter()) {
            assert_eq!(a.site, b.site);
        }
        assert_eq!(
            first.plates().iter().filter(|p| p.is_land).count(),
            2 // floor(4 * 0.6)
        );
        assert!(first
            .regions()
            .iter()
            .zip(other.regions().iter())
            .any(|(a, b)| a.site != b.site));
        assert!(
            first
                .cells()
                .iter()
                .zip(other.cells())
                .any(|(a, b)| a.terrain != b.terrain),
            "changing the seed should change at least one tile's terrain"
        );

        for cell in first.cells() {
            if cell.y < 2 || cell.y >= 4 {
                assert!(cell.terrain.is_water());
            }
        }
    }

    #[test]
    fn test_mountains_only_on_mountainous_plates() {
        let map = duel_map(13);
        for cell in map.cells() {
            if cell.terrain == TerrainType::Mountainous {
                let plate = map.plate(cell.plate_id).unwrap();
                assert!(plate.is_land && plate.is_mountainous);
            }
        }
    }

    #[test]
    fn test_cells_within_hops() {
        let map = duel_map(3);

        assert_eq!(map.cells_within_hops(5, 3, 0), vec![(5, 3)]);

        let ring = map.cells_within_hops(5, 3, 1);
        assert_eq!(ring.len(), 7);
        assert!(ring.contains(&(5, 3)));

        // corner tiles clip at the edge
        let corner = map.cells_within_hops(0, 0, 1);
        assert!(corner.len() < 7);
        assert!(corner.contains(&(0, 0)));

        // out-of-grid center finds nothing
        assert!(map.cells_within_hops(-3, 0, 2).is_empty());

        let wider = map.cells_within_hops(5, 3, 2);
        assert!(wider.len() > ring.len());
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_region_at_site() {
        let map = duel_map(21);
        for region in map.regions() {
            if !region.is_degenerate() {
                assert_eq!(map.region_at(region.site), region.id);
            }
        }
    }
}
