//! Tectonic plate simulation
//!
//! Gives each Voronoi region a plate identity. Interior regions become land
//! plates sized through randomized accumulation; a share of land plates is
//! marked mountainous. Every stream draw here is conditioned only on the
//! region count and the land selection, so a configuration pins the whole
//! draw schedule regardless of how the probabilities are tuned.

use std::cmp::Ordering;

use tracing::debug;

use crate::config::MapConfig;
use crate::generation::Region;
use crate::geometry::Bounds;
use crate::rng::GenRng;

/// A tectonic plate tied to one Voronoi region
///
/// `size` and `growth` are simulation magnitudes, not tile counts; the
/// rasterizer only reads `is_land` and `is_mountainous`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plate {
    /// Region id this plate occupies
    pub id: usize,
    /// Whether the plate carries a landmass
    pub is_land: bool,
    /// Accumulated landmass magnitude (0 for water plates)
    pub size: f64,
    /// Accumulated growth rate from the growth iterations
    pub growth: f64,
    /// Distance from the plate's site to the nearest world edge
    pub edge_score: f64,
    /// Whether the plate hosts mountain ranges
    pub is_mountainous: bool,
}

/// Parameters for the plate simulation
#[derive(Debug, Clone, Copy)]
pub struct PlateParams {
    /// Fraction of plates that become land, `[0, 1]`
    pub land_fraction: f64,
    /// Number of growth iterations
    pub growth_iterations: usize,
    /// Percent chance `[0, 100]` that a land plate is mountainous
    pub mountain_percent: f64,
    /// Target total landmass; sets the scale of size draws
    pub total_landmass: f64,
    /// Minimum accumulated landmass enforced after growth
    pub min_landmass: f64,
}

impl PlateParams {
    /// Pull the simulation parameters out of a map configuration
    pub fn from_config(config: &MapConfig) -> Self {
        Self {
            land_fraction: config.rules.land_fraction,
            growth_iterations: config.rules.growth_iterations,
            mountain_percent: config.rules.mountain_percent,
            total_landmass: config.map_size.total_landmass(),
            min_landmass: config.map_size.min_landmass(),
        }
    }
}

/// Run the plate simulation over a tessellated world
///
/// Phases, in order:
/// 1. Score every region by distance to the nearest world edge.
/// 2. Pick the `floor(count * land_fraction)` most interior regions as
///    land, drawing a starting size for each in descending score order
///    (score ties keep insertion order).
/// 3. Grow land plates: each iteration adds a drawn increment to the
///    plate's growth rate, then the rate to its size, in plate id order.
/// 4. Scale land sizes up proportionally if they total below
///    `min_landmass` (no draws).
/// 5. Mark each land plate mountainous with `mountain_percent` odds, in
///    plate id order.
///
/// Water plates never draw, keeping the schedule independent of tuning.
pub fn simulate_plates(
    regions: &[Region],
    bounds: &Bounds,
    params: &PlateParams,
    rng: &mut GenRng,
) -> Vec<Plate> {
    let mut plates: Vec<Plate> = regions
        .iter()
        .map(|region| Plate {
            id: region.id,
            is_land: false,
            size: 0.0,
            growth: 0.0,
            edge_score: bounds.edge_distance(region.site),
            is_mountainous: false,
        })
        .collect();

    // most interior first; stable sort keeps id order on equal scores
    let mut by_interior: Vec<usize> = (0..plates.len()).collect();
    by_interior.sort_by(|&a, &b| {
        plates[b]
            .edge_score
            .partial_cmp(&plates[a].edge_score)
            .unwrap_or(Ordering::Equal)
    });

    let land_count = (plates.len() as f64 * params.land_fraction).floor() as usize;
    let variance = if land_count > 0 {
        params.total_landmass / land_count as f64
    } else {
        0.0
    };

    for &idx in by_interior.iter().take(land_count) {
        let plate = &mut plates[idx];
        plate.is_land = true;
        plate.size = 1.0 + rng.next_f64() * variance;
    }

    let growth_step = if params.growth_iterations > 0 {
        variance / params.growth_iterations as f64
    } else {
        0.0
    };
    for _ in 0..params.growth_iterations {
        for plate in plates.iter_mut().filter(|p| p.is_land) {
            plate.growth += rng.next_f64() * growth_step;
            plate.size += plate.growth;
        }
    }

    let accumulated: f64 = plates.iter().filter(|p| p.is_land).map(|p| p.size).sum();
    if accumulated > 0.0 && accumulated < params.min_landmass {
        let scale = params.min_landmass / accumulated;
        for plate in plates.iter_mut().filter(|p| p.is_land) {
            plate.size *= scale;
        }
    }

    let mountain_chance = params.mountain_percent / 100.0;
    for plate in plates.iter_mut().filter(|p| p.is_land) {
        plate.is_mountainous = rng.chance(mountain_chance);
    }

    let landmass: f64 = plates.iter().filter(|p| p.is_land).map(|p| p.size).sum();
    debug!(
        "plate simulation: {} plates, {} land, {} mountainous, landmass {:.2}",
        plates.len(),
        land_count,
        plates.iter().filter(|p| p.is_mountainous).count(),
        landmass
    );

    plates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{scatter_sites, tessellate};

    fn test_world(seed: u64, count: usize) -> (Vec<Region>, Bounds) {
        let bounds = Bounds::from_extent(20.0, 12.0);
        let sites = scatter_sites(&mut GenRng::new(seed), count, &bounds);
        (tessellate(&sites, &bounds), bounds)
    }

    fn default_params() -> PlateParams {
        PlateParams {
            land_fraction: 0.5,
            growth_iterations: 5,
            mountain_percent: 33.0,
            total_landmass: 12.0,
            min_landmass: 8.0,
        }
    }

    #[test]
    fn test_land_count_follows_fraction() {
        let (regions, bounds) = test_world(42, 16);
        for (fraction, expected) in [(0.5, 8), (0.25, 4), (0.55, 8), (0.0, 0), (1.0, 16)] {
            let params = PlateParams {
                land_fraction: fraction,
                ..default_params()
            };
            let plates = simulate_plates(&regions, &bounds, &params, &mut GenRng::new(1));
            let land = plates.iter().filter(|p| p.is_land).count();
            assert_eq!(land, expected, "fraction {fraction}");
        }
    }

    #[test]
    fn test_most_interior_plates_become_land() {
        let (regions, bounds) = test_world(7, 12);
        let params = default_params();
        let plates = simulate_plates(&regions, &bounds, &params, &mut GenRng::new(1));

        let min_land_score = plates
            .iter()
            .filter(|p| p.is_land)
            .map(|p| p.edge_score)
            .fold(f64::INFINITY, f64::min);
        let max_water_score = plates
            .iter()
            .filter(|p| !p.is_land)
            .map(|p| p.edge_score)
            .fold(f64::NEG_INFINITY, f64::max);

        assert!(
            min_land_score >= max_water_score,
            "every land plate should score at least as interior as every water plate"
        );
    }

    #[test]
    fn test_water_plates_stay_untouched() {
        let (regions, bounds) = test_world(3, 10);
        let plates = simulate_plates(&regions, &bounds, &default_params(), &mut GenRng::new(9));

        for plate in plates.iter().filter(|p| !p.is_land) {
            assert_eq!(plate.size, 0.0);
            assert_eq!(plate.growth, 0.0);
            assert!(!plate.is_mountainous);
        }
    }

    #[test]
    fn test_land_sizes_start_above_one_and_grow() {
        let (regions, bounds) = test_world(11, 14);
        let params = PlateParams {
            min_landmass: 0.0,
            ..default_params()
        };
        let plates = simulate_plates(&regions, &bounds, &params, &mut GenRng::new(5));

        for plate in plates.iter().filter(|p| p.is_land) {
            assert!(plate.size >= 1.0);
            assert!(plate.growth >= 0.0);
        }
    }

    #[test]
    fn test_min_landmass_scales_up() {
        let (regions, bounds) = test_world(13, 10);
        let params = PlateParams {
            min_landmass: 1000.0,
            ..default_params()
        };
        let plates = simulate_plates(&regions, &bounds, &params, &mut GenRng::new(2));

        let total: f64 = plates.iter().filter(|p| p.is_land).map(|p| p.size).sum();
        assert!((total - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_mountain_percent_extremes() {
        let (regions, bounds) = test_world(17, 12);

        let all = PlateParams {
            mountain_percent: 100.0,
            ..default_params()
        };
        let plates = simulate_plates(&regions, &bounds, &all, &mut GenRng::new(4));
        for plate in plates.iter().filter(|p| p.is_land) {
            assert!(plate.is_mountainous);
        }

        let none = PlateParams {
            mountain_percent: 0.0,
            ..default_params()
        };
        let plates = simulate_plates(&regions, &bounds, &none, &mut GenRng::new(4));
        assert!(plates.iter().all(|p| !p.is_mountainous));
    }

    #[test]
    fn test_simulation_determinism() {
        let (regions, bounds) = test_world(21, 18);
        let params = default_params();
        let first = simulate_plates(&regions, &bounds, &params, &mut GenRng::new(77));
        let second = simulate_plates(&regions, &bounds, &params, &mut GenRng::new(77));
        assert_eq!(first, second);
    }

    #[test]
    fn test_mountain_tuning_leaves_sizes_alone() {
        // mountain draws come after every size draw, so retuning the
        // mountain odds must not shift plate sizes under the same seed
        let (regions, bounds) = test_world(23, 16);
        let base = default_params();
        let retuned = PlateParams {
            mountain_percent: 90.0,
            ..base
        };

        let a = simulate_plates(&regions, &bounds, &base, &mut GenRng::new(31));
        let b = simulate_plates(&regions, &bounds, &retuned, &mut GenRng::new(31));

        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.is_land, y.is_land);
            assert_eq!(x.size, y.size);
            assert_eq!(x.growth, y.growth);
        }
    }

    #[test]
    fn test_zero_growth_iterations() {
        let (regions, bounds) = test_world(29, 10);
        let params = PlateParams {
            growth_iterations: 0,
            min_landmass: 0.0,
            ..default_params()
        };
        let plates = simulate_plates(&regions, &bounds, &params, &mut GenRng::new(8));

        for plate in plates.iter().filter(|p| p.is_land) {
            assert_eq!(plate.growth, 0.0);
            assert!(plate.size >= 1.0);
        }
    }
}
