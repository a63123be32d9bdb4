//! Core region generation pipeline
//!
//! Produces the plate layout for a world: scatter seed points over the
//! bounded plane, even them out with Lloyd relaxation, then tessellate into
//! Voronoi regions.

mod lloyd;
mod sites;
mod voronoi;

pub use lloyd::{relax_sites, relax_sites_with_options, RelaxOptions};
pub use sites::scatter_sites;
pub use voronoi::{nearest_region, tessellate, Region};

use crate::config::MapConfig;
use crate::geometry::Bounds;
use crate::rng::GenRng;

/// Generate the relaxed Voronoi regions for a configuration
///
/// Consumes exactly two stream draws per site (x then y, in site order);
/// relaxation and tessellation draw nothing.
pub fn generate_regions(config: &MapConfig, bounds: &Bounds, rng: &mut GenRng) -> Vec<Region> {
    // Step 1: Scatter plate seed points
    let sites = sites::scatter_sites(rng, config.plate_count, bounds);

    // Step 2: Apply Lloyd relaxation with convergence detection
    let sites = if config.relax_iterations > 0 {
        let options = RelaxOptions {
            max_iterations: config.relax_iterations,
            convergence_threshold: config.relax_convergence,
        };
        lloyd::relax_sites_with_options(sites, bounds, options)
    } else {
        sites
    };

    // Step 3: Partition the world among the final sites
    voronoi::tessellate(&sites, bounds)
}
