//! Lloyd relaxation for evening out plate seed points
//!
//! Lloyd relaxation iteratively moves each site to the centroid of its
//! Voronoi region, nudging a raw scatter toward a centroidal tessellation
//! so plate areas come out comparable without losing seed determinism.

use std::time::Instant;

use glam::DVec2;
use tracing::debug;

use crate::generation::voronoi::tessellate;
use crate::geometry::Bounds;

/// Options for Lloyd relaxation
#[derive(Debug, Clone, Copy)]
pub struct RelaxOptions {
    /// Maximum number of iterations to run
    pub max_iterations: usize,
    /// Convergence threshold in world units - stop when the largest site
    /// displacement of an iteration falls below this value.
    /// Set to 0.0 to disable early termination
    pub convergence_threshold: f64,
}

impl Default for RelaxOptions {
    fn default() -> Self {
        Self {
            max_iterations: 3,
            // Early termination is off by default so a configuration's
            // iteration count alone pins down the final site layout.
            convergence_threshold: 0.0,
        }
    }
}

/// Apply Lloyd relaxation with the default convergence behavior
///
/// Runs exactly `iterations` passes (the early-exit threshold is disabled).
/// Each pass tessellates the current sites, moves every site to its region
/// centroid clamped into the bounds, and leaves sites of degenerate regions
/// where they are.
pub fn relax_sites(sites: Vec<DVec2>, bounds: &Bounds, iterations: usize) -> Vec<DVec2> {
    let options = RelaxOptions {
        max_iterations: iterations,
        ..Default::default()
    };
    relax_sites_with_options(sites, bounds, options)
}

/// Apply Lloyd relaxation with custom options
///
/// This variant allows convergence detection: once the largest displacement
/// of an iteration drops below `convergence_threshold`, remaining
/// iterations are skipped. Use [`relax_sites`] for the fixed-count
/// interface.
pub fn relax_sites_with_options(
    mut sites: Vec<DVec2>,
    bounds: &Bounds,
    options: RelaxOptions,
) -> Vec<DVec2> {
    let total_start = Instant::now();
    debug!(
        "relaxation start: {} sites, max {} iterations, threshold {:.4}",
        sites.len(),
        options.max_iterations,
        options.convergence_threshold
    );

    let mut iterations_run = 0;
    let mut converged = false;

    for iteration in 0..options.max_iterations {
        let iter_start = Instant::now();

        let regions = tessellate(&sites, bounds);
        let (new_sites, max_displacement) = recenter_sites(&regions, bounds);

        sites = new_sites;
        iterations_run = iteration + 1;

        debug!(
            "relaxation iter {}: took {:?}, max_disp={:.4}",
            iteration + 1,
            iter_start.elapsed(),
            max_displacement
        );

        if options.convergence_threshold > 0.0 && max_displacement < options.convergence_threshold {
            converged = true;
            debug!(
                "relaxation converged at iteration {} (max_disp {:.4} < threshold {:.4})",
                iteration + 1,
                max_displacement,
                options.convergence_threshold
            );
            break;
        }
    }

    debug!(
        "relaxation finished: {} iterations (of max {}), converged={}, total={:?}",
        iterations_run,
        options.max_iterations,
        converged,
        total_start.elapsed()
    );

    sites
}

/// Move each site to its region centroid and track the largest displacement
///
/// Regions come back from the tessellation in site order. Degenerate
/// regions (coincident sites) keep their previous position.
fn recenter_sites(
    regions: &[crate::generation::voronoi::Region],
    bounds: &Bounds,
) -> (Vec<DVec2>, f64) {
    let mut max_displacement: f64 = 0.0;

    let new_sites = regions
        .iter()
        .map(|region| {
            let new_site = match region.centroid() {
                Some(centroid) => bounds.clamp(centroid),
                None => region.site,
            };
            let displacement = region.site.distance(new_site);
            if displacement > max_displacement {
                max_displacement = displacement;
            }
            new_site
        })
        .collect();

    (new_sites, max_displacement)
}
