//! Plate Seed Point Scatter
//!
//! Generates the initial plate seed points by uniform scatter over the world
//! rectangle. The raw scatter is intentionally clumpy; Lloyd relaxation
//! evens it out afterwards while keeping the layout seed-determined.

use glam::DVec2;

use crate::geometry::Bounds;
use crate::rng::GenRng;

/// Scatter seed points uniformly over the world bounds
///
/// Each site consumes exactly two draws from the stream, x then y, in site
/// index order. Sites land in the half-open ranges `[min, max)` on both
/// axes.
///
/// # Example
///
/// ```rust
/// use hexplate::generation::scatter_sites;
/// use hexplate::geometry::Bounds;
/// use hexplate::rng::GenRng;
///
/// let bounds = Bounds::from_extent(20.0, 10.0);
/// let sites = scatter_sites(&mut GenRng::new(42), 12, &bounds);
/// assert_eq!(sites.len(), 12);
/// ```
pub fn scatter_sites(rng: &mut GenRng, count: usize, bounds: &Bounds) -> Vec<DVec2> {
    (0..count)
        .map(|_| {
            let x = bounds.min.x + rng.next_f64() * bounds.width();
            let y = bounds.min.y + rng.next_f64() * bounds.height();
            DVec2::new(x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scatter_count() {
        let bounds = Bounds::from_extent(10.0, 10.0);
        for count in [0, 1, 16, 200] {
            let sites = scatter_sites(&mut GenRng::new(42), count, &bounds);
            assert_eq!(sites.len(), count);
        }
    }

    #[test]
    fn test_scatter_stays_in_bounds() {
        let bounds = Bounds::new(DVec2::new(2.0, 3.0), DVec2::new(12.0, 7.0));
        let sites = scatter_sites(&mut GenRng::new(7), 500, &bounds);

        for site in &sites {
            assert!(site.x >= bounds.min.x && site.x < bounds.max.x);
            assert!(site.y >= bounds.min.y && site.y < bounds.max.y);
        }
    }

    #[test]
    fn test_scatter_determinism() {
        let bounds = Bounds::from_extent(30.0, 20.0);
        let first = scatter_sites(&mut GenRng::new(42), 50, &bounds);
        let second = scatter_sites(&mut GenRng::new(42), 50, &bounds);
        assert_eq!(first, second);
    }

    #[test]
    fn test_scatter_different_seeds() {
        let bounds = Bounds::from_extent(30.0, 20.0);
        let first = scatter_sites(&mut GenRng::new(1), 50, &bounds);
        let second = scatter_sites(&mut GenRng::new(2), 50, &bounds);
        assert_ne!(first, second);
    }

    #[test]
    fn test_scatter_draws_x_before_y() {
        let bounds = Bounds::from_extent(10.0, 10.0);
        let mut rng = GenRng::new(9);
        let draws: Vec<f64> = (0..4).map(|_| rng.next_f64()).collect();

        let sites = scatter_sites(&mut GenRng::new(9), 2, &bounds);
        assert_eq!(sites[0], DVec2::new(draws[0] * 10.0, draws[1] * 10.0));
        assert_eq!(sites[1], DVec2::new(draws[2] * 10.0, draws[3] * 10.0));
    }
}
