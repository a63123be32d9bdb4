//! Spatial indexing for fast position-to-region lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use glam::DVec2;
#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;

/// Wrapper around KD-tree for spatial queries
///
/// Provides O(log n) nearest-neighbor lookups to convert world positions
/// into region IDs, for pathing, cursor picking, and placement queries on
/// top of a generated map.
///
/// Exact distance ties may resolve to either site here; the generator
/// itself resolves tile ownership by insertion order, independent of this
/// index.
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build spatial index from region sites
    ///
    /// Creates an immutable KD-tree from the provided site positions.
    /// This is called once during map generation.
    ///
    /// # Example
    ///
    /// ```
    /// use hexplate::*;
    /// use glam::DVec2;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let sites = vec![
    ///     DVec2::new(1.0, 0.0),
    ///     DVec2::new(0.0, 1.0),
    ///     DVec2::new(5.0, 5.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&sites);
    /// let region_id = index.find_nearest(DVec2::new(1.1, 0.1));
    /// assert_eq!(region_id, 0); // Closest to first site
    /// # }
    /// ```
    pub fn new(sites: &[DVec2]) -> Self {
        // Convert DVec2 to [f64; 2] array format for kiddo
        let points: Vec<[f64; 2]> = sites.iter().map(|s| [s.x, s.y]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Find the nearest region to a position
    ///
    /// # Returns
    ///
    /// Region ID (index) of the nearest site
    ///
    /// # Example
    ///
    /// ```
    /// # use hexplate::*;
    /// # use glam::DVec2;
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// # let sites = vec![DVec2::new(1.0, 0.0), DVec2::new(0.0, 4.0)];
    /// # let index = SpatialIndex::new(&sites);
    /// let region_id = index.find_nearest(DVec2::new(0.9, 0.1));
    /// // region_id is the index of the closest site
    /// # }
    /// ```
    pub fn find_nearest(&self, position: DVec2) -> usize {
        let query = [position.x, position.y];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}
