//! Bounded Voronoi tessellation over a rectangular world
//!
//! Constructs each region by clipping the world rectangle against the
//! perpendicular-bisector half-plane of every other site. Clipping a convex
//! polygon against half-planes stays convex, so regions come out as convex
//! counter-clockwise loops.

use glam::DVec2;

use crate::geometry::Bounds;

/// Sites closer than this (squared) are treated as coincident.
const COINCIDENT_EPSILON: f64 = 1e-18;

/// A Voronoi region: the set of points closer to its site than to any other
///
/// Vertices are ordered counter-clockwise. A region degenerates to an empty
/// vertex list when its site coincides with an earlier one.
#[derive(Debug, Clone)]
pub struct Region {
    /// Unique region identifier (the site's insertion index)
    pub id: usize,
    /// Seed point in world space
    pub site: DVec2,
    /// Vertices defining the region boundary (ordered counter-clockwise)
    pub vertices: Vec<DVec2>,
}

impl Region {
    /// Area of the region polygon.
    pub fn area(&self) -> f64 {
        crate::geometry::polygon_signed_area(&self.vertices).abs()
    }

    /// Area-weighted centroid, or `None` for a degenerate region.
    pub fn centroid(&self) -> Option<DVec2> {
        crate::geometry::polygon_centroid(&self.vertices)
    }

    /// Whether the region has collapsed to (near) nothing.
    pub fn is_degenerate(&self) -> bool {
        self.centroid().is_none()
    }

    /// Whether a point lies inside the region polygon.
    ///
    /// Boundary points are inside; points on a shared edge test inside for
    /// both adjacent regions. Ownership ties are broken by
    /// [`nearest_region`], not by containment.
    pub fn contains(&self, point: DVec2) -> bool {
        crate::geometry::point_in_convex_polygon(point, &self.vertices)
    }
}

/// Partition the bounded world among the given sites
///
/// Pure function of its inputs: no randomness, and the same sites in the
/// same order always produce identical regions. Region `id`s equal the site
/// indices. Coincident sites resolve by insertion order; the earlier site
/// keeps the territory and the later region comes back empty.
pub fn tessellate(sites: &[DVec2], bounds: &Bounds) -> Vec<Region> {
    sites
        .iter()
        .enumerate()
        .map(|(id, &site)| {
            let mut vertices: Vec<DVec2> = bounds.corners().to_vec();
            for (other_id, &other) in sites.iter().enumerate() {
                if other_id == id {
                    continue;
                }
                if vertices.is_empty() {
                    break;
                }
                if (other - site).length_squared() < COINCIDENT_EPSILON {
                    // coincident pair: earlier insertion wins
                    if other_id < id {
                        vertices.clear();
                    }
                    continue;
                }
                vertices = clip_half_plane(&vertices, site, other);
            }
            Region { id, site, vertices }
        })
        .collect()
}

/// Find the region owning a point: nearest site by Euclidean distance
///
/// Distance ties resolve to the lowest region id (insertion order), so
/// ownership is total and deterministic. `regions` must be non-empty.
pub fn nearest_region(regions: &[Region], point: DVec2) -> usize {
    debug_assert!(!regions.is_empty(), "nearest_region on empty region set");
    let mut best_id = 0;
    let mut best_distance = f64::INFINITY;
    for region in regions {
        let distance = region.site.distance_squared(point);
        if distance < best_distance {
            best_distance = distance;
            best_id = region.id;
        }
    }
    best_id
}

/// Clip a convex polygon to the half-plane of points closer to `site` than
/// to `other` (Sutherland-Hodgman against the perpendicular bisector).
fn clip_half_plane(polygon: &[DVec2], site: DVec2, other: DVec2) -> Vec<DVec2> {
    let midpoint = (site + other) * 0.5;
    let direction = other - site;

    let mut clipped = Vec::with_capacity(polygon.len() + 1);
    for i in 0..polygon.len() {
        let current = polygon[i];
        let next = polygon[(i + 1) % polygon.len()];
        // negative side of the bisector is the site's side
        let current_side = (current - midpoint).dot(direction);
        let next_side = (next - midpoint).dot(direction);
        let current_inside = current_side <= 0.0;
        let next_inside = next_side <= 0.0;

        if current_inside {
            clipped.push(current);
        }
        if current_inside != next_inside {
            let t = current_side / (current_side - next_side);
            clipped.push(current + (next - current) * t);
        }
    }
    clipped
}
