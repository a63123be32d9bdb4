//! Planar geometry helpers shared by tessellation, relaxation, and plates.

use glam::DVec2;

/// Polygons whose absolute area falls below this are treated as degenerate.
pub const AREA_EPSILON: f64 = 1e-12;

/// Axis-aligned rectangle bounding the world in continuous space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Rectangle spanning `[0, width] x [0, height]`.
    pub fn from_extent(width: f64, height: f64) -> Self {
        Self::new(DVec2::ZERO, DVec2::new(width, height))
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Clamps a point into the rectangle, componentwise.
    pub fn clamp(&self, point: DVec2) -> DVec2 {
        point.clamp(self.min, self.max)
    }

    /// Corner loop in counter-clockwise order, starting at `min`.
    pub fn corners(&self) -> [DVec2; 4] {
        [
            self.min,
            DVec2::new(self.max.x, self.min.y),
            self.max,
            DVec2::new(self.min.x, self.max.y),
        ]
    }

    /// Distance from an interior point to the nearest rectangle edge.
    ///
    /// Negative for points outside the rectangle.
    pub fn edge_distance(&self, point: DVec2) -> f64 {
        let left = point.x - self.min.x;
        let right = self.max.x - point.x;
        let bottom = point.y - self.min.y;
        let top = self.max.y - point.y;
        left.min(right).min(bottom).min(top)
    }
}

/// Signed area of a simple polygon (shoelace formula).
///
/// Positive for counter-clockwise vertex order.
pub fn polygon_signed_area(vertices: &[DVec2]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum * 0.5
}

/// Area-weighted centroid of a simple polygon.
///
/// Returns `None` for degenerate input: fewer than three vertices or an
/// area below [`AREA_EPSILON`].
pub fn polygon_centroid(vertices: &[DVec2]) -> Option<DVec2> {
    if vertices.len() < 3 {
        return None;
    }
    let area = polygon_signed_area(vertices);
    if area.abs() < AREA_EPSILON {
        return None;
    }
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        let cross = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    let scale = 1.0 / (6.0 * area);
    Some(DVec2::new(cx * scale, cy * scale))
}

/// Whether a point lies inside (or on the boundary of) a convex polygon.
pub fn point_in_convex_polygon(point: DVec2, vertices: &[DVec2]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut sign = 0.0_f64;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        let cross = (b - a).perp_dot(point - a);
        if cross.abs() < 1e-9 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn square_area_and_centroid() {
        let square = unit_square();
        assert!((polygon_signed_area(&square) - 1.0).abs() < 1e-12);
        let centroid = polygon_centroid(&square).unwrap();
        assert!((centroid.x - 0.5).abs() < 1e-12);
        assert!((centroid.y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn clockwise_square_has_negative_area() {
        let mut square = unit_square();
        square.reverse();
        assert!((polygon_signed_area(&square) + 1.0).abs() < 1e-12);
        // centroid is orientation-independent
        let centroid = polygon_centroid(&square).unwrap();
        assert!((centroid.x - 0.5).abs() < 1e-12);
    }

    #[test]
    fn triangle_centroid_is_vertex_mean() {
        let tri = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(3.0, 0.0),
            DVec2::new(0.0, 3.0),
        ];
        let centroid = polygon_centroid(&tri).unwrap();
        assert!((centroid.x - 1.0).abs() < 1e-12);
        assert!((centroid.y - 1.0).abs() < 1e-12);
        assert!((polygon_signed_area(&tri) - 4.5).abs() < 1e-12);
    }

    #[test]
    fn degenerate_polygons_have_no_centroid() {
        assert!(polygon_centroid(&[]).is_none());
        assert!(polygon_centroid(&[DVec2::ZERO, DVec2::ONE]).is_none());
        let collinear = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(2.0, 2.0),
        ];
        assert!(polygon_centroid(&collinear).is_none());
    }

    #[test]
    fn bounds_measures() {
        let bounds = Bounds::from_extent(8.0, 4.0);
        assert_eq!(bounds.width(), 8.0);
        assert_eq!(bounds.height(), 4.0);
        assert_eq!(bounds.area(), 32.0);
        assert_eq!(bounds.center(), DVec2::new(4.0, 2.0));
    }

    #[test]
    fn bounds_clamp_and_contains() {
        let bounds = Bounds::from_extent(2.0, 2.0);
        assert!(bounds.contains(DVec2::new(1.0, 1.0)));
        assert!(bounds.contains(DVec2::new(0.0, 2.0)));
        assert!(!bounds.contains(DVec2::new(-0.1, 1.0)));
        let clamped = bounds.clamp(DVec2::new(5.0, -3.0));
        assert_eq!(clamped, DVec2::new(2.0, 0.0));
    }

    #[test]
    fn edge_distance_picks_nearest_wall() {
        let bounds = Bounds::from_extent(10.0, 6.0);
        assert!((bounds.edge_distance(DVec2::new(5.0, 3.0)) - 3.0).abs() < 1e-12);
        assert!((bounds.edge_distance(DVec2::new(1.0, 3.0)) - 1.0).abs() < 1e-12);
        assert!((bounds.edge_distance(DVec2::new(9.5, 5.0)) - 0.5).abs() < 1e-12);
        assert!(bounds.edge_distance(DVec2::new(-1.0, 3.0)) < 0.0);
    }

    #[test]
    fn convex_containment() {
        let square = unit_square();
        assert!(point_in_convex_polygon(DVec2::new(0.5, 0.5), &square));
        assert!(point_in_convex_polygon(DVec2::new(0.0, 0.5), &square));
        assert!(!point_in_convex_polygon(DVec2::new(1.5, 0.5), &square));
        assert!(!point_in_convex_polygon(DVec2::new(0.5, -0.2), &square));
    }
}
