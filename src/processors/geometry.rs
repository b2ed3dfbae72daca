//! Geometric helpers for annotation polygons.
//!
//! Polygons are plain vertex slices; nothing here validates
//! well-formedness. Self-intersecting and degenerate polygons are accepted,
//! and a 1-point "polygon" produces a zero-area box and a centroid equal to
//! that point.

use imageproc::rect::Rect;
use itertools::Itertools;

/// Arithmetic mean of the vertex coordinates, per axis.
///
/// Returns `None` for an empty polygon.
pub fn centroid(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.0, sy + p.1));
    Some((sum_x / n, sum_y / n))
}

/// Sum of absolute coordinate differences, the linking distance metric.
pub fn manhattan_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

/// Axis-aligned bounding box of a polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRect {
    /// Minimum x-coordinate over all vertices.
    pub x_min: f64,
    /// Minimum y-coordinate over all vertices.
    pub y_min: f64,
    /// Maximum x-coordinate over all vertices.
    pub x_max: f64,
    /// Maximum y-coordinate over all vertices.
    pub y_max: f64,
}

impl BoundingRect {
    /// Component-wise min/max over all vertices.
    ///
    /// Returns `None` for an empty polygon.
    pub fn from_points(points: &[(f64, f64)]) -> Option<Self> {
        let (x_min, x_max) = points.iter().map(|p| p.0).minmax().into_option()?;
        let (y_min, y_max) = points.iter().map(|p| p.1).minmax().into_option()?;
        Some(Self {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Width of the box.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the box.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Converts to an integer pixel rectangle for drawing.
    ///
    /// Returns `None` when either dimension rounds to zero.
    pub fn to_pixel_rect(&self) -> Option<Rect> {
        let width = self.width().max(0.0).round() as u32;
        let height = self.height().max(0.0).round() as u32;
        (width > 0 && height > 0)
            .then(|| Rect::at(self.x_min as i32, self.y_min as i32).of_size(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centroid_is_mean_of_vertices() {
        let points = vec![(0.0, 0.0), (10.0, 0.0), (10.0, 20.0), (0.0, 20.0)];
        assert_eq!(centroid(&points), Some((5.0, 10.0)));
    }

    #[test]
    fn test_centroid_of_single_point_is_that_point() {
        assert_eq!(centroid(&[(7.5, 3.25)]), Some((7.5, 3.25)));
    }

    #[test]
    fn test_centroid_of_empty_polygon_is_none() {
        assert_eq!(centroid(&[]), None);
    }

    #[test]
    fn test_bounding_rect_min_max() {
        let points = vec![(3.0, 8.0), (1.0, 12.0), (5.0, 10.0)];
        let rect = BoundingRect::from_points(&points).unwrap();
        assert_eq!(rect.x_min, 1.0);
        assert_eq!(rect.y_min, 8.0);
        assert_eq!(rect.x_max, 5.0);
        assert_eq!(rect.y_max, 12.0);
    }

    #[test]
    fn test_single_point_gives_zero_area_box() {
        let rect = BoundingRect::from_points(&[(4.0, 6.0)]).unwrap();
        assert_eq!(rect.width(), 0.0);
        assert_eq!(rect.height(), 0.0);
        assert!(rect.to_pixel_rect().is_none());
    }

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(manhattan_distance((0.0, 0.0), (3.0, 4.0)), 7.0);
        assert_eq!(manhattan_distance((3.0, 4.0), (0.0, 0.0)), 7.0);
        assert_eq!(manhattan_distance((1.0, 1.0), (1.0, 1.0)), 0.0);
    }
}
