//! # 2D Polygons
//!
//! Closed 2D shapes with optional holes, used by the plate assembler's
//! 2D-first marker technique: the top sheet of a plate is a rectangle
//! with marker outlines punched out, then extruded.

use crate::error::{MeshError, MeshResult};
use glam::DVec2;

/// A 2D polygon for extrusion operations.
///
/// The outer boundary is stored in counter-clockwise order, holes in
/// clockwise order. [`Polygon2D::punch_holes`] normalizes orientation
/// on insertion.
#[derive(Debug, Clone)]
pub struct Polygon2D {
    /// Outer boundary vertices in counter-clockwise order
    pub outer: Vec<DVec2>,
    /// Holes, each in clockwise order
    pub holes: Vec<Vec<DVec2>>,
}

/// Signed area of a closed ring (positive for counter-clockwise).
pub(crate) fn ring_signed_area(ring: &[DVec2]) -> f64 {
    let mut area = 0.0;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        area += a.x * b.y - b.x * a.y;
    }
    area / 2.0
}

/// Even-odd ray-cast point-in-ring test.
pub(crate) fn point_in_ring(point: DVec2, ring: &[DVec2]) -> bool {
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn ring_bounds(ring: &[DVec2]) -> (DVec2, DVec2) {
    let mut min = ring[0];
    let mut max = ring[0];
    for v in &ring[1..] {
        min = min.min(*v);
        max = max.max(*v);
    }
    (min, max)
}

fn bounds_overlap(a: (DVec2, DVec2), b: (DVec2, DVec2)) -> bool {
    a.0.x <= b.1.x && b.0.x <= a.1.x && a.0.y <= b.1.y && b.0.y <= a.1.y
}

impl Polygon2D {
    /// Creates a new polygon from outer boundary vertices.
    ///
    /// Vertices are normalized to counter-clockwise order.
    pub fn new(outer: Vec<DVec2>) -> Self {
        let mut outer = outer;
        if ring_signed_area(&outer) < 0.0 {
            outer.reverse();
        }
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Creates an axis-aligned rectangle.
    ///
    /// # Arguments
    ///
    /// * `size` - Width and height
    /// * `center` - If true, center at origin
    pub fn rectangle(size: DVec2, center: bool) -> Self {
        let (x, y) = if center {
            (-size.x / 2.0, -size.y / 2.0)
        } else {
            (0.0, 0.0)
        };

        Self::new(vec![
            DVec2::new(x, y),
            DVec2::new(x + size.x, y),
            DVec2::new(x + size.x, y + size.y),
            DVec2::new(x, y + size.y),
        ])
    }

    /// Creates a circle polygon.
    ///
    /// # Arguments
    ///
    /// * `radius` - Circle radius
    /// * `segments` - Number of segments (minimum 3)
    pub fn circle(radius: f64, segments: u32) -> Self {
        let segments = segments.max(3);
        let mut vertices = Vec::with_capacity(segments as usize);
        for i in 0..segments {
            let angle = std::f64::consts::TAU * (i as f64) / (segments as f64);
            vertices.push(DVec2::new(radius * angle.cos(), radius * angle.sin()));
        }
        Self::new(vertices)
    }

    /// Returns the number of vertices in the outer boundary.
    pub fn vertex_count(&self) -> usize {
        self.outer.len()
    }

    /// Returns true if the polygon has holes.
    pub fn has_holes(&self) -> bool {
        !self.holes.is_empty()
    }

    /// Translates the polygon (outer and holes) by the given offset.
    pub fn translate(&mut self, offset: DVec2) {
        for v in &mut self.outer {
            *v += offset;
        }
        for hole in &mut self.holes {
            for v in hole {
                *v += offset;
            }
        }
    }

    /// Area enclosed by the outer boundary minus the holes.
    pub fn area(&self) -> f64 {
        let mut area = ring_signed_area(&self.outer).abs();
        for hole in &self.holes {
            area -= ring_signed_area(hole).abs();
        }
        area
    }

    /// Returns true if the point lies inside the outer boundary and
    /// outside every hole.
    pub fn contains_point(&self, point: DVec2) -> bool {
        if !point_in_ring(point, &self.outer) {
            return false;
        }
        !self.holes.iter().any(|hole| point_in_ring(point, hole))
    }

    /// Punches hole outlines out of the polygon.
    ///
    /// Each hole must lie strictly inside the outer boundary and must
    /// not touch existing holes. On any violation no hole is added and
    /// an error is returned, so callers can fall back to solid-based
    /// subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidPolygon`] if a hole has fewer than 3
    /// vertices, escapes the outer boundary, or collides with another
    /// hole.
    pub fn punch_holes(&mut self, holes: Vec<Vec<DVec2>>) -> MeshResult<()> {
        let mut accepted: Vec<Vec<DVec2>> = Vec::with_capacity(holes.len());

        for hole in holes {
            if hole.len() < 3 {
                return Err(MeshError::invalid_polygon(
                    "hole must have at least 3 vertices",
                ));
            }
            if hole.iter().any(|v| !point_in_ring(*v, &self.outer)) {
                return Err(MeshError::invalid_polygon(
                    "hole extends outside the outer boundary",
                ));
            }

            let bounds = ring_bounds(&hole);
            for existing in self.holes.iter().chain(accepted.iter()) {
                if bounds_overlap(bounds, ring_bounds(existing)) {
                    return Err(MeshError::invalid_polygon("holes overlap"));
                }
            }

            // Holes are stored clockwise
            let mut hole = hole;
            if ring_signed_area(&hole) > 0.0 {
                hole.reverse();
            }
            accepted.push(hole);
        }

        self.holes.append(&mut accepted);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_hole(center: DVec2, half: f64) -> Vec<DVec2> {
        vec![
            DVec2::new(center.x - half, center.y - half),
            DVec2::new(center.x + half, center.y - half),
            DVec2::new(center.x + half, center.y + half),
            DVec2::new(center.x - half, center.y + half),
        ]
    }

    #[test]
    fn test_new_normalizes_to_ccw() {
        let cw = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 0.0),
        ];
        let polygon = Polygon2D::new(cw);
        assert!(ring_signed_area(&polygon.outer) > 0.0);
    }

    #[test]
    fn test_rectangle_area() {
        let rect = Polygon2D::rectangle(DVec2::new(4.0, 3.0), false);
        assert_relative_eq!(rect.area(), 12.0);
    }

    #[test]
    fn test_circle_area_approaches_analytic() {
        let circle = Polygon2D::circle(1.0, 128);
        let analytic = std::f64::consts::PI;
        assert!(circle.area() < analytic);
        assert!(circle.area() > analytic * 0.99);
    }

    #[test]
    fn test_contains_point() {
        let rect = Polygon2D::rectangle(DVec2::new(10.0, 10.0), false);
        assert!(rect.contains_point(DVec2::new(5.0, 5.0)));
        assert!(!rect.contains_point(DVec2::new(15.0, 5.0)));
        assert!(!rect.contains_point(DVec2::new(-1.0, -1.0)));
    }

    #[test]
    fn test_punch_hole_reduces_area() {
        let mut rect = Polygon2D::rectangle(DVec2::new(10.0, 10.0), false);
        rect.punch_holes(vec![square_hole(DVec2::new(5.0, 5.0), 1.0)])
            .unwrap();
        assert_relative_eq!(rect.area(), 100.0 - 4.0);
        assert!(!rect.contains_point(DVec2::new(5.0, 5.0)));
        assert!(rect.contains_point(DVec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_punch_hole_orientation_is_cw() {
        let mut rect = Polygon2D::rectangle(DVec2::new(10.0, 10.0), false);
        rect.punch_holes(vec![square_hole(DVec2::new(5.0, 5.0), 1.0)])
            .unwrap();
        assert!(ring_signed_area(&rect.holes[0]) < 0.0);
    }

    #[test]
    fn test_punch_hole_outside_rejected() {
        let mut rect = Polygon2D::rectangle(DVec2::new(10.0, 10.0), false);
        let result = rect.punch_holes(vec![square_hole(DVec2::new(11.0, 5.0), 1.0)]);
        assert!(result.is_err());
        assert!(!rect.has_holes());
    }

    #[test]
    fn test_punch_overlapping_holes_rejected() {
        let mut rect = Polygon2D::rectangle(DVec2::new(10.0, 10.0), false);
        let result = rect.punch_holes(vec![
            square_hole(DVec2::new(4.0, 5.0), 1.0),
            square_hole(DVec2::new(5.0, 5.0), 1.0),
        ]);
        assert!(result.is_err());
        // All-or-nothing: no partial hole set
        assert!(!rect.has_holes());
    }

    #[test]
    fn test_punch_degenerate_hole_rejected() {
        let mut rect = Polygon2D::rectangle(DVec2::new(10.0, 10.0), false);
        let result = rect.punch_holes(vec![vec![DVec2::new(5.0, 5.0), DVec2::new(6.0, 5.0)]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_translate_moves_holes() {
        let mut rect = Polygon2D::rectangle(DVec2::new(10.0, 10.0), false);
        rect.punch_holes(vec![square_hole(DVec2::new(5.0, 5.0), 1.0)])
            .unwrap();
        rect.translate(DVec2::new(100.0, 0.0));
        assert!(!rect.contains_point(DVec2::new(105.0, 5.0)));
        assert!(rect.contains_point(DVec2::new(101.0, 1.0)));
    }
}
