//! # Linear Extrusion
//!
//! Extrudes a 2D polygon (with holes) straight along +Z into a closed
//! solid. Caps are triangulated with ear clipping via `earcutr`, which
//! handles polygons with holes; side walls are quads along every ring,
//! outer and holes alike.

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use crate::polygon::Polygon2D;
use glam::{DVec2, DVec3};

/// Extrudes a 2D polygon along the Z axis from Z=0 to Z=height.
///
/// # Arguments
///
/// * `polygon` - The 2D polygon to extrude (holes allowed)
/// * `height` - Extrusion distance along Z (must be positive)
///
/// # Returns
///
/// A watertight, outward-wound 3D mesh.
///
/// # Example
///
/// ```rust
/// use braille_mesh::{linear_extrude, Polygon2D};
/// use glam::DVec2;
///
/// let sheet = Polygon2D::rectangle(DVec2::new(170.0, 125.0), false);
/// let mesh = linear_extrude(&sheet, 1.0).unwrap();
/// assert!(mesh.validate());
/// ```
pub fn linear_extrude(polygon: &Polygon2D, height: f64) -> MeshResult<Mesh> {
    if height <= 0.0 {
        return Err(MeshError::degenerate(
            "linear_extrude height must be positive",
        ));
    }
    if polygon.vertex_count() < 3 {
        return Err(MeshError::degenerate(
            "Polygon must have at least 3 vertices",
        ));
    }

    // Flatten outer + holes for earcutr: one coordinate array, with
    // hole start offsets measured in points
    let mut coords: Vec<f64> = Vec::new();
    let mut hole_indices: Vec<usize> = Vec::new();
    let mut points: Vec<DVec2> = Vec::new();

    for v in &polygon.outer {
        coords.push(v.x);
        coords.push(v.y);
        points.push(*v);
    }
    for hole in &polygon.holes {
        hole_indices.push(points.len());
        for v in hole {
            coords.push(v.x);
            coords.push(v.y);
            points.push(*v);
        }
    }

    let cap_indices = earcutr::earcut(&coords, &hole_indices, 2)
        .map_err(|e| MeshError::triangulation_failed(format!("{:?}", e)))?;
    if cap_indices.is_empty() {
        return Err(MeshError::triangulation_failed(
            "ear clipping produced no triangles",
        ));
    }

    let mut mesh = Mesh::with_capacity(points.len() * 4, cap_indices.len() + points.len() * 2);

    // Caps reference a shared vertex sheet per Z level
    let bottom_base = mesh.vertex_count() as u32;
    for p in &points {
        mesh.add_vertex(DVec3::new(p.x, p.y, 0.0));
    }
    let top_base = mesh.vertex_count() as u32;
    for p in &points {
        mesh.add_vertex(DVec3::new(p.x, p.y, height));
    }

    for tri in cap_indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as u32, tri[1] as u32, tri[2] as u32);
        // Normalize to counter-clockwise in the XY plane
        let ab = points[tri[1]] - points[tri[0]];
        let ac = points[tri[2]] - points[tri[0]];
        let (a, b, c) = if ab.perp_dot(ac) >= 0.0 {
            (a, b, c)
        } else {
            (a, c, b)
        };

        // Top cap faces up, bottom cap reversed
        mesh.add_triangle(top_base + a, top_base + b, top_base + c);
        mesh.add_triangle(bottom_base + a, bottom_base + c, bottom_base + b);
    }

    // Side walls: one quad strip per ring. The outer ring is CCW so
    // this winding faces outward; hole rings are CW so the same
    // winding faces into the hole cavity, away from the material.
    let mut add_walls = |ring: &[DVec2], mesh: &mut Mesh| {
        let base = mesh.vertex_count() as u32;
        for v in ring {
            mesh.add_vertex(DVec3::new(v.x, v.y, 0.0));
        }
        let top = mesh.vertex_count() as u32;
        for v in ring {
            mesh.add_vertex(DVec3::new(v.x, v.y, height));
        }
        let n = ring.len() as u32;
        for i in 0..n {
            let j = (i + 1) % n;
            mesh.add_triangle(base + i, base + j, top + i);
            mesh.add_triangle(base + j, top + j, top + i);
        }
    };

    add_walls(&polygon.outer, &mut mesh);
    for hole in &polygon.holes {
        add_walls(hole, &mut mesh);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repair::is_watertight;
    use approx::assert_relative_eq;

    fn punched_sheet() -> Polygon2D {
        let mut sheet = Polygon2D::rectangle(DVec2::new(10.0, 10.0), false);
        sheet
            .punch_holes(vec![vec![
                DVec2::new(4.0, 4.0),
                DVec2::new(6.0, 4.0),
                DVec2::new(6.0, 6.0),
                DVec2::new(4.0, 6.0),
            ]])
            .unwrap();
        sheet
    }

    #[test]
    fn test_extrude_rectangle_volume() {
        let rect = Polygon2D::rectangle(DVec2::new(4.0, 3.0), false);
        let mesh = linear_extrude(&rect, 2.0).unwrap();
        assert!(is_watertight(&mesh));
        assert_relative_eq!(mesh.signed_volume(), 24.0, epsilon = 1e-9);
    }

    #[test]
    fn test_extrude_circle_volume() {
        let circle = Polygon2D::circle(1.0, 64);
        let mesh = linear_extrude(&circle, 2.0).unwrap();
        assert!(is_watertight(&mesh));
        assert_relative_eq!(mesh.signed_volume(), circle.area() * 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_extrude_with_hole_volume() {
        let sheet = punched_sheet();
        let mesh = linear_extrude(&sheet, 1.0).unwrap();
        assert!(is_watertight(&mesh));
        // 100 - 4 area, height 1
        assert_relative_eq!(mesh.signed_volume(), 96.0, epsilon = 1e-9);
    }

    #[test]
    fn test_extrude_with_hole_validates() {
        let mesh = linear_extrude(&punched_sheet(), 1.0).unwrap();
        assert!(mesh.validate());
        assert!(mesh.is_finite());
    }

    #[test]
    fn test_extrude_invalid_height() {
        let rect = Polygon2D::rectangle(DVec2::new(4.0, 3.0), false);
        assert!(linear_extrude(&rect, 0.0).is_err());
        assert!(linear_extrude(&rect, -1.0).is_err());
    }

    #[test]
    fn test_extrude_degenerate_polygon() {
        let line = Polygon2D::new(vec![DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0)]);
        assert!(linear_extrude(&line, 1.0).is_err());
    }
}
