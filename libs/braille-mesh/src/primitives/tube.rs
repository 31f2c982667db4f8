//! # Tube Primitive
//!
//! Generates hollow cylinder shells directly, without booleans. The
//! cylinder plate variants start from a tube rather than subtracting
//! one cylinder from another.

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use glam::DVec3;

/// Creates a hollow cylinder (tube) along +Z with its base at Z=0.
///
/// # Arguments
///
/// * `height` - Height along Z
/// * `outer_radius` - Outer wall radius
/// * `inner_radius` - Inner wall radius (0 < inner < outer)
/// * `segments` - Number of radial segments (minimum 3)
///
/// # Example
///
/// ```rust
/// use braille_mesh::primitives::create_tube;
///
/// let shell = create_tube(125.0, 30.0, 28.0, 64).unwrap();
/// assert!(shell.validate());
/// ```
pub fn create_tube(
    height: f64,
    outer_radius: f64,
    inner_radius: f64,
    segments: u32,
) -> MeshResult<Mesh> {
    if height <= 0.0 {
        return Err(MeshError::degenerate("Tube height must be positive"));
    }
    if inner_radius <= 0.0 || inner_radius >= outer_radius {
        return Err(MeshError::degenerate(format!(
            "Tube requires 0 < inner < outer: inner={}, outer={}",
            inner_radius, outer_radius
        )));
    }

    let segments = segments.max(3);
    let step_angle = std::f64::consts::TAU / segments as f64;

    let mut mesh = Mesh::with_capacity((segments as usize) * 4, (segments as usize) * 8);

    let create_ring = |r: f64, z: f64, mesh: &mut Mesh| {
        let start = mesh.vertex_count() as u32;
        for i in 0..segments {
            let theta = i as f64 * step_angle;
            let (sin, cos) = theta.sin_cos();
            mesh.add_vertex(DVec3::new(r * cos, r * sin, z));
        }
        start
    };

    let outer_bottom = create_ring(outer_radius, 0.0, &mut mesh);
    let outer_top = create_ring(outer_radius, height, &mut mesh);
    let inner_bottom = create_ring(inner_radius, 0.0, &mut mesh);
    let inner_top = create_ring(inner_radius, height, &mut mesh);

    for i in 0..segments {
        let j = (i + 1) % segments;

        // Outer wall, normal away from the axis
        mesh.add_triangle(outer_bottom + i, outer_bottom + j, outer_top + i);
        mesh.add_triangle(outer_bottom + j, outer_top + j, outer_top + i);

        // Inner wall, normal toward the axis
        mesh.add_triangle(inner_top + i, inner_bottom + j, inner_bottom + i);
        mesh.add_triangle(inner_top + i, inner_top + j, inner_bottom + j);

        // Top annulus, normal up
        mesh.add_triangle(outer_top + i, outer_top + j, inner_top + j);
        mesh.add_triangle(outer_top + i, inner_top + j, inner_top + i);

        // Bottom annulus, normal down
        mesh.add_triangle(outer_bottom + j, outer_bottom + i, inner_bottom + i);
        mesh.add_triangle(outer_bottom + j, inner_bottom + i, inner_bottom + j);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repair::is_watertight;
    use approx::assert_relative_eq;

    #[test]
    fn test_tube_is_watertight() {
        let mesh = create_tube(10.0, 5.0, 4.0, 32).unwrap();
        assert!(is_watertight(&mesh));
        assert!(mesh.validate());
    }

    #[test]
    fn test_tube_volume_is_annulus_prism() {
        let segments = 64;
        let mesh = create_tube(2.0, 3.0, 2.0, segments).unwrap();
        let step = std::f64::consts::TAU / segments as f64;
        // Inscribed polygon areas for both walls
        let polygon_area = |r: f64| 0.5 * segments as f64 * r * r * step.sin();
        let expected = (polygon_area(3.0) - polygon_area(2.0)) * 2.0;
        assert_relative_eq!(mesh.signed_volume(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_tube_bounding_box() {
        let mesh = create_tube(10.0, 5.0, 4.0, 32).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_relative_eq!(min.z, 0.0);
        assert_relative_eq!(max.z, 10.0);
        assert_relative_eq!(max.x, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tube_invalid_radii() {
        assert!(create_tube(10.0, 5.0, 5.0, 32).is_err());
        assert!(create_tube(10.0, 5.0, 6.0, 32).is_err());
        assert!(create_tube(10.0, 5.0, 0.0, 32).is_err());
    }
}
