//! # Frustum Primitive
//!
//! Generates truncated cones (and full cones) along +Z. Frustums are the
//! workhorse of the plate assembler: cone-style braille dots, the body of
//! rounded dots, and cone recess cutters are all frustums.

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use glam::DVec3;

/// Creates a frustum (truncated cone) mesh, or a cone when one radius
/// is zero.
///
/// # Arguments
///
/// * `height` - Height along Z
/// * `radius_bottom` - Radius at Z=0 (or bottom if centered)
/// * `radius_top` - Radius at Z=height (or top if centered)
/// * `center` - Whether to center along Z
/// * `segments` - Number of radial segments (minimum 3)
///
/// # Example
///
/// ```rust
/// use braille_mesh::primitives::create_frustum;
///
/// // Cone-style braille dot: wide base, narrow flat hat
/// let dot = create_frustum(0.9, 0.8, 0.25, false, 16).unwrap();
/// assert!(dot.validate());
/// ```
pub fn create_frustum(
    height: f64,
    radius_bottom: f64,
    radius_top: f64,
    center: bool,
    segments: u32,
) -> MeshResult<Mesh> {
    if height <= 0.0 {
        return Err(MeshError::degenerate("Frustum height must be positive"));
    }
    if radius_bottom < 0.0 || radius_top < 0.0 {
        return Err(MeshError::degenerate("Frustum radii must be non-negative"));
    }
    if radius_bottom == 0.0 && radius_top == 0.0 {
        return Err(MeshError::degenerate(
            "Frustum cannot have both radii zero",
        ));
    }

    let segments = segments.max(3);
    let z_offset = if center { -height / 2.0 } else { 0.0 };
    let step_angle = std::f64::consts::TAU / segments as f64;

    let mut mesh = Mesh::with_capacity((segments as usize) * 2 + 2, (segments as usize) * 4);

    // Helper to create ring vertices, returns start index
    let create_ring = |r: f64, z: f64, mesh: &mut Mesh| {
        let start = mesh.vertex_count() as u32;
        for i in 0..segments {
            let theta = i as f64 * step_angle;
            let (sin, cos) = theta.sin_cos();
            mesh.add_vertex(DVec3::new(r * cos, r * sin, z));
        }
        start
    };

    if radius_bottom > 0.0 && radius_top > 0.0 {
        // Frustum: two rings, side quads, two cap fans
        let bottom = create_ring(radius_bottom, z_offset, &mut mesh);
        let top = create_ring(radius_top, z_offset + height, &mut mesh);

        for i in 0..segments {
            let j = (i + 1) % segments;
            mesh.add_triangle(bottom + i, bottom + j, top + i);
            mesh.add_triangle(bottom + j, top + j, top + i);
        }

        // Bottom cap (downward normal)
        for i in 1..segments - 1 {
            mesh.add_triangle(bottom, bottom + i + 1, bottom + i);
        }

        // Top cap (upward normal)
        for i in 1..segments - 1 {
            mesh.add_triangle(top, top + i, top + i + 1);
        }
    } else if radius_top == 0.0 {
        // Cone with apex at top
        let bottom = create_ring(radius_bottom, z_offset, &mut mesh);
        let apex = mesh.add_vertex(DVec3::new(0.0, 0.0, z_offset + height));

        for i in 0..segments {
            let j = (i + 1) % segments;
            mesh.add_triangle(bottom + i, bottom + j, apex);
        }

        for i in 1..segments - 1 {
            mesh.add_triangle(bottom, bottom + i + 1, bottom + i);
        }
    } else {
        // Cone with apex at bottom
        let apex = mesh.add_vertex(DVec3::new(0.0, 0.0, z_offset));
        let top = create_ring(radius_top, z_offset + height, &mut mesh);

        for i in 0..segments {
            let j = (i + 1) % segments;
            mesh.add_triangle(top + j, top + i, apex);
        }

        for i in 1..segments - 1 {
            mesh.add_triangle(top, top + i, top + i + 1);
        }
    }

    Ok(mesh)
}
