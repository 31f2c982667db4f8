//! # Sphere Primitives
//!
//! Latitude/longitude tessellated spheres and spherical caps. Spheres
//! serve as hemisphere and bowl recess cutters; spherical caps form the
//! dome of rounded braille dots.

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use glam::DVec3;

/// Minimum number of latitude rings for a full sphere.
const MIN_RINGS: u32 = 2;

/// Creates a sphere centered at the origin.
///
/// Apex and nadir are real vertices with fans to the first and last
/// latitude rings, so the mesh spans the full `[-radius, radius]`
/// extent on every axis. Recess cutters rely on that: a pole-less
/// sphere would cut measurably shallower than configured. The mesh is
/// watertight and outward-wound.
///
/// # Arguments
///
/// * `radius` - Sphere radius (must be positive)
/// * `segments` - Longitudinal fragment count (minimum 3)
///
/// # Example
///
/// ```rust
/// use braille_mesh::primitives::create_sphere;
///
/// let mesh = create_sphere(0.85, 16).unwrap();
/// assert!(mesh.validate());
/// ```
pub fn create_sphere(radius: f64, segments: u32) -> MeshResult<Mesh> {
    if radius <= 0.0 {
        return Err(MeshError::degenerate("Sphere radius must be positive"));
    }

    let segments = segments.max(3);
    let rings = ((segments + 1) / 2).max(MIN_RINGS);

    let mut mesh = Mesh::with_capacity(
        ((rings - 1) * segments + 2) as usize,
        (segments * rings * 2) as usize,
    );

    let apex = mesh.add_vertex(DVec3::new(0.0, 0.0, radius));

    // Interior rings between the poles
    for ring in 1..rings {
        let phi = std::f64::consts::PI * ring as f64 / rings as f64;
        let ring_radius = radius * phi.sin();
        let z = radius * phi.cos();

        for fragment in 0..segments {
            let theta = std::f64::consts::TAU * fragment as f64 / segments as f64;
            mesh.add_vertex(DVec3::new(
                ring_radius * theta.cos(),
                ring_radius * theta.sin(),
                z,
            ));
        }
    }

    let nadir = mesh.add_vertex(DVec3::new(0.0, 0.0, -radius));
    let ring_start = |ring: u32| 1 + (ring - 1) * segments;

    // Apex fan to the first ring
    let first = ring_start(1);
    for fragment in 0..segments {
        let next_fragment = (fragment + 1) % segments;
        mesh.add_triangle(apex, first + fragment, first + next_fragment);
    }

    // Bands between interior rings
    for ring in 1..rings - 1 {
        let upper = ring_start(ring);
        let lower = ring_start(ring + 1);
        for fragment in 0..segments {
            let next_fragment = (fragment + 1) % segments;
            let v0 = upper + next_fragment;
            let v1 = upper + fragment;
            let v2 = lower + fragment;
            let v3 = lower + next_fragment;

            mesh.add_triangle(v0, v1, v2);
            mesh.add_triangle(v0, v2, v3);
        }
    }

    // Nadir fan to the last ring, reversed
    let last = ring_start(rings - 1);
    for fragment in 0..segments {
        let next_fragment = (fragment + 1) % segments;
        mesh.add_triangle(nadir, last + next_fragment, last + fragment);
    }

    Ok(mesh)
}

/// Creates a spherical cap resting on the Z=0 plane with its apex at
/// `Z = cap_height`.
///
/// The cap is the portion of a sphere of radius `sphere_radius` cut by
/// a plane `cap_height` below its top. The rim circle at Z=0 has radius
/// `sqrt(2*R*h - h^2)`, and a flat disc closes the bottom so the solid
/// is watertight.
///
/// # Arguments
///
/// * `sphere_radius` - Radius of the generating sphere
/// * `cap_height` - Height of the cap (0 < h < 2R)
/// * `segments` - Longitudinal fragment count (minimum 3)
///
/// # Example
///
/// ```rust
/// use braille_mesh::primitives::create_spherical_cap;
///
/// // Dome of a rounded braille dot: base radius 0.6, dome height 0.6
/// // gives a generating sphere of R = (0.36 + 0.36) / 1.2 = 0.6
/// let dome = create_spherical_cap(0.6, 0.6, 16).unwrap();
/// assert!(dome.validate());
/// ```
pub fn create_spherical_cap(sphere_radius: f64, cap_height: f64, segments: u32) -> MeshResult<Mesh> {
    if sphere_radius <= 0.0 {
        return Err(MeshError::degenerate("Cap sphere radius must be positive"));
    }
    if cap_height <= 0.0 || cap_height >= 2.0 * sphere_radius {
        return Err(MeshError::degenerate(format!(
            "Cap height must be in (0, 2R): h={}, R={}",
            cap_height, sphere_radius
        )));
    }

    let segments = segments.max(3);
    let rings = (segments / 4).max(2);

    // Sphere center sits below the apex so the rim lands on Z=0
    let center_z = cap_height - sphere_radius;
    let phi_max = ((sphere_radius - cap_height) / sphere_radius).acos();

    let mut mesh = Mesh::with_capacity(
        (segments * rings) as usize + 1,
        (segments * (rings + 1)) as usize,
    );

    let apex = mesh.add_vertex(DVec3::new(0.0, 0.0, cap_height));

    // Rings from just below the apex down to the rim at Z=0
    for ring in 1..=rings {
        let phi = phi_max * ring as f64 / rings as f64;
        let ring_radius = sphere_radius * phi.sin();
        let z = center_z + sphere_radius * phi.cos();

        for fragment in 0..segments {
            let theta = std::f64::consts::TAU * fragment as f64 / segments as f64;
            mesh.add_vertex(DVec3::new(
                ring_radius * theta.cos(),
                ring_radius * theta.sin(),
                z,
            ));
        }
    }

    let ring_start = |ring: u32| 1 + (ring - 1) * segments;

    // Apex fan to the first ring
    let first = ring_start(1);
    for fragment in 0..segments {
        let next_fragment = (fragment + 1) % segments;
        mesh.add_triangle(apex, first + fragment, first + next_fragment);
    }

    // Bands between rings
    for ring in 1..rings {
        let upper = ring_start(ring);
        let lower = ring_start(ring + 1);
        for fragment in 0..segments {
            let next_fragment = (fragment + 1) % segments;
            let v0 = upper + next_fragment;
            let v1 = upper + fragment;
            let v2 = lower + fragment;
            let v3 = lower + next_fragment;

            mesh.add_triangle(v0, v1, v2);
            mesh.add_triangle(v0, v2, v3);
        }
    }

    // Bottom disc over the rim (downward normal)
    let rim = ring_start(rings);
    for i in 1..segments - 1 {
        mesh.add_triangle(rim, rim + i + 1, rim + i);
    }

    Ok(mesh)
}
