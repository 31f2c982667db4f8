//! # Primitive Solids
//!
//! Mesh generators for the closed solids the plate assembler works with:
//! cuboids for bases and slabs, frustums for tactile dots and cone
//! recesses, spheres and spherical caps for domes and bowl recesses,
//! and tubes for cylinder shells.
//!
//! All generators produce watertight, outward-wound meshes with the
//! base (or axis) at the origin, along +Z.

mod cuboid;
mod frustum;
mod sphere;
mod tube;

pub use cuboid::create_cuboid;
pub use frustum::create_frustum;
pub use sphere::{create_sphere, create_spherical_cap};
pub use tube::create_tube;
