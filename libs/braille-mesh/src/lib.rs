//! # Braille Mesh
//!
//! Triangle-mesh kernel for braille plate generation.
//!
//! ## Overview
//!
//! This crate provides the geometry layer underneath the plate
//! assembler:
//!
//! - **Primitives**: cuboids, frustums, spheres, spherical caps, tubes
//! - **2D**: polygons with holes and linear extrusion
//! - **Booleans**: two BSP engines behind the [`BooleanEngine`] trait
//! - **Repair**: watertightness checks and healing
//! - **Export**: flat f32/u32 buffers
//!
//! All geometry is millimeter-scale f64; f32 appears only in
//! [`MeshBuffers`].
//!
//! ## Example
//!
//! ```rust
//! use braille_mesh::{boolean::builtin_engines, primitives::create_cuboid, repair::heal};
//! use glam::DVec3;
//!
//! let base = create_cuboid(DVec3::new(20.0, 20.0, 2.0), false).unwrap();
//! let mut dot = create_cuboid(DVec3::new(1.0, 1.0, 1.0), true).unwrap();
//! dot.translate(DVec3::new(10.0, 10.0, 2.0));
//!
//! let engine = builtin_engines()[0];
//! let mut plate = engine.union(&base, &dot).unwrap();
//! heal(&mut plate);
//! assert!(plate.signed_volume() > base.signed_volume());
//! ```

pub mod boolean;
mod error;
mod export;
mod extrude;
mod mesh;
mod polygon;
pub mod primitives;
pub mod repair;

pub use boolean::{builtin_engines, BooleanEngine, ClipBsp, CsgBsp};
pub use error::{MeshError, MeshResult};
pub use export::MeshBuffers;
pub use extrude::linear_extrude;
pub use mesh::Mesh;
pub use polygon::Polygon2D;
pub use repair::{heal, is_watertight, HealReport};
