//! # Boolean Operations
//!
//! CSG boolean operations for 3D meshes: Union and Difference.
//!
//! ## Overview
//!
//! Two independent BSP-based engines implement the [`BooleanEngine`]
//! trait. They share polygon splitting and mesh conversion but differ
//! in how they decide which polygon fragments survive:
//!
//! | Engine | Strategy |
//! |--------|----------|
//! | [`ClipBsp`] | Robust clipping with ray-cast point-in-mesh tests at leaves |
//! | [`CsgBsp`] | Classic csg.js invert/clip-to/collect dance |
//!
//! Having two engines with different failure modes is the point: the
//! plate assembler tries them in order and falls back when one produces
//! a degenerate result.
//!
//! ## Failure Definition
//!
//! An engine call fails (returns [`MeshError::BooleanFailed`]) when its
//! output is empty, contains non-finite coordinates, fails index
//! validation, or exceeds the triangle cap. Callers treat any failure
//! as "try the next engine", never as a hard stop.
//!
//! ## Module Structure
//!
//! - `mod.rs` - [`BooleanEngine`] trait and result checks (this file)
//! - `geom.rs` - Planes, BSP polygons, mesh conversion, ray casting
//! - `clip.rs` - Robust-clip engine
//! - `csg.rs` - csg.js-style engine

mod clip;
mod csg;
mod geom;

#[cfg(test)]
mod tests;

pub use clip::ClipBsp;
pub use csg::CsgBsp;

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use config::constants::MAX_TRIANGLES;

/// A pairwise boolean engine over closed triangle meshes.
///
/// Implementations must be stateless; a single instance is shared
/// across all call sites.
pub trait BooleanEngine: Sync {
    /// Short stable identifier used in logs and engine selection.
    fn name(&self) -> &'static str;

    /// Computes `a ∪ b`.
    fn union(&self, a: &Mesh, b: &Mesh) -> MeshResult<Mesh>;

    /// Computes `a - b`.
    fn difference(&self, a: &Mesh, b: &Mesh) -> MeshResult<Mesh>;
}

/// The built-in engines in default fallback order.
pub fn builtin_engines() -> [&'static dyn BooleanEngine; 2] {
    [&ClipBsp, &CsgBsp]
}

/// Sanity-checks an engine result before handing it to callers.
///
/// Boolean engines cannot crash, so a bad result is how they "fail":
/// empty output, NaN coordinates, broken indices, or runaway polygon
/// splitting all turn into [`MeshError::BooleanFailed`].
pub(crate) fn check_result(engine: &'static str, result: Mesh) -> MeshResult<Mesh> {
    if result.is_empty() {
        return Err(MeshError::boolean_failed(engine, "produced an empty mesh"));
    }
    if !result.is_finite() {
        return Err(MeshError::boolean_failed(
            engine,
            "produced non-finite coordinates",
        ));
    }
    if result.triangle_count() > MAX_TRIANGLES {
        return Err(MeshError::TooManyTriangles {
            count: result.triangle_count(),
            max: MAX_TRIANGLES,
        });
    }
    if !result.validate() {
        return Err(MeshError::boolean_failed(
            engine,
            "produced invalid triangle indices",
        ));
    }
    Ok(result)
}
