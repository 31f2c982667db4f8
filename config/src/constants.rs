//! # Configuration Constants
//!
//! Centralized constants for the braille plate pipeline. All geometry
//! tolerances, tessellation bounds, recess parameters, and combine batch
//! sizes are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Tessellation**: Segment-count bounds for curved solids
//! - **Recess**: Depths and overcuts for subtracted features
//! - **Combine**: Batch sizes and safety limits for boolean operations
//! - **Braille**: Unicode braille block boundaries

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for determining if two floating-point values are "equal" within
/// numerical tolerance. This value is chosen to balance precision with
/// robustness against floating-point errors.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Epsilon for vertex deduplication.
///
/// Slightly larger tolerance used when welding nearly-identical vertices
/// during watertightness analysis and repair. This helps clean up
/// numerical noise from boolean operations and transformations.
pub const VERTEX_MERGE_EPSILON: f64 = 1e-8;

/// Epsilon for classifying points against a BSP splitting plane.
///
/// Points within this distance of a plane are treated as coplanar.
/// Larger than [`EPSILON`] because plane coefficients accumulate error
/// through repeated polygon splits.
pub const PLANE_EPSILON: f64 = 1e-5;

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Minimum segment count for dome-like solids (rounded dots, hemisphere
/// and bowl recesses).
///
/// Below 4 segments a dome degenerates into a shape that no longer reads
/// as round under a fingertip.
pub const DOME_MIN_SEGMENTS: u32 = 4;

/// Maximum segment count for dome-like solids.
///
/// Safety limit: plates carry hundreds of dots, so per-dot tessellation
/// is capped to keep total triangle counts bounded.
pub const DOME_MAX_SEGMENTS: u32 = 64;

/// Minimum segment count for cone-shaped recesses.
pub const CONE_MIN_SEGMENTS: u32 = 8;

/// Maximum segment count for cone-shaped recesses.
pub const CONE_MAX_SEGMENTS: u32 = 32;

/// Maximum number of triangles in a single mesh.
///
/// Safety limit to prevent memory exhaustion. A boolean engine result
/// above this limit is treated as an engine failure.
pub const MAX_TRIANGLES: usize = 10_000_000;

// =============================================================================
// RECESS CONSTANTS
// =============================================================================

/// Depth of indicator marker recesses, in millimeters.
///
/// Markers are always recessed into the plate surface, never raised,
/// so that they cannot be confused with braille dots by touch.
pub const MARKER_RECESS_DEPTH_MM: f64 = 1.0;

/// Overcut above the plate surface for cone recess cutters, in millimeters.
///
/// The cutter protrudes slightly above the surface so the subtraction
/// leaves no coplanar sliver along the recess rim.
pub const CONE_RECESS_OVERCUT_MM: f64 = 0.05;

/// Overcut above the plate surface for marker cutters, in millimeters.
pub const MARKER_OVERCUT_MM: f64 = 0.1;

/// Bowl recesses shallower than this collapse to hemisphere recesses.
///
/// The bowl sphere radius formula `R = (a^2 + h^2) / (2h)` diverges as
/// the depth `h` approaches zero.
pub const BOWL_MIN_DEPTH_MM: f64 = 1e-3;

// =============================================================================
// COMBINE CONSTANTS
// =============================================================================

/// Number of solids per chunk when unioning dots onto a plate.
///
/// Unioning in chunks keeps each BSP tree small and bounds the error
/// accumulated by repeated polygon splitting.
pub const UNION_BATCH_SIZE: usize = 32;

/// Number of cutters per chunk when subtracting recesses from a plate.
pub const CUTTER_BATCH_SIZE: usize = 64;

// =============================================================================
// BRAILLE CONSTANTS
// =============================================================================

/// First codepoint of the Unicode braille patterns block (U+2800).
pub const BRAILLE_BLOCK_START: u32 = 0x2800;

/// Last codepoint of the Unicode braille patterns block (U+28FF).
pub const BRAILLE_BLOCK_END: u32 = 0x28FF;

/// Number of dots in a standard braille cell.
pub const DOTS_PER_CELL: usize = 6;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Clamps a requested dome segment count to the supported range.
///
/// # Example
///
/// ```rust
/// use config::constants::clamp_dome_segments;
///
/// assert_eq!(clamp_dome_segments(2), 4);
/// assert_eq!(clamp_dome_segments(16), 16);
/// assert_eq!(clamp_dome_segments(500), 64);
/// ```
#[inline]
pub fn clamp_dome_segments(requested: u32) -> u32 {
    requested.clamp(DOME_MIN_SEGMENTS, DOME_MAX_SEGMENTS)
}

/// Clamps a requested cone segment count to the supported range.
///
/// # Example
///
/// ```rust
/// use config::constants::clamp_cone_segments;
///
/// assert_eq!(clamp_cone_segments(3), 8);
/// assert_eq!(clamp_cone_segments(100), 32);
/// ```
#[inline]
pub fn clamp_cone_segments(requested: u32) -> u32 {
    requested.clamp(CONE_MIN_SEGMENTS, CONE_MAX_SEGMENTS)
}

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
