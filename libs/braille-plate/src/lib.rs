//! # Braille Plate
//!
//! Turns braille Unicode text into 3D-printable solids: flat cards
//! with raised dots, cylinder shells with dots wrapped around the
//! surface, and their negative counter plates with recesses.
//!
//! The pipeline is layout (grid positions) → shapes (per-dot and
//! per-marker solids) → robust boolean combination (engine ladder
//! with graceful degradation) → healed mesh. [`extract_geometry_spec`]
//! runs the same layout rules but emits a serializable description
//! instead of a mesh.
//!
//! ## Example
//!
//! ```
//! use braille_plate::{build_plate, PlateKind, Settings, ShapeKind};
//!
//! let mut settings = Settings::default();
//! settings.grid_columns = 4;
//! settings.grid_rows = 1;
//! settings.dome_segments = 4;
//! let lines = vec!["\u{2801}\u{2803}".to_string()];
//! let (mesh, report) = build_plate(
//!     &lines,
//!     &settings,
//!     PlateKind::Positive,
//!     ShapeKind::Card,
//!     None,
//! )
//! .unwrap();
//! assert_eq!(report.dot_count, 3);
//! assert!(mesh.triangle_count() > 0);
//! ```

mod assemble;
mod cell;
mod combine;
mod error;
mod geometry;
mod layout;
mod settings;
mod shapes;

pub use assemble::{build_plate, BuildReport, BuildTier};
pub use cell::DotPattern;
pub use combine::{
    engine_candidates, subtract_all, subtract_in_batches, union_all, union_in_batches,
    SubtractOutcome, UnionOutcome,
};
pub use error::{PlateError, PlateResult};
pub use geometry::{extract_geometry_spec, DotShape, DotSpec, Envelope, GeometrySpec, MarkerSpec};
pub use layout::{CardLayout, CylinderLayout};
pub use settings::{DotStyle, PlateKind, RecessStyle, Settings, ShapeKind};
pub use shapes::MarkerKind;
