//! # Config Crate
//!
//! Centralized configuration constants for the braille plate pipeline.
//! All magic numbers and tunable parameters are defined here to ensure
//! consistency across crates and easy configuration management.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, DOME_MIN_SEGMENTS, DOME_MAX_SEGMENTS};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f64 = 0.00000000001; // 1e-11, smaller than EPSILON (1e-10)
//! let is_zero = value.abs() < EPSILON;
//! assert!(is_zero);
//!
//! // Clamp user-requested tessellation to safe bounds
//! let requested: u32 = 128;
//! let segments = requested.clamp(DOME_MIN_SEGMENTS, DOME_MAX_SEGMENTS);
//! assert_eq!(segments, DOME_MAX_SEGMENTS);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Millimeter Native**: Every length constant is in millimeters
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
