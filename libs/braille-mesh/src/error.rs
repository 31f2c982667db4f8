//! # Mesh Errors
//!
//! Error types for mesh kernel operations.

use thiserror::Error;

/// Result alias for mesh kernel operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur during mesh construction and boolean operations.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Degenerate geometry
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Invalid 2D polygon input
    #[error("Invalid polygon: {message}")]
    InvalidPolygon { message: String },

    /// Boolean operation failed
    #[error("Boolean operation failed in engine '{engine}': {message}")]
    BooleanFailed { engine: &'static str, message: String },

    /// Triangulation of a polygon cap failed
    #[error("Triangulation failed: {message}")]
    TriangulationFailed { message: String },

    /// Too many triangles
    #[error("Too many triangles: {count} (max: {max})")]
    TooManyTriangles { count: usize, max: usize },
}

impl MeshError {
    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates an invalid polygon error.
    pub fn invalid_polygon(message: impl Into<String>) -> Self {
        Self::InvalidPolygon {
            message: message.into(),
        }
    }

    /// Creates a boolean operation failed error.
    pub fn boolean_failed(engine: &'static str, message: impl Into<String>) -> Self {
        Self::BooleanFailed {
            engine,
            message: message.into(),
        }
    }

    /// Creates a triangulation failed error.
    pub fn triangulation_failed(message: impl Into<String>) -> Self {
        Self::TriangulationFailed {
            message: message.into(),
        }
    }
}
