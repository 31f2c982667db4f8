//! # Plate Settings
//!
//! Fully-defaulted build settings: plate envelope, grid geometry, dot
//! and recess styles, and tessellation quality. All lengths are
//! millimeters.

use crate::error::{PlateError, PlateResult};
use config::constants::{clamp_cone_segments, clamp_dome_segments, BOWL_MIN_DEPTH_MM};
use serde::{Deserialize, Serialize};

/// Which side of the embossing pair to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlateKind {
    /// Raised dots for reading (or for the male embossing die).
    Positive,
    /// Counter plate with recesses at every grid position.
    Negative,
}

/// The physical carrier shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Flat rectangular card.
    Card,
    /// Cylinder shell with cells wrapped around the outer surface.
    Cylinder,
}

/// Geometry of a raised braille dot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DotStyle {
    /// Truncated cone with a flat hat.
    Cone {
        /// Diameter at the plate surface.
        base_diameter: f64,
        /// Total height above the surface.
        height: f64,
        /// Diameter of the flat top.
        flat_hat_diameter: f64,
    },
    /// Cone-frustum body topped with a spherical dome.
    Rounded {
        /// Diameter at the plate surface.
        base_diameter: f64,
        /// Diameter where the dome meets the body.
        dome_diameter: f64,
        /// Height of the frustum body.
        base_height: f64,
        /// Height of the dome above the body.
        dome_height: f64,
    },
}

impl DotStyle {
    /// Total height of the dot above the plate surface.
    pub fn height(&self) -> f64 {
        match *self {
            DotStyle::Cone { height, .. } => height,
            DotStyle::Rounded {
                base_height,
                dome_height,
                ..
            } => base_height + dome_height,
        }
    }
}

/// Geometry of a recessed dot on the negative plate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RecessStyle {
    /// Half-sphere dug equator-down into the surface.
    Hemisphere {
        /// Opening diameter at the surface.
        diameter: f64,
    },
    /// Shallow spherical bowl. Degenerates to a hemisphere when the
    /// depth approaches the opening radius or falls below tolerance.
    Bowl {
        /// Opening diameter at the surface.
        diameter: f64,
        /// Depth below the surface.
        depth: f64,
    },
    /// Straight-sided conical pit.
    Cone {
        /// Opening diameter at the surface.
        diameter: f64,
        /// Depth below the surface.
        depth: f64,
    },
}

impl RecessStyle {
    /// Depth of the recess below the plate surface.
    pub fn depth(&self) -> f64 {
        match *self {
            RecessStyle::Hemisphere { diameter } => diameter / 2.0,
            RecessStyle::Bowl { depth, .. } | RecessStyle::Cone { depth, .. } => depth,
        }
    }

    /// Resolves degenerate bowls into hemispheres.
    pub fn normalized(self) -> RecessStyle {
        if let RecessStyle::Bowl { diameter, depth } = self {
            let radius = diameter / 2.0;
            if depth < BOWL_MIN_DEPTH_MM || depth >= radius {
                return RecessStyle::Hemisphere { diameter };
            }
        }
        self
    }
}

/// Build settings for one plate.
///
/// Every field has a sensible default; `Settings::default()` produces
/// a valid A6-landscape-ish card with cone dots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Card width along X.
    pub width: f64,
    /// Card height along Y.
    pub height: f64,
    /// Plate thickness (card) or shell wall thickness (cylinder).
    pub thickness: f64,

    /// Cylinder outer diameter (cylinder shapes only).
    pub cylinder_diameter: f64,
    /// Cylinder height along its axis.
    pub cylinder_height: f64,
    /// Rotates the whole grid around the cylinder, in degrees.
    pub seam_offset_deg: f64,

    /// Number of text columns (indicator columns are extra).
    pub grid_columns: usize,
    /// Number of text rows.
    pub grid_rows: usize,
    /// Center-to-center spacing between cells in a row.
    pub cell_spacing: f64,
    /// Center-to-center spacing between rows.
    pub line_spacing: f64,
    /// Spacing between dots within a cell.
    pub dot_spacing: f64,

    /// Raised dot geometry.
    pub dot_style: DotStyle,
    /// Recess geometry for the negative plate.
    pub recess_style: RecessStyle,

    /// Requested tessellation for domes and spheres (clamped).
    pub dome_segments: u32,
    /// Requested tessellation for cone recesses (clamped).
    pub cone_segments: u32,

    /// Global X nudge applied to the whole grid.
    pub x_adjust: f64,
    /// Global Y (or axial, on cylinders) nudge.
    pub y_adjust: f64,

    /// Whether to emboss row indicator markers.
    pub indicators: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 170.0,
            height: 125.0,
            thickness: 2.0,
            cylinder_diameter: 60.0,
            cylinder_height: 125.0,
            seam_offset_deg: 0.0,
            grid_columns: 24,
            grid_rows: 4,
            cell_spacing: 6.2,
            line_spacing: 10.0,
            dot_spacing: 2.5,
            dot_style: DotStyle::Cone {
                base_diameter: 1.6,
                height: 0.9,
                flat_hat_diameter: 0.5,
            },
            recess_style: RecessStyle::Hemisphere { diameter: 1.7 },
            dome_segments: 16,
            cone_segments: 16,
            x_adjust: 0.0,
            y_adjust: 0.0,
            indicators: true,
        }
    }
}

impl Settings {
    /// Number of text columns a line may occupy.
    pub fn available_columns(&self) -> usize {
        self.grid_columns
    }

    /// Column offset of the first text cell (1 when the leading
    /// indicator column is present).
    pub fn indicator_offset(&self) -> usize {
        usize::from(self.indicators)
    }

    /// Total physical columns including indicator columns.
    pub fn physical_columns(&self) -> usize {
        self.grid_columns + 2 * self.indicator_offset()
    }

    /// Dome/sphere tessellation clamped to the supported range.
    pub fn dome_segments(&self) -> u32 {
        clamp_dome_segments(self.dome_segments)
    }

    /// Cone recess tessellation clamped to the supported range.
    pub fn cone_segments(&self) -> u32 {
        clamp_cone_segments(self.cone_segments)
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`PlateError::InvalidSettings`] naming the first
    /// violated constraint.
    pub fn validate(&self) -> PlateResult<()> {
        let positive: [(&str, f64); 9] = [
            ("width", self.width),
            ("height", self.height),
            ("thickness", self.thickness),
            ("cylinder_diameter", self.cylinder_diameter),
            ("cylinder_height", self.cylinder_height),
            ("cell_spacing", self.cell_spacing),
            ("line_spacing", self.line_spacing),
            ("dot_spacing", self.dot_spacing),
            ("dot height", self.dot_style.height()),
        ];
        for (name, value) in positive {
            if value <= 0.0 || !value.is_finite() {
                return Err(PlateError::invalid_settings(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if self.grid_columns == 0 || self.grid_rows == 0 {
            return Err(PlateError::invalid_settings("grid must be at least 1x1"));
        }

        match self.dot_style {
            DotStyle::Cone {
                base_diameter,
                flat_hat_diameter,
                ..
            } => {
                if flat_hat_diameter <= 0.0 || flat_hat_diameter >= base_diameter {
                    return Err(PlateError::invalid_settings(
                        "cone dot flat hat must be narrower than the base",
                    ));
                }
            }
            DotStyle::Rounded {
                base_diameter,
                dome_diameter,
                base_height,
                dome_height,
            } => {
                if dome_diameter <= 0.0 || dome_diameter > base_diameter {
                    return Err(PlateError::invalid_settings(
                        "rounded dot dome must not be wider than the base",
                    ));
                }
                if base_height <= 0.0 || dome_height <= 0.0 {
                    return Err(PlateError::invalid_settings(
                        "rounded dot heights must be positive",
                    ));
                }
            }
        }

        match self.recess_style {
            RecessStyle::Hemisphere { diameter } => {
                if diameter <= 0.0 {
                    return Err(PlateError::invalid_settings(
                        "hemisphere recess diameter must be positive",
                    ));
                }
            }
            // Shallow bowls degrade to hemispheres, so zero depth is
            // acceptable here.
            RecessStyle::Bowl { diameter, depth } => {
                if diameter <= 0.0 || depth < 0.0 || !depth.is_finite() {
                    return Err(PlateError::invalid_settings(
                        "bowl recess diameter must be positive and depth non-negative",
                    ));
                }
            }
            // A zero-depth cone has no apex to build from.
            RecessStyle::Cone { diameter, depth } => {
                if diameter <= 0.0 || depth <= 0.0 || !depth.is_finite() {
                    return Err(PlateError::invalid_settings(
                        "cone recess diameter and depth must be positive",
                    ));
                }
            }
        }

        if self.cylinder_diameter <= 2.0 * self.thickness {
            return Err(PlateError::invalid_settings(
                "cylinder diameter must exceed twice the wall thickness",
            ));
        }

        Ok(())
    }
}
