//! # Grid Layout
//!
//! Maps grid coordinates (row, column, dot) to positions on the plate
//! surface. Cards use plain 2D millimeter coordinates; cylinders map
//! the horizontal axis to an angle around the shell and carry a local
//! frame per surface point.
//!
//! The grid is centered on the plate. `grid_columns` counts text
//! columns; when indicators are enabled one extra physical column is
//! added on each side (leading marker at physical column 0, trailing
//! marker after the last text column), and the centering spans the
//! full physical width.

use crate::cell::dot_offset;
use crate::error::{PlateError, PlateResult};
use crate::settings::Settings;
use glam::{DMat4, DVec2, DVec3, DVec4};

/// Precomputed 2D layout for a flat card.
#[derive(Debug, Clone)]
pub struct CardLayout {
    width: f64,
    height: f64,
    rows: usize,
    physical_columns: usize,
    indicator_offset: usize,
    cell_spacing: f64,
    line_spacing: f64,
    dot_spacing: f64,
    x_adjust: f64,
    y_adjust: f64,
}

impl CardLayout {
    /// Builds the layout from validated settings.
    pub fn new(settings: &Settings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            rows: settings.grid_rows,
            physical_columns: settings.physical_columns(),
            indicator_offset: settings.indicator_offset(),
            cell_spacing: settings.cell_spacing,
            line_spacing: settings.line_spacing,
            dot_spacing: settings.dot_spacing,
            x_adjust: settings.x_adjust,
            y_adjust: settings.y_adjust,
        }
    }

    fn col_x(&self, physical_col: usize) -> f64 {
        let span = (self.physical_columns - 1) as f64 * self.cell_spacing;
        let left = (self.width - span) / 2.0;
        left + physical_col as f64 * self.cell_spacing + self.x_adjust
    }

    /// Y coordinate of a row center. Row 0 is the topmost row.
    pub fn row_y(&self, row: usize) -> f64 {
        let span = (self.rows - 1) as f64 * self.line_spacing;
        let top = self.height - (self.height - span) / 2.0;
        top - row as f64 * self.line_spacing + self.y_adjust
    }

    /// Center of a text cell.
    pub fn cell_center(&self, row: usize, text_col: usize) -> DVec2 {
        DVec2::new(
            self.col_x(text_col + self.indicator_offset),
            self.row_y(row),
        )
    }

    /// Position of one dot within a text cell.
    pub fn dot_position(&self, row: usize, text_col: usize, dot: usize) -> DVec2 {
        let center = self.cell_center(row, text_col);
        let (dx, dy) = dot_offset(dot, self.dot_spacing);
        DVec2::new(center.x + dx, center.y + dy)
    }

    /// Center of the leading indicator column for a row.
    pub fn leading_marker_center(&self, row: usize) -> DVec2 {
        DVec2::new(self.col_x(0), self.row_y(row))
    }

    /// Center of the trailing indicator column for a row.
    pub fn trailing_marker_center(&self, row: usize) -> DVec2 {
        DVec2::new(self.col_x(self.physical_columns - 1), self.row_y(row))
    }
}

/// Layout for a cylinder shell. The plate's X axis becomes an angle
/// around the cylinder, Y becomes the axial Z coordinate.
#[derive(Debug, Clone)]
pub struct CylinderLayout {
    radius: f64,
    height: f64,
    seam_offset: f64,
    rows: usize,
    physical_columns: usize,
    indicator_offset: usize,
    cell_spacing: f64,
    line_spacing: f64,
    dot_spacing: f64,
    x_adjust: f64,
    y_adjust: f64,
}

impl CylinderLayout {
    /// Builds the layout from validated settings.
    pub fn new(settings: &Settings) -> Self {
        Self {
            radius: settings.cylinder_diameter / 2.0,
            height: settings.cylinder_height,
            seam_offset: settings.seam_offset_deg.to_radians(),
            rows: settings.grid_rows,
            physical_columns: settings.physical_columns(),
            indicator_offset: settings.indicator_offset(),
            cell_spacing: settings.cell_spacing,
            line_spacing: settings.line_spacing,
            dot_spacing: settings.dot_spacing,
            x_adjust: settings.x_adjust,
            y_adjust: settings.y_adjust,
        }
    }

    /// Outer surface radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Maps a linear surface distance to an angle, preserving arc
    /// length at the outer radius.
    pub fn theta_at(&self, surface_x: f64) -> f64 {
        surface_x / self.radius + self.seam_offset
    }

    fn col_theta(&self, physical_col: usize) -> f64 {
        // Center the physical span around the seam offset.
        let centered =
            physical_col as f64 - (self.physical_columns - 1) as f64 / 2.0;
        self.theta_at(centered * self.cell_spacing + self.x_adjust)
    }

    /// Axial Z coordinate of a row center. Row 0 is the topmost row.
    pub fn row_z(&self, row: usize) -> f64 {
        let span = (self.rows - 1) as f64 * self.line_spacing;
        let top = self.height - (self.height - span) / 2.0;
        top - row as f64 * self.line_spacing + self.y_adjust
    }

    /// Angle and axial position of a text cell center.
    pub fn cell_center(&self, row: usize, text_col: usize) -> (f64, f64) {
        (
            self.col_theta(text_col + self.indicator_offset),
            self.row_z(row),
        )
    }

    /// Angle and axial position of one dot within a text cell.
    pub fn dot_position(&self, row: usize, text_col: usize, dot: usize) -> (f64, f64) {
        let (theta, z) = self.cell_center(row, text_col);
        let (dx, dy) = dot_offset(dot, self.dot_spacing);
        (theta + dx / self.radius, z + dy)
    }

    /// Angle and axial position of the leading indicator column.
    pub fn leading_marker_center(&self, row: usize) -> (f64, f64) {
        (self.col_theta(0), self.row_z(row))
    }

    /// Angle and axial position of the trailing indicator column.
    pub fn trailing_marker_center(&self, row: usize) -> (f64, f64) {
        (self.col_theta(self.physical_columns - 1), self.row_z(row))
    }

    /// Point on the outer surface at the given angle and height.
    pub fn surface_point(&self, theta: f64, z: f64) -> DVec3 {
        DVec3::new(
            self.radius * theta.cos(),
            self.radius * theta.sin(),
            z,
        )
    }

    /// Transform taking a surface-local solid to its place on the
    /// shell: local +X becomes tangential, +Y axial, +Z radially
    /// outward, with the local origin at the surface point.
    pub fn frame(&self, theta: f64, z: f64) -> DMat4 {
        let radial = DVec3::new(theta.cos(), theta.sin(), 0.0);
        let tangential = DVec3::new(-theta.sin(), theta.cos(), 0.0);
        let axial = DVec3::Z;
        DMat4::from_cols(
            DVec4::from((tangential, 0.0)),
            DVec4::from((axial, 0.0)),
            DVec4::from((radial, 0.0)),
            DVec4::from((self.surface_point(theta, z), 1.0)),
        )
    }
}

/// Checks that the given lines fit the grid.
///
/// # Errors
///
/// [`PlateError::TooManyLines`] when there are more lines than rows,
/// [`PlateError::LineOverflow`] when a line exceeds the text columns.
/// Line and column numbers in errors are 1-based.
pub fn check_capacity(lines: &[String], settings: &Settings) -> PlateResult<()> {
    if lines.len() > settings.grid_rows {
        return Err(PlateError::TooManyLines {
            count: lines.len(),
            rows: settings.grid_rows,
        });
    }
    for (index, line) in lines.iter().enumerate() {
        let count = line.chars().count();
        if count > settings.available_columns() {
            return Err(PlateError::LineOverflow {
                line: index + 1,
                count,
                available: settings.available_columns(),
            });
        }
    }
    Ok(())
}
