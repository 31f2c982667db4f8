//! # Geometry Spec Extraction
//!
//! Emits a serializable description of a plate instead of building
//! its mesh, for callers that construct solids in another process or
//! runtime. Positions, inclusion rules, and marker counts are shared
//! with the assembler, so downstream construction is geometrically
//! identical to the in-process path.

use config::constants::MARKER_RECESS_DEPTH_MM;
use serde::{Deserialize, Serialize};

use crate::assemble::{decode_lines, grid_dot_sites, marker_rows, text_dot_sites, DotSite};
use crate::error::PlateResult;
use crate::layout::{check_capacity, CardLayout, CylinderLayout};
use crate::settings::{DotStyle, PlateKind, RecessStyle, Settings, ShapeKind};
use crate::shapes::MarkerKind;

/// Outer envelope of the plate or shell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Envelope {
    /// Flat card: `width x height x thickness`.
    Card {
        width: f64,
        height: f64,
        thickness: f64,
    },
    /// Cylinder shell: outer diameter, axial height, wall thickness.
    Cylinder {
        diameter: f64,
        height: f64,
        thickness: f64,
    },
}

/// Shape of one dot feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DotShape {
    /// Raised dot on a positive plate.
    Raised(DotStyle),
    /// Recess on a negative plate.
    Recessed(RecessStyle),
}

/// One dot feature: position plus shape parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DotSpec {
    /// Cartesian position. For cards this is the dot's base (raised)
    /// or opening center (recessed); for cylinders the surface point.
    pub position: [f64; 3],
    /// Angle around the cylinder axis, cylinders only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theta: Option<f64>,
    /// Surface radius, cylinders only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Dot geometry.
    pub shape: DotShape,
}

/// One marker recess.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    /// Marker footprint.
    pub kind: MarkerKind,
    /// Cartesian position of the footprint center on the surface.
    pub position: [f64; 3],
    /// Angle around the cylinder axis, cylinders only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theta: Option<f64>,
    /// Footprint width (one dot spacing).
    pub size: f64,
    /// Recess depth below the surface.
    pub depth: f64,
}

/// Serializable description of one plate build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometrySpec {
    /// Card or cylinder.
    pub shape: ShapeKind,
    /// Positive or negative.
    pub plate: PlateKind,
    /// Outer envelope.
    pub envelope: Envelope,
    /// Dot features, in row-major grid order.
    pub dots: Vec<DotSpec>,
    /// Marker recesses, leading then trailing per row.
    pub markers: Vec<MarkerSpec>,
}

fn dot_shape(settings: &Settings, plate: PlateKind) -> DotShape {
    match plate {
        PlateKind::Positive => DotShape::Raised(settings.dot_style),
        PlateKind::Negative => DotShape::Recessed(settings.recess_style.normalized()),
    }
}

/// Z of a dot feature's reference point above the card base.
fn card_dot_z(settings: &Settings, plate: PlateKind) -> f64 {
    match plate {
        // Center of the raised dot.
        PlateKind::Positive => settings.thickness + settings.dot_style.height() / 2.0,
        // Opening center on the surface.
        PlateKind::Negative => settings.thickness,
    }
}

fn card_spec(
    sites: &[DotSite],
    settings: &Settings,
    plate: PlateKind,
    markers: &[(usize, MarkerKind, MarkerKind)],
) -> GeometrySpec {
    let layout = CardLayout::new(settings);
    let shape = dot_shape(settings, plate);
    let z = card_dot_z(settings, plate);

    let dots = sites
        .iter()
        .map(|site| {
            let position = layout.dot_position(site.row, site.col, site.dot);
            DotSpec {
                position: [position.x, position.y, z],
                theta: None,
                radius: None,
                shape,
            }
        })
        .collect();

    let mut marker_specs = Vec::with_capacity(markers.len() * 2);
    for &(row, leading, trailing) in markers {
        for (kind, center) in [
            (leading, layout.leading_marker_center(row)),
            (trailing, layout.trailing_marker_center(row)),
        ] {
            marker_specs.push(MarkerSpec {
                kind,
                position: [center.x, center.y, settings.thickness],
                theta: None,
                size: settings.dot_spacing,
                depth: MARKER_RECESS_DEPTH_MM,
            });
        }
    }

    GeometrySpec {
        shape: ShapeKind::Card,
        plate,
        envelope: Envelope::Card {
            width: settings.width,
            height: settings.height,
            thickness: settings.thickness,
        },
        dots,
        markers: marker_specs,
    }
}

fn cylinder_spec(
    sites: &[DotSite],
    settings: &Settings,
    plate: PlateKind,
    markers: &[(usize, MarkerKind, MarkerKind)],
) -> GeometrySpec {
    let layout = CylinderLayout::new(settings);
    let shape = dot_shape(settings, plate);

    let dots = sites
        .iter()
        .map(|site| {
            let (theta, z) = layout.dot_position(site.row, site.col, site.dot);
            let point = layout.surface_point(theta, z);
            DotSpec {
                position: [point.x, point.y, point.z],
                theta: Some(theta),
                radius: Some(layout.radius()),
                shape,
            }
        })
        .collect();

    let mut marker_specs = Vec::with_capacity(markers.len() * 2);
    for &(row, leading, trailing) in markers {
        for (kind, (theta, z)) in [
            (leading, layout.leading_marker_center(row)),
            (trailing, layout.trailing_marker_center(row)),
        ] {
            let point = layout.surface_point(theta, z);
            marker_specs.push(MarkerSpec {
                kind,
                position: [point.x, point.y, point.z],
                theta: Some(theta),
                size: settings.dot_spacing,
                depth: MARKER_RECESS_DEPTH_MM,
            });
        }
    }

    GeometrySpec {
        shape: ShapeKind::Cylinder,
        plate,
        envelope: Envelope::Cylinder {
            diameter: settings.cylinder_diameter,
            height: settings.cylinder_height,
            thickness: settings.thickness,
        },
        dots,
        markers: marker_specs,
    }
}

/// Extracts the geometry description for a plate build, with the same
/// validation and inclusion rules as the mesh assembler.
///
/// # Errors
///
/// The same input validation errors as
/// [`build_plate`](crate::build_plate).
pub fn extract_geometry_spec(
    lines: &[String],
    settings: &Settings,
    plate: PlateKind,
    shape: ShapeKind,
    original_lines: Option<&[String]>,
) -> PlateResult<GeometrySpec> {
    settings.validate()?;
    check_capacity(lines, settings)?;
    let patterns = decode_lines(lines)?;
    let markers = marker_rows(settings, original_lines);

    let sites = match plate {
        PlateKind::Positive => text_dot_sites(&patterns),
        PlateKind::Negative => grid_dot_sites(settings),
    };

    Ok(match shape {
        ShapeKind::Card => card_spec(&sites, settings, plate, &markers),
        ShapeKind::Cylinder => cylinder_spec(&sites, settings, plate, &markers),
    })
}
