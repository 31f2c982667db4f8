//! # Plate Shapes
//!
//! Builders for the small solids placed on a plate: raised dots,
//! recess cutters, and row indicator markers. All solids are built in
//! a surface-local frame where Z = 0 is the plate surface and +Z
//! points out of the plate; callers position them with a translation
//! (cards) or a surface frame (cylinders).
//!
//! Recess cutters extend slightly above the surface so the boolean
//! subtraction never has to resolve a coplanar face.

use braille_mesh::primitives::{create_frustum, create_sphere, create_spherical_cap};
use braille_mesh::{linear_extrude, Mesh, MeshResult, Polygon2D};
use config::constants::{CONE_RECESS_OVERCUT_MM, MARKER_OVERCUT_MM, MARKER_RECESS_DEPTH_MM};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::settings::{DotStyle, RecessStyle, Settings};

/// Builds the raised dot solid for the configured style, base ring at
/// Z = 0 and apex at `dot_style.height()`.
pub fn dot_solid(settings: &Settings) -> MeshResult<Mesh> {
    match settings.dot_style {
        DotStyle::Cone {
            base_diameter,
            height,
            flat_hat_diameter,
        } => create_frustum(
            height,
            base_diameter / 2.0,
            flat_hat_diameter / 2.0,
            false,
            settings.cone_segments(),
        ),
        DotStyle::Rounded {
            base_diameter,
            dome_diameter,
            base_height,
            dome_height,
        } => {
            let mut body = create_frustum(
                base_height,
                base_diameter / 2.0,
                dome_diameter / 2.0,
                false,
                settings.dome_segments(),
            )?;
            // Sphere through the dome rim and apex.
            let rim = dome_diameter / 2.0;
            let sphere_radius =
                (rim * rim + dome_height * dome_height) / (2.0 * dome_height);
            let mut cap =
                create_spherical_cap(sphere_radius, dome_height, settings.dome_segments())?;
            cap.translate(DVec3::new(0.0, 0.0, base_height));
            body.merge(&cap);
            Ok(body)
        }
    }
}

/// Builds the recess cutter for the configured style.
///
/// The cutter is a solid whose below-surface portion carves the
/// recess; its above-surface portion only ever overlaps air.
pub fn recess_cutter(settings: &Settings) -> MeshResult<Mesh> {
    match settings.recess_style.normalized() {
        RecessStyle::Hemisphere { diameter } => {
            // Full sphere centered on the surface; the lower half is
            // the recess.
            create_sphere(diameter / 2.0, settings.dome_segments())
        }
        RecessStyle::Bowl { diameter, depth } => {
            let rim = diameter / 2.0;
            let sphere_radius = (rim * rim + depth * depth) / (2.0 * depth);
            let mut sphere = create_sphere(sphere_radius, settings.dome_segments())?;
            // Center above the surface so the sphere dips `depth`
            // below it and meets the surface at the opening radius.
            sphere.translate(DVec3::new(0.0, 0.0, sphere_radius - depth));
            Ok(sphere)
        }
        RecessStyle::Cone { diameter, depth } => {
            let total = depth + CONE_RECESS_OVERCUT_MM;
            // Apex at the pit bottom, widening linearly through the
            // surface opening up to the overcut.
            let top_radius = diameter / 2.0 * total / depth;
            let mut cone =
                create_frustum(total, 0.0, top_radius, false, settings.cone_segments())?;
            cone.translate(DVec3::new(0.0, 0.0, -depth));
            Ok(cone)
        }
    }
}

/// What an indicator marker depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    /// Trailing end-of-row triangle.
    Triangle,
    /// Plain rectangle, also the fallback for unknown characters.
    Rectangle,
    /// A 3x5 dot-matrix glyph (A-Z, 0-9).
    Character(char),
}

/// 3x5 pixel glyphs, rows top to bottom, bit 2 the left pixel.
fn glyph_rows(c: char) -> Option<[u8; 5]> {
    let rows = match c.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b111, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        _ => return None,
    };
    Some(rows)
}

/// 2D footprint of a marker, centered on the origin.
///
/// Marker footprints fit the dot grid of a cell: one cell spacing wide
/// and two dot spacings tall. Glyph pixels are kept disjoint so they
/// can be punched as individual holes.
pub fn marker_outlines(kind: MarkerKind, dot_spacing: f64) -> Vec<Polygon2D> {
    let half_w = dot_spacing / 2.0;
    let half_h = dot_spacing;
    match kind {
        MarkerKind::Triangle => {
            // Points toward the end of the row.
            vec![Polygon2D::new(vec![
                DVec2::new(-half_w, half_h),
                DVec2::new(-half_w, -half_h),
                DVec2::new(half_w, 0.0),
            ])]
        }
        MarkerKind::Rectangle => {
            vec![Polygon2D::rectangle(DVec2::new(half_w * 2.0, half_h * 2.0), true)]
        }
        MarkerKind::Character(c) => match glyph_rows(c) {
            Some(rows) => {
                let pitch_x = dot_spacing / 2.0;
                let pitch_y = dot_spacing / 2.0;
                let pixel = pitch_x * 0.8 / 2.0;
                let mut outlines = Vec::new();
                for (row, bits) in rows.iter().enumerate() {
                    for col in 0..3 {
                        if bits & (1 << (2 - col)) == 0 {
                            continue;
                        }
                        let cx = (col as f64 - 1.0) * pitch_x;
                        let cy = (2.0 - row as f64) * pitch_y;
                        let mut square =
                            Polygon2D::rectangle(DVec2::new(pixel * 2.0, pixel * 2.0), true);
                        square.translate(DVec2::new(cx, cy));
                        outlines.push(square);
                    }
                }
                outlines
            }
            None => marker_outlines(MarkerKind::Rectangle, dot_spacing),
        },
    }
}

/// Builds the marker recess cutter, spanning from the marker depth
/// below the surface to a small overcut above it.
pub fn marker_cutter(kind: MarkerKind, dot_spacing: f64) -> MeshResult<Mesh> {
    let total = MARKER_RECESS_DEPTH_MM + MARKER_OVERCUT_MM;
    let mut cutter = Mesh::new();
    for outline in marker_outlines(kind, dot_spacing) {
        let mut solid = linear_extrude(&outline, total)?;
        solid.translate(DVec3::new(0.0, 0.0, -MARKER_RECESS_DEPTH_MM));
        cutter.merge(&solid);
    }
    Ok(cutter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::settings::Settings;
    use braille_mesh::is_watertight;

    #[test]
    fn test_cone_dot_volume() {
        let settings = Settings::default();
        let dot = dot_solid(&settings).unwrap();
        assert!(is_watertight(&dot));

        // Frustum volume: pi*h/3 * (R^2 + R*r + r^2).
        let (big, small, h) = (0.8, 0.25, 0.9);
        let expected =
            std::f64::consts::PI * h / 3.0 * (big * big + big * small + small * small);
        // Tessellated volume is below the analytic one.
        assert!(dot.signed_volume() > 0.9 * expected);
        assert!(dot.signed_volume() < expected);
    }

    #[test]
    fn test_rounded_dot_spans_full_height() {
        let mut settings = Settings::default();
        settings.dot_style = DotStyle::Rounded {
            base_diameter: 1.6,
            dome_diameter: 1.2,
            base_height: 0.3,
            dome_height: 0.6,
        };
        let dot = dot_solid(&settings).unwrap();
        let (min, max) = dot.bounding_box();
        assert_relative_eq!(min.z, 0.0, epsilon = 1e-9);
        assert_relative_eq!(max.z, 0.9, epsilon = 1e-9);
        assert!(dot.signed_volume() > 0.0);
    }

    #[test]
    fn test_hemisphere_cutter_straddles_surface() {
        let settings = Settings::default();
        let cutter = recess_cutter(&settings).unwrap();
        let (min, max) = cutter.bounding_box();
        assert_relative_eq!(min.z, -0.85, epsilon = 1e-9);
        assert_relative_eq!(max.z, 0.85, epsilon = 1e-9);
    }

    #[test]
    fn test_bowl_cutter_depth_and_opening() {
        let mut settings = Settings::default();
        settings.recess_style = RecessStyle::Bowl {
            diameter: 1.7,
            depth: 0.4,
        };
        let cutter = recess_cutter(&settings).unwrap();
        let (min, _) = cutter.bounding_box();
        assert_relative_eq!(min.z, -0.4, epsilon = 1e-9);
    }

    #[test]
    fn test_cone_cutter_overcuts_surface() {
        let mut settings = Settings::default();
        settings.recess_style = RecessStyle::Cone {
            diameter: 1.7,
            depth: 0.6,
        };
        let cutter = recess_cutter(&settings).unwrap();
        let (min, max) = cutter.bounding_box();
        assert_relative_eq!(min.z, -0.6, epsilon = 1e-9);
        assert_relative_eq!(max.z, CONE_RECESS_OVERCUT_MM, epsilon = 1e-9);
        assert!(is_watertight(&cutter));
    }

    #[test]
    fn test_triangle_and_rectangle_outlines() {
        let triangle = marker_outlines(MarkerKind::Triangle, 2.5);
        assert_eq!(triangle.len(), 1);
        assert_relative_eq!(triangle[0].area(), 2.5 * 2.5, epsilon = 1e-9);

        let rectangle = marker_outlines(MarkerKind::Rectangle, 2.5);
        assert_eq!(rectangle.len(), 1);
        assert_relative_eq!(rectangle[0].area(), 2.5 * 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_glyph_pixels_are_disjoint() {
        let pixels = marker_outlines(MarkerKind::Character('A'), 2.5);
        assert_eq!(pixels.len(), 10);
        for (i, a) in pixels.iter().enumerate() {
            for b in pixels.iter().skip(i + 1) {
                let ca = a.outer[0];
                let cb = b.outer[0];
                assert!((ca - cb).length() > 0.2);
            }
        }
    }

    #[test]
    fn test_unknown_glyph_falls_back_to_rectangle() {
        let fallback = marker_outlines(MarkerKind::Character('?'), 2.5);
        let rectangle = marker_outlines(MarkerKind::Rectangle, 2.5);
        assert_eq!(fallback.len(), rectangle.len());
        assert_relative_eq!(fallback[0].area(), rectangle[0].area());
    }

    #[test]
    fn test_marker_cutter_spans_depth_and_overcut() {
        let cutter = marker_cutter(MarkerKind::Triangle, 2.5).unwrap();
        let (min, max) = cutter.bounding_box();
        assert_relative_eq!(min.z, -MARKER_RECESS_DEPTH_MM, epsilon = 1e-9);
        assert_relative_eq!(max.z, MARKER_OVERCUT_MM, epsilon = 1e-9);
    }
}
