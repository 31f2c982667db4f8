//! End-to-end plate builds for every plate/shape combination.

use braille_plate::{
    build_plate, BuildTier, PlateError, PlateKind, RecessStyle, Settings, ShapeKind,
};

fn small_grid(columns: usize, rows: usize) -> Settings {
    let mut settings = Settings::default();
    settings.grid_columns = columns;
    settings.grid_rows = rows;
    // Coarse tessellation keeps the boolean trees small; the
    // assertions below are about counts and volumes, not surface
    // quality.
    settings.dome_segments = 4;
    settings.cone_segments = 8;
    settings.cylinder_diameter = 20.0;
    settings
}

#[test]
fn positive_card_with_full_line() {
    let settings = small_grid(4, 4);
    // dots-1, dots-12, dots-14, dots-145.
    let lines = vec!["\u{2801}\u{2803}\u{2809}\u{2819}".to_string()];
    let (mesh, report) = build_plate(
        &lines,
        &settings,
        PlateKind::Positive,
        ShapeKind::Card,
        None,
    )
    .unwrap();

    assert_eq!(report.dot_count, 8);
    assert_eq!(report.marker_count, 8);
    assert!(report.tier <= BuildTier::Degraded);
    assert!(mesh.triangle_count() > 0);
    assert!(mesh.signed_volume() > 0.0);

    // The plate must contain at least the base slab.
    let slab_volume = settings.width * settings.height * settings.thickness;
    assert!(mesh.signed_volume() > 0.9 * slab_volume);
}

#[test]
fn positive_card_rejects_overfull_line() {
    let settings = small_grid(4, 4);
    let lines = vec!["\u{2801}".repeat(5)];
    let result = build_plate(
        &lines,
        &settings,
        PlateKind::Positive,
        ShapeKind::Card,
        None,
    );
    assert_eq!(
        result.unwrap_err(),
        PlateError::LineOverflow {
            line: 1,
            count: 5,
            available: 4,
        }
    );
}

#[test]
fn positive_card_rejects_too_many_lines() {
    let settings = small_grid(4, 2);
    let lines: Vec<String> = (0..3).map(|_| "\u{2801}".to_string()).collect();
    let result = build_plate(
        &lines,
        &settings,
        PlateKind::Positive,
        ShapeKind::Card,
        None,
    );
    assert_eq!(
        result.unwrap_err(),
        PlateError::TooManyLines { count: 3, rows: 2 }
    );
}

#[test]
fn positive_card_rejects_non_braille_text() {
    let settings = small_grid(4, 4);
    let lines = vec!["\u{2801}a".to_string()];
    let result = build_plate(
        &lines,
        &settings,
        PlateKind::Positive,
        ShapeKind::Card,
        None,
    );
    assert_eq!(
        result.unwrap_err(),
        PlateError::NonBrailleCharacter {
            line: 1,
            column: 2,
            character: 'a',
        }
    );
}

#[test]
fn positive_card_without_indicators_has_no_markers() {
    let mut settings = small_grid(2, 1);
    settings.indicators = false;
    let lines = vec!["\u{2801}".to_string()];
    let (_, report) = build_plate(
        &lines,
        &settings,
        PlateKind::Positive,
        ShapeKind::Card,
        None,
    )
    .unwrap();
    assert_eq!(report.marker_count, 0);
}

#[test]
fn negative_card_covers_full_grid() {
    let settings = small_grid(2, 2);
    // Text is irrelevant for the counter plate.
    let lines = vec!["\u{2801}".to_string()];
    let (mesh, report) = build_plate(
        &lines,
        &settings,
        PlateKind::Negative,
        ShapeKind::Card,
        None,
    )
    .unwrap();

    assert_eq!(report.dot_count, 2 * 2 * 6);
    assert_eq!(report.marker_count, 4);
    assert!(report.tier < BuildTier::BareBase);

    // Recesses remove material from the slab.
    let slab_volume = settings.width * settings.height * settings.thickness;
    let volume = mesh.signed_volume();
    assert!(volume > 0.0);
    assert!(volume < slab_volume);
}

#[test]
fn invalid_settings_are_rejected() {
    let mut settings = small_grid(2, 1);
    settings.dot_spacing = -1.0;
    let result = build_plate(
        &[],
        &settings,
        PlateKind::Positive,
        ShapeKind::Card,
        None,
    );
    assert!(matches!(
        result.unwrap_err(),
        PlateError::InvalidSettings(_)
    ));
}

#[test]
fn negative_card_rejects_zero_depth_cone_recess() {
    let mut settings = small_grid(2, 1);
    settings.recess_style = RecessStyle::Cone {
        diameter: 1.7,
        depth: 0.0,
    };
    let result = build_plate(
        &[],
        &settings,
        PlateKind::Negative,
        ShapeKind::Card,
        None,
    );
    assert!(matches!(
        result.unwrap_err(),
        PlateError::InvalidSettings(_)
    ));
}

#[test]
fn positive_cylinder_raises_dots_radially() {
    let mut settings = small_grid(2, 1);
    settings.indicators = false;
    let lines = vec!["\u{2801}".to_string()];
    let (mesh, report) = build_plate(
        &lines,
        &settings,
        PlateKind::Positive,
        ShapeKind::Cylinder,
        None,
    )
    .unwrap();

    assert_eq!(report.dot_count, 1);
    let (min, max) = mesh.bounding_box();
    let outer = settings.cylinder_diameter / 2.0;
    // Dot tip reaches past the shell surface.
    let reach = max.x.max(max.y).max(-min.x).max(-min.y);
    assert!(reach > outer);
    assert!(reach <= outer + settings.dot_style.height() + 1e-6);
}

#[test]
fn negative_cylinder_reports_grid_recesses() {
    let mut settings = small_grid(2, 1);
    settings.indicators = false;
    let (mesh, report) = build_plate(
        &[],
        &settings,
        PlateKind::Negative,
        ShapeKind::Cylinder,
        None,
    )
    .unwrap();

    assert_eq!(report.dot_count, 2 * 6);
    assert!(mesh.signed_volume() > 0.0);
}

#[test]
fn marker_glyph_follows_original_text() {
    let settings = small_grid(4, 2);
    let lines = vec!["\u{2801}".to_string()];
    let original = vec!["Bread".to_string()];
    // Glyph selection must not change counts or break the build.
    let (_, report) = build_plate(
        &lines,
        &settings,
        PlateKind::Positive,
        ShapeKind::Card,
        Some(&original),
    )
    .unwrap();
    assert_eq!(report.marker_count, 4);
}
