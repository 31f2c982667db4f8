//! # Plate Assembly
//!
//! Orchestrates layout, shape building, and boolean combination into
//! a complete printable plate or cylinder shell.
//!
//! Construction never fails once the input validates: every boolean
//! stage has a fallback, down to returning the bare base. The
//! [`BuildReport`] records how far down the ladder the build had to
//! reach.

use braille_mesh::primitives::{create_cuboid, create_tube};
use braille_mesh::{linear_extrude, BooleanEngine, Mesh, MeshError, Polygon2D};
use config::constants::MARKER_RECESS_DEPTH_MM;
use glam::{DVec2, DVec3};
use tracing::{debug, warn};

use crate::cell::DotPattern;
use crate::combine::{engine_candidates, subtract_in_batches, union_in_batches};
use crate::error::{PlateError, PlateResult};
use crate::layout::{check_capacity, CardLayout, CylinderLayout};
use crate::settings::{PlateKind, Settings, ShapeKind};
use crate::shapes::{dot_solid, marker_cutter, marker_outlines, recess_cutter, MarkerKind};

/// How faithfully the build matched the requested geometry, from best
/// to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BuildTier {
    /// Every feature present, resolved by the preferred strategy.
    Exact,
    /// All features present but at least one stage fell back (pairwise
    /// union, per-cutter subtraction, merge without resolution).
    Degraded,
    /// Dots/recesses present but marker recesses could not be cut.
    MarkersSkipped,
    /// Only the base plate or shell could be produced.
    BareBase,
}

/// Summary of one plate build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    /// Fallback tier the build ended on.
    pub tier: BuildTier,
    /// Raised dots (positive) or dot recesses (negative) placed.
    pub dot_count: usize,
    /// Marker recesses placed (or attempted, for skipped tiers).
    pub marker_count: usize,
}

/// A single dot to place: grid position plus dot index within the
/// cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DotSite {
    pub row: usize,
    pub col: usize,
    pub dot: usize,
}

/// Decodes input lines into dot patterns.
///
/// # Errors
///
/// [`PlateError::NonBrailleCharacter`] with 1-based line and column on
/// the first character outside the braille block (space allowed).
pub(crate) fn decode_lines(lines: &[String]) -> PlateResult<Vec<Vec<DotPattern>>> {
    lines
        .iter()
        .enumerate()
        .map(|(row, line)| {
            line.chars()
                .enumerate()
                .map(|(col, c)| {
                    DotPattern::from_char(c).ok_or(PlateError::NonBrailleCharacter {
                        line: row + 1,
                        column: col + 1,
                        character: c,
                    })
                })
                .collect()
        })
        .collect()
}

/// Set dots across all decoded lines, for the positive plate.
pub(crate) fn text_dot_sites(patterns: &[Vec<DotPattern>]) -> Vec<DotSite> {
    let mut sites = Vec::new();
    for (row, line) in patterns.iter().enumerate() {
        for (col, pattern) in line.iter().enumerate() {
            for dot in pattern.dots() {
                sites.push(DotSite { row, col, dot });
            }
        }
    }
    sites
}

/// Every dot position of the full grid, for the negative plate. The
/// counter plate must mate with any positive plate, so text is
/// irrelevant here.
pub(crate) fn grid_dot_sites(settings: &Settings) -> Vec<DotSite> {
    let mut sites =
        Vec::with_capacity(settings.grid_rows * settings.grid_columns * 6);
    for row in 0..settings.grid_rows {
        for col in 0..settings.grid_columns {
            for dot in 0..6 {
                sites.push(DotSite { row, col, dot });
            }
        }
    }
    sites
}

/// Leading and trailing marker kinds for every grid row. The leading
/// marker shows the first character of the original (pre-translation)
/// line when it is alphanumeric, otherwise a plain rectangle.
pub(crate) fn marker_rows(
    settings: &Settings,
    original_lines: Option<&[String]>,
) -> Vec<(usize, MarkerKind, MarkerKind)> {
    if !settings.indicators {
        return Vec::new();
    }
    (0..settings.grid_rows)
        .map(|row| {
            let leading = original_lines
                .and_then(|lines| lines.get(row))
                .and_then(|line| line.chars().next())
                .filter(char::is_ascii_alphanumeric)
                .map(MarkerKind::Character)
                .unwrap_or(MarkerKind::Rectangle);
            (row, leading, MarkerKind::Triangle)
        })
        .collect()
}

fn mesh_err(error: MeshError) -> PlateError {
    PlateError::invalid_settings(format!("geometry construction failed: {error}"))
}

/// Tessellation for the cylinder shell, aiming for facets of roughly
/// two millimeters of arc.
fn shell_segments(settings: &Settings) -> u32 {
    let circumference = std::f64::consts::PI * settings.cylinder_diameter;
    ((circumference / 2.0).ceil() as u32).clamp(32, 256)
}

/// Builds a complete plate or shell from braille Unicode lines.
///
/// `lines` must already be braille (U+2800..=U+28FF or space); unknown
/// characters and overfull lines are caller errors. `original_lines`
/// optionally carries the pre-translation text, used only to pick
/// leading marker glyphs.
///
/// # Errors
///
/// Only input validation fails; geometric degradation is reported
/// through the [`BuildReport`] instead.
pub fn build_plate(
    lines: &[String],
    settings: &Settings,
    plate: PlateKind,
    shape: ShapeKind,
    original_lines: Option<&[String]>,
) -> PlateResult<(Mesh, BuildReport)> {
    settings.validate()?;
    check_capacity(lines, settings)?;
    let patterns = decode_lines(lines)?;
    let engines = engine_candidates(None);
    let markers = marker_rows(settings, original_lines);

    match (shape, plate) {
        (ShapeKind::Card, PlateKind::Positive) => {
            positive_card(&patterns, settings, &markers, &engines)
        }
        (ShapeKind::Card, PlateKind::Negative) => {
            negative_card(settings, &markers, &engines)
        }
        (ShapeKind::Cylinder, PlateKind::Positive) => {
            positive_cylinder(&patterns, settings, &markers, &engines)
        }
        (ShapeKind::Cylinder, PlateKind::Negative) => {
            negative_cylinder(settings, &markers, &engines)
        }
    }
}

/// Marker hole rings at their card positions, for 2D punching.
fn card_marker_rings(
    layout: &CardLayout,
    markers: &[(usize, MarkerKind, MarkerKind)],
    dot_spacing: f64,
) -> Vec<Vec<DVec2>> {
    let mut rings = Vec::new();
    for &(row, leading, trailing) in markers {
        for (kind, center) in [
            (leading, layout.leading_marker_center(row)),
            (trailing, layout.trailing_marker_center(row)),
        ] {
            for mut outline in marker_outlines(kind, dot_spacing) {
                outline.translate(center);
                rings.push(outline.outer);
            }
        }
    }
    rings
}

/// Card base with marker recesses cut by stacking a punched top sheet
/// on a thinner slab, avoiding mesh booleans entirely.
fn two_dee_marker_base(
    settings: &Settings,
    layout: &CardLayout,
    markers: &[(usize, MarkerKind, MarkerKind)],
) -> Option<Mesh> {
    let depth = MARKER_RECESS_DEPTH_MM;
    if settings.thickness <= depth {
        return None;
    }

    let mut sheet = Polygon2D::rectangle(DVec2::new(settings.width, settings.height), false);
    let rings = card_marker_rings(layout, markers, settings.dot_spacing);
    if let Err(error) = sheet.punch_holes(rings) {
        debug!(%error, "marker outlines not punchable, using mesh subtraction");
        return None;
    }

    let mut base = create_cuboid(
        DVec3::new(settings.width, settings.height, settings.thickness - depth),
        false,
    )
    .ok()?;
    let mut top = linear_extrude(&sheet, depth).ok()?;
    top.translate(DVec3::new(0.0, 0.0, settings.thickness - depth));
    base.merge(&top);
    Some(base)
}

/// Marker cutter solids at their card positions.
fn card_marker_cutters(
    settings: &Settings,
    layout: &CardLayout,
    markers: &[(usize, MarkerKind, MarkerKind)],
) -> PlateResult<Vec<Mesh>> {
    let mut cutters = Vec::new();
    for &(row, leading, trailing) in markers {
        for (kind, center) in [
            (leading, layout.leading_marker_center(row)),
            (trailing, layout.trailing_marker_center(row)),
        ] {
            let mut cutter =
                marker_cutter(kind, settings.dot_spacing).map_err(mesh_err)?;
            cutter.translate(DVec3::new(center.x, center.y, settings.thickness));
            cutters.push(cutter);
        }
    }
    Ok(cutters)
}

fn positive_card(
    patterns: &[Vec<DotPattern>],
    settings: &Settings,
    markers: &[(usize, MarkerKind, MarkerKind)],
    engines: &[&dyn BooleanEngine],
) -> PlateResult<(Mesh, BuildReport)> {
    let layout = CardLayout::new(settings);
    let sites = text_dot_sites(patterns);
    let marker_count = markers.len() * 2;
    let mut tier = BuildTier::Exact;

    // Base with marker recesses, preferring the 2D-first path.
    let base = match two_dee_marker_base(settings, &layout, markers) {
        Some(base) if !markers.is_empty() => base,
        _ => {
            let slab = create_cuboid(
                DVec3::new(settings.width, settings.height, settings.thickness),
                false,
            )
            .map_err(mesh_err)?;
            if markers.is_empty() {
                slab
            } else {
                let cutters = card_marker_cutters(settings, &layout, markers)?;
                let outcome = subtract_in_batches(&slab, &cutters, engines);
                tier = tier.max(if outcome.applied == 0 {
                    warn!("no marker recess could be cut, markers skipped");
                    BuildTier::MarkersSkipped
                } else if outcome.degraded() {
                    BuildTier::Degraded
                } else {
                    BuildTier::Exact
                });
                outcome.mesh
            }
        }
    };

    // Raised dots, unioned onto the base in batches.
    let dot = dot_solid(settings).map_err(mesh_err)?;
    let mut solids = Vec::with_capacity(sites.len() + 1);
    solids.push(base);
    for site in &sites {
        let position = layout.dot_position(site.row, site.col, site.dot);
        let mut solid = dot.clone();
        solid.translate(DVec3::new(position.x, position.y, settings.thickness));
        solids.push(solid);
    }
    // Never empty: the base is always present.
    let outcome = union_in_batches(&solids, engines).map_err(mesh_err)?;
    if outcome.degraded {
        tier = tier.max(BuildTier::Degraded);
    }
    debug!(
        dots = sites.len(),
        markers = marker_count,
        tier = ?tier,
        "positive card built"
    );

    Ok((
        outcome.mesh,
        BuildReport {
            tier,
            dot_count: sites.len(),
            marker_count,
        },
    ))
}

/// Last-resort negative card: straight circular holes punched through
/// the full thickness, ignoring the recess shape.
fn two_dee_negative_card(
    settings: &Settings,
    layout: &CardLayout,
    markers: &[(usize, MarkerKind, MarkerKind)],
) -> Option<Mesh> {
    let radius = match settings.recess_style.normalized() {
        crate::settings::RecessStyle::Hemisphere { diameter }
        | crate::settings::RecessStyle::Bowl { diameter, .. }
        | crate::settings::RecessStyle::Cone { diameter, .. } => diameter / 2.0,
    };

    let mut rings = Vec::new();
    for site in grid_dot_sites(settings) {
        let position = layout.dot_position(site.row, site.col, site.dot);
        let mut hole = Polygon2D::circle(radius, 16);
        hole.translate(position);
        rings.push(hole.outer);
    }
    rings.extend(card_marker_rings(layout, markers, settings.dot_spacing));

    let mut sheet = Polygon2D::rectangle(DVec2::new(settings.width, settings.height), false);
    if let Err(error) = sheet.punch_holes(rings) {
        warn!(%error, "2D hole fallback not punchable");
        return None;
    }
    linear_extrude(&sheet, settings.thickness).ok()
}

fn negative_card(
    settings: &Settings,
    markers: &[(usize, MarkerKind, MarkerKind)],
    engines: &[&dyn BooleanEngine],
) -> PlateResult<(Mesh, BuildReport)> {
    let layout = CardLayout::new(settings);
    let sites = grid_dot_sites(settings);
    let marker_count = markers.len() * 2;

    let base = create_cuboid(
        DVec3::new(settings.width, settings.height, settings.thickness),
        false,
    )
    .map_err(mesh_err)?;

    let recess = recess_cutter(settings).map_err(mesh_err)?;
    let mut cutters = Vec::with_capacity(sites.len() + marker_count);
    for site in &sites {
        let position = layout.dot_position(site.row, site.col, site.dot);
        let mut cutter = recess.clone();
        cutter.translate(DVec3::new(position.x, position.y, settings.thickness));
        cutters.push(cutter);
    }
    cutters.extend(card_marker_cutters(settings, &layout, markers)?);

    let outcome = subtract_in_batches(&base, &cutters, engines);
    let report = |tier| BuildReport {
        tier,
        dot_count: sites.len(),
        marker_count,
    };

    if outcome.applied == outcome.total {
        return Ok((outcome.mesh, report(BuildTier::Exact)));
    }
    if outcome.applied > 0 {
        return Ok((outcome.mesh, report(BuildTier::Degraded)));
    }

    warn!("all recess subtraction failed, trying 2D hole fallback");
    if let Some(mesh) = two_dee_negative_card(settings, &layout, markers) {
        return Ok((mesh, report(BuildTier::Degraded)));
    }

    warn!("2D hole fallback failed, returning bare base");
    Ok((base, report(BuildTier::BareBase)))
}

/// Marker cutter solids on the cylinder surface.
fn cylinder_marker_cutters(
    settings: &Settings,
    layout: &CylinderLayout,
    markers: &[(usize, MarkerKind, MarkerKind)],
) -> PlateResult<Vec<Mesh>> {
    let mut cutters = Vec::new();
    for &(row, leading, trailing) in markers {
        for (kind, (theta, z)) in [
            (leading, layout.leading_marker_center(row)),
            (trailing, layout.trailing_marker_center(row)),
        ] {
            let mut cutter =
                marker_cutter(kind, settings.dot_spacing).map_err(mesh_err)?;
            cutter.transform(&layout.frame(theta, z));
            cutters.push(cutter);
        }
    }
    Ok(cutters)
}

fn cylinder_shell(settings: &Settings) -> PlateResult<Mesh> {
    let outer = settings.cylinder_diameter / 2.0;
    create_tube(
        settings.cylinder_height,
        outer,
        outer - settings.thickness,
        shell_segments(settings),
    )
    .map_err(mesh_err)
}

fn positive_cylinder(
    patterns: &[Vec<DotPattern>],
    settings: &Settings,
    markers: &[(usize, MarkerKind, MarkerKind)],
    engines: &[&dyn BooleanEngine],
) -> PlateResult<(Mesh, BuildReport)> {
    let layout = CylinderLayout::new(settings);
    let sites = text_dot_sites(patterns);
    let marker_count = markers.len() * 2;
    let mut tier = BuildTier::Exact;

    let shell = cylinder_shell(settings)?;
    let base = if markers.is_empty() {
        shell
    } else {
        let cutters = cylinder_marker_cutters(settings, &layout, markers)?;
        let outcome = subtract_in_batches(&shell, &cutters, engines);
        tier = tier.max(if outcome.applied == 0 {
            warn!("no marker recess could be cut, markers skipped");
            BuildTier::MarkersSkipped
        } else if outcome.degraded() {
            BuildTier::Degraded
        } else {
            BuildTier::Exact
        });
        outcome.mesh
    };

    let dot = dot_solid(settings).map_err(mesh_err)?;
    let mut solids = Vec::with_capacity(sites.len() + 1);
    solids.push(base);
    for site in &sites {
        let (theta, z) = layout.dot_position(site.row, site.col, site.dot);
        let mut solid = dot.clone();
        solid.transform(&layout.frame(theta, z));
        solids.push(solid);
    }
    // Never empty: the base is always present.
    let outcome = union_in_batches(&solids, engines).map_err(mesh_err)?;
    if outcome.degraded {
        tier = tier.max(BuildTier::Degraded);
    }

    Ok((
        outcome.mesh,
        BuildReport {
            tier,
            dot_count: sites.len(),
            marker_count,
        },
    ))
}

fn negative_cylinder(
    settings: &Settings,
    markers: &[(usize, MarkerKind, MarkerKind)],
    engines: &[&dyn BooleanEngine],
) -> PlateResult<(Mesh, BuildReport)> {
    let layout = CylinderLayout::new(settings);
    let sites = grid_dot_sites(settings);
    let marker_count = markers.len() * 2;

    let shell = cylinder_shell(settings)?;
    let recess = recess_cutter(settings).map_err(mesh_err)?;
    let mut cutters = Vec::with_capacity(sites.len() + marker_count);
    for site in &sites {
        let (theta, z) = layout.dot_position(site.row, site.col, site.dot);
        let mut cutter = recess.clone();
        cutter.transform(&layout.frame(theta, z));
        cutters.push(cutter);
    }
    cutters.extend(cylinder_marker_cutters(settings, &layout, markers)?);

    let outcome = subtract_in_batches(&shell, &cutters, engines);
    let tier = if outcome.applied == outcome.total {
        BuildTier::Exact
    } else if outcome.applied > 0 {
        BuildTier::Degraded
    } else {
        warn!("all recess subtraction failed, returning bare shell");
        return Ok((
            shell,
            BuildReport {
                tier: BuildTier::BareBase,
                dot_count: sites.len(),
                marker_count,
            },
        ));
    };

    Ok((
        outcome.mesh,
        BuildReport {
            tier,
            dot_count: sites.len(),
            marker_count,
        },
    ))
}
