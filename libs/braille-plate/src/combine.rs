//! # Robust Combination
//!
//! Union and subtraction ladders over the boolean engines. Every
//! combination tries progressively cruder strategies instead of
//! failing: engines in order, then finer-grained fallbacks, and for
//! unions a final non-boolean merge. Results are always healed before
//! they are returned.

use braille_mesh::{builtin_engines, heal, BooleanEngine, Mesh, MeshError, MeshResult};
use config::constants::{CUTTER_BATCH_SIZE, UNION_BATCH_SIZE};
use tracing::{debug, warn};

/// Outcome of a union ladder.
#[derive(Debug)]
pub struct UnionOutcome {
    /// The combined solid.
    pub mesh: Mesh,
    /// True when any stage fell back past the preferred engine's
    /// n-ary union (pairwise tree or plain merge).
    pub degraded: bool,
}

/// Outcome of a subtraction ladder.
#[derive(Debug)]
pub struct SubtractOutcome {
    /// The carved solid.
    pub mesh: Mesh,
    /// Cutters actually applied.
    pub applied: usize,
    /// Cutters requested.
    pub total: usize,
}

impl SubtractOutcome {
    /// True when at least one cutter had to be skipped.
    pub fn degraded(&self) -> bool {
        self.applied < self.total
    }
}

/// Resolves the engine order, moving the preferred engine (by name)
/// to the front when it is known.
pub fn engine_candidates(preferred: Option<&str>) -> Vec<&'static dyn BooleanEngine> {
    let mut engines: Vec<&'static dyn BooleanEngine> = builtin_engines().to_vec();
    if let Some(name) = preferred {
        if let Some(index) = engines.iter().position(|e| e.name() == name) {
            let chosen = engines.remove(index);
            engines.insert(0, chosen);
        } else {
            warn!(engine = name, "unknown boolean engine, using default order");
        }
    }
    engines
}

fn fold_union(engine: &dyn BooleanEngine, solids: &[Mesh]) -> Option<Mesh> {
    let mut iter = solids.iter();
    let mut acc = iter.next()?.clone();
    for solid in iter {
        match engine.union(&acc, solid) {
            Ok(result) => acc = result,
            Err(error) => {
                debug!(engine = engine.name(), %error, "n-ary union failed");
                return None;
            }
        }
    }
    Some(acc)
}

fn pairwise_union(engine: &dyn BooleanEngine, solids: &[Mesh]) -> Option<Mesh> {
    let mut level: Vec<Mesh> = solids.to_vec();
    while level.len() > 1 {
        let mut next = Vec::with_capacity(level.len() / 2 + 1);
        for pair in level.chunks(2) {
            match pair {
                [a, b] => match engine.union(a, b) {
                    Ok(result) => next.push(result),
                    Err(error) => {
                        debug!(engine = engine.name(), %error, "pairwise union failed");
                        return None;
                    }
                },
                [single] => next.push(single.clone()),
                _ => unreachable!(),
            }
        }
        level = next;
    }
    level.pop()
}

/// Unions a set of solids, degrading gracefully.
///
/// Ladder: per engine, a left fold over all solids, then a pairwise
/// reduction tree; if every engine fails both, the solids are merged
/// without boolean resolution. The merge fallback produces internal
/// faces but keeps every feature present.
///
/// # Errors
///
/// Zero solids: an empty union has no defined result.
pub fn union_all(solids: &[Mesh], engines: &[&dyn BooleanEngine]) -> MeshResult<UnionOutcome> {
    match solids {
        [] => return Err(MeshError::degenerate("union of zero solids")),
        [single] => {
            let mut mesh = single.clone();
            heal(&mut mesh);
            return Ok(UnionOutcome {
                mesh,
                degraded: false,
            });
        }
        _ => {}
    }

    for (rank, engine) in engines.iter().enumerate() {
        if let Some(mut mesh) = fold_union(*engine, solids) {
            heal(&mut mesh);
            return Ok(UnionOutcome {
                mesh,
                degraded: rank > 0,
            });
        }
        if let Some(mut mesh) = pairwise_union(*engine, solids) {
            debug!(engine = engine.name(), "union recovered via pairwise tree");
            heal(&mut mesh);
            return Ok(UnionOutcome {
                mesh,
                degraded: true,
            });
        }
    }

    warn!(
        solids = solids.len(),
        "all boolean engines failed, merging without resolution"
    );
    let mut mesh = Mesh::new();
    for solid in solids {
        mesh.merge(solid);
    }
    heal(&mut mesh);
    Ok(UnionOutcome {
        mesh,
        degraded: true,
    })
}

/// Unions a large set in batches to bound BSP depth, then unions the
/// batch results.
///
/// # Errors
///
/// Zero solids, as in [`union_all`].
pub fn union_in_batches(
    solids: &[Mesh],
    engines: &[&dyn BooleanEngine],
) -> MeshResult<UnionOutcome> {
    if solids.len() <= UNION_BATCH_SIZE {
        return union_all(solids, engines);
    }
    let mut degraded = false;
    let mut batches = Vec::with_capacity(solids.len() / UNION_BATCH_SIZE + 1);
    for batch in solids.chunks(UNION_BATCH_SIZE) {
        let outcome = union_all(batch, engines)?;
        degraded |= outcome.degraded;
        batches.push(outcome.mesh);
    }
    let outcome = union_all(&batches, engines)?;
    Ok(UnionOutcome {
        mesh: outcome.mesh,
        degraded: degraded || outcome.degraded,
    })
}

fn subtract_once(
    engine: &dyn BooleanEngine,
    base: &Mesh,
    cutter: &Mesh,
) -> Option<Mesh> {
    match engine.difference(base, cutter) {
        Ok(result) => Some(result),
        Err(error) => {
            debug!(engine = engine.name(), %error, "difference failed");
            None
        }
    }
}

/// Subtracts a set of cutters from a base solid, degrading gracefully.
///
/// Ladder: per engine, all cutters unioned and removed at once; then
/// cutter-by-cutter with the first engine that handles each, skipping
/// cutters no engine can apply. The base survives even when every
/// cutter is skipped.
pub fn subtract_all(
    base: &Mesh,
    cutters: &[Mesh],
    engines: &[&dyn BooleanEngine],
) -> SubtractOutcome {
    let total = cutters.len();
    if cutters.is_empty() {
        let mut mesh = base.clone();
        heal(&mut mesh);
        return SubtractOutcome {
            mesh,
            applied: 0,
            total,
        };
    }

    // Fast path: a single combined cutter. Not attempted when any
    // cutter carries non-finite coordinates: the merge fallback would
    // fold the poison into the combined solid.
    let all_finite = cutters.iter().all(Mesh::is_finite);
    if all_finite {
        if let Ok(combined) = union_in_batches(cutters, engines) {
            if !combined.degraded {
                for engine in engines {
                    if let Some(mut mesh) = subtract_once(*engine, base, &combined.mesh) {
                        heal(&mut mesh);
                        return SubtractOutcome {
                            mesh,
                            applied: total,
                            total,
                        };
                    }
                }
            }
        }
    }

    // Per-cutter fallback, skipping the ones that fail everywhere.
    let mut mesh = base.clone();
    let mut applied = 0;
    for (index, cutter) in cutters.iter().enumerate() {
        if !cutter.is_finite() {
            warn!(cutter = index, "skipping cutter with non-finite coordinates");
            continue;
        }
        let mut carved = None;
        for engine in engines {
            if let Some(result) = subtract_once(*engine, &mesh, cutter) {
                carved = Some(result);
                break;
            }
        }
        match carved {
            Some(result) => {
                mesh = result;
                applied += 1;
            }
            None => {
                warn!(cutter = index, "skipping cutter no engine could apply");
            }
        }
    }
    heal(&mut mesh);
    SubtractOutcome {
        mesh,
        applied,
        total,
    }
}

/// Subtracts a large cutter set in batches: cutters within a batch are
/// unioned first, then each batch is removed from the base.
pub fn subtract_in_batches(
    base: &Mesh,
    cutters: &[Mesh],
    engines: &[&dyn BooleanEngine],
) -> SubtractOutcome {
    if cutters.len() <= CUTTER_BATCH_SIZE {
        return subtract_all(base, cutters, engines);
    }
    let total = cutters.len();
    let mut mesh = base.clone();
    let mut applied = 0;
    for batch in cutters.chunks(CUTTER_BATCH_SIZE) {
        let outcome = subtract_all(&mesh, batch, engines);
        applied += outcome.applied;
        mesh = outcome.mesh;
    }
    SubtractOutcome {
        mesh,
        applied,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use braille_mesh::primitives::create_cuboid;
    use braille_mesh::is_watertight;
    use glam::DVec3;

    fn engines() -> Vec<&'static dyn BooleanEngine> {
        engine_candidates(None)
    }

    fn unit_cube_at(offset: DVec3) -> Mesh {
        let mut cube = create_cuboid(DVec3::ONE, false).unwrap();
        cube.translate(offset);
        cube
    }

    #[test]
    fn test_engine_candidates_default_order() {
        let engines = engine_candidates(None);
        assert_eq!(engines[0].name(), "clip-bsp");
        assert_eq!(engines[1].name(), "csg-bsp");
    }

    #[test]
    fn test_engine_candidates_preference() {
        let engines = engine_candidates(Some("csg-bsp"));
        assert_eq!(engines[0].name(), "csg-bsp");
        assert_eq!(engines[1].name(), "clip-bsp");
        assert_eq!(engines.len(), 2);

        // Unknown names keep the default order.
        let engines = engine_candidates(Some("no-such-engine"));
        assert_eq!(engines[0].name(), "clip-bsp");
    }

    #[test]
    fn test_union_all_disjoint() {
        let solids = [
            unit_cube_at(DVec3::ZERO),
            unit_cube_at(DVec3::new(3.0, 0.0, 0.0)),
        ];
        let outcome = union_all(&solids, &engines()).unwrap();
        assert!(!outcome.degraded);
        assert!(is_watertight(&outcome.mesh));
        assert_relative_eq!(outcome.mesh.signed_volume(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_union_all_overlapping() {
        let solids = [
            unit_cube_at(DVec3::ZERO),
            unit_cube_at(DVec3::new(0.5, 0.0, 0.0)),
        ];
        let outcome = union_all(&solids, &engines()).unwrap();
        assert_relative_eq!(outcome.mesh.signed_volume(), 1.5, epsilon = 1e-9);
    }

    #[test]
    fn test_union_of_nothing_is_an_error() {
        assert!(union_all(&[], &engines()).is_err());
        assert!(union_in_batches(&[], &engines()).is_err());
    }

    #[test]
    fn test_union_single_solid() {
        let outcome = union_all(&[unit_cube_at(DVec3::ZERO)], &engines()).unwrap();
        assert!(!outcome.degraded);
        assert_relative_eq!(outcome.mesh.signed_volume(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_union_in_batches_many_disjoint() {
        let solids: Vec<Mesh> = (0..40)
            .map(|i| unit_cube_at(DVec3::new(2.0 * i as f64, 0.0, 0.0)))
            .collect();
        let outcome = union_in_batches(&solids, &engines()).unwrap();
        assert_relative_eq!(outcome.mesh.signed_volume(), 40.0, epsilon = 1e-6);
    }

    #[test]
    fn test_subtract_all() {
        let base = create_cuboid(DVec3::new(4.0, 4.0, 1.0), false).unwrap();
        let cutter = {
            let mut c = create_cuboid(DVec3::new(1.0, 1.0, 2.0), false).unwrap();
            c.translate(DVec3::new(1.0, 1.0, -0.5));
            c
        };
        let outcome = subtract_all(&base, &[cutter], &engines());
        assert_eq!(outcome.applied, 1);
        assert!(!outcome.degraded());
        assert_relative_eq!(outcome.mesh.signed_volume(), 15.0, epsilon = 1e-9);
    }

    #[test]
    fn test_subtract_no_cutters_is_identity() {
        let base = unit_cube_at(DVec3::ZERO);
        let outcome = subtract_all(&base, &[], &engines());
        assert_eq!(outcome.applied, 0);
        assert_relative_eq!(outcome.mesh.signed_volume(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_subtract_survives_degenerate_cutter() {
        let base = unit_cube_at(DVec3::ZERO);
        // A cutter that swallows the base entirely empties the result,
        // which every engine reports as failure; the base survives.
        let swallow = {
            let mut c = create_cuboid(DVec3::splat(5.0), false).unwrap();
            c.translate(DVec3::splat(-2.0));
            c
        };
        let outcome = subtract_all(&base, &[swallow], &engines());
        assert_eq!(outcome.applied, 0);
        assert!(outcome.degraded());
        assert_relative_eq!(outcome.mesh.signed_volume(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_subtract_skips_non_finite_cutter() {
        let base = unit_cube_at(DVec3::ZERO);
        let mut poisoned = unit_cube_at(DVec3::ZERO);
        poisoned.translate(DVec3::splat(f64::NAN));

        // The poisoned cutter is dropped and counted as not applied,
        // so the outcome is visibly degraded rather than silently
        // leaving the base untouched.
        let outcome = subtract_all(&base, &[poisoned], &engines());
        assert_eq!(outcome.applied, 0);
        assert!(outcome.degraded());
        assert!(outcome.mesh.is_finite());
        assert_relative_eq!(outcome.mesh.signed_volume(), 1.0, epsilon = 1e-9);
    }
}
