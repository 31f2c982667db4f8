//! # Boolean Engine Tests
//!
//! Integration tests exercising both engines on closed solids with
//! known volumes.

use super::{builtin_engines, BooleanEngine, ClipBsp, CsgBsp};
use crate::primitives::create_cuboid;
use crate::repair::heal;
use glam::DVec3;

fn cube(size: f64, offset: DVec3) -> crate::Mesh {
    let mut mesh = create_cuboid(DVec3::splat(size), true).unwrap();
    mesh.translate(offset);
    mesh
}

fn engines() -> Vec<&'static dyn BooleanEngine> {
    builtin_engines().to_vec()
}

#[test]
fn test_engine_names_are_distinct() {
    assert_ne!(ClipBsp.name(), CsgBsp.name());
}

#[test]
fn test_union_disjoint_cubes() {
    for engine in engines() {
        let a = cube(2.0, DVec3::ZERO);
        let b = cube(2.0, DVec3::new(10.0, 0.0, 0.0));
        let result = engine.union(&a, &b).unwrap();
        assert!(
            (result.signed_volume() - 16.0).abs() < 1e-6,
            "engine {}: volume {}",
            engine.name(),
            result.signed_volume()
        );
    }
}

#[test]
fn test_union_overlapping_cubes() {
    for engine in engines() {
        let a = cube(2.0, DVec3::ZERO);
        let b = cube(2.0, DVec3::new(1.0, 0.0, 0.0));
        let mut result = engine.union(&a, &b).unwrap();
        heal(&mut result);
        // 8 + 8 - (1 x 2 x 2) overlap
        assert!(
            (result.signed_volume() - 12.0).abs() < 1e-6,
            "engine {}: volume {}",
            engine.name(),
            result.signed_volume()
        );
    }
}

#[test]
fn test_union_is_commutative_in_volume() {
    for engine in engines() {
        let a = cube(2.0, DVec3::ZERO);
        let b = cube(1.5, DVec3::new(0.75, 0.5, 0.0));
        let ab = engine.union(&a, &b).unwrap();
        let ba = engine.union(&b, &a).unwrap();
        assert!(
            (ab.signed_volume() - ba.signed_volume()).abs() < 1e-6,
            "engine {}",
            engine.name()
        );
    }
}

#[test]
fn test_difference_carves_volume() {
    for engine in engines() {
        let outer = cube(2.0, DVec3::ZERO);
        let inner = cube(1.0, DVec3::ZERO);
        let result = engine.difference(&outer, &inner).unwrap();
        assert!(
            (result.signed_volume() - 7.0).abs() < 1e-6,
            "engine {}: volume {}",
            engine.name(),
            result.signed_volume()
        );
    }
}

#[test]
fn test_difference_with_disjoint_cutter_is_identity() {
    for engine in engines() {
        let base = cube(2.0, DVec3::ZERO);
        let cutter = cube(1.0, DVec3::new(10.0, 0.0, 0.0));
        let result = engine.difference(&base, &cutter).unwrap();
        assert!(
            (result.signed_volume() - 8.0).abs() < 1e-6,
            "engine {}",
            engine.name()
        );
    }
}

#[test]
fn test_difference_protruding_cutter() {
    for engine in engines() {
        let base = cube(2.0, DVec3::ZERO);
        // Cutter pokes through the top face, like a recess cutter
        let cutter = cube(1.0, DVec3::new(0.0, 0.0, 1.0));
        let result = engine.difference(&base, &cutter).unwrap();
        // Removes the embedded half of the cutter
        assert!(
            (result.signed_volume() - 7.5).abs() < 1e-6,
            "engine {}: volume {}",
            engine.name(),
            result.signed_volume()
        );
    }
}

#[test]
fn test_union_with_empty_operand() {
    for engine in engines() {
        let a = cube(2.0, DVec3::ZERO);
        let empty = crate::Mesh::new();
        let result = engine.union(&a, &empty).unwrap();
        assert_eq!(result.triangle_count(), a.triangle_count());
        let result = engine.union(&empty, &a).unwrap();
        assert_eq!(result.triangle_count(), a.triangle_count());
    }
}

#[test]
fn test_difference_by_containing_cutter_fails() {
    // Cutter swallows the base entirely: the empty result is reported
    // as an engine failure so the ladder can move on
    for engine in engines() {
        let base = cube(1.0, DVec3::ZERO);
        let cutter = cube(4.0, DVec3::ZERO);
        assert!(engine.difference(&base, &cutter).is_err(), "engine {}", engine.name());
    }
}

#[test]
fn test_builtin_engine_order() {
    let engines = builtin_engines();
    assert_eq!(engines[0].name(), "clip-bsp");
    assert_eq!(engines[1].name(), "csg-bsp");
}
