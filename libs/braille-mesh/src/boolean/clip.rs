//! # Robust-Clip Engine
//!
//! BSP boolean engine with explicit leaf classification: instead of
//! trusting the implicit inside/outside encoded in the tree shape,
//! every polygon fragment that reaches a leaf is tested against the
//! original operand mesh with ray casting. Slower than the csg.js
//! dance but much harder to confuse with coplanar faces, which is why
//! it runs first in the default engine order.

use super::geom::{
    mesh_to_polygons, point_inside_mesh, polygons_to_mesh, BspPolygon, Plane,
};
use super::{check_result, BooleanEngine};
use crate::error::MeshResult;
use crate::mesh::Mesh;

/// The robust-clip boolean engine.
pub struct ClipBsp;

impl BooleanEngine for ClipBsp {
    fn name(&self) -> &'static str {
        "clip-bsp"
    }

    fn union(&self, a: &Mesh, b: &Mesh) -> MeshResult<Mesh> {
        if a.is_empty() {
            return Ok(b.clone());
        }
        if b.is_empty() {
            return Ok(a.clone());
        }

        let tree_a = Node::build(mesh_to_polygons(a));
        let tree_b = Node::build(mesh_to_polygons(b));

        // A ∪ B = (A outside B) ∪ (B outside A)
        let mut polygons = tree_b.clip_robust(mesh_to_polygons(a), b, Keep::Outside);
        polygons.extend(tree_a.clip_robust(mesh_to_polygons(b), a, Keep::Outside));

        check_result(self.name(), polygons_to_mesh(&polygons))
    }

    fn difference(&self, a: &Mesh, b: &Mesh) -> MeshResult<Mesh> {
        if a.is_empty() {
            return Ok(Mesh::new());
        }
        if b.is_empty() {
            return Ok(a.clone());
        }

        let tree_a = Node::build(mesh_to_polygons(a));
        let tree_b = Node::build(mesh_to_polygons(b));

        // A - B = (A outside B) ∪ (B inside A, reversed)
        let mut polygons = tree_b.clip_robust(mesh_to_polygons(a), b, Keep::Outside);
        let mut hole_walls = tree_a.clip_robust(mesh_to_polygons(b), a, Keep::Inside);
        for poly in &mut hole_walls {
            poly.flip();
        }
        polygons.extend(hole_walls);

        check_result(self.name(), polygons_to_mesh(&polygons))
    }
}

/// Which side of the classification mesh surviving fragments must be on.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Keep {
    Inside,
    Outside,
}

// =============================================================================
// BSP NODE
// =============================================================================

/// BSP node for the robust-clip engine.
///
/// Leaf nodes have no plane; fragments reaching them are classified by
/// ray casting against the operand mesh rather than by tree position.
struct Node {
    plane: Option<Plane>,
    front: Option<Box<Node>>,
    back: Option<Box<Node>>,
}

impl Node {
    fn empty() -> Self {
        Self {
            plane: None,
            front: None,
            back: None,
        }
    }

    fn build(polygons: Vec<BspPolygon>) -> Self {
        let mut node = Self::empty();
        node.insert(polygons);
        node
    }

    fn insert(&mut self, polygons: Vec<BspPolygon>) {
        if polygons.is_empty() {
            return;
        }

        if self.plane.is_none() {
            self.plane = Some(polygons[0].plane);
        }
        let plane = match self.plane {
            Some(p) => p,
            None => return,
        };

        let mut front = Vec::new();
        let mut back = Vec::new();
        for poly in &polygons {
            // Coplanar polygons are consumed by this node's plane; the
            // clipping pass re-routes them by facing direction, so the
            // tree itself does not need to keep them
            let (mut cf, mut cb) = (Vec::new(), Vec::new());
            poly.split(&plane, &mut cf, &mut cb, &mut front, &mut back);
        }

        if !front.is_empty() {
            self.front
                .get_or_insert_with(|| Box::new(Node::empty()))
                .insert(front);
        }
        if !back.is_empty() {
            self.back
                .get_or_insert_with(|| Box::new(Node::empty()))
                .insert(back);
        }
    }

    /// Clips polygons, classifying fragments at leaves against `mesh`.
    fn clip_robust(&self, polygons: Vec<BspPolygon>, mesh: &Mesh, keep: Keep) -> Vec<BspPolygon> {
        let plane = match self.plane {
            Some(p) => p,
            None => return Self::classify_at_leaf(polygons, mesh, keep),
        };

        let mut front = Vec::new();
        let mut back = Vec::new();
        for poly in polygons {
            // Coplanar fragments route by facing direction
            let (mut cf, mut cb) = (Vec::new(), Vec::new());
            poly.split(&plane, &mut cf, &mut cb, &mut front, &mut back);
            front.append(&mut cf);
            back.append(&mut cb);
        }

        let mut result = self.clip_subtree(&self.front, front, mesh, keep);
        result.extend(self.clip_subtree(&self.back, back, mesh, keep));
        result
    }

    fn clip_subtree(
        &self,
        subtree: &Option<Box<Node>>,
        polygons: Vec<BspPolygon>,
        mesh: &Mesh,
        keep: Keep,
    ) -> Vec<BspPolygon> {
        match subtree {
            Some(node) => node.clip_robust(polygons, mesh, keep),
            // Missing child is an implicit leaf
            None => Self::classify_at_leaf(polygons, mesh, keep),
        }
    }

    fn classify_at_leaf(polygons: Vec<BspPolygon>, mesh: &Mesh, keep: Keep) -> Vec<BspPolygon> {
        polygons
            .into_iter()
            .filter(|poly| {
                let inside = point_inside_mesh(poly.centroid(), mesh);
                match keep {
                    Keep::Inside => inside,
                    Keep::Outside => !inside,
                }
            })
            .collect()
    }
}
