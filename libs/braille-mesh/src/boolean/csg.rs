//! # csg.js-Style Engine
//!
//! Classic BSP boolean algorithm after Evan Wallace's csg.js: build a
//! tree per operand, clip each tree against the other, and collect the
//! surviving polygons. Leaf classification is implicit in the tree
//! structure, which makes this engine fast but more sensitive to
//! coplanar-face arrangements than [`super::ClipBsp`].

use super::geom::{mesh_to_polygons, polygons_to_mesh, BspPolygon, Plane};
use super::{check_result, BooleanEngine};
use crate::error::MeshResult;
use crate::mesh::Mesh;

/// The csg.js-style boolean engine.
pub struct CsgBsp;

impl BooleanEngine for CsgBsp {
    fn name(&self) -> &'static str {
        "csg-bsp"
    }

    fn union(&self, a: &Mesh, b: &Mesh) -> MeshResult<Mesh> {
        if a.is_empty() {
            return Ok(b.clone());
        }
        if b.is_empty() {
            return Ok(a.clone());
        }

        let mut tree_a = Node::build(mesh_to_polygons(a));
        let mut tree_b = Node::build(mesh_to_polygons(b));

        tree_a.clip_to(&tree_b);
        tree_b.clip_to(&tree_a);
        tree_b.invert();
        tree_b.clip_to(&tree_a);
        tree_b.invert();

        let mut polygons = tree_a.all_polygons();
        polygons.extend(tree_b.all_polygons());

        check_result(self.name(), polygons_to_mesh(&polygons))
    }

    fn difference(&self, a: &Mesh, b: &Mesh) -> MeshResult<Mesh> {
        if a.is_empty() {
            return Ok(Mesh::new());
        }
        if b.is_empty() {
            return Ok(a.clone());
        }

        let mut tree_a = Node::build(mesh_to_polygons(a));
        let mut tree_b = Node::build(mesh_to_polygons(b));

        tree_a.invert();
        tree_a.clip_to(&tree_b);
        tree_b.clip_to(&tree_a);
        tree_b.invert();
        tree_b.clip_to(&tree_a);
        tree_b.invert();

        // Everything was built on the inverted base, so flip back
        let mut polygons = tree_a.all_polygons();
        polygons.extend(tree_b.all_polygons());
        for poly in &mut polygons {
            poly.flip();
        }

        check_result(self.name(), polygons_to_mesh(&polygons))
    }
}

// =============================================================================
// BSP NODE
// =============================================================================

/// A node in the csg.js BSP tree.
///
/// Coplanar polygons live on the node; everything else is partitioned
/// into front and back subtrees.
struct Node {
    plane: Option<Plane>,
    polygons: Vec<BspPolygon>,
    front: Option<Box<Node>>,
    back: Option<Box<Node>>,
}

impl Node {
    fn empty() -> Self {
        Self {
            plane: None,
            polygons: Vec::new(),
            front: None,
            back: None,
        }
    }

    /// Builds a tree from polygons, using each subtree's first polygon
    /// as the splitting plane.
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
        // insert() is only called with a plane set
        let plane = match self.plane {
            Some(p) => p,
            None => return,
        };

        let mut front = Vec::new();
        let mut back = Vec::new();
        for poly in &polygons {
            // Both coplanar buckets stay on this node
            let mut coplanar_back = Vec::new();
            poly.split(
                &plane,
                &mut self.polygons,
                &mut coplanar_back,
                &mut front,
                &mut back,
            );
            self.polygons.append(&mut coplanar_back);
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

    /// Flips the solid represented by this tree inside-out.
    fn invert(&mut self) {
        for poly in &mut self.polygons {
            poly.flip();
        }
        if let Some(ref mut plane) = self.plane {
            plane.flip();
        }
        std::mem::swap(&mut self.front, &mut self.back);
        if let Some(ref mut front) = self.front {
            front.invert();
        }
        if let Some(ref mut back) = self.back {
            back.invert();
        }
    }

    /// Returns the fragments of `polygons` that lie outside this
    /// tree's solid.
    fn clip_polygons(&self, polygons: Vec<BspPolygon>) -> Vec<BspPolygon> {
        let plane = match self.plane {
            Some(p) => p,
            None => return polygons,
        };

        let mut front = Vec::new();
        let mut back = Vec::new();
        for poly in &polygons {
            // Coplanar fragments clip with the half-space they face
            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();
            poly.split(
                &plane,
                &mut coplanar_front,
                &mut coplanar_back,
                &mut front,
                &mut back,
            );
            front.append(&mut coplanar_front);
            back.append(&mut coplanar_back);
        }

        let mut result = match self.front {
            Some(ref node) => node.clip_polygons(front),
            None => front,
        };

        // No back subtree means the back half-space is solid: discard
        if let Some(ref node) = self.back {
            result.extend(node.clip_polygons(back));
        }

        result
    }

    /// Removes the parts of this tree's polygons inside `other`.
    fn clip_to(&mut self, other: &Node) {
        self.polygons = other.clip_polygons(std::mem::take(&mut self.polygons));
        if let Some(ref mut front) = self.front {
            front.clip_to(other);
        }
        if let Some(ref mut back) = self.back {
            back.clip_to(other);
        }
    }

    /// Collects every polygon in the tree.
    fn all_polygons(&self) -> Vec<BspPolygon> {
        let mut result = self.polygons.clone();
        if let Some(ref front) = self.front {
            result.extend(front.all_polygons());
        }
        if let Some(ref back) = self.back {
            result.extend(back.all_polygons());
        }
        result
    }
}
