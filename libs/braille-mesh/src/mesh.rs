//! # Mesh Data Structure
//!
//! Core triangle-mesh representation shared by primitives, extrusion,
//! boolean engines, and repair.

use glam::DVec3;

/// A triangle mesh with vertices and indices.
///
/// All geometry calculations use f64 internally. Export to f32 only
/// happens at the output boundary via [`crate::MeshBuffers`].
///
/// # Example
///
/// ```rust
/// use braille_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions (f64 for precision)
    pub(crate) vertices: Vec<DVec3>,
    /// Triangle indices (3 indices per triangle)
    pub(crate) triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }

    /// Transforms all vertices by a 4x4 matrix.
    pub fn transform(&mut self, matrix: &glam::DMat4) {
        for v in &mut self.vertices {
            *v = matrix.transform_point3(*v);
        }
    }

    /// Translates the mesh by a vector.
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Merges another mesh into this one.
    ///
    /// This is pure concatenation: no boolean semantics, overlapping
    /// volume stays overlapping.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&other.vertices);

        for tri in &other.triangles {
            self.triangles
                .push([tri[0] + offset, tri[1] + offset, tri[2] + offset]);
        }
    }

    /// Reverses the winding of every triangle, flipping the surface
    /// orientation inside-out.
    pub fn invert_windings(&mut self) {
        for tri in &mut self.triangles {
            tri.swap(1, 2);
        }
    }

    /// Computes the signed volume enclosed by the mesh.
    ///
    /// Positive for outward-wound closed surfaces. Only meaningful for
    /// watertight meshes, but always finite for finite vertices.
    pub fn signed_volume(&self) -> f64 {
        let mut volume = 0.0;
        for tri in &self.triangles {
            let v0 = self.vertices[tri[0] as usize];
            let v1 = self.vertices[tri[1] as usize];
            let v2 = self.vertices[tri[2] as usize];
            volume += v0.dot(v1.cross(v2));
        }
        volume / 6.0
    }

    /// Returns true if every vertex coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.vertices.iter().all(|v| v.is_finite())
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle indices are valid
    /// - No index-degenerate triangles
    ///
    /// Returns true if valid.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        for tri in &self.triangles {
            if tri[0] >= vertex_count || tri[1] >= vertex_count || tri[2] >= vertex_count {
                return false;
            }
            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_tetrahedron() -> Mesh {
        let mut mesh = Mesh::new();
        let v0 = mesh.add_vertex(DVec3::ZERO);
        let v1 = mesh.add_vertex(DVec3::X);
        let v2 = mesh.add_vertex(DVec3::Y);
        let v3 = mesh.add_vertex(DVec3::Z);
        mesh.add_triangle(v0, v2, v1);
        mesh.add_triangle(v0, v1, v3);
        mesh.add_triangle(v0, v3, v2);
        mesh.add_triangle(v1, v2, v3);
        mesh
    }

    #[test]
    fn test_mesh_new_is_empty() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_add_vertex_returns_sequential_indices() {
        let mut mesh = Mesh::new();
        assert_eq!(mesh.add_vertex(DVec3::ZERO), 0);
        assert_eq!(mesh.add_vertex(DVec3::X), 1);
        assert_eq!(mesh.add_vertex(DVec3::Y), 2);
    }

    #[test]
    fn test_tetrahedron_volume() {
        let mesh = unit_tetrahedron();
        assert_relative_eq!(mesh.signed_volume(), 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inverted_tetrahedron_volume_negative() {
        let mut mesh = unit_tetrahedron();
        mesh.invert_windings();
        assert_relative_eq!(mesh.signed_volume(), -1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_translate_shifts_bounding_box() {
        let mut mesh = unit_tetrahedron();
        mesh.translate(DVec3::new(10.0, 0.0, 0.0));
        let (min, max) = mesh.bounding_box();
        assert_relative_eq!(min.x, 10.0);
        assert_relative_eq!(max.x, 11.0);
    }

    #[test]
    fn test_translate_preserves_volume() {
        let mut mesh = unit_tetrahedron();
        let before = mesh.signed_volume();
        mesh.translate(DVec3::new(-3.0, 7.0, 42.0));
        assert_relative_eq!(mesh.signed_volume(), before, epsilon = 1e-9);
    }

    #[test]
    fn test_merge_offsets_indices() {
        let mut a = unit_tetrahedron();
        let b = unit_tetrahedron();
        a.merge(&b);
        assert_eq!(a.vertex_count(), 8);
        assert_eq!(a.triangle_count(), 8);
        assert!(a.validate());
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_triangle(0, 1, 5);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_validate_rejects_repeated_index() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_triangle(0, 1, 1);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_is_finite_detects_nan() {
        let mut mesh = unit_tetrahedron();
        assert!(mesh.is_finite());
        mesh.vertices[0].x = f64::NAN;
        assert!(!mesh.is_finite());
    }
}
