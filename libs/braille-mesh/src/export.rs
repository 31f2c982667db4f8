//! # Mesh Export
//!
//! Flat f32/u32 buffers for downstream consumers (slicers, viewers,
//! GPU upload). All internal math stays f64; precision is dropped only
//! here, at the boundary.

use crate::mesh::Mesh;

/// Flattened mesh buffers.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffers {
    /// Vertex positions as [x, y, z, x, y, z, ...]
    pub vertices: Vec<f32>,
    /// Triangle indices as [i0, i1, i2, i0, i1, i2, ...]
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Number of vertices in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of triangles in the buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl Mesh {
    /// Exports the mesh as flat f32/u32 buffers.
    #[must_use]
    pub fn to_buffers(&self) -> MeshBuffers {
        let mut vertices = Vec::with_capacity(self.vertex_count() * 3);
        for v in self.vertices() {
            vertices.push(v.x as f32);
            vertices.push(v.y as f32);
            vertices.push(v.z as f32);
        }

        let mut indices = Vec::with_capacity(self.triangle_count() * 3);
        for tri in self.triangles() {
            indices.extend_from_slice(tri);
        }

        MeshBuffers { vertices, indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::create_cuboid;
    use glam::DVec3;

    #[test]
    fn test_buffers_counts_match_mesh() {
        let mesh = create_cuboid(DVec3::splat(2.0), true).unwrap();
        let buffers = mesh.to_buffers();
        assert_eq!(buffers.vertex_count(), mesh.vertex_count());
        assert_eq!(buffers.triangle_count(), mesh.triangle_count());
    }

    #[test]
    fn test_buffers_flatten_positions() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(1.0, 2.0, 3.0));
        let buffers = mesh.to_buffers();
        assert_eq!(buffers.vertices, vec![1.0, 2.0, 3.0]);
    }
}
