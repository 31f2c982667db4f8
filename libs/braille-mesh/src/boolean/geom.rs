//! # BSP Geometry
//!
//! Shared geometry for the boolean engines: splitting planes, BSP
//! polygons, mesh conversion with vertex welding, and the ray-cast
//! point-in-mesh test used by the robust-clip engine.

use crate::mesh::Mesh;
use config::constants::{PLANE_EPSILON, VERTEX_MERGE_EPSILON};
use glam::DVec3;
use std::collections::HashMap;

/// Stricter tolerance for ray-triangle intersection.
const RAY_EPSILON: f64 = 1e-9;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classification of a point or polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// In front of the plane (positive side).
    Front,
    /// Behind the plane (negative side).
    Back,
    /// On the plane.
    Coplanar,
    /// Spans the plane (vertices on both sides).
    Spanning,
}

// =============================================================================
// PLANE
// =============================================================================

/// A plane in 3D space defined by unit normal and distance from origin.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Unit normal vector.
    pub normal: DVec3,
    /// Distance from origin along the normal.
    pub w: f64,
}

impl Plane {
    /// Creates a plane from three points in counter-clockwise order.
    ///
    /// Returns None for degenerate (collinear) triples.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let cross = (b - a).cross(c - a);
        if cross.length() < PLANE_EPSILON * PLANE_EPSILON {
            return None;
        }
        let normal = cross.normalize();
        Some(Self {
            normal,
            w: normal.dot(a),
        })
    }

    /// Flips the plane in place (reverses the normal).
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Signed distance from point to plane.
    ///
    /// Positive = front, negative = back, zero = on plane.
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.w
    }

    /// Classifies a point relative to this plane.
    pub fn classify_point(&self, point: DVec3) -> Classification {
        let dist = self.signed_distance(point);
        if dist > PLANE_EPSILON {
            Classification::Front
        } else if dist < -PLANE_EPSILON {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }
}

// =============================================================================
// BSP POLYGON
// =============================================================================

/// A convex polygon with its containing plane.
#[derive(Debug, Clone)]
pub struct BspPolygon {
    /// Vertices in counter-clockwise order.
    pub vertices: Vec<DVec3>,
    /// Plane containing this polygon.
    pub plane: Plane,
}

impl BspPolygon {
    /// Creates a polygon from vertices.
    ///
    /// Returns None if the vertices are too few or degenerate.
    pub fn from_vertices(vertices: Vec<DVec3>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        Some(Self { vertices, plane })
    }

    /// Flips the polygon in place (reverses winding and plane).
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }

    /// Arithmetic mean of the vertices.
    pub fn centroid(&self) -> DVec3 {
        let mut sum = DVec3::ZERO;
        for v in &self.vertices {
            sum += *v;
        }
        sum / self.vertices.len() as f64
    }

    /// Classifies this polygon relative to a plane.
    pub fn classify(&self, plane: &Plane) -> Classification {
        let mut front_count = 0;
        let mut back_count = 0;

        for v in &self.vertices {
            match plane.classify_point(*v) {
                Classification::Front => front_count += 1,
                Classification::Back => back_count += 1,
                _ => {}
            }
        }

        if front_count > 0 && back_count > 0 {
            Classification::Spanning
        } else if front_count > 0 {
            Classification::Front
        } else if back_count > 0 {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }

    /// Splits the polygon by a plane into the four output buckets.
    ///
    /// # Parameters
    ///
    /// - `plane`: Splitting plane
    /// - `coplanar_front`: Coplanar polygons facing the same direction
    /// - `coplanar_back`: Coplanar polygons facing the opposite direction
    /// - `front`: Polygons (or fragments) in front of the plane
    /// - `back`: Polygons (or fragments) behind the plane
    pub fn split(
        &self,
        plane: &Plane,
        coplanar_front: &mut Vec<BspPolygon>,
        coplanar_back: &mut Vec<BspPolygon>,
        front: &mut Vec<BspPolygon>,
        back: &mut Vec<BspPolygon>,
    ) {
        match self.classify(plane) {
            Classification::Coplanar => {
                if self.plane.normal.dot(plane.normal) > 0.0 {
                    coplanar_front.push(self.clone());
                } else {
                    coplanar_back.push(self.clone());
                }
            }
            Classification::Front => front.push(self.clone()),
            Classification::Back => back.push(self.clone()),
            Classification::Spanning => {
                let mut front_verts = Vec::with_capacity(self.vertices.len() + 1);
                let mut back_verts = Vec::with_capacity(self.vertices.len() + 1);

                for i in 0..self.vertices.len() {
                    let j = (i + 1) % self.vertices.len();
                    let vi = self.vertices[i];
                    let vj = self.vertices[j];

                    let ti = plane.classify_point(vi);
                    let tj = plane.classify_point(vj);

                    if ti != Classification::Back {
                        front_verts.push(vi);
                    }
                    if ti != Classification::Front {
                        back_verts.push(vi);
                    }

                    // Edge crosses the plane: insert the intersection
                    if (ti == Classification::Front && tj == Classification::Back)
                        || (ti == Classification::Back && tj == Classification::Front)
                    {
                        let di = plane.signed_distance(vi);
                        let dj = plane.signed_distance(vj);
                        let t = di / (di - dj);
                        let intersection = vi.lerp(vj, t);
                        front_verts.push(intersection);
                        back_verts.push(intersection);
                    }
                }

                if let Some(poly) = BspPolygon::from_vertices(front_verts) {
                    front.push(poly);
                }
                if let Some(poly) = BspPolygon::from_vertices(back_verts) {
                    back.push(poly);
                }
            }
        }
    }
}

// =============================================================================
// MESH CONVERSION
// =============================================================================

/// Converts a mesh into BSP polygons, one per triangle.
///
/// Degenerate triangles are silently dropped.
pub fn mesh_to_polygons(mesh: &Mesh) -> Vec<BspPolygon> {
    let mut polygons = Vec::with_capacity(mesh.triangle_count());
    for tri in mesh.triangles() {
        let vertices = vec![
            mesh.vertex(tri[0]),
            mesh.vertex(tri[1]),
            mesh.vertex(tri[2]),
        ];
        if let Some(poly) = BspPolygon::from_vertices(vertices) {
            polygons.push(poly);
        }
    }
    polygons
}

/// Converts BSP polygons back into a mesh.
///
/// Polygons are fan-triangulated; vertices within the merge tolerance
/// are welded so the result can pass watertightness checks.
pub fn polygons_to_mesh(polygons: &[BspPolygon]) -> Mesh {
    let mut mesh = Mesh::with_capacity(polygons.len() * 3, polygons.len());
    let mut index_of: HashMap<(i64, i64, i64), u32> = HashMap::new();

    let quantize = |v: DVec3| {
        (
            (v.x / VERTEX_MERGE_EPSILON).round() as i64,
            (v.y / VERTEX_MERGE_EPSILON).round() as i64,
            (v.z / VERTEX_MERGE_EPSILON).round() as i64,
        )
    };

    let mut intern = |v: DVec3, mesh: &mut Mesh| -> u32 {
        *index_of.entry(quantize(v)).or_insert_with(|| mesh.add_vertex(v))
    };

    for poly in polygons {
        let anchor = intern(poly.vertices[0], &mut mesh);
        for i in 1..poly.vertices.len() - 1 {
            let b = intern(poly.vertices[i], &mut mesh);
            let c = intern(poly.vertices[i + 1], &mut mesh);
            // Welding can collapse thin fragments
            if anchor != b && b != c && anchor != c {
                mesh.add_triangle(anchor, b, c);
            }
        }
    }

    mesh
}

// =============================================================================
// RAY CASTING
// =============================================================================

/// Möller–Trumbore ray-triangle intersection test.
///
/// Returns true if the ray from `origin` along `dir` hits the triangle
/// strictly in the positive direction.
pub fn ray_triangle_intersect(
    origin: DVec3,
    dir: DVec3,
    v0: DVec3,
    v1: DVec3,
    v2: DVec3,
) -> bool {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = dir.cross(edge2);
    let a = edge1.dot(h);

    // Ray parallel to triangle
    if a.abs() < RAY_EPSILON {
        return false;
    }

    let f = 1.0 / a;
    let s = origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return false;
    }

    let q = s.cross(edge1);
    let v = f * dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return false;
    }

    f * edge2.dot(q) > RAY_EPSILON
}

/// Tests if a point is inside a closed mesh using voted ray casting.
///
/// Casts 6 rays along fixed skew directions and counts intersections;
/// an odd count votes "inside". The directions avoid the coordinate
/// axes on purpose: axis-aligned rays from symmetric points (a cube
/// center, a dot above a face center) pass exactly through shared
/// triangle diagonals and get double-counted. Majority voting absorbs
/// the remaining rays that graze an edge or vertex.
pub fn point_inside_mesh(point: DVec3, mesh: &Mesh) -> bool {
    let base = [
        DVec3::new(0.2938, 0.5175, 0.8037),
        DVec3::new(-0.7461, 0.1925, 0.6374),
        DVec3::new(0.5913, -0.7821, 0.1964),
    ];
    let dirs = [
        base[0].normalize(),
        -base[0].normalize(),
        base[1].normalize(),
        -base[1].normalize(),
        base[2].normalize(),
        -base[2].normalize(),
    ];

    let mut inside_votes = 0;
    for dir in dirs {
        let mut count = 0;
        for tri in mesh.triangles() {
            if ray_triangle_intersect(
                point,
                dir,
                mesh.vertex(tri[0]),
                mesh.vertex(tri[1]),
                mesh.vertex(tri[2]),
            ) {
                count += 1;
            }
        }
        if count % 2 == 1 {
            inside_votes += 1;
        }
    }

    inside_votes >= 3
}
