//! # Mesh Repair
//!
//! Watertightness analysis and healing. Boolean results are checked
//! and, when necessary, patched before a plate is handed to the
//! caller: boundary loops are filled with fans and triangle windings
//! are unified across the surface.
//!
//! Healing never fails; the report says what was done.

use crate::mesh::Mesh;
use config::constants::VERTEX_MERGE_EPSILON;
use glam::DVec3;
use std::collections::HashMap;

/// Summary of a [`heal`] pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealReport {
    /// Number of boundary loops closed with fill fans.
    pub holes_filled: usize,
    /// Number of triangles whose winding was flipped.
    pub triangles_flipped: usize,
    /// Whether the mesh is watertight after healing.
    pub watertight: bool,
}

fn quantize(v: DVec3) -> (i64, i64, i64) {
    (
        (v.x / VERTEX_MERGE_EPSILON).round() as i64,
        (v.y / VERTEX_MERGE_EPSILON).round() as i64,
        (v.z / VERTEX_MERGE_EPSILON).round() as i64,
    )
}

/// Maps every vertex index to a canonical representative, welding
/// positions within the merge tolerance.
fn weld_map(mesh: &Mesh) -> Vec<u32> {
    let mut canonical: HashMap<(i64, i64, i64), u32> = HashMap::new();
    let mut map = Vec::with_capacity(mesh.vertex_count());
    for (index, v) in mesh.vertices().iter().enumerate() {
        let id = *canonical.entry(quantize(*v)).or_insert(index as u32);
        map.push(id);
    }
    map
}

/// Counts directed edges over welded vertex ids. Degenerate edges
/// (both endpoints welded together) are skipped.
fn directed_edge_counts(mesh: &Mesh, weld: &[u32]) -> HashMap<(u32, u32), usize> {
    let mut edges: HashMap<(u32, u32), usize> = HashMap::new();
    for tri in mesh.triangles() {
        let ids = [
            weld[tri[0] as usize],
            weld[tri[1] as usize],
            weld[tri[2] as usize],
        ];
        for k in 0..3 {
            let a = ids[k];
            let b = ids[(k + 1) % 3];
            if a != b {
                *edges.entry((a, b)).or_insert(0) += 1;
            }
        }
    }
    edges
}

/// Returns true if every edge is shared by exactly two triangles with
/// opposite directions.
pub fn is_watertight(mesh: &Mesh) -> bool {
    if mesh.is_empty() {
        return false;
    }
    let weld = weld_map(mesh);
    let edges = directed_edge_counts(mesh, &weld);
    edges
        .iter()
        .all(|(&(a, b), &count)| count == 1 && edges.get(&(b, a)) == Some(&1))
}

/// Finds boundary loops: chains of directed edges with no reverse
/// partner. Returns loops as sequences of welded vertex ids.
fn boundary_loops(mesh: &Mesh, weld: &[u32]) -> Vec<Vec<u32>> {
    let edges = directed_edge_counts(mesh, weld);
    let mut open: HashMap<u32, u32> = HashMap::new();
    for (&(a, b), &count) in &edges {
        if count == 1 && edges.get(&(b, a)).is_none() {
            open.insert(a, b);
        }
    }

    let mut loops = Vec::new();
    while let Some((&start, _)) = open.iter().next() {
        let mut chain = vec![start];
        let mut current = start;
        while let Some(next) = open.remove(&current) {
            if next == start {
                break;
            }
            chain.push(next);
            current = next;
        }
        if chain.len() >= 3 {
            loops.push(chain);
        }
    }
    loops
}

/// Fills boundary loops with fan triangles.
///
/// Returns the number of loops closed. Loops that cannot be chained
/// into a cycle are left alone.
pub fn fill_holes(mesh: &mut Mesh) -> usize {
    let weld = weld_map(mesh);
    let loops = boundary_loops(mesh, &weld);
    let filled = loops.len();

    for chain in loops {
        // The fill must traverse the loop opposite to the boundary
        // edges so every open edge gains a partner
        let v0 = chain[0];
        for i in 1..chain.len() - 1 {
            mesh.add_triangle(v0, chain[i + 1], chain[i]);
        }
    }

    filled
}

/// Makes triangle windings consistent across edge-connected regions,
/// then orients the whole surface outward (positive signed volume).
///
/// Within each region the minority orientation is the one corrected,
/// so a few bad triangles never drag the rest of the surface with
/// them. Returns the number of triangles flipped.
pub fn unify_winding(mesh: &mut Mesh) -> usize {
    let weld = weld_map(mesh);
    let triangle_count = mesh.triangle_count();

    // Undirected edge -> incident triangles (manifold edges only)
    let mut incident: HashMap<(u32, u32), Vec<usize>> = HashMap::new();
    for (t, tri) in mesh.triangles().iter().enumerate() {
        let ids = [
            weld[tri[0] as usize],
            weld[tri[1] as usize],
            weld[tri[2] as usize],
        ];
        for k in 0..3 {
            let a = ids[k];
            let b = ids[(k + 1) % 3];
            if a != b {
                let key = (a.min(b), a.max(b));
                incident.entry(key).or_default().push(t);
            }
        }
    }

    let directed = |tri: [u32; 3], a: u32, b: u32| -> bool {
        let ids = [
            weld[tri[0] as usize],
            weld[tri[1] as usize],
            weld[tri[2] as usize],
        ];
        (0..3).any(|k| ids[k] == a && ids[(k + 1) % 3] == b)
    };

    // Flip decision per triangle, relative to its component's seed.
    // Decisions are reconciled against the component majority before
    // any winding changes, so a lone inverted triangle is the one
    // flipped rather than all of its neighbors.
    let mut parity: Vec<Option<bool>> = vec![None; triangle_count];
    let mut flipped = 0;

    for seed in 0..triangle_count {
        if parity[seed].is_some() {
            continue;
        }
        parity[seed] = Some(false);
        let mut component = vec![seed];
        let mut queue = vec![seed];

        while let Some(t) = queue.pop() {
            let tri = mesh.triangles[t];
            let flip_t = parity[t].unwrap_or(false);
            let ids = [
                weld[tri[0] as usize],
                weld[tri[1] as usize],
                weld[tri[2] as usize],
            ];
            for k in 0..3 {
                let a = ids[k];
                let b = ids[(k + 1) % 3];
                if a == b {
                    continue;
                }
                let key = (a.min(b), a.max(b));
                let Some(neighbors) = incident.get(&key) else {
                    continue;
                };
                // Only walk across clean manifold edges
                if neighbors.len() != 2 {
                    continue;
                }
                for &n in neighbors {
                    if n == t || parity[n].is_some() {
                        continue;
                    }
                    // Consistent neighbors traverse the shared edge in
                    // the opposite direction
                    parity[n] = Some(directed(mesh.triangles[n], a, b) ^ flip_t);
                    component.push(n);
                    queue.push(n);
                }
            }
        }

        let to_flip = component
            .iter()
            .filter(|&&t| parity[t] == Some(true))
            .count();
        let invert = to_flip * 2 > component.len();
        for &t in &component {
            if parity[t].unwrap_or(false) != invert {
                mesh.triangles[t].swap(1, 2);
                flipped += 1;
            }
        }
    }

    // Orient outward
    if mesh.signed_volume() < 0.0 {
        mesh.invert_windings();
        flipped += mesh.triangle_count();
    }

    flipped
}

/// Heals a mesh in place: fills boundary loops, unifies windings, and
/// reports the outcome. Never fails; a mesh that cannot be fully
/// healed is still returned in its best achievable state.
pub fn heal(mesh: &mut Mesh) -> HealReport {
    let mut report = HealReport::default();

    if mesh.is_empty() {
        return report;
    }

    if !is_watertight(mesh) {
        report.holes_filled = fill_holes(mesh);
        report.triangles_flipped = unify_winding(mesh);
    } else if mesh.signed_volume() < 0.0 {
        mesh.invert_windings();
        report.triangles_flipped = mesh.triangle_count();
    }

    report.watertight = is_watertight(mesh);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{create_cuboid, create_sphere};
    use approx::assert_relative_eq;

    fn open_box() -> Mesh {
        // Cuboid with the top face removed
        let cube = create_cuboid(DVec3::splat(2.0), true).unwrap();
        let mut open = Mesh::new();
        for v in cube.vertices() {
            open.add_vertex(*v);
        }
        for tri in cube.triangles() {
            let top = tri
                .iter()
                .all(|&i| (cube.vertex(i).z - 1.0).abs() < 1e-9);
            if !top {
                open.add_triangle(tri[0], tri[1], tri[2]);
            }
        }
        open
    }

    #[test]
    fn test_primitives_are_watertight() {
        assert!(is_watertight(&create_cuboid(DVec3::splat(2.0), true).unwrap()));
        assert!(is_watertight(&create_sphere(1.0, 16).unwrap()));
    }

    #[test]
    fn test_empty_mesh_is_not_watertight() {
        assert!(!is_watertight(&Mesh::new()));
    }

    #[test]
    fn test_open_box_is_not_watertight() {
        assert!(!is_watertight(&open_box()));
    }

    #[test]
    fn test_fill_holes_closes_open_box() {
        let mut mesh = open_box();
        let filled = fill_holes(&mut mesh);
        assert_eq!(filled, 1);
        assert!(is_watertight(&mesh));
        assert_relative_eq!(mesh.signed_volume(), 8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unify_winding_fixes_flipped_triangle() {
        let mut mesh = create_cuboid(DVec3::splat(2.0), true).unwrap();
        mesh.triangles[0].swap(1, 2);
        assert!(!is_watertight(&mesh));
        let flipped = unify_winding(&mut mesh);
        assert_eq!(flipped, 1);
        assert!(is_watertight(&mesh));
        assert_relative_eq!(mesh.signed_volume(), 8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unify_winding_flips_minority_only() {
        let mut mesh = create_cuboid(DVec3::splat(2.0), true).unwrap();
        mesh.triangles[0].swap(1, 2);
        mesh.triangles[7].swap(1, 2);
        let flipped = unify_winding(&mut mesh);
        assert_eq!(flipped, 2);
        assert!(is_watertight(&mesh));
        assert_relative_eq!(mesh.signed_volume(), 8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unify_winding_orients_outward() {
        let mut mesh = create_cuboid(DVec3::splat(2.0), true).unwrap();
        mesh.invert_windings();
        assert!(mesh.signed_volume() < 0.0);
        unify_winding(&mut mesh);
        assert!(mesh.signed_volume() > 0.0);
    }

    #[test]
    fn test_heal_open_box() {
        let mut mesh = open_box();
        let report = heal(&mut mesh);
        assert!(report.watertight);
        assert_eq!(report.holes_filled, 1);
        assert_relative_eq!(mesh.signed_volume(), 8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_heal_watertight_mesh_is_noop() {
        let mut mesh = create_sphere(1.0, 16).unwrap();
        let volume = mesh.signed_volume();
        let report = heal(&mut mesh);
        assert!(report.watertight);
        assert_eq!(report.holes_filled, 0);
        assert_eq!(report.triangles_flipped, 0);
        assert_relative_eq!(mesh.signed_volume(), volume);
    }

    #[test]
    fn test_heal_empty_mesh() {
        let mut mesh = Mesh::new();
        let report = heal(&mut mesh);
        assert!(!report.watertight);
        assert_eq!(report.holes_filled, 0);
    }
}
