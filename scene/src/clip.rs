//! Plane clipping of polygon soups. Every polygon is clipped against the
//! half-space behind the plane (Sutherland-Hodgman); points created on a cut
//! edge are shared between all faces using that edge.

use std::collections::{HashMap, HashSet};

use nalgebra::Vector3;
use ordered_float::OrderedFloat;

use crate::{
    mesh::PolyMesh,
    plane::ClipPlane,
    scene::{Cell, UnstructuredGrid},
    Pos,
};

/// Clips an open or closed surface. The cut is left open.
pub fn clip_surface(mesh: &PolyMesh, plane: &ClipPlane) -> PolyMesh {
    let mut clipper = Clipper::new(mesh.vertices(), plane);
    let faces = (mesh.faces().iter())
        .filter_map(|face| clipper.clip_polygon(face))
        .collect();
    PolyMesh::new(clipper.finish(), faces)
}

/// Clips every cell of a grid. Cells cut by the plane are closed again with a
/// cap polygon lying in the plane; cells entirely in front of it are dropped.
pub fn clip_grid(grid: &UnstructuredGrid, plane: &ClipPlane) -> UnstructuredGrid {
    let mut clipper = Clipper::new(grid.points(), plane);
    let cells = (grid.cells().iter())
        .filter_map(|cell| {
            let faces = clipper.clip_cell(&cell.faces)?;
            Some(Cell::new(cell.name.clone(), faces))
        })
        .collect();
    UnstructuredGrid::new(clipper.finish(), cells)
}

struct Clipper<'a> {
    plane: &'a ClipPlane,
    points: &'a [Pos],
    distances: Vec<f32>,

    /// Output index of each input point, assigned on first use.
    remap: Vec<Option<u32>>,
    /// Output index of the point where an input edge crosses the plane.
    edge_points: HashMap<(u32, u32), u32>,

    output: Vec<Pos>,
    on_plane: Vec<bool>,
}

impl<'a> Clipper<'a> {
    fn new(points: &'a [Pos], plane: &'a ClipPlane) -> Self {
        Self {
            plane,
            points,
            distances: points.iter().map(|p| plane.signed_distance(p)).collect(),
            remap: vec![None; points.len()],
            edge_points: HashMap::new(),
            output: Vec::new(),
            on_plane: Vec::new(),
        }
    }

    fn finish(self) -> Vec<Pos> {
        self.output
    }

    fn distance(&self, idx: u32) -> Option<f32> {
        self.distances.get(idx as usize).copied()
    }

    fn push(&mut self, point: Pos, on_plane: bool) -> u32 {
        self.output.push(point);
        self.on_plane.push(on_plane);
        (self.output.len() - 1) as u32
    }

    fn keep(&mut self, idx: u32) -> u32 {
        if let Some(out) = self.remap[idx as usize] {
            return out;
        }

        let on_plane = self.distances[idx as usize] == 0.0;
        let out = self.push(self.points[idx as usize], on_plane);
        self.remap[idx as usize] = Some(out);
        out
    }

    fn edge_point(&mut self, a: u32, b: u32) -> u32 {
        let key = (a.min(b), a.max(b));
        if let Some(&out) = self.edge_points.get(&key) {
            return out;
        }

        // Always interpolate in the same direction so both faces sharing the
        // edge agree on the point exactly.
        let (a, b) = key;
        let (da, db) = (self.distances[a as usize], self.distances[b as usize]);
        let (pa, pb) = (self.points[a as usize], self.points[b as usize]);
        let t = da / (da - db);

        let out = self.push(pa + t * (pb - pa), true);
        self.edge_points.insert(key, out);
        out
    }

    /// Returns the clipped polygon in output indices, or `None` if nothing
    /// (or only a degenerate sliver) remains or the face references a point
    /// that does not exist.
    fn clip_polygon(&mut self, face: &[u32]) -> Option<Vec<u32>> {
        let distances = (face.iter())
            .map(|&idx| self.distance(idx))
            .collect::<Option<Vec<_>>>()?;

        let mut out = Vec::with_capacity(face.len() + 1);
        for i in 0..face.len() {
            let j = (i + 1) % face.len();
            let (a, b) = (distances[i], distances[j]);

            if a <= 0.0 {
                out.push(self.keep(face[i]));
            }

            if (a < 0.0 && b > 0.0) || (a > 0.0 && b < 0.0) {
                out.push(self.edge_point(face[i], face[j]));
            }
        }

        (out.len() >= 3).then_some(out)
    }

    /// Clips a closed cell given by its faces. Cells entirely behind the plane
    /// come back unchanged and cells with nothing behind it are dropped.
    fn clip_cell(&mut self, faces: &[Vec<u32>]) -> Option<Vec<Vec<u32>>> {
        let distances = (faces.iter().flatten())
            .map(|&idx| self.distance(idx))
            .collect::<Option<Vec<_>>>()?;

        let behind = distances.iter().any(|&d| d < 0.0);
        let in_front = distances.iter().any(|&d| d > 0.0);

        if !behind {
            return None;
        }

        if !in_front {
            let faces = (faces.iter())
                .map(|face| face.iter().map(|&idx| self.keep(idx)).collect())
                .collect();
            return Some(faces);
        }

        let mut out = (faces.iter())
            .filter_map(|face| self.clip_polygon(face))
            .collect::<Vec<_>>();

        if let Some(cap) = self.cap(&out) {
            out.push(cap);
        }

        (!out.is_empty()).then_some(out)
    }

    /// Builds the polygon closing a cut cell from the cell's points lying in
    /// the plane, wound counter-clockwise around the plane normal.
    fn cap(&self, faces: &[Vec<u32>]) -> Option<Vec<u32>> {
        let mut seen = HashSet::new();
        let mut cap = (faces.iter().flatten())
            .copied()
            .filter(|&idx| self.on_plane[idx as usize] && seen.insert(idx))
            .collect::<Vec<_>>();

        if cap.len() < 3 {
            return None;
        }

        let center = (cap.iter())
            .map(|&idx| self.output[idx as usize])
            .sum::<Pos>()
            / cap.len() as f32;
        let normal = self.plane.normal();
        let u = normal.cross(&least_aligned_axis(&normal)).normalize();
        let v = normal.cross(&u);

        cap.sort_by_cached_key(|&idx| {
            let offset = self.output[idx as usize] - center;
            OrderedFloat(offset.dot(&v).atan2(offset.dot(&u)))
        });

        Some(cap)
    }
}

fn least_aligned_axis(normal: &Pos) -> Pos {
    let abs = normal.abs();
    if abs.x <= abs.y && abs.x <= abs.z {
        Vector3::x()
    } else if abs.y <= abs.z {
        Vector3::y()
    } else {
        Vector3::z()
    }
}
