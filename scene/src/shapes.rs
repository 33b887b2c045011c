//! Simple generated geometry, mostly for demos and tests.

use crate::{
    mesh::PolyMesh,
    scene::{Cell, MultiBlock, UnstructuredGrid},
    Pos,
};

/// Corner `i` of a box sits on the max side of axis `a` when bit `a` of `i`
/// is set. All faces wind counter-clockwise seen from outside.
const BOX_FACES: [[u32; 4]; 6] = [
    [0, 4, 6, 2], // -x
    [1, 3, 7, 5], // +x
    [0, 1, 5, 4], // -y
    [2, 6, 7, 3], // +y
    [0, 2, 3, 1], // -z
    [4, 5, 7, 6], // +z
];

fn box_corners(center: Pos, size: f32) -> Vec<Pos> {
    let half = size / 2.0;
    (0..8)
        .map(|i| {
            let sign = |bit: u32| if i & (1 << bit) != 0 { half } else { -half };
            center + Pos::new(sign(0), sign(1), sign(2))
        })
        .collect()
}

/// An axis aligned cube with 8 points and 6 quad faces.
pub fn cube(center: Pos, size: f32) -> PolyMesh {
    PolyMesh::new(
        box_corners(center, size),
        BOX_FACES.iter().map(|face| face.to_vec()).collect(),
    )
}

/// Name given to the cube at grid position `(i, j, k)`.
pub fn grid_name(n: usize, (i, j, k): (usize, usize, usize)) -> String {
    format!("Object {}", i * n * n + j * n + k)
}

fn grid_positions(n: usize) -> impl Iterator<Item = (usize, usize, usize)> {
    (0..n).flat_map(move |i| (0..n).flat_map(move |j| (0..n).map(move |k| (i, j, k))))
}

/// An `n`×`n`×`n` grid of unit cubes as separate blocks, centered at
/// multiples of `spacing` and named `Object 0`, `Object 1`, ...
pub fn cube_grid(n: usize, spacing: f32) -> MultiBlock {
    let mut blocks = MultiBlock::new();
    for pos @ (i, j, k) in grid_positions(n) {
        let center = Pos::new(i as f32, j as f32, k as f32) * spacing;
        blocks.push(grid_name(n, pos), cube(center, 1.0));
    }
    blocks
}

/// An `n`×`n`×`n` grid of hexahedral cells of edge length `size` sharing
/// their corner points. Cell centers and names line up with [`cube_grid`]
/// when `spacing == size`.
pub fn hex_grid(n: usize, size: f32) -> UnstructuredGrid {
    let side = n + 1;
    let point_id = |i: usize, j: usize, k: usize| (i * side * side + j * side + k) as u32;
    let half = size / 2.0;

    let points = grid_positions(side)
        .map(|(i, j, k)| Pos::new(i as f32, j as f32, k as f32) * size - Pos::repeat(half))
        .collect();

    let cells = grid_positions(n)
        .map(|pos @ (i, j, k)| {
            let corners: [u32; 8] = std::array::from_fn(|c| {
                point_id(i + (c & 1), j + ((c >> 1) & 1), k + ((c >> 2) & 1))
            });
            let faces = BOX_FACES
                .iter()
                .map(|face| face.iter().map(|&c| corners[c as usize]).collect())
                .collect();
            Cell::new(grid_name(n, pos), faces)
        })
        .collect();

    UnstructuredGrid::new(points, cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_faces_point_outwards() {
        let mesh = cube(Pos::zeros(), 2.0);
        for face in mesh.faces() {
            let [a, b, c] = [0, 1, 2].map(|i| mesh.vertices()[face[i] as usize]);
            let normal = (b - a).cross(&(c - a));
            let center = face.iter().map(|&i| mesh.vertices()[i as usize]).sum::<Pos>() / 4.0;
            assert!(normal.dot(&center) > 0.0);
        }
    }

    #[test]
    fn grid_names_and_count() {
        let grid = cube_grid(3, 1.0);
        assert_eq!(grid.blocks().len(), 27);
        assert_eq!(grid.blocks()[0].name, "Object 0");
        assert_eq!(grid.blocks()[26].name, "Object 26");
    }

    #[test]
    fn hex_grid_shares_points() {
        let grid = hex_grid(2, 1.0);
        assert_eq!(grid.points().len(), 27);
        assert_eq!(grid.cells().len(), 8);
        assert!(grid.cell_mesh(&grid.cells()[0]).is_closed());
        assert_eq!(grid.cell_mesh(&grid.cells()[7]).vertex_count(), 8);
    }
}
