//! The two kinds of mesh collections a scene can be made of.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    attributes::AttributeTable,
    bounding_box::BoundingBox,
    clip::{clip_grid, clip_surface},
    mesh::PolyMesh,
    payload::ScenePayload,
    plane::ClipPlane,
    Pos,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneKind {
    MultiBlock,
    UnstructuredGrid,
}

/// One named piece of a collection with its own point numbering.
#[derive(Debug, Clone)]
pub struct SubMesh<'a> {
    pub name: &'a str,
    pub mesh: PolyMesh,
}

/// Shared behavior of the collection kinds.
pub trait SceneData {
    const KIND: SceneKind;

    /// The sub-meshes in collection order.
    fn sub_meshes(&self) -> Vec<SubMesh<'_>>;

    /// Returns a clipped copy, keeping the part behind `plane`. Names survive
    /// clipping.
    fn slice(&self, plane: &ClipPlane) -> Self;

    fn to_payload(&self, attributes: &AttributeTable) -> ScenePayload {
        ScenePayload::extract(Self::KIND, self.sub_meshes(), attributes)
    }
}

#[derive(Debug, Clone)]
pub struct Block {
    pub name: String,
    pub mesh: PolyMesh,
}

/// A list of independent surface meshes.
#[derive(Debug, Clone, Default)]
pub struct MultiBlock {
    blocks: Vec<Block>,
}

impl MultiBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, mesh: PolyMesh) {
        self.blocks.push(Block {
            name: name.into(),
            mesh,
        });
    }

    pub fn with_block(mut self, name: impl Into<String>, mesh: PolyMesh) -> Self {
        self.push(name, mesh);
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

impl SceneData for MultiBlock {
    const KIND: SceneKind = SceneKind::MultiBlock;

    fn sub_meshes(&self) -> Vec<SubMesh<'_>> {
        (self.blocks.iter())
            .map(|block| SubMesh {
                name: &block.name,
                mesh: block.mesh.clone(),
            })
            .collect()
    }

    fn slice(&self, plane: &ClipPlane) -> Self {
        let blocks = (self.blocks.iter())
            .map(|block| Block {
                name: block.name.clone(),
                mesh: clip_surface(&block.mesh, plane),
            })
            .collect();
        Self { blocks }
    }
}

/// A polyhedral cell: faces indexing into the grid's shared points.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub name: String,
    pub faces: Vec<Vec<u32>>,
}

impl Cell {
    pub fn new(name: impl Into<String>, faces: Vec<Vec<u32>>) -> Self {
        Self {
            name: name.into(),
            faces,
        }
    }

    /// Point ids used by the cell, in order of first appearance.
    pub fn point_ids(&self) -> Vec<u32> {
        let mut seen = HashMap::new();
        for &idx in self.faces.iter().flatten() {
            let next = seen.len();
            seen.entry(idx).or_insert(next);
        }

        let mut ids = vec![0; seen.len()];
        for (idx, local) in seen {
            ids[local] = idx;
        }
        ids
    }
}

/// Cells sharing one point array.
#[derive(Debug, Clone, Default)]
pub struct UnstructuredGrid {
    points: Vec<Pos>,
    cells: Vec<Cell>,
}

impl UnstructuredGrid {
    pub fn new(points: Vec<Pos>, cells: Vec<Cell>) -> Self {
        Self { points, cells }
    }

    pub fn points(&self) -> &[Pos] {
        &self.points
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points(&self.points)
    }

    /// Extracts one cell as a standalone mesh with faces renumbered to the
    /// cell's own points. Faces touching a missing point are left out.
    pub fn cell_mesh(&self, cell: &Cell) -> PolyMesh {
        let ids = (cell.point_ids().into_iter())
            .filter(|&idx| (idx as usize) < self.points.len())
            .collect::<Vec<_>>();
        let local = (ids.iter().enumerate())
            .map(|(local, &idx)| (idx, local as u32))
            .collect::<HashMap<_, _>>();

        let vertices = ids.iter().map(|&idx| self.points[idx as usize]).collect();
        let faces = (cell.faces.iter())
            .filter_map(|face| {
                (face.iter())
                    .map(|idx| local.get(idx).copied())
                    .collect::<Option<Vec<_>>>()
            })
            .collect();

        PolyMesh::new(vertices, faces)
    }
}

impl SceneData for UnstructuredGrid {
    const KIND: SceneKind = SceneKind::UnstructuredGrid;

    fn sub_meshes(&self) -> Vec<SubMesh<'_>> {
        (self.cells.iter())
            .map(|cell| SubMesh {
                name: &cell.name,
                mesh: self.cell_mesh(cell),
            })
            .collect()
    }

    fn slice(&self, plane: &ClipPlane) -> Self {
        clip_grid(self, plane)
    }
}

/// Any supported collection.
#[derive(Debug, Clone)]
pub enum Scene {
    MultiBlock(MultiBlock),
    UnstructuredGrid(UnstructuredGrid),
}

impl Scene {
    pub fn kind(&self) -> SceneKind {
        match self {
            Scene::MultiBlock(_) => MultiBlock::KIND,
            Scene::UnstructuredGrid(_) => UnstructuredGrid::KIND,
        }
    }

    pub fn sub_meshes(&self) -> Vec<SubMesh<'_>> {
        match self {
            Scene::MultiBlock(scene) => scene.sub_meshes(),
            Scene::UnstructuredGrid(scene) => scene.sub_meshes(),
        }
    }

    pub fn slice(&self, plane: &ClipPlane) -> Scene {
        match self {
            Scene::MultiBlock(scene) => Scene::MultiBlock(scene.slice(plane)),
            Scene::UnstructuredGrid(scene) => Scene::UnstructuredGrid(scene.slice(plane)),
        }
    }

    pub fn to_payload(&self, attributes: &AttributeTable) -> ScenePayload {
        match self {
            Scene::MultiBlock(scene) => scene.to_payload(attributes),
            Scene::UnstructuredGrid(scene) => scene.to_payload(attributes),
        }
    }
}

impl From<MultiBlock> for Scene {
    fn from(value: MultiBlock) -> Self {
        Scene::MultiBlock(value)
    }
}

impl From<UnstructuredGrid> for Scene {
    fn from(value: UnstructuredGrid) -> Self {
        Scene::UnstructuredGrid(value)
    }
}
