use std::{collections::HashMap, sync::Arc};

use crate::{bounding_box::BoundingBox, triangulate::triangulate_faces, Pos};

/// A polygonal surface: points and faces, where each face is a list of
/// indices into the points. Cloning is cheap, the data is shared and never
/// mutated; clipping always produces a new mesh.
#[derive(Debug, Clone, Default)]
pub struct PolyMesh {
    inner: Arc<PolyMeshInner>,
}

#[derive(Debug, Default, PartialEq)]
struct PolyMeshInner {
    vertices: Box<[Pos]>,
    faces: Box<[Vec<u32>]>,
}

impl PolyMesh {
    pub fn new(vertices: Vec<Pos>, faces: Vec<Vec<u32>>) -> Self {
        Self {
            inner: Arc::new(PolyMeshInner {
                vertices: vertices.into_boxed_slice(),
                faces: faces.into_boxed_slice(),
            }),
        }
    }

    /// Builds a mesh from triangles only.
    pub fn from_triangles(vertices: Vec<Pos>, faces: Vec<[u32; 3]>) -> Self {
        Self::new(vertices, faces.into_iter().map(Vec::from).collect())
    }

    pub fn vertices(&self) -> &[Pos] {
        self.inner.vertices.as_ref()
    }

    pub fn faces(&self) -> &[Vec<u32>] {
        self.inner.faces.as_ref()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    pub fn face_count(&self) -> usize {
        self.faces().len()
    }

    /// A mesh without points or without faces has nothing to render.
    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Splits every face into triangles. Faces with out of range indices are
    /// left out.
    pub fn triangulate(&self) -> Vec<[u32; 3]> {
        triangulate_faces(
            self.faces().iter().map(Vec::as_slice),
            self.vertex_count(),
        )
    }

    /// Get the minimum and maximum of each component of every vertex in the
    /// mesh.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points(self.vertices())
    }

    /// True if every edge is shared by exactly two faces.
    pub fn is_closed(&self) -> bool {
        let mut edges = HashMap::<_, u8>::new();

        for face in self.faces() {
            for (i, &a) in face.iter().enumerate() {
                let b = face[(i + 1) % face.len()];
                *edges.entry((a.min(b), a.max(b))).or_default() += 1;
            }
        }

        !edges.is_empty() && edges.values().all(|&count| count == 2)
    }
}

impl PartialEq for PolyMesh {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::cube;

    #[test]
    fn cube_triangulates_to_twelve() {
        let mesh = cube(Pos::zeros(), 1.0);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 6);
        assert_eq!(mesh.triangulate().len(), 12);
        assert!(mesh.is_closed());
    }

    #[test]
    fn bounds_of_unit_cube() {
        let bounds = cube(Pos::new(1.0, 2.0, 3.0), 1.0).bounds();
        assert_eq!(bounds.min, Pos::new(0.5, 1.5, 2.5));
        assert_eq!(bounds.max, Pos::new(1.5, 2.5, 3.5));
    }

    #[test]
    fn empty_meshes() {
        assert!(PolyMesh::default().is_empty());
        assert!(PolyMesh::new(vec![Pos::zeros()], Vec::new()).is_empty());
        assert!(!PolyMesh::from_triangles(
            vec![Pos::zeros(), Pos::x(), Pos::y()],
            vec![[0, 1, 2]]
        )
        .is_empty());
    }

    #[test]
    fn open_surface_is_not_closed() {
        let mesh = PolyMesh::from_triangles(vec![Pos::zeros(), Pos::x(), Pos::y()], vec![[0, 1, 2]]);
        assert!(!mesh.is_closed());
    }
}
