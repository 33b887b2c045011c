//! Polygon triangulation. Faces are assumed to be planar and convex, which
//! holds for everything the clipper produces from convex input.

use itertools::Itertools;

/// Fan triangulation of one polygon. Polygons with fewer than three corners
/// produce nothing.
pub fn fan(face: &[u32]) -> impl Iterator<Item = [u32; 3]> + '_ {
    let first = face.first().copied();
    face.iter()
        .skip(1)
        .tuple_windows()
        .filter_map(move |(&b, &c)| first.map(|a| [a, b, c]))
}

/// Triangulates every face, skipping faces that reference a point outside
/// `vertex_count`.
pub fn triangulate_faces<'a>(
    faces: impl IntoIterator<Item = &'a [u32]>,
    vertex_count: usize,
) -> Vec<[u32; 3]> {
    faces
        .into_iter()
        .filter(|face| face.iter().all(|&idx| (idx as usize) < vertex_count))
        .flat_map(fan)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fans_from_first_corner() {
        assert_eq!(fan(&[0, 1, 2]).collect::<Vec<_>>(), vec![[0, 1, 2]]);
        assert_eq!(
            fan(&[4, 5, 6, 7, 8]).collect::<Vec<_>>(),
            vec![[4, 5, 6], [4, 6, 7], [4, 7, 8]]
        );
    }

    #[test]
    fn degenerate_faces_are_empty() {
        assert_eq!(fan(&[]).count(), 0);
        assert_eq!(fan(&[1, 2]).count(), 0);
    }

    #[test]
    fn skips_out_of_range_faces() {
        let faces: [&[u32]; 2] = [&[0, 1, 2, 3], &[0, 1, 9]];
        assert_eq!(triangulate_faces(faces, 4), vec![[0, 1, 2], [0, 2, 3]]);
    }
}
