use nalgebra::Matrix4;

use crate::{Pos, SceneError};

/// Normals shorter than this are rejected.
const MIN_NORMAL_LENGTH: f32 = 1e-6;

/// A cutting plane. Clipping keeps everything on the side opposite the normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlane {
    origin: Pos,
    normal: Pos,
}

impl ClipPlane {
    /// Creates a plane through `origin`. The normal is normalized.
    pub fn new(origin: Pos, normal: Pos) -> Result<Self, SceneError> {
        if !origin.iter().all(|x| x.is_finite()) {
            return Err(SceneError::NonFiniteClipOrigin);
        }

        let length = normal.norm();
        if !length.is_finite() || length < MIN_NORMAL_LENGTH {
            return Err(SceneError::DegenerateClipPlane);
        }

        Ok(Self {
            origin,
            normal: normal / length,
        })
    }

    /// Derives the plane from a column-major 4x4 pose, as sent by the slice
    /// gizmo. The translation column is the origin and the second basis
    /// column (the gizmo's local Y axis) is the normal.
    pub fn from_matrix(elements: &[f32]) -> Result<Self, SceneError> {
        if elements.len() != 16 {
            return Err(SceneError::InvalidMatrix {
                len: elements.len(),
            });
        }

        let matrix = Matrix4::from_column_slice(elements);
        let origin = matrix.column(3).xyz();
        let normal = matrix.column(1).xyz();
        Self::new(origin, normal)
    }

    pub fn origin(&self) -> Pos {
        self.origin
    }

    pub fn normal(&self) -> Pos {
        self.normal
    }

    /// Positive in front of the plane (the removed side), negative behind it.
    pub fn signed_distance(&self, point: &Pos) -> f32 {
        (point - self.origin).dot(&self.normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    const IDENTITY: [f32; 16] = [
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ];

    #[test]
    fn identity_pose() {
        let plane = ClipPlane::from_matrix(&IDENTITY).unwrap();
        assert_eq!(plane.origin(), Pos::zeros());
        assert_eq!(plane.normal(), Pos::y());
    }

    #[test]
    fn reads_translation_and_second_column() {
        let mut elements = IDENTITY;
        elements[4..7].copy_from_slice(&[0.0, 0.0, 2.0]);
        elements[12..15].copy_from_slice(&[1.0, 2.0, 3.0]);

        let plane = ClipPlane::from_matrix(&elements).unwrap();
        assert_eq!(plane.origin(), Pos::new(1.0, 2.0, 3.0));
        assert_eq!(plane.normal(), Pos::z());
        assert_eq!(plane.signed_distance(&Pos::new(0.0, 0.0, 5.0)), 2.0);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            ClipPlane::from_matrix(&IDENTITY[..12]),
            Err(SceneError::InvalidMatrix { len: 12 })
        );

        let mut elements = IDENTITY;
        elements[5] = 0.0;
        assert_eq!(
            ClipPlane::from_matrix(&elements),
            Err(SceneError::DegenerateClipPlane)
        );

        for value in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let mut elements = IDENTITY;
            elements[13] = value;
            assert_eq!(
                ClipPlane::from_matrix(&elements),
                Err(SceneError::NonFiniteClipOrigin)
            );
        }
    }
}
