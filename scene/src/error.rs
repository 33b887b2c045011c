use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// The attribute arrays differ in length or a name is repeated.
    InvalidAttributeTable { reason: String },
    /// A clip pose must be a 4x4 matrix given as 16 elements.
    InvalidMatrix { len: usize },
    /// The clip normal has (almost) no length.
    DegenerateClipPlane,
    /// The clip origin has a NaN or infinite coordinate.
    NonFiniteClipOrigin,
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::InvalidAttributeTable { reason } => {
                write!(f, "invalid attribute table: {reason}")
            }
            SceneError::InvalidMatrix { len } => {
                write!(f, "expected a 16 element transform matrix, got {len} elements")
            }
            SceneError::DegenerateClipPlane => f.write_str("clip plane normal has zero length"),
            SceneError::NonFiniteClipOrigin => {
                f.write_str("clip plane origin is not a finite point")
            }
        }
    }
}

impl Error for SceneError {}
