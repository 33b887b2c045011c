use scene::{bounding_box::BoundingBox, payload::ScenePayload};
use serde::Serialize;

use crate::properties::Controls;

/// Everything the front end renders, published as one unit. Field names match
/// the properties the bundle reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Increases by one with every publication.
    pub revision: u64,

    pub data_dict: Vec<ScenePayload>,
    /// Bounds of all included sub-meshes.
    pub axes_data_box: Option<BoundingBox>,
    /// `axes_data_box` with padding, used to frame the axes and camera.
    pub axes_range: Option<BoundingBox>,
    /// Pose of the slice tool, if one has been applied.
    pub matrix: Option<[f32; 16]>,

    #[serde(flatten)]
    pub controls: Controls,
}

impl Frame {
    pub fn new(controls: Controls) -> Self {
        Self {
            revision: 0,
            data_dict: Vec::new(),
            axes_data_box: None,
            axes_range: None,
            matrix: None,
            controls,
        }
    }

    /// Total number of sub-meshes across all scenes.
    pub fn sub_mesh_count(&self) -> usize {
        self.data_dict.iter().map(ScenePayload::len).sum()
    }

    /// Same content, ignoring the revision.
    pub fn same_content(&self, other: &Frame) -> bool {
        self.data_dict == other.data_dict
            && self.axes_data_box == other.axes_data_box
            && self.axes_range == other.axes_range
            && self.matrix == other.matrix
            && self.controls == other.controls
    }
}
