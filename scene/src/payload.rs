use common::color::SRgb;
use serde::Serialize;
use tracing::debug;

use crate::{
    attributes::AttributeTable,
    bounding_box::BoundingBox,
    scene::{SceneKind, SubMesh},
};

/// Render-ready data for one scene. All per sub-mesh arrays share the same
/// length and order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenePayload {
    pub vertices: Vec<Vec<[f32; 3]>>,
    pub indices: Vec<Vec<[u32; 3]>>,
    pub colors: Vec<SRgb<f32>>,
    pub edge_colors: Vec<SRgb<f32>>,
    pub values: Vec<f32>,
    pub names: Vec<String>,
    /// Bounds of the included sub-meshes, `None` if nothing was included.
    /// Left out of the serialized payload when `None`.
    #[serde(rename = "axes_data_box", skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox>,
    #[serde(rename = "type")]
    pub kind: SceneKind,
}

impl ScenePayload {
    pub fn empty(kind: SceneKind) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            colors: Vec::new(),
            edge_colors: Vec::new(),
            values: Vec::new(),
            names: Vec::new(),
            bounds: None,
            kind,
        }
    }

    /// Flattens the sub-meshes into a payload. Sub-meshes without points or
    /// faces are skipped, as are sub-meshes whose name has no attribute entry.
    pub fn extract<'a>(
        kind: SceneKind,
        sub_meshes: impl IntoIterator<Item = SubMesh<'a>>,
        attributes: &AttributeTable,
    ) -> Self {
        let mut payload = Self::empty(kind);
        let mut dropped = 0;

        for SubMesh { name, mesh } in sub_meshes {
            if mesh.is_empty() {
                continue;
            }

            let Some(attribute) = attributes.by_name(name) else {
                debug!("No attributes for `{name}`, leaving it out");
                dropped += 1;
                continue;
            };

            let bounds = mesh.bounds();
            payload.bounds = Some(match payload.bounds {
                Some(total) => total.union(&bounds),
                None => bounds,
            });

            payload
                .vertices
                .push(mesh.vertices().iter().map(|v| [v.x, v.y, v.z]).collect());
            payload.indices.push(mesh.triangulate());
            payload.colors.push(attribute.color);
            payload.edge_colors.push(attribute.edge_color);
            payload.values.push(attribute.value);
            payload.names.push(attribute.name.to_owned());
        }

        if dropped > 0 {
            debug!("Dropped {dropped} sub-meshes without attributes");
        }

        payload
    }

    /// Number of sub-meshes included.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
