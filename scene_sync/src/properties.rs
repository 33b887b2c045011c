//! Properties shared with the front end: inbound changes and the scalar
//! controls published alongside the scene data.

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// A property change coming from the front end or the host application,
/// encoded as `{"name": "...", "value": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "value", rename_all = "snake_case")]
pub enum PropertyChange {
    /// Column-major pose of the slice tool.
    Matrix(Vec<f32>),
    SliceToolVisible(bool),
    DisplayAxesGizmo(bool),
    AxesVisible(bool),
    DisplayColorMap(bool),
    SliceToolScale(f32),
    Intensity(f32),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Controls {
    pub intensity: f32,
    pub slice_tool_visible: bool,
    pub slice_tool_scale: f32,
    pub display_axes_gizmo: bool,
    pub axes_visible: bool,
    pub display_color_map: bool,
    pub color_map_colors: Vec<String>,
    pub color_bar_bounds: (f32, f32),
}

impl Controls {
    /// Applies a change that only touches the controls. Returns `false` for
    /// changes that are not controls (the clip matrix) and for changes that
    /// leave the value as it was.
    pub fn apply(&mut self, change: &PropertyChange) -> bool {
        fn set<T: PartialEq + Copy>(slot: &mut T, value: T) -> bool {
            let changed = *slot != value;
            *slot = value;
            changed
        }

        match *change {
            PropertyChange::Matrix(_) => false,
            PropertyChange::SliceToolVisible(x) => set(&mut self.slice_tool_visible, x),
            PropertyChange::DisplayAxesGizmo(x) => set(&mut self.display_axes_gizmo, x),
            PropertyChange::AxesVisible(x) => set(&mut self.axes_visible, x),
            PropertyChange::DisplayColorMap(x) => set(&mut self.display_color_map, x),
            PropertyChange::SliceToolScale(x) => set(&mut self.slice_tool_scale, x),
            PropertyChange::Intensity(x) => set(&mut self.intensity, x),
        }
    }
}

impl From<&Config> for Controls {
    fn from(config: &Config) -> Self {
        Self {
            intensity: config.intensity,
            slice_tool_visible: config.slice_tool_visible,
            slice_tool_scale: config.slice_tool_scale,
            display_axes_gizmo: config.display_axes_gizmo,
            axes_visible: config.axes_visible,
            display_color_map: config.display_color_map,
            color_map_colors: config.color_map_colors.clone(),
            color_bar_bounds: config.color_bar_bounds,
        }
    }
}
