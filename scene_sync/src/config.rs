use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default color bar stops, dark purple through yellow.
pub const DEFAULT_COLOR_MAP: [&str; 11] = [
    "#440154", "#482878", "#3E4989", "#31688E", "#26828E", "#1F9E89", "#35B779", "#6DCD59",
    "#B4DE2C", "#FDE725", "#FFFFE0",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name of the front end module the payload is published to.
    pub bundle: String,

    // Initial control values
    pub intensity: f32,
    pub color_map_colors: Vec<String>,
    pub color_bar_bounds: (f32, f32),
    pub slice_tool_scale: f32,
    pub slice_tool_visible: bool,
    pub display_axes_gizmo: bool,
    pub axes_visible: bool,
    pub display_color_map: bool,

    // Display range
    pub range_padding: f32,
    pub min_axis_extent: f32,
}

impl Config {
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("Failed to load config, using defaults: {err:#}");
                Config::default()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(if path.exists() {
            let string = fs::read_to_string(path)
                .with_context(|| format!("Reading `{}`", path.display()))?;
            let config = toml::from_str(&string)?;
            info!("Loaded config from `{}`", path.display());
            config
        } else {
            info!("No config file at `{}`, using defaults", path.display());
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, toml::to_string(self)?)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bundle: "ReactThreeFiber.bundle.js".into(),

            intensity: 3.2,
            color_map_colors: DEFAULT_COLOR_MAP.map(String::from).to_vec(),
            color_bar_bounds: (0.0, 1.0),
            slice_tool_scale: 1.0,
            slice_tool_visible: false,
            display_axes_gizmo: true,
            axes_visible: true,
            display_color_map: false,

            range_padding: 0.1,
            min_axis_extent: 1e-3,
        }
    }
}
