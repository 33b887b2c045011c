use anyhow::Result;
use common::color::{colormap::linspace, rd_bu, rd_bu_hex, SRgb};
use scene::{
    attributes::AttributeTable,
    bounding_box::BoundingBox,
    scene::Scene,
    shapes::{cube_grid, hex_grid},
    Pos,
};

use crate::args::{Args, Kind};

/// Number of color bar stops.
const COLOR_BAR_STOPS: usize = 11;

pub struct Demo {
    pub scene: Scene,
    pub attributes: AttributeTable,
    pub color_bar: Vec<String>,
    pub color_bar_bounds: (f32, f32),
}

impl Demo {
    pub fn new(args: &Args) -> Result<Self> {
        let scene: Scene = match args.kind {
            Kind::MultiBlock => cube_grid(args.grid, args.spacing).into(),
            Kind::UnstructuredGrid => hex_grid(args.grid, args.spacing).into(),
        };

        let centers = (scene.sub_meshes().iter())
            .map(|x| x.mesh.bounds().center())
            .collect::<Vec<_>>();
        let count = centers.len();

        let colors = rd_bu(&gradient(&centers), 256)
            .into_iter()
            .map(|[r, g, b, _]| SRgb::new(r, g, b))
            .collect::<Vec<_>>();
        let edge_colors = (colors.iter())
            .map(|x| x.darken(args.edge_darken))
            .collect();

        let attributes = AttributeTable::new(
            (0..count).map(|i| format!("Object {i}")).collect(),
            (0..count).map(|i| i as f32).collect(),
            colors,
            edge_colors,
        )?;

        Ok(Self {
            scene,
            attributes,
            color_bar: rd_bu_hex(&linspace(COLOR_BAR_STOPS), 256),
            color_bar_bounds: (0.0, count.saturating_sub(1) as f32),
        })
    }
}

/// Normalizes the centers into the unit cube and scores each one by its
/// largest coordinate times the coordinate sum, scaled so the top score is 1.
fn gradient(centers: &[Pos]) -> Vec<f32> {
    let bounds = BoundingBox::from_points(centers);
    let range = bounds.extent().map(|x| if x > 0.0 { x } else { 1.0 });

    let values = (centers.iter())
        .map(|x| (x - bounds.min).component_div(&range))
        .map(|x| x.max() * x.sum())
        .collect::<Vec<_>>();

    let max = values.iter().copied().fold(0.0, f32::max);
    if max > 0.0 {
        values.into_iter().map(|x| x / max).collect()
    } else {
        values
    }
}
