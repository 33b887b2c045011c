use serde::{Deserialize, Serialize};

use crate::Pos;

/// An axis aligned bounding box. Serialized in the `[xmin, xmax, ymin, ymax,
/// zmin, zmax]` layout the front end expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f32; 6]", from = "[f32; 6]")]
pub struct BoundingBox {
    pub min: Pos,
    pub max: Pos,
}

impl BoundingBox {
    pub fn new(min: Pos, max: Pos) -> Self {
        Self { min, max }
    }

    /// A box containing nothing. Expanding it by any point yields a box
    /// around just that point.
    pub fn empty() -> Self {
        Self {
            min: Pos::repeat(f32::MAX),
            max: Pos::repeat(f32::MIN),
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Pos>) -> Self {
        points.into_iter().fold(Self::empty(), |mut bounds, point| {
            bounds.expand_point(point);
            bounds
        })
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn expand_point(&mut self, point: &Pos) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    pub fn extent(&self) -> Pos {
        self.max - self.min
    }

    pub fn center(&self) -> Pos {
        (self.min + self.max) / 2.0
    }

    pub fn longest_extent(&self) -> f32 {
        self.extent().max()
    }

    /// Grows every axis by `fraction` of its extent on both sides. Axes
    /// thinner than `min_extent` are padded as if they were `min_extent`
    /// wide, so flat data still gets a visible range.
    pub fn padded(&self, fraction: f32, min_extent: f32) -> Self {
        let pad = self.extent().map(|x| x.max(min_extent) * fraction);
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    pub fn to_array(&self) -> [f32; 6] {
        [
            self.min.x, self.max.x, self.min.y, self.max.y, self.min.z, self.max.z,
        ]
    }

    pub fn from_array([x0, x1, y0, y1, z0, z1]: [f32; 6]) -> Self {
        Self {
            min: Pos::new(x0, y0, z0),
            max: Pos::new(x1, y1, z1),
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<BoundingBox> for [f32; 6] {
    fn from(value: BoundingBox) -> Self {
        value.to_array()
    }
}

impl From<[f32; 6]> for BoundingBox {
    fn from(value: [f32; 6]) -> Self {
        Self::from_array(value)
    }
}
