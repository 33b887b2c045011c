pub mod colormap;
mod rgb;

pub use self::{
    colormap::{rd_bu, rd_bu_hex, Colormap, RD_BU},
    rgb::SRgb,
};
