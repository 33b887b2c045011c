pub mod color;
pub mod misc;
