use super::SRgb;

/// Number of lookup table entries used when no explicit count is requested.
pub const DEFAULT_LUT_SIZE: usize = 256;

/// ColorBrewer's diverging red to blue scheme. Red sits at 0.0 and blue at 1.0.
pub const RD_BU: Colormap = Colormap::new(&[
    SRgb::from_hex(0x67001f),
    SRgb::from_hex(0xb2182b),
    SRgb::from_hex(0xd6604d),
    SRgb::from_hex(0xf4a582),
    SRgb::from_hex(0xfddbc7),
    SRgb::from_hex(0xf7f7f7),
    SRgb::from_hex(0xd1e5f0),
    SRgb::from_hex(0x92c5de),
    SRgb::from_hex(0x4393c3),
    SRgb::from_hex(0x2166ac),
    SRgb::from_hex(0x053061),
]);

/// A colormap defined by evenly spaced color stops. Sampling first builds a
/// lookup table with a fixed number of entries and then indexes into it, so a
/// small table gives a banded (discrete) map.
#[derive(Debug, Clone, Copy)]
pub struct Colormap {
    stops: &'static [SRgb<u8>],
}

impl Colormap {
    pub const fn new(stops: &'static [SRgb<u8>]) -> Self {
        Self { stops }
    }

    /// Linearly interpolates the stops into `size` entries spanning [0, 1].
    pub fn lut(&self, size: usize) -> Vec<SRgb<f32>> {
        let size = size.max(1);
        let Some(last) = self.stops.len().checked_sub(1) else {
            return vec![SRgb::repeat(0.0); size];
        };

        (0..size)
            .map(|i| {
                let x = if size == 1 {
                    0.0
                } else {
                    i as f32 / (size - 1) as f32
                };

                let pos = x * last as f32;
                let lower = (pos.floor() as usize).min(last);
                let upper = (lower + 1).min(last);
                let t = pos - lower as f32;

                self.stops[lower]
                    .to_f32()
                    .lerp(&self.stops[upper].to_f32(), t)
            })
            .collect()
    }

    /// Maps each value through a `size` entry table. Values below zero or
    /// above one take the end colors and NaN becomes transparent black.
    pub fn sample(&self, values: &[f32], size: usize) -> Vec<[f32; 4]> {
        let lut = self.lut(size);
        values
            .iter()
            .map(|&value| match lookup(&lut, value) {
                Some(SRgb { r, g, b }) => [r, g, b, 1.0],
                None => [0.0; 4],
            })
            .collect()
    }

    /// Same as [`Colormap::sample`] but formats colors as `#rrggbb`. NaN
    /// values become black.
    pub fn sample_hex(&self, values: &[f32], size: usize) -> Vec<String> {
        let lut = self.lut(size);
        values
            .iter()
            .map(|&value| lookup(&lut, value).unwrap_or(SRgb::repeat(0.0)).to_hex())
            .collect()
    }
}

fn lookup(lut: &[SRgb<f32>], value: f32) -> Option<SRgb<f32>> {
    if value.is_nan() {
        return None;
    }

    let n = lut.len();
    let idx = (value * n as f32).floor();
    let idx = if idx < 0.0 {
        0
    } else {
        (idx as usize).min(n - 1)
    };

    Some(lut[idx])
}

/// Samples [`RD_BU`] and returns RGBA quadruples.
pub fn rd_bu(values: &[f32], discrete_count: usize) -> Vec<[f32; 4]> {
    RD_BU.sample(values, discrete_count)
}

/// Samples [`RD_BU`] and returns `#rrggbb` strings, for color bar stops.
pub fn rd_bu_hex(values: &[f32], discrete_count: usize) -> Vec<String> {
    RD_BU.sample_hex(values, discrete_count)
}

/// `count` evenly spaced values over [0, 1].
pub fn linspace(count: usize) -> Vec<f32> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..count)
            .map(|i| i as f32 / (count - 1) as f32)
            .collect(),
    }
}
