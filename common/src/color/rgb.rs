// Reference: https://www.w3.org/Graphics/Color/srgb

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// An sRGB color. Serialized as a plain `[r, g, b]` triple, which is what the
/// front end indexes into.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(
    into = "[T; 3]",
    from = "[T; 3]",
    bound(
        serialize = "T: Copy + Serialize",
        deserialize = "T: Copy + Deserialize<'de>"
    )
)]
pub struct SRgb<T> {
    pub r: T,
    pub g: T,
    pub b: T,
}

impl<T> SRgb<T> {
    pub fn new(r: T, g: T, b: T) -> Self {
        Self { r, g, b }
    }
}

impl<T: Copy> SRgb<T> {
    pub fn repeat(v: T) -> Self {
        Self::new(v, v, v)
    }

    pub fn to_array(&self) -> [T; 3] {
        [self.r, self.g, self.b]
    }

    pub fn map<U>(&self, f: impl Fn(T) -> U) -> SRgb<U> {
        SRgb::new(f(self.r), f(self.g), f(self.b))
    }
}

impl SRgb<u8> {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }

    pub fn to_f32(&self) -> SRgb<f32> {
        self.map(|x| x as f32 / 255.0)
    }
}

impl SRgb<f32> {
    /// Quantizes each channel to a byte, clamping out of range values.
    pub fn to_u8(&self) -> SRgb<u8> {
        self.map(|x| (x.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// Formats the color as a lowercase `#rrggbb` string.
    pub fn to_hex(&self) -> String {
        let SRgb { r, g, b } = self.to_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Parses a `#rrggbb` (or `rrggbb`) string.
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return None;
        }

        let value = u32::from_str_radix(hex, 16).ok()?;
        Some(SRgb::from_hex(value).to_f32())
    }

    /// Subtracts `amount` from every channel, saturating at zero.
    pub fn darken(&self, amount: f32) -> Self {
        self.map(|x| (x - amount).max(0.0))
    }

    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

impl<T> From<[T; 3]> for SRgb<T> {
    fn from([r, g, b]: [T; 3]) -> Self {
        Self { r, g, b }
    }
}

impl<T> From<SRgb<T>> for [T; 3] {
    fn from(value: SRgb<T>) -> Self {
        [value.r, value.g, value.b]
    }
}

impl<T> From<SRgb<T>> for Vector3<T> {
    fn from(value: SRgb<T>) -> Self {
        Vector3::new(value.r, value.g, value.b)
    }
}

impl<T: Copy> From<Vector3<T>> for SRgb<T> {
    fn from(value: Vector3<T>) -> Self {
        let [r, g, b] = value.data.0[0];
        Self { r, g, b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let color = SRgb::parse_hex("#2166ac").unwrap();
        assert_eq!(color.to_hex(), "#2166ac");
        assert_eq!(SRgb::parse_hex("2166AC"), Some(color));
        assert_eq!(SRgb::parse_hex("#2166a"), None);
        assert_eq!(SRgb::parse_hex("#zz66ac"), None);
    }

    #[test]
    fn darken_saturates() {
        let color = SRgb::new(0.1, 0.5, 1.0).darken(0.2);
        assert_eq!(color.r, 0.0);
        assert!((color.g - 0.3).abs() < 1e-6);
        assert!((color.b - 0.8).abs() < 1e-6);
    }

    #[test]
    fn serializes_as_triple() {
        let json = serde_json::to_string(&SRgb::new(1.0_f32, 0.5, 0.0)).unwrap();
        assert_eq!(json, "[1.0,0.5,0.0]");

        let color: SRgb<f32> = serde_json::from_str("[0.25,0.5,0.75]").unwrap();
        assert_eq!(color, SRgb::new(0.25, 0.5, 0.75));
    }
}
