//! Title-bar colors

use serde::{Deserialize, Serialize};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Rgb {
    /// Black, the default title-bar color
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Create a color from exact byte components
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from arbitrary numbers, rounding and clamping each to `0..=255`
    pub fn clamped(r: f64, g: f64, b: f64) -> Self {
        Self::new(clamp_channel(r), clamp_channel(g), clamp_channel(b))
    }

    /// Pack into a Win32 `COLORREF` (`0x00BBGGRR`)
    pub const fn to_colorref(self) -> u32 {
        (self.r as u32) | ((self.g as u32) << 8) | ((self.b as u32) << 16)
    }
}

fn clamp_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<(i32, i32, i32)> for Rgb {
    fn from((r, g, b): (i32, i32, i32)) -> Self {
        Self::clamped(f64::from(r), f64::from(g), f64::from(b))
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_rounds_and_saturates() {
        assert_eq!(Rgb::clamped(-20.0, 127.6, 300.0), Rgb::new(0, 128, 255));
        assert_eq!(Rgb::clamped(f64::NAN, 0.4, 254.5), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_from_signed_tuple_clamps() {
        assert_eq!(Rgb::from((-1, 256, 42)), Rgb::new(0, 255, 42));
    }

    #[test]
    fn test_colorref_layout() {
        // COLORREF stores red in the low byte
        assert_eq!(Rgb::new(0x11, 0x22, 0x33).to_colorref(), 0x0033_2211);
        assert_eq!(Rgb::BLACK.to_colorref(), 0);
    }
}
