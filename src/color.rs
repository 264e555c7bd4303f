use std::fmt;

use eframe::egui::Color32;
use palette::Srgb;

// ---------------------------------------------------------------------------
// Viridis gradient
// ---------------------------------------------------------------------------

/// Evenly spaced viridis stops, packed as `rrggbb` hex triples.
const VIRIDIS: &str = concat!(
    "440154470e61481a6c482575472f7d443a834144873d4e8a39568c35608d31688e2d708e",
    "2a788e27818e23888e21918d1f988b1fa08822a8842ab07f35b77943bf7154c56866cc5d",
    "7ad1518fd744a5db36bcdf27d2e21be9e51afde725"
);

const STOP_COUNT: usize = VIRIDIS.len() / 6;

/// Decode stop `i` straight out of the packed table.
fn stop(i: usize) -> Srgb<f32> {
    let hex = &VIRIDIS.as_bytes()[i * 6..i * 6 + 6];
    let channel = |j: usize| {
        std::str::from_utf8(&hex[j..j + 2])
            .ok()
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(0)
    };
    Srgb::new(channel(0), channel(2), channel(4)).into_format::<f32>()
}

/// Map `t` in [0,1] onto the viridis gradient, interpolating linearly
/// between neighbouring stops. `t` must already be clamped.
pub fn viridis(t: f32) -> Srgb<f32> {
    let last = STOP_COUNT - 1;
    let scaled = t * last as f32;
    let lo = (scaled.floor() as usize).min(last);
    let hi = (lo + 1).min(last);
    let frac = scaled - lo as f32;

    let (a, b) = (stop(lo), stop(hi));
    Srgb::new(
        a.red + (b.red - a.red) * frac,
        a.green + (b.green - a.green) * frac,
        a.blue + (b.blue - a.blue) * frac,
    )
}

/// Clamp a normalized scalar to [0,1] (NaN counts as 0) and look up its colour.
pub fn map_normalized(value: f64) -> HexColor {
    let t = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    HexColor::from_rgb_f32(viridis(t as f32))
}

// ---------------------------------------------------------------------------
// HexColor – `#rrggbb`
// ---------------------------------------------------------------------------

/// An opaque RGB colour that displays as lowercase `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor([u8; 3]);

impl HexColor {
    /// Each channel becomes `round(channel * 255)`.
    pub fn from_rgb_f32(rgb: Srgb<f32>) -> Self {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        HexColor([quantize(rgb.red), quantize(rgb.green), quantize(rgb.blue)])
    }

    pub fn to_color32(self) -> Color32 {
        let [r, g, b] = self.0;
        Color32::from_rgb(r, g, b)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}
