use eframe::egui::Color32;
use palette::{IntoColor, Lab, Mix, Srgb};

// ---------------------------------------------------------------------------
// Diverging colour scale for correlation coefficients
// ---------------------------------------------------------------------------

/// Endpoints of the cool → warm scale (blue at -1, grey at 0, red at +1).
const COOL: (u8, u8, u8) = (59, 76, 192);
const NEUTRAL: (u8, u8, u8) = (221, 221, 221);
const WARM: (u8, u8, u8) = (180, 4, 38);

/// Fill for cells whose coefficient is undefined.
pub const UNDEFINED_COLOR: Color32 = Color32::from_gray(90);

fn to_lab((r, g, b): (u8, u8, u8)) -> Lab {
    Srgb::new(r, g, b).into_format::<f32>().into_color()
}

fn to_color32(lab: Lab) -> Color32 {
    let rgb: Srgb = lab.into_color();
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgb(channel(rgb.red), channel(rgb.green), channel(rgb.blue))
}

/// Colour for a coefficient, interpolated in Lab space.  Values are clamped to
/// [-1, 1]; `None` maps to [`UNDEFINED_COLOR`].
pub fn correlation_color(value: Option<f64>) -> Color32 {
    let Some(v) = value else {
        return UNDEFINED_COLOR;
    };
    let v = v.clamp(-1.0, 1.0) as f32;
    let neutral = to_lab(NEUTRAL);
    let mixed = if v < 0.0 {
        neutral.mix(to_lab(COOL), -v)
    } else {
        neutral.mix(to_lab(WARM), v)
    };
    to_color32(mixed)
}

/// Text colour that stays readable on top of [`correlation_color`].
pub fn annotation_color(value: Option<f64>) -> Color32 {
    match value {
        Some(v) if v.abs() > 0.6 => Color32::WHITE,
        Some(_) => Color32::BLACK,
        None => Color32::LIGHT_GRAY,
    }
}
