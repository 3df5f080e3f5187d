//! RGBA colors and HSV-based shading helpers

use palette::{FromColor, Hsv, Srgb, Srgba};

/// 8-bit sRGB color with alpha
pub type Color = Srgba<u8>;

const fn rgb(red: u8, green: u8, blue: u8) -> Color {
    Color {
        color: Srgb::new(red, green, blue),
        alpha: 255,
    }
}

pub const BLACK: Color = rgb(0, 0, 0);
pub const WHITE: Color = rgb(255, 255, 255);
pub const LIGHT_GREY: Color = rgb(211, 211, 211);
pub const DARK_RED: Color = rgb(139, 0, 0);
pub const INDIAN_RED: Color = rgb(238, 99, 99);
pub const WHEAT: Color = rgb(238, 216, 174);
pub const SKY_BLUE: Color = rgb(135, 206, 235);

/// Scales the HSV value (brightness) of a color by `factor`
pub fn darker(color: Color, factor: f32) -> Color {
    map_hsv(color, |hsv| hsv.value *= factor)
}

/// Replaces the HSV value (brightness) of a color with `value`
pub fn change_value(color: Color, value: f32) -> Color {
    map_hsv(color, |hsv| hsv.value = value)
}

/// Scales the HSV saturation of a color by `factor`
pub fn desaturate(color: Color, factor: f32) -> Color {
    map_hsv(color, |hsv| hsv.saturation *= factor)
}

/// Same color with a different alpha
pub fn with_alpha(color: Color, alpha: u8) -> Color {
    Color { alpha, ..color }
}

fn map_hsv(color: Color, change: impl FnOnce(&mut Hsv)) -> Color {
    let mut hsv = Hsv::from_color(color.color.into_format::<f32>());
    change(&mut hsv);
    hsv.saturation = hsv.saturation.clamp(0.0, 1.0);
    hsv.value = hsv.value.clamp(0.0, 1.0);
    Color {
        color: Srgb::from_color(hsv).into_format::<u8>(),
        alpha: color.alpha,
    }
}
