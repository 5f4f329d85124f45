use eframe::egui::{Color32, Painter, Rect};

use crate::skills::Rgb;

pub(super) const BACKGROUND: Color32 = Color32::from_rgb(19, 23, 29);
pub(super) const AXIS_COLOR: Color32 = Color32::from_gray(150);
pub(super) const GRID_COLOR: Color32 = Color32::from_rgba_premultiplied(42, 48, 56, 90);
pub(super) const LABEL_COLOR: Color32 = Color32::from_gray(215);
pub(super) const REFERENCE_LINE_COLOR: Color32 = Color32::from_rgba_premultiplied(64, 64, 64, 128);

pub(super) fn to_color32(color: Rgb) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, BACKGROUND);
}
