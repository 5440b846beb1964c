//! Dark map theme for the egui surface

use egui::Color32;

use crate::core::theme::{Rgb, Theme};

/// Dark palette, greys only; map content brings the color
pub mod colors {
    use super::Color32;

    // === Backgrounds ===
    pub const BG_PRIMARY: Color32 = Color32::from_rgb(0, 0, 0);           // #000000 - panels
    pub const BG_ELEVATED: Color32 = Color32::from_rgb(12, 12, 12);       // #0C0C0C - subtle elevation
    pub const BG_HOVER: Color32 = Color32::from_rgb(24, 24, 24);          // #181818 - hover states

    // === Text ===
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(255, 255, 255);   // #FFFFFF - primary text
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 160, 160); // #A0A0A0 - secondary
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(80, 80, 80);        // #505050 - muted/disabled

    /// On-screen clock
    pub const CLOCK: Color32 = Color32::from_rgb(255, 0, 0);

    // === Lines & Borders ===
    pub const BORDER: Color32 = Color32::from_rgb(40, 40, 40);            // #282828 - subtle borders
}

/// Theme color with an opacity in `0.0..=1.0`
pub fn rgb_alpha(rgb: Rgb, opacity: f32) -> Color32 {
    let [r, g, b] = rgb;
    let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Base fill behind the map layers, a dimmed `building_color`
pub fn map_background(theme: &Theme) -> Color32 {
    let [r, g, b] = theme.building_color.map(|c| (c as f32 * 0.22).round() as u8);
    Color32::from_rgb(r, g, b)
}

/// Dark egui Visuals keyed to the map theme: greys for chrome, the vendor
/// trail colors for selection and active widgets.
pub fn map_visuals(theme: &Theme) -> egui::Visuals {
    use colors::*;

    let accent = rgb_alpha(theme.trail_color0, 1.0);
    let accent_alt = rgb_alpha(theme.trail_color1, 1.0);
    let building = rgb_alpha(theme.building_color, 1.0);

    let mut visuals = egui::Visuals::dark();

    visuals.panel_fill = BG_PRIMARY;
    visuals.window_fill = BG_PRIMARY;
    visuals.extreme_bg_color = map_background(theme);
    visuals.faint_bg_color = BG_ELEVATED;
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.hyperlink_color = accent_alt;

    visuals.widgets.noninteractive.bg_fill = BG_PRIMARY;
    visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, TEXT_MUTED);
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, BORDER);

    visuals.widgets.inactive.bg_fill = BG_HOVER;
    visuals.widgets.inactive.weak_bg_fill = BG_PRIMARY;
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, BORDER);

    // Slider rails and hovered buttons take the building grey
    visuals.widgets.hovered.bg_fill = building;
    visuals.widgets.hovered.weak_bg_fill = BG_ELEVATED;
    visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, accent_alt);

    visuals.widgets.active.bg_fill = accent;
    visuals.widgets.active.weak_bg_fill = BG_HOVER;
    visuals.widgets.active.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(1.0, accent);

    visuals.selection.bg_fill = rgb_alpha(theme.trail_color0, 0.35);
    visuals.selection.stroke = egui::Stroke::new(1.0, accent);

    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}
