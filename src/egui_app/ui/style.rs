use egui::{Color32, CornerRadius, Stroke, Visuals};

use crate::egui_app::state::ResultTone;

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_page: Color32,
    pub bg_panel: Color32,
    pub panel_outline: Color32,
    pub text_heading: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub accent_hover: Color32,
    pub success_fill: Color32,
    pub success_text: Color32,
    pub error_fill: Color32,
    pub error_text: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_page: Color32::from_rgb(0xf8, 0xf9, 0xfa),
        bg_panel: Color32::WHITE,
        panel_outline: Color32::from_rgb(0xde, 0xe2, 0xe6),
        text_heading: Color32::from_rgb(0x21, 0x25, 0x29),
        text_primary: Color32::from_rgb(0x34, 0x3a, 0x40),
        text_muted: Color32::from_rgb(0x6c, 0x75, 0x7d),
        accent: Color32::from_rgb(0x0d, 0x6e, 0xfd),
        accent_hover: Color32::from_rgb(0x0b, 0x5e, 0xd7),
        success_fill: Color32::from_rgb(0xd1, 0xe7, 0xdd),
        success_text: Color32::from_rgb(0x0f, 0x51, 0x32),
        error_fill: Color32::from_rgb(0xf8, 0xd7, 0xda),
        error_text: Color32::from_rgb(0x84, 0x20, 0x29),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_page;
    visuals.panel_fill = palette.bg_page;
    visuals.extreme_bg_color = palette.bg_panel;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.error_fg_color = palette.error_text;
    visuals.selection.bg_fill = palette.accent;
    visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);
    visuals.widgets.inactive.corner_radius = CornerRadius::same(6);
    visuals.widgets.hovered.corner_radius = CornerRadius::same(6);
    visuals.widgets.active.corner_radius = CornerRadius::same(6);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, palette.accent_hover);
}

/// `(fill, text)` colours for a result banner.
pub fn result_colors(tone: ResultTone) -> (Color32, Color32) {
    let palette = palette();
    match tone {
        ResultTone::Churn => (palette.error_fill, palette.error_text),
        ResultTone::Stay => (palette.success_fill, palette.success_text),
    }
}

pub fn panel_stroke() -> Stroke {
    Stroke::new(1.0, palette().panel_outline)
}
