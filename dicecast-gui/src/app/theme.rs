use eframe::egui::{self, Color32};

pub const BACKGROUND: Color32 = Color32::from_rgb(0x0F, 0x17, 0x2A);
pub const SURFACE: Color32 = Color32::from_rgb(0x1E, 0x29, 0x3B);
pub const BORDER: Color32 = Color32::from_rgb(0x33, 0x41, 0x55);
pub const FOREGROUND: Color32 = Color32::from_rgb(0xF8, 0xFA, 0xFC);
pub const ACCENT: Color32 = Color32::from_rgb(0x10, 0xB9, 0x81);
pub const DICE: Color32 = Color32::from_rgb(0x94, 0xA3, 0xB8);
pub const MUTED: Color32 = Color32::from_rgb(0x64, 0x74, 0x8B);
pub const ERROR: Color32 = Color32::from_rgb(0xEF, 0x44, 0x44);

pub const TITLE_SIZE: f32 = 24.0;
pub const GLYPH_SIZE: f32 = 13.0;
pub const STATUS_SIZE: f32 = 14.0;

/// Installs the dark slate palette on every widget.
pub fn apply(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = BACKGROUND;
    visuals.extreme_bg_color = SURFACE;
    visuals.override_text_color = Some(FOREGROUND);
    visuals.selection.bg_fill = ACCENT;
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, BORDER);
    visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(8);
    visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(8);
    visuals.widgets.active.corner_radius = egui::CornerRadius::same(8);
    ctx.set_visuals(visuals);
}
