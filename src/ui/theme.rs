use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::board::NoticeKind;
use crate::model::ProjectStatus;

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(17, 24, 33);
pub const BG_PANEL: Color32 = Color32::from_rgb(23, 32, 44);
pub const BG_HEADER: Color32 = Color32::from_rgb(31, 43, 58);
pub const BG_FIELD: Color32 = Color32::from_rgb(13, 19, 27);
pub const BG_CONTROL: Color32 = Color32::from_rgb(36, 50, 67);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(20, 110, 120, 60);
pub const BG_STATUS_BAR: Color32 = Color32::from_rgb(14, 20, 28);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(44, 58, 76);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(226, 234, 242);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(148, 163, 184);
pub const TEXT_DIM: Color32 = Color32::from_rgb(96, 112, 132);

pub const ACCENT: Color32 = Color32::from_rgb(32, 178, 170);
pub const WARNING: Color32 = Color32::from_rgb(245, 158, 11);
pub const DANGER: Color32 = Color32::from_rgb(239, 68, 68);
pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const SIDE_PANEL_WIDTH: f32 = 220.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;
pub const FORM_FIELD_WIDTH: f32 = 260.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_status() -> FontId {
    FontId::proportional(11.0)
}

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

// ── Semantic colors ──────────────────────────────────────────────────────────

pub fn status_color(status: Option<ProjectStatus>) -> Color32 {
    match status {
        Some(ProjectStatus::New) => ACCENT,
        Some(ProjectStatus::InProgress) => WARNING,
        Some(ProjectStatus::Completed) => SUCCESS,
        Some(ProjectStatus::Pending) => TEXT_SECONDARY,
        None => TEXT_DIM,
    }
}

pub fn notice_color(kind: NoticeKind) -> Color32 {
    match kind {
        NoticeKind::Success => SUCCESS,
        NoticeKind::Error => DANGER,
    }
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

const CONTROL_ROUNDING: f32 = 3.0;

/// Dark slate look. Only the states the board's buttons, text fields, and
/// combo boxes go through are restyled; the rest keep egui's dark defaults.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_FIELD;
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);

    let w = &mut visuals.widgets;
    w.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    w.inactive.weak_bg_fill = BG_CONTROL;
    w.inactive.bg_fill = BG_CONTROL;
    for state in [&mut w.hovered, &mut w.active, &mut w.open] {
        state.bg_stroke = Stroke::new(1.0, ACCENT);
    }
    for state in [&mut w.inactive, &mut w.hovered, &mut w.active, &mut w.open] {
        state.rounding = Rounding::same(CONTROL_ROUNDING);
    }

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    ctx.set_visuals(visuals);
}
