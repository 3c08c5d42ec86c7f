use egui::style::WidgetVisuals;
use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::model::{Priority, ProjectStatus, TaskStatus};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_HEADER: Color32 = Color32::from_rgb(34, 37, 48);
pub const BG_WEEKEND: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 8);
pub const BG_FIELD: Color32 = Color32::from_rgb(20, 20, 28);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(80, 140, 220, 45);
pub const BG_DROP_TARGET: Color32 = Color32::from_rgba_premultiplied(80, 140, 220, 30);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(90, 140, 220);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);
pub const TEXT_ON_BAR: Color32 = Color32::from_rgb(255, 255, 255);

pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);
pub const TODAY_LINE: Color32 = Color32::from_rgb(240, 75, 75);
pub const GRID_LINE: Color32 = Color32::from_rgb(44, 46, 58);
pub const HANDLE_COLOR: Color32 = Color32::from_rgb(255, 255, 255);
pub const PROJECT_BAR: Color32 = Color32::from_rgb(66, 133, 244);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const ROW_HEIGHT: f32 = 32.0;
pub const HEADER_HEIGHT: f32 = 44.0;
pub const HANDLE_WIDTH: f32 = 4.0;
pub const BAR_ROUNDING: f32 = 5.0;
pub const BAR_INSET: f32 = 5.0; // vertical inset so bars don't touch row edges
pub const MIN_BAR_WIDTH: f32 = 50.0;
pub const BOARD_COLUMN_WIDTH: f32 = 260.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

// ── Domain colors ────────────────────────────────────────────────────────────

pub fn status_color(status: ProjectStatus) -> Color32 {
    match status {
        ProjectStatus::Backlog => Color32::from_rgb(120, 124, 140),
        ProjectStatus::Planned => Color32::from_rgb(3, 169, 244),
        ProjectStatus::Active => Color32::from_rgb(251, 140, 0),
        ProjectStatus::Cancelled => Color32::from_rgb(229, 57, 53),
        ProjectStatus::Completed => Color32::from_rgb(52, 168, 83),
    }
}

pub fn task_color(status: TaskStatus) -> Color32 {
    match status {
        TaskStatus::Todo => Color32::from_rgb(171, 71, 188),
        TaskStatus::InProgress => Color32::from_rgb(0, 188, 212),
        TaskStatus::Done => Color32::from_rgb(52, 168, 83),
    }
}

pub fn priority_color(priority: Priority) -> Color32 {
    match priority {
        Priority::Urgent => Color32::from_rgb(229, 57, 53),
        Priority::High => Color32::from_rgb(251, 140, 0),
        Priority::Medium => Color32::from_rgb(255, 193, 7),
        Priority::Low => Color32::from_rgb(120, 124, 140),
    }
}

// ── Visuals ──────────────────────────────────────────────────────────────────

fn style_widget(widget: &mut WidgetVisuals, fill: Color32, border: Color32, text: Stroke) {
    widget.bg_fill = fill;
    widget.weak_bg_fill = fill;
    widget.bg_stroke = Stroke::new(1.0, border);
    widget.fg_stroke = text;
    widget.rounding = Rounding::same(4.0);
}

/// Install the dark dashboard look on `ctx`.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals {
        override_text_color: Some(TEXT_PRIMARY),
        panel_fill: BG_PANEL,
        window_fill: BG_PANEL,
        extreme_bg_color: BG_FIELD,
        faint_bg_color: Color32::from_rgb(34, 34, 45),
        striped: true,
        window_rounding: Rounding::same(8.0),
        window_stroke: Stroke::new(1.0, BORDER_SUBTLE),
        ..Visuals::dark()
    };

    let text = Stroke::new(1.0, TEXT_PRIMARY);
    let widgets = &mut visuals.widgets;
    style_widget(&mut widgets.noninteractive, BG_PANEL, BORDER_SUBTLE, Stroke::new(1.0, TEXT_SECONDARY));
    style_widget(&mut widgets.inactive, Color32::from_rgb(40, 43, 56), BORDER_SUBTLE, text);
    style_widget(&mut widgets.hovered, Color32::from_rgb(50, 54, 70), ACCENT, text);
    style_widget(&mut widgets.active, Color32::from_rgb(58, 63, 80), ACCENT, Stroke::new(2.0, Color32::WHITE));
    style_widget(&mut widgets.open, Color32::from_rgb(48, 52, 68), ACCENT, text);

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 5.0);
        style.spacing.button_padding = egui::vec2(8.0, 3.0);
        style.spacing.menu_margin = egui::Margin::same(6.0);
    });
}
