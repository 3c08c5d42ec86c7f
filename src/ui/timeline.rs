use chrono::{Datelike, NaiveDate};
use egui::{Align2, Color32, CursorIcon, Key, Painter, Pos2, Rect, RichText, Rounding, Sense, Stroke, Ui, Vec2};
use egui_phosphor::regular as icons;

use crate::model::drag::{BarTarget, DateCommit, DragController, DragKind};
use crate::model::rows::{ExpandState, RowKind, TimelineRow};
use crate::model::timeline::{is_weekend, Direction, TimelineWindow, ViewMode, MAX_ZOOM, MIN_ZOOM};
use crate::ui::theme;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;

/// What the chart asks the app to do after this frame.
#[derive(Debug, Default)]
pub struct TimelineOutput {
    pub commit: Option<DateCommit>,
    pub edit: Option<BarTarget>,
    pub window_changed: bool,
}

/// Bar caption, e.g. `1/10 - 1/15: Research`.
pub fn bar_label(start: NaiveDate, end: NaiveDate, name: &str) -> String {
    format!(
        "{}/{} - {}/{}: {}",
        start.month(),
        start.day(),
        end.month(),
        end.day(),
        name
    )
}

/// Render the timeline: toolbar, header, name column and bars.
pub fn show_timeline(
    ui: &mut Ui,
    rows: &[TimelineRow<'_>],
    window: &mut TimelineWindow,
    drag: &mut DragController,
    expand: &mut ExpandState,
    today: NaiveDate,
    name_width: f32,
) -> TimelineOutput {
    let mut output = TimelineOutput {
        window_changed: show_toolbar(ui, window, today),
        ..TimelineOutput::default()
    };
    ui.add_space(4.0);

    // Ctrl+scroll zooms
    if ui.rect_contains_pointer(ui.max_rect()) {
        let zoom = ui.input(|i| i.zoom_delta());
        if zoom > 1.0 {
            window.zoom_in();
            output.window_changed = true;
        } else if zoom < 1.0 {
            window.zoom_out();
            output.window_changed = true;
        }
    }

    show_chart(ui, rows, window, drag, expand, today, name_width, &mut output);
    output
}

fn show_toolbar(ui: &mut Ui, window: &mut TimelineWindow, today: NaiveDate) -> bool {
    let before = window.clone();
    ui.horizontal(|ui| {
        if ui.button("Today").clicked() {
            window.go_to_today(today);
        }
        if ui.button(icons::CARET_LEFT).on_hover_text("Previous").clicked() {
            window.navigate(Direction::Prev);
        }
        if ui.button(icons::CARET_RIGHT).on_hover_text("Next").clicked() {
            window.navigate(Direction::Next);
        }
        ui.label(
            RichText::new(window.start.format("%B %Y").to_string())
                .strong()
                .size(14.0),
        );

        ui.separator();
        for mode in ViewMode::ALL {
            if ui.selectable_label(window.mode == mode, mode.as_str()).clicked() {
                window.mode = mode;
            }
        }

        ui.separator();
        if ui
            .add_enabled(window.zoom() > MIN_ZOOM, egui::Button::new(icons::MINUS))
            .on_hover_text("Zoom out")
            .clicked()
        {
            window.zoom_out();
        }
        ui.label(
            RichText::new(format!("{}%", window.zoom_percent()))
                .size(11.0)
                .color(theme::TEXT_SECONDARY),
        );
        if ui
            .add_enabled(window.zoom() < MAX_ZOOM, egui::Button::new(icons::PLUS))
            .on_hover_text("Zoom in")
            .clicked()
        {
            window.zoom_in();
        }
    });
    *window != before
}

#[allow(clippy::too_many_arguments)]
fn show_chart(
    ui: &mut Ui,
    rows: &[TimelineRow<'_>],
    window: &TimelineWindow,
    drag: &mut DragController,
    expand: &mut ExpandState,
    today: NaiveDate,
    name_width: f32,
    output: &mut TimelineOutput,
) {
    let cell = window.cell_width();
    let content = Vec2::new(
        name_width + window.total_width(),
        HEADER_HEIGHT + rows.len() as f32 * ROW_HEIGHT,
    );

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .drag_to_scroll(false)
        .show_viewport(ui, |ui, viewport| {
            let (rect, _) = ui.allocate_exact_size(content.max(viewport.size()), Sense::hover());
            let origin = rect.min;

            // The header and the name column stay put while the grid scrolls.
            let pane_left = origin.x + viewport.min.x;
            let pane_top = origin.y + viewport.min.y;
            let visible = Rect::from_min_size(Pos2::new(pane_left, pane_top), viewport.size());
            let grid_left = origin.x + name_width;
            let body_top = origin.y + HEADER_HEIGHT;

            let grid_clip = Rect::from_min_max(
                Pos2::new(pane_left + name_width, pane_top + HEADER_HEIGHT),
                visible.max,
            );
            let header_clip = Rect::from_min_max(
                Pos2::new(pane_left + name_width, pane_top),
                Pos2::new(visible.right(), pane_top + HEADER_HEIGHT),
            );
            let names_clip = Rect::from_min_max(
                Pos2::new(pane_left, pane_top + HEADER_HEIGHT),
                Pos2::new(pane_left + name_width, visible.bottom()),
            );

            let painter = ui.painter().clone();
            painter.rect_filled(rect, 0.0, theme::BG_DARK);

            let grid = painter.with_clip_rect(grid_clip);
            draw_grid(&grid, window, grid_left, body_top, rect.bottom(), rows.len());

            for (i, row) in rows.iter().enumerate() {
                let y = body_top + i as f32 * ROW_HEIGHT;
                show_bar(ui, &grid, grid_clip, row, window, drag, grid_left, y, output);
            }
            track_gesture(ui, drag, cell, output);

            if let Some(offset) = window.today_offset(today) {
                let x = grid_left + offset as f32 * cell + cell / 2.0;
                grid.line_segment(
                    [Pos2::new(x, body_top), Pos2::new(x, rect.bottom())],
                    Stroke::new(1.5, theme::TODAY_LINE),
                );
            }

            let header = painter.with_clip_rect(header_clip);
            draw_header(&header, window, grid_left, pane_top, today);

            let names = painter.with_clip_rect(names_clip);
            names.rect_filled(names_clip, 0.0, theme::BG_PANEL);
            for (i, row) in rows.iter().enumerate() {
                let y = body_top + i as f32 * ROW_HEIGHT;
                show_name_cell(ui, &names, names_clip, row, expand, pane_left, name_width, y);
            }
            names.line_segment(
                [
                    Pos2::new(pane_left + name_width, names_clip.top()),
                    Pos2::new(pane_left + name_width, names_clip.bottom()),
                ],
                Stroke::new(1.0, theme::BORDER_SUBTLE),
            );

            let corner = Rect::from_min_size(Pos2::new(pane_left, pane_top), Vec2::new(name_width, HEADER_HEIGHT));
            painter.rect_filled(corner, 0.0, theme::BG_HEADER);
            painter.text(
                Pos2::new(corner.left() + 12.0, corner.center().y),
                Align2::LEFT_CENTER,
                format!("Projects & tasks ({})", rows.len()),
                theme::font_header(),
                theme::TEXT_SECONDARY,
            );
            painter.line_segment(
                [corner.left_bottom(), Pos2::new(visible.right(), corner.bottom())],
                Stroke::new(1.0, theme::BORDER_SUBTLE),
            );
        });
}

/// Follow the pointer for the active gesture and resolve it on release,
/// wherever the dragged bar has ended up.
fn track_gesture(ui: &Ui, drag: &mut DragController, cell: f32, output: &mut TimelineOutput) {
    let Some(session) = drag.session() else {
        return;
    };
    let kind = session.kind;
    let last_x = session.origin_x + session.delta_x;
    let (latest_x, released) = ui.input(|i| (i.pointer.latest_pos().map(|p| p.x), i.pointer.any_released()));

    if released {
        if let Some(commit) = drag.finish(latest_x.unwrap_or(last_x), cell) {
            output.commit = Some(commit);
        }
        return;
    }
    if let Some(x) = latest_x {
        drag.update(x);
    }
    ui.ctx().set_cursor_icon(kind.cursor_icon());
}

fn draw_grid(painter: &Painter, window: &TimelineWindow, grid_left: f32, body_top: f32, bottom: f32, row_count: usize) {
    let cell = window.cell_width();
    for (i, date) in window.dates().into_iter().enumerate() {
        let x = grid_left + i as f32 * cell;
        if window.mode == ViewMode::Day && is_weekend(date) {
            painter.rect_filled(
                Rect::from_min_max(Pos2::new(x, body_top), Pos2::new(x + cell, bottom)),
                0.0,
                theme::BG_WEEKEND,
            );
        }
        painter.line_segment(
            [Pos2::new(x, body_top), Pos2::new(x, bottom)],
            Stroke::new(0.5, theme::GRID_LINE),
        );
    }
    for i in 0..=row_count {
        let y = body_top + i as f32 * ROW_HEIGHT;
        painter.line_segment(
            [Pos2::new(grid_left, y), Pos2::new(grid_left + window.total_width(), y)],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
    }
}

fn draw_header(painter: &Painter, window: &TimelineWindow, grid_left: f32, top: f32, today: NaiveDate) {
    let cell = window.cell_width();
    painter.rect_filled(
        Rect::from_min_size(Pos2::new(grid_left, top), Vec2::new(window.total_width(), HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );

    for (i, date) in window.dates().into_iter().enumerate() {
        let x = grid_left + i as f32 * cell;
        if window.mode == ViewMode::Day && is_weekend(date) {
            painter.rect_filled(
                Rect::from_min_size(Pos2::new(x, top), Vec2::new(cell, HEADER_HEIGHT)),
                0.0,
                theme::BG_WEEKEND,
            );
        }
        painter.line_segment(
            [Pos2::new(x, top + HEADER_HEIGHT / 2.0), Pos2::new(x, top + HEADER_HEIGHT)],
            Stroke::new(0.5, theme::GRID_LINE),
        );

        if i == 0 || date.day() == 1 {
            painter.text(
                Pos2::new(x + 4.0, top + 11.0),
                Align2::LEFT_CENTER,
                date.format("%b %Y").to_string(),
                theme::font_header(),
                theme::TEXT_PRIMARY,
            );
        }

        let color = if date == today {
            theme::TODAY_LINE
        } else if is_weekend(date) {
            theme::TEXT_DIM
        } else {
            theme::TEXT_SECONDARY
        };
        let label = if cell >= 44.0 {
            Some(date.format("%a %-d").to_string())
        } else if cell >= 16.0 || date.weekday().num_days_from_monday() == 0 {
            Some(date.day().to_string())
        } else {
            None
        };
        if let Some(label) = label {
            painter.text(
                Pos2::new(x + cell / 2.0, top + 31.0),
                Align2::CENTER_CENTER,
                label,
                theme::font_sub(),
                color,
            );
        }
    }

    painter.line_segment(
        [
            Pos2::new(grid_left, top + HEADER_HEIGHT),
            Pos2::new(grid_left + window.total_width(), top + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

#[allow(clippy::too_many_arguments)]
fn show_name_cell(
    ui: &mut Ui,
    painter: &Painter,
    clip: Rect,
    row: &TimelineRow<'_>,
    expand: &mut ExpandState,
    left: f32,
    width: f32,
    y: f32,
) {
    let rect = Rect::from_min_size(Pos2::new(left, y), Vec2::new(width, ROW_HEIGHT));
    if !clip.intersects(rect) {
        return;
    }
    painter.line_segment(
        [rect.left_bottom(), rect.right_bottom()],
        Stroke::new(0.5, theme::BORDER_SUBTLE),
    );

    match (row.kind, row.target) {
        (RowKind::Project { task_count, expanded }, BarTarget::Project(id)) => {
            let caret_rect = Rect::from_min_size(Pos2::new(left + 6.0, y + 6.0), Vec2::splat(ROW_HEIGHT - 12.0));
            let caret = if expanded {
                icons::CARET_DOWN
            } else {
                icons::CARET_RIGHT
            };
            painter.text(
                caret_rect.center(),
                Align2::CENTER_CENTER,
                caret,
                theme::font_header(),
                theme::TEXT_SECONDARY,
            );
            let hit = caret_rect.intersect(clip);
            if hit.is_positive() {
                let response = ui.interact(hit, ui.make_persistent_id(("expand", id)), Sense::click());
                if response.clicked() {
                    expand.toggle(id);
                }
                if response.hovered() {
                    ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
                }
            }

            let text_left = caret_rect.right() + 6.0;
            let title_y = if row.subtitle.is_some() { y + 10.0 } else { y + ROW_HEIGHT / 2.0 };
            let title = painter.text(
                Pos2::new(text_left, title_y),
                Align2::LEFT_CENTER,
                row.name,
                theme::font_bar(),
                theme::TEXT_PRIMARY,
            );
            painter.text(
                Pos2::new(title.right() + 6.0, title_y),
                Align2::LEFT_CENTER,
                format!("{task_count} tasks"),
                theme::font_small(),
                theme::TEXT_DIM,
            );
            if let Some(client) = row.subtitle {
                painter.text(
                    Pos2::new(text_left, y + 23.0),
                    Align2::LEFT_CENTER,
                    client,
                    theme::font_small(),
                    theme::TEXT_SECONDARY,
                );
            }
        }
        (RowKind::Task { status }, _) => {
            let dot = Pos2::new(left + 34.0, y + ROW_HEIGHT / 2.0);
            painter.circle_filled(dot, 3.5, theme::task_color(status));
            painter.text(
                Pos2::new(dot.x + 10.0, dot.y),
                Align2::LEFT_CENTER,
                row.name,
                theme::font_bar(),
                theme::TEXT_SECONDARY,
            );
        }
        _ => {}
    }
}

#[allow(clippy::too_many_arguments)]
fn show_bar(
    ui: &mut Ui,
    painter: &Painter,
    clip: Rect,
    row: &TimelineRow<'_>,
    window: &TimelineWindow,
    drag: &mut DragController,
    grid_left: f32,
    y: f32,
    output: &mut TimelineOutput,
) {
    let cell = window.cell_width();
    let base = window.bar_span(row.start, row.end);
    let session = drag.session_for(row.target);
    let dragging = session.is_some();
    let span = session.map(|s| s.visual_span(cell)).unwrap_or(base);

    let bar_rect = Rect::from_min_size(
        Pos2::new(grid_left + span.left, y + theme::BAR_INSET),
        Vec2::new(span.width.max(theme::MIN_BAR_WIDTH), ROW_HEIGHT - theme::BAR_INSET * 2.0),
    );
    let color = match row.kind {
        RowKind::Project { .. } => theme::PROJECT_BAR,
        RowKind::Task { status } => theme::task_color(status),
    };
    draw_bar(painter, bar_rect, color, &bar_label(row.start, row.end, row.name), dragging);

    let hit = bar_rect.intersect(clip);
    if !hit.is_positive() {
        return;
    }
    let response = ui.interact(hit, ui.make_persistent_id(("bar", row.target)), Sense::click_and_drag());

    // egui reports the start only once the pointer has left its click radius,
    // so the hit zone and origin come from where the button went down.
    if response.drag_started() {
        let press_x = ui
            .input(|i| i.pointer.press_origin())
            .or_else(|| response.interact_pointer_pos())
            .map(|p| p.x);
        if let Some(x) = press_x {
            let kind = DragKind::from_offset(x - bar_rect.left(), bar_rect.width());
            if let Err(e) = drag.begin(row.target, kind, x, (row.start, row.end), base) {
                log::debug!("ignoring drag on {:?}: {}", row.target, e);
            }
        }
    }

    if response.hovered() && !drag.is_dragging() {
        if let Some(pos) = response.hover_pos() {
            let icon = match DragKind::from_offset(pos.x - bar_rect.left(), bar_rect.width()) {
                DragKind::Move => CursorIcon::Grab,
                DragKind::ResizeLeft | DragKind::ResizeRight => CursorIcon::ResizeColumn,
            };
            ui.ctx().set_cursor_icon(icon);
        }
    }

    if response.hovered() || dragging {
        draw_handles(painter, bar_rect);
    }

    let activate = response.has_focus() && ui.input(|i| i.key_pressed(Key::Enter) || i.key_pressed(Key::Space));
    if response.double_clicked() || activate {
        output.edit = Some(row.target);
    }

    if !drag.is_dragging() {
        response.on_hover_text(format!(
            "{}\n{} → {}\nDouble-click to edit dates",
            row.name,
            row.start.format("%Y-%m-%d"),
            row.end.format("%Y-%m-%d"),
        ));
    }
}

fn draw_bar(painter: &Painter, bar_rect: Rect, color: Color32, label: &str, dragging: bool) {
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    painter.rect_filled(bar_rect.translate(Vec2::new(1.0, 2.0)), rounding, Color32::from_black_alpha(35));
    let fill = if dragging { color.gamma_multiply(0.8) } else { color };
    painter.rect_filled(bar_rect, rounding, fill);
    painter.rect_filled(
        Rect::from_min_size(bar_rect.min, Vec2::new(bar_rect.width(), (bar_rect.height() * 0.45).max(4.0))),
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(25),
    );
    if dragging {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    // Single line, clipped to the bar
    let galley = painter.layout_no_wrap(label.to_string(), theme::font_bar(), theme::TEXT_ON_BAR);
    let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
    painter
        .with_clip_rect(bar_rect.shrink(2.0))
        .galley(Pos2::new(bar_rect.left() + 6.0, text_y), galley, Color32::TRANSPARENT);
}

fn draw_handles(painter: &Painter, bar_rect: Rect) {
    let handle_h = bar_rect.height() * 0.55;
    let handle_y = bar_rect.center().y - handle_h / 2.0;
    for x in [bar_rect.left() + 2.0, bar_rect.right() - 2.0 - theme::HANDLE_WIDTH] {
        painter.rect_filled(
            Rect::from_min_size(Pos2::new(x, handle_y), Vec2::new(theme::HANDLE_WIDTH, handle_h)),
            Rounding::same(2.0),
            theme::HANDLE_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use egui::{Event, Modifiers, PointerButton, RawInput};

    use super::*;
    use crate::model::Project;

    const NAME_WIDTH: f32 = 200.0;
    const BAR_Y: f32 = HEADER_HEIGHT + ROW_HEIGHT / 2.0;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// One chart with a single project bar, driven frame by frame.
    /// Week mode from Monday 2024-01-01: the bar for 01-10..01-15 covers
    /// x 740..1100 on a 60px grid.
    struct Chart {
        ctx: egui::Context,
        project: Project,
        window: TimelineWindow,
        drag: DragController,
        expand: ExpandState,
    }

    impl Chart {
        fn new() -> Self {
            let mut chart = Self {
                ctx: egui::Context::default(),
                project: Project::new("Launch", d(2024, 1, 10), d(2024, 1, 15)),
                window: TimelineWindow::new(d(2024, 1, 1), ViewMode::Week),
                drag: DragController::new(),
                expand: ExpandState::default(),
            };
            // Lay out once so the bar is hit-testable on the next frame.
            chart.frame(Vec::new());
            chart
        }

        fn frame(&mut self, events: Vec<Event>) -> TimelineOutput {
            let mut output = TimelineOutput::default();
            let input = RawInput {
                screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(1400.0, 600.0))),
                events,
                ..Default::default()
            };
            let Self { ctx, project, window, drag, expand } = self;
            let _ = ctx.run(input, |ctx| {
                egui::CentralPanel::default().frame(egui::Frame::none()).show(ctx, |ui| {
                    let rows = compose_rows_for(project, expand);
                    show_chart(ui, &rows, window, drag, expand, d(2024, 1, 3), NAME_WIDTH, &mut output);
                });
            });
            output
        }

        fn press(&mut self, x: f32) -> TimelineOutput {
            let pos = Pos2::new(x, BAR_Y);
            self.frame(vec![Event::PointerMoved(pos), button(pos, true)])
        }

        fn move_to(&mut self, x: f32) -> TimelineOutput {
            self.frame(vec![Event::PointerMoved(Pos2::new(x, BAR_Y))])
        }

        fn release(&mut self, x: f32) -> TimelineOutput {
            let pos = Pos2::new(x, BAR_Y);
            self.frame(vec![Event::PointerMoved(pos), button(pos, false)])
        }
    }

    fn compose_rows_for<'a>(project: &'a Project, expand: &ExpandState) -> Vec<TimelineRow<'a>> {
        crate::model::rows::compose_rows(&[project], expand)
    }

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn edge_press_resizes_even_when_drag_starts_inside() {
        let mut chart = Chart::new();
        chart.press(743.0);
        // Past the click radius, now 13px into the bar.
        chart.move_to(753.0);
        let session = chart.drag.session().unwrap();
        assert_eq!(session.kind, DragKind::ResizeLeft);
        assert_eq!(session.origin_x, 743.0);

        chart.move_to(863.0);
        let output = chart.release(863.0);
        let commit = output.commit.unwrap();
        assert_eq!((commit.start, commit.end), (d(2024, 1, 12), d(2024, 1, 15)));
        assert!(!chart.drag.is_dragging());
    }

    #[test]
    fn release_with_bar_scrolled_out_still_commits() {
        let mut chart = Chart::new();
        chart.press(920.0);
        chart.move_to(930.0);
        assert_eq!(chart.drag.session().unwrap().kind, DragKind::Move);

        // Far enough left that the bar leaves the grid entirely.
        chart.move_to(600.0);
        chart.move_to(10.0);
        let output = chart.release(10.0);

        assert!(!chart.drag.is_dragging());
        let commit = output.commit.unwrap();
        assert_eq!((commit.start, commit.end), (d(2023, 12, 26), d(2023, 12, 31)));

        // The next gesture is not blocked by a stale session.
        chart.press(920.0);
        chart.move_to(940.0);
        assert!(chart.drag.is_dragging());
    }

    #[test]
    fn click_without_movement_opens_no_session() {
        let mut chart = Chart::new();
        chart.press(920.0);
        let output = chart.release(920.0);
        assert!(output.commit.is_none());
        assert!(!chart.drag.is_dragging());
    }

    #[test]
    fn bar_label_uses_month_slash_day() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 2, 3).unwrap();
        assert_eq!(bar_label(start, end, "Research"), "1/10 - 2/3: Research");
    }
}
