use chrono::NaiveDate;
use egui::{Color32, Context, RichText, Window};

use crate::app::PlannerApp;
use crate::config::AppConfig;
use crate::model::rows::EDIT_DATE_FORMAT;
use crate::ui::theme;

/// Render the "Edit dates" dialog for the open draft.
pub fn show_edit_dialog(app: &mut PlannerApp, ctx: &Context) {
    let mut save = false;
    let mut cancel = false;
    let Some(draft) = app.edit.as_mut() else {
        return;
    };
    let title = if draft.is_project() {
        "Edit project dates"
    } else {
        "Edit task dates"
    };

    Window::new(RichText::new(title).strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([360.0, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.add_space(4.0);

            egui::Grid::new("edit_dates_grid")
                .num_columns(3)
                .striped(false)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Name").color(theme::TEXT_SECONDARY));
                    ui.label(RichText::new(&draft.name).strong());
                    ui.end_row();

                    ui.label(RichText::new("Start").color(theme::TEXT_SECONDARY));
                    let start = ui.add_sized(
                        [140.0, 24.0],
                        egui::TextEdit::singleline(&mut draft.start_text).hint_text("yyyy-mm-dd"),
                    );
                    date_picker(ui, &mut draft.start_text, "edit_dp_start");
                    ui.end_row();

                    ui.label(RichText::new("End").color(theme::TEXT_SECONDARY));
                    let end = ui.add_sized(
                        [140.0, 24.0],
                        egui::TextEdit::singleline(&mut draft.end_text).hint_text("yyyy-mm-dd"),
                    );
                    date_picker(ui, &mut draft.end_text, "edit_dp_end");
                    ui.end_row();

                    let submitted = (start.lost_focus() || end.lost_focus())
                        && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    save |= submitted;
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let save_btn = egui::Button::new(RichText::new("Save").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], save_btn).clicked() {
                    save = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    cancel = true;
                }
            });
            ui.add_space(2.0);
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        cancel = true;
    }
    if save {
        app.save_edit();
    } else if cancel {
        app.cancel_edit();
    }
}

/// Calendar popup that writes back into a date text field. Hidden while the
/// text does not parse.
fn date_picker(ui: &mut egui::Ui, text: &mut String, id: &str) {
    let Ok(mut date) = NaiveDate::parse_from_str(text.trim(), EDIT_DATE_FORMAT) else {
        ui.label("");
        return;
    };
    let before = date;
    ui.add(
        egui_extras::DatePickerButton::new(&mut date)
            .id_salt(id)
            .calendar_week(false),
    );
    if date != before {
        *text = date.format(EDIT_DATE_FORMAT).to_string();
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut PlannerApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([320.0, 220.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Project Planner").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION"))).color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("List, board and timeline views of your projects,");
                ui.label("built with Rust and egui.");
                ui.add_space(10.0);

                if let Some(dir) = AppConfig::default_path().and_then(|p| p.parent().map(|d| d.to_path_buf())) {
                    if ui.link("Open config folder").clicked() {
                        if let Err(e) = std::fs::create_dir_all(&dir).and_then(|()| open::that(&dir)) {
                            log::warn!("could not open {}: {}", dir.display(), e);
                        }
                    }
                }
                ui.add_space(10.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
