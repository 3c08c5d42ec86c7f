use egui::{menu, RichText, Ui};

use crate::app::PlannerApp;
use crate::model::ViewType;
use crate::ui::theme;

/// Render the top menu bar.
pub fn show_toolbar(app: &mut PlannerApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  Open...").clicked() {
                app.open_file();
                ui.close_menu();
            }
            if ui
                .add_enabled(app.file_path.is_some(), egui::Button::new("  Reload          F5"))
                .clicked()
            {
                app.reload();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            let current = app.sync.state().options.view_type;
            for view_type in ViewType::ALL {
                if ui.radio(current == view_type, view_type.label()).clicked() {
                    app.set_view_type(view_type);
                    ui.close_menu();
                }
            }
            ui.separator();
            if ui.button("  Zoom In").clicked() {
                app.window.zoom_in();
                app.commit_window();
                ui.close_menu();
            }
            if ui.button("  Zoom Out").clicked() {
                app.window.zoom_out();
                app.commit_window();
                ui.close_menu();
            }
            if ui.button("  Go to Today").clicked() {
                app.window.go_to_today(app.today);
                app.commit_window();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned data source
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let source = match &app.file_path {
                Some(path) => path.display().to_string(),
                None => "Sample data (unsaved)".to_string(),
            };
            ui.label(RichText::new(source).size(11.0).weak());
        });
    });
}
