use egui::{Color32, Frame, Margin, RichText, Rounding, Stroke, Ui};
use uuid::Uuid;

use crate::model::board;
use crate::model::{Project, ProjectStatus};
use crate::ui::theme;

/// Payload carried while a card is dragged: the project id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPayload(pub Uuid);

/// A card dropped on a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardDrop {
    pub project: Uuid,
    pub status: ProjectStatus,
}

/// Kanban board of the rendered projects.
pub fn show_board(ui: &mut Ui, projects: &[&Project]) -> Option<BoardDrop> {
    let mut dropped = None;

    egui::ScrollArea::horizontal()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            // Highlight every column while a card is in flight.
            let carrying = egui::DragAndDrop::has_payload_of_type::<CardPayload>(ui.ctx());
            let fill = if carrying { theme::BG_DROP_TARGET } else { theme::BG_PANEL };
            ui.horizontal_top(|ui| {
                for (status, cards) in board::columns(projects) {
                    let frame = Frame::none()
                        .fill(fill)
                        .rounding(Rounding::same(6.0))
                        .inner_margin(Margin::same(8.0))
                        .stroke(Stroke::new(1.0, theme::BORDER_SUBTLE));

                    let (_, payload) = ui.dnd_drop_zone::<CardPayload, ()>(frame, |ui| {
                        ui.set_width(theme::BOARD_COLUMN_WIDTH);
                        ui.set_min_height(ui.available_height());
                        show_column(ui, status, &cards);
                    });

                    if let Some(payload) = payload {
                        dropped = Some(BoardDrop {
                            project: payload.0,
                            status,
                        });
                    }
                }
            });
        });

    dropped
}

fn show_column(ui: &mut Ui, status: ProjectStatus, cards: &[&Project]) {
    ui.horizontal(|ui| {
        let (dot, _) = ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
        ui.painter().circle_filled(dot.center(), 4.0, theme::status_color(status));
        ui.label(RichText::new(status.label()).strong().color(theme::TEXT_PRIMARY));
        ui.label(
            RichText::new(cards.len().to_string())
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(6.0);

    egui::ScrollArea::vertical()
        .id_salt(("board-column", status.as_str()))
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for project in cards {
                let id = egui::Id::new(("card", project.id));
                ui.dnd_drag_source(id, CardPayload(project.id), |ui| show_card(ui, project));
                ui.add_space(4.0);
            }
            if cards.is_empty() {
                ui.label(RichText::new("Drop projects here").size(11.0).color(theme::TEXT_DIM));
            }
        });
}

fn show_card(ui: &mut Ui, project: &Project) {
    Frame::none()
        .fill(theme::BG_HEADER)
        .rounding(Rounding::same(5.0))
        .inner_margin(Margin::symmetric(10.0, 8.0))
        .show(ui, |ui| {
            ui.set_width(theme::BOARD_COLUMN_WIDTH - 20.0);
            ui.label(RichText::new(&project.name).strong().color(theme::TEXT_PRIMARY));
            if let Some(client) = &project.client {
                ui.label(RichText::new(client).size(11.0).color(theme::TEXT_SECONDARY));
            }
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(project.priority.label())
                        .size(10.5)
                        .color(theme::priority_color(project.priority)),
                );
                ui.label(
                    RichText::new(format!(
                        "{} → {}",
                        project.start.format("%b %-d"),
                        project.end.format("%b %-d")
                    ))
                    .size(10.5)
                    .color(theme::TEXT_DIM),
                );
            });
            ui.add(
                egui::ProgressBar::new(f32::from(project.progress) / 100.0)
                    .desired_height(4.0)
                    .fill(theme::status_color(project.status))
                    .rounding(Rounding::same(2.0)),
            );
            if !project.tags.is_empty() {
                ui.horizontal_wrapped(|ui| {
                    for tag in &project.tags {
                        ui.label(
                            RichText::new(format!("#{tag}"))
                                .size(10.0)
                                .color(Color32::from_rgb(140, 170, 220)),
                        );
                    }
                });
            }
        });
}
