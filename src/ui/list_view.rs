use egui::{Align, Layout, RichText, Sense, Ui};
use egui_extras::{Column, TableBuilder};

use crate::model::drag::BarTarget;
use crate::model::filter::{group_projects, GroupBy, TaskViewMode, ViewOptions};
use crate::model::Project;
use crate::ui::theme;

const ROW_HEIGHT: f32 = 22.0;

enum ListRow<'a> {
    Section(&'a str, usize),
    Project(&'a Project),
    Task {
        project: &'a Project,
        index: usize,
        indented: bool,
    },
}

fn build_rows<'a>(sections: &'a [(String, Vec<&'a Project>)], options: &ViewOptions) -> Vec<ListRow<'a>> {
    let mut rows = Vec::new();
    for (heading, projects) in sections {
        if options.group_by != GroupBy::None {
            rows.push(ListRow::Section(heading, projects.len()));
        }
        for project in projects.iter().copied() {
            rows.push(ListRow::Project(project));
            if options.tasks == TaskViewMode::Collapsed {
                continue;
            }
            let indented = options.tasks == TaskViewMode::Indented;
            rows.extend((0..project.tasks.len()).map(|index| ListRow::Task {
                project,
                index,
                indented,
            }));
        }
    }
    rows
}

/// Table of the rendered projects. Returns the item whose name was clicked.
pub fn show_list(ui: &mut Ui, projects: &[&Project], options: &ViewOptions) -> Option<BarTarget> {
    let columns: Vec<&str> = options.properties.iter().map(String::as_str).collect();
    if columns.is_empty() {
        ui.label(RichText::new("No columns selected. Pick some under Display.").color(theme::TEXT_DIM));
        return None;
    }

    let sections = group_projects(projects, options.group_by);
    let rows = build_rows(&sections, options);
    let mut clicked = None;

    let mut table = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center));
    for key in &columns {
        table = match *key {
            "title" => table.column(Column::remainder().at_least(220.0)),
            _ => table.column(Column::auto().at_least(90.0)),
        };
    }

    table
        .header(24.0, |mut header| {
            for key in &columns {
                header.col(|ui| {
                    ui.label(
                        RichText::new(column_title(key))
                            .size(10.0)
                            .strong()
                            .color(theme::TEXT_DIM),
                    );
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let list_row = &rows[row.index()];
                for key in &columns {
                    row.col(|ui| {
                        if let Some(target) = show_cell(ui, list_row, key) {
                            clicked = Some(target);
                        }
                    });
                }
            });
        });

    clicked
}

fn column_title(key: &str) -> &str {
    match key {
        "title" => "TITLE",
        "status" => "STATUS",
        "assignee" => "ASSIGNEE",
        "dueDate" => "DUE DATE",
        other => other,
    }
}

fn show_cell(ui: &mut Ui, row: &ListRow<'_>, key: &str) -> Option<BarTarget> {
    match row {
        ListRow::Section(heading, count) => {
            if key == "title" {
                ui.label(RichText::new(format!("{heading} ({count})")).strong().color(theme::ACCENT));
            }
            None
        }
        ListRow::Project(project) => match key {
            "title" => {
                let mut text = RichText::new(&project.name).color(theme::TEXT_PRIMARY).strong();
                if project.status.is_closed() {
                    text = text.color(theme::TEXT_DIM);
                }
                let response = ui.add(egui::Label::new(text).sense(Sense::click()).truncate());
                if let Some(client) = &project.client {
                    ui.label(RichText::new(client).size(10.5).color(theme::TEXT_SECONDARY));
                }
                if !project.tasks.is_empty() {
                    ui.label(
                        RichText::new(format!("{} tasks", project.task_count()))
                            .size(10.0)
                            .color(theme::TEXT_DIM),
                    );
                }
                response
                    .on_hover_text("Edit dates")
                    .clicked()
                    .then_some(BarTarget::Project(project.id))
            }
            "status" => {
                ui.label(RichText::new(project.status.label()).color(theme::status_color(project.status)));
                None
            }
            "assignee" => {
                let members = if project.members.is_empty() {
                    "-".to_string()
                } else {
                    project.members.join(", ")
                };
                ui.label(RichText::new(members).color(theme::TEXT_SECONDARY));
                None
            }
            "dueDate" => {
                ui.label(RichText::new(project.end.format("%Y-%m-%d").to_string()).color(theme::TEXT_SECONDARY));
                None
            }
            _ => None,
        },
        ListRow::Task {
            project,
            index,
            indented,
        } => {
            let task = project.tasks.get(*index)?;
            match key {
                "title" => {
                    if *indented {
                        ui.add_space(20.0);
                    }
                    let (dot, _) = ui.allocate_exact_size(egui::vec2(6.0, 6.0), Sense::hover());
                    ui.painter().circle_filled(dot.center(), 3.0, theme::task_color(task.status));
                    let response = ui.add(
                        egui::Label::new(RichText::new(&task.name).color(theme::TEXT_SECONDARY))
                            .sense(Sense::click())
                            .truncate(),
                    );
                    response.clicked().then_some(BarTarget::Task {
                        project: project.id,
                        task: task.id,
                    })
                }
                "status" => {
                    ui.label(RichText::new(task.status.label()).color(theme::task_color(task.status)));
                    None
                }
                "assignee" => {
                    let assignee = if task.assignee.is_empty() { "-" } else { task.assignee.as_str() };
                    ui.label(RichText::new(assignee).color(theme::TEXT_SECONDARY));
                    None
                }
                "dueDate" => {
                    ui.label(RichText::new(task.end.format("%Y-%m-%d").to_string()).color(theme::TEXT_SECONDARY));
                    None
                }
                _ => None,
            }
        }
    }
}
