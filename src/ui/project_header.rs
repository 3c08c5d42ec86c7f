use std::collections::BTreeMap;

use egui::{Key, RichText, TextEdit, TextStyle, Ui};
use egui_phosphor::regular as icons;

use crate::app::PlannerApp;
use crate::model::filter::{
    self, FilterChip, FilterCounts, FilterGroup, GroupBy, Ordering, TaskViewMode, CURRENT_MEMBER_BUCKET,
    LIST_PROPERTIES, NO_MEMBER_BUCKET,
};
use crate::model::{Priority, ProjectStatus, ViewType};
use crate::ui::theme;

/// Header above the views: location bar, view tabs, filters and options.
pub fn show_project_header(app: &mut PlannerApp, ui: &mut Ui) {
    show_address_bar(app, ui);
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        let current = app.sync.state().options.view_type;
        for view_type in ViewType::ALL {
            if ui.selectable_label(current == view_type, view_type.label()).clicked() && current != view_type {
                app.set_view_type(view_type);
            }
        }

        ui.separator();
        show_filter_menu(app, ui);
        show_ordering(app, ui);

        let mut show_closed = app.sync.state().options.show_closed_projects;
        if ui.checkbox(&mut show_closed, "Show closed").changed() {
            app.set_show_closed(show_closed);
        }

        if current == ViewType::List {
            show_display_menu(app, ui);
        }
    });

    show_active_chips(app, ui);
}

fn show_address_bar(app: &mut PlannerApp, ui: &mut Ui) {
    ui.horizontal(|ui| {
        if ui
            .add_enabled(app.router.can_go_back(), egui::Button::new(icons::ARROW_LEFT))
            .on_hover_text("Back")
            .clicked()
        {
            app.go_back();
        }
        if ui
            .add_enabled(app.router.can_go_forward(), egui::Button::new(icons::ARROW_RIGHT))
            .on_hover_text("Forward")
            .clicked()
        {
            app.go_forward();
        }
        ui.label(RichText::new("?").monospace().color(theme::TEXT_DIM));
        let response = ui.add(
            TextEdit::singleline(&mut app.address)
                .font(TextStyle::Monospace)
                .hint_text("status=active&viewType=timeline")
                .desired_width(f32::INFINITY),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
            let query = app.address.clone();
            app.navigate_to(&query);
        }
    });
}

fn show_filter_menu(app: &mut PlannerApp, ui: &mut Ui) {
    let counts = filter::compute_counts(&app.projects, &app.config.featured_member);
    let active = app.sync.state().chips.len();
    let label = if active == 0 {
        format!("{} Filter", icons::FUNNEL)
    } else {
        format!("{} Filter ({active})", icons::FUNNEL)
    };

    ui.menu_button(label, |ui| {
        ui.menu_button(FilterGroup::Status.label(), |ui| {
            clear_group_button(app, ui, FilterGroup::Status);
            for status in ProjectStatus::ALL {
                chip_toggle(app, ui, &counts, FilterGroup::Status, status.as_str(), status.label());
            }
        });
        ui.menu_button(FilterGroup::Priority.label(), |ui| {
            clear_group_button(app, ui, FilterGroup::Priority);
            for priority in Priority::ALL {
                chip_toggle(app, ui, &counts, FilterGroup::Priority, priority.as_str(), priority.label());
            }
        });
        ui.menu_button(FilterGroup::Tags.label(), |ui| {
            clear_group_button(app, ui, FilterGroup::Tags);
            if counts.tags.is_empty() {
                ui.label(RichText::new("No tags").color(theme::TEXT_DIM));
            }
            for tag in counts.tags.keys() {
                chip_toggle(app, ui, &counts, FilterGroup::Tags, tag, tag);
            }
        });
        ui.menu_button(FilterGroup::Members.label(), |ui| {
            show_member_options(app, ui, &counts);
        });
    });
}

fn show_member_options(app: &mut PlannerApp, ui: &mut Ui, counts: &FilterCounts) {
    clear_group_button(app, ui, FilterGroup::Members);

    let featured = app.config.featured_member.clone();
    chip_toggle(app, ui, counts, FilterGroup::Members, &featured.bucket, &featured.name);

    let mut per_member: BTreeMap<String, usize> = BTreeMap::new();
    for project in &app.projects {
        for member in &project.members {
            *per_member.entry(member.to_lowercase()).or_default() += 1;
        }
    }
    ui.separator();
    for (member, count) in per_member {
        let chip = FilterChip::new(FilterGroup::Members.param(), &member);
        let selected = app.sync.state().chips.contains(&chip);
        if ui.selectable_label(selected, format!("{member}   {count}")).clicked() {
            app.toggle_chip(chip);
        }
    }

    ui.separator();
    ui.label(
        RichText::new(format!(
            "Assigned: {}   Unassigned: {}",
            counts.get(FilterGroup::Members, CURRENT_MEMBER_BUCKET),
            counts.get(FilterGroup::Members, NO_MEMBER_BUCKET)
        ))
        .size(10.5)
        .color(theme::TEXT_DIM),
    );
}

fn chip_toggle(app: &mut PlannerApp, ui: &mut Ui, counts: &FilterCounts, group: FilterGroup, value: &str, label: &str) {
    let chip = FilterChip::new(group.param(), value);
    let selected = app.sync.state().chips.contains(&chip);
    let count = counts.get(group, &chip.value);
    if ui.selectable_label(selected, format!("{label}   {count}")).clicked() {
        app.toggle_chip(chip);
    }
}

fn clear_group_button(app: &mut PlannerApp, ui: &mut Ui, group: FilterGroup) {
    let any = app.sync.state().chips.iter().any(|c| c.group() == Some(group));
    if any {
        if ui.button(format!("Clear {}", group.label().to_lowercase())).clicked() {
            app.clear_group(group);
        }
        ui.separator();
    }
}

fn show_ordering(app: &mut PlannerApp, ui: &mut Ui) {
    let current = app.sync.state().options.ordering;
    egui::ComboBox::from_id_salt("ordering")
        .selected_text(format!("{} {}", icons::SORT_ASCENDING, current.label()))
        .show_ui(ui, |ui| {
            for ordering in Ordering::ALL {
                if ui.selectable_label(current == ordering, ordering.label()).clicked() && current != ordering {
                    app.set_ordering(ordering);
                }
            }
        });
}

/// Options local to the list view; they are not part of the location.
fn show_display_menu(app: &mut PlannerApp, ui: &mut Ui) {
    ui.menu_button("Display", |ui| {
        let options = app.sync.state().options.clone();

        ui.label(RichText::new("Tasks").small().weak());
        for mode in TaskViewMode::ALL {
            if ui.radio(options.tasks == mode, mode.label()).clicked() {
                app.sync.update_local(|o| o.tasks = mode);
            }
        }

        ui.separator();
        ui.label(RichText::new("Group by").small().weak());
        for group_by in GroupBy::ALL {
            if ui.radio(options.group_by == group_by, group_by.label()).clicked() {
                app.sync.update_local(|o| o.group_by = group_by);
            }
        }

        ui.separator();
        ui.label(RichText::new("Columns").small().weak());
        for property in LIST_PROPERTIES {
            let mut shown = options.properties.iter().any(|p| p == property);
            if ui.checkbox(&mut shown, property).changed() {
                app.sync.update_local(|o| {
                    if shown {
                        // Keep the canonical column order.
                        o.properties.push(property.to_string());
                        o.properties
                            .sort_by_key(|p| LIST_PROPERTIES.iter().position(|k| *k == p.as_str()));
                    } else {
                        o.properties.retain(|p| p != property);
                    }
                });
            }
        }
    });
}

fn show_active_chips(app: &mut PlannerApp, ui: &mut Ui) {
    let chips: Vec<FilterChip> = app.sync.state().chips.iter().cloned().collect();
    if chips.is_empty() {
        return;
    }
    ui.add_space(2.0);
    ui.horizontal_wrapped(|ui| {
        for chip in &chips {
            let text = RichText::new(format!("{}: {}  {}", chip.key, chip.value, icons::X))
                .size(11.0)
                .color(theme::TEXT_PRIMARY);
            let button = egui::Button::new(text)
                .fill(theme::BG_SELECTED)
                .rounding(egui::Rounding::same(10.0));
            if ui.add(button).on_hover_text("Remove filter").clicked() {
                app.remove_chip(chip);
            }
        }
        if ui.small_button("Reset").clicked() {
            app.reset_filters();
        }
    });
}
