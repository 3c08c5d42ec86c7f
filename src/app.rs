use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};

use crate::config::AppConfig;
use crate::io;
use crate::model::board;
use crate::model::filter::{self, FilterChip, FilterGroup, Ordering, Rendered, ViewOptions, ViewType};
use crate::model::query::WindowParams;
use crate::model::rows::{self, compose_rows};
use crate::model::sync::SyncOutcome;
use crate::model::{
    BarTarget, DateCommit, DragController, EditDraft, ExpandState, Priority, Project, ProjectStatus, QueryParams,
    Router, Task, TaskStatus, TimelineWindow, ViewState, ViewStateSync,
};
use crate::ui;
use crate::ui::board_view::BoardDrop;
use crate::ui::toast::{Toast, ToastAction, ToastManager};

/// Main application state.
pub struct PlannerApp {
    pub projects: Vec<Project>,
    pub file_path: Option<PathBuf>,
    pub config: AppConfig,
    pub today: NaiveDate,

    // Location and the view state projected from it
    pub router: Router,
    pub sync: ViewStateSync,
    pub window: TimelineWindow,
    pub address: String,

    // Timeline interaction
    pub drag: DragController,
    pub expand: ExpandState,
    pub edit: Option<EditDraft>,

    pub toasts: ToastManager,
    pub show_about: bool,
    pub status_message: String,
}

impl PlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, query: &str) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        ui::theme::apply_theme(&cc.egui_ctx);

        Self::with_config(config, query)
    }

    /// Build the state without a window: sample or configured data, location from `query`.
    pub fn with_config(config: AppConfig, query: &str) -> Self {
        let today = config.today();
        let mut toasts = ToastManager::new();
        let initial = QueryParams::parse(query).unwrap_or_else(|e| {
            log::warn!("ignoring initial location: {}", e);
            toasts.warning(e.to_string());
            QueryParams::new()
        });

        let mut app = Self {
            projects: sample_projects(today),
            file_path: None,
            config,
            today,
            router: Router::new(initial),
            sync: ViewStateSync::new(ViewOptions::default()),
            window: TimelineWindow::around(today),
            address: String::new(),
            drag: DragController::new(),
            expand: ExpandState::default(),
            edit: None,
            toasts,
            show_about: false,
            status_message: "Ready".to_string(),
        };

        if let Some(path) = app.config.data_path.clone() {
            app.load_from(&path);
        }
        app.sync_location();
        app
    }

    // --- Location ---

    /// Reconcile view state with the router. Runs every frame.
    pub fn sync_location(&mut self) -> SyncOutcome {
        let outcome = self.sync.observe(&self.router);
        match outcome {
            SyncOutcome::Applied => {
                self.window = self.sync.state().window.to_window(self.today);
                self.address = self.router.params().to_string();
            }
            SyncOutcome::Acknowledged(_) | SyncOutcome::Unchanged => {
                self.address = self.router.params().to_string();
            }
            SyncOutcome::Idle => {}
        }
        outcome
    }

    /// User-driven view change, written back to the location.
    pub fn update_view(&mut self, change: impl FnOnce(&mut ViewState)) {
        self.sync.update(&mut self.router, change);
        self.sync_location();
    }

    pub fn toggle_chip(&mut self, chip: FilterChip) {
        self.update_view(|state| state.chips.toggle(chip));
    }

    pub fn remove_chip(&mut self, chip: &FilterChip) {
        self.update_view(|state| {
            state.chips.remove(chip);
        });
    }

    pub fn clear_group(&mut self, group: FilterGroup) {
        self.update_view(|state| state.chips.clear_group(group));
    }

    pub fn reset_filters(&mut self) {
        self.update_view(|state| state.chips.clear());
    }

    pub fn set_view_type(&mut self, view_type: ViewType) {
        self.update_view(|state| state.options.view_type = view_type);
    }

    pub fn set_ordering(&mut self, ordering: Ordering) {
        self.update_view(|state| state.options.ordering = ordering);
    }

    pub fn set_show_closed(&mut self, show: bool) {
        self.update_view(|state| state.options.show_closed_projects = show);
    }

    /// Persist the current timeline window into the location.
    pub fn commit_window(&mut self) {
        let params = WindowParams::from_window(&self.window);
        self.update_view(|state| state.window = params);
    }

    /// External navigation from the address bar.
    pub fn navigate_to(&mut self, query: &str) -> bool {
        match QueryParams::parse(query) {
            Ok(params) => {
                self.router.navigate(params);
                self.sync_location();
                true
            }
            Err(e) => {
                log::warn!("rejected address {:?}: {}", query, e);
                self.toasts.warning(e.to_string());
                false
            }
        }
    }

    pub fn go_back(&mut self) {
        if self.router.back() {
            self.sync_location();
        }
    }

    pub fn go_forward(&mut self) {
        if self.router.forward() {
            self.sync_location();
        }
    }

    /// Projects as the current view shows them, plus filter counts.
    pub fn rendered(&self) -> Rendered<'_> {
        let state = self.sync.state();
        filter::render(
            &self.projects,
            state.chips.as_slice(),
            &state.options,
            &self.config.featured_member,
        )
    }

    // --- File operations ---

    /// Replace the snapshot with the file at `path`. On failure the current
    /// snapshot stays and an error toast offers a retry.
    pub fn load_from(&mut self, path: &Path) -> bool {
        match io::load_projects(path) {
            Ok(projects) => {
                self.drag.cancel();
                self.edit = None;
                self.status_message = format!("Loaded {} projects", projects.len());
                self.projects = projects;
                self.file_path = Some(path.to_path_buf());
                true
            }
            Err(e) => {
                log::error!("failed to load {}: {}", path.display(), e);
                self.status_message = format!("Error loading: {}", e);
                self.toasts.add(
                    Toast::error(format!("Could not load {}", display_name(path)))
                        .with_action(ToastAction::RetryLoad(path.to_path_buf())),
                );
                false
            }
        }
    }

    pub fn reload(&mut self) {
        match self.file_path.clone() {
            Some(path) => {
                self.load_from(&path);
            }
            None => self.status_message = "Nothing to reload: sample data is not backed by a file".to_string(),
        }
    }

    pub fn open_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Projects", &["json"])
            .pick_file()
        {
            self.load_from(&path);
        }
    }

    pub fn save(&mut self) {
        match self.file_path.clone() {
            Some(path) => {
                self.save_to(&path);
            }
            None => self.save_as(),
        }
    }

    pub fn save_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Projects", &["json"])
            .set_file_name("projects.json")
            .save_file()
        {
            if self.save_to(&path) {
                self.file_path = Some(path);
            }
        }
    }

    pub fn save_to(&mut self, path: &Path) -> bool {
        match io::save_projects(&self.projects, path) {
            Ok(()) => {
                self.status_message = format!("Saved to {}", display_name(path));
                self.toasts.success("Projects saved");
                true
            }
            Err(e) => {
                log::error!("failed to save {}: {}", path.display(), e);
                self.status_message = format!("Error saving: {}", e);
                self.toasts.error(format!("Could not save {}", display_name(path)));
                false
            }
        }
    }

    pub fn export_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name("projects.csv")
            .save_file()
        {
            self.export_csv_to(&path);
        }
    }

    /// Export the projects the current view shows.
    pub fn export_csv_to(&mut self, path: &Path) -> bool {
        let result = {
            let rendered = self.rendered();
            io::csv_export::export_csv(&rendered.projects, path)
        };
        match result {
            Ok(count) => {
                self.status_message = format!("Exported {} rows to CSV", count);
                true
            }
            Err(e) => {
                log::error!("CSV export to {} failed: {}", path.display(), e);
                self.status_message = format!("CSV export failed: {}", e);
                self.toasts.error("CSV export failed");
                false
            }
        }
    }

    pub fn handle_toast_action(&mut self, action: ToastAction) {
        match action {
            ToastAction::RetryLoad(path) => {
                log::info!("retrying load of {}", path.display());
                self.load_from(&path);
            }
        }
    }

    // --- Edits ---

    pub fn apply_commit(&mut self, commit: DateCommit) -> bool {
        if !rows::apply_commit(&mut self.projects, &commit) {
            log::warn!("dropping commit for missing item {:?}", commit.target);
            return false;
        }
        let name = rows::name_of(&self.projects, commit.target).unwrap_or_default();
        log::info!("'{}' now runs {} to {}", name, commit.start, commit.end);
        self.status_message = format!(
            "Updated '{}' ({} → {})",
            name,
            commit.start.format("%Y-%m-%d"),
            commit.end.format("%Y-%m-%d")
        );
        true
    }

    pub fn open_edit(&mut self, target: BarTarget) {
        self.edit = EditDraft::open(&self.projects, target);
    }

    /// Close the dialog, committing its dates if they are acceptable.
    pub fn save_edit(&mut self) -> bool {
        let Some(draft) = self.edit.take() else {
            return false;
        };
        match draft.save(self.config.date_edit_policy) {
            Some(commit) => self.apply_commit(commit),
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    pub fn cancel_drag(&mut self) -> bool {
        match self.drag.cancel() {
            Some(session) => {
                log::debug!("cancelled {:?} of {:?}", session.kind, session.target);
                self.status_message = "Drag cancelled".to_string();
                true
            }
            None => false,
        }
    }

    pub fn drop_on_column(&mut self, drop: BoardDrop) -> bool {
        let moved = board::move_to_status(&mut self.projects, drop.project, drop.status);
        if moved {
            self.status_message = format!("Moved to {}", drop.status.label());
        }
        moved
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Demonstration snapshot laid out around `today`.
pub fn sample_projects(today: NaiveDate) -> Vec<Project> {
    let day = |offset: i64| today + Duration::days(offset);

    vec![
        Project::new("Mobile app redesign", day(-12), day(18))
            .with_client("Northwind")
            .with_status(ProjectStatus::Active)
            .with_priority(Priority::High)
            .with_progress(45)
            .with_tags(["frontend", "feature"])
            .with_members(["Alex Chen", "Priya Nair"])
            .with_tasks(vec![
                Task::new("User research", day(-12), day(-6))
                    .with_assignee("Priya Nair")
                    .with_status(TaskStatus::Done),
                Task::new("Wireframes", day(-6), day(1))
                    .with_assignee("Alex Chen")
                    .with_status(TaskStatus::InProgress),
                Task::new("Visual design", day(1), day(10)).with_assignee("Alex Chen"),
                Task::new("Usability testing", day(10), day(18)).with_assignee("Priya Nair"),
            ]),
        Project::new("Billing service migration", day(-5), day(26))
            .with_client("Contoso")
            .with_status(ProjectStatus::Planned)
            .with_priority(Priority::Urgent)
            .with_progress(10)
            .with_tags(["backend"])
            .with_members(["Sam Ortiz", "Alex Chen"])
            .with_tasks(vec![
                Task::new("Schema design", day(-5), day(2))
                    .with_assignee("Sam Ortiz")
                    .with_status(TaskStatus::InProgress),
                Task::new("Data backfill", day(3), day(14)).with_assignee("Sam Ortiz"),
                Task::new("Cutover", day(20), day(26)).with_assignee("Alex Chen"),
            ]),
        Project::new("Analytics dashboard", day(-30), day(-3))
            .with_status(ProjectStatus::Completed)
            .with_priority(Priority::Medium)
            .with_progress(100)
            .with_tags(["data", "frontend"])
            .with_members(["Mina Park"])
            .with_tasks(vec![
                Task::new("Metrics catalogue", day(-30), day(-20))
                    .with_assignee("Mina Park")
                    .with_status(TaskStatus::Done),
                Task::new("Charts", day(-20), day(-3))
                    .with_assignee("Mina Park")
                    .with_status(TaskStatus::Done),
            ]),
        Project::new("Onboarding emails", day(4), day(20))
            .with_client("Fabrikam")
            .with_status(ProjectStatus::Backlog)
            .with_priority(Priority::Low)
            .with_tags(["marketing"]),
        Project::new("Legacy API sunset", day(-20), day(5))
            .with_status(ProjectStatus::Cancelled)
            .with_priority(Priority::Low)
            .with_tags(["backend"])
            .with_members(["Sam Ortiz"]),
    ]
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_location();

        let (should_save, should_reload, escape) = ctx.input(|i| {
            (
                i.modifiers.command && i.key_pressed(egui::Key::S),
                i.key_pressed(egui::Key::F5),
                i.key_pressed(egui::Key::Escape),
            )
        });
        if should_save {
            self.save();
        }
        if should_reload {
            self.reload();
        }
        if escape && self.edit.is_none() {
            self.cancel_drag();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });
        egui::TopBottomPanel::top("project_header")
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 6.0)),
            )
            .show(ctx, |ui| {
                ui::project_header::show_project_header(self, ui);
            });

        let (visible, total) = (self.rendered().projects.len(), self.projects.len());
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_DARK)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Projects: {visible}/{total}"))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(egui::RichText::new(" · ").size(10.5).color(ui::theme::TEXT_DIM));
                        ui.label(
                            egui::RichText::new(format!("Zoom: {}%", self.window.zoom_percent()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        let mut commit = None;
        let mut edit = None;
        let mut dropped = None;
        let mut window_changed = false;
        egui::CentralPanel::default()
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_DARK)
                    .inner_margin(egui::Margin::same(8.0)),
            )
            .show(ctx, |ui| {
                let state = self.sync.state();
                let rendered = filter::render(
                    &self.projects,
                    state.chips.as_slice(),
                    &state.options,
                    &self.config.featured_member,
                );
                match state.options.view_type {
                    ViewType::List => {
                        edit = ui::list_view::show_list(ui, &rendered.projects, &state.options);
                    }
                    ViewType::Board => {
                        dropped = ui::board_view::show_board(ui, &rendered.projects);
                    }
                    ViewType::Timeline => {
                        let rows = compose_rows(&rendered.projects, &self.expand);
                        let output = ui::timeline::show_timeline(
                            ui,
                            &rows,
                            &mut self.window,
                            &mut self.drag,
                            &mut self.expand,
                            self.today,
                            self.config.name_column_width,
                        );
                        commit = output.commit;
                        edit = output.edit;
                        window_changed = output.window_changed;
                    }
                }
            });

        if window_changed {
            self.commit_window();
        }
        if let Some(commit) = commit {
            self.apply_commit(commit);
        }
        if let Some(target) = edit {
            self.open_edit(target);
        }
        if let Some(drop) = dropped {
            self.drop_on_column(drop);
        }

        if self.edit.is_some() {
            ui::dialogs::show_edit_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
        if let Some(action) = self.toasts.render(ctx) {
            self.handle_toast_action(action);
        }
    }
}
