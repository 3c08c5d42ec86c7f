use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use rust_project_planner::app::PlannerApp;
use rust_project_planner::config::AppConfig;
use rust_project_planner::model::filter::{FilterChip, Ordering};
use rust_project_planner::model::sync::SyncOutcome;
use rust_project_planner::model::{QueryParams, ViewMode, ViewOptions, ViewState, ViewType};

fn headless(query: &str) -> PlannerApp {
    let config = AppConfig {
        today: NaiveDate::from_ymd_opt(2024, 1, 23),
        ..AppConfig::default()
    };
    PlannerApp::with_config(config, query)
}

#[test]
fn full_location_round_trips_through_view_state() {
    let query = "utm_source=mail&status=active,planned&tags=frontend&viewType=board\
                 &ordering=date&showClosedProjects=false&viewMode=Month\
                 &viewStartDate=2024-01-01&zoom=1.5";
    let params = QueryParams::parse(query).unwrap();
    let state = ViewState::from_params(&params, &ViewOptions::default());

    assert_eq!(state.chips.len(), 3);
    assert_eq!(state.options.view_type, ViewType::Board);
    assert_eq!(state.options.ordering, Ordering::Date);
    assert!(!state.options.show_closed_projects);
    assert_eq!(state.window.mode, Some(ViewMode::Month));
    assert_eq!(state.window.zoom, Some(1.5));

    let mut written = params.clone();
    state.write_params(&mut written);
    assert_eq!(written, params);
    assert_eq!(written.to_string(), query);
}

#[test]
fn unknown_keys_survive_view_changes() {
    let mut app = headless("ref=newsletter&status=active");
    app.set_view_type(ViewType::Timeline);
    app.toggle_chip(FilterChip::new("status", "active"));
    app.set_ordering(Ordering::Alphabetical);

    assert_eq!(
        app.router.params().to_string(),
        "ref=newsletter&viewType=timeline&ordering=alphabetical"
    );
}

#[test]
fn own_writes_do_not_rewind_local_state() {
    let mut app = headless("");
    app.toggle_chip(FilterChip::new("priority", "urgent"));
    app.toggle_chip(FilterChip::new("priority", "high"));

    // Both writes are already reconciled; nothing left to re-read.
    assert_eq!(app.sync_location(), SyncOutcome::Idle);
    assert_eq!(app.router.params().get("priority"), Some("urgent,high"));
    assert_eq!(app.sync.state().chips.len(), 2);
}

#[test]
fn address_bar_navigation_is_re_projected() {
    let mut app = headless("status=active");
    app.set_view_type(ViewType::Board);

    assert!(app.navigate_to("?tags=backend&viewType=list"));
    assert_eq!(app.sync.state().options.view_type, ViewType::List);
    assert!(app.sync.state().chips.contains(&FilterChip::new("tags", "backend")));
    assert!(!app.sync.state().chips.contains(&FilterChip::new("status", "active")));

    app.go_back();
    assert_eq!(app.sync.state().options.view_type, ViewType::Board);
    assert!(app.sync.state().chips.contains(&FilterChip::new("status", "active")));
}
