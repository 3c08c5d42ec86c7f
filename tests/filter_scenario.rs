use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use rust_project_planner::model::filter::{self, FilterChip};
use rust_project_planner::model::{ChipSet, FeaturedMember, Project, ProjectStatus, ViewOptions};

fn d(m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, day).unwrap()
}

fn projects() -> Vec<Project> {
    vec![
        Project::new("Website refresh", d(1, 10), d(2, 3))
            .with_status(ProjectStatus::Active)
            .with_tags(["frontend"]),
        Project::new("Quarterly report", d(1, 2), d(1, 20)).with_status(ProjectStatus::Completed),
    ]
}

fn names(projects: &[Project], chips: &ChipSet, options: &ViewOptions) -> Vec<String> {
    filter::render(projects, chips.as_slice(), options, &FeaturedMember::default())
        .projects
        .iter()
        .map(|p| p.name.clone())
        .collect()
}

#[test]
fn chips_and_closed_toggle_walkthrough() {
    let projects = projects();
    let mut chips = ChipSet::new();
    let mut options = ViewOptions {
        show_closed_projects: false,
        ..ViewOptions::default()
    };

    assert_eq!(names(&projects, &chips, &options), vec!["Website refresh"]);

    chips.toggle(FilterChip::new("tag", "frontend"));
    assert_eq!(names(&projects, &chips, &options), vec!["Website refresh"]);

    // Groups combine with AND: a completed status chip next to the tag chip
    // matches nothing, even once closed projects are shown.
    chips.toggle(FilterChip::new("status", "completed"));
    options.show_closed_projects = true;
    assert!(names(&projects, &chips, &options).is_empty());

    // Dropping the tag leaves the completed project only.
    chips.toggle(FilterChip::new("tag", "frontend"));
    assert_eq!(names(&projects, &chips, &options), vec!["Quarterly report"]);

    // Values inside one group combine with OR.
    chips.toggle(FilterChip::new("status", "active"));
    assert_eq!(
        names(&projects, &chips, &options),
        vec!["Website refresh", "Quarterly report"]
    );

    chips.clear();
    assert_eq!(
        names(&projects, &chips, &options),
        vec!["Website refresh", "Quarterly report"]
    );
}

#[test]
fn counts_cover_the_whole_collection() {
    let projects = projects();
    let chips = ChipSet::from_chips([FilterChip::new("status", "active")]);
    let options = ViewOptions {
        show_closed_projects: false,
        ..ViewOptions::default()
    };
    let rendered = filter::render(&projects, chips.as_slice(), &options, &FeaturedMember::default());
    assert_eq!(rendered.projects.len(), 1);
    assert_eq!(rendered.counts.status.get("completed"), Some(&1));
    assert_eq!(rendered.counts.tags.get("frontend"), Some(&1));
}
