use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::drag::{BarTarget, DateCommit};
use super::project::Project;
use super::task::TaskStatus;

/// Which projects show their task rows. Unknown ids count as expanded.
#[derive(Debug, Clone, Default)]
pub struct ExpandState {
    expanded: HashMap<Uuid, bool>,
}

impl ExpandState {
    pub fn is_expanded(&self, id: Uuid) -> bool {
        self.expanded.get(&id).copied().unwrap_or(true)
    }

    pub fn toggle(&mut self, id: Uuid) {
        let next = !self.is_expanded(id);
        self.expanded.insert(id, next);
    }

    pub fn set(&mut self, id: Uuid, expanded: bool) {
        self.expanded.insert(id, expanded);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Project { task_count: usize, expanded: bool },
    Task { status: TaskStatus },
}

/// One line of the timeline, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRow<'a> {
    pub target: BarTarget,
    pub kind: RowKind,
    pub name: &'a str,
    pub subtitle: Option<&'a str>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Flatten projects into rows: each project, then its tasks if expanded.
pub fn compose_rows<'a>(projects: &[&'a Project], expand: &ExpandState) -> Vec<TimelineRow<'a>> {
    let mut rows = Vec::new();
    for project in projects.iter().copied() {
        let expanded = expand.is_expanded(project.id);
        rows.push(TimelineRow {
            target: BarTarget::Project(project.id),
            kind: RowKind::Project {
                task_count: project.task_count(),
                expanded,
            },
            name: &project.name,
            subtitle: project.client.as_deref(),
            start: project.start,
            end: project.end,
        });
        if !expanded {
            continue;
        }
        rows.extend(project.tasks.iter().map(|task| TimelineRow {
            target: BarTarget::Task {
                project: project.id,
                task: task.id,
            },
            kind: RowKind::Task { status: task.status },
            name: &task.name,
            subtitle: None,
            start: task.start,
            end: task.end,
        }));
    }
    rows
}

/// Current dates of the item a target points at.
pub fn dates_of(projects: &[Project], target: BarTarget) -> Option<(NaiveDate, NaiveDate)> {
    match target {
        BarTarget::Project(id) => projects.iter().find(|p| p.id == id).map(|p| (p.start, p.end)),
        BarTarget::Task { project, task } => projects
            .iter()
            .find(|p| p.id == project)
            .and_then(|p| p.task(task))
            .map(|t| (t.start, t.end)),
    }
}

pub fn name_of(projects: &[Project], target: BarTarget) -> Option<&str> {
    match target {
        BarTarget::Project(id) => projects.iter().find(|p| p.id == id).map(|p| p.name.as_str()),
        BarTarget::Task { project, task } => projects
            .iter()
            .find(|p| p.id == project)
            .and_then(|p| p.task(task))
            .map(|t| t.name.as_str()),
    }
}

/// Write a commit into the collection. Returns `false` if the target is gone.
pub fn apply_commit(projects: &mut [Project], commit: &DateCommit) -> bool {
    match commit.target {
        BarTarget::Project(id) => match projects.iter_mut().find(|p| p.id == id) {
            Some(project) => {
                project.start = commit.start;
                project.end = commit.end;
                true
            }
            None => false,
        },
        BarTarget::Task { project, task } => {
            match projects
                .iter_mut()
                .find(|p| p.id == project)
                .and_then(|p| p.task_mut(task))
            {
                Some(task) => {
                    task.start = commit.start;
                    task.end = commit.end;
                    true
                }
                None => false,
            }
        }
    }
}

/// How the edit dialog treats a start that is not before the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateEditPolicy {
    /// Same rule as resizing: start must be strictly before end.
    #[default]
    RequireOrdered,
    /// Save whatever parses.
    Lenient,
}

pub const EDIT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Text state of the edit-dates dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub target: BarTarget,
    pub name: String,
    pub start_text: String,
    pub end_text: String,
}

impl EditDraft {
    pub fn open(projects: &[Project], target: BarTarget) -> Option<Self> {
        let (start, end) = dates_of(projects, target)?;
        let name = name_of(projects, target)?.to_string();
        Some(Self {
            target,
            name,
            start_text: start.format(EDIT_DATE_FORMAT).to_string(),
            end_text: end.format(EDIT_DATE_FORMAT).to_string(),
        })
    }

    pub fn is_project(&self) -> bool {
        matches!(self.target, BarTarget::Project(_))
    }

    /// Parse both fields into a commit. Unparseable input yields `None`.
    pub fn save(&self, policy: DateEditPolicy) -> Option<DateCommit> {
        let start = NaiveDate::parse_from_str(self.start_text.trim(), EDIT_DATE_FORMAT).ok();
        let end = NaiveDate::parse_from_str(self.end_text.trim(), EDIT_DATE_FORMAT).ok();
        let (Some(start), Some(end)) = (start, end) else {
            log::debug!("ignoring edit of {:?}: unparseable date", self.target);
            return None;
        };
        if policy == DateEditPolicy::RequireOrdered && start >= end {
            log::debug!("ignoring edit of {:?}: {} is not before {}", self.target, start, end);
            return None;
        }
        Some(DateCommit {
            target: self.target,
            start,
            end,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Task;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn fixture() -> Vec<Project> {
        vec![
            Project::new("Mobile redesign", d(2024, 1, 10), d(2024, 2, 3)).with_tasks(vec![
                Task::new("Research", d(2024, 1, 10), d(2024, 1, 17)),
                Task::new("Wireframes", d(2024, 1, 14), d(2024, 1, 19)),
            ]),
            Project::new("Billing", d(2024, 1, 5), d(2024, 1, 30))
                .with_tasks(vec![Task::new("Schema", d(2024, 1, 5), d(2024, 1, 9))]),
        ]
    }

    #[test]
    fn all_projects_expanded_by_default() {
        let projects = fixture();
        let refs: Vec<&Project> = projects.iter().collect();
        let rows = compose_rows(&refs, &ExpandState::default());
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].name, "Mobile redesign");
        assert_eq!(rows[1].name, "Research");
        assert_eq!(rows[3].name, "Billing");
        assert!(matches!(rows[0].kind, RowKind::Project { task_count: 2, expanded: true }));
    }

    #[test]
    fn collapsed_project_hides_tasks() {
        let projects = fixture();
        let refs: Vec<&Project> = projects.iter().collect();
        let mut expand = ExpandState::default();
        expand.toggle(projects[0].id);
        let rows = compose_rows(&refs, &expand);
        let names: Vec<&str> = rows.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Mobile redesign", "Billing", "Schema"]);

        expand.toggle(projects[0].id);
        assert!(expand.is_expanded(projects[0].id));
    }

    #[test]
    fn commit_updates_task_dates() {
        let mut projects = fixture();
        let target = BarTarget::Task {
            project: projects[0].id,
            task: projects[0].tasks[1].id,
        };
        let commit = DateCommit {
            target,
            start: d(2024, 1, 15),
            end: d(2024, 1, 20),
        };
        assert!(apply_commit(&mut projects, &commit));
        assert_eq!(projects[0].tasks[1].start, d(2024, 1, 15));
        assert_eq!(projects[0].tasks[1].end, d(2024, 1, 20));
        assert_eq!(projects[0].tasks[0].start, d(2024, 1, 10));
    }

    #[test]
    fn commit_to_missing_item_is_ignored() {
        let mut projects = fixture();
        let commit = DateCommit {
            target: BarTarget::Project(Uuid::new_v4()),
            start: d(2024, 1, 1),
            end: d(2024, 1, 2),
        };
        assert!(!apply_commit(&mut projects, &commit));
    }

    #[test]
    fn edit_draft_prefills_iso_dates() {
        let projects = fixture();
        let draft = EditDraft::open(&projects, BarTarget::Project(projects[1].id)).unwrap();
        assert_eq!(draft.name, "Billing");
        assert_eq!(draft.start_text, "2024-01-05");
        assert_eq!(draft.end_text, "2024-01-30");
        assert!(draft.is_project());
    }

    #[test]
    fn edit_save_ignores_unparseable_input() {
        let projects = fixture();
        let mut draft = EditDraft::open(&projects, BarTarget::Project(projects[1].id)).unwrap();
        draft.start_text = "next tuesday".into();
        assert_eq!(draft.save(DateEditPolicy::Lenient), None);
        assert_eq!(draft.save(DateEditPolicy::RequireOrdered), None);
    }

    #[test]
    fn edit_policy_decides_inverted_ranges() {
        let projects = fixture();
        let mut draft = EditDraft::open(&projects, BarTarget::Project(projects[1].id)).unwrap();
        draft.start_text = "2024-02-10".into();
        draft.end_text = "2024-02-01".into();
        assert_eq!(draft.save(DateEditPolicy::RequireOrdered), None);

        let lenient = draft.save(DateEditPolicy::Lenient).unwrap();
        assert_eq!(lenient.start, d(2024, 2, 10));
        assert_eq!(lenient.end, d(2024, 2, 1));

        draft.end_text = " 2024-02-20 ".into();
        let ordered = draft.save(DateEditPolicy::RequireOrdered).unwrap();
        assert_eq!(ordered.end, d(2024, 2, 20));
    }

    #[test]
    fn default_policy_requires_ordered_dates() {
        assert_eq!(DateEditPolicy::default(), DateEditPolicy::RequireOrdered);
    }
}
