//! Filter chips, view options, and the pure function that turns the raw
//! project list into what the views draw.

use std::cmp::Ordering as CmpOrdering;
use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::project::Project;

/// One active filter criterion. Key and value are stored trimmed and
/// lowercased so that equality is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterChip {
    pub key: String,
    pub value: String,
}

impl FilterChip {
    pub fn new(key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        Self {
            key: key.as_ref().trim().to_lowercase(),
            value: value.as_ref().trim().to_lowercase(),
        }
    }

    pub fn group(&self) -> Option<FilterGroup> {
        FilterGroup::classify(&self.key)
    }
}

/// The four chip families the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterGroup {
    Status,
    Priority,
    Tags,
    Members,
}

impl FilterGroup {
    pub const ALL: [FilterGroup; 4] = [
        FilterGroup::Status,
        FilterGroup::Priority,
        FilterGroup::Tags,
        FilterGroup::Members,
    ];

    /// Prefix match on the lowercased key; `pic` is an alias for members.
    pub fn classify(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        if key.starts_with("status") {
            Some(FilterGroup::Status)
        } else if key.starts_with("priority") {
            Some(FilterGroup::Priority)
        } else if key.starts_with("tag") {
            Some(FilterGroup::Tags)
        } else if key == "pic" || key.starts_with("member") {
            Some(FilterGroup::Members)
        } else {
            None
        }
    }

    /// Query parameter that carries this group.
    pub fn param(&self) -> &'static str {
        match self {
            FilterGroup::Status => "status",
            FilterGroup::Priority => "priority",
            FilterGroup::Tags => "tags",
            FilterGroup::Members => "members",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterGroup::Status => "Status",
            FilterGroup::Priority => "Priority",
            FilterGroup::Tags => "Tags",
            FilterGroup::Members => "Members",
        }
    }
}

/// Ordered list of chips without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChipSet {
    chips: Vec<FilterChip>,
}

impl ChipSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_chips(chips: impl IntoIterator<Item = FilterChip>) -> Self {
        let mut set = Self::new();
        for chip in chips {
            set.add(chip);
        }
        set
    }

    pub fn as_slice(&self) -> &[FilterChip] {
        &self.chips
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterChip> {
        self.chips.iter()
    }

    pub fn len(&self) -> usize {
        self.chips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }

    pub fn contains(&self, chip: &FilterChip) -> bool {
        self.chips.contains(chip)
    }

    /// Append unless an identical chip is present. Returns whether it was added.
    pub fn add(&mut self, chip: FilterChip) -> bool {
        if self.contains(&chip) {
            return false;
        }
        self.chips.push(chip);
        true
    }

    pub fn remove(&mut self, chip: &FilterChip) -> bool {
        let before = self.chips.len();
        self.chips.retain(|c| c != chip);
        self.chips.len() != before
    }

    /// Remove the chip if present, otherwise append it.
    pub fn toggle(&mut self, chip: FilterChip) {
        if !self.remove(&chip) {
            self.chips.push(chip);
        }
    }

    pub fn clear_group(&mut self, group: FilterGroup) {
        self.chips.retain(|c| c.group() != Some(group));
    }

    pub fn clear(&mut self) {
        self.chips.clear();
    }

    /// Same chips regardless of order.
    pub fn same_chips(&self, other: &ChipSet) -> bool {
        let a: HashSet<&FilterChip> = self.chips.iter().collect();
        let b: HashSet<&FilterChip> = other.chips.iter().collect();
        a == b
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    #[default]
    List,
    Board,
    Timeline,
}

impl ViewType {
    pub const ALL: [ViewType; 3] = [ViewType::List, ViewType::Board, ViewType::Timeline];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::List => "list",
            ViewType::Board => "board",
            ViewType::Timeline => "timeline",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewType::List => "List",
            ViewType::Board => "Board",
            ViewType::Timeline => "Timeline",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ordering {
    #[default]
    Manual,
    Alphabetical,
    Date,
}

impl Ordering {
    pub const ALL: [Ordering; 3] = [Ordering::Manual, Ordering::Alphabetical, Ordering::Date];

    pub fn as_str(&self) -> &'static str {
        match self {
            Ordering::Manual => "manual",
            Ordering::Alphabetical => "alphabetical",
            Ordering::Date => "date",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Ordering::Manual => "Manual",
            Ordering::Alphabetical => "Alphabetical",
            Ordering::Date => "Due date",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.as_str() == s.trim())
    }
}

/// How the list view shows a project's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskViewMode {
    #[default]
    Indented,
    Collapsed,
    Flat,
}

impl TaskViewMode {
    pub const ALL: [TaskViewMode; 3] = [TaskViewMode::Indented, TaskViewMode::Collapsed, TaskViewMode::Flat];

    pub fn label(&self) -> &'static str {
        match self {
            TaskViewMode::Indented => "Indented",
            TaskViewMode::Collapsed => "Collapsed",
            TaskViewMode::Flat => "Flat",
        }
    }
}

/// Section grouping for the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupBy {
    #[default]
    None,
    Status,
    Assignee,
    Tags,
}

impl GroupBy {
    pub const ALL: [GroupBy; 4] = [GroupBy::None, GroupBy::Status, GroupBy::Assignee, GroupBy::Tags];

    pub fn label(&self) -> &'static str {
        match self {
            GroupBy::None => "None",
            GroupBy::Status => "Status",
            GroupBy::Assignee => "Assignee",
            GroupBy::Tags => "Tags",
        }
    }

    /// Section headings a project belongs to. A project with several tags
    /// appears under each of them.
    pub fn keys(&self, project: &Project) -> Vec<String> {
        match self {
            GroupBy::None => vec![String::new()],
            GroupBy::Status => vec![project.status.label().to_string()],
            GroupBy::Assignee => match project.members.first() {
                Some(member) => vec![member.clone()],
                None => vec!["Unassigned".to_string()],
            },
            GroupBy::Tags if project.tags.is_empty() => vec!["Untagged".to_string()],
            GroupBy::Tags => project.tags.iter().map(|t| t.to_lowercase()).collect(),
        }
    }
}

/// Columns the list view can show, keyed as in `ViewOptions::properties`.
pub const LIST_PROPERTIES: [&str; 4] = ["title", "status", "assignee", "dueDate"];

/// Group `projects` into ordered sections, preserving the input order inside each.
pub fn group_projects<'a>(projects: &[&'a Project], group_by: GroupBy) -> Vec<(String, Vec<&'a Project>)> {
    let mut sections: Vec<(String, Vec<&'a Project>)> = Vec::new();
    for project in projects.iter().copied() {
        for key in group_by.keys(project) {
            match sections.iter_mut().find(|(k, _)| *k == key) {
                Some((_, members)) => members.push(project),
                None => sections.push((key, vec![project])),
            }
        }
    }
    sections
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    pub view_type: ViewType,
    pub ordering: Ordering,
    pub show_closed_projects: bool,
    pub tasks: TaskViewMode,
    pub group_by: GroupBy,
    pub properties: Vec<String>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            view_type: ViewType::List,
            ordering: Ordering::Manual,
            show_closed_projects: true,
            tasks: TaskViewMode::Indented,
            group_by: GroupBy::None,
            properties: LIST_PROPERTIES
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// The member who gets a dedicated count bucket in the filter menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedMember {
    pub name: String,
    pub bucket: String,
}

impl Default for FeaturedMember {
    fn default() -> Self {
        Self {
            name: "Alex Chen".into(),
            bucket: "alex".into(),
        }
    }
}

pub const NO_MEMBER_BUCKET: &str = "no-member";
pub const CURRENT_MEMBER_BUCKET: &str = "current";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCounts {
    pub status: BTreeMap<String, usize>,
    pub priority: BTreeMap<String, usize>,
    pub tags: BTreeMap<String, usize>,
    pub members: BTreeMap<String, usize>,
}

impl FilterCounts {
    pub fn get(&self, group: FilterGroup, value: &str) -> usize {
        let map = match group {
            FilterGroup::Status => &self.status,
            FilterGroup::Priority => &self.priority,
            FilterGroup::Tags => &self.tags,
            FilterGroup::Members => &self.members,
        };
        map.get(value).copied().unwrap_or(0)
    }
}

/// Tally over the whole collection; active filters never change these numbers.
pub fn compute_counts(projects: &[Project], featured: &FeaturedMember) -> FilterCounts {
    let mut counts = FilterCounts::default();
    let featured_name = featured.name.to_lowercase();
    for project in projects {
        *counts.status.entry(project.status.as_str().to_string()).or_default() += 1;
        *counts.priority.entry(project.priority.as_str().to_string()).or_default() += 1;
        for tag in &project.tags {
            *counts.tags.entry(tag.to_lowercase()).or_default() += 1;
        }
        let bucket = if project.members.is_empty() {
            NO_MEMBER_BUCKET
        } else {
            CURRENT_MEMBER_BUCKET
        };
        *counts.members.entry(bucket.to_string()).or_default() += 1;
        if project.members.iter().any(|m| m.to_lowercase() == featured_name) {
            *counts.members.entry(featured.bucket.clone()).or_default() += 1;
        }
    }
    counts
}

#[derive(Debug, Default)]
struct GroupedChips {
    status: HashSet<String>,
    priority: HashSet<String>,
    tags: HashSet<String>,
    members: Vec<String>,
}

impl GroupedChips {
    fn from_chips(chips: &[FilterChip]) -> Self {
        let mut grouped = Self::default();
        for chip in chips {
            let value = chip.value.trim().to_lowercase();
            match FilterGroup::classify(&chip.key) {
                Some(FilterGroup::Status) => {
                    grouped.status.insert(value);
                }
                Some(FilterGroup::Priority) => {
                    grouped.priority.insert(value);
                }
                Some(FilterGroup::Tags) => {
                    grouped.tags.insert(value);
                }
                Some(FilterGroup::Members) => {
                    if !grouped.members.contains(&value) {
                        grouped.members.push(value);
                    }
                }
                None => {}
            }
        }
        grouped
    }

    fn matches(&self, project: &Project) -> bool {
        if !self.status.is_empty() && !self.status.contains(project.status.as_str()) {
            return false;
        }
        if !self.priority.is_empty() && !self.priority.contains(project.priority.as_str()) {
            return false;
        }
        if !self.tags.is_empty() && !project.tags.iter().any(|t| self.tags.contains(&t.to_lowercase())) {
            return false;
        }
        if !self.members.is_empty() {
            let hit = project.members.iter().any(|member| {
                let member = member.to_lowercase();
                self.members.iter().any(|needle| member.contains(needle.as_str()))
            });
            if !hit {
                return false;
            }
        }
        true
    }
}

/// Case-folded comparison with a raw tiebreak, standing in for a locale collator.
pub fn compare_names(a: &str, b: &str) -> CmpOrdering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Output of [`render`].
#[derive(Debug)]
pub struct Rendered<'a> {
    pub projects: Vec<&'a Project>,
    pub counts: FilterCounts,
}

/// Filter and order `projects` for display. Pure.
pub fn render<'a>(
    projects: &'a [Project],
    chips: &[FilterChip],
    options: &ViewOptions,
    featured: &FeaturedMember,
) -> Rendered<'a> {
    let grouped = GroupedChips::from_chips(chips);
    let mut visible: Vec<&Project> = projects
        .iter()
        .filter(|p| options.show_closed_projects || !p.status.is_closed())
        .filter(|p| grouped.matches(p))
        .collect();

    match options.ordering {
        Ordering::Manual => {}
        Ordering::Alphabetical => visible.sort_by(|a, b| compare_names(&a.name, &b.name)),
        // Stable sort: equal end dates keep input order.
        Ordering::Date => visible.sort_by_key(|p| p.end),
    }

    Rendered {
        projects: visible,
        counts: compute_counts(projects, featured),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::project::{Priority, ProjectStatus};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn fixture() -> Vec<Project> {
        vec![
            Project::new("Mobile redesign", d(1, 10), d(2, 3))
                .with_status(ProjectStatus::Active)
                .with_priority(Priority::High)
                .with_tags(["frontend", "Feature"])
                .with_members(["Alex Chen"]),
            Project::new("billing revamp", d(1, 5), d(1, 30))
                .with_status(ProjectStatus::Planned)
                .with_priority(Priority::Medium)
                .with_tags(["backend"])
                .with_members(["Sam Ortiz", "Alex Chen"]),
            Project::new("Analytics", d(1, 2), d(1, 20))
                .with_status(ProjectStatus::Completed)
                .with_priority(Priority::Low)
                .with_tags(["data"]),
            Project::new("Archive cleanup", d(1, 2), d(1, 12))
                .with_status(ProjectStatus::Cancelled)
                .with_priority(Priority::Low),
        ]
    }

    fn names(rendered: &Rendered<'_>) -> Vec<String> {
        rendered.projects.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn chip_is_normalized() {
        let chip = FilterChip::new(" Status ", "ACTIVE ");
        assert_eq!(chip, FilterChip::new("status", "active"));
        assert_eq!(chip.group(), Some(FilterGroup::Status));
    }

    #[test]
    fn classify_uses_prefixes() {
        assert_eq!(FilterGroup::classify("statuses"), Some(FilterGroup::Status));
        assert_eq!(FilterGroup::classify("Priority"), Some(FilterGroup::Priority));
        assert_eq!(FilterGroup::classify("tag"), Some(FilterGroup::Tags));
        assert_eq!(FilterGroup::classify("members"), Some(FilterGroup::Members));
        assert_eq!(FilterGroup::classify("PIC"), Some(FilterGroup::Members));
        assert_eq!(FilterGroup::classify("picture"), None);
        assert_eq!(FilterGroup::classify("owner"), None);
    }

    #[test]
    fn chip_set_suppresses_duplicates() {
        let mut set = ChipSet::new();
        assert!(set.add(FilterChip::new("status", "active")));
        assert!(!set.add(FilterChip::new("Status", "Active")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn toggle_twice_restores_set() {
        let mut set = ChipSet::from_chips([FilterChip::new("tags", "frontend")]);
        let original = set.clone();
        set.toggle(FilterChip::new("status", "active"));
        assert_eq!(set.len(), 2);
        set.toggle(FilterChip::new("status", "active"));
        assert_eq!(set, original);
    }

    #[test]
    fn clear_group_keeps_other_groups() {
        let mut set = ChipSet::from_chips([
            FilterChip::new("status", "active"),
            FilterChip::new("status", "planned"),
            FilterChip::new("priority", "high"),
        ]);
        set.clear_group(FilterGroup::Status);
        assert_eq!(set.as_slice(), &[FilterChip::new("priority", "high")]);
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn closed_projects_hidden_on_request() {
        let projects = fixture();
        let options = ViewOptions {
            show_closed_projects: false,
            ..ViewOptions::default()
        };
        let rendered = render(&projects, &[], &options, &FeaturedMember::default());
        assert_eq!(names(&rendered), vec!["Mobile redesign", "billing revamp"]);

        let all = render(&projects, &[], &ViewOptions::default(), &FeaturedMember::default());
        assert_eq!(all.projects.len(), 4);
    }

    #[test]
    fn groups_are_anded_values_are_ored() {
        let projects = fixture();
        let chips = vec![
            FilterChip::new("status", "active"),
            FilterChip::new("status", "planned"),
            FilterChip::new("priority", "medium"),
        ];
        let rendered = render(&projects, &chips, &ViewOptions::default(), &FeaturedMember::default());
        assert_eq!(names(&rendered), vec!["billing revamp"]);
    }

    #[test]
    fn tag_filter_ignores_case() {
        let projects = fixture();
        let chips = vec![FilterChip::new("tags", "feature")];
        let rendered = render(&projects, &chips, &ViewOptions::default(), &FeaturedMember::default());
        assert_eq!(names(&rendered), vec!["Mobile redesign"]);
    }

    #[test]
    fn member_filter_matches_substrings() {
        let projects = fixture();
        let chips = vec![FilterChip::new("pic", "ortiz")];
        let rendered = render(&projects, &chips, &ViewOptions::default(), &FeaturedMember::default());
        assert_eq!(names(&rendered), vec!["billing revamp"]);

        let chips = vec![FilterChip::new("members", "alex")];
        let rendered = render(&projects, &chips, &ViewOptions::default(), &FeaturedMember::default());
        assert_eq!(names(&rendered), vec!["Mobile redesign", "billing revamp"]);
    }

    #[test]
    fn unknown_chip_keys_do_not_filter() {
        let projects = fixture();
        let chips = vec![FilterChip::new("owner", "nobody")];
        let rendered = render(&projects, &chips, &ViewOptions::default(), &FeaturedMember::default());
        assert_eq!(rendered.projects.len(), 4);
    }

    #[test]
    fn alphabetical_ordering_folds_case() {
        let projects = fixture();
        let options = ViewOptions {
            ordering: Ordering::Alphabetical,
            ..ViewOptions::default()
        };
        let rendered = render(&projects, &[], &options, &FeaturedMember::default());
        assert_eq!(
            names(&rendered),
            vec!["Analytics", "Archive cleanup", "billing revamp", "Mobile redesign"]
        );
    }

    #[test]
    fn date_ordering_by_end_date() {
        let projects = fixture();
        let options = ViewOptions {
            ordering: Ordering::Date,
            ..ViewOptions::default()
        };
        let rendered = render(&projects, &[], &options, &FeaturedMember::default());
        assert_eq!(
            names(&rendered),
            vec!["Archive cleanup", "Analytics", "billing revamp", "Mobile redesign"]
        );
    }

    #[test]
    fn counts_ignore_active_filters() {
        let projects = fixture();
        let featured = FeaturedMember::default();
        let unfiltered = render(&projects, &[], &ViewOptions::default(), &featured);
        let chips = vec![FilterChip::new("status", "active"), FilterChip::new("tags", "data")];
        let options = ViewOptions {
            show_closed_projects: false,
            ..ViewOptions::default()
        };
        let filtered = render(&projects, &chips, &options, &featured);
        assert!(filtered.projects.is_empty());
        assert_eq!(filtered.counts, unfiltered.counts);
    }

    #[test]
    fn grouping_by_tags_repeats_multi_tagged_projects() {
        let projects = fixture();
        let refs: Vec<&Project> = projects.iter().collect();
        let sections = group_projects(&refs, GroupBy::Tags);
        let keys: Vec<&str> = sections.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["frontend", "feature", "backend", "data", "Untagged"]);
        assert_eq!(sections[1].1[0].name, "Mobile redesign");

        let by_status = group_projects(&refs, GroupBy::Status);
        assert_eq!(by_status.len(), 4);
        let flat = group_projects(&refs, GroupBy::None);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].1.len(), 4);
    }

    #[test]
    fn counts_tally_buckets() {
        let projects = fixture();
        let counts = compute_counts(&projects, &FeaturedMember::default());
        assert_eq!(counts.get(FilterGroup::Status, "active"), 1);
        assert_eq!(counts.get(FilterGroup::Status, "backlog"), 0);
        assert_eq!(counts.get(FilterGroup::Priority, "low"), 2);
        assert_eq!(counts.get(FilterGroup::Tags, "feature"), 1);
        assert_eq!(counts.get(FilterGroup::Members, NO_MEMBER_BUCKET), 2);
        assert_eq!(counts.get(FilterGroup::Members, CURRENT_MEMBER_BUCKET), 2);
        assert_eq!(counts.get(FilterGroup::Members, "alex"), 2);
    }
}
