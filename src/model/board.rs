use uuid::Uuid;

use super::project::{Project, ProjectStatus};

/// Kanban columns, left to right. Cancelled projects have no column.
pub const COLUMN_ORDER: [ProjectStatus; 4] = [
    ProjectStatus::Backlog,
    ProjectStatus::Planned,
    ProjectStatus::Active,
    ProjectStatus::Completed,
];

/// Bucket `projects` into the board columns, keeping their order.
pub fn columns<'a>(projects: &[&'a Project]) -> Vec<(ProjectStatus, Vec<&'a Project>)> {
    COLUMN_ORDER
        .iter()
        .map(|status| {
            let cards = projects
                .iter()
                .copied()
                .filter(|p| p.status == *status)
                .collect();
            (*status, cards)
        })
        .collect()
}

/// Drop a dragged card on a column. Returns `true` when the status changed.
pub fn move_to_status(projects: &mut [Project], id: Uuid, status: ProjectStatus) -> bool {
    match projects.iter_mut().find(|p| p.id == id) {
        Some(project) if project.status != status => {
            log::info!("moved '{}' from {} to {}", project.name, project.status.as_str(), status.as_str());
            project.status = status;
            true
        }
        _ => false,
    }
}
