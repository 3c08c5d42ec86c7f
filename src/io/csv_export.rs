use std::path::Path;

use crate::error::Result;
use crate::model::Project;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Export projects and their tasks to a CSV file, one row per bar.
///
/// Columns: Kind, Project, Name, Status, Start, End.
/// Returns the number of rows written (header excluded).
pub fn export_csv(projects: &[&Project], path: &Path) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["Kind", "Project", "Name", "Status", "Start", "End"])?;

    let mut rows = 0;
    for project in projects {
        let start = project.start.format(DATE_FORMAT).to_string();
        let end = project.end.format(DATE_FORMAT).to_string();
        wtr.write_record([
            "project",
            project.name.as_str(),
            project.name.as_str(),
            project.status.as_str(),
            start.as_str(),
            end.as_str(),
        ])?;
        rows += 1;
        for task in &project.tasks {
            let start = task.start.format(DATE_FORMAT).to_string();
            let end = task.end.format(DATE_FORMAT).to_string();
            wtr.write_record([
                "task",
                project.name.as_str(),
                task.name.as_str(),
                task.status.as_str(),
                start.as_str(),
                end.as_str(),
            ])?;
            rows += 1;
        }
    }

    wtr.flush().map_err(csv::Error::from)?;
    log::info!("exported {} rows to {}", rows, path.display());
    Ok(rows)
}
