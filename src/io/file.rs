use std::path::Path;

use crate::error::{AppError, Result};
use crate::model::Project;

/// Save the project snapshot to a JSON file.
pub fn save_projects(projects: &[Project], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(projects)?;
    std::fs::write(path, json).map_err(|e| AppError::io(path, e))?;
    log::info!("saved {} projects to {}", projects.len(), path.display());
    Ok(())
}

/// Load a project snapshot from a JSON file.
pub fn load_projects(path: &Path) -> Result<Vec<Project>> {
    let json = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    let projects: Vec<Project> = serde_json::from_str(&json)?;
    log::info!("loaded {} projects from {}", projects.len(), path.display());
    Ok(projects)
}
