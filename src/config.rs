use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::model::{DateEditPolicy, FeaturedMember};

/// Persisted user settings (lives in the OS config directory).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Project snapshot loaded at start. Without one the sample data is shown.
    pub data_path: Option<PathBuf>,
    /// Location used when none is passed on the command line.
    pub default_query: String,
    /// Pin "today" to a fixed date.
    pub today: Option<NaiveDate>,
    pub date_edit_policy: DateEditPolicy,
    pub featured_member: FeaturedMember,
    pub name_column_width: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            default_query: String::new(),
            today: None,
            date_edit_policy: DateEditPolicy::default(),
            featured_member: FeaturedMember::default(),
            name_column_width: 280.0,
        }
    }
}

impl AppConfig {
    /// `<config dir>/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "hjertis", "RustProjectPlanner")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
        Ok(toml::from_str(&text)?)
    }

    /// Load the config, falling back to defaults when the file is missing or broken.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
        }
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|e| AppError::io(path, e))
    }

    /// The date the timeline treats as today.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "today = \"2024-01-23\"\ndate_edit_policy = \"lenient\"\n\n[featured_member]\nname = \"Sam Ortiz\"\nbucket = \"sam\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2024, 1, 23));
        assert_eq!(config.date_edit_policy, DateEditPolicy::Lenient);
        assert_eq!(config.featured_member.bucket, "sam");
        assert_eq!(config.name_column_width, 280.0);
        assert!(config.data_path.is_none());
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "today = [").unwrap();
        assert!(matches!(AppConfig::load_from(&path), Err(AppError::ConfigParse(_))));
        assert_eq!(AppConfig::load_or_default(Some(&path)), AppConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            default_query: "viewType=timeline".into(),
            data_path: Some(dir.path().join("projects.json")),
            ..AppConfig::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn pinned_today_wins() {
        let config = AppConfig {
            today: NaiveDate::from_ymd_opt(2024, 1, 23),
            ..AppConfig::default()
        };
        assert_eq!(config.today(), NaiveDate::from_ymd_opt(2024, 1, 23).unwrap());
    }
}
