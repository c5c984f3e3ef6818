//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::fiscal::StartDay;
use crate::core::inspection::DEFAULT_RUNNING_WIDTH;
use crate::core::Project;

/// QCF configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Weekday on which fiscal weeks start (0 = Sunday .. 6 = Saturday)
    pub fiscal_year_start_day: Option<StartDay>,

    /// Station code for new inspection numbers
    pub station: Option<String>,

    /// Digits in the running part of inspection numbers
    pub running_width: Option<usize>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, discovering the project from the
    /// current directory
    pub fn load() -> Self {
        match std::env::current_dir() {
            Ok(dir) => Self::load_from(&dir),
            Err(_) => Self::load_layers(None),
        }
    }

    /// Load configuration from all sources, discovering the project from `start`
    pub fn load_from(start: &Path) -> Self {
        let project = Project::discover_from(start).ok();
        Self::load_layers(project.as_ref())
    }

    fn load_layers(project: Option<&Project>) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/qcf/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Project config (.qcf/config.yaml)
        if let Some(project) = project {
            if let Some(project_config) = Self::read_file(&project.config_path()) {
                config.merge(project_config);
            }
        }

        // 4. Environment variables
        config.apply_env(|key| std::env::var(key).ok());

        config
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read config file");
                return None;
            }
        };
        match serde_yml::from_str::<Option<Config>>(&contents) {
            // An empty or comment-only file deserializes to None
            Ok(parsed) => Some(parsed.unwrap_or_default()),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config file");
                None
            }
        }
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(value) = var("QCF_START_DAY") {
            match value.parse::<StartDay>() {
                Ok(day) => self.fiscal_year_start_day = Some(day),
                Err(e) => tracing::warn!(%value, error = %e, "ignoring QCF_START_DAY"),
            }
        }
        if let Some(station) = var("QCF_STATION") {
            self.station = Some(station);
        }
        if let Some(format) = var("QCF_FORMAT") {
            self.default_format = Some(format);
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "qcf").map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.fiscal_year_start_day.is_some() {
            self.fiscal_year_start_day = other.fiscal_year_start_day;
        }
        if other.station.is_some() {
            self.station = other.station;
        }
        if other.running_width.is_some() {
            self.running_width = other.running_width;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Fiscal week start day, Saturday unless configured
    pub fn start_day(&self) -> StartDay {
        self.fiscal_year_start_day.unwrap_or_default()
    }

    pub fn running_width(&self) -> usize {
        self.running_width.unwrap_or(DEFAULT_RUNNING_WIDTH).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.start_day(), StartDay::SATURDAY);
        assert_eq!(config.running_width(), 3);
        assert!(config.station.is_none());
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            station: Some("IQA".to_string()),
            running_width: Some(4),
            ..Default::default()
        };
        base.merge(Config {
            station: Some("FQC".to_string()),
            fiscal_year_start_day: Some(StartDay::SUNDAY),
            ..Default::default()
        });
        assert_eq!(base.station.as_deref(), Some("FQC"));
        assert_eq!(base.running_width(), 4);
        assert_eq!(base.start_day(), StartDay::SUNDAY);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [("QCF_START_DAY", "mon"), ("QCF_STATION", "L2")].into();
        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.start_day(), StartDay::MONDAY);
        assert_eq!(config.station.as_deref(), Some("L2"));
    }

    #[test]
    fn test_invalid_env_start_day_is_ignored() {
        let mut config = Config::default();
        config.apply_env(|key| (key == "QCF_START_DAY").then(|| "9".to_string()));
        assert_eq!(config.start_day(), StartDay::SATURDAY);
    }

    #[test]
    fn test_project_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let project = Project::init(tmp.path(), false).unwrap();
        std::fs::write(
            project.config_path(),
            "fiscal_year_start_day: 0\nstation: LAB\nrunning_width: 4\n",
        )
        .unwrap();

        let config = Config::read_file(&project.config_path()).unwrap();
        assert_eq!(config.start_day(), StartDay::SUNDAY);
        assert_eq!(config.station.as_deref(), Some("LAB"));
        assert_eq!(config.running_width(), 4);
    }

    #[test]
    fn test_invalid_start_day_in_file_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "fiscal_year_start_day: 8\n").unwrap();
        assert!(Config::read_file(&path).is_none());
    }

    #[test]
    fn test_comment_only_file_is_empty_config() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "# nothing here\n").unwrap();
        let config = Config::read_file(&path).unwrap();
        assert!(config.station.is_none());
    }
}
