//! Project discovery and structure
//!
//! A project is any directory containing `.qcf/`. Its `config.yaml` holds
//! the station and calendar settings shared by everyone working there.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the project marker directory
pub const PROJECT_DIR: &str = ".qcf";

/// Represents a QCF project
#[derive(Debug)]
pub struct Project {
    /// Root directory of the project (parent of .qcf/)
    root: PathBuf,
}

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current = std::env::current_dir().map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find project root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            if current.join(PROJECT_DIR).is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create a new project at the given path
    ///
    /// With `force`, an existing `.qcf/config.yaml` is overwritten.
    pub fn init(path: &Path, force: bool) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let qcf_dir = root.join(PROJECT_DIR);
        if qcf_dir.exists() && !force {
            return Err(ProjectError::AlreadyExists(root));
        }

        std::fs::create_dir_all(&qcf_dir).map_err(|e| ProjectError::IoError(e.to_string()))?;
        std::fs::write(qcf_dir.join("config.yaml"), Self::default_config())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        tracing::debug!(root = %root.display(), "initialized project");
        Ok(Self { root })
    }

    fn default_config() -> &'static str {
        r#"# QCF Project Configuration

# Weekday on which fiscal weeks start: 0 (Sunday) .. 6 (Saturday)
fiscal_year_start_day: 6

# Station code used for new inspection numbers (e.g. IQA, FQC, L1)
# station: ""

# Digits in the running part of inspection numbers
# running_width: 3

# Default output format (auto, table, tsv, csv, json, yaml, md)
# default_format: auto
"#
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .qcf configuration directory
    pub fn qcf_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Path of the project config file
    pub fn config_path(&self) -> PathBuf {
        self.qcf_dir().join("config.yaml")
    }
}

/// Errors that can occur during project operations
#[derive(Debug, Error, miette::Diagnostic)]
pub enum ProjectError {
    #[error("not a QCF project (searched from {searched_from:?})")]
    #[diagnostic(code(qcf::project::not_found), help("run 'qcf init' to create one"))]
    NotFound { searched_from: PathBuf },

    #[error("QCF project already exists at {0:?}")]
    #[diagnostic(code(qcf::project::exists), help("use --force to overwrite its config"))]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    #[diagnostic(code(qcf::project::io))]
    IoError(String),
}
