use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use which::which;

use crate::{helper::DEFAULT_DATE_FORMAT, Result, SzError};

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding the key-value store files
    pub data_dir: PathBuf,

    /// Default directory for note exports and backups
    pub export_dir: PathBuf,

    /// strftime layout for note creation dates
    pub date_format: String,

    /// Editor command used by `add --edit` and `style set --edit`
    pub editor_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let (data_dir, export_dir) = match project_dirs() {
            Some(dirs) => (
                dirs.data_dir().to_path_buf(),
                dirs.data_dir().join("exports"),
            ),
            None => (PathBuf::from(".sistematiza"), PathBuf::from(".")),
        };

        Self {
            data_dir,
            export_dir,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            editor_command: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "sistematiza")
}

impl Config {
    /// Default location of the configuration file
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Loads the configuration at `path`, or at the default location.
    ///
    /// A missing file means defaults; a file that does not parse is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => {
                debug!("No config location available, using defaults");
                return Ok(Self::default());
            }
        };

        if !path.exists() {
            debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&raw).map_err(|e| SzError::ConfigError {
            message: format!("{}: {}", path.display(), e),
        })?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Editor to launch: `editor_command`, else `$EDITOR`, else the first
    /// platform editor found on `PATH`.
    pub fn get_editor_command(&self) -> String {
        self.editor_command
            .clone()
            .or_else(|| std::env::var("EDITOR").ok().filter(|e| !e.trim().is_empty()))
            .unwrap_or_else(platform_editor)
    }
}

fn platform_editor() -> String {
    let candidates: &[&str] = if cfg!(windows) {
        &["notepad"]
    } else if cfg!(target_os = "macos") {
        &["open -W -t"]
    } else {
        &["nano", "vim", "vi"]
    };

    candidates
        .iter()
        .find(|cmd| cmd.split_whitespace().next().is_some_and(|bin| which(bin).is_ok()))
        .or_else(|| candidates.first())
        .map(|cmd| cmd.to_string())
        .unwrap_or_default()
}
