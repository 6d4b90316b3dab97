use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "OBJECTIVE_TRACKER_DATA_DIR";
pub const CONFIG_FILE: &str = "config.toml";

/// The reporting window the dashboard is organised around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quarter {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Quarter {
    /// Days from `today` until the quarter ends, if it has not ended.
    pub fn days_left(&self, today: NaiveDate) -> Option<i64> {
        (today < self.end).then(|| (self.end - today).num_days())
    }

    /// First day of every month the quarter touches.
    pub fn months(&self) -> Vec<NaiveDate> {
        use chrono::Datelike;
        let mut months = Vec::new();
        let mut cursor = NaiveDate::from_ymd_opt(self.start.year(), self.start.month(), 1);
        while let Some(month) = cursor {
            if month > self.end {
                break;
            }
            months.push(month);
            cursor = month.checked_add_months(chrono::Months::new(1));
        }
        months
    }
}

impl Default for Quarter {
    fn default() -> Self {
        Self {
            label: "Q1 2026".to_string(),
            start: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap_or_default(),
        }
    }
}

/// Resolved application settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub quarter: Quarter,
    /// Owner choices offered by the project editor.
    pub owners: Vec<String>,
    /// Choices for the team member picker.
    pub team_members: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            quarter: Quarter::default(),
            owners: vec![
                "Production Manager".to_string(),
                "Supply Chain Manager".to_string(),
                "Other".to_string(),
            ],
            team_members: [
                "Production Manager",
                "Supply Chain Manager",
                "Legal",
                "Finance",
                "QA Team",
                "Sales Team",
                "Production Team",
                "IT",
                "Facilities",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    quarter: Option<QuarterFile>,
    owners: Option<Vec<String>>,
    team_members: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct QuarterFile {
    label: String,
    start: NaiveDate,
    end: NaiveDate,
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "objective-tracker")
}

fn default_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Location of `config.toml` in the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

impl AppConfig {
    /// Defaults, then `config.toml` if present, then the environment.
    /// A broken config file is logged and skipped.
    pub fn resolve() -> Self {
        let mut config = Self::default();
        if let Some(path) = default_config_path().filter(|p| p.exists()) {
            match Self::read_file(&path) {
                Ok(file) => config.merge(file),
                Err(e) => tracing::warn!(error = %e, "ignoring config file"),
            }
        }
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        tracing::info!(data_dir = %config.data_dir.display(), quarter = %config.quarter.label, "configuration resolved");
        config
    }

    /// Defaults overlaid with the file at `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.merge(Self::read_file(path)?);
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<ConfigFile> {
        let text = std::fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&text).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if let Some(q) = &file.quarter {
            if q.end < q.start {
                return Err(Error::Config {
                    path: path.to_path_buf(),
                    message: format!("quarter ends ({}) before it starts ({})", q.end, q.start),
                });
            }
        }
        Ok(file)
    }

    fn merge(&mut self, file: ConfigFile) {
        if let Some(dir) = file.data_dir {
            self.data_dir = dir;
        }
        if let Some(q) = file.quarter {
            self.quarter = Quarter {
                label: q.label,
                start: q.start,
                end: q.end,
            };
        }
        if let Some(owners) = file.owners.filter(|o| !o.is_empty()) {
            self.owners = owners;
        }
        if let Some(members) = file.team_members {
            self.team_members = members;
        }
    }
}
