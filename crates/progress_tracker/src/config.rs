//! Configuration for the progress tracker.
//!
//! Loads settings from `<config_dir>/tutorial-progress/config.toml` or uses
//! defaults. The course layout (which chapters make up which learning path)
//! normally mirrors the site and rarely needs overriding.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Config file name inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Named, ordered group of chapters shown as one progress ring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPath {
    pub name: String,
    pub chapters: Vec<String>,
}

impl LearningPath {
    pub fn new(name: &str, chapters: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            chapters: chapters.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Chapters and paths of the tutorial
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseLayout {
    /// Chapter count shown as the denominator of the completed label
    #[serde(default = "default_total_chapters")]
    pub total_chapters: u32,

    #[serde(default = "default_paths")]
    pub paths: Vec<LearningPath>,
}

fn default_total_chapters() -> u32 {
    22
}

fn default_paths() -> Vec<LearningPath> {
    vec![
        LearningPath::new("fundamentals", &["ch01", "ch02", "ch03", "ch04", "ch05", "ch06"]),
        LearningPath::new("intermediate", &["ch07", "ch08", "ch09", "ch10", "ch11", "ch12"]),
        LearningPath::new(
            "advanced",
            &["ch13", "ch14", "ch15", "ch16", "ch17", "ch18", "ch19"],
        ),
        LearningPath::new("expert", &["ch20", "ch21", "ch22"]),
    ]
}

impl Default for CourseLayout {
    fn default() -> Self {
        Self {
            total_chapters: default_total_chapters(),
            paths: default_paths(),
        }
    }
}

impl CourseLayout {
    pub fn path(&self, name: &str) -> Option<&LearningPath> {
        self.paths.iter().find(|p| p.name == name)
    }

    /// Reject layouts with unnamed or duplicate paths
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for path in &self.paths {
            if path.name.trim().is_empty() {
                return Err(ConfigError::Layout("path with empty name".into()));
            }
            if !seen.insert(path.name.as_str()) {
                return Err(ConfigError::Layout(format!("duplicate path '{}'", path.name)));
            }
        }
        Ok(())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Where the JSON records live, default is the user data directory
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub course: CourseLayout,
}

impl TrackerConfig {
    /// `<config_dir>/tutorial-progress/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tutorial-progress").join(CONFIG_FILE))
    }

    /// Parse and validate TOML text
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: TrackerConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.course.validate()?;
        Ok(config)
    }

    /// Load from an explicit file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content, path)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `explicit` if given, else from the default location when it
    /// exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }
}
