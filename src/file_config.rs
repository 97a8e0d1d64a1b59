use crate::error::Result;
use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration loaded from JSON file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl FileConfig {
    /// Load config from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from_path(path: &Path) -> Result<Self> {
        debug!("Loading config from: {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        let config: FileConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with fallback priority:
    /// 1. Explicit path (if provided)
    /// 2. Project directory (./nextcloud-upload.json or ./.nextcloud-upload/config.json)
    /// 3. User config directory (~/.config/nextcloud-upload/config.json)
    ///
    /// # Errors
    ///
    /// Returns an error only if an explicit path is provided but cannot be read
    pub fn load_with_fallback(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::load_from_path(path);
        }

        let mut candidates = vec![
            PathBuf::from("./nextcloud-upload.json"),
            PathBuf::from("./.nextcloud-upload/config.json"),
        ];
        if let Some(proj_dirs) = ProjectDirs::from("", "", "nextcloud-upload") {
            candidates.push(proj_dirs.config_dir().join("config.json"));
        }

        Ok(Self::load_first(&candidates))
    }

    /// First candidate that exists and parses; unreadable files are skipped
    fn load_first(candidates: &[PathBuf]) -> Self {
        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_path(path) {
                Ok(config) => {
                    debug!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    debug!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }

        debug!("No config file found, using defaults");
        FileConfig::default()
    }

    /// Merge with another config, preferring values from self
    #[must_use]
    pub fn merge_with(&self, other: &FileConfig) -> Self {
        FileConfig {
            share_url: self.share_url.clone().or_else(|| other.share_url.clone()),
            password: self.password.clone().or_else(|| other.password.clone()),
        }
    }
}
