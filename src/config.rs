// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jason Ish

//! Optional user configuration, stored as TOML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::source::DEFAULT_FILE_NAME;

const CONFIG_DIR_NAME: &str = "product-version";
const CONFIG_FILE_NAME: &str = "config.toml";

pub const DEFAULT_REPOSITORY: &str = "alexboutros/numbers";
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Which document the version is read from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Embedded,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UpdateSettings {
    /// GitHub repository in `owner/name` form.
    pub repository: String,
    pub api_base: String,
}

impl Default for UpdateSettings {
    fn default() -> Self {
        Self {
            repository: DEFAULT_REPOSITORY.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl UpdateSettings {
    pub fn latest_release_url(&self) -> String {
        format!(
            "{}/repos/{}/releases/latest",
            self.api_base.trim_end_matches('/'),
            self.repository
        )
    }

    pub fn release_page_url(&self, tag: &str) -> String {
        format!("https://github.com/{}/releases/tag/{}", self.repository, tag)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub source: SourceKind,
    /// Document path when `source = "file"`.
    pub path: PathBuf,
    pub update: UpdateSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            path: PathBuf::from(DEFAULT_FILE_NAME),
            update: UpdateSettings::default(),
        }
    }
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from the default location, falling back to defaults when there
    /// is no config directory or no file.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_optional(&path),
            None => {
                debug!("no config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load `path` if it exists, otherwise return defaults.
    pub fn load_optional(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load `path`, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
