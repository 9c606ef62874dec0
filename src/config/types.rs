use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::defaults::{clamp_position_interval_ms, default_false, default_position_interval_ms};
use crate::catalog::CATALOG_DB_FILE_NAME;
use crate::navigation::SequencerOptions;
use crate::playback::FadeWindow;

/// Folder next to the database that holds verse audio and images.
pub const MEDIA_DIR_NAME: &str = "q_files";

/// Errors that may occur while loading or saving app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    /// No usable config directory found.
    #[error("No suitable config directory found")]
    NoConfigDir,
}

/// Settings read from `config.toml`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Catalog database; defaults to `aya.db` in the application directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
    /// Base for relative media paths; defaults to `q_files` next to the database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_root: Option<PathBuf>,
    #[serde(default = "default_false")]
    pub autoplay_on_complete: bool,
    /// How often the audio backend reports the playhead.
    #[serde(default = "default_position_interval_ms")]
    pub position_interval_ms: u64,
    #[serde(default)]
    pub fade: FadeWindow,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            media_root: None,
            autoplay_on_complete: default_false(),
            position_interval_ms: default_position_interval_ms(),
            fade: FadeWindow::default(),
        }
    }
}

impl AppConfig {
    /// Clamp out-of-range values and replace an invalid fade window.
    pub fn normalized(mut self) -> Self {
        let interval = clamp_position_interval_ms(self.position_interval_ms);
        if interval != self.position_interval_ms {
            tracing::warn!(
                requested = self.position_interval_ms,
                used = interval,
                "Position interval out of range"
            );
        }
        self.position_interval_ms = interval;
        self.fade = self.fade.normalized();
        self
    }

    pub fn position_interval(&self) -> Duration {
        Duration::from_millis(self.position_interval_ms)
    }

    pub fn sequencer_options(&self) -> SequencerOptions {
        SequencerOptions {
            fade: self.fade,
            autoplay_on_complete: self.autoplay_on_complete,
        }
    }

    /// Database path, falling back to `app_root/aya.db`.
    pub fn database_path_in(&self, app_root: &Path) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| app_root.join(CATALOG_DB_FILE_NAME))
    }

    /// Media root, falling back to `q_files` beside the database.
    pub fn media_root_for(&self, database_path: &Path) -> PathBuf {
        if let Some(root) = &self.media_root {
            return root.clone();
        }
        database_path
            .parent()
            .map(|dir| dir.join(MEDIA_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(MEDIA_DIR_NAME))
    }
}
