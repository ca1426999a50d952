// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Engine configuration, stored as RON.
//!
//! ```ron
//! (
//!     allow_null_platform: true,
//!     log_filter: "info,atrium_plugins=debug",
//!     stats_interval_secs: 5.0,
//!     plugins: (
//!         directory: Some("plugins"),
//!     ),
//! )
//! ```

use atrium_plugins::{PluginConfig, PluginError, PluginManager};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while reading or writing an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("failed to access config file '{}': {source}", path.display())]
    Io {
        /// The config file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The text is not a valid configuration.
    #[error("invalid engine config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// The configuration could not be serialized.
    #[error("failed to serialize engine config: {0}")]
    Serialize(#[from] ron::Error),
}

/// Settings read once when the engine is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Substitute null subsystems when the platform supplies none.
    pub allow_null_platform: bool,
    /// `env_logger` filter used by [`init_logging`](crate::logging::init_logging).
    pub log_filter: String,
    /// Seconds between frame statistics summaries. `0` disables them.
    pub stats_interval_secs: f64,
    /// Plugin settings.
    pub plugins: PluginConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            allow_null_platform: true,
            log_filter: "info".to_string(),
            stats_interval_secs: 5.0,
            plugins: PluginConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parses a RON document. Missing fields keep their defaults.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Reads a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&text)?;
        log::debug!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Serializes to pretty RON.
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Writes the configuration as a RON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_ron_string()?).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Creates the plugin manager described by [`plugins`](Self::plugins).
    pub fn plugin_manager(&self) -> Result<PluginManager, PluginError> {
        PluginManager::from_config(&self.plugins)
    }

    /// The frame statistics interval, or `None` when disabled.
    ///
    /// Values that do not fit in a [`Duration`] (NaN, infinite, too large)
    /// disable the summary as well.
    pub fn stats_interval(&self) -> Option<Duration> {
        if self.stats_interval_secs <= 0.0 {
            return None;
        }
        Duration::try_from_secs_f64(self.stats_interval_secs).ok()
    }
}
