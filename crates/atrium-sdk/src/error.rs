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

//! Errors raised while building an engine instance.

use crate::config::ConfigError;
use atrium_plugins::PluginError;
use thiserror::Error;

/// Errors that prevent an engine instance from being built.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No platform backend was supplied and the null fallback is disabled.
    #[error("no platform backends are available and the null platform fallback is disabled")]
    UnsupportedPlatform,

    /// The plugin manager could not be created.
    #[error("failed to set up plugins: {0}")]
    Plugins(#[from] PluginError),

    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
