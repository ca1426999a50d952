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

use crate::manager::InstanceRequest;
use atrium_core::plugin::{Instancing, ModuleError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while configuring the manager or resolving a plugin.
///
/// Resolution errors never escape [`PluginManager::require`]; they are logged
/// there and surface as `None`.
///
/// [`PluginManager::require`]: crate::PluginManager::require
#[derive(Debug, Error)]
pub enum PluginError {
    /// A caller-supplied value was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Dynamic loading is disabled and no static plugin has this name.
    #[error("plugin '{name}' is not registered and dynamic plugin loading is disabled")]
    NotSupported {
        /// Requested plugin.
        name: String,
    },

    /// No module file for the plugin exists under the plugin directory.
    #[error("no module for plugin '{name}' found under '{}'", root.display())]
    NotFound {
        /// Requested plugin.
        name: String,
        /// Directory that was searched.
        root: PathBuf,
    },

    /// The module could not be loaded or does not export the entry point.
    #[error(transparent)]
    Module(#[from] ModuleError),

    /// The module declined to load or described itself incompletely.
    #[error("plugin module '{}' returned invalid info (missing name or factory)", path.display())]
    InvalidInfo {
        /// Module file.
        path: PathBuf,
    },

    /// The request is incompatible with the plugin's instancing policy.
    #[error("plugin '{name}' has instancing '{instancing}' and cannot serve a {request} request")]
    PolicyMismatch {
        /// Requested plugin.
        name: String,
        /// Policy declared by the plugin.
        instancing: Instancing,
        /// What the caller asked for.
        request: InstanceRequest,
    },
}
