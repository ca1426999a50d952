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

//! Loading of dynamic plugin modules.
//!
//! The actual shared-library handling lives in the infrastructure layer; this
//! module only defines the seam so the plugin manager can be driven by any
//! loader, including in-memory ones in tests.

use super::PluginInfoFunction;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the symbol every plugin module exports.
pub const ENTRY_POINT_SYMBOL: &str = "GetPluginInfoFunction";

/// Signature of the exported entry point.
#[allow(improper_ctypes_definitions)]
pub type PluginEntryPoint = extern "C" fn() -> Option<PluginInfoFunction>;

/// Errors raised while opening a module or resolving its entry point.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// The module file does not exist.
    #[error("module not found: {0}")]
    NotFound(PathBuf),

    /// The file exists but could not be loaded as a module.
    #[error("failed to load module {path}: {reason}")]
    InvalidModule {
        /// Module file.
        path: PathBuf,
        /// Loader-provided reason.
        reason: String,
    },

    /// The module does not export the requested symbol.
    #[error("module {path} does not export '{symbol}'")]
    MissingExport {
        /// Module file.
        path: PathBuf,
        /// Symbol that was looked up.
        symbol: String,
    },

    /// The entry point returned no info function.
    #[error("module {path} returned no plugin info function")]
    NullInfoFunction {
        /// Module file.
        path: PathBuf,
    },
}

/// A module kept loaded for as long as this value lives.
///
/// Dropping it unloads the module, so every object created from the module's
/// code must be gone first.
pub trait LoadedModule: Send + Sync {
    /// Path the module was loaded from.
    fn path(&self) -> &Path;

    /// Looks up an exported entry point.
    fn resolve_entry_point(&self, symbol: &str) -> Result<PluginEntryPoint, ModuleError>;

    /// Resolves [`ENTRY_POINT_SYMBOL`] and calls it.
    fn plugin_info_function(&self) -> Result<PluginInfoFunction, ModuleError> {
        let entry_point = self.resolve_entry_point(ENTRY_POINT_SYMBOL)?;
        entry_point().ok_or_else(|| ModuleError::NullInfoFunction {
            path: self.path().to_path_buf(),
        })
    }
}

/// Opens module files.
pub trait ModuleLoader: Send + Sync {
    /// Loads the module at `path`.
    fn load(&self, path: &Path) -> Result<Box<dyn LoadedModule>, ModuleError>;
}
