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

//! Shared-library loading through `libloading`.

use atrium_core::plugin::{LoadedModule, ModuleError, ModuleLoader, PluginEntryPoint};
use libloading::Library;
use std::path::{Path, PathBuf};

/// Loads modules with the platform loader (`LoadLibrary` / `dlopen`).
#[derive(Debug, Default, Clone, Copy)]
pub struct LibloadingLoader;

impl ModuleLoader for LibloadingLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn LoadedModule>, ModuleError> {
        if !path.is_file() {
            return Err(ModuleError::NotFound(path.to_path_buf()));
        }

        // SAFETY: loading runs the module's initializers. Plugin modules are
        // trusted code built against the same `atrium-core` as the host.
        let library = unsafe { Library::new(path) }.map_err(|e| ModuleError::InvalidModule {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        log::debug!("Loaded module {}", path.display());
        Ok(Box::new(LibraryModule {
            path: path.to_path_buf(),
            library,
        }))
    }
}

/// A module kept open by `libloading`; closed when dropped.
#[derive(Debug)]
struct LibraryModule {
    path: PathBuf,
    library: Library,
}

impl LoadedModule for LibraryModule {
    fn path(&self) -> &Path {
        &self.path
    }

    fn resolve_entry_point(&self, symbol: &str) -> Result<PluginEntryPoint, ModuleError> {
        // SAFETY: the exported symbol is declared by `declare_plugin!` with
        // exactly the `PluginEntryPoint` signature. The returned function
        // pointer is only called while `self` keeps the library loaded.
        let entry = unsafe { self.library.get::<PluginEntryPoint>(symbol.as_bytes()) }.map_err(
            |_| ModuleError::MissingExport {
                path: self.path.clone(),
                symbol: symbol.to_string(),
            },
        )?;
        Ok(*entry)
    }
}

impl Drop for LibraryModule {
    fn drop(&mut self) {
        log::debug!("Unloading module {}", self.path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.so");
        assert!(matches!(
            LibloadingLoader.load(&path),
            Err(ModuleError::NotFound(p)) if p == path
        ));
    }

    #[test]
    fn garbage_file_is_an_invalid_module() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("garbage.so");
        std::fs::write(&path, b"definitely not a shared library").expect("write");

        assert!(matches!(
            LibloadingLoader.load(&path),
            Err(ModuleError::InvalidModule { .. })
        ));
    }
}
