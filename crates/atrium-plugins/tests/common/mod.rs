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

//! Shared helpers for the plugin manager integration tests.

#![allow(dead_code)]

use atrium_core::plugin::{LoadedModule, ModuleError, ModuleLoader, PluginEntryPoint};
use log::{Level, LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::thread::{self, ThreadId};

// --- Log capture ---

struct CaptureLogger {
    records: Mutex<Vec<(ThreadId, Level, String)>>,
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records.lock().push((
            thread::current().id(),
            record.level(),
            record.args().to_string(),
        ));
    }

    fn flush(&self) {}
}

fn take_thread_records() -> Vec<(Level, String)> {
    let id = thread::current().id();
    let mut records = LOGGER.records.lock();
    let (mine, others): (Vec<_>, Vec<_>) =
        records.drain(..).partition(|(thread, _, _)| *thread == id);
    *records = others;
    mine.into_iter()
        .map(|(_, level, message)| (level, message))
        .collect()
}

/// Runs `f` and returns what it logged at warning level or above on this thread.
pub fn capture_warnings<R>(f: impl FnOnce() -> R) -> (R, Vec<(Level, String)>) {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });

    take_thread_records();
    let result = f();
    let warnings = take_thread_records()
        .into_iter()
        .filter(|(level, _)| *level <= Level::Warn)
        .collect();
    (result, warnings)
}

// --- Fake module loading ---

/// Counts loads and unloads of fake modules.
#[derive(Debug, Default)]
pub struct ModuleStats {
    pub loads: AtomicUsize,
    pub unloads: AtomicUsize,
}

impl ModuleStats {
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn unloads(&self) -> usize {
        self.unloads.load(Ordering::SeqCst)
    }
}

/// Serves module files by file name from a table of in-process entry points.
///
/// The file must still exist on disk so the manager's search finds it.
#[derive(Default)]
pub struct FakeLoader {
    entries: HashMap<String, Option<PluginEntryPoint>>,
    pub stats: Arc<ModuleStats>,
}

impl FakeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// `file_name` loads and exports `entry`.
    pub fn with_module(mut self, file_name: impl Into<String>, entry: PluginEntryPoint) -> Self {
        self.entries.insert(file_name.into(), Some(entry));
        self
    }

    /// `file_name` loads but exports nothing.
    pub fn with_empty_module(mut self, file_name: impl Into<String>) -> Self {
        self.entries.insert(file_name.into(), None);
        self
    }
}

impl ModuleLoader for FakeLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn LoadedModule>, ModuleError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();

        let Some(entry) = self.entries.get(file_name) else {
            return Err(ModuleError::InvalidModule {
                path: path.to_path_buf(),
                reason: "not a fake module".to_string(),
            });
        };

        self.stats.loads.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeModule {
            path: path.to_path_buf(),
            entry: *entry,
            stats: Arc::clone(&self.stats),
        }))
    }
}

struct FakeModule {
    path: PathBuf,
    entry: Option<PluginEntryPoint>,
    stats: Arc<ModuleStats>,
}

impl LoadedModule for FakeModule {
    fn path(&self) -> &Path {
        &self.path
    }

    fn resolve_entry_point(&self, symbol: &str) -> Result<PluginEntryPoint, ModuleError> {
        self.entry.ok_or_else(|| ModuleError::MissingExport {
            path: self.path.clone(),
            symbol: symbol.to_string(),
        })
    }
}

impl Drop for FakeModule {
    fn drop(&mut self) {
        self.stats.unloads.fetch_add(1, Ordering::SeqCst);
    }
}

/// Creates an empty file named like the module of `name`.
pub fn touch_module(dir: &Path, name: &str, debug: bool) -> PathBuf {
    let path = dir.join(atrium_plugins::module_file_name(name, debug));
    std::fs::write(&path, b"").expect("write module file");
    path
}
