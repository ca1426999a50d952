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

use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name of the module for plugin `name` on this platform.
///
/// `foo` maps to `foo.dll` on Windows, `libfoo.so` on Linux and
/// `libfoo.dylib` on macOS; debug builds insert `.d` before the extension.
pub fn module_file_name(name: &str, debug: bool) -> String {
    let tag = if debug { ".d" } else { "" };
    format!("{DLL_PREFIX}{name}{tag}{DLL_SUFFIX}")
}

/// Searches `root` recursively for the module of plugin `name`.
pub(crate) fn find_module(root: &Path, name: &str, prefer_debug: bool) -> Option<PathBuf> {
    if prefer_debug {
        if let Some(path) = find_file(root, &module_file_name(name, true)) {
            return Some(path);
        }
    }
    find_file(root, &module_file_name(name, false))
}

fn find_file(root: &Path, file_name: &str) -> Option<PathBuf> {
    let file_name = OsStr::new(file_name);
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("Skipping unreadable plugin directory entry: {e}");
                None
            }
        })
        .find(|entry| entry.file_type().is_file() && entry.file_name() == file_name)
        .map(|entry| entry.into_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_modules_in_nested_directories() {
        let root = tempfile::tempdir().expect("temp dir");
        let nested = root.path().join("a").join("b");
        fs::create_dir_all(&nested).expect("create dirs");
        fs::write(nested.join(module_file_name("foo", false)), b"").expect("write");

        assert_eq!(
            find_module(root.path(), "foo", false),
            Some(nested.join(module_file_name("foo", false)))
        );
        assert_eq!(find_module(root.path(), "bar", false), None);
    }

    #[test]
    fn debug_module_is_preferred_only_when_asked() {
        let root = tempfile::tempdir().expect("temp dir");
        let release = root.path().join(module_file_name("foo", false));
        let debug = root.path().join(module_file_name("foo", true));
        fs::write(&release, b"").expect("write");
        fs::write(&debug, b"").expect("write");

        assert_eq!(find_module(root.path(), "foo", true), Some(debug));
        assert_eq!(find_module(root.path(), "foo", false), Some(release));
    }

    #[test]
    fn falls_back_to_release_module() {
        let root = tempfile::tempdir().expect("temp dir");
        let release = root.path().join(module_file_name("foo", false));
        fs::write(&release, b"").expect("write");

        assert_eq!(find_module(root.path(), "foo", true), Some(release));
    }

    #[test]
    fn directories_named_like_modules_are_ignored() {
        let root = tempfile::tempdir().expect("temp dir");
        fs::create_dir(root.path().join(module_file_name("foo", false))).expect("mkdir");
        assert_eq!(find_module(root.path(), "foo", false), None);
    }
}
