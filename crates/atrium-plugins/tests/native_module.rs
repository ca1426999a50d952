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

//! Loads the `hello-plugin` demo through the real `libloading` loader.
//!
//! Build the module first, then run the ignored tests:
//!
//! ```text
//! cargo build -p hello-plugin
//! cargo test -p atrium-plugins --test native_module -- --ignored
//! ```
//!
//! `ATRIUM_HELLO_MODULE` may point at the built library directly.

use atrium_plugins::{module_file_name, PluginManager};
use std::path::PathBuf;
use std::sync::Arc;

/// The built `hello` module, next to this test binary or named by the
/// environment.
fn built_hello_module() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("ATRIUM_HELLO_MODULE") {
        return Some(PathBuf::from(path));
    }
    // target/<profile>/deps/<test binary>
    let exe = std::env::current_exe().ok()?;
    let deps = exe.parent()?;
    let file_name = module_file_name("hello", false);
    let found = [Some(deps), deps.parent()]
        .into_iter()
        .flatten()
        .map(|dir| dir.join(&file_name))
        .find(|path| path.is_file());
    found
}

#[test]
#[ignore = "needs `cargo build -p hello-plugin`"]
fn hello_module_loads_and_is_shared() {
    let module = built_hello_module().expect("hello module built");
    let root = tempfile::tempdir().expect("temp dir");
    let installed = root.path().join("hello").join(module_file_name("hello", false));
    std::fs::create_dir_all(installed.parent().expect("has parent")).expect("create dir");
    std::fs::copy(&module, &installed).expect("copy module");

    let manager = PluginManager::builder()
        .plugin_directory(root.path())
        .prefer_debug_modules(false)
        .build()
        .expect("root exists");

    let first = manager.require("hello").expect("hello resolves");
    let second = manager.require("hello").expect("hello resolves again");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(manager.loaded_plugin_names(), vec!["hello".to_string()]);

    // Instances go before the module that holds their code.
    drop(first);
    drop(second);
    drop(manager);
}

#[test]
#[ignore = "needs `cargo build -p hello-plugin`"]
fn other_names_do_not_match_the_hello_module() {
    let module = built_hello_module().expect("hello module built");
    let root = tempfile::tempdir().expect("temp dir");
    std::fs::copy(&module, root.path().join(module_file_name("hello", false)))
        .expect("copy module");

    let manager = PluginManager::builder()
        .plugin_directory(root.path())
        .build()
        .expect("root exists");

    assert!(manager.require("goodbye").is_none());
    assert!(manager.loaded_plugin_names().is_empty());
}
