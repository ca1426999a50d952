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

mod common;

use atrium_core::plugin::{Instancing, Plugin, PluginInfo, PluginInfoFunction, SemanticVersion};
use atrium_plugins::{module_file_name, PluginManager};
use common::{capture_warnings, touch_module, FakeLoader};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

static NEXT_SERIAL: AtomicUsize = AtomicUsize::new(0);

struct Foo {
    serial: usize,
}
impl Plugin for Foo {}

struct DebugFoo;
impl Plugin for DebugFoo {}

fn foo_info(_interface: &SemanticVersion) -> PluginInfo {
    PluginInfo::new("foo", Instancing::One).with_constructor(|| Foo {
        serial: NEXT_SERIAL.fetch_add(1, Ordering::SeqCst),
    })
}

fn debug_foo_info(_interface: &SemanticVersion) -> PluginInfo {
    PluginInfo::new("foo", Instancing::One).with_constructor(|| DebugFoo)
}

fn declining_info(_interface: &SemanticVersion) -> PluginInfo {
    PluginInfo::new("shy", Instancing::One)
}

fn misnamed_info(_interface: &SemanticVersion) -> PluginInfo {
    PluginInfo::new("something-else", Instancing::AllowMultiple).with_constructor(|| DebugFoo)
}

#[allow(improper_ctypes_definitions)]
extern "C" fn foo_entry() -> Option<PluginInfoFunction> {
    Some(foo_info)
}

#[allow(improper_ctypes_definitions)]
extern "C" fn debug_foo_entry() -> Option<PluginInfoFunction> {
    Some(debug_foo_info)
}

#[allow(improper_ctypes_definitions)]
extern "C" fn declining_entry() -> Option<PluginInfoFunction> {
    Some(declining_info)
}

#[allow(improper_ctypes_definitions)]
extern "C" fn misnamed_entry() -> Option<PluginInfoFunction> {
    Some(misnamed_info)
}

#[allow(improper_ctypes_definitions)]
extern "C" fn null_entry() -> Option<PluginInfoFunction> {
    None
}

fn plugin_root() -> TempDir {
    tempfile::tempdir().expect("temp dir")
}

fn manager_with(root: &TempDir, loader: FakeLoader) -> PluginManager {
    PluginManager::builder()
        .plugin_directory(root.path())
        .prefer_debug_modules(false)
        .module_loader(loader)
        .build()
        .expect("plugin root exists")
}

#[test]
fn shared_module_instance_is_recreated_after_release() {
    let root = plugin_root();
    touch_module(root.path(), "foo", false);
    let loader = FakeLoader::new().with_module(module_file_name("foo", false), foo_entry);
    let stats = Arc::clone(&loader.stats);
    let manager = manager_with(&root, loader);

    let first = manager.require("foo").expect("module found");
    let second = manager.require("foo").expect("module found");
    assert!(Arc::ptr_eq(&first, &second));

    let old_serial = manager.require_as::<Foo>("foo").expect("foo").serial;
    drop(first);
    drop(second);

    let third = manager.require_as::<Foo>("foo").expect("module still loaded");
    assert_ne!(third.serial, old_serial);
    assert_eq!(stats.loads(), 1);
    assert_eq!(manager.loaded_plugin_names(), vec!["foo".to_string()]);
}

#[test]
fn modules_are_found_in_subdirectories() {
    let root = plugin_root();
    let nested = root.path().join("vendor").join("bin");
    std::fs::create_dir_all(&nested).expect("create dirs");
    touch_module(&nested, "foo", false);

    let manager = manager_with(
        &root,
        FakeLoader::new().with_module(module_file_name("foo", false), foo_entry),
    );

    assert!(manager.require_as::<Foo>("foo").is_some());
}

#[test]
fn debug_module_is_preferred_when_requested() {
    let root = plugin_root();
    touch_module(root.path(), "foo", false);
    touch_module(root.path(), "foo", true);
    let loader = || {
        FakeLoader::new()
            .with_module(module_file_name("foo", false), foo_entry)
            .with_module(module_file_name("foo", true), debug_foo_entry)
    };

    let debug = PluginManager::builder()
        .plugin_directory(root.path())
        .prefer_debug_modules(true)
        .module_loader(loader())
        .build()
        .expect("plugin root exists");
    assert!(debug.require_as::<DebugFoo>("foo").is_some());

    let release = manager_with(&root, loader());
    assert!(release.require_as::<Foo>("foo").is_some());
}

#[test]
fn missing_module_logs_once_and_is_not_cached() {
    let root = plugin_root();
    let manager = manager_with(
        &root,
        FakeLoader::new().with_module(module_file_name("foo", false), foo_entry),
    );

    let (instance, warnings) = capture_warnings(|| manager.require("foo"));
    assert!(instance.is_none());
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(manager.loaded_plugin_names().is_empty());

    touch_module(root.path(), "foo", false);
    assert!(manager.require("foo").is_some());
}

#[test]
fn does_not_exist_yields_none_with_a_single_log() {
    let root = plugin_root();
    let manager = manager_with(&root, FakeLoader::new());

    let (instance, warnings) = capture_warnings(|| manager.require("does-not-exist"));

    assert!(instance.is_none());
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].1.contains("does-not-exist"));
}

#[test]
fn module_without_entry_point_is_released() {
    let root = plugin_root();
    touch_module(root.path(), "broken", false);
    let loader = FakeLoader::new().with_empty_module(module_file_name("broken", false));
    let stats = Arc::clone(&loader.stats);
    let manager = manager_with(&root, loader);

    let (instance, warnings) = capture_warnings(|| manager.require("broken"));

    assert!(instance.is_none());
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].0, log::Level::Error);
    assert_eq!(stats.loads(), 1);
    assert_eq!(stats.unloads(), 1);
}

#[test]
fn null_info_function_is_rejected() {
    let root = plugin_root();
    touch_module(root.path(), "null", false);
    let manager = manager_with(
        &root,
        FakeLoader::new().with_module(module_file_name("null", false), null_entry),
    );

    let (instance, warnings) = capture_warnings(|| manager.require("null"));
    assert!(instance.is_none());
    assert_eq!(warnings.len(), 1);
}

#[test]
fn plugin_can_decline_by_omitting_its_factory() {
    let root = plugin_root();
    touch_module(root.path(), "shy", false);
    let loader = FakeLoader::new().with_module(module_file_name("shy", false), declining_entry);
    let stats = Arc::clone(&loader.stats);
    let manager = manager_with(&root, loader);

    let (instance, warnings) = capture_warnings(|| manager.require("shy"));

    assert!(instance.is_none());
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].1.contains("invalid info"));
    assert_eq!(stats.unloads(), 1);
    assert!(manager.loaded_plugin_names().is_empty());
}

#[test]
fn mismatched_module_name_is_cached_under_the_requested_name() {
    let root = plugin_root();
    touch_module(root.path(), "alias", false);
    let loader = FakeLoader::new().with_module(module_file_name("alias", false), misnamed_entry);
    let stats = Arc::clone(&loader.stats);
    let manager = manager_with(&root, loader);

    let (instance, warnings) = capture_warnings(|| manager.require("alias"));
    assert!(instance.is_some());
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].1.contains("something-else"));

    assert!(manager.require("alias").is_some());
    assert_eq!(stats.loads(), 1);
    assert_eq!(manager.loaded_plugin_names(), vec!["alias".to_string()]);
}

#[test]
fn static_plugins_resolve_alongside_a_plugin_directory() {
    let root = plugin_root();
    let loader = FakeLoader::new();
    let stats = Arc::clone(&loader.stats);
    let manager = manager_with(&root, loader);
    manager.register_static_plugin(
        PluginInfo::new("bar", Instancing::Unique).with_constructor(|| DebugFoo),
    );

    let a = manager.require("bar").expect("static");
    let b = manager.require("bar").expect("static");
    let c = manager.require("bar").expect("static");
    assert!(!Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&b, &c));
    assert_eq!(stats.loads(), 0);
    assert!(manager.loaded_plugin_names().is_empty());
}

#[test]
fn is_available_does_not_load() {
    let root = plugin_root();
    touch_module(root.path(), "foo", false);
    let loader = FakeLoader::new().with_module(module_file_name("foo", false), foo_entry);
    let stats = Arc::clone(&loader.stats);
    let manager = manager_with(&root, loader);

    assert!(manager.is_available("foo"));
    assert!(!manager.is_available("bar"));
    assert_eq!(stats.loads(), 0);
    assert_eq!(manager.plugin_directory(), Some(root.path()));
}

#[test]
fn modules_unload_with_the_manager() {
    let root = plugin_root();
    touch_module(root.path(), "foo", false);
    let loader = FakeLoader::new().with_module(module_file_name("foo", false), foo_entry);
    let stats = Arc::clone(&loader.stats);
    let manager = manager_with(&root, loader);

    drop(manager.require("foo").expect("module found"));
    drop(manager);

    assert_eq!(stats.loads(), 1);
    assert_eq!(stats.unloads(), 1);
}

#[test]
fn module_stays_loaded_while_instances_outlive_the_manager() {
    let root = plugin_root();
    touch_module(root.path(), "foo", false);
    let loader = FakeLoader::new().with_module(module_file_name("foo", false), foo_entry);
    let stats = Arc::clone(&loader.stats);
    let manager = manager_with(&root, loader);

    let survivor = manager.require("foo").expect("module found");
    let (_, warnings) = capture_warnings(move || drop(manager));

    assert_eq!(stats.unloads(), 0);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].1.contains("foo"));
    drop(survivor);
}

#[test]
fn from_config_enables_dynamic_loading() {
    let root = plugin_root();
    let config = atrium_plugins::PluginConfig {
        directory: Some(root.path().to_path_buf()),
        prefer_debug_modules: Some(false),
    };
    let manager = PluginManager::from_config(&config).expect("plugin root exists");
    assert_eq!(manager.plugin_directory(), Some(root.path()));

    let disabled = PluginManager::from_config(&Default::default()).expect("no root");
    assert!(disabled.plugin_directory().is_none());
}
