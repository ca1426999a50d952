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

use crate::config::PluginConfig;
use crate::error::PluginError;
use crate::search;
use crate::source::PluginSource;
use atrium_core::plugin::{interface_version, ModuleLoader, Plugin, PluginInfo, StaticPlugin};
use atrium_infra::LibloadingLoader;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// How a caller wants to share the instance it requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstanceRequest {
    /// Whatever the plugin's policy prefers: shared unless the plugin is `Unique`.
    #[default]
    Default,
    /// The shared instance. Rejected by `Unique` plugins.
    Shared,
    /// A fresh instance nobody else holds. Rejected by `One` plugins.
    Unique,
}

impl fmt::Display for InstanceRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceRequest::Default => write!(f, "default"),
            InstanceRequest::Shared => write!(f, "shared"),
            InstanceRequest::Unique => write!(f, "unique"),
        }
    }
}

/// A per-name resolution slot. Locked while that name is being resolved.
type DynamicSlot = Arc<Mutex<Option<Arc<PluginSource>>>>;

/// Resolves plugin names to instances.
///
/// Static plugins are registered up front. When a plugin directory is set,
/// names that are not registered are looked up as modules below it, loaded
/// on first use and kept loaded until the manager is dropped.
///
/// The manager is `Send + Sync`. Loading a module only blocks other requests
/// for the same name.
pub struct PluginManager {
    root: Option<PathBuf>,
    prefer_debug: bool,
    loader: Box<dyn ModuleLoader>,
    statics: RwLock<HashMap<String, Arc<PluginSource>>>,
    dynamics: Mutex<HashMap<String, DynamicSlot>>,
}

impl PluginManager {
    /// Creates a manager with the default module loader.
    ///
    /// `None` disables dynamic loading. Otherwise `plugin_directory` must be an
    /// existing directory.
    pub fn new(plugin_directory: Option<PathBuf>) -> Result<Self, PluginError> {
        let mut builder = Self::builder();
        if let Some(directory) = plugin_directory {
            builder = builder.plugin_directory(directory);
        }
        builder.build()
    }

    /// Starts a builder for a customized manager.
    pub fn builder() -> PluginManagerBuilder {
        PluginManagerBuilder::default()
    }

    /// Creates a manager from configuration.
    pub fn from_config(config: &PluginConfig) -> Result<Self, PluginError> {
        let mut builder = Self::builder();
        if let Some(directory) = &config.directory {
            builder = builder.plugin_directory(directory.clone());
        }
        if let Some(prefer_debug) = config.prefer_debug_modules {
            builder = builder.prefer_debug_modules(prefer_debug);
        }
        builder.build()
    }

    /// The directory searched for modules, if dynamic loading is enabled.
    pub fn plugin_directory(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Registers a [`StaticPlugin`] type.
    ///
    /// # Panics
    ///
    /// If the plugin's info has no name or no factory.
    pub fn register<T: StaticPlugin>(&self) {
        self.register_static_plugin(T::plugin_info(&interface_version()));
    }

    /// Registers plugin info under its name, replacing any earlier registration.
    ///
    /// # Panics
    ///
    /// If `info` has no name or no factory. Use
    /// [`try_register_static_plugin`](Self::try_register_static_plugin) for
    /// info that comes from outside the program.
    pub fn register_static_plugin(&self, info: PluginInfo) {
        if let Err(e) = self.try_register_static_plugin(info) {
            panic!("{e}");
        }
    }

    /// Registers plugin info, rejecting invalid info instead of panicking.
    pub fn try_register_static_plugin(&self, info: PluginInfo) -> Result<(), PluginError> {
        if !info.is_valid() {
            return Err(PluginError::InvalidArgument(format!(
                "static plugin '{}' provided invalid information (missing name or factory)",
                info.name
            )));
        }

        let name = info.name.clone();
        let replaced = self
            .statics
            .write()
            .insert(name.clone(), Arc::new(PluginSource::from_static(info)))
            .is_some();

        if replaced {
            log::debug!("Replaced static plugin '{name}'");
        } else {
            log::debug!("Registered static plugin '{name}'");
        }
        Ok(())
    }

    /// Returns an instance of `name` following its preferred sharing.
    ///
    /// Failures are logged and return `None`.
    pub fn require(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.require_with(name, InstanceRequest::Default)
    }

    /// Returns an instance of `name`, shared or unique as requested.
    ///
    /// Returns `None` (and logs why) if the plugin cannot be resolved, if the
    /// request conflicts with its instancing policy, or if its factory
    /// produced nothing.
    pub fn require_with(&self, name: &str, request: InstanceRequest) -> Option<Arc<dyn Plugin>> {
        let source = match self.resolve(name) {
            Ok(source) => source,
            Err(e) => {
                log_resolution_error(&e);
                return None;
            }
        };

        if let Err(e) = source.check_request(request) {
            log::warn!("{e}");
            return None;
        }

        source.instance(request)
    }

    /// Requires `name` and downcasts it to its concrete type.
    ///
    /// Returns `None` if the plugin is unavailable or is not a `T`.
    pub fn require_as<T: Plugin + 'static>(&self, name: &str) -> Option<Arc<T>> {
        let instance = self.require(name)?;
        match instance.into_any().downcast::<T>() {
            Ok(concrete) => Some(concrete),
            Err(_) => {
                log::warn!(
                    "Plugin '{name}' is not a {}",
                    std::any::type_name::<T>()
                );
                None
            }
        }
    }

    /// Returns `true` if `name` is registered, loaded, or has a module on disk.
    ///
    /// Does not load anything.
    pub fn is_available(&self, name: &str) -> bool {
        if self.statics.read().contains_key(name) {
            return true;
        }
        let Some(root) = self.root.as_deref() else {
            return false;
        };

        let slot = self.dynamics.lock().get(name).cloned();
        if let Some(slot) = slot {
            if slot.lock().is_some() {
                return true;
            }
        }
        search::find_module(root, name, self.prefer_debug).is_some()
    }

    /// Names of the plugins currently loaded from modules, sorted.
    pub fn loaded_plugin_names(&self) -> Vec<String> {
        let slots: Vec<(String, DynamicSlot)> = self
            .dynamics
            .lock()
            .iter()
            .map(|(name, slot)| (name.clone(), Arc::clone(slot)))
            .collect();

        let mut names: Vec<String> = slots
            .into_iter()
            .filter(|(_, slot)| slot.lock().is_some())
            .map(|(name, _)| name)
            .collect();
        names.sort();
        names
    }

    fn resolve(&self, name: &str) -> Result<Arc<PluginSource>, PluginError> {
        let Some(root) = self.root.as_deref() else {
            return self
                .statics
                .read()
                .get(name)
                .cloned()
                .ok_or_else(|| PluginError::NotSupported {
                    name: name.to_string(),
                });
        };

        let slot = Arc::clone(self.dynamics.lock().entry(name.to_string()).or_default());
        let resolved = {
            let mut loaded = slot.lock();
            if let Some(source) = loaded.as_ref() {
                Ok(Arc::clone(source))
            } else if let Some(source) = self.statics.read().get(name) {
                Ok(Arc::clone(source))
            } else {
                self.load(root, name).map(|source| {
                    let source = Arc::new(source);
                    *loaded = Some(Arc::clone(&source));
                    source
                })
            }
        };

        self.release_empty_slot(name, slot);
        resolved
    }

    /// Forgets the slot of `name` if nothing was loaded into it and no other
    /// request holds it.
    fn release_empty_slot(&self, name: &str, slot: DynamicSlot) {
        let mut dynamics = self.dynamics.lock();
        // One reference in the map, one in `slot`.
        if Arc::strong_count(&slot) == 2 && slot.lock().is_none() {
            dynamics.remove(name);
        }
    }

    fn load(&self, root: &Path, name: &str) -> Result<PluginSource, PluginError> {
        let path = search::find_module(root, name, self.prefer_debug).ok_or_else(|| {
            PluginError::NotFound {
                name: name.to_string(),
                root: root.to_path_buf(),
            }
        })?;

        let module = self.loader.load(&path)?;
        let info_function = module.plugin_info_function()?;
        let info = info_function(&interface_version());

        if !info.is_valid() {
            return Err(PluginError::InvalidInfo { path });
        }
        if info.name != name {
            log::warn!(
                "Module {} was required as '{name}' but calls itself '{}'",
                path.display(),
                info.name
            );
        }

        log::info!(
            "Loaded plugin '{name}' ({}) from {}",
            info.instancing,
            path.display()
        );
        Ok(PluginSource::from_module(info, module))
    }
}

fn log_resolution_error(error: &PluginError) {
    match error {
        PluginError::NotSupported { .. } | PluginError::NotFound { .. } => {
            log::warn!("{error}")
        }
        _ => log::error!("Failed to load plugin: {error}"),
    }
}

impl fmt::Debug for PluginManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginManager")
            .field("root", &self.root)
            .field("prefer_debug", &self.prefer_debug)
            .field("static_plugins", &self.statics.read().len())
            .field("loaded_plugins", &self.loaded_plugin_names())
            .finish()
    }
}

/// Builds a [`PluginManager`].
pub struct PluginManagerBuilder {
    root: Option<PathBuf>,
    prefer_debug: bool,
    loader: Option<Box<dyn ModuleLoader>>,
}

impl Default for PluginManagerBuilder {
    fn default() -> Self {
        Self {
            root: None,
            prefer_debug: cfg!(debug_assertions),
            loader: None,
        }
    }
}

impl PluginManagerBuilder {
    /// Enables dynamic loading from modules found below `directory`.
    pub fn plugin_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.root = Some(directory.into());
        self
    }

    /// Chooses whether `<name>.d` modules are looked for first.
    pub fn prefer_debug_modules(mut self, prefer: bool) -> Self {
        self.prefer_debug = prefer;
        self
    }

    /// Replaces the shared-library loader.
    pub fn module_loader(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    /// Validates the settings and creates the manager.
    pub fn build(self) -> Result<PluginManager, PluginError> {
        if let Some(root) = &self.root {
            if !root.is_dir() {
                return Err(PluginError::InvalidArgument(format!(
                    "plugin root '{}' is not a directory",
                    root.display()
                )));
            }
            log::info!("Plugin directory: {}", root.display());
        }

        Ok(PluginManager {
            root: self.root,
            prefer_debug: self.prefer_debug,
            loader: self.loader.unwrap_or_else(|| Box::new(LibloadingLoader)),
            statics: RwLock::new(HashMap::new()),
            dynamics: Mutex::new(HashMap::new()),
        })
    }
}
