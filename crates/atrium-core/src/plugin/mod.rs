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

//! Plugin contracts shared by the host and by plugin modules.
//!
//! # Writing a plugin
//!
//! Implement [`Plugin`] for the plugin type and [`StaticPlugin`] to describe how
//! it is constructed. Linking it statically only requires registering it with
//! the plugin manager. To ship it as a dynamic module, build the crate as a
//! `cdylib` and invoke [`declare_plugin!`](crate::declare_plugin) once:
//!
//! ```rust,ignore
//! use atrium_core::plugin::{Instancing, Plugin, PluginInfo, SemanticVersion, StaticPlugin};
//!
//! #[derive(Default)]
//! struct Greeter;
//!
//! impl Plugin for Greeter {}
//!
//! impl StaticPlugin for Greeter {
//!     fn plugin_info(_interface: &SemanticVersion) -> PluginInfo {
//!         PluginInfo::new("greeter", Instancing::One).with_constructor(Greeter::default)
//!     }
//! }
//!
//! atrium_core::declare_plugin!(Greeter);
//! ```
//!
//! Dynamic modules exchange Rust types with the host, so they must be built
//! with the same compiler and the same `atrium-core` version.

mod module;
mod version;

pub use module::{LoadedModule, ModuleError, ModuleLoader, PluginEntryPoint, ENTRY_POINT_SYMBOL};
pub use version::{SemanticVersion, VersionParseError};

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Basic interface for an engine plugin.
///
/// Instances are shared as `Arc<dyn Plugin>`. The concrete type is recovered
/// through [`PluginAny`], which every `'static` type implements.
pub trait Plugin: PluginAny + Send + Sync {}

/// Type-erasure helpers for plugin instances.
pub trait PluginAny {
    /// Borrows the instance as `dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Converts a shared instance into a shared `dyn Any`.
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> PluginAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Creates a new plugin instance.
pub type PluginFactory = Arc<dyn Fn() -> Arc<dyn Plugin> + Send + Sync>;

/// The sharing contract of a plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Instancing {
    /// Each reference is a unique instance.
    Unique,
    /// Only one instance exists at a time and it is shared across all users.
    #[default]
    One,
    /// A single instance is shared by default, additional instances are created
    /// when explicitly requested.
    AllowMultiple,
}

impl fmt::Display for Instancing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instancing::Unique => write!(f, "unique"),
            Instancing::One => write!(f, "one"),
            Instancing::AllowMultiple => write!(f, "allow-multiple"),
        }
    }
}

/// Contains the information required for a plugin to be created and used.
#[derive(Clone, Default)]
pub struct PluginInfo {
    /// The plugin's name, used to resolve it.
    pub name: String,
    /// The sharing contract.
    pub instancing: Instancing,
    /// Creates an instance. A plugin can refuse to load by leaving this empty.
    pub create: Option<PluginFactory>,
}

impl PluginInfo {
    /// Info without a factory. Attach one with [`with_factory`](Self::with_factory)
    /// or [`with_constructor`](Self::with_constructor).
    pub fn new(name: impl Into<String>, instancing: Instancing) -> Self {
        Self {
            name: name.into(),
            instancing,
            create: None,
        }
    }

    /// Sets a factory returning type-erased instances.
    pub fn with_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Arc<dyn Plugin> + Send + Sync + 'static,
    {
        self.create = Some(Arc::new(factory));
        self
    }

    /// Sets a factory from a constructor of the concrete plugin type.
    pub fn with_constructor<T, F>(self, constructor: F) -> Self
    where
        T: Plugin + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.with_factory(move || Arc::new(constructor()) as Arc<dyn Plugin>)
    }

    /// A plugin is usable when it has both a name and a factory.
    pub fn is_valid(&self) -> bool {
        self.create.is_some() && !self.name.is_empty()
    }

    /// Runs the factory, if any.
    pub fn create_instance(&self) -> Option<Arc<dyn Plugin>> {
        self.create.as_ref().map(|create| create())
    }
}

impl fmt::Debug for PluginInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginInfo")
            .field("name", &self.name)
            .field("instancing", &self.instancing)
            .field("has_factory", &self.create.is_some())
            .finish()
    }
}

/// A plugin type that can describe itself.
///
/// Used both for static registration and by [`declare_plugin!`](crate::declare_plugin).
pub trait StaticPlugin {
    /// Returns the plugin's info for the host's plugin interface version.
    ///
    /// Returning info without a factory tells the host not to load the plugin,
    /// e.g. when `interface` is not compatible.
    fn plugin_info(interface: &SemanticVersion) -> PluginInfo;
}

/// Signature of the function a plugin module hands to the host.
pub type PluginInfoFunction = fn(&SemanticVersion) -> PluginInfo;

/// The plugin interface version the host passes to plugin info functions.
pub fn interface_version() -> SemanticVersion {
    SemanticVersion::new(0, 0, 0).with_pre_release("wip")
}

/// Exports a [`StaticPlugin`] type from a dynamic module.
///
/// Generates the C-linkage `GetPluginInfoFunction` symbol the host looks up.
#[macro_export]
macro_rules! declare_plugin {
    ($plugin:ty) => {
        #[no_mangle]
        #[allow(non_snake_case, improper_ctypes_definitions)]
        pub extern "C" fn GetPluginInfoFunction(
        ) -> ::core::option::Option<$crate::plugin::PluginInfoFunction> {
            ::core::option::Option::Some(
                <$plugin as $crate::plugin::StaticPlugin>::plugin_info,
            )
        }
    };
}
