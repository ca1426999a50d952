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

//! # Atrium Plugins
//!
//! Resolves plugin names to instances. Plugins are either registered
//! statically by the host or loaded on demand from shared-library modules
//! found under a plugin directory.
//!
//! The [`PluginManager`] enforces each plugin's [`Instancing`] policy and only
//! keeps weak references to shared instances: a `One` plugin is constructed
//! again once every user has dropped it.
//!
//! [`Instancing`]: atrium_core::plugin::Instancing

#![warn(missing_docs)]

mod config;
mod error;
mod manager;
mod search;
mod source;

pub use config::PluginConfig;
pub use error::PluginError;
pub use manager::{InstanceRequest, PluginManager, PluginManagerBuilder};
pub use search::module_file_name;
