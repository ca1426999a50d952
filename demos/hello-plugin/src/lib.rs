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

//! A plugin module resolved by the name `hello`.
//!
//! Build it and copy the resulting library (`libhello.so`, `hello.dll`,
//! `libhello.dylib`) into the plugin directory of the engine config.

use atrium_core::declare_plugin;
use atrium_core::plugin::{Instancing, Plugin, PluginInfo, SemanticVersion, StaticPlugin};

/// The interface this module was written against.
const SUPPORTED_INTERFACE: SemanticVersion = SemanticVersion::new(0, 0, 0);

/// Greets whoever asks.
#[derive(Debug, Default)]
pub struct Hello {
    greeting: String,
}

impl Hello {
    /// The greeting.
    pub fn greeting(&self) -> &str {
        &self.greeting
    }
}

impl Plugin for Hello {}

impl StaticPlugin for Hello {
    fn plugin_info(interface: &SemanticVersion) -> PluginInfo {
        // Declining is done by leaving the factory out.
        if interface.major != SUPPORTED_INTERFACE.major {
            return PluginInfo::new("hello", Instancing::One);
        }
        PluginInfo::new("hello", Instancing::One).with_constructor(|| Hello {
            greeting: "Hello from a plugin module".to_string(),
        })
    }
}

declare_plugin!(Hello);
