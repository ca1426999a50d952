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

//! One resolved plugin: its info, the module it came from, and the weak
//! references to the instances it created.

use crate::error::PluginError;
use crate::manager::InstanceRequest;
use atrium_core::plugin::{Instancing, LoadedModule, Plugin, PluginInfo};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

pub(crate) struct PluginSource {
    info: PluginInfo,
    /// Cache of the shared instance. Never keeps it alive.
    shared: Mutex<Option<Weak<dyn Plugin>>>,
    /// Every instance handed out, shared or unique, to know if the module can be unloaded.
    live: Mutex<Vec<Weak<dyn Plugin>>>,
    module: Option<Box<dyn LoadedModule>>,
}

impl PluginSource {
    pub(crate) fn from_static(info: PluginInfo) -> Self {
        Self::new(info, None)
    }

    pub(crate) fn from_module(info: PluginInfo, module: Box<dyn LoadedModule>) -> Self {
        Self::new(info, Some(module))
    }

    fn new(info: PluginInfo, module: Option<Box<dyn LoadedModule>>) -> Self {
        Self {
            info,
            shared: Mutex::new(None),
            live: Mutex::new(Vec::new()),
            module,
        }
    }

    /// Checks `request` against the instancing policy.
    pub(crate) fn check_request(&self, request: InstanceRequest) -> Result<(), PluginError> {
        match (self.info.instancing, request) {
            (Instancing::One, InstanceRequest::Unique)
            | (Instancing::Unique, InstanceRequest::Shared) => Err(PluginError::PolicyMismatch {
                name: self.info.name.clone(),
                instancing: self.info.instancing,
                request,
            }),
            _ => Ok(()),
        }
    }

    /// Returns an instance for an already validated request.
    pub(crate) fn instance(&self, request: InstanceRequest) -> Option<Arc<dyn Plugin>> {
        if self.info.instancing == Instancing::Unique || request == InstanceRequest::Unique {
            return self.create_tracked();
        }

        // Held across construction so concurrent requests cannot both construct.
        let mut shared = self.shared.lock();
        if let Some(instance) = shared.as_ref().and_then(Weak::upgrade) {
            return Some(instance);
        }

        let instance = self.create_tracked()?;
        *shared = Some(Arc::downgrade(&instance));
        log::debug!("Created shared instance of plugin '{}'", self.info.name);
        Some(instance)
    }

    fn create_tracked(&self) -> Option<Arc<dyn Plugin>> {
        let instance = self.info.create_instance()?;
        let mut live = self.live.lock();
        live.retain(|weak| weak.strong_count() > 0);
        live.push(Arc::downgrade(&instance));
        Some(instance)
    }

    fn has_live_instances(&self) -> bool {
        self.live.lock().iter().any(|weak| weak.strong_count() > 0)
    }
}

impl Drop for PluginSource {
    fn drop(&mut self) {
        let Some(module) = self.module.take() else {
            return;
        };

        let leak = self.has_live_instances();

        // Everything that may point into the module's code goes first.
        self.shared.lock().take();
        self.live.lock().clear();
        self.info.create = None;

        if leak {
            log::warn!(
                "Plugin '{}' still has live instances; module {} stays loaded",
                self.info.name,
                module.path().display()
            );
            std::mem::forget(module);
        } else {
            log::debug!(
                "Releasing plugin '{}' from {}",
                self.info.name,
                module.path().display()
            );
            drop(module);
        }
    }
}
