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

use atrium_core::input::{InputDevice, InputDeviceApi, InputDeviceType, InputEvents};
use std::sync::Arc;

/// An input API with no devices. Its slots exist but never fire.
#[derive(Debug, Default)]
pub struct NullInputApi {
    events: InputEvents,
}

impl NullInputApi {
    /// Creates the API.
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputDeviceApi for NullInputApi {
    fn list_devices(&self) -> Vec<Arc<dyn InputDevice>> {
        Vec::new()
    }

    fn report_input_events(&mut self, _allowed: InputDeviceType) {}

    fn events(&self) -> &InputEvents {
        &self.events
    }
}
