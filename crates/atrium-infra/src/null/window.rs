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

use atrium_core::platform::{Window, WindowManager};
use std::sync::Arc;

/// A window manager that cannot create windows.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullWindowManager;

impl WindowManager for NullWindowManager {
    fn new_window(&mut self) -> Option<Arc<dyn Window>> {
        log::debug!("Null window manager cannot create windows");
        None
    }

    fn windows(&self) -> Vec<Arc<dyn Window>> {
        Vec::new()
    }

    fn update(&mut self) {}

    fn supports_multiple_windows(&self) -> bool {
        false
    }
}
