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

//! Subsystem doubles that write every call into a shared journal.

#![allow(dead_code)]

use atrium_core::input::{InputDevice, InputDeviceApi, InputDeviceType, InputEvents};
use atrium_core::platform::{Window, WindowManager};
use atrium_core::renderer::{FrameGraphicsContext, GraphicsApi, ResourceManager};
use atrium_infra::{HeadlessWindowManager, NullGraphicsApi, NullInputApi};
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// Only one engine instance may be alive per process.
static ENGINE_LOCK: Mutex<()> = Mutex::new(());

pub fn engine_lock() -> MutexGuard<'static, ()> {
    ENGINE_LOCK.lock()
}

#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.0.lock().iter().filter(|e| *e == entry).count()
    }
}

pub struct RecordingGraphics {
    inner: NullGraphicsApi,
    journal: Journal,
}

impl RecordingGraphics {
    pub fn new(journal: &Journal) -> Self {
        Self {
            inner: NullGraphicsApi::new(),
            journal: journal.clone(),
        }
    }
}

impl GraphicsApi for RecordingGraphics {
    fn create_frame_graphics_context(&mut self) -> Box<dyn FrameGraphicsContext> {
        self.journal.push("graphics.create_context");
        self.inner.create_frame_graphics_context()
    }

    fn current_frame_index(&self) -> u64 {
        self.inner.current_frame_index()
    }

    fn resource_manager(&mut self) -> &mut dyn ResourceManager {
        self.inner.resource_manager()
    }

    fn mark_frame_start(&mut self) {
        self.journal.push("graphics.start");
        self.inner.mark_frame_start();
    }

    fn mark_frame_end(&mut self) {
        self.journal.push("graphics.end");
        self.inner.mark_frame_end();
    }

    fn supports_multiple_windows(&self) -> bool {
        false
    }
}

pub struct RecordingWindows {
    inner: HeadlessWindowManager,
    journal: Journal,
}

impl RecordingWindows {
    pub fn new(journal: &Journal) -> Self {
        Self {
            inner: HeadlessWindowManager::new(),
            journal: journal.clone(),
        }
    }
}

impl WindowManager for RecordingWindows {
    fn new_window(&mut self) -> Option<Arc<dyn Window>> {
        self.inner.new_window()
    }

    fn windows(&self) -> Vec<Arc<dyn Window>> {
        self.inner.windows()
    }

    fn update(&mut self) {
        self.journal.push("windows.update");
        self.inner.update();
    }

    fn supports_multiple_windows(&self) -> bool {
        self.inner.supports_multiple_windows()
    }
}

/// Records the device mask of every report.
pub struct RecordingInput {
    inner: NullInputApi,
    journal: Journal,
    masks: Arc<Mutex<Vec<InputDeviceType>>>,
}

impl RecordingInput {
    pub fn new(journal: &Journal) -> (Self, Arc<Mutex<Vec<InputDeviceType>>>) {
        let masks = Arc::new(Mutex::new(Vec::new()));
        let input = Self {
            inner: NullInputApi::new(),
            journal: journal.clone(),
            masks: Arc::clone(&masks),
        };
        (input, masks)
    }
}

impl InputDeviceApi for RecordingInput {
    fn list_devices(&self) -> Vec<Arc<dyn InputDevice>> {
        self.inner.list_devices()
    }

    fn report_input_events(&mut self, allowed: InputDeviceType) {
        self.journal.push("input.report");
        self.masks.lock().push(allowed);
        self.inner.report_input_events(allowed);
    }

    fn events(&self) -> &InputEvents {
        self.inner.events()
    }
}

/// One journal shared by recording graphics, windows and input.
pub struct Recorders {
    pub journal: Journal,
    pub graphics: RecordingGraphics,
    pub windows: RecordingWindows,
    pub input: RecordingInput,
    pub masks: Arc<Mutex<Vec<InputDeviceType>>>,
}

pub fn recorders() -> Recorders {
    let journal = Journal::default();
    let (input, masks) = RecordingInput::new(&journal);
    Recorders {
        graphics: RecordingGraphics::new(&journal),
        windows: RecordingWindows::new(&journal),
        input,
        masks,
        journal,
    }
}
