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

//! The immediate-mode GUI overlay drawn on top of the primary window.

use atrium_core::event::OwnerId;
use atrium_core::input::InputDeviceType;
use atrium_core::platform::Window;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Owns the `egui` context of the overlay and tracks its window.
///
/// Once the window reports `closed` the handler goes inert: no more passes
/// are run and it stops claiming input.
pub struct GuiHandler {
    ctx: egui::Context,
    window: Arc<dyn Window>,
    owner: OwnerId,
    window_alive: Arc<AtomicBool>,
    pending_events: Vec<egui::Event>,
    output: Option<egui::FullOutput>,
    started: Instant,
}

impl GuiHandler {
    /// Attaches an overlay to `window`.
    pub fn new(window: Arc<dyn Window>) -> Self {
        let owner = OwnerId::new();
        let window_alive = Arc::new(AtomicBool::new(!window.is_closed()));

        let alive = Arc::clone(&window_alive);
        window.events().closed.connect(owner, move |_| {
            log::debug!("GUI window closed, overlay disabled");
            alive.store(false, Ordering::Release);
        });

        Self {
            ctx: egui::Context::default(),
            window,
            owner,
            window_alive,
            pending_events: Vec::new(),
            output: None,
            started: Instant::now(),
        }
    }

    /// The `egui` context.
    pub fn context(&self) -> &egui::Context {
        &self.ctx
    }

    /// The window the overlay is drawn on.
    pub fn window(&self) -> &Arc<dyn Window> {
        &self.window
    }

    /// Returns `false` once the window has closed.
    pub fn is_window_alive(&self) -> bool {
        self.window_alive.load(Ordering::Acquire)
    }

    /// Queues an input event for the next pass.
    pub fn queue_event(&mut self, event: egui::Event) {
        if self.is_window_alive() {
            self.pending_events.push(event);
        }
    }

    /// Device types whose input should still reach the application.
    ///
    /// Keyboard input is withheld while a widget has keyboard focus and
    /// mouse input while the pointer is over the overlay.
    pub fn allowed_inputs(&self) -> InputDeviceType {
        let mut allowed = InputDeviceType::all();
        if !self.is_window_alive() {
            return allowed;
        }
        if self.ctx.wants_keyboard_input() {
            allowed.remove(InputDeviceType::KEYBOARD);
        }
        if self.ctx.wants_pointer_input() {
            allowed.remove(InputDeviceType::MOUSE);
        }
        allowed
    }

    /// Runs one pass, calling `build` to describe the UI.
    ///
    /// Returns `false` without calling `build` when the window has closed.
    pub fn render(&mut self, build: impl FnOnce(&egui::Context)) -> bool {
        if !self.is_window_alive() {
            self.pending_events.clear();
            return false;
        }

        let size = self.window.size();
        let raw_input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(size.width as f32, size.height as f32),
            )),
            time: Some(self.started.elapsed().as_secs_f64()),
            focused: self.window.is_focused(),
            events: std::mem::take(&mut self.pending_events),
            ..Default::default()
        };

        self.ctx.begin_pass(raw_input);
        build(&self.ctx);
        self.output = Some(self.ctx.end_pass());
        true
    }

    /// Takes the output of the last pass, for the graphics backend to draw.
    pub fn take_output(&mut self) -> Option<egui::FullOutput> {
        self.output.take()
    }
}

impl Drop for GuiHandler {
    fn drop(&mut self) {
        self.window.events().closed.disconnect(self.owner);
    }
}

impl std::fmt::Debug for GuiHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuiHandler")
            .field("window", &self.window.id())
            .field("window_alive", &self.is_window_alive())
            .field("pending_events", &self.pending_events.len())
            .finish()
    }
}
