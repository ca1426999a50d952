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

use atrium_core::event::EventBus;
use atrium_core::math::{Point, Size};
use atrium_core::platform::{ClosingEvent, Window, WindowEvents, WindowId, WindowManager};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A window-level request waiting for the next pump.
#[derive(Debug, Clone, Copy, PartialEq)]
enum WindowMessage {
    CloseRequested(WindowId),
    Resized(WindowId, Size),
    Moved(WindowId, Point),
    FocusChanged(WindowId, bool),
}

impl WindowMessage {
    fn window(&self) -> WindowId {
        match *self {
            WindowMessage::CloseRequested(id)
            | WindowMessage::Resized(id, _)
            | WindowMessage::Moved(id, _)
            | WindowMessage::FocusChanged(id, _) => id,
        }
    }
}

#[derive(Debug)]
struct WindowState {
    position: Point,
    size: Size,
    title: String,
    visible: bool,
    focused: bool,
    closed: bool,
}

/// An in-memory window.
///
/// Geometry, focus and close requests are queued and applied by the owning
/// [`HeadlessWindowManager`] on its next `update`. Title and visibility are
/// applied immediately since no event reports them.
#[derive(Debug)]
pub struct HeadlessWindow {
    id: WindowId,
    events: WindowEvents,
    state: Mutex<WindowState>,
    messages: flume::Sender<WindowMessage>,
}

impl HeadlessWindow {
    fn post(&self, message: WindowMessage) {
        if self.messages.send(message).is_err() {
            log::warn!(
                "Dropping {:?}: the window manager is gone",
                message
            );
        }
    }

    /// Queues a focus change, as if the user clicked into or away from the window.
    pub fn set_focused(&self, focused: bool) {
        self.post(WindowMessage::FocusChanged(self.id, focused));
    }

    /// Returns `true` between [`show`](Window::show) and [`hide`](Window::hide).
    pub fn is_visible(&self) -> bool {
        self.state.lock().visible
    }
}

impl Window for HeadlessWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn events(&self) -> &WindowEvents {
        &self.events
    }

    fn close(&self) {
        if !self.is_closed() {
            self.post(WindowMessage::CloseRequested(self.id));
        }
    }

    fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    fn position(&self) -> Point {
        self.state.lock().position
    }

    fn size(&self) -> Size {
        self.state.lock().size
    }

    fn title(&self) -> String {
        self.state.lock().title.clone()
    }

    fn is_focused(&self) -> bool {
        self.state.lock().focused
    }

    fn set_position(&self, position: Point) {
        self.post(WindowMessage::Moved(self.id, position));
    }

    fn set_size(&self, size: Size) {
        self.post(WindowMessage::Resized(self.id, size));
    }

    fn set_title(&self, title: &str) {
        self.state.lock().title = title.to_string();
    }

    fn show(&self) {
        self.state.lock().visible = true;
    }

    fn hide(&self) {
        self.state.lock().visible = false;
    }
}

/// A [`WindowManager`] whose windows live only in memory.
#[derive(Debug)]
pub struct HeadlessWindowManager {
    bus: EventBus<WindowMessage>,
    windows: BTreeMap<WindowId, Arc<HeadlessWindow>>,
    next_id: u64,
    default_size: Size,
    allow_multiple: bool,
}

impl HeadlessWindowManager {
    /// Creates a manager that allows any number of windows.
    pub fn new() -> Self {
        Self {
            bus: EventBus::new(),
            windows: BTreeMap::new(),
            next_id: 1,
            default_size: Size::new(1280, 720),
            allow_multiple: true,
        }
    }

    /// Restricts the manager to one open window at a time.
    pub fn single_window(mut self) -> Self {
        self.allow_multiple = false;
        self
    }

    /// Sets the client-area size of new windows.
    pub fn with_default_size(mut self, size: Size) -> Self {
        self.default_size = size;
        self
    }

    /// Creates a window and returns it with its concrete type.
    ///
    /// Returns `None` if the manager is limited to one window and one is open.
    pub fn new_headless_window(&mut self) -> Option<Arc<HeadlessWindow>> {
        if !self.allow_multiple && !self.windows.is_empty() {
            log::warn!("Headless window manager is limited to a single window");
            return None;
        }

        let id = WindowId(self.next_id);
        self.next_id += 1;

        let window = Arc::new(HeadlessWindow {
            id,
            events: WindowEvents::default(),
            state: Mutex::new(WindowState {
                position: Point::default(),
                size: self.default_size,
                title: format!("Atrium window {}", id.0),
                visible: false,
                focused: false,
                closed: false,
            }),
            messages: self.bus.sender(),
        });
        self.windows.insert(id, Arc::clone(&window));

        log::info!(
            "Created headless window {} ({}x{})",
            id.0,
            self.default_size.width,
            self.default_size.height
        );
        Some(window)
    }

    /// Returns an open window by id.
    pub fn window(&self, id: WindowId) -> Option<Arc<HeadlessWindow>> {
        self.windows.get(&id).cloned()
    }

    /// Number of requests waiting for the next [`update`](WindowManager::update).
    pub fn pending_messages(&self) -> usize {
        self.bus.len()
    }

    fn dispatch(&mut self, message: WindowMessage) {
        let id = message.window();
        let Some(window) = self.windows.get(&id).cloned() else {
            log::trace!("Ignoring {message:?} for a window that is no longer open");
            return;
        };

        // Callbacks run without the state lock held; they may query the window.
        match message {
            WindowMessage::CloseRequested(_) => {
                let request = ClosingEvent::new();
                window.events.closing.invoke(&request);
                if request.is_cancelled() {
                    log::debug!("Close of window {} was vetoed", id.0);
                    return;
                }

                window.state.lock().closed = true;
                self.windows.remove(&id);
                log::info!("Headless window {} closed", id.0);
                window.events.closed.invoke(&());
            }
            WindowMessage::Resized(_, size) => {
                if std::mem::replace(&mut window.state.lock().size, size) != size {
                    window.events.size_changed.invoke(&size);
                }
            }
            WindowMessage::Moved(_, position) => {
                if std::mem::replace(&mut window.state.lock().position, position) != position {
                    window.events.moved.invoke(&position);
                }
            }
            WindowMessage::FocusChanged(_, focused) => {
                if focused {
                    for other in self.windows.values().filter(|w| w.id != id) {
                        if std::mem::replace(&mut other.state.lock().focused, false) {
                            other.events.focus_changed.invoke(&false);
                        }
                    }
                }
                if std::mem::replace(&mut window.state.lock().focused, focused) != focused {
                    window.events.focus_changed.invoke(&focused);
                }
            }
        }
    }
}

impl Default for HeadlessWindowManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowManager for HeadlessWindowManager {
    fn new_window(&mut self) -> Option<Arc<dyn Window>> {
        self.new_headless_window()
            .map(|window| window as Arc<dyn Window>)
    }

    fn windows(&self) -> Vec<Arc<dyn Window>> {
        self.windows
            .values()
            .map(|window| Arc::clone(window) as Arc<dyn Window>)
            .collect()
    }

    fn update(&mut self) {
        for message in self.bus.drain() {
            self.dispatch(message);
        }
    }

    fn supports_multiple_windows(&self) -> bool {
        self.allow_multiple
    }
}

impl Drop for HeadlessWindowManager {
    fn drop(&mut self) {
        // Windows cannot outlive their manager; closing here cannot be vetoed.
        for (id, window) in std::mem::take(&mut self.windows) {
            window.state.lock().closed = true;
            log::debug!("Closing headless window {} with its manager", id.0);
            window.events.closed.invoke(&());
        }
    }
}
