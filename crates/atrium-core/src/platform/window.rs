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

use crate::event::EventSlot;
use crate::math::{Point, Size};
use std::cell::Cell;
use std::sync::Arc;

/// Identifies a window for the lifetime of its manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

/// Payload of [`WindowEvents::closing`].
///
/// Any subscriber may call [`ClosingEvent::cancel`] to keep the window open.
#[derive(Debug)]
pub struct ClosingEvent {
    cancelled: Cell<bool>,
}

impl ClosingEvent {
    /// A close request that nobody has objected to yet.
    pub fn new() -> Self {
        Self {
            cancelled: Cell::new(false),
        }
    }

    /// Vetoes the close request.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Returns `true` if a subscriber vetoed the request.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

impl Default for ClosingEvent {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle notifications raised by a window.
#[derive(Debug, Default)]
pub struct WindowEvents {
    /// The window has been closed and its resources released.
    pub closed: EventSlot<()>,
    /// The window was asked to close. Subscribers may veto.
    pub closing: EventSlot<ClosingEvent>,
    /// The window gained (`true`) or lost (`false`) focus.
    pub focus_changed: EventSlot<bool>,
    /// The window moved.
    pub moved: EventSlot<Point>,
    /// The window's client area changed size.
    pub size_changed: EventSlot<Size>,
}

/// A window on any platform to display graphics upon.
///
/// Methods take `&self`: windows are shared between the manager, the graphics
/// backend and user code, so implementations use interior mutability.
/// Setters may apply immediately or be deferred to the next
/// [`WindowManager::update`]; notifications are always raised from `update`.
pub trait Window: Send + Sync {
    /// Returns the identifier assigned by the owning manager.
    fn id(&self) -> WindowId;

    /// Returns the notification slots of this window.
    fn events(&self) -> &WindowEvents;

    /// Requests the window to close. Can be vetoed through [`WindowEvents::closing`].
    fn close(&self);

    /// Returns `true` once the window has been closed.
    fn is_closed(&self) -> bool;

    /// Returns the window position.
    fn position(&self) -> Point;

    /// Returns the client-area size.
    fn size(&self) -> Size;

    /// Returns the title.
    fn title(&self) -> String;

    /// Returns `true` if the window currently has focus.
    fn is_focused(&self) -> bool;

    /// Moves the window.
    fn set_position(&self, position: Point);

    /// Resizes the client area.
    fn set_size(&self, size: Size);

    /// Changes the title.
    fn set_title(&self, title: &str);

    /// Makes the window visible.
    fn show(&self);

    /// Hides the window.
    fn hide(&self);
}

/// Creates windows and pumps the platform message loop.
pub trait WindowManager: Send {
    /// Creates a new window, or `None` if the platform cannot provide one.
    fn new_window(&mut self) -> Option<Arc<dyn Window>>;

    /// Returns every open window.
    fn windows(&self) -> Vec<Arc<dyn Window>>;

    /// Drains pending platform messages without blocking.
    ///
    /// Window callbacks (closing, closed, resize, focus, move) are invoked
    /// synchronously from within this call.
    fn update(&mut self);

    /// Returns `true` if more than one window can exist at a time.
    fn supports_multiple_windows(&self) -> bool;
}
