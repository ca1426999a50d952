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

//! Input device contracts.
//!
//! An [`InputDeviceApi`] enumerates devices and, once per frame, reports the
//! input gathered since the previous frame through its [`InputEvents`] slots.
//! The engine passes a device-type mask so that input captured by an overlay
//! (e.g. typing into a GUI text field) is not also delivered to the game.

mod event;

pub use event::{InputEvent, InputEventKind, InputSourceId, TextInputEvent};

use crate::event::EventSlot;
use bitflags::bitflags;
use std::sync::Arc;

bitflags! {
    /// Categories of input device, usable as a mask.
    ///
    /// The empty set stands for an unknown device type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InputDeviceType: u8 {
        /// Keyboards.
        const KEYBOARD = 0x01;
        /// Mice and other pointing devices.
        const MOUSE = 0x02;
        /// Gamepads.
        const GAMEPAD = 0x04;
        /// Touch screens.
        const TOUCH = 0x08;
        /// Joysticks and flight sticks.
        const JOYSTICK = 0x10;
        /// Anything else.
        const OTHER = 0x80;
    }
}

/// Identifies an input device for the lifetime of its API instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(pub u32);

/// A physical or virtual input device.
pub trait InputDevice: Send + Sync {
    /// Returns the device identifier.
    fn id(&self) -> DeviceId;

    /// Returns the device category.
    fn device_type(&self) -> InputDeviceType;

    /// Returns a human-readable name.
    fn name(&self) -> String;

    /// Returns `true` while the device is plugged in.
    fn is_connected(&self) -> bool;
}

/// Input notifications raised by [`InputDeviceApi::report_input_events`].
#[derive(Debug, Default)]
pub struct InputEvents {
    /// Button, key and axis changes.
    pub input: EventSlot<InputEvent>,
    /// Text entered, one codepoint per event.
    pub text_input: EventSlot<TextInputEvent>,
}

/// Interface for accessing input devices.
pub trait InputDeviceApi: Send {
    /// Returns every known device.
    fn list_devices(&self) -> Vec<Arc<dyn InputDevice>>;

    /// Dispatches the input gathered since the last call, for the device types
    /// in `allowed` only. Input from other device types is discarded.
    fn report_input_events(&mut self, allowed: InputDeviceType);

    /// Returns the notification slots.
    fn events(&self) -> &InputEvents;
}
