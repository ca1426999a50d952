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

use super::{DeviceId, InputDeviceType};

/// Identifies a key, button or axis on a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputSourceId(pub u32);

/// What happened to an input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEventKind {
    /// A digital source went down.
    Pressed,
    /// A digital source went up.
    Released,
    /// An analog source changed value.
    Analog,
}

/// A single change on an input source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    /// The device that produced the event.
    pub device: DeviceId,
    /// The category of that device, used for masking.
    pub device_type: InputDeviceType,
    /// The key, button or axis.
    pub source: InputSourceId,
    /// What happened.
    pub kind: InputEventKind,
    /// Current value: 1.0 while pressed, 0.0 when released, the axis value otherwise.
    pub value: f32,
    /// Change since the previous event on this source (analog only).
    pub delta: f32,
}

impl InputEvent {
    /// A digital press or release.
    pub fn digital(
        device: DeviceId,
        device_type: InputDeviceType,
        source: InputSourceId,
        pressed: bool,
    ) -> Self {
        let (kind, value) = if pressed {
            (InputEventKind::Pressed, 1.0)
        } else {
            (InputEventKind::Released, 0.0)
        };
        Self {
            device,
            device_type,
            source,
            kind,
            value,
            delta: 0.0,
        }
    }

    /// An analog change.
    pub fn analog(
        device: DeviceId,
        device_type: InputDeviceType,
        source: InputSourceId,
        value: f32,
        delta: f32,
    ) -> Self {
        Self {
            device,
            device_type,
            source,
            kind: InputEventKind::Analog,
            value,
            delta,
        }
    }
}

/// Text entered on a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextInputEvent {
    /// The device that produced the text.
    pub device: DeviceId,
    /// The category of that device, used for masking.
    pub device_type: InputDeviceType,
    /// The entered character.
    pub codepoint: char,
}
