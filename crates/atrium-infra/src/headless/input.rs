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
use atrium_core::input::{
    DeviceId, InputDevice, InputDeviceApi, InputDeviceType, InputEvent, InputEvents,
    TextInputEvent,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq)]
enum QueuedInput {
    Input(InputEvent),
    Text(TextInputEvent),
}

impl QueuedInput {
    fn device_type(&self) -> InputDeviceType {
        match self {
            QueuedInput::Input(event) => event.device_type,
            QueuedInput::Text(event) => event.device_type,
        }
    }
}

/// A device that exists only in software.
#[derive(Debug)]
pub struct VirtualDevice {
    id: DeviceId,
    device_type: InputDeviceType,
    name: String,
    connected: AtomicBool,
}

impl VirtualDevice {
    /// Simulates plugging the device in or out.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Relaxed);
    }
}

impl InputDevice for VirtualDevice {
    fn id(&self) -> DeviceId {
        self.id
    }

    fn device_type(&self) -> InputDeviceType {
        self.device_type
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }
}

/// Feeds input into a [`VirtualInputApi`] from any thread.
#[derive(Debug, Clone)]
pub struct InputInjector {
    sender: flume::Sender<QueuedInput>,
}

impl InputInjector {
    /// Queues a button, key or axis event.
    pub fn send(&self, event: InputEvent) {
        self.queue(QueuedInput::Input(event));
    }

    /// Queues a text event.
    pub fn send_text(&self, event: TextInputEvent) {
        self.queue(QueuedInput::Text(event));
    }

    fn queue(&self, input: QueuedInput) {
        if self.sender.send(input).is_err() {
            log::warn!("Virtual input API is gone, dropping {input:?}");
        }
    }
}

/// An [`InputDeviceApi`] fed by [`InputInjector`]s.
///
/// Injected events are held until the next
/// [`report_input_events`](InputDeviceApi::report_input_events), which
/// dispatches the ones whose device type is allowed and discards the rest.
/// Events from devices of unknown type (an empty type set) count as
/// [`InputDeviceType::OTHER`].
#[derive(Debug, Default)]
pub struct VirtualInputApi {
    devices: Vec<Arc<VirtualDevice>>,
    queue: EventBus<QueuedInput>,
    events: InputEvents,
}

impl VirtualInputApi {
    /// Creates an API with no devices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connected device.
    pub fn add_device(
        &mut self,
        device_type: InputDeviceType,
        name: impl Into<String>,
    ) -> Arc<VirtualDevice> {
        let device = Arc::new(VirtualDevice {
            id: DeviceId(self.devices.len() as u32 + 1),
            device_type,
            name: name.into(),
            connected: AtomicBool::new(true),
        });
        log::debug!("Added virtual {:?} device '{}'", device_type, device.name);
        self.devices.push(Arc::clone(&device));
        device
    }

    /// Returns a handle that queues input for this API.
    pub fn injector(&self) -> InputInjector {
        InputInjector {
            sender: self.queue.sender(),
        }
    }
}

fn is_allowed(allowed: InputDeviceType, device_type: InputDeviceType) -> bool {
    if device_type.is_empty() {
        allowed.contains(InputDeviceType::OTHER)
    } else {
        allowed.contains(device_type)
    }
}

impl InputDeviceApi for VirtualInputApi {
    fn list_devices(&self) -> Vec<Arc<dyn InputDevice>> {
        self.devices
            .iter()
            .map(|device| Arc::clone(device) as Arc<dyn InputDevice>)
            .collect()
    }

    fn report_input_events(&mut self, allowed: InputDeviceType) {
        let mut discarded = 0usize;
        for queued in self.queue.drain() {
            if !is_allowed(allowed, queued.device_type()) {
                discarded += 1;
                continue;
            }
            match queued {
                QueuedInput::Input(event) => self.events.input.invoke(&event),
                QueuedInput::Text(event) => self.events.text_input.invoke(&event),
            }
        }
        if discarded > 0 {
            log::trace!("Discarded {discarded} input event(s) outside {allowed:?}");
        }
    }

    fn events(&self) -> &InputEvents {
        &self.events
    }
}
