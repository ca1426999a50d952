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

//! Backends that run without an operating system window or device.
//!
//! Requests made on windows and devices are queued on an [`EventBus`] and only
//! take effect when the owner is pumped, exactly like a native message loop.
//! Callbacks therefore fire synchronously from inside
//! [`WindowManager::update`] and [`InputDeviceApi::report_input_events`].
//!
//! [`EventBus`]: atrium_core::event::EventBus
//! [`WindowManager::update`]: atrium_core::platform::WindowManager::update
//! [`InputDeviceApi::report_input_events`]: atrium_core::input::InputDeviceApi::report_input_events

mod input;
mod window;

pub use input::{InputInjector, VirtualDevice, VirtualInputApi};
pub use window::{HeadlessWindow, HeadlessWindowManager};
