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

//! # Atrium Core
//!
//! Foundational crate containing the subsystem traits, plugin contracts and
//! event primitives that the rest of the engine is built on.
//!
//! Nothing in here talks to the operating system. Concrete backends (including
//! the null implementations) live in `atrium-infra`.

#![warn(missing_docs)]

pub mod audio;
pub mod event;
pub mod input;
pub mod math;
pub mod platform;
pub mod plugin;
pub mod renderer;

pub use audio::{AudioApi, AudioClip};
pub use event::{EventBus, EventSlot, OwnerId};
pub use input::{InputDeviceApi, InputDeviceType};
pub use platform::{Window, WindowManager};
pub use plugin::{Instancing, Plugin, PluginInfo, SemanticVersion};
pub use renderer::{FrameGraphicsContext, GraphicsApi};
