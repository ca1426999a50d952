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

//! # Atrium Infra
//!
//! Concrete implementations of the subsystem traits declared in `atrium-core`.
//!
//! - [`null`]: backends that satisfy every contract while doing no work. The
//!   engine substitutes them for any subsystem the platform does not provide.
//! - [`headless`]: an in-memory window manager and a virtual input API that
//!   pump queued messages like an OS would, without needing one.
//! - [`module`]: the shared-library loader used for dynamic plugins.

#![warn(missing_docs)]

pub mod headless;
pub mod module;
pub mod null;

pub use headless::{HeadlessWindow, HeadlessWindowManager, InputInjector, VirtualInputApi};
pub use module::LibloadingLoader;
pub use null::{NullAudioApi, NullGraphicsApi, NullInputApi, NullWindowManager};
