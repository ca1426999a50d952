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

//! Provides abstractions over platform windowing.
//!
//! A [`WindowManager`] owns the platform's message loop and creates [`Window`]s.
//! Windows are shared (`Arc<dyn Window>`) and report their lifecycle through
//! the [`WindowEvents`] slots, which are raised synchronously from
//! [`WindowManager::update`].

pub mod window;

pub use window::{ClosingEvent, Window, WindowEvents, WindowId, WindowManager};
