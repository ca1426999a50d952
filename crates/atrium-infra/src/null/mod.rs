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

//! No-op subsystem implementations.
//!
//! These are ordinary trait implementations, not special cases: the engine
//! never checks whether a subsystem is "real".

mod audio;
mod graphics;
mod input;
mod window;

pub use audio::NullAudioApi;
pub use graphics::{NullFrameContext, NullGraphicsApi, NullResourceManager};
pub use input::NullInputApi;
pub use window::NullWindowManager;
