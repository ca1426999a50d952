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

//! The public-facing SDK of the Atrium engine.
//!
//! An application implements [`Application`], builds an [`EngineInstance`]
//! with the platform backends it has (missing ones fall back to null
//! implementations) and hands itself to [`EngineInstance::run`]:
//!
//! ```rust,no_run
//! use atrium_sdk::prelude::*;
//!
//! struct Game;
//!
//! impl Application for Game {
//!     fn frame(&mut self, engine: &mut Engine, _frame: &mut dyn FrameGraphicsContext) {
//!         if engine.graphics().current_frame_index() >= 600 {
//!             engine.stop();
//!         }
//!     }
//! }
//!
//! let mut instance = EngineInstance::builder().build().expect("null platform allowed");
//! std::process::exit(instance.run(&mut Game));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod engine;
pub mod error;
pub mod gui;
pub mod logging;
pub mod stats;

pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, EngineBuilder, EngineInstance, StopHandle, EXIT_FAILURE, EXIT_SUCCESS};
pub use error::EngineError;
pub use gui::GuiHandler;

use atrium_core::renderer::FrameGraphicsContext;

/// User hooks driven by [`EngineInstance::run`].
///
/// Every hook has a default so applications only implement what they need.
pub trait Application {
    /// Called once before the first frame. Returning `false` aborts the run
    /// with [`EXIT_FAILURE`].
    fn startup(&mut self, engine: &mut Engine) -> bool {
        let _ = engine;
        true
    }

    /// Called once per frame between the graphics frame markers.
    fn frame(&mut self, engine: &mut Engine, frame: &mut dyn FrameGraphicsContext);

    /// Called once per frame after [`frame`](Self::frame) while a GUI overlay
    /// is initialized and its window is open.
    fn gui(&mut self, engine: &mut Engine, ctx: &egui::Context) {
        let _ = (engine, ctx);
    }

    /// Called when a stop was requested. Clearing `should_exit` vetoes the
    /// request and keeps the loop running.
    fn close_requested(&mut self, engine: &Engine, should_exit: &mut bool) {
        let _ = (engine, should_exit);
    }

    /// Called once after the last frame, after the GUI overlay is torn down.
    fn shutdown(&mut self, engine: &mut Engine) {
        let _ = engine;
    }
}

/// Everything an application usually needs.
pub mod prelude {
    pub use crate::{Application, Engine, EngineConfig, EngineInstance, StopHandle};
    pub use atrium_core::input::{InputDeviceApi, InputDeviceType};
    pub use atrium_core::math::{Color, Point, Rect, Size};
    pub use atrium_core::platform::{Window, WindowManager};
    pub use atrium_core::plugin::{Instancing, Plugin, PluginInfo, SemanticVersion, StaticPlugin};
    pub use atrium_core::renderer::{FrameGraphicsContext, GraphicsApi};
    pub use atrium_plugins::{InstanceRequest, PluginManager};
}
