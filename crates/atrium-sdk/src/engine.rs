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

//! The engine instance and its run-loop.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::gui::GuiHandler;
use crate::stats::FrameStats;
use crate::Application;
use atrium_core::audio::AudioApi;
use atrium_core::input::{InputDeviceApi, InputDeviceType};
use atrium_core::platform::{Window, WindowManager};
use atrium_core::renderer::{FrameGraphicsContext, GraphicsApi};
use atrium_infra::{NullAudioApi, NullGraphicsApi, NullInputApi, NullWindowManager};
use atrium_plugins::PluginManager;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;

/// Exit code of a run that ended normally.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code of a run aborted by [`Application::startup`].
pub const EXIT_FAILURE: i32 = 1;

static INSTANCE_ALIVE: AtomicBool = AtomicBool::new(false);

/// Marks the single engine instance of the process as alive.
#[derive(Debug)]
struct InstanceRegistration(());

impl InstanceRegistration {
    fn claim() -> Self {
        if INSTANCE_ALIVE.swap(true, Ordering::AcqRel) {
            panic!("An engine instance is already alive; only one may exist per process");
        }
        Self(())
    }
}

impl Drop for InstanceRegistration {
    fn drop(&mut self) {
        INSTANCE_ALIVE.store(false, Ordering::Release);
    }
}

#[derive(Debug)]
struct StopState {
    requested: AtomicBool,
    exit_code: AtomicI32,
}

/// Requests the run-loop to stop, from any thread.
///
/// The request is checked once per iteration, before the next frame starts,
/// and can be vetoed by [`Application::close_requested`].
#[derive(Debug, Clone)]
pub struct StopHandle {
    state: Arc<StopState>,
}

impl StopHandle {
    fn new() -> Self {
        Self {
            state: Arc::new(StopState {
                requested: AtomicBool::new(false),
                exit_code: AtomicI32::new(EXIT_SUCCESS),
            }),
        }
    }

    /// Requests a stop, keeping the current exit code.
    pub fn request(&self) {
        self.state.requested.store(true, Ordering::Release);
    }

    /// Requests a stop with `exit_code` as the result of the run.
    pub fn request_exit(&self, exit_code: i32) {
        self.state.exit_code.store(exit_code, Ordering::Release);
        self.request();
    }

    /// Returns `true` while a stop request is pending.
    pub fn is_requested(&self) -> bool {
        self.state.requested.load(Ordering::Acquire)
    }

    /// The exit code the run will return.
    pub fn exit_code(&self) -> i32 {
        self.state.exit_code.load(Ordering::Acquire)
    }

    /// Drops a vetoed request. The exit code stays as last set, so a later
    /// plain [`request`](Self::request) still returns it.
    fn clear(&self) {
        self.state.requested.store(false, Ordering::Release);
    }
}

/// The subsystems and services handed to [`Application`] hooks.
pub struct Engine {
    // Field order is drop order: the overlay and the subsystems go before the
    // plugins whose modules may back them.
    gui: Option<GuiHandler>,
    audio: Box<dyn AudioApi>,
    input: Box<dyn InputDeviceApi>,
    graphics: Box<dyn GraphicsApi>,
    window_manager: Box<dyn WindowManager>,
    plugins: PluginManager,
    config: EngineConfig,
    stats: FrameStats,
    stop: StopHandle,
    running: bool,
    gui_initialized: bool,
    _registration: InstanceRegistration,
}

impl Engine {
    /// Requests the run-loop to stop after the current frame.
    pub fn stop(&self) {
        self.stop.request();
    }

    /// Requests the run-loop to stop and return `exit_code`.
    pub fn exit(&self, exit_code: i32) {
        self.stop.request_exit(exit_code);
    }

    /// A handle that can request a stop from other threads or callbacks.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Returns `true` while [`EngineInstance::run`] is executing.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The graphics subsystem.
    pub fn graphics(&self) -> &dyn GraphicsApi {
        self.graphics.as_ref()
    }

    /// The graphics subsystem, mutably.
    pub fn graphics_mut(&mut self) -> &mut dyn GraphicsApi {
        self.graphics.as_mut()
    }

    /// The window subsystem.
    pub fn window_manager(&self) -> &dyn WindowManager {
        self.window_manager.as_ref()
    }

    /// The window subsystem, mutably.
    pub fn window_manager_mut(&mut self) -> &mut dyn WindowManager {
        self.window_manager.as_mut()
    }

    /// The input subsystem.
    pub fn input(&self) -> &dyn InputDeviceApi {
        self.input.as_ref()
    }

    /// The input subsystem, mutably.
    pub fn input_mut(&mut self) -> &mut dyn InputDeviceApi {
        self.input.as_mut()
    }

    /// The audio subsystem.
    pub fn audio(&self) -> &dyn AudioApi {
        self.audio.as_ref()
    }

    /// The audio subsystem, mutably.
    pub fn audio_mut(&mut self) -> &mut dyn AudioApi {
        self.audio.as_mut()
    }

    /// The plugin manager.
    pub fn plugins(&self) -> &PluginManager {
        &self.plugins
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Frame counters.
    pub fn frame_stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Attaches the GUI overlay to `window`.
    ///
    /// # Panics
    ///
    /// If the overlay was already initialized for this instance.
    pub fn initialize_gui(&mut self, window: Arc<dyn Window>) {
        assert!(
            !self.gui_initialized,
            "The GUI overlay can only be initialized once per engine instance"
        );
        log::info!("Initializing GUI overlay on window {:?}", window.id());
        self.gui = Some(GuiHandler::new(window));
        self.gui_initialized = true;
    }

    /// The GUI overlay, if initialized and not currently rendering.
    pub fn gui(&self) -> Option<&GuiHandler> {
        self.gui.as_ref()
    }

    /// The GUI overlay, mutably.
    pub fn gui_mut(&mut self) -> Option<&mut GuiHandler> {
        self.gui.as_mut()
    }

    /// Takes the output of the last GUI pass.
    pub fn take_gui_output(&mut self) -> Option<egui::FullOutput> {
        self.gui.as_mut().and_then(GuiHandler::take_output)
    }

    fn allowed_inputs(&self) -> InputDeviceType {
        self.gui
            .as_ref()
            .map_or(InputDeviceType::all(), GuiHandler::allowed_inputs)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("running", &self.running)
            .field("gui", &self.gui)
            .field("plugins", &self.plugins)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builds an [`EngineInstance`] from whatever backends the platform offers.
#[derive(Default)]
pub struct EngineBuilder {
    graphics: Option<Box<dyn GraphicsApi>>,
    window_manager: Option<Box<dyn WindowManager>>,
    input: Option<Box<dyn InputDeviceApi>>,
    audio: Option<Box<dyn AudioApi>>,
    config: EngineConfig,
    plugins: Option<PluginManager>,
}

impl EngineBuilder {
    /// Uses `graphics` as the graphics subsystem.
    pub fn with_graphics(mut self, graphics: impl GraphicsApi + 'static) -> Self {
        self.graphics = Some(Box::new(graphics));
        self
    }

    /// Uses `window_manager` as the window subsystem.
    pub fn with_window_manager(mut self, window_manager: impl WindowManager + 'static) -> Self {
        self.window_manager = Some(Box::new(window_manager));
        self
    }

    /// Uses `input` as the input subsystem.
    pub fn with_input(mut self, input: impl InputDeviceApi + 'static) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    /// Uses `audio` as the audio subsystem.
    pub fn with_audio(mut self, audio: impl AudioApi + 'static) -> Self {
        self.audio = Some(Box::new(audio));
        self
    }

    /// Replaces the default configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses an already configured plugin manager instead of creating one from
    /// the configuration.
    pub fn with_plugin_manager(mut self, plugins: PluginManager) -> Self {
        self.plugins = Some(plugins);
        self
    }

    /// Creates the engine instance.
    ///
    /// Missing subsystems are replaced by null implementations, unless no
    /// subsystem was supplied at all and the configuration forbids the null
    /// platform.
    ///
    /// # Panics
    ///
    /// If another engine instance is alive in this process.
    pub fn build(self) -> Result<EngineInstance, EngineError> {
        let registration = InstanceRegistration::claim();

        let nothing_supplied = self.graphics.is_none()
            && self.window_manager.is_none()
            && self.input.is_none()
            && self.audio.is_none();
        if nothing_supplied && !self.config.allow_null_platform {
            log::error!("No platform backend is available for this system");
            return Err(EngineError::UnsupportedPlatform);
        }
        if nothing_supplied {
            log::warn!("No platform backend supplied, running on the null platform");
        }

        let plugins = match self.plugins {
            Some(plugins) => plugins,
            None => self.config.plugin_manager()?,
        };

        let mut graphics = self.graphics.unwrap_or_else(|| {
            log::debug!("Using null graphics");
            Box::new(NullGraphicsApi::new())
        });
        let window_manager = self.window_manager.unwrap_or_else(|| {
            log::debug!("Using null window manager");
            Box::new(NullWindowManager)
        });
        let input = self.input.unwrap_or_else(|| {
            log::debug!("Using null input");
            Box::new(NullInputApi::new())
        });
        let audio = self.audio.unwrap_or_else(|| {
            log::debug!("Using null audio");
            Box::new(NullAudioApi)
        });

        let frame_context = graphics.create_frame_graphics_context();
        let stats = FrameStats::new(self.config.stats_interval());

        log::info!("Engine instance created");
        Ok(EngineInstance {
            frame_context,
            engine: Engine {
                gui: None,
                audio,
                input,
                graphics,
                window_manager,
                plugins,
                config: self.config,
                stats,
                stop: StopHandle::new(),
                running: false,
                gui_initialized: false,
                _registration: registration,
            },
        })
    }
}

/// The single engine instance of a process.
///
/// Dropping it shuts the engine down: the overlay first, then the frame
/// context, the subsystems and finally the plugin modules.
pub struct EngineInstance {
    frame_context: Box<dyn FrameGraphicsContext>,
    engine: Engine,
}

impl EngineInstance {
    /// Starts building an instance.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The engine, outside of the run-loop.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// The engine, mutably, outside of the run-loop.
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Runs `app` until a stop request is accepted and returns the exit code.
    ///
    /// Each frame pumps the window messages, reports input, then calls
    /// [`Application::frame`] and [`Application::gui`] between the graphics
    /// frame markers.
    ///
    /// # Panics
    ///
    /// If the instance is already running.
    pub fn run<A: Application + ?Sized>(&mut self, app: &mut A) -> i32 {
        assert!(
            !self.engine.running,
            "EngineInstance::run called while the instance is already running"
        );
        self.engine.running = true;

        log::info!("Starting up application");
        let exit_code = if app.startup(&mut self.engine) {
            self.run_loop(app);
            self.engine.gui = None;
            log::info!("Shutting down application");
            app.shutdown(&mut self.engine);
            self.engine.stop.exit_code()
        } else {
            log::error!("Application startup failed");
            EXIT_FAILURE
        };

        self.engine.running = false;
        log::info!("Run finished with exit code {exit_code}");
        exit_code
    }

    fn run_loop<A: Application + ?Sized>(&mut self, app: &mut A) {
        loop {
            if self.engine.stop.is_requested() {
                let mut should_exit = true;
                app.close_requested(&self.engine, &mut should_exit);
                if should_exit {
                    return;
                }
                log::debug!("Stop request vetoed by the application");
                self.engine.stop.clear();
            }
            self.tick(app);
        }
    }

    fn tick<A: Application + ?Sized>(&mut self, app: &mut A) {
        let engine = &mut self.engine;
        engine.stats.begin_frame();

        engine.window_manager.update();

        let allowed = engine.allowed_inputs();
        engine.input.report_input_events(allowed);

        engine.graphics.mark_frame_start();
        app.frame(engine, self.frame_context.as_mut());

        if let Some(mut gui) = engine.gui.take() {
            gui.render(|ctx| app.gui(engine, ctx));
            engine.gui = Some(gui);
        }

        engine.graphics.mark_frame_end();
        engine.stats.end_frame();
    }
}

impl Drop for EngineInstance {
    fn drop(&mut self) {
        log::info!("Shutting down engine instance");
        self.engine.gui = None;
    }
}

impl std::fmt::Debug for EngineInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineInstance")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}
