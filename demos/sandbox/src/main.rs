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

// Atrium Sandbox
// Runs a small application on the headless platform.
//
// Usage: sandbox [config.ron]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use atrium_core::event::OwnerId;
use atrium_core::input::{DeviceId, InputDevice, InputEvent, InputSourceId};
use atrium_infra::{HeadlessWindowManager, InputInjector, VirtualInputApi};
use atrium_sdk::logging::init_logging;
use atrium_sdk::prelude::*;

const FRAME_LIMIT: u64 = 180;
const SPACE: InputSourceId = InputSourceId(32);

/// A static plugin compiled into the sandbox.
struct Greeter;

impl Greeter {
    fn greet(&self, who: &str) -> String {
        format!("Hello, {who}!")
    }
}

impl Plugin for Greeter {}

impl StaticPlugin for Greeter {
    fn plugin_info(_interface: &SemanticVersion) -> PluginInfo {
        PluginInfo::new("greeter", Instancing::One).with_constructor(|| Greeter)
    }
}

struct SandboxApp {
    injector: InputInjector,
    keyboard: DeviceId,
    key_presses: Arc<AtomicUsize>,
    owner: OwnerId,
    window: Option<Arc<dyn Window>>,
    name: String,
}

impl SandboxApp {
    fn new(injector: InputInjector, keyboard: DeviceId) -> Self {
        Self {
            injector,
            keyboard,
            key_presses: Arc::new(AtomicUsize::new(0)),
            owner: OwnerId::new(),
            window: None,
            name: "sandbox".to_string(),
        }
    }
}

impl Application for SandboxApp {
    fn startup(&mut self, engine: &mut Engine) -> bool {
        let Some(greeter) = engine.plugins().require_as::<Greeter>("greeter") else {
            log::error!("Greeter plugin is missing");
            return false;
        };
        log::info!("{}", greeter.greet(&self.name));

        if engine.plugins().is_available("hello") {
            if let Some(hello) = engine.plugins().require("hello") {
                log::info!(
                    "Loaded plugin module 'hello' ({} handle(s) alive)",
                    Arc::strong_count(&hello)
                );
            }
        }

        let presses = Arc::clone(&self.key_presses);
        engine
            .input()
            .events()
            .input
            .connect(self.owner, move |event: &InputEvent| {
                if event.value > 0.0 {
                    presses.fetch_add(1, Ordering::Relaxed);
                }
            });

        match engine.window_manager_mut().new_window() {
            Some(window) => {
                window.set_title("Atrium Sandbox");
                window
                    .events()
                    .size_changed
                    .connect(self.owner, |size: &Size| {
                        log::info!("Window resized to {}x{}", size.width, size.height);
                    });
                engine.initialize_gui(Arc::clone(&window));
                self.window = Some(window);
            }
            None => log::warn!("No window available, running without GUI"),
        }
        true
    }

    fn frame(&mut self, engine: &mut Engine, _frame: &mut dyn FrameGraphicsContext) {
        let index = engine.graphics().current_frame_index();
        if index % 30 == 0 {
            self.injector.send(InputEvent::digital(
                self.keyboard,
                InputDeviceType::KEYBOARD,
                SPACE,
                true,
            ));
        }
        if index == FRAME_LIMIT / 2 {
            if let Some(window) = &self.window {
                window.set_size(Size::new(1920, 1080));
            }
        }
        if index >= FRAME_LIMIT {
            engine.stop();
        }
    }

    fn gui(&mut self, engine: &mut Engine, ctx: &egui::Context) {
        egui::Window::new("Sandbox").show(ctx, |ui| {
            ui.label(format!(
                "Frame {}",
                engine.graphics().current_frame_index()
            ));
            ui.label(format!(
                "Key presses: {}",
                self.key_presses.load(Ordering::Relaxed)
            ));
            ui.horizontal(|ui| {
                ui.label("Name:");
                ui.text_edit_singleline(&mut self.name);
            });
        });
    }

    fn close_requested(&mut self, engine: &Engine, should_exit: &mut bool) {
        log::info!(
            "Stopping after {} frames",
            engine.frame_stats().total_frames()
        );
        *should_exit = true;
    }

    fn shutdown(&mut self, engine: &mut Engine) {
        engine.input().events().input.disconnect(self.owner);
        log::info!(
            "Saw {} key presses",
            self.key_presses.load(Ordering::Relaxed)
        );
    }
}

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(&path)
            .with_context(|| format!("failed to load engine config '{path}'"))?,
        None => EngineConfig::default(),
    };
    init_logging(&config.log_filter);

    let mut input = VirtualInputApi::new();
    let keyboard = input.add_device(InputDeviceType::KEYBOARD, "virtual keyboard");
    let app_input = input.injector();

    let mut instance = EngineInstance::builder()
        .with_config(config)
        .with_window_manager(HeadlessWindowManager::new().single_window())
        .with_input(input)
        .build()
        .context("failed to create the engine instance")?;
    instance.engine().plugins().register::<Greeter>();

    let exit_code = instance.run(&mut SandboxApp::new(app_input, keyboard.id()));
    drop(instance);

    if exit_code != 0 {
        bail!("sandbox exited with code {exit_code}");
    }
    Ok(())
}
