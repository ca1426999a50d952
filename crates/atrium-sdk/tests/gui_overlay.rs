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

mod common;

use atrium_core::input::InputDeviceType;
use atrium_core::platform::Window;
use atrium_core::renderer::FrameGraphicsContext;
use atrium_sdk::{Application, Engine, EngineInstance};
use common::{engine_lock, recorders, Journal};
use std::sync::Arc;

/// Opens a window with an overlay and focuses a text field in it.
struct Editor {
    journal: Journal,
    window: Option<Arc<dyn Window>>,
    text: String,
    frames: u32,
    gui_passes: u32,
    close_on_frame: Option<u32>,
    stop_on_frame: u32,
}

impl Editor {
    fn new(journal: &Journal, stop_on_frame: u32) -> Self {
        Self {
            journal: journal.clone(),
            window: None,
            text: String::new(),
            frames: 0,
            gui_passes: 0,
            close_on_frame: None,
            stop_on_frame,
        }
    }
}

impl Application for Editor {
    fn startup(&mut self, engine: &mut Engine) -> bool {
        let Some(window) = engine.window_manager_mut().new_window() else {
            return false;
        };
        engine.initialize_gui(Arc::clone(&window));
        self.window = Some(window);
        true
    }

    fn frame(&mut self, engine: &mut Engine, _frame: &mut dyn FrameGraphicsContext) {
        self.frames += 1;
        self.journal.push("app.frame");
        if self.close_on_frame == Some(self.frames) {
            if let Some(window) = &self.window {
                window.close();
            }
        }
        if self.frames == self.stop_on_frame {
            engine.stop();
        }
    }

    fn gui(&mut self, _engine: &mut Engine, ctx: &egui::Context) {
        self.gui_passes += 1;
        self.journal.push("app.gui");
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.text_edit_singleline(&mut self.text).request_focus();
        });
    }

    fn shutdown(&mut self, engine: &mut Engine) {
        assert!(engine.gui().is_none(), "overlay is torn down before shutdown");
        self.journal.push("app.shutdown");
    }
}

#[test]
fn gui_pass_runs_between_frame_and_frame_end() {
    let _lock = engine_lock();
    let rec = recorders();
    let journal = rec.journal.clone();
    let mut instance = EngineInstance::builder()
        .with_graphics(rec.graphics)
        .with_window_manager(rec.windows)
        .with_input(rec.input)
        .build()
        .expect("backends supplied");

    assert_eq!(instance.run(&mut Editor::new(&journal, 1)), 0);

    let entries = journal.entries();
    let frame = entries
        .iter()
        .position(|e| e == "app.frame")
        .expect("frame ran");
    assert_eq!(
        entries[frame..frame + 3],
        ["app.frame", "app.gui", "graphics.end"]
    );
    assert_eq!(entries.last().map(String::as_str), Some("app.shutdown"));
}

#[test]
fn focused_text_field_masks_keyboard_input() {
    let _lock = engine_lock();
    let rec = recorders();
    let journal = rec.journal.clone();
    let masks = Arc::clone(&rec.masks);
    let mut instance = EngineInstance::builder()
        .with_graphics(rec.graphics)
        .with_window_manager(rec.windows)
        .with_input(rec.input)
        .build()
        .expect("backends supplied");

    instance.run(&mut Editor::new(&journal, 4));

    let masks = masks.lock();
    assert_eq!(masks.len(), 4);
    assert_eq!(masks[0], InputDeviceType::all());
    let last = *masks.last().expect("reported");
    assert!(!last.contains(InputDeviceType::KEYBOARD));
    assert!(last.contains(InputDeviceType::GAMEPAD));
}

#[test]
fn closed_window_disables_the_overlay() {
    let _lock = engine_lock();
    let rec = recorders();
    let journal = rec.journal.clone();
    let masks = Arc::clone(&rec.masks);
    let mut instance = EngineInstance::builder()
        .with_graphics(rec.graphics)
        .with_window_manager(rec.windows)
        .with_input(rec.input)
        .build()
        .expect("backends supplied");

    let mut app = Editor::new(&journal, 4);
    app.close_on_frame = Some(2);
    assert_eq!(instance.run(&mut app), 0);

    // The close is pumped at the start of frame 3.
    assert_eq!(app.frames, 4);
    assert_eq!(app.gui_passes, 2);
    assert_eq!(masks.lock()[3], InputDeviceType::all());
}

#[test]
#[should_panic(expected = "only be initialized once")]
fn gui_cannot_be_initialized_twice() {
    let _lock = engine_lock();
    let rec = recorders();
    let mut instance = EngineInstance::builder()
        .with_window_manager(rec.windows)
        .build()
        .expect("backends supplied");

    let engine = instance.engine_mut();
    let window = engine.window_manager_mut().new_window().expect("window");
    engine.initialize_gui(Arc::clone(&window));
    engine.initialize_gui(window);
}

#[test]
fn gui_output_is_available_after_a_frame() {
    let _lock = engine_lock();
    let rec = recorders();
    let journal = rec.journal.clone();
    let mut instance = EngineInstance::builder()
        .with_window_manager(rec.windows)
        .build()
        .expect("backends supplied");

    struct Peek {
        inner: Editor,
        saw_output: bool,
    }

    impl Application for Peek {
        fn startup(&mut self, engine: &mut Engine) -> bool {
            self.inner.startup(engine)
        }

        fn frame(&mut self, engine: &mut Engine, frame: &mut dyn FrameGraphicsContext) {
            if self.inner.frames == 1 {
                self.saw_output = engine.take_gui_output().is_some();
            }
            self.inner.frame(engine, frame);
        }

        fn gui(&mut self, engine: &mut Engine, ctx: &egui::Context) {
            self.inner.gui(engine, ctx);
        }
    }

    let mut app = Peek {
        inner: Editor::new(&journal, 2),
        saw_output: false,
    };
    instance.run(&mut app);
    assert!(app.saw_output);
}
