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

use super::frame::FrameGraphicsContext;
use super::resources::ResourceManager;

/// The engine-facing contract of a graphics backend.
///
/// The run-loop calls [`mark_frame_start`](GraphicsApi::mark_frame_start) and
/// [`mark_frame_end`](GraphicsApi::mark_frame_end) exactly once per tick, in that
/// order, with user frame logic in between. The end marker submits whatever
/// was recorded into the frame context, so frame N is queued before frame
/// N+1's window pump begins.
pub trait GraphicsApi: Send {
    /// Creates the command-recording context used for every frame.
    fn create_frame_graphics_context(&mut self) -> Box<dyn FrameGraphicsContext>;

    /// Returns the index of the frame currently being recorded.
    fn current_frame_index(&self) -> u64;

    /// Returns the resource factory.
    fn resource_manager(&mut self) -> &mut dyn ResourceManager;

    /// Marks the beginning of a frame.
    fn mark_frame_start(&mut self);

    /// Marks the end of a frame and submits the recorded commands.
    fn mark_frame_end(&mut self);

    /// Returns `true` if the backend can present to more than one window.
    fn supports_multiple_windows(&self) -> bool;
}
