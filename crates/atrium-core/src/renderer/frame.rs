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

use super::resources::{GraphicsBuffer, PipelineState, RenderTexture};
use crate::math::{Color, Rect};
use std::sync::Arc;

/// How vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveTopology {
    /// Each vertex is a point.
    PointList,
    /// Every two vertices form a line.
    LineList,
    /// Consecutive vertices form a connected line.
    LineStrip,
    /// Every three vertices form a triangle.
    #[default]
    TriangleList,
    /// Consecutive vertices form connected triangles.
    TriangleStrip,
}

/// Records one frame's worth of graphics commands.
///
/// The context is created once by [`GraphicsApi::create_frame_graphics_context`]
/// and reused every frame. Commands recorded between `mark_frame_start` and
/// `mark_frame_end` are submitted by the backend at the end marker. User code
/// only ever borrows it for the duration of a frame callback.
///
/// [`GraphicsApi::create_frame_graphics_context`]: super::GraphicsApi::create_frame_graphics_context
pub trait FrameGraphicsContext: Send {
    /// Clears a color target.
    fn clear_color(&mut self, target: &Arc<dyn RenderTexture>, color: Color);

    /// Clears a depth-stencil target.
    fn clear_depth(&mut self, target: &Arc<dyn RenderTexture>, depth: f32, stencil: u8);

    /// Binds color targets and an optional depth target.
    fn set_render_targets(
        &mut self,
        targets: &[Arc<dyn RenderTexture>],
        depth: Option<&Arc<dyn RenderTexture>>,
    );

    /// Sets the viewport.
    fn set_viewport(&mut self, viewport: Rect);

    /// Sets the scissor rectangle, or disables scissoring with `None`.
    fn set_scissor_rect(&mut self, rect: Option<Rect>);

    /// Binds a pipeline state object.
    fn set_pipeline_state(&mut self, pipeline: &Arc<dyn PipelineState>);

    /// Binds a vertex buffer to `slot`.
    fn set_vertex_buffer(&mut self, buffer: &Arc<dyn GraphicsBuffer>, slot: u32);

    /// Sets the primitive topology for following draws.
    fn set_primitive_topology(&mut self, topology: PrimitiveTopology);

    /// Draws non-indexed vertices.
    fn draw(&mut self, vertex_count: u32, first_vertex: u32);

    /// Draws indexed vertices.
    fn draw_indexed(&mut self, index_count: u32, first_index: u32, base_vertex: i32);

    /// Draws several instances of non-indexed vertices.
    fn draw_instanced(
        &mut self,
        vertex_count: u32,
        instance_count: u32,
        first_vertex: u32,
        first_instance: u32,
    );

    /// Dispatches compute work groups.
    fn dispatch(&mut self, groups_x: u32, groups_y: u32, groups_z: u32);
}
