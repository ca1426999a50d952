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

use atrium_core::math::{Color, Rect};
use atrium_core::platform::Window;
use atrium_core::renderer::{
    BufferTarget, FrameGraphicsContext, GraphicsApi, GraphicsBuffer, PipelineState,
    PipelineStateDescription, PrimitiveTopology, RenderTexture, ResourceError, ResourceManager,
    Shader, ShaderStage, Texture, TextureFormat,
};
use std::path::Path;
use std::sync::Arc;

/// A graphics backend that records nothing and only counts frames.
#[derive(Debug, Default)]
pub struct NullGraphicsApi {
    frame_counter: u64,
    resources: NullResourceManager,
}

impl NullGraphicsApi {
    /// Creates the backend with its frame counter at zero.
    pub fn new() -> Self {
        Self::default()
    }
}

impl GraphicsApi for NullGraphicsApi {
    fn create_frame_graphics_context(&mut self) -> Box<dyn FrameGraphicsContext> {
        Box::new(NullFrameContext)
    }

    fn current_frame_index(&self) -> u64 {
        self.frame_counter
    }

    fn resource_manager(&mut self) -> &mut dyn ResourceManager {
        &mut self.resources
    }

    fn mark_frame_start(&mut self) {
        self.frame_counter += 1;
        log::trace!("Null graphics frame {} started", self.frame_counter);
    }

    fn mark_frame_end(&mut self) {}

    fn supports_multiple_windows(&self) -> bool {
        false
    }
}

/// Discards every recorded command.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFrameContext;

impl FrameGraphicsContext for NullFrameContext {
    fn clear_color(&mut self, _target: &Arc<dyn RenderTexture>, _color: Color) {}

    fn clear_depth(&mut self, _target: &Arc<dyn RenderTexture>, _depth: f32, _stencil: u8) {}

    fn set_render_targets(
        &mut self,
        _targets: &[Arc<dyn RenderTexture>],
        _depth: Option<&Arc<dyn RenderTexture>>,
    ) {
    }

    fn set_viewport(&mut self, _viewport: Rect) {}

    fn set_scissor_rect(&mut self, _rect: Option<Rect>) {}

    fn set_pipeline_state(&mut self, _pipeline: &Arc<dyn PipelineState>) {}

    fn set_vertex_buffer(&mut self, _buffer: &Arc<dyn GraphicsBuffer>, _slot: u32) {}

    fn set_primitive_topology(&mut self, _topology: PrimitiveTopology) {}

    fn draw(&mut self, _vertex_count: u32, _first_vertex: u32) {}

    fn draw_indexed(&mut self, _index_count: u32, _first_index: u32, _base_vertex: i32) {}

    fn draw_instanced(
        &mut self,
        _vertex_count: u32,
        _instance_count: u32,
        _first_vertex: u32,
        _first_instance: u32,
    ) {
    }

    fn dispatch(&mut self, _groups_x: u32, _groups_y: u32, _groups_z: u32) {}
}

/// Refuses to create any resource.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullResourceManager;

impl ResourceManager for NullResourceManager {
    fn create_render_texture_for_window(
        &mut self,
        _window: &dyn Window,
    ) -> Result<Arc<dyn RenderTexture>, ResourceError> {
        Err(ResourceError::Unsupported("window render texture"))
    }

    fn create_graphics_buffer(
        &mut self,
        _target: BufferTarget,
        _count: u32,
        _stride: u32,
    ) -> Result<Arc<dyn GraphicsBuffer>, ResourceError> {
        Err(ResourceError::Unsupported("graphics buffer"))
    }

    fn create_shader(
        &mut self,
        _source: &Path,
        _stage: ShaderStage,
        _entry_point: &str,
    ) -> Result<Arc<dyn Shader>, ResourceError> {
        Err(ResourceError::Unsupported("shader"))
    }

    fn create_pipeline_state(
        &mut self,
        _description: &PipelineStateDescription,
    ) -> Result<Arc<dyn PipelineState>, ResourceError> {
        Err(ResourceError::Unsupported("pipeline state"))
    }

    fn create_texture_2d(
        &mut self,
        _width: u32,
        _height: u32,
        _format: TextureFormat,
    ) -> Result<Arc<dyn Texture>, ResourceError> {
        Err(ResourceError::Unsupported("texture"))
    }

    fn load_texture(&mut self, _path: &Path) -> Result<Arc<dyn Texture>, ResourceError> {
        Err(ResourceError::Unsupported("texture"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_counter_advances_on_frame_start() {
        let mut graphics = NullGraphicsApi::new();
        assert_eq!(graphics.current_frame_index(), 0);

        graphics.mark_frame_start();
        graphics.mark_frame_end();
        graphics.mark_frame_start();

        assert_eq!(graphics.current_frame_index(), 2);
    }

    #[test]
    fn resources_are_unsupported() {
        let mut graphics = NullGraphicsApi::new();
        let result = graphics
            .resource_manager()
            .create_graphics_buffer(BufferTarget::Vertex, 3, 12);
        assert!(matches!(result, Err(ResourceError::Unsupported(_))));
    }
}
