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

//! Opaque GPU resources and the factory that creates them.

use super::error::ResourceError;
use super::frame::PrimitiveTopology;
use crate::math::Size;
use crate::platform::Window;
use std::path::Path;
use std::sync::Arc;

/// Pixel formats for textures and render targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 8-bit RGBA, normalized.
    Rgba8Unorm,
    /// 8-bit RGBA, sRGB encoded.
    Rgba8UnormSrgb,
    /// 16-bit float RGBA.
    Rgba16Float,
    /// 32-bit float depth.
    Depth32Float,
    /// 24-bit depth with 8-bit stencil.
    Depth24Stencil8,
}

/// What a buffer is bound as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    /// Per-vertex data.
    Vertex,
    /// Index data.
    Index,
    /// Shader constants.
    Constant,
    /// Read/write structured data.
    Structured,
}

/// Shader pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// Vertex stage.
    Vertex,
    /// Pixel/fragment stage.
    Pixel,
    /// Compute stage.
    Compute,
}

/// A texture that can be rendered to, such as a window's back buffer.
pub trait RenderTexture: Send + Sync {
    /// Returns the texture extent.
    fn size(&self) -> Size;

    /// Returns the pixel format.
    fn format(&self) -> TextureFormat;
}

/// A sampled texture.
pub trait Texture: Send + Sync {
    /// Returns the texture extent.
    fn size(&self) -> Size;

    /// Returns the pixel format.
    fn format(&self) -> TextureFormat;
}

/// A GPU buffer.
pub trait GraphicsBuffer: Send + Sync {
    /// Returns the binding target.
    fn target(&self) -> BufferTarget;

    /// Returns the number of elements.
    fn count(&self) -> u32;

    /// Returns the size of one element in bytes.
    fn stride(&self) -> u32;
}

/// A compiled shader module.
pub trait Shader: Send + Sync {
    /// Returns the stage the shader was compiled for.
    fn stage(&self) -> ShaderStage;
}

/// A compiled pipeline state object.
pub trait PipelineState: Send + Sync {}

/// Everything needed to build a [`PipelineState`].
#[derive(Clone)]
pub struct PipelineStateDescription {
    /// Vertex stage.
    pub vertex_shader: Arc<dyn Shader>,
    /// Optional pixel stage.
    pub pixel_shader: Option<Arc<dyn Shader>>,
    /// Primitive assembly mode.
    pub topology: PrimitiveTopology,
    /// Color target formats, one per bound target.
    pub color_formats: Vec<TextureFormat>,
    /// Depth target format, if depth testing is used.
    pub depth_format: Option<TextureFormat>,
}

/// Creates GPU resources for a [`GraphicsApi`](super::GraphicsApi).
pub trait ResourceManager {
    /// Creates the render target presenting to `window`.
    fn create_render_texture_for_window(
        &mut self,
        window: &dyn Window,
    ) -> Result<Arc<dyn RenderTexture>, ResourceError>;

    /// Creates a buffer of `count` elements of `stride` bytes.
    fn create_graphics_buffer(
        &mut self,
        target: BufferTarget,
        count: u32,
        stride: u32,
    ) -> Result<Arc<dyn GraphicsBuffer>, ResourceError>;

    /// Compiles a shader from a source file.
    fn create_shader(
        &mut self,
        source: &Path,
        stage: ShaderStage,
        entry_point: &str,
    ) -> Result<Arc<dyn Shader>, ResourceError>;

    /// Builds a pipeline state object.
    fn create_pipeline_state(
        &mut self,
        description: &PipelineStateDescription,
    ) -> Result<Arc<dyn PipelineState>, ResourceError>;

    /// Creates an empty 2D texture.
    fn create_texture_2d(
        &mut self,
        width: u32,
        height: u32,
        format: TextureFormat,
    ) -> Result<Arc<dyn Texture>, ResourceError>;

    /// Loads a texture from disk.
    fn load_texture(&mut self, path: &Path) -> Result<Arc<dyn Texture>, ResourceError>;
}
