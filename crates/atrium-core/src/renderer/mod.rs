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

//! Graphics contracts.
//!
//! The engine core only drives frame boundaries through [`GraphicsApi`] and
//! hands the [`FrameGraphicsContext`] to user code. Everything about how
//! commands reach the GPU is the backend's concern.

pub mod error;
pub mod frame;
pub mod graphics;
pub mod resources;

pub use error::ResourceError;
pub use frame::{FrameGraphicsContext, PrimitiveTopology};
pub use graphics::GraphicsApi;
pub use resources::{
    BufferTarget, GraphicsBuffer, PipelineState, PipelineStateDescription, RenderTexture,
    ResourceManager, Shader, ShaderStage, Texture, TextureFormat,
};
