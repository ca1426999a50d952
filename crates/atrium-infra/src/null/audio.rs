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

use atrium_core::audio::{AudioApi, AudioClip, LoadType};
use std::path::Path;
use std::sync::Arc;

/// An audio API that produces no clips.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudioApi;

impl AudioApi for NullAudioApi {
    fn create_clip_from_disk(
        &mut self,
        path: &Path,
        _load_type: LoadType,
    ) -> Option<Arc<dyn AudioClip>> {
        log::debug!("Null audio API ignoring clip {}", path.display());
        None
    }
}
