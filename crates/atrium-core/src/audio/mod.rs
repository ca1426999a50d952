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

//! Defines the abstract audio contracts.

use std::path::Path;
use std::sync::Arc;

/// Loading progress of an [`AudioClip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing has been read yet.
    Unloaded,
    /// Data is being read or decoded.
    Loading,
    /// The clip is ready to play.
    Loaded,
    /// Loading failed.
    Error,
}

/// How a clip's data is kept in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadType {
    /// Decompressed when loaded and stored uncompressed.
    #[default]
    DecompressOnLoad,
    /// Kept compressed in memory and decompressed at mix time.
    DecompressAtMix,
    /// Streamed from disk.
    Streaming,
}

/// A playable audio clip.
pub trait AudioClip: Send + Sync {
    /// Returns how the clip keeps its data.
    fn load_type(&self) -> LoadType;

    /// Returns the current loading progress.
    fn load_state(&self) -> LoadState;

    /// Starts playing from the current playhead.
    fn play(&self);

    /// Stops playing without moving the playhead.
    fn stop(&self);
}

/// Interface for accessing and using audio devices.
pub trait AudioApi: Send {
    /// Sets up a clip reading from `path`.
    ///
    /// Returns `None` if the backend cannot provide audio for that file.
    fn create_clip_from_disk(&mut self, path: &Path, load_type: LoadType)
        -> Option<Arc<dyn AudioClip>>;
}
