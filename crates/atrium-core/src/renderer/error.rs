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

//! Error type for graphics resource creation.

use std::path::PathBuf;
use thiserror::Error;

/// An error related to the creation or loading of a GPU resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The active backend does not create this kind of resource.
    #[error("{0} is not supported by the active graphics backend")]
    Unsupported(&'static str),

    /// A file backing the resource could not be read.
    #[error("failed to load '{path}': {reason}")]
    Load {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O or decoding error.
        reason: String,
    },

    /// The description passed to a create call was not usable.
    #[error("invalid resource description: {0}")]
    InvalidDescription(String),

    /// An error originating from the backend implementation.
    #[error("backend error: {0}")]
    Backend(String),
}
