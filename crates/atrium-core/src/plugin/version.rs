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

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A `major.minor.patch[-pre]` version number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    /// Incremented on breaking changes.
    pub major: u32,
    /// Incremented on backwards-compatible additions.
    pub minor: u32,
    /// Incremented on fixes.
    pub patch: u32,
    /// Optional pre-release tag, without the leading `-`.
    pub pre_release: Option<String>,
}

/// Failure to parse a [`SemanticVersion`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid semantic version '{input}': {reason}")]
pub struct VersionParseError {
    input: String,
    reason: &'static str,
}

impl SemanticVersion {
    /// Creates a release version.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            pre_release: None,
        }
    }

    /// Attaches a pre-release tag.
    pub fn with_pre_release(mut self, tag: impl Into<String>) -> Self {
        self.pre_release = Some(tag.into());
        self
    }

    /// Returns `true` if something built against `self` can be used by a host
    /// exposing `other`.
    ///
    /// Major versions must match. While the major version is 0, the minor
    /// version must match too, and pre-releases only match themselves.
    pub fn is_compatible_with(&self, other: &SemanticVersion) -> bool {
        if self.major != other.major {
            return false;
        }
        if self.major == 0 {
            return self.minor == other.minor
                && (self.pre_release.is_none() && other.pre_release.is_none() || self == other);
        }
        true
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre_release {
            write!(f, "-{pre}")?;
        }
        Ok(())
    }
}

impl FromStr for SemanticVersion {
    type Err = VersionParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let error = |reason| VersionParseError {
            input: input.to_string(),
            reason,
        };

        let (core, pre_release) = match input.split_once('-') {
            Some((_, "")) => return Err(error("empty pre-release tag")),
            Some((core, pre)) => (core, Some(pre.to_string())),
            None => (input, None),
        };

        let mut parts = core.split('.');
        let mut next = |name: &'static str| -> Result<u32, VersionParseError> {
            parts
                .next()
                .ok_or_else(|| error(name))?
                .parse()
                .map_err(|_| error("components must be unsigned integers"))
        };

        let major = next("missing major component")?;
        let minor = next("missing minor component")?;
        let patch = next("missing patch component")?;
        if parts.next().is_some() {
            return Err(error("too many components"));
        }

        Ok(Self {
            major,
            minor,
            patch,
            pre_release,
        })
    }
}
