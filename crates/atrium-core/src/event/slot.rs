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

use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identifies whoever connected a callback, so it can later be disconnected
/// without holding on to the callback itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId(u64);

impl OwnerId {
    /// Allocates a new process-unique owner identity.
    pub fn new() -> Self {
        static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_OWNER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for OwnerId {
    fn default() -> Self {
        Self::new()
    }
}

type Callback<A> = Arc<dyn Fn(&A) + Send + Sync>;

/// A multi-subscriber callback registry.
///
/// Callbacks are invoked synchronously, in registration order, on the thread
/// that calls [`EventSlot::invoke`]. The subscriber list is snapshot before
/// dispatch, so a callback may connect or disconnect (itself included) while
/// the slot is being invoked; such changes apply from the next invocation.
///
/// Vetoable events use a payload with interior mutability, see
/// [`ClosingEvent`](crate::platform::ClosingEvent).
pub struct EventSlot<A> {
    subscribers: Mutex<Vec<(OwnerId, Callback<A>)>>,
}

impl<A> EventSlot<A> {
    /// Creates a slot with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Adds `callback` under `owner`. An owner may connect several callbacks.
    pub fn connect<F>(&self, owner: OwnerId, callback: F)
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        self.subscribers.lock().push((owner, Arc::new(callback)));
    }

    /// Removes every callback connected by `owner` and returns how many were removed.
    pub fn disconnect(&self, owner: OwnerId) -> usize {
        let mut subscribers = self.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|(id, _)| *id != owner);
        before - subscribers.len()
    }

    /// Returns `true` if `owner` has at least one callback connected.
    pub fn is_connected(&self, owner: OwnerId) -> bool {
        self.subscribers.lock().iter().any(|(id, _)| *id == owner)
    }

    /// Calls every connected callback with `args`.
    pub fn invoke(&self, args: &A) {
        let snapshot: Vec<Callback<A>> = self
            .subscribers
            .lock()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in snapshot {
            callback(args);
        }
    }

    /// Number of connected callbacks.
    pub fn len(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// Returns `true` if nothing is connected.
    pub fn is_empty(&self) -> bool {
        self.subscribers.lock().is_empty()
    }
}

impl<A> Default for EventSlot<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for EventSlot<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSlot")
            .field("subscribers", &self.len())
            .finish()
    }
}
