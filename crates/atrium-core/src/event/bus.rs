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

/// A thread-safe message queue drained by its owner once per pump.
///
/// Producers hold a [`flume::Sender`] obtained from [`EventBus::sender`] and may
/// live on any thread. The owner drains pending messages without blocking
/// through [`EventBus::drain`], which is how the headless backends emulate an
/// OS message loop that is polled rather than waited on.
#[derive(Debug)]
pub struct EventBus<T: Send + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Send + 'static> EventBus<T> {
    /// Creates a new bus backed by an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Queues a message. Never blocks.
    ///
    /// The bus owns its receiver, so sending only fails if the bus is being
    /// torn down concurrently; that case is logged and the message dropped.
    pub fn publish(&self, message: T) {
        if let Err(e) = self.sender.send(message) {
            log::error!("Failed to queue message: {e}. Receiver likely disconnected.");
        }
    }

    /// Returns a clone of the sending end, for producers on other threads.
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// Returns every message queued so far, in order, without waiting.
    ///
    /// Messages published while the returned vector is being processed are
    /// left for the next drain, so a handler that re-queues cannot spin the
    /// pump forever.
    pub fn drain(&self) -> Vec<T> {
        let pending = self.receiver.len();
        let mut messages = Vec::with_capacity(pending);
        for _ in 0..pending {
            match self.receiver.try_recv() {
                Ok(message) => messages.push(message),
                Err(_) => break,
            }
        }
        messages
    }

    /// Number of messages waiting for the next drain.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl<T: Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}
