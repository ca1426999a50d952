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

//! Provides foundational primitives for event-driven communication.
//!
//! Two primitives live here:
//!
//! - [`EventSlot`], a synchronous observer registry. Subscribers connect with an
//!   [`OwnerId`] and are invoked in registration order on the thread that raises
//!   the event. Window and input notifications are delivered through slots.
//! - [`EventBus`], a thread-safe MPSC queue. Backends use it to buffer
//!   OS-like messages until the next non-blocking pump.

mod bus;
mod slot;

pub use self::bus::EventBus;
pub use self::slot::{EventSlot, OwnerId};
