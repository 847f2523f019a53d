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

//! Provides the application event model and the queue that buffers it.
//!
//! Producers (input adapters, timers, game code) [`post`](EventQueue::post) events
//! into an [`EventQueue`]. A single consumer, usually the main loop, drains it once
//! per tick with [`drain`](EventQueue::drain), [`poll`](EventQueue::poll) or one of
//! the type-selective operations. Every selective operation is a stable partition:
//! both the extracted events and the ones left behind keep their insertion order.
//!
//! The queue is an explicitly owned object. Share it between threads with an
//! `Arc<EventQueue>` instead of reaching for global state.

mod config;
mod error;
mod queue;
mod types;

pub use self::config::{ConfigError, EventQueueConfig};
pub use self::error::QueueError;
pub use self::queue::{EventQueue, QueueStats, MAX_EVENTS_IN_QUEUE};
pub use self::types::{Event, EventData, EventType, Modifiers, MouseButton, UserPayload};
