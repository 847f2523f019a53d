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

//! Defines the error type returned when an event cannot be queued.

use thiserror::Error;

/// An error returned by [`EventQueue::post`](super::EventQueue::post).
///
/// A rejected event is never enqueued and the queue is left exactly as it was.
/// The queue does not retry; the producer decides whether to drop, log, or back off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The queue already holds `capacity` events.
    #[error("event queue is full ({capacity} events)")]
    QueueFull {
        /// The capacity of the queue that rejected the event.
        capacity: usize,
    },
    /// The event carried the reserved `NoEvent` type.
    #[error("the NoEvent sentinel cannot be posted")]
    ReservedType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            QueueError::QueueFull { capacity: 256 }.to_string(),
            "event queue is full (256 events)"
        );
        assert_eq!(
            QueueError::ReservedType.to_string(),
            "the NoEvent sentinel cannot be posted"
        );
    }
}
