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

//! The bounded, ordered event queue.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::config::EventQueueConfig;
use super::error::QueueError;
use super::types::{Event, EventType};

/// The default number of events a queue holds before [`EventQueue::post`] fails.
pub const MAX_EVENTS_IN_QUEUE: usize = 256;

/// Running counters describing a queue's traffic since it was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueueStats {
    /// Events accepted by `post`.
    pub posted: u64,
    /// Events refused by `post`.
    pub rejected: u64,
    /// Events handed back to a consumer by `drain`, `poll` or a typed drain.
    pub drained: u64,
    /// Events removed by one of the `clear` operations.
    pub discarded: u64,
    /// The largest number of events held at once.
    pub high_water: usize,
}

#[derive(Debug, Default)]
struct QueueState {
    events: VecDeque<Event>,
    stats: QueueStats,
}

/// A thread-safe, bounded FIFO of [`Event`]s.
///
/// Producers call [`post`](Self::post) from any thread; it never blocks and fails with
/// [`QueueError::QueueFull`] instead of evicting anything. The consumer empties the
/// queue with [`drain`](Self::drain) or [`poll`](Self::poll), or pulls out just the
/// events it cares about with [`drain_type`](Self::drain_type) and
/// [`drain_types`](Self::drain_types). Every operation runs under a single lock, so no
/// partial update is ever observable.
///
/// Type-selective operations perform a stable partition: the extracted events and
/// the ones that stay behind both keep their original relative order.
#[derive(Debug)]
pub struct EventQueue {
    capacity: usize,
    state: Mutex<QueueState>,
}

impl EventQueue {
    /// Creates an empty queue holding at most [`MAX_EVENTS_IN_QUEUE`] events.
    pub fn new() -> Self {
        Self::with_capacity(MAX_EVENTS_IN_QUEUE)
    }

    /// Creates an empty queue holding at most `capacity` events.
    ///
    /// A zero capacity yields a queue that rejects every post. Storage is reserved for
    /// at most [`MAX_EVENTS_IN_QUEUE`] events up front and grows up to `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        log::debug!("EventQueue initialized with capacity {capacity}.");
        Self {
            capacity,
            state: Mutex::new(QueueState {
                events: VecDeque::with_capacity(capacity.min(MAX_EVENTS_IN_QUEUE)),
                stats: QueueStats::default(),
            }),
        }
    }

    /// Creates an empty queue from a configuration.
    pub fn from_config(config: &EventQueueConfig) -> Self {
        Self::with_capacity(config.capacity)
    }

    /// Returns the maximum number of events this queue holds.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of pending events.
    pub fn len(&self) -> usize {
        self.lock().events.len()
    }

    /// Returns `true` if no event is pending.
    pub fn is_empty(&self) -> bool {
        self.lock().events.is_empty()
    }

    /// Returns a snapshot of the traffic counters.
    pub fn stats(&self) -> QueueStats {
        self.lock().stats
    }

    /// Appends `event` to the tail of the queue.
    ///
    /// The capacity check and the append happen under the same lock. On error the event
    /// is dropped and the queue is unchanged.
    ///
    /// # Errors
    ///
    /// * [`QueueError::QueueFull`] if the queue already holds `capacity` events.
    /// * [`QueueError::ReservedType`] if the event is the `NoEvent` sentinel.
    pub fn post(&self, event: Event) -> Result<(), QueueError> {
        if event.is_none() {
            return Err(QueueError::ReservedType);
        }

        let mut state = self.lock();
        if state.events.len() >= self.capacity {
            state.stats.rejected += 1;
            return Err(QueueError::QueueFull {
                capacity: self.capacity,
            });
        }

        log::trace!("Posting a {} event.", event.kind);
        state.events.push_back(event);
        state.stats.posted += 1;
        state.stats.high_water = state.stats.high_water.max(state.events.len());
        Ok(())
    }

    /// Removes and returns every pending event, oldest first.
    pub fn drain(&self) -> Vec<Event> {
        let mut state = self.lock();
        let events: Vec<Event> = state.events.drain(..).collect();
        state.stats.drained += events.len() as u64;
        log::trace!("Drained {} events.", events.len());
        events
    }

    /// Removes and returns the oldest pending event.
    ///
    /// Returns the `NoEvent` sentinel when the queue is empty.
    pub fn poll(&self) -> Event {
        let mut state = self.lock();
        match state.events.pop_front() {
            Some(event) => {
                log::trace!("Polled a {} event.", event.kind);
                state.stats.drained += 1;
                event
            }
            None => Event::none(),
        }
    }

    /// Removes and returns every pending event of type `kind`, oldest first.
    /// Events of other types stay queued in their original order.
    pub fn drain_type(&self, kind: EventType) -> Vec<Event> {
        self.extract(|candidate| candidate == kind)
    }

    /// Removes and returns every pending event whose type is in `kinds`, oldest first.
    /// Events of other types stay queued in their original order.
    pub fn drain_types(&self, kinds: &[EventType]) -> Vec<Event> {
        self.extract(|candidate| kinds.contains(&candidate))
    }

    /// Discards every pending event.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.stats.discarded += state.events.len() as u64;
        state.events.clear();
    }

    /// Discards every pending event of type `kind`. Other events keep their order.
    pub fn clear_type(&self, kind: EventType) {
        self.discard(|candidate| candidate == kind);
    }

    /// Discards every pending event whose type is in `kinds`. Other events keep their order.
    pub fn clear_types(&self, kinds: &[EventType]) {
        self.discard(|candidate| kinds.contains(&candidate));
    }

    // --- Private Helper Functions ---

    /// (Internal) Stable partition: matched events are returned, the rest is kept.
    fn extract(&self, matches: impl Fn(EventType) -> bool) -> Vec<Event> {
        let mut state = self.lock();
        let pending = std::mem::take(&mut state.events);

        let mut matched = Vec::new();
        let mut remainder = VecDeque::with_capacity(pending.len());
        for event in pending {
            if matches(event.kind) {
                matched.push(event);
            } else {
                remainder.push_back(event);
            }
        }

        state.events = remainder;
        state.stats.drained += matched.len() as u64;
        log::trace!(
            "Extracted {} events, {} remain queued.",
            matched.len(),
            state.events.len()
        );
        matched
    }

    /// (Internal) Order-preserving in-place removal of matched events.
    fn discard(&self, matches: impl Fn(EventType) -> bool) {
        let mut state = self.lock();
        let before = state.events.len();
        state.events.retain(|event| !matches(event.kind));
        state.stats.discarded += (before - state.events.len()) as u64;
    }

    /// (Internal) Acquires the state lock.
    ///
    /// Every mutation completes before the guard is released, so a poisoned lock still
    /// holds a consistent buffer.
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventData;

    const USER: EventType = EventType::USER_EVENT;

    fn codes(events: &[Event]) -> Vec<i64> {
        events.iter().filter_map(Event::user_code).collect()
    }

    #[test]
    fn test_new_queue_is_empty() {
        let queue = EventQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.capacity(), MAX_EVENTS_IN_QUEUE);
        assert_eq!(queue.stats(), QueueStats::default());
    }

    /// Fill to capacity; the next post is refused and contributes nothing.
    #[test]
    fn test_capacity_boundary() {
        let queue = EventQueue::new();
        for i in 0..256 {
            queue.post(Event::user(USER, i)).expect("post under capacity");
        }

        assert_eq!(
            queue.post(Event::user(USER, 256)),
            Err(QueueError::QueueFull { capacity: 256 })
        );
        assert_eq!(queue.len(), 256);

        let events = queue.drain();
        assert_eq!(events.len(), 256);
        assert_eq!(codes(&events), (0..256).collect::<Vec<_>>());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_post_accepted_again_after_drain() {
        let queue = EventQueue::with_capacity(2);
        queue.post(Event::quit()).unwrap();
        queue.post(Event::quit()).unwrap();
        assert!(queue.post(Event::quit()).is_err());

        assert_eq!(queue.poll().kind, EventType::QUIT);
        assert!(queue.post(Event::mouse_motion(1.0, 1.0)).is_ok());
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_zero_capacity_rejects_everything() {
        let queue = EventQueue::with_capacity(0);
        assert_eq!(
            queue.post(Event::quit()),
            Err(QueueError::QueueFull { capacity: 0 })
        );
        assert!(queue.is_empty());
    }

    /// Storage is reserved lazily, so an enormous logical bound is still usable.
    #[test]
    fn test_huge_capacity_from_config() {
        let config = EventQueueConfig::from_json_str(r#"{ "capacity": 18446744073709551615 }"#)
            .expect("non-zero capacity is valid");
        let queue = EventQueue::from_config(&config);
        assert_eq!(queue.capacity(), usize::MAX);

        queue.post(Event::quit()).unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.poll().kind, EventType::QUIT);
    }

    #[test]
    fn test_post_no_event_is_rejected() {
        let queue = EventQueue::new();
        assert_eq!(queue.post(Event::none()), Err(QueueError::ReservedType));
        assert_eq!(
            queue.post(Event::new(EventType::NO_EVENT, EventData::Resize { width: 1, height: 1 })),
            Err(QueueError::ReservedType)
        );
        assert!(queue.is_empty());
        assert_eq!(queue.stats().rejected, 0);
    }

    #[test]
    fn test_drain_preserves_fifo_order() {
        let queue = EventQueue::new();
        for i in 0..10 {
            queue.post(Event::user(USER, i)).unwrap();
        }
        assert_eq!(codes(&queue.drain()), (0..10).collect::<Vec<_>>());
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_poll_returns_oldest_first() {
        let queue = EventQueue::new();
        queue.post(Event::key_down("KeyA", Default::default())).unwrap();
        queue.post(Event::window_resize(640, 480)).unwrap();

        assert_eq!(queue.poll().kind, EventType::KEY_DOWN);
        assert_eq!(queue.poll(), Event::window_resize(640, 480));
        assert!(queue.poll().is_none());
    }

    #[test]
    fn test_poll_on_empty_queue_is_idempotent() {
        let queue = EventQueue::new();
        for _ in 0..5 {
            let event = queue.poll();
            assert_eq!(event.kind, EventType::NO_EVENT);
            assert_eq!(event.data, EventData::None);
            assert_eq!(queue.len(), 0);
        }
        assert_eq!(queue.stats().drained, 0);
    }

    /// Even indices are `UserEvent`, odd ones `UserEvent+1`.
    #[test]
    fn test_drain_type_is_stable_partition() {
        let queue = EventQueue::new();
        for i in 0..10 {
            queue.post(Event::user(USER + (i % 2) as u32, i)).unwrap();
        }

        let matched = queue.drain_type(USER);
        assert_eq!(codes(&matched), vec![0, 2, 4, 6, 8]);
        assert!(matched.iter().all(|e| e.kind == USER));

        let remainder = queue.drain();
        assert_eq!(codes(&remainder), vec![1, 3, 5, 7, 9]);
        assert!(remainder.iter().all(|e| e.kind == USER + 1));
    }

    #[test]
    fn test_drain_type_without_match_leaves_queue_untouched() {
        let queue = EventQueue::new();
        for i in 0..4 {
            queue.post(Event::user(USER, i)).unwrap();
        }
        assert!(queue.drain_type(EventType::QUIT).is_empty());
        assert_eq!(codes(&queue.drain()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_drain_types_matches_union_in_original_order() {
        let queue = EventQueue::new();
        for i in 0..12 {
            queue.post(Event::user(USER + (i % 3) as u32, i)).unwrap();
        }

        let matched = queue.drain_types(&[USER + 2, USER]);
        assert_eq!(codes(&matched), vec![0, 2, 3, 5, 6, 8, 9, 11]);

        let remainder = queue.drain();
        assert_eq!(codes(&remainder), vec![1, 4, 7, 10]);
    }

    #[test]
    fn test_drain_types_with_empty_list_matches_nothing() {
        let queue = EventQueue::new();
        queue.post(Event::quit()).unwrap();
        assert!(queue.drain_types(&[]).is_empty());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_clear_discards_everything() {
        let queue = EventQueue::new();
        for i in 0..5 {
            queue.post(Event::user(USER, i)).unwrap();
        }
        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.poll().is_none());
        assert_eq!(queue.stats().discarded, 5);
    }

    /// Types cycle through `UserEvent`, `UserEvent+1`, `UserEvent+2`.
    #[test]
    fn test_clear_type_keeps_remainder_order() {
        let queue = EventQueue::new();
        for i in 0..12 {
            queue.post(Event::user(USER + (i % 3) as u32, i)).unwrap();
        }

        queue.clear_type(USER);

        let remainder = queue.drain();
        assert_eq!(remainder.len(), 8);
        assert!(remainder.iter().all(|e| e.kind != USER));
        assert_eq!(codes(&remainder), vec![1, 2, 4, 5, 7, 8, 10, 11]);
    }

    #[test]
    fn test_clear_types_keeps_remainder_order() {
        let queue = EventQueue::new();
        queue.post(Event::mouse_motion(0.0, 0.0)).unwrap();
        queue.post(Event::key_down("KeyW", Default::default())).unwrap();
        queue.post(Event::mouse_motion(1.0, 0.0)).unwrap();
        queue.post(Event::window_resize(10, 10)).unwrap();
        queue.post(Event::key_up("KeyW", Default::default())).unwrap();

        queue.clear_types(&[EventType::MOUSE_MOTION, EventType::WINDOW_RESIZE]);

        let kinds: Vec<EventType> = queue.drain().into_iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventType::KEY_DOWN, EventType::KEY_UP]);
    }

    #[test]
    fn test_selective_drain_frees_capacity() {
        let queue = EventQueue::with_capacity(4);
        for i in 0..4 {
            queue.post(Event::user(USER + (i % 2) as u32, i)).unwrap();
        }
        assert!(queue.post(Event::quit()).is_err());

        queue.drain_type(USER + 1);
        assert_eq!(queue.len(), 2);
        queue.post(Event::quit()).unwrap();
        queue.post(Event::quit()).unwrap();
        assert!(queue.post(Event::quit()).is_err());
    }

    #[test]
    fn test_stats_track_traffic() {
        let queue = EventQueue::with_capacity(3);
        for i in 0..5 {
            let _ = queue.post(Event::user(USER + (i % 2) as u32, i));
        }
        queue.poll();
        queue.drain_type(USER + 1);
        queue.clear();

        assert_eq!(
            queue.stats(),
            QueueStats {
                posted: 3,
                rejected: 2,
                drained: 2,
                discarded: 1,
                high_water: 3,
            }
        );
    }
}
