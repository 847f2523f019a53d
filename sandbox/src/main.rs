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

// Ember Sandbox
// Drives the event queue from concurrent producers and a fixed-rate tick loop.

mod config;

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use ember_core::event::{
    Event, EventData, EventQueue, EventType, Modifiers, MouseButton, QueueError, QueueStats,
};

use crate::config::SandboxConfig;

/// A producer scored points. Code = points.
const SCORE: EventType = EventType::user(0);
/// A producer spawned an entity. Code = entity id, payload = spawn position.
const SPAWN: EventType = EventType::user(1);

const INPUT_EVENTS: [EventType; 4] = [
    EventType::KEY_DOWN,
    EventType::KEY_UP,
    EventType::MOUSE_BUTTON_DOWN,
    EventType::MOUSE_BUTTON_UP,
];

#[derive(Debug, Default)]
struct GameState {
    score: i64,
    spawned: u64,
    keys_pressed: u64,
    clicks: u64,
    resized: Option<(u32, u32)>,
}

impl GameState {
    fn handle_input(&mut self, event: &Event) {
        match event.data {
            EventData::Key { .. } if event.kind == EventType::KEY_DOWN => self.keys_pressed += 1,
            EventData::MouseButton { .. } if event.kind == EventType::MOUSE_BUTTON_DOWN => {
                self.clicks += 1
            }
            _ => {}
        }
    }

    fn handle_game(&mut self, event: &Event) {
        match (&event.kind, &event.data) {
            (&SCORE, EventData::User { code, .. }) => self.score += code,
            (&SPAWN, EventData::User { payload, .. }) => {
                if let Some(position) = payload.as_ref().and_then(|p| p.downcast_ref::<[f32; 2]>())
                {
                    log::trace!("Spawned entity at {position:?}");
                }
                self.spawned += 1;
            }
            (&EventType::WINDOW_RESIZE, &EventData::Resize { width, height }) => {
                self.resized = Some((width, height));
            }
            _ => log::debug!("Unhandled event: {}", event.kind),
        }
    }
}

/// Posts an event, counting the ones the queue refuses.
fn post_or_count(queue: &EventQueue, event: Event, dropped: &AtomicU64) {
    match queue.post(event) {
        Ok(()) => {}
        Err(QueueError::QueueFull { .. }) => {
            dropped.fetch_add(1, Ordering::Relaxed);
        }
        Err(e) => log::error!("Producer posted an invalid event: {e}"),
    }
}

fn spawn_game_producer(
    id: usize,
    count: u32,
    queue: Arc<EventQueue>,
    dropped: Arc<AtomicU64>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for i in 0..count {
            let event = if i % 5 == 0 {
                let position = [id as f32, i as f32];
                Event::user_with_payload(SPAWN, i64::from(i), position)
            } else {
                Event::user(SCORE, 10)
            };
            post_or_count(&queue, event, &dropped);
            if i % 50 == 0 {
                thread::sleep(Duration::from_millis(1));
            }
        }
        log::debug!("Game producer {id} finished.");
    })
}

/// Simulates an input source: key presses, clicks, cursor motion, one resize, then quit.
fn spawn_input_producer(
    ticks: u32,
    interval: Duration,
    queue: Arc<EventQueue>,
    dropped: Arc<AtomicU64>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        post_or_count(&queue, Event::window_resize(1280, 720), &dropped);
        for i in 0..ticks.saturating_sub(1) {
            let (x, y) = cursor_at(i);
            post_or_count(&queue, Event::mouse_motion(x, y), &dropped);
            if i % 4 == 0 {
                post_or_count(&queue, Event::key_down("Space", Modifiers::NONE), &dropped);
                post_or_count(&queue, Event::key_up("Space", Modifiers::NONE), &dropped);
            }
            if i % 10 == 0 {
                post_or_count(&queue, Event::mouse_button_down(x, y, MouseButton::Left), &dropped);
                post_or_count(&queue, Event::mouse_button_up(x, y, MouseButton::Left), &dropped);
            }
            thread::sleep(interval);
        }
        post_or_count(&queue, Event::quit(), &dropped);
        log::debug!("Input producer finished.");
    })
}

/// Cursor position for the `i`-th simulated motion, wrapped inside a 1280x720 window.
fn cursor_at(i: u32) -> (f32, f32) {
    (((i % 1280) * 7 % 1280) as f32, ((i % 720) * 3 % 720) as f32)
}

fn log_summary(state: &GameState, stats: &QueueStats, dropped: u64, ticks: u32) {
    log::info!("--- Sandbox Summary ---");
    log::info!("  Ticks run: {ticks}");
    log::info!(
        "  Score: {} | Spawned: {} | Keys: {} | Clicks: {} | Window: {:?}",
        state.score,
        state.spawned,
        state.keys_pressed,
        state.clicks,
        state.resized
    );
    log::info!(
        "  Queue: posted {} | rejected {} | drained {} | discarded {} | high water {}",
        stats.posted,
        stats.rejected,
        stats.drained,
        stats.discarded,
        stats.high_water
    );
    log::info!("  Producers dropped {dropped} events on a full queue.");
    log::info!("-----------------------");
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = SandboxConfig::load(config_path.as_deref())?;
    let interval = Duration::from_millis(config.tick_interval_ms);

    let queue = Arc::new(EventQueue::from_config(&config.queue));
    let dropped = Arc::new(AtomicU64::new(0));

    let mut producers: Vec<_> = (0..config.producers)
        .map(|id| {
            spawn_game_producer(
                id,
                config.events_per_producer,
                Arc::clone(&queue),
                Arc::clone(&dropped),
            )
        })
        .collect();
    producers.push(spawn_input_producer(
        config.ticks,
        interval,
        Arc::clone(&queue),
        Arc::clone(&dropped),
    ));

    let mut state = GameState::default();
    let mut ticks_run = 0;
    for tick in 0..config.ticks {
        ticks_run = tick + 1;

        if !queue.drain_type(EventType::QUIT).is_empty() {
            log::info!("Quit requested on tick {tick}.");
            break;
        }

        // Only the latest cursor position matters to this game; drop the backlog.
        queue.clear_type(EventType::MOUSE_MOTION);

        for event in queue.drain_types(&INPUT_EVENTS) {
            state.handle_input(&event);
        }

        loop {
            let event = queue.poll();
            if event.is_none() {
                break;
            }
            state.handle_game(&event);
        }

        thread::sleep(interval);
    }

    for handle in producers {
        if handle.join().is_err() {
            log::error!("A producer thread panicked.");
        }
    }
    queue.clear();

    log_summary(
        &state,
        &queue.stats(),
        dropped.load(Ordering::Relaxed),
        ticks_run,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_at_stays_in_window_for_large_ticks() {
        for i in [0, 1, 613_566_757, u32::MAX - 1, u32::MAX] {
            let (x, y) = cursor_at(i);
            assert!((0.0..1280.0).contains(&x), "x = {x} for tick {i}");
            assert!((0.0..720.0).contains(&y), "y = {y} for tick {i}");
        }
        assert_eq!(cursor_at(2), (14.0, 6.0));
    }

    #[test]
    fn test_game_state_handles_events() {
        let mut state = GameState::default();
        state.handle_game(&Event::user(SCORE, 10));
        state.handle_game(&Event::user_with_payload(SPAWN, 1, [0.0f32, 1.0]));
        state.handle_game(&Event::window_resize(800, 600));
        state.handle_input(&Event::key_down("Space", Modifiers::NONE));
        state.handle_input(&Event::key_up("Space", Modifiers::NONE));
        state.handle_input(&Event::mouse_button_down(1.0, 1.0, MouseButton::Left));

        assert_eq!(state.score, 10);
        assert_eq!(state.spawned, 1);
        assert_eq!(state.resized, Some((800, 600)));
        assert_eq!(state.keys_pressed, 1);
        assert_eq!(state.clicks, 1);
    }
}
