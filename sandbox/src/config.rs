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

//! Sandbox configuration, loaded from an optional JSON file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ember_core::event::EventQueueConfig;
use serde::{Deserialize, Serialize};

/// Settings for a sandbox run. Every field is optional in the JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Settings forwarded to the event queue.
    pub queue: EventQueueConfig,
    /// Number of game-event producer threads.
    pub producers: usize,
    /// Events each producer tries to post.
    pub events_per_producer: u32,
    /// Upper bound on consumer ticks before the run stops on its own.
    pub ticks: u32,
    /// Time between two consumer ticks.
    pub tick_interval_ms: u64,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            queue: EventQueueConfig::default(),
            producers: 4,
            events_per_producer: 500,
            ticks: 120,
            tick_interval_ms: 16,
        }
    }
}

impl SandboxConfig {
    /// Loads the config at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            log::info!("No config file given, using defaults.");
            return Ok(Self::default());
        };

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        config.queue.validate()?;
        log::info!("Loaded config from '{}'.", path.display());
        Ok(config)
    }
}
