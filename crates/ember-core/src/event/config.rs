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

//! Configuration for the event queue.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::queue::MAX_EVENTS_IN_QUEUE;

/// An error raised while loading or validating an [`EventQueueConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configured capacity was zero, so no event could ever be queued.
    #[error("event queue capacity must be at least 1")]
    ZeroCapacity,
    /// The configuration source could not be parsed.
    #[error("failed to parse event queue config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for an [`EventQueue`](super::EventQueue).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventQueueConfig {
    /// The maximum number of events the queue holds before `post` fails.
    pub capacity: usize,
}

impl Default for EventQueueConfig {
    fn default() -> Self {
        Self {
            capacity: MAX_EVENTS_IN_QUEUE,
        }
    }
}

impl EventQueueConfig {
    /// Checks that the settings describe a usable queue.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    /// Parses and validates a config from a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
