/*
 * BrushFilter
 * Copyright (C) 2024 BrushFilter Contributors
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Rate limiting applied to each slider's change events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderFilterConfig {
    /// Throttle window in milliseconds
    #[serde(default = "default_wait")]
    pub wait: u64,

    /// Fire on the first event of a window
    #[serde(default = "default_leading")]
    pub leading: bool,

    /// Fire with the last event of a window once it closes
    #[serde(default = "default_trailing")]
    pub trailing: bool,
}

fn default_wait() -> u64 {
    50
}

fn default_leading() -> bool {
    true
}

fn default_trailing() -> bool {
    false
}

impl Default for SliderFilterConfig {
    fn default() -> Self {
        SliderFilterConfig {
            wait: default_wait(),
            leading: default_leading(),
            trailing: default_trailing(),
        }
    }
}

impl SliderFilterConfig {
    pub fn wait_duration(&self) -> Duration {
        Duration::from_millis(self.wait)
    }
}
