/*
 * BrushFilter
 * Copyright (C) 2024 BrushFilter Contributors
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use crate::config::SliderFilterConfig;
use std::time::Duration;
use tokio::time::Instant;

/// Throttle state machine with optional leading and trailing edges.
///
/// A window of length `wait` opens on the first call after the previous
/// window has closed. With `leading`, that first call fires immediately.
/// With `trailing`, the latest value received during the window (and not
/// already fired) fires once the window closes, which opens a new window.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    wait: Duration,
    leading: bool,
    trailing: bool,
    window_end: Option<Instant>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(wait: Duration, leading: bool, trailing: bool) -> Self {
        Self {
            wait,
            leading,
            trailing,
            window_end: None,
            pending: None,
        }
    }

    pub fn from_config(config: &SliderFilterConfig) -> Self {
        Self::new(config.wait_duration(), config.leading, config.trailing)
    }

    fn window_open(&self, now: Instant) -> bool {
        matches!(self.window_end, Some(end) if now < end)
    }

    /// Register a call, returning the value if it should fire now
    pub fn call(&mut self, now: Instant, value: T) -> Option<T> {
        if self.window_open(now) {
            if self.trailing {
                self.pending = Some(value);
            }
            return None;
        }

        // A trailing value left over from an expired window is superseded
        self.pending = None;
        self.window_end = Some(now + self.wait);
        if self.leading {
            Some(value)
        } else {
            if self.trailing {
                self.pending = Some(value);
            }
            None
        }
    }

    /// When the pending trailing value is due
    pub fn deadline(&self) -> Option<Instant> {
        if self.pending.is_some() {
            self.window_end
        } else {
            None
        }
    }

    /// Take the pending trailing value once its window has closed
    pub fn take_trailing(&mut self, now: Instant) -> Option<T> {
        match self.window_end {
            Some(end) if now >= end && self.pending.is_some() => {
                self.window_end = Some(now + self.wait);
                self.pending.take()
            }
            _ => None,
        }
    }
}
