/*
 * BrushFilter
 * Copyright (C) 2024 BrushFilter Contributors
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Positional channel a scale or slider is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    X,
    Y,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::X => "x",
            Channel::Y => "y",
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Resolve the `(primary, secondary)` channels of a slider.
///
/// The primary channel is the one the slider filters; the secondary channel
/// keeps its last stored domain.
pub fn channel_of(orientation: Orientation, transposed: bool) -> (Channel, Channel) {
    let (channel0, channel1) = match orientation {
        Orientation::Vertical => (Channel::Y, Channel::X),
        Orientation::Horizontal => (Channel::X, Channel::Y),
    };
    if transposed {
        (channel1, channel0)
    } else {
        (channel0, channel1)
    }
}

/// Transform between normalized plotting space and screen space
pub trait Coordinate {
    /// Normalized point to screen point
    fn map(&self, point: [f64; 2]) -> [f64; 2];

    /// Screen point to normalized point
    fn invert(&self, point: [f64; 2]) -> [f64; 2];

    fn is_transposed(&self) -> bool;
}

/// Cartesian coordinate over a plot rectangle.
///
/// When transposed, normalized `x` runs along the screen's vertical axis and
/// normalized `y` along its horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cartesian {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub transposed: bool,
}

impl Cartesian {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            transposed: false,
        }
    }

    pub fn transpose(mut self) -> Self {
        self.transposed = !self.transposed;
        self
    }
}

impl Coordinate for Cartesian {
    fn map(&self, point: [f64; 2]) -> [f64; 2] {
        let [u, v] = if self.transposed {
            [point[1], point[0]]
        } else {
            point
        };
        [self.x + u * self.width, self.y + v * self.height]
    }

    fn invert(&self, point: [f64; 2]) -> [f64; 2] {
        let u = if self.width == 0.0 {
            0.0
        } else {
            (point[0] - self.x) / self.width
        };
        let v = if self.height == 0.0 {
            0.0
        } else {
            (point[1] - self.y) / self.height
        };
        if self.transposed {
            [v, u]
        } else {
            [u, v]
        }
    }

    fn is_transposed(&self) -> bool {
        self.transposed
    }
}
