#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Automation Curves
=================

A curve is a short list of ramp points that together describe how a
parameter should move from "now" onward. Each point says: arrive at `value`
exactly at `time`, travelling either in a straight line or exponentially
from wherever the previous point left off.

    value
      1.0 ┤        ●
          │      ╱   ╲
          │    ╱       ╲_
          │  ╱            ‾‾──___●
      0.0 ●─────────────────────────→ time
         start    peak           end

Curves are plain `Copy` data with a fixed capacity so they can be queued for
the audio thread without allocating per point. An attack/decay envelope needs at most five points (see
`dsp::envelope`).
*/

/// Upper bound on the number of points in one [`Curve`].
pub const MAX_CURVE_POINTS: usize = 8;

/// How a ramp travels from the previous point to its own target.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampKind {
    Linear,
    /// Constant ratio per unit time. Undefined when either end is zero or the
    /// ends have opposite signs.
    Exponential,
}

/// Arrive at `value` exactly at `time` (seconds on the backend clock).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    pub kind: RampKind,
    pub value: f32,
    pub time: f64,
}

impl Ramp {
    pub fn linear(value: f32, time: f64) -> Self {
        Self {
            kind: RampKind::Linear,
            value,
            time,
        }
    }

    pub fn exponential(value: f32, time: f64) -> Self {
        Self {
            kind: RampKind::Exponential,
            value,
            time,
        }
    }
}

/// A batch of ramps that supersedes everything scheduled from `start` on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    start: f64,
    points: [Ramp; MAX_CURVE_POINTS],
    len: usize,
}

impl Curve {
    /// An empty curve. Scheduling it only cancels pending automation.
    pub fn new(start: f64) -> Self {
        Self {
            start,
            points: [Ramp::linear(0.0, start); MAX_CURVE_POINTS],
            len: 0,
        }
    }

    /// Hold `value` from `start` on.
    pub fn constant(start: f64, value: f32) -> Self {
        let mut curve = Self::new(start);
        curve.linear_to(value, start);
        curve
    }

    pub fn linear_to(&mut self, value: f32, time: f64) -> &mut Self {
        self.push(Ramp::linear(value, time))
    }

    pub fn exponential_to(&mut self, value: f32, time: f64) -> &mut Self {
        self.push(Ramp::exponential(value, time))
    }

    fn push(&mut self, ramp: Ramp) -> &mut Self {
        debug_assert!(self.len < MAX_CURVE_POINTS, "curve capacity exceeded");
        if let Some(slot) = self.points.get_mut(self.len) {
            *slot = ramp;
            self.len += 1;
        }
        self
    }

    /// Cancellation point: pending automation at or after this time is dropped.
    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn points(&self) -> &[Ramp] {
        &self.points[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Time of the last point, or `start` for an empty curve.
    pub fn end_time(&self) -> f64 {
        self.points()
            .iter()
            .map(|ramp| ramp.time)
            .fold(self.start, f64::max)
    }
}
