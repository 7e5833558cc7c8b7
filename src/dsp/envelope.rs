#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::automation::{AutomationTarget, Curve};

/*
Attack/Decay Envelope
=====================

A percussion envelope has no sustain and no release: it is struck, swells
to a peak, then dies away. Three values and two times describe the shape.

  value
   peak ┤     ●
        │    ╱ ╲
        │   ╱   ╲
        │  ╱     ╲___
   end  ┤ ╱          ‾‾‾●
  start ●───────────────────→ time
        t0    t_peak     t_end
        │attack│  decay  │

    t_peak = t0 + attack_time
    t_end  = t_peak + decay_time

Unlike a per-sample ADSR state machine, this envelope never runs on the
audio thread. `play()` reads the clock once, computes the whole curve and
hands it to the parameter's automation target. The backend does the
per-sample work.


Linear vs Exponential
---------------------

Pitch and cutoff are heard logarithmically: a drop from 800 Hz to 400 Hz
sounds as big as 400 Hz to 200 Hz. An exponential ramp covers equal ratios
in equal times, so pitch and filter sweeps sound even instead of rushing
at the start and crawling at the end.

    linear:       800 ──── 600 ──── 400 ──── 200
    exponential:  800 ──── 566 ──── 400 ──── 283 ──── 200 (per equal step)

The catch: an exponential ramp can never start from or arrive at zero
(log(0) is undefined). Silence is exactly what a level envelope needs to
start and end on, so zero endpoints get special treatment:

  origin is zero:   linearly nudge up to EPSILON within EPSILON_TIME,
                    then ramp exponentially from there.

  target is zero:   ramp exponentially to EPSILON, arriving EPSILON_TIME
                    early, then drop linearly to exactly 0 on time.

  both are zero:    nothing to shape, hold 0 linearly.

    1.0 ┤          ●
        │        ╱    ╲
        │      ╱         ╲__
  0.001 ┤   ●─                ‾‾──●
    0.0 ●─╱─────────────────────────╲●
        t0 └ nudge          approach ┘ t_end


Degenerate Segments
-------------------

A zero attack puts the start and peak points at the same instant. Points
that share a timestamp resolve to the last one written, so the value at t0
is the peak. A zero decay does the same at t_peak: the value steps straight
to `end_value`. Nudge and approach times are clamped into their segment so a
segment shorter than EPSILON_TIME never schedules points out of order.


Re-triggering
-------------

Every curve starts by cancelling whatever was pending at or after t0. A
second `play()` before t_end throws away the rest of the first curve. There
is no cross-fade and no queue.
*/

/// Smallest magnitude an exponential segment travels to or from.
pub const EPSILON: f32 = 0.001;
/// How long the linear nudge off zero (and the drop onto zero) takes, in seconds.
pub const EPSILON_TIME: f64 = 0.001;

/// A three-point attack/decay envelope bound to one automation target.
///
/// Fields are plain data: change them at any time, the new values apply to
/// the next [`play`](Envelope::play). Times are in seconds and must not be
/// negative.
pub struct Envelope<P> {
    pub attack_time: f32,
    pub decay_time: f32,
    pub start_value: f32,
    pub peak_value: f32,
    pub end_value: f32,
    pub exponential: bool,
    target: P,
}

/// The tunable part of an [`Envelope`], detached from its target.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeShape {
    pub attack_time: f32,
    pub decay_time: f32,
    pub start_value: f32,
    pub peak_value: f32,
    pub end_value: f32,
    pub exponential: bool,
}

impl Default for EnvelopeShape {
    fn default() -> Self {
        Self {
            attack_time: 0.0,
            decay_time: 1.0,
            start_value: 0.0,
            peak_value: 1.0,
            end_value: 0.0,
            exponential: true,
        }
    }
}

impl<P> Envelope<P> {
    /// Bind a default envelope (instant attack, one second exponential decay
    /// from 1 to 0) to `target`.
    pub fn new(target: P) -> Self {
        Self::with_shape(target, EnvelopeShape::default())
    }

    pub fn with_shape(target: P, shape: EnvelopeShape) -> Self {
        Self {
            attack_time: shape.attack_time,
            decay_time: shape.decay_time,
            start_value: shape.start_value,
            peak_value: shape.peak_value,
            end_value: shape.end_value,
            exponential: shape.exponential,
            target,
        }
    }

    pub fn set_times(&mut self, attack: f32, decay: f32) -> &mut Self {
        self.attack_time = attack;
        self.decay_time = decay;
        self
    }

    pub fn set_values(&mut self, start: f32, peak: f32, end: f32) -> &mut Self {
        self.start_value = start;
        self.peak_value = peak;
        self.end_value = end;
        self
    }

    pub fn set_exponential(&mut self, exponential: bool) -> &mut Self {
        self.exponential = exponential;
        self
    }

    pub fn shape(&self) -> EnvelopeShape {
        EnvelopeShape {
            attack_time: self.attack_time,
            decay_time: self.decay_time,
            start_value: self.start_value,
            peak_value: self.peak_value,
            end_value: self.end_value,
            exponential: self.exponential,
        }
    }

    pub fn set_shape(&mut self, shape: EnvelopeShape) {
        self.attack_time = shape.attack_time;
        self.decay_time = shape.decay_time;
        self.start_value = shape.start_value;
        self.peak_value = shape.peak_value;
        self.end_value = shape.end_value;
        self.exponential = shape.exponential;
    }

    pub fn target(&self) -> &P {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut P {
        &mut self.target
    }

    /// Compute the curve a `play()` at time `t0` would schedule.
    pub fn curve(&self, t0: f64) -> Curve {
        let t_peak = t0 + f64::from(self.attack_time.max(0.0));
        let t_end = t_peak + f64::from(self.decay_time.max(0.0));

        let mut curve = Curve::new(t0);
        curve.linear_to(self.start_value, t0);

        if self.exponential {
            exponential_segment(&mut curve, (t0, self.start_value), (t_peak, self.peak_value));
            exponential_segment(&mut curve, (t_peak, self.peak_value), (t_end, self.end_value));
        } else {
            curve.linear_to(self.peak_value, t_peak);
            curve.linear_to(self.end_value, t_end);
        }

        curve
    }
}

impl<P: AutomationTarget> Envelope<P> {
    /// Cancel pending automation on the target and schedule a fresh curve
    /// starting now.
    pub fn play(&mut self) {
        let now = self.target.current_time();
        let curve = self.curve(now);
        tracing::trace!(
            param = %self.target.id(),
            now,
            end = curve.end_time(),
            points = curve.len(),
            "schedule envelope"
        );
        self.target.schedule(curve);
    }
}

/// Append one exponential segment, steering around zero endpoints.
fn exponential_segment(curve: &mut Curve, (from_time, from): (f64, f32), (to_time, to): (f64, f32)) {
    if from == 0.0 && to == 0.0 {
        curve.linear_to(0.0, to_time);
        return;
    }

    let mut origin_time = from_time;
    if from == 0.0 {
        origin_time = (from_time + EPSILON_TIME).min(to_time);
        curve.linear_to(EPSILON, origin_time);
    }

    if to == 0.0 {
        let approach_time = (to_time - EPSILON_TIME).max(origin_time);
        curve.exponential_to(EPSILON, approach_time);
        curve.linear_to(0.0, to_time);
    } else {
        curve.exponential_to(to, to_time);
    }
}
