use crate::automation::{Curve, Ramp, RampKind, MAX_CURVE_POINTS};

/*
Parameter Timeline
==================

The timeline is the renderer-side memory of one parameter: a time-ordered
list of ramp events, evaluated on demand.

Evaluation Rules
----------------

Each event is the END of a segment. The segment starts at the previous
event (or at the parameter's default value at t = 0 when there is none):

    previous (t0, v0) ──────────→ event (t1, v1)

    linear:       v(t) = v0 + (v1 - v0) * (t - t0) / (t1 - t0)
    exponential:  v(t) = v0 * (v1 / v0) ^ ((t - t0) / (t1 - t0))

After the last event the value holds. Events sharing a timestamp are kept in
insertion order and the later one wins, so a zero-length segment is an
instant jump to its final value.

An exponential segment is only defined when v0 and v1 are both non-zero and
share a sign. Otherwise the segment holds v0 and jumps to v1 at t1. The
envelope code never asks for that case, but a backend has to do something
sensible with it.

Cancellation
------------

`cancel_scheduled_values(t)` drops every event at or after `t`. Events before
`t` remain and act as the origin of whatever is scheduled next.

Pruning
-------

The renderer calls `prune(now)` once per block. Everything strictly older
than the newest already-reached event is dead weight, since only that newest
event can still be the origin of a future segment.
*/

pub struct ParamTimeline {
    default_value: f32,
    events: Vec<Ramp>,
}

impl ParamTimeline {
    pub fn new(default_value: f32) -> Self {
        Self {
            default_value,
            events: Vec::with_capacity(4 * MAX_CURVE_POINTS),
        }
    }

    pub fn default_value(&self) -> f32 {
        self.default_value
    }

    pub fn events(&self) -> &[Ramp] {
        &self.events
    }

    /// Drop every event scheduled at or after `from`.
    pub fn cancel_scheduled_values(&mut self, from: f64) {
        let keep = self.events.partition_point(|event| event.time < from);
        self.events.truncate(keep);
    }

    pub fn linear_ramp_to(&mut self, value: f32, time: f64) {
        self.insert(Ramp::linear(value, time));
    }

    pub fn exponential_ramp_to(&mut self, value: f32, time: f64) {
        self.insert(Ramp::exponential(value, time));
    }

    /// Cancel from `curve.start()` and insert every point of `curve`.
    pub fn apply(&mut self, curve: &Curve) {
        self.cancel_scheduled_values(curve.start());
        for &ramp in curve.points() {
            self.insert(ramp);
        }
    }

    fn insert(&mut self, ramp: Ramp) {
        // After any event with the same timestamp: later writes win.
        let index = self.events.partition_point(|event| event.time <= ramp.time);
        self.events.insert(index, ramp);
    }

    /// Forget events that can no longer influence values at or after `now`.
    pub fn prune(&mut self, now: f64) {
        let reached = self.events.partition_point(|event| event.time <= now);
        if reached > 1 {
            self.events.drain(..reached - 1);
        }
    }

    /// Evaluate the automation at `time`.
    pub fn value_at(&self, time: f64) -> f32 {
        let index = self.events.partition_point(|event| event.time <= time);

        let Some(next) = self.events.get(index) else {
            return self
                .events
                .last()
                .map_or(self.default_value, |event| event.value);
        };

        let (t0, v0) = match index.checked_sub(1) {
            Some(previous) => (self.events[previous].time, self.events[previous].value),
            None => (0.0, self.default_value),
        };

        interpolate(t0, v0, next, time)
    }

    /// Fill `out` with one value per sample, starting at `start`.
    pub fn render(&self, start: f64, sample_rate: f32, out: &mut [f32]) {
        let period = 1.0 / f64::from(sample_rate);
        for (n, value) in out.iter_mut().enumerate() {
            *value = self.value_at(start + n as f64 * period);
        }
    }
}

fn interpolate(t0: f64, v0: f32, next: &Ramp, time: f64) -> f32 {
    let span = next.time - t0;
    if span <= 0.0 || time <= t0 {
        return v0;
    }

    let progress = ((time - t0) / span) as f32;
    match next.kind {
        RampKind::Linear => v0 + (next.value - v0) * progress,
        RampKind::Exponential => {
            if v0 * next.value > 0.0 {
                v0 * (next.value / v0).powf(progress)
            } else {
                v0
            }
        }
    }
}
