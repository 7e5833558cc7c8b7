use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::automation::{AutomationTarget, Curve, ParamId, ParamTimeline};
use crate::engine::Clock;
use crate::MAX_BLOCK_SIZE;

/// Curves on their way from a [`ParamHandle`] to the renderer, oldest first.
///
/// The control side locks to push; the audio side only ever `try_lock`s, so
/// a contended block leaves the curves queued for the next one. Nothing is
/// dropped: a burst of triggers while the renderer is stalled is applied in
/// order once it runs again, so the newest curve always ends up on top.
pub(crate) type CurveQueue = Arc<Mutex<VecDeque<Curve>>>;

pub(crate) fn curve_queue(capacity: usize) -> CurveQueue {
    Arc::new(Mutex::new(VecDeque::with_capacity(capacity)))
}

/// Control-side handle to one engine parameter.
pub struct ParamHandle {
    id: ParamId,
    clock: Clock,
    queue: CurveQueue,
    value: f32,
}

impl ParamHandle {
    pub(crate) fn new(id: ParamId, clock: Clock, queue: CurveQueue, value: f32) -> Self {
        Self {
            id,
            clock,
            queue,
            value,
        }
    }

    /// Curves sent but not yet picked up by the renderer.
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }
}

impl AutomationTarget for ParamHandle {
    fn id(&self) -> ParamId {
        self.id
    }

    fn current_time(&self) -> f64 {
        self.clock.now()
    }

    fn schedule(&mut self, curve: Curve) {
        // Grows past the configured capacity here, never on the audio thread.
        self.queue.lock().push_back(curve);
    }

    fn set_value(&mut self, value: f32) {
        self.value = value;
        let now = self.clock.now();
        self.schedule(Curve::constant(now, value));
    }

    fn value(&self) -> f32 {
        self.value
    }
}

/// Render-side state of one parameter.
pub(crate) struct ParamSlot {
    pub(crate) timeline: ParamTimeline,
    queue: CurveQueue,
    /// Node indices whose output is added to the automated value.
    pub(crate) modulators: Vec<usize>,
    pub(crate) values: Vec<f32>,
}

impl ParamSlot {
    pub(crate) fn new(default_value: f32, queue: CurveQueue) -> Self {
        Self {
            timeline: ParamTimeline::new(default_value),
            queue,
            modulators: Vec::new(),
            values: vec![default_value; MAX_BLOCK_SIZE],
        }
    }

    /// Apply every curve that arrived since the last block, oldest first.
    /// Returns `false` when the queue was locked by the control side.
    pub(crate) fn drain(&mut self) -> bool {
        let Some(mut queue) = self.queue.try_lock() else {
            return false;
        };
        for curve in queue.drain(..) {
            self.timeline.apply(&curve);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(id: u32, clock: Clock, capacity: usize) -> (ParamHandle, ParamSlot) {
        let queue = curve_queue(capacity);
        let handle = ParamHandle::new(ParamId::new(id), clock, Arc::clone(&queue), 0.0);
        (handle, ParamSlot::new(0.0, queue))
    }

    #[test]
    fn newest_curve_wins_past_capacity() {
        let (mut handle, mut slot) = pair(0, Clock::new(1_000.0), 1);

        handle.schedule(Curve::constant(0.0, 0.1));
        handle.schedule(Curve::constant(0.0, 0.2));
        handle.schedule(Curve::constant(0.0, 0.9));
        assert_eq!(handle.pending(), 3);

        assert!(slot.drain());
        assert_eq!(slot.timeline.value_at(0.0), 0.9);
        assert_eq!(handle.pending(), 0);
    }

    #[test]
    fn contended_queue_waits_for_next_block() {
        let (mut handle, mut slot) = pair(1, Clock::new(1_000.0), 4);
        handle.schedule(Curve::constant(0.0, 0.5));

        {
            let _control = handle.queue.lock();
            assert!(!slot.drain());
        }
        assert_eq!(slot.timeline.value_at(0.0), 0.0);

        assert!(slot.drain());
        assert_eq!(slot.timeline.value_at(0.0), 0.5);
    }

    #[test]
    fn set_value_is_timestamped_with_clock() {
        let clock = Clock::new(1_000.0);
        clock.advance(500);
        let (mut handle, mut slot) = pair(3, clock, 4);

        handle.set_value(0.75);
        slot.drain();

        assert_eq!(handle.value(), 0.75);
        assert_eq!(slot.timeline.events()[0].time, 0.5);
        assert_eq!(slot.timeline.value_at(0.6), 0.75);
    }
}
