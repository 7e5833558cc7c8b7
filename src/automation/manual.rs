use crate::automation::{AutomationTarget, Curve, ParamId, ParamTimeline};

/// A parameter whose clock is advanced by hand.
///
/// Applies curves straight into its own [`ParamTimeline`], so the scheduled
/// shape can be inspected without running a renderer. Useful for tests and
/// for tools that plot envelopes.
pub struct ManualParam {
    id: ParamId,
    now: f64,
    value: f32,
    timeline: ParamTimeline,
    schedules: usize,
}

impl ManualParam {
    pub fn new(id: ParamId, default_value: f32) -> Self {
        Self {
            id,
            now: 0.0,
            value: default_value,
            timeline: ParamTimeline::new(default_value),
            schedules: 0,
        }
    }

    pub fn set_time(&mut self, now: f64) {
        self.now = now;
    }

    pub fn timeline(&self) -> &ParamTimeline {
        &self.timeline
    }

    /// Number of curves scheduled so far.
    pub fn schedules(&self) -> usize {
        self.schedules
    }

    pub fn value_at(&self, time: f64) -> f32 {
        self.timeline.value_at(time)
    }
}

impl AutomationTarget for ManualParam {
    fn id(&self) -> ParamId {
        self.id
    }

    fn current_time(&self) -> f64 {
        self.now
    }

    fn schedule(&mut self, curve: Curve) {
        self.timeline.apply(&curve);
        self.schedules += 1;
    }

    fn set_value(&mut self, value: f32) {
        self.value = value;
        self.timeline.apply(&Curve::constant(self.now, value));
    }

    fn value(&self) -> f32 {
        self.value
    }
}
