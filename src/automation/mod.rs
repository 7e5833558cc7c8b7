//! Parameter automation.
//!
//! An automatable parameter (oscillator frequency, gain level, filter cutoff)
//! is driven by scheduling value ramps against a clock. The control side
//! builds a [`Curve`] and hands it to an [`AutomationTarget`]; whoever owns
//! the parameter state evaluates it with a [`ParamTimeline`].

mod curve;
mod manual;
mod timeline;

use std::fmt;

pub use curve::{Curve, Ramp, RampKind, MAX_CURVE_POINTS};
pub use manual::ManualParam;
pub use timeline::ParamTimeline;

/// Identifies one automatable parameter inside a backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(u32);

impl ParamId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "param#{}", self.0)
    }
}

/// Handle to one automatable scalar parameter.
///
/// The parameter state itself belongs to the backend; the handle is the only
/// way to drive it from control code. Handles are not `Clone`: a parameter
/// has exactly one owner.
pub trait AutomationTarget {
    fn id(&self) -> ParamId;

    /// Time on the clock that drives this parameter, in seconds.
    fn current_time(&self) -> f64;

    /// Replace everything scheduled at or after `curve.start()` with `curve`.
    ///
    /// The backend must apply the cancellation and every point of the curve
    /// as one unit: a reader never observes half of an old curve mixed with
    /// half of a new one. The most recent call always wins.
    fn schedule(&mut self, curve: Curve);

    /// Set the parameter's value from now on, superseding pending automation.
    fn set_value(&mut self, value: f32);

    /// The value last assigned through [`set_value`](Self::set_value), or the
    /// value the parameter was created with.
    fn value(&self) -> f32;
}
