//! Property-based tests for envelope curves.
//!
//! Envelopes are scheduled onto a hand-clocked parameter and then evaluated
//! at their checkpoints, the way a backend would.

use proptest::prelude::*;
use saavy_perc::automation::{ManualParam, ParamId, RampKind};
use saavy_perc::dsp::envelope::{EPSILON, EPSILON_TIME};
use saavy_perc::dsp::{Envelope, EnvelopeShape};

fn struck(shape: EnvelopeShape, t0: f64) -> Envelope<ManualParam> {
    let mut envelope = Envelope::with_shape(ManualParam::new(ParamId::new(0), 0.0), shape);
    envelope.target_mut().set_time(t0);
    envelope.play();
    envelope
}

fn close(actual: f32, expected: f32, tolerance: f32) -> bool {
    (actual - expected).abs() <= tolerance * expected.abs().max(1.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// A linear envelope passes through start, peak and end exactly at
    /// t0, t_peak and t_end, and holds the end value afterwards.
    #[test]
    fn linear_checkpoints(
        t0 in 0.0f64..10.0,
        attack in 0.005f32..2.0,
        decay in 0.005f32..2.0,
        start in -1000.0f32..1000.0,
        peak in -1000.0f32..1000.0,
        end in -1000.0f32..1000.0,
    ) {
        let envelope = struck(EnvelopeShape {
            attack_time: attack,
            decay_time: decay,
            start_value: start,
            peak_value: peak,
            end_value: end,
            exponential: false,
        }, t0);

        let t_peak = t0 + f64::from(attack);
        let t_end = t_peak + f64::from(decay);
        let param = envelope.target();

        prop_assert!(close(param.value_at(t0), start, 1e-4));
        prop_assert!(close(param.value_at(t_peak), peak, 1e-4));
        prop_assert!(close(param.value_at(t_end), end, 1e-4));
        prop_assert_eq!(param.value_at(t_end + 1.0), end);

        let mid = param.value_at(t0 + f64::from(attack) / 2.0);
        prop_assert!(close(mid, (start + peak) / 2.0, 1e-3));
    }

    /// Positive exponential segments hit their checkpoints and are linear in
    /// the log domain: the midpoint is the geometric mean.
    #[test]
    fn exponential_positive_checkpoints(
        t0 in 0.0f64..10.0,
        attack in 0.005f32..2.0,
        decay in 0.005f32..2.0,
        start in 20.0f32..2000.0,
        peak in 20.0f32..2000.0,
        end in 20.0f32..2000.0,
    ) {
        let envelope = struck(EnvelopeShape {
            attack_time: attack,
            decay_time: decay,
            start_value: start,
            peak_value: peak,
            end_value: end,
            exponential: true,
        }, t0);

        let t_peak = t0 + f64::from(attack);
        let t_end = t_peak + f64::from(decay);
        let param = envelope.target();

        prop_assert!(close(param.value_at(t0), start, 1e-4));
        prop_assert!(close(param.value_at(t_peak), peak, 1e-4));
        prop_assert!(close(param.value_at(t_end), end, 1e-4));

        let mid = param.value_at(t_peak + f64::from(decay) / 2.0);
        prop_assert!(close(mid, (peak * end).sqrt(), 1e-3));
    }

    /// No exponential point ever targets zero, and zero endpoints are met
    /// exactly on time.
    #[test]
    fn zero_endpoints_are_exact(
        t0 in 0.0f64..10.0,
        attack in 0.0f32..1.0,
        decay in 0.0f32..1.0,
        peak in 0.01f32..10.0,
    ) {
        let shape = EnvelopeShape {
            attack_time: attack,
            decay_time: decay,
            start_value: 0.0,
            peak_value: peak,
            end_value: 0.0,
            exponential: true,
        };
        let envelope = struck(shape, t0);
        let curve = envelope.curve(t0);

        prop_assert!(curve
            .points()
            .iter()
            .all(|ramp| ramp.kind == RampKind::Linear || ramp.value != 0.0));
        prop_assert!(curve
            .points()
            .windows(2)
            .all(|pair| pair[0].time <= pair[1].time));

        let t_end = t0 + f64::from(attack) + f64::from(decay);
        prop_assert_eq!(envelope.target().value_at(t_end), 0.0);
        prop_assert_eq!(envelope.target().value_at(t_end + 0.5), 0.0);
        if t0 + f64::from(attack) > t0 {
            prop_assert_eq!(envelope.target().value_at(t0), 0.0);
        }
    }

    /// Striking again before the first strike ends throws away its tail.
    #[test]
    fn retrigger_replaces_pending_curve(
        first_decay in 1.0f32..3.0,
        second_at in 0.05f64..0.9,
        second_end in 10.0f32..100.0,
    ) {
        let mut envelope = struck(EnvelopeShape {
            attack_time: 0.0,
            decay_time: first_decay,
            start_value: 500.0,
            peak_value: 500.0,
            end_value: 1000.0,
            exponential: false,
        }, 0.0);

        envelope.target_mut().set_time(second_at);
        envelope.set_values(200.0, 200.0, second_end).set_times(0.0, 0.1);
        envelope.play();

        let param = envelope.target();
        prop_assert_eq!(param.schedules(), 2);
        prop_assert_eq!(param.value_at(second_at), 200.0);
        prop_assert_eq!(param.value_at(f64::from(first_decay) + 1.0), second_end);
        prop_assert!(param.timeline().events().iter().all(|ramp| ramp.value != 1000.0));
    }
}

#[test]
fn level_envelope_nudges_off_zero() {
    let envelope = struck(
        EnvelopeShape {
            attack_time: 0.01,
            decay_time: 0.5,
            ..EnvelopeShape::default()
        },
        0.0,
    );
    let param = envelope.target();

    assert_eq!(param.value_at(0.0), 0.0);
    assert!(close(param.value_at(EPSILON_TIME), EPSILON, 1e-4));
    assert!(close(param.value_at(f64::from(0.01f32)), 1.0, 1e-4));
    assert!(param.value_at(0.3) > 0.0 && param.value_at(0.3) < 1.0);
    assert_eq!(param.value_at(0.51 + 1e-6), 0.0);
}
