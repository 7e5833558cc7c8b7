//! Benchmarks for envelope curves and timeline evaluation.
//!
//! Building a curve happens on the control thread once per strike. Rendering
//! the timeline happens on the audio thread for every enveloped parameter in
//! every block, so that is the number to watch.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_perc::automation::{ManualParam, ParamId, ParamTimeline};
use saavy_perc::dsp::{Envelope, EnvelopeShape};

use crate::BLOCK_SIZES;

fn level() -> EnvelopeShape {
    EnvelopeShape {
        attack_time: 0.01,
        decay_time: 0.5,
        ..EnvelopeShape::default()
    }
}

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    let env = Envelope::with_shape(ManualParam::new(ParamId::new(0), 0.0), level());
    group.bench_function("curve", |b| b.iter(|| env.curve(black_box(1.0))));

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Exponential attack/decay, rendered during the decay
        let mut timeline = ParamTimeline::new(0.0);
        timeline.apply(&env.curve(0.0));
        group.bench_with_input(BenchmarkId::new("exponential", size), &size, |b, _| {
            b.iter(|| timeline.render(black_box(0.2), 48_000.0, black_box(&mut buffer)))
        });

        // Same shape, linear segments
        let mut linear = Envelope::with_shape(ManualParam::new(ParamId::new(1), 0.0), level());
        linear.exponential = false;
        let mut timeline = ParamTimeline::new(0.0);
        timeline.apply(&linear.curve(0.0));
        group.bench_with_input(BenchmarkId::new("linear", size), &size, |b, _| {
            b.iter(|| timeline.render(black_box(0.2), 48_000.0, black_box(&mut buffer)))
        });

        // Past the last point: holding the end value
        group.bench_with_input(BenchmarkId::new("hold", size), &size, |b, _| {
            b.iter(|| timeline.render(black_box(5.0), 48_000.0, black_box(&mut buffer)))
        });
    }

    group.finish();
}
