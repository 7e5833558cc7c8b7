//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_perc::dsp::oscillator::PhaseOscillator;
use saavy_perc::dsp::Waveform;

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        // Falling pitch, as an enveloped oscillator would see it
        let frequency: Vec<f32> = (0..size).map(|i| 800.0 - 600.0 * i as f32 / size as f32).collect();

        for waveform in Waveform::ALL {
            let mut osc = PhaseOscillator::new();
            group.bench_with_input(BenchmarkId::new(waveform.name(), size), &size, |b, _| {
                b.iter(|| {
                    osc.render(waveform, black_box(&frequency), 48_000.0, black_box(&mut buffer));
                })
            });
        }
    }

    group.finish();
}
