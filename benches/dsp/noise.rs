//! Benchmarks for held white noise.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_perc::dsp::noise::NoiseSource;
use saavy_perc::dsp::BlockSize;

use crate::BLOCK_SIZES;

pub fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/noise");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // A fresh value every sample: one RNG draw per sample
        let mut white = NoiseSource::new(1, BlockSize::new(1), 1);
        group.bench_with_input(BenchmarkId::new("white", size), &size, |b, _| {
            b.iter(|| white.render(0, black_box(&mut buffer)))
        });

        // Steppy noise: one draw per 8 samples
        let mut held = NoiseSource::new(1, BlockSize::new(8), 1);
        group.bench_with_input(BenchmarkId::new("held_8", size), &size, |b, _| {
            b.iter(|| held.render(0, black_box(&mut buffer)))
        });
    }

    group.finish();
}
