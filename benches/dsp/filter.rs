//! Benchmarks for state-variable filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_perc::dsp::filter::SVFilter;
use saavy_perc::dsp::FilterType;

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        // Cutoff sweeping down, recomputed every sample
        let cutoff: Vec<f32> = (0..size).map(|i| 2000.0 - 1000.0 * i as f32 / size as f32).collect();
        let q = vec![1.0f32; size];

        for filter_type in FilterType::ALL {
            let mut filter = SVFilter::new();
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(filter_type.name(), size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    filter.render(black_box(&mut buffer), filter_type, &cutoff, &q, 48_000.0);
                })
            });
        }
    }

    group.finish();
}
