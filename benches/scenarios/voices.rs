//! Benchmarks for complete percussion voices.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_perc::dsp::NoiseOptions;
use saavy_perc::engine::{Engine, EngineConfig, Renderer};
use saavy_perc::graph::{AudioBackend, Input};
use saavy_perc::voices::{presets, FmVoice, SubVoice};

use crate::BLOCK_SIZES;

/// Renderer for a struck voice. `strike` builds, wires and plays it.
fn struck<F>(strike: F) -> Renderer
where
    F: FnOnce(&mut Engine, Input),
{
    let mut engine = Engine::new(EngineConfig::default());
    let destination = Input::Node(engine.destination());
    strike(&mut engine, destination);
    match engine.finish() {
        Ok(renderer) => renderer,
        Err(err) => panic!("voice graph rejected: {err}"),
    }
}

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === FM VOICE ===
        // Two modulated carriers plus noise: 12 enveloped parameters
        let mut fm = struck(|engine, destination| {
            let mut voice = FmVoice::build(engine, NoiseOptions::default());
            voice.connect(engine, destination);
            presets::fm_percussion(&mut voice);
            voice.play();
        });
        group.bench_with_input(BenchmarkId::new("fm", size), &size, |b, _| {
            b.iter(|| fm.render_block(black_box(&mut buffer)))
        });

        // === SUBTRACTIVE VOICE ===
        // Two filtered oscillators plus noise: 8 enveloped parameters
        let mut sub = struck(|engine, destination| {
            let mut voice = SubVoice::build(engine, NoiseOptions::default());
            voice.connect(engine, destination);
            presets::sub_percussion(&mut voice);
            voice.play();
        });
        group.bench_with_input(BenchmarkId::new("sub", size), &size, |b, _| {
            b.iter(|| sub.render_block(black_box(&mut buffer)))
        });
    }

    group.finish();
}
