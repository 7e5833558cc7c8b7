use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Phase-Accumulating Oscillator
=============================

The oscillator keeps one number of state: its phase, a position inside the
current cycle in [0, 1). Each sample the phase advances by

    increment = frequency / sample_rate

and wraps back into [0, 1). The waveform is a pure function of phase:

    phase   0 ─────────── 0.25 ────────── 0.5 ────────── 0.75 ────────── 1
    sine    0             +1              0              -1              0
    square  +1            +1              -1             -1              +1
    saw     -1            -0.5            0              +0.5            1
    tri     0             +1              0              -1              0

Frequency arrives as a per-sample buffer rather than a single number, since
it is an automated parameter that can also be frequency-modulated by another
oscillator. Under deep FM the instantaneous frequency can go negative; the
phase then runs backwards, which `rem_euclid` handles without special cases.

These waveforms are not band-limited. For percussion (short, heavily
filtered, mostly sine) the aliasing is inaudible in practice.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Sawtooth,
        Waveform::Triangle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Triangle => "triangle",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|waveform| waveform.name() == name)
    }

    /// Waveform value at `phase` in [0, 1).
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Triangle => 1.0 - 4.0 * ((phase + 0.25).rem_euclid(1.0) - 0.5).abs(),
        }
    }
}

#[derive(Debug, Default)]
pub struct PhaseOscillator {
    phase: f32,
}

impl PhaseOscillator {
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    #[inline]
    pub fn next_sample(&mut self, waveform: Waveform, frequency: f32, sample_rate: f32) -> f32 {
        let sample = waveform.sample(self.phase);
        self.phase = (self.phase + frequency / sample_rate).rem_euclid(1.0);
        sample
    }

    /// Render one sample per entry of `frequency` into `out`.
    pub fn render(&mut self, waveform: Waveform, frequency: &[f32], sample_rate: f32, out: &mut [f32]) {
        for (sample, &freq) in out.iter_mut().zip(frequency) {
            *sample = self.next_sample(waveform, freq, sample_rate);
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
