use std::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
| type              | passes          | rejects      |
| ----------------- | --------------- | ------------ |
| low-pass          | below cutoff    | above cutoff |
| high-pass         | above cutoff    | below cutoff |
| band-pass         | around cutoff   | both sides   |
| notch / band-stop | both sides      | at cutoff    |

TPT state-variable filter (Zavalishin / Simper). All four responses fall out
of the same two integrators:

    g = tan(pi * cutoff / sample_rate)
    k = 1 / Q

Cutoff and Q are automated parameters, so the coefficients are recomputed
every sample from the values the renderer hands in. The topology stays
stable under fast sweeps, which is what envelope-driven cutoff needs.
*/

/// Lowest Q accepted; keeps `k = 1 / Q` finite.
pub const MIN_Q: f32 = 0.0001;
/// Lowest cutoff accepted, in Hz.
pub const MIN_CUTOFF: f32 = 10.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterType {
    #[default]
    LowPass,
    HighPass,
    BandPass,
    Notch,
}

impl FilterType {
    pub const ALL: [FilterType; 4] = [
        FilterType::LowPass,
        FilterType::HighPass,
        FilterType::BandPass,
        FilterType::Notch,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterType::LowPass => "lowpass",
            FilterType::HighPass => "highpass",
            FilterType::BandPass => "bandpass",
            FilterType::Notch => "notch",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|filter_type| filter_type.name() == name)
    }
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
    pub notch: f32,
}

#[derive(Debug, Default)]
pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory
}

impl SVFilter {
    pub fn new() -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
        }
    }

    #[inline]
    fn compute_g(cutoff_hz: f32, sample_rate: f32) -> f32 {
        let cutoff = cutoff_hz.clamp(MIN_CUTOFF, 0.49 * sample_rate);
        (PI * cutoff / sample_rate).tan()
    }

    pub fn tick(&mut self, sample: f32, k: f32, g: f32) -> FilterOutputs {
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - k * v1 - v2,
            notch: sample - k * v1,
        }
    }

    #[inline]
    pub fn next_sample(
        &mut self,
        sample: f32,
        filter_type: FilterType,
        cutoff_hz: f32,
        q: f32,
        sample_rate: f32,
    ) -> f32 {
        let g = Self::compute_g(cutoff_hz, sample_rate);
        let k = 1.0 / q.max(MIN_Q);
        let outputs = self.tick(sample, k, g);

        match filter_type {
            FilterType::LowPass => outputs.lowpass,
            FilterType::HighPass => outputs.highpass,
            FilterType::BandPass => outputs.bandpass,
            FilterType::Notch => outputs.notch,
        }
    }

    /// Filter `buffer` in place with per-sample cutoff and Q.
    pub fn render(
        &mut self,
        buffer: &mut [f32],
        filter_type: FilterType,
        cutoff_hz: &[f32],
        q: &[f32],
        sample_rate: f32,
    ) {
        for ((sample, &cutoff), &q) in buffer.iter_mut().zip(cutoff_hz).zip(q) {
            *sample = self.next_sample(*sample, filter_type, cutoff, q, sample_rate);
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}
