//! Low-level DSP primitives used by the render engine and the voices.
//!
//! The sample-rate pieces (oscillator, filter, noise) are allocation-free once
//! constructed and safe to run on the audio thread. The envelope is the odd
//! one out: it never touches samples, it only schedules automation.

/// Attack/decay envelope that schedules automation curves.
pub mod envelope;
/// State-variable filter with lowpass, highpass, bandpass and notch responses.
pub mod filter;
/// Sample-and-hold noise with a shared block size.
pub mod noise;
/// Phase-accumulating oscillator and its waveforms.
pub mod oscillator;

pub use envelope::{Envelope, EnvelopeShape};
pub use filter::FilterType;
pub use noise::{BlockSize, NoiseOptions};
pub use oscillator::Waveform;
