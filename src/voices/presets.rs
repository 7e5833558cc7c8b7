//! Factory settings for the two voice flavours.
//!
//! Presets only touch the fields they name; everything else keeps the value
//! the tone was built with. Gains and Q are set through their parameter
//! handles, so the change is heard right away. Envelope fields apply from the
//! next `play()`.

use crate::automation::AutomationTarget;
use crate::dsp::{Envelope, FilterType, Waveform};
use crate::voices::{FmVoice, SubVoice};

fn decay<P>(envelope: &mut Envelope<P>, decay_time: f32, peak: f32, end: f32) {
    envelope.set_times(0.0, decay_time);
    envelope.peak_value = peak;
    envelope.end_value = end;
    envelope.exponential = true;
}

fn sweep<P>(envelope: &mut Envelope<P>, decay_time: f32, from: f32, to: f32) {
    envelope.set_times(0.0, decay_time).set_values(from, from, to);
}

fn strike<P>(envelope: &mut Envelope<P>, decay_time: f32) {
    envelope
        .set_times(0.01, decay_time)
        .set_values(0.0, 1.0, 0.0)
        .set_exponential(true);
}

/// Two detuned FM strikes over a steppy, bright noise burst.
pub fn fm_percussion<P: AutomationTarget>(voice: &mut FmVoice<P>) {
    voice.output.gain.set_value(0.5);

    let tone = &mut voice.tone1;
    tone.modulator.waveform.set(Waveform::Sine);
    decay(&mut tone.modulator.envelope, 0.5, 300.0, 270.0);
    sweep(&mut tone.depth.envelope, 0.5, 1000.0, 500.0);
    tone.carrier.waveform.set(Waveform::Sine);
    decay(&mut tone.carrier.envelope, 0.5, 100.0, 90.0);
    tone.filter.filter_type.set(FilterType::LowPass);
    tone.filter.q.set_value(0.5);
    sweep(&mut tone.filter.envelope, 0.5, 2000.0, 1000.0);
    strike(&mut tone.level.envelope, 0.5);
    tone.output.gain.set_value(0.3);

    let tone = &mut voice.tone2;
    tone.modulator.waveform.set(Waveform::Sine);
    decay(&mut tone.modulator.envelope, 0.1, 300.0, 150.0);
    sweep(&mut tone.depth.envelope, 0.1, 2000.0, 1000.0);
    tone.carrier.waveform.set(Waveform::Sine);
    decay(&mut tone.carrier.envelope, 0.1, 400.0, 200.0);
    tone.filter.filter_type.set(FilterType::LowPass);
    tone.filter.q.set_value(3.0);
    sweep(&mut tone.filter.envelope, 0.5, 2000.0, 1000.0);
    strike(&mut tone.level.envelope, 0.25);
    tone.output.gain.set_value(0.3);

    let noise = &mut voice.noise;
    noise.block_size.set(4);
    noise.filter.filter_type.set(FilterType::LowPass);
    noise.filter.q.set_value(1.0);
    sweep(&mut noise.filter.envelope, 0.25, 8000.0, 4000.0);
    noise.filter.envelope.exponential = true;
    strike(&mut noise.level.envelope, 0.5);
    noise.output.gain.set_value(0.3);
}

/// Two triangle toms with a white noise splash.
pub fn sub_percussion<P: AutomationTarget>(voice: &mut SubVoice<P>) {
    voice.output.gain.set_value(0.5);

    let tone = &mut voice.tone1;
    tone.oscillator.waveform.set(Waveform::Triangle);
    decay(&mut tone.oscillator.envelope, 0.5, 100.0, 90.0);
    tone.filter.filter_type.set(FilterType::LowPass);
    tone.filter.q.set_value(1.0);
    sweep(&mut tone.filter.envelope, 0.5, 2000.0, 1000.0);
    strike(&mut tone.level.envelope, 0.5);
    tone.output.gain.set_value(0.5);

    let tone = &mut voice.tone2;
    tone.oscillator.waveform.set(Waveform::Triangle);
    decay(&mut tone.oscillator.envelope, 0.1, 300.0, 200.0);
    tone.filter.filter_type.set(FilterType::LowPass);
    tone.filter.q.set_value(3.0);
    sweep(&mut tone.filter.envelope, 0.5, 2000.0, 1000.0);
    strike(&mut tone.level.envelope, 0.25);
    tone.output.gain.set_value(0.5);

    let noise = &mut voice.noise;
    noise.block_size.set(1);
    noise.filter.filter_type.set(FilterType::LowPass);
    noise.filter.q.set_value(3.0);
    sweep(&mut noise.filter.envelope, 0.25, 5000.0, 2500.0);
    noise.filter.envelope.exponential = true;
    strike(&mut noise.level.envelope, 0.5);
    noise.output.gain.set_value(0.5);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::NoiseOptions;
    use crate::engine::{Engine, EngineConfig};

    #[test]
    fn fm_preset_keeps_unnamed_fields() {
        let mut engine = Engine::new(EngineConfig::default());
        let mut voice = FmVoice::build(&mut engine, NoiseOptions::default());

        fm_percussion(&mut voice);

        let modulator = &voice.tone1.modulator.envelope;
        assert_eq!(modulator.start_value, 800.0);
        assert_eq!(modulator.peak_value, 300.0);
        assert_eq!(modulator.end_value, 270.0);
        assert_eq!(voice.tone2.level.envelope.decay_time, 0.25);
        assert_eq!(voice.tone2.filter.q.value(), 3.0);
        assert_eq!(voice.noise.block_size.get(), 4);
        assert_eq!(voice.output.gain.value(), 0.5);
    }

    #[test]
    fn sub_preset_switches_to_triangle() {
        let mut engine = Engine::new(EngineConfig::default());
        let mut voice = SubVoice::build(&mut engine, NoiseOptions::default());

        sub_percussion(&mut voice);

        assert_eq!(voice.tone1.oscillator.waveform.get(), Waveform::Triangle);
        assert_eq!(voice.tone2.oscillator.envelope.end_value, 200.0);
        assert_eq!(voice.noise.filter.envelope.start_value, 5000.0);
        assert_eq!(voice.noise.block_size.get(), 1);
        assert_eq!(voice.tone1.output.gain.value(), 0.5);
    }
}
