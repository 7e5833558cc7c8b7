//! Control bindings between a front end and a voice.
//!
//! A front end does not know what a voice looks like inside. It gets a flat,
//! labelled table of [`Binding`]s instead, each one a pair of plain function
//! pointers into the voice resolved when the table is built. Scalars carry
//! their range and the response curve of their control; booleans toggle;
//! enums cycle through named options.
//!
//! Writes through a binding land in envelope fields (heard from the next
//! `play()`) or in parameter handles and shared settings (heard right away).

use std::ops::RangeInclusive;

use crate::automation::AutomationTarget;
use crate::dsp::{FilterType, Waveform};
use crate::voices::{FmVoice, SubVoice};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BindingError {
    #[error("unknown option `{0}`")]
    UnknownOption(String),
}

/// How a scalar control position maps to the value written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarCurve {
    /// The clamped position is the value.
    Linear,
    /// Position in [0, 1] raised to 0.6 and rounded: a fader law that gives
    /// more travel to quiet levels.
    Gain,
}

pub enum Binding<V> {
    Scalar {
        get: fn(&V) -> f32,
        set: fn(&mut V, f32),
        range: RangeInclusive<f32>,
        curve: ScalarCurve,
    },
    Boolean {
        get: fn(&V) -> bool,
        set: fn(&mut V, bool),
    },
    Enum {
        options: &'static [&'static str],
        get: fn(&V) -> &'static str,
        set: fn(&mut V, &str) -> Result<(), BindingError>,
    },
}

/// A named choice among a fixed set of options.
pub trait Choice: Sized + 'static {
    const OPTIONS: &'static [&'static str];

    fn name(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self>;

    fn parse(name: &str) -> Result<Self, BindingError> {
        Self::from_name(name).ok_or_else(|| BindingError::UnknownOption(name.to_owned()))
    }
}

impl Choice for Waveform {
    const OPTIONS: &'static [&'static str] = &["sine", "square", "sawtooth", "triangle"];

    fn name(self) -> &'static str {
        Waveform::name(self)
    }

    fn from_name(name: &str) -> Option<Self> {
        Waveform::from_name(name)
    }
}

impl Choice for FilterType {
    const OPTIONS: &'static [&'static str] = &["lowpass", "highpass", "bandpass", "notch"];

    fn name(self) -> &'static str {
        FilterType::name(self)
    }

    fn from_name(name: &str) -> Option<Self> {
        FilterType::from_name(name)
    }
}

pub fn clamp_to_range(value: f32, range: &RangeInclusive<f32>) -> f32 {
    value.clamp(*range.start(), *range.end())
}

/// Round to two decimals.
pub fn round_value(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Gain written for a fader at `position`.
pub fn gain_value(position: f32) -> f32 {
    round_value(position.clamp(0.0, 1.0).powf(0.6))
}

/// Fader position that produces `gain`.
fn gain_position(gain: f32) -> f32 {
    gain.clamp(0.0, 1.0).powf(1.0 / 0.6)
}

/// Fraction of a scalar's range moved by one nudge.
const NUDGE_STEP: f32 = 0.01;

pub struct NamedBinding<V> {
    pub label: String,
    pub binding: Binding<V>,
}

impl<V> NamedBinding<V> {
    pub fn new(label: impl Into<String>, binding: Binding<V>) -> Self {
        Self {
            label: label.into(),
            binding,
        }
    }

    /// Current value, formatted for display.
    pub fn read(&self, voice: &V) -> String {
        match &self.binding {
            Binding::Scalar { get, .. } => format!("{:.2}", round_value(get(voice))),
            Binding::Boolean { get, .. } => (if get(voice) { "on" } else { "off" }).to_owned(),
            Binding::Enum { get, .. } => get(voice).to_owned(),
        }
    }

    /// Write a scalar control position. Ignored by other kinds.
    pub fn write_scalar(&self, voice: &mut V, position: f32) {
        if let Binding::Scalar {
            set, range, curve, ..
        } = &self.binding
        {
            let position = clamp_to_range(position, range);
            match curve {
                ScalarCurve::Linear => set(voice, position),
                ScalarCurve::Gain => set(voice, gain_value(position)),
            }
        }
    }

    pub fn write_option(&self, voice: &mut V, option: &str) -> Result<(), BindingError> {
        match &self.binding {
            Binding::Enum { set, .. } => set(voice, option),
            _ => Err(BindingError::UnknownOption(option.to_owned())),
        }
    }

    /// Move the control `steps` notches: scalars by 1 % of their range,
    /// booleans toggle, enums cycle.
    pub fn nudge(&self, voice: &mut V, steps: i32) -> Result<(), BindingError> {
        match &self.binding {
            Binding::Scalar {
                get, range, curve, ..
            } => {
                let span = range.end() - range.start();
                let position = match curve {
                    ScalarCurve::Linear => get(voice),
                    ScalarCurve::Gain => gain_position(get(voice)),
                };
                self.write_scalar(voice, position + steps as f32 * NUDGE_STEP * span);
                Ok(())
            }
            Binding::Boolean { get, set } => {
                if steps % 2 != 0 {
                    let value = get(voice);
                    set(voice, !value);
                }
                Ok(())
            }
            Binding::Enum { options, get, set } => {
                let count = options.len() as i32;
                if count == 0 {
                    return Ok(());
                }
                let current = get(voice);
                let index = options.iter().position(|&o| o == current).unwrap_or(0) as i32;
                let next = (index + steps).rem_euclid(count) as usize;
                set(voice, options[next])
            }
        }
    }
}

fn scalar<V>(
    label: String,
    get: fn(&V) -> f32,
    set: fn(&mut V, f32),
    range: RangeInclusive<f32>,
    curve: ScalarCurve,
) -> NamedBinding<V> {
    NamedBinding::new(
        label,
        Binding::Scalar {
            get,
            set,
            range,
            curve,
        },
    )
}

macro_rules! envelope {
    ($table:ident, $v:ty, $label:expr, $range:expr, $($path:ident).+) => {
        $table.push(scalar(
            format!("{} attack", $label),
            |v: &$v| v.$($path).+.attack_time,
            |v: &mut $v, x: f32| v.$($path).+.attack_time = x,
            0.0..=2.0,
            ScalarCurve::Linear,
        ));
        $table.push(scalar(
            format!("{} decay", $label),
            |v: &$v| v.$($path).+.decay_time,
            |v: &mut $v, x: f32| v.$($path).+.decay_time = x,
            0.0..=2.0,
            ScalarCurve::Linear,
        ));
        $table.push(scalar(
            format!("{} start", $label),
            |v: &$v| v.$($path).+.start_value,
            |v: &mut $v, x: f32| v.$($path).+.start_value = x,
            $range,
            ScalarCurve::Linear,
        ));
        $table.push(scalar(
            format!("{} peak", $label),
            |v: &$v| v.$($path).+.peak_value,
            |v: &mut $v, x: f32| v.$($path).+.peak_value = x,
            $range,
            ScalarCurve::Linear,
        ));
        $table.push(scalar(
            format!("{} end", $label),
            |v: &$v| v.$($path).+.end_value,
            |v: &mut $v, x: f32| v.$($path).+.end_value = x,
            $range,
            ScalarCurve::Linear,
        ));
        $table.push(NamedBinding::new(
            format!("{} exponential", $label),
            Binding::Boolean {
                get: |v: &$v| v.$($path).+.exponential,
                set: |v: &mut $v, x: bool| v.$($path).+.exponential = x,
            },
        ));
    };
}

macro_rules! choice {
    ($table:ident, $v:ty, $choice:ty, $label:expr, $($path:ident).+) => {
        $table.push(NamedBinding::new(
            $label,
            Binding::Enum {
                options: <$choice as Choice>::OPTIONS,
                get: |v: &$v| Choice::name(v.$($path).+.get()),
                set: |v: &mut $v, name: &str| {
                    v.$($path).+.set(<$choice as Choice>::parse(name)?);
                    Ok(())
                },
            },
        ));
    };
}

macro_rules! gain {
    ($table:ident, $v:ty, $label:expr, $($path:ident).+) => {
        $table.push(scalar(
            format!("{} gain", $label),
            |v: &$v| v.$($path).+.gain.value(),
            |v: &mut $v, x: f32| v.$($path).+.gain.set_value(x),
            0.0..=1.0,
            ScalarCurve::Gain,
        ));
    };
}

macro_rules! filter {
    ($table:ident, $v:ty, $label:expr, $($path:ident).+) => {
        choice!($table, $v, FilterType, format!("{} filter type", $label), $($path).+.filter_type);
        $table.push(scalar(
            format!("{} filter Q", $label),
            |v: &$v| v.$($path).+.q.value(),
            |v: &mut $v, x: f32| v.$($path).+.q.set_value(x),
            0.1..=20.0,
            ScalarCurve::Linear,
        ));
        envelope!($table, $v, format!("{} filter", $label), 20.0..=20000.0, $($path).+.envelope);
    };
}

macro_rules! noise {
    ($table:ident, $v:ty) => {
        $table.push(scalar(
            "noise block size".to_owned(),
            |v: &$v| v.noise.block_size.get() as f32,
            |v: &mut $v, x: f32| v.noise.block_size.set(x.round() as usize),
            1.0..=64.0,
            ScalarCurve::Linear,
        ));
        filter!($table, $v, "noise", noise.filter);
        envelope!($table, $v, "noise level", 0.0..=1.0, noise.level.envelope);
        gain!($table, $v, "noise output", noise.output);
    };
}

macro_rules! fm_tone {
    ($table:ident, $v:ty, $label:expr, $tone:ident) => {
        choice!($table, $v, Waveform, format!("{} modulator waveform", $label), $tone.modulator.waveform);
        envelope!($table, $v, format!("{} modulator", $label), 0.0..=2000.0, $tone.modulator.envelope);
        envelope!($table, $v, format!("{} depth", $label), 0.0..=5000.0, $tone.depth.envelope);
        choice!($table, $v, Waveform, format!("{} carrier waveform", $label), $tone.carrier.waveform);
        envelope!($table, $v, format!("{} carrier", $label), 0.0..=2000.0, $tone.carrier.envelope);
        filter!($table, $v, $label, $tone.filter);
        envelope!($table, $v, format!("{} level", $label), 0.0..=1.0, $tone.level.envelope);
        gain!($table, $v, format!("{} output", $label), $tone.output);
    };
}

macro_rules! sub_tone {
    ($table:ident, $v:ty, $label:expr, $tone:ident) => {
        choice!($table, $v, Waveform, format!("{} waveform", $label), $tone.oscillator.waveform);
        envelope!($table, $v, format!("{} oscillator", $label), 0.0..=2000.0, $tone.oscillator.envelope);
        filter!($table, $v, $label, $tone.filter);
        envelope!($table, $v, format!("{} level", $label), 0.0..=1.0, $tone.level.envelope);
        gain!($table, $v, format!("{} output", $label), $tone.output);
    };
}

/// Every control of an FM voice.
pub fn fm_bindings<P: AutomationTarget>() -> Vec<NamedBinding<FmVoice<P>>> {
    let mut table = Vec::new();
    gain!(table, FmVoice<P>, "voice output", output);
    fm_tone!(table, FmVoice<P>, "tone 1", tone1);
    fm_tone!(table, FmVoice<P>, "tone 2", tone2);
    noise!(table, FmVoice<P>);
    table
}

/// Every control of a subtractive voice.
pub fn sub_bindings<P: AutomationTarget>() -> Vec<NamedBinding<SubVoice<P>>> {
    let mut table = Vec::new();
    gain!(table, SubVoice<P>, "voice output", output);
    sub_tone!(table, SubVoice<P>, "tone 1", tone1);
    sub_tone!(table, SubVoice<P>, "tone 2", tone2);
    noise!(table, SubVoice<P>);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::NoiseOptions;
    use crate::engine::{Engine, EngineConfig, ParamHandle};
    use crate::voices::presets;

    fn fm_voice() -> FmVoice<ParamHandle> {
        let mut engine = Engine::new(EngineConfig::default());
        FmVoice::build(&mut engine, NoiseOptions::default())
    }

    fn find<'a, V>(table: &'a [NamedBinding<V>], label: &str) -> &'a NamedBinding<V> {
        table
            .iter()
            .find(|binding| binding.label == label)
            .unwrap_or_else(|| panic!("no binding labelled {label}"))
    }

    #[test]
    fn gain_law_matches_fader() {
        assert_eq!(gain_value(-1.0), 0.0);
        assert_eq!(gain_value(0.0), 0.0);
        assert_eq!(gain_value(0.5), 0.66);
        assert_eq!(gain_value(1.0), 1.0);
        assert_eq!(gain_value(3.0), 1.0);
    }

    #[test]
    fn rounding_and_clamping() {
        assert_eq!(round_value(0.125_1), 0.13);
        assert_eq!(clamp_to_range(5.0, &(0.0..=2.0)), 2.0);
        assert_eq!(clamp_to_range(-5.0, &(0.0..=2.0)), 0.0);
    }

    #[test]
    fn tables_cover_every_stage() {
        // voice gain, two tones, noise (block size, filter, level, gain)
        assert_eq!(fm_bindings::<ParamHandle>().len(), 1 + 2 * 35 + 16);
        assert_eq!(sub_bindings::<ParamHandle>().len(), 1 + 2 * 22 + 16);
    }

    #[test]
    fn scalar_writes_envelope_field() {
        let table = fm_bindings::<ParamHandle>();
        let mut voice = fm_voice();

        find(&table, "tone 2 carrier end").write_scalar(&mut voice, 150.0);
        assert_eq!(voice.tone2.carrier.envelope.end_value, 150.0);

        find(&table, "tone 1 level decay").write_scalar(&mut voice, 10.0);
        assert_eq!(voice.tone1.level.envelope.decay_time, 2.0);
    }

    #[test]
    fn gain_binding_writes_through_fader_law() {
        let table = fm_bindings::<ParamHandle>();
        let mut voice = fm_voice();

        find(&table, "voice output gain").write_scalar(&mut voice, 0.5);
        assert_eq!(voice.output.gain.value(), 0.66);
    }

    #[test]
    fn nudging_gain_always_moves() {
        let table = fm_bindings::<ParamHandle>();
        let mut voice = fm_voice();
        presets::fm_percussion(&mut voice);
        let binding = find(&table, "tone 1 output gain");

        let before = voice.tone1.output.gain.value();
        binding.nudge(&mut voice, 1).unwrap();
        assert!(voice.tone1.output.gain.value() > before);

        binding.nudge(&mut voice, -2).unwrap();
        assert!(voice.tone1.output.gain.value() < before);
    }

    #[test]
    fn enum_cycles_and_rejects_unknown_options() {
        let table = fm_bindings::<ParamHandle>();
        let mut voice = fm_voice();
        let waveform = find(&table, "tone 1 carrier waveform");

        waveform.nudge(&mut voice, 1).unwrap();
        assert_eq!(voice.tone1.carrier.waveform.get(), Waveform::Square);
        waveform.nudge(&mut voice, -2).unwrap();
        assert_eq!(voice.tone1.carrier.waveform.get(), Waveform::Triangle);

        assert_eq!(
            waveform.write_option(&mut voice, "wobble"),
            Err(BindingError::UnknownOption("wobble".to_owned()))
        );
        assert_eq!(waveform.read(&voice), "triangle");
    }

    #[test]
    fn boolean_toggles_on_odd_steps() {
        let table = fm_bindings::<ParamHandle>();
        let mut voice = fm_voice();
        let exponential = find(&table, "noise filter exponential");

        exponential.nudge(&mut voice, 1).unwrap();
        assert!(!voice.noise.filter.envelope.exponential);
        exponential.nudge(&mut voice, 2).unwrap();
        assert!(!voice.noise.filter.envelope.exponential);
        assert_eq!(exponential.read(&voice), "off");
    }

    #[test]
    fn block_size_rounds_to_whole_samples() {
        let table = sub_bindings::<ParamHandle>();
        let mut engine = Engine::new(EngineConfig::default());
        let mut voice = SubVoice::build(&mut engine, NoiseOptions::default());

        let block = find(&table, "noise block size");
        block.nudge(&mut voice, 1).unwrap();
        assert_eq!(voice.noise.block_size.get(), 2);
        block.write_scalar(&mut voice, 100.0);
        assert_eq!(voice.noise.block_size.get(), 64);
    }
}
