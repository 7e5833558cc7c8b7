//! Subtractive percussion tone.
//!
//! One bright oscillator with a falling pitch, carved down by an enveloped
//! lowpass. Sawtooth by default; triangle gives softer, rounder toms.
//!
//! ```text
//! oscillator ──► filter ──► level ──► output
//! ```

use crate::automation::AutomationTarget;
use crate::dsp::{FilterType, Waveform};
use crate::graph::{AudioBackend, Gain, Input, NodeId};
use crate::voices::stage::{strike, sweep, FilterStage, GainStage, OscStage};
use crate::voices::Tone;

pub struct SubTone<P> {
    pub oscillator: OscStage<P>,
    pub filter: FilterStage<P>,
    pub level: GainStage<P>,
    pub output: Gain<P>,
}

impl<P: AutomationTarget> Tone<P> for SubTone<P> {
    const ENVELOPES: usize = 3;

    fn build<B: AudioBackend<Param = P>>(backend: &mut B) -> Self {
        let oscillator = OscStage::build(backend, Waveform::Sawtooth, 200.0, sweep(0.1, 800.0, 200.0));
        let filter = FilterStage::build(backend, FilterType::LowPass, 2000.0, 1.0, sweep(0.5, 2000.0, 500.0));
        let level = GainStage::build(backend, 0.0, strike());
        let output = backend.create_gain(1.0);

        backend.connect(oscillator.id, filter.input());
        backend.connect(filter.id, level.input());
        backend.connect(level.id, Input::Node(output.id));

        Self {
            oscillator,
            filter,
            level,
            output,
        }
    }

    fn output(&self) -> NodeId {
        self.output.id
    }

    fn play(&mut self) {
        self.oscillator.play();
        self.filter.play();
        self.level.play();
    }
}
