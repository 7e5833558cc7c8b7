//! FM percussion tone.
//!
//! Two sine oscillators, one bending the other's pitch. The modulator's
//! output is scaled by an enveloped depth gain and added to the carrier's
//! frequency parameter, never to its audio. A deep, fast-decaying depth
//! envelope gives metallic, bell-like strikes; a shallow one a thump with
//! a bit of grit.
//!
//! ```text
//! modulator ──► depth ──► carrier.frequency
//!                         carrier ──► filter ──► level ──► output
//! ```

use crate::automation::AutomationTarget;
use crate::dsp::{FilterType, Waveform};
use crate::graph::{AudioBackend, Gain, Input, NodeId};
use crate::voices::stage::{strike, sweep, FilterStage, GainStage, OscStage};
use crate::voices::Tone;

pub struct FmTone<P> {
    pub modulator: OscStage<P>,
    pub depth: GainStage<P>,
    pub carrier: OscStage<P>,
    pub filter: FilterStage<P>,
    pub level: GainStage<P>,
    pub output: Gain<P>,
}

impl<P: AutomationTarget> Tone<P> for FmTone<P> {
    const ENVELOPES: usize = 5;

    fn build<B: AudioBackend<Param = P>>(backend: &mut B) -> Self {
        let modulator = OscStage::build(backend, Waveform::Sine, 200.0, sweep(0.1, 800.0, 200.0));
        let depth = GainStage::build(backend, 0.0, sweep(0.1, 0.0, 0.0));
        let carrier = OscStage::build(backend, Waveform::Sine, 200.0, sweep(0.1, 800.0, 200.0));
        let filter = FilterStage::build(backend, FilterType::LowPass, 2000.0, 1.0, sweep(0.5, 2000.0, 500.0));
        let level = GainStage::build(backend, 0.0, strike());
        let output = backend.create_gain(1.0);

        backend.connect(modulator.id, depth.input());
        backend.connect(depth.id, carrier.frequency_input());
        backend.connect(carrier.id, filter.input());
        backend.connect(filter.id, level.input());
        backend.connect(level.id, Input::Node(output.id));

        Self {
            modulator,
            depth,
            carrier,
            filter,
            level,
            output,
        }
    }

    fn output(&self) -> NodeId {
        self.output.id
    }

    fn play(&mut self) {
        self.modulator.play();
        self.depth.play();
        self.carrier.play();
        self.filter.play();
        self.level.play();
    }
}
