//! Filtered noise burst, the snare wires and hi-hat sizzle of a voice.
//!
//! ```text
//! noise ──► filter ──► level ──► output
//! ```

use crate::automation::AutomationTarget;
use crate::dsp::{BlockSize, FilterType, NoiseOptions};
use crate::graph::{AudioBackend, Gain, Input, NodeId};
use crate::voices::stage::{strike, sweep, FilterStage, GainStage};

pub struct NoiseVoice<P> {
    pub id: NodeId,
    /// Samples each noise value is held for. Shared with the renderer.
    pub block_size: BlockSize,
    pub options: NoiseOptions,
    pub filter: FilterStage<P>,
    pub level: GainStage<P>,
    pub output: Gain<P>,
}

impl<P: AutomationTarget> NoiseVoice<P> {
    pub const ENVELOPES: usize = 2;

    pub fn build<B: AudioBackend<Param = P>>(backend: &mut B, options: NoiseOptions) -> Self {
        let noise = backend.create_noise(options);
        let filter = FilterStage::build(backend, FilterType::LowPass, 5000.0, 1.0, sweep(0.1, 5000.0, 2000.0));
        let level = GainStage::build(backend, 0.0, strike());
        let output = backend.create_gain(1.0);

        backend.connect(noise.id, filter.input());
        backend.connect(filter.id, level.input());
        backend.connect(level.id, Input::Node(output.id));

        Self {
            id: noise.id,
            block_size: noise.block_size,
            options: noise.options,
            filter,
            level,
            output,
        }
    }

    pub fn output(&self) -> NodeId {
        self.output.id
    }

    pub fn play(&mut self) {
        self.filter.play();
        self.level.play();
    }
}
