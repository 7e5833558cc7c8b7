//! Single enveloped nodes, the pieces tones are made of.

use crate::automation::AutomationTarget;
use crate::dsp::{Envelope, EnvelopeShape, FilterType, Waveform};
use crate::graph::{AudioBackend, Input, NodeId, Setting};

/// An oscillator whose frequency follows an envelope.
pub struct OscStage<P> {
    pub id: NodeId,
    pub waveform: Setting<Waveform>,
    pub envelope: Envelope<P>,
}

impl<P: AutomationTarget> OscStage<P> {
    pub fn build<B>(backend: &mut B, waveform: Waveform, frequency: f32, shape: EnvelopeShape) -> Self
    where
        B: AudioBackend<Param = P>,
    {
        let osc = backend.create_oscillator(waveform, frequency);
        Self {
            id: osc.id,
            waveform: osc.waveform,
            envelope: Envelope::with_shape(osc.frequency, shape),
        }
    }

    /// Input that adds to the oscillator's frequency.
    pub fn frequency_input(&self) -> Input {
        Input::Param(self.envelope.target().id())
    }

    pub fn play(&mut self) {
        self.envelope.play();
    }
}

/// A gain whose level follows an envelope.
pub struct GainStage<P> {
    pub id: NodeId,
    pub envelope: Envelope<P>,
}

impl<P: AutomationTarget> GainStage<P> {
    pub fn build<B>(backend: &mut B, gain: f32, shape: EnvelopeShape) -> Self
    where
        B: AudioBackend<Param = P>,
    {
        let node = backend.create_gain(gain);
        Self {
            id: node.id,
            envelope: Envelope::with_shape(node.gain, shape),
        }
    }

    pub fn input(&self) -> Input {
        Input::Node(self.id)
    }

    pub fn play(&mut self) {
        self.envelope.play();
    }
}

/// A filter whose cutoff follows an envelope. Q is set directly.
pub struct FilterStage<P> {
    pub id: NodeId,
    pub filter_type: Setting<FilterType>,
    pub q: P,
    pub envelope: Envelope<P>,
}

impl<P: AutomationTarget> FilterStage<P> {
    pub fn build<B>(backend: &mut B, filter_type: FilterType, frequency: f32, q: f32, shape: EnvelopeShape) -> Self
    where
        B: AudioBackend<Param = P>,
    {
        let filter = backend.create_filter(filter_type, frequency, q);
        Self {
            id: filter.id,
            filter_type: filter.filter_type,
            q: filter.q,
            envelope: Envelope::with_shape(filter.frequency, shape),
        }
    }

    pub fn input(&self) -> Input {
        Input::Node(self.id)
    }

    pub fn play(&mut self) {
        self.envelope.play();
    }
}

/// Instant attack, exponential decay from `from` to `to`.
pub(crate) fn sweep(decay_time: f32, from: f32, to: f32) -> EnvelopeShape {
    EnvelopeShape {
        attack_time: 0.0,
        decay_time,
        start_value: from,
        peak_value: from,
        end_value: to,
        exponential: true,
    }
}

/// The default level envelope: 10 ms up to 1, half a second back to 0.
pub(crate) fn strike() -> EnvelopeShape {
    EnvelopeShape {
        attack_time: 0.01,
        decay_time: 0.5,
        ..EnvelopeShape::default()
    }
}
