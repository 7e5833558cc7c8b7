use crate::dsp::filter::SVFilter;
use crate::dsp::noise::NoiseSource;
use crate::dsp::oscillator::PhaseOscillator;
use crate::dsp::{FilterType, Waveform};
use crate::engine::param::ParamSlot;
use crate::graph::Setting;
use crate::MAX_BLOCK_SIZE;

/// What a node does with its summed input. Parameter fields are indices into
/// the renderer's parameter slots.
pub(crate) enum NodeKind {
    Oscillator {
        osc: PhaseOscillator,
        waveform: Setting<Waveform>,
        frequency: usize,
    },
    Gain {
        gain: usize,
    },
    Filter {
        filter: SVFilter,
        filter_type: Setting<FilterType>,
        frequency: usize,
        q: usize,
    },
    Noise {
        source: NoiseSource,
    },
    Destination,
}

impl NodeKind {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            NodeKind::Oscillator { .. } => "oscillator",
            NodeKind::Gain { .. } => "gain",
            NodeKind::Filter { .. } => "filter",
            NodeKind::Noise { .. } => "noise",
            NodeKind::Destination => "destination",
        }
    }

    /// Parameter slots this node reads while rendering.
    pub(crate) fn params(&self) -> Vec<usize> {
        match self {
            NodeKind::Oscillator { frequency, .. } => vec![*frequency],
            NodeKind::Gain { gain } => vec![*gain],
            NodeKind::Filter { frequency, q, .. } => vec![*frequency, *q],
            NodeKind::Noise { .. } | NodeKind::Destination => Vec::new(),
        }
    }
}

pub(crate) struct RenderNode {
    pub(crate) kind: NodeKind,
    pub(crate) output: Vec<f32>,
}

impl RenderNode {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            output: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// Render `input.len()` samples into `self.output`. Parameter slots must
    /// already hold this block's values.
    pub(crate) fn process(&mut self, input: &[f32], params: &[ParamSlot], sample_rate: f32) {
        let len = input.len();
        let out = &mut self.output[..len];

        match &mut self.kind {
            NodeKind::Oscillator {
                osc,
                waveform,
                frequency,
            } => {
                osc.render(waveform.get(), &params[*frequency].values[..len], sample_rate, out);
            }
            NodeKind::Gain { gain } => {
                for ((o, &x), &g) in out.iter_mut().zip(input).zip(&params[*gain].values) {
                    *o = x * g;
                }
            }
            NodeKind::Filter {
                filter,
                filter_type,
                frequency,
                q,
            } => {
                out.copy_from_slice(input);
                filter.render(
                    out,
                    filter_type.get(),
                    &params[*frequency].values[..len],
                    &params[*q].values[..len],
                    sample_rate,
                );
            }
            // Engine noise sources are created with a single channel.
            NodeKind::Noise { source } => source.render(0, out),
            NodeKind::Destination => out.copy_from_slice(input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::BlockSize;
    use crate::engine::param::curve_queue;

    fn slot(value: f32) -> ParamSlot {
        ParamSlot::new(value, curve_queue(1))
    }

    #[test]
    fn gain_multiplies_input() {
        let params = [slot(0.5)];
        let mut node = RenderNode::new(NodeKind::Gain { gain: 0 });

        node.process(&[1.0, -2.0, 4.0], &params, 48_000.0);

        assert_eq!(&node.output[..3], &[0.5, -1.0, 2.0]);
    }

    #[test]
    fn destination_passes_input_through() {
        let mut node = RenderNode::new(NodeKind::Destination);
        node.process(&[0.25; 8], &[], 48_000.0);
        assert_eq!(&node.output[..8], &[0.25; 8]);
    }

    #[test]
    fn noise_ignores_input() {
        let mut node = RenderNode::new(NodeKind::Noise {
            source: NoiseSource::new(1, BlockSize::new(2), 1),
        });
        node.process(&[0.0; 8], &[], 48_000.0);

        assert!(node.output[..8].iter().any(|&sample| sample != 0.0));
        assert_eq!(node.output[0], node.output[1]);
    }
}
