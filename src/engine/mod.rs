//! Native block renderer implementing [`AudioBackend`].
//!
//! Building happens on the control thread: create nodes, connect them, then
//! call [`Engine::finish`] to validate the wiring and get a [`Renderer`] for
//! the audio thread. Parameter handles stay with the control side and keep
//! working after `finish`; their curves reach the renderer through
//! per-parameter queues the audio thread drains without blocking.

mod clock;
mod node;
mod param;
mod renderer;

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::automation::ParamId;
use crate::dsp::filter::SVFilter;
use crate::dsp::noise::NoiseSource;
use crate::dsp::oscillator::PhaseOscillator;
use crate::dsp::{BlockSize, FilterType, NoiseOptions, Waveform};
use crate::graph::{AudioBackend, Filter, Gain, Input, Noise, NodeId, Oscillator, Setting};

pub use clock::Clock;
pub use param::ParamHandle;
pub use renderer::Renderer;

use node::{NodeKind, RenderNode};
use param::{curve_queue, ParamSlot};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: f32,
    /// Curves each parameter queue holds before it has to grow.
    pub queue_capacity: usize,
    /// Seed for the noise generators.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            queue_capacity: 16,
            seed: 0x5eed,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    #[error("unknown parameter {0}")]
    UnknownParam(ParamId),
    #[error("{0} cannot be connected to itself")]
    SelfConnection(NodeId),
    #[error("{from} is already connected to {to}")]
    DuplicateConnection { from: NodeId, to: Input },
    #[error("the destination has no output to connect")]
    DestinationOutput,
    #[error("connections form a cycle")]
    Cycle,
}

/// Graph builder and clock.
pub struct Engine {
    config: EngineConfig,
    clock: Clock,
    nodes: Vec<NodeKind>,
    params: Vec<ParamSlot>,
    /// Node that owns each parameter, by parameter index.
    param_owner: Vec<usize>,
    edges: Vec<(NodeId, Input)>,
    destination: NodeId,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let mut engine = Self {
            config,
            clock: Clock::new(config.sample_rate),
            nodes: Vec::new(),
            params: Vec::new(),
            param_owner: Vec::new(),
            edges: Vec::new(),
            destination: NodeId::new(0),
        };
        engine.destination = engine.push_node(NodeKind::Destination);
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Connections recorded so far, in call order.
    pub fn edges(&self) -> &[(NodeId, Input)] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        debug!(node = %id, kind = kind.label(), "create node");
        self.nodes.push(kind);
        id
    }

    /// Reserve a parameter for the node that will be pushed next.
    fn create_param(&mut self, value: f32) -> (usize, ParamHandle) {
        let index = self.params.len();
        let id = ParamId::new(index as u32);
        let queue = curve_queue(self.config.queue_capacity);

        self.params.push(ParamSlot::new(value, Arc::clone(&queue)));
        self.param_owner.push(self.nodes.len());
        (index, ParamHandle::new(id, self.clock.clone(), queue, value))
    }

    /// Validate the graph and hand back the audio-thread half.
    pub fn finish(self) -> Result<Renderer, EngineError> {
        let Engine {
            config,
            clock,
            nodes,
            mut params,
            param_owner,
            edges,
            destination,
        } = self;

        let node_count = nodes.len();
        let mut inputs: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        // source -> nodes that must render after it
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut seen = HashSet::new();

        for &(source, input) in &edges {
            if source.index() >= node_count {
                return Err(EngineError::UnknownNode(source));
            }
            if source == destination {
                return Err(EngineError::DestinationOutput);
            }
            if !seen.insert((source, input)) {
                return Err(EngineError::DuplicateConnection {
                    from: source,
                    to: input,
                });
            }

            let target = match input {
                Input::Node(node) => {
                    if node.index() >= node_count {
                        return Err(EngineError::UnknownNode(node));
                    }
                    inputs[node.index()].push(source.index());
                    node.index()
                }
                Input::Param(param) => {
                    let index = param.index() as usize;
                    let Some(&owner) = param_owner.get(index) else {
                        return Err(EngineError::UnknownParam(param));
                    };
                    params[index].modulators.push(source.index());
                    owner
                }
            };

            if target == source.index() {
                return Err(EngineError::SelfConnection(source));
            }
            dependents[source.index()].push(target);
        }

        let order = kahn_sort(&dependents)?;

        let node_params: Vec<Vec<usize>> = nodes.iter().map(NodeKind::params).collect();

        debug!(
            nodes = node_count,
            params = params.len(),
            edges = edges.len(),
            "graph finished"
        );

        Ok(Renderer::new(
            clock,
            config.sample_rate,
            nodes.into_iter().map(RenderNode::new).collect(),
            inputs,
            node_params,
            params,
            order,
            destination.index(),
        ))
    }
}

/// Topological order of `dependents`, or `Cycle` if there is none.
fn kahn_sort(dependents: &[Vec<usize>]) -> Result<Vec<usize>, EngineError> {
    let n = dependents.len();
    let mut in_degree = vec![0u32; n];
    for targets in dependents {
        for &target in targets {
            in_degree[target] += 1;
        }
    }

    // Reverse so nodes come out in creation order when independent.
    let mut queue: Vec<usize> = (0..n).rev().filter(|&i| in_degree[i] == 0).collect();
    let mut sorted = Vec::with_capacity(n);

    while let Some(idx) = queue.pop() {
        sorted.push(idx);
        for &target in &dependents[idx] {
            in_degree[target] -= 1;
            if in_degree[target] == 0 {
                queue.push(target);
            }
        }
    }

    if sorted.len() != n {
        return Err(EngineError::Cycle);
    }
    Ok(sorted)
}

impl AudioBackend for Engine {
    type Param = ParamHandle;

    fn current_time(&self) -> f64 {
        self.clock.now()
    }

    fn create_oscillator(&mut self, waveform: Waveform, frequency: f32) -> Oscillator<ParamHandle> {
        let (slot, handle) = self.create_param(frequency);
        let setting = Setting::new(waveform);
        let id = self.push_node(NodeKind::Oscillator {
            osc: PhaseOscillator::new(),
            waveform: setting.clone(),
            frequency: slot,
        });

        Oscillator {
            id,
            waveform: setting,
            frequency: handle,
        }
    }

    fn create_gain(&mut self, gain: f32) -> Gain<ParamHandle> {
        let (slot, handle) = self.create_param(gain);
        let id = self.push_node(NodeKind::Gain { gain: slot });

        Gain { id, gain: handle }
    }

    fn create_filter(&mut self, filter_type: FilterType, frequency: f32, q: f32) -> Filter<ParamHandle> {
        let (frequency_slot, frequency_handle) = self.create_param(frequency);
        let (q_slot, q_handle) = self.create_param(q);
        let setting = Setting::new(filter_type);
        let id = self.push_node(NodeKind::Filter {
            filter: SVFilter::new(),
            filter_type: setting.clone(),
            frequency: frequency_slot,
            q: q_slot,
        });

        Filter {
            id,
            filter_type: setting,
            frequency: frequency_handle,
            q: q_handle,
        }
    }

    /// The engine renders mono, so the node holds a single noise channel.
    /// `options` is kept on the handle for callers that size their own
    /// buffers from it; its channel counts do not change what is rendered.
    fn create_noise(&mut self, options: NoiseOptions) -> Noise {
        let block_size = BlockSize::default();
        let seed = self.config.seed.wrapping_add(self.nodes.len() as u64);
        let id = self.push_node(NodeKind::Noise {
            source: NoiseSource::new(seed, block_size.clone(), 1),
        });

        Noise {
            id,
            block_size,
            options,
        }
    }

    fn destination(&self) -> NodeId {
        self.destination
    }

    fn connect(&mut self, source: NodeId, input: Input) {
        debug!(%source, %input, "connect");
        self.edges.push((source, input));
    }
}
