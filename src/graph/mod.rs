//! The audio backend seam.
//!
//! Voices never touch samples. They ask an [`AudioBackend`] for nodes, wire
//! them together once, and from then on only schedule automation on the
//! parameter handles the backend gave them. The crate ships one backend,
//! [`crate::engine::Engine`]; tests use recording backends to check wiring
//! without rendering anything.

mod setting;

use std::fmt;

use crate::automation::{AutomationTarget, ParamId};
use crate::dsp::{BlockSize, FilterType, NoiseOptions, Waveform};

pub use setting::{Packed, Setting};

/// Identifies one node inside a backend graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Where a connection lands: a node's audio input or one of its parameters.
///
/// A signal connected to a parameter is added to the parameter's automated
/// value, sample by sample. That is how a modulator drives a carrier's
/// frequency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Input {
    Node(NodeId),
    Param(ParamId),
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Node(node) => write!(f, "{node}"),
            Input::Param(param) => write!(f, "{param}"),
        }
    }
}

pub struct Oscillator<P> {
    pub id: NodeId,
    pub waveform: Setting<Waveform>,
    pub frequency: P,
}

pub struct Gain<P> {
    pub id: NodeId,
    pub gain: P,
}

pub struct Filter<P> {
    pub id: NodeId,
    pub filter_type: Setting<FilterType>,
    pub frequency: P,
    pub q: P,
}

pub struct Noise {
    pub id: NodeId,
    pub block_size: BlockSize,
    pub options: NoiseOptions,
}

impl<P> Oscillator<P> {
    pub fn input(&self) -> Input {
        Input::Node(self.id)
    }
}

impl<P> Gain<P> {
    pub fn input(&self) -> Input {
        Input::Node(self.id)
    }
}

impl<P> Filter<P> {
    pub fn input(&self) -> Input {
        Input::Node(self.id)
    }
}

/// Node factory plus real-time clock.
///
/// Every node starts running as soon as it is created. Connections are
/// made while building; a backend may refuse further wiring once it has
/// been finalized.
pub trait AudioBackend {
    type Param: AutomationTarget;

    /// Seconds on the clock that drives every parameter of this backend.
    fn current_time(&self) -> f64;

    fn create_oscillator(&mut self, waveform: Waveform, frequency: f32) -> Oscillator<Self::Param>;

    fn create_gain(&mut self, gain: f32) -> Gain<Self::Param>;

    fn create_filter(&mut self, filter_type: FilterType, frequency: f32, q: f32) -> Filter<Self::Param>;

    fn create_noise(&mut self, options: NoiseOptions) -> Noise;

    /// The node whose inputs are heard.
    fn destination(&self) -> NodeId;

    fn connect(&mut self, source: NodeId, input: Input);
}
