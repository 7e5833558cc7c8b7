use crate::automation::AutomationTarget;
use crate::graph::{AudioBackend, NodeId};

/// A monophonic sound unit built once on a backend and struck repeatedly.
pub trait Tone<P: AutomationTarget>: Sized {
    /// Envelopes triggered by one [`play`](Tone::play).
    const ENVELOPES: usize;

    /// Create and wire every node. Oscillators start running immediately.
    fn build<B: AudioBackend<Param = P>>(backend: &mut B) -> Self;

    /// The node carrying the tone's audio.
    fn output(&self) -> NodeId;

    /// Trigger every envelope against the backend clock.
    fn play(&mut self);
}
