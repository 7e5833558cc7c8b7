use crate::engine::node::RenderNode;
use crate::engine::param::ParamSlot;
use crate::engine::Clock;
use crate::MAX_BLOCK_SIZE;

/*
Block Rendering
===============

One call to `render_block` does, in order:

    1. drain     apply curves queued on each parameter
    2. prune     drop timeline events that are fully in the past
    3. nodes     in topological order:
                   a. parameters: timeline value + every modulator's output
                   b. input:      sum of every connected node's output
                   c. process
    4. output    copy the destination's buffer out
    5. advance   move the shared clock forward by the block length

Steps 1 and 2 happen between blocks, so a curve is applied whole: the
renderer never sees half of a re-trigger.

Nothing here allocates. Every buffer is sized to MAX_BLOCK_SIZE when the
graph is finished.
*/

/// Audio-thread half of an [`Engine`](crate::engine::Engine).
pub struct Renderer {
    clock: Clock,
    sample_rate: f32,
    nodes: Vec<RenderNode>,
    /// Audio sources feeding each node.
    inputs: Vec<Vec<usize>>,
    /// Parameter slots each node reads.
    node_params: Vec<Vec<usize>>,
    params: Vec<ParamSlot>,
    order: Vec<usize>,
    destination: usize,
    scratch: Vec<f32>,
}

impl Renderer {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        clock: Clock,
        sample_rate: f32,
        nodes: Vec<RenderNode>,
        inputs: Vec<Vec<usize>>,
        node_params: Vec<Vec<usize>>,
        params: Vec<ParamSlot>,
        order: Vec<usize>,
        destination: usize,
    ) -> Self {
        Self {
            clock,
            sample_rate,
            nodes,
            inputs,
            node_params,
            params,
            order,
            destination,
            scratch: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Node indices in the order they are rendered.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Fill `out` with mono samples. Buffers longer than [`MAX_BLOCK_SIZE`]
    /// are rendered in several blocks.
    pub fn render(&mut self, out: &mut [f32]) {
        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_block(block);
        }
    }

    pub fn render_block(&mut self, out: &mut [f32]) {
        let len = out.len().min(MAX_BLOCK_SIZE);
        let start = self.clock.now();

        for slot in &mut self.params {
            slot.drain();
            slot.timeline.prune(start);
        }

        for &idx in &self.order {
            for &param in &self.node_params[idx] {
                let slot = &mut self.params[param];
                let values = &mut slot.values[..len];
                slot.timeline.render(start, self.sample_rate, values);
                for &modulator in &slot.modulators {
                    for (value, &m) in values.iter_mut().zip(&self.nodes[modulator].output) {
                        *value += m;
                    }
                }
            }

            let input = &mut self.scratch[..len];
            input.fill(0.0);
            for &source in &self.inputs[idx] {
                for (sample, &x) in input.iter_mut().zip(&self.nodes[source].output) {
                    *sample += x;
                }
            }

            self.nodes[idx].process(&self.scratch[..len], &self.params, self.sample_rate);
        }

        out[..len].copy_from_slice(&self.nodes[self.destination].output[..len]);
        self.clock.advance(len);
    }
}
