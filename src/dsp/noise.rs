use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Sample-and-Hold Noise
=====================

White noise draws a fresh random value every sample. Holding each value for
several samples before drawing the next one throws away the top of the
spectrum and gives the grainy, "bit-crushed" hiss that 8-bit drum machines
are known for.

    block_size = 1   ▁▇▃█▂▅▁▆▄▂▇▁   (white)
    block_size = 4   ▃▃▃▃▇▇▇▇▁▁▁▁   (steppy, darker)

The hold length is shared between the control thread and the audio thread
through an atomic, so it can be moved while the voice is sounding. A run
keeps the length it was drawn with; a change is picked up by the next draw.

Every output channel keeps its own run, so a stereo noise node produces two
uncorrelated channels that step at the same rate.
*/

/// Shared, runtime-mutable hold length for a [`NoiseSource`].
///
/// Cloning the handle shares the same underlying value.
#[derive(Clone, Debug)]
pub struct BlockSize(Arc<AtomicUsize>);

impl BlockSize {
    pub fn new(samples: usize) -> Self {
        Self(Arc::new(AtomicUsize::new(samples.max(1))))
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }

    /// Values below one are clamped to one.
    pub fn set(&self, samples: usize) {
        self.0.store(samples.max(1), Ordering::Relaxed);
    }
}

impl Default for BlockSize {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Buffering options a noise node is created with.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoiseOptions {
    pub buffer_size: usize,
    pub input_channels: usize,
    pub output_channels: usize,
}

impl Default for NoiseOptions {
    fn default() -> Self {
        Self {
            buffer_size: 256,
            input_channels: 1,
            output_channels: 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Hold {
    value: f32,
    remaining: usize,
}

pub struct NoiseSource {
    rng: SmallRng,
    block_size: BlockSize,
    holds: Vec<Hold>,
}

impl NoiseSource {
    pub fn new(seed: u64, block_size: BlockSize, channels: usize) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            block_size,
            holds: vec![
                Hold {
                    value: 0.0,
                    remaining: 0,
                };
                channels.max(1)
            ],
        }
    }

    pub fn block_size(&self) -> &BlockSize {
        &self.block_size
    }

    pub fn channels(&self) -> usize {
        self.holds.len()
    }

    #[inline]
    pub fn next_sample(&mut self, channel: usize) -> f32 {
        let block = self.block_size.get();
        let Some(hold) = self.holds.get_mut(channel) else {
            return 0.0;
        };

        if hold.remaining == 0 {
            hold.value = self.rng.random_range(-1.0f32..1.0);
            hold.remaining = block;
        }
        hold.remaining -= 1;
        hold.value
    }

    pub fn render(&mut self, channel: usize, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample(channel);
        }
    }

    /// Render every channel, one buffer each.
    pub fn render_channels(&mut self, outputs: &mut [&mut [f32]]) {
        for (channel, out) in outputs.iter_mut().enumerate() {
            self.render(channel, out);
        }
    }
}
