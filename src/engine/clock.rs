use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Sample clock shared by the renderer and every parameter handle.
///
/// The renderer is the only writer: it advances the frame count after each
/// block. Control code reads it to timestamp automation.
#[derive(Clone, Debug)]
pub struct Clock {
    frames: Arc<AtomicU64>,
    sample_rate: f32,
}

impl Clock {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            frames: Arc::new(AtomicU64::new(0)),
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    /// Seconds rendered so far.
    pub fn now(&self) -> f64 {
        self.frames() as f64 / f64::from(self.sample_rate)
    }

    pub(crate) fn advance(&self, frames: usize) {
        self.frames.fetch_add(frames as u64, Ordering::Release);
    }
}
