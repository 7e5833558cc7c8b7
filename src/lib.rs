pub mod automation; // Curves, timelines and the automation target contract
pub mod binding; // UI-facing parameter bindings
pub mod dsp;
pub mod engine; // Native block renderer implementing the audio backend
pub mod graph; // Audio backend seam: node handles and connections
pub mod voices; // Tones, noise component and composed voices

pub const MAX_BLOCK_SIZE: usize = 2048;
