//! Percussion voices.
//!
//! Everything here is generic over the parameter handle type `P`, so the same
//! voice can be built on the native [`Engine`](crate::engine::Engine) or on a
//! test backend that only records what it is asked to do.
//!
//! # Example
//!
//! ```
//! use saavy_perc::dsp::NoiseOptions;
//! use saavy_perc::engine::{Engine, EngineConfig};
//! use saavy_perc::graph::{AudioBackend, Input};
//! use saavy_perc::voices::{presets, FmVoice};
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! let mut voice = FmVoice::build(&mut engine, NoiseOptions::default());
//! let destination = engine.destination();
//! voice.connect(&mut engine, Input::Node(destination));
//! presets::fm_percussion(&mut voice);
//!
//! let mut renderer = engine.finish().unwrap();
//! voice.play();
//!
//! let mut block = [0.0f32; 256];
//! renderer.render(&mut block);
//! ```

mod fm;
mod noise;
pub mod presets;
pub mod stage;
mod sub;
mod tone;
mod voice;

pub use fm::FmTone;
pub use noise::NoiseVoice;
pub use sub::SubTone;
pub use tone::Tone;
pub use voice::{FmVoice, SubVoice, Voice};
