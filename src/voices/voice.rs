use tracing::debug;

use crate::automation::AutomationTarget;
use crate::dsp::NoiseOptions;
use crate::graph::{AudioBackend, Gain, Input, NodeId};
use crate::voices::{FmTone, NoiseVoice, SubTone, Tone};

/// Two tones of one flavour and a noise burst, summed into one output.
///
/// The graph is wired once in [`build`](Voice::build). After that a voice
/// only ever schedules automation: [`play`](Voice::play) strikes every
/// envelope of every part against the backend clock.
pub struct Voice<T, P> {
    pub tone1: T,
    pub tone2: T,
    pub noise: NoiseVoice<P>,
    pub output: Gain<P>,
}

pub type FmVoice<P> = Voice<FmTone<P>, P>;
pub type SubVoice<P> = Voice<SubTone<P>, P>;

impl<T: Tone<P>, P: AutomationTarget> Voice<T, P> {
    /// Envelopes triggered by one [`play`](Voice::play).
    pub const ENVELOPES: usize = 2 * T::ENVELOPES + NoiseVoice::<P>::ENVELOPES;

    pub fn build<B: AudioBackend<Param = P>>(backend: &mut B, noise_options: NoiseOptions) -> Self {
        let output = backend.create_gain(1.0);

        let tone1 = T::build(backend);
        backend.connect(tone1.output(), Input::Node(output.id));

        let tone2 = T::build(backend);
        backend.connect(tone2.output(), Input::Node(output.id));

        let noise = NoiseVoice::build(backend, noise_options);
        backend.connect(noise.output(), Input::Node(output.id));

        debug!(output = %output.id, envelopes = Self::ENVELOPES, "voice built");

        Self {
            tone1,
            tone2,
            noise,
            output,
        }
    }

    pub fn output(&self) -> NodeId {
        self.output.id
    }

    /// Route the voice's output to `input`, usually the backend destination.
    pub fn connect<B: AudioBackend<Param = P>>(&self, backend: &mut B, input: Input) {
        backend.connect(self.output.id, input);
    }

    pub fn play(&mut self) {
        self.tone1.play();
        self.tone2.play();
        self.noise.play();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Engine, EngineConfig, ParamHandle};

    #[test]
    fn envelope_counts_per_flavour() {
        assert_eq!(FmVoice::<ParamHandle>::ENVELOPES, 12);
        assert_eq!(SubVoice::<ParamHandle>::ENVELOPES, 8);
    }

    #[test]
    fn every_part_feeds_the_output() {
        let mut engine = Engine::new(EngineConfig::default());
        let voice = FmVoice::build(&mut engine, NoiseOptions::default());

        for part in [voice.tone1.output(), voice.tone2.output(), voice.noise.output()] {
            assert!(engine.edges().contains(&(part, Input::Node(voice.output()))));
        }
    }

    #[test]
    fn tones_are_independent() {
        let mut engine = Engine::new(EngineConfig::default());
        let mut voice = SubVoice::build(&mut engine, NoiseOptions::default());

        voice.tone1.level.envelope.decay_time = 2.0;

        assert_eq!(voice.tone2.level.envelope.decay_time, 0.5);
        assert_ne!(
            voice.tone1.oscillator.envelope.target().id(),
            voice.tone2.oscillator.envelope.target().id()
        );
    }
}
