//! Audio bootstrap: device, engine, voice and the output stream.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Producer, RingBuffer};

use saavy_perc::{
    binding::{fm_bindings, sub_bindings},
    dsp::NoiseOptions,
    engine::{Engine, EngineConfig, ParamHandle, Renderer},
    graph::{AudioBackend, Input},
    voices::{presets, FmVoice, SubVoice},
    MAX_BLOCK_SIZE,
};

use super::ui::UiApp;
use super::Preset;

/// Samples buffered for the scope between two UI frames.
const SCOPE_CAPACITY: usize = 8192;

pub struct Perc {
    preset: Preset,
}

impl Perc {
    pub fn new(preset: Preset) -> Self {
        Self { preset }
    }

    /// Open the output device, build the voice and hand the terminal to the UI.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = (config.channels() as usize).max(1);
        tracing::info!(
            device = %device.name().unwrap_or_default(),
            sample_rate,
            channels,
            "audio config"
        );

        let mut engine = Engine::new(EngineConfig {
            sample_rate,
            ..EngineConfig::default()
        });
        let destination = Input::Node(engine.destination());

        match self.preset {
            Preset::Fm => {
                let mut voice = FmVoice::build(&mut engine, NoiseOptions::default());
                voice.connect(&mut engine, destination);
                presets::fm_percussion(&mut voice);

                let ui = UiApp::new(
                    "FM percussion",
                    voice,
                    fm_bindings(),
                    |voice: &mut FmVoice<ParamHandle>| voice.play(),
                );
                play(engine, &device, config, channels, ui)
            }
            Preset::Sub => {
                let mut voice = SubVoice::build(&mut engine, NoiseOptions::default());
                voice.connect(&mut engine, destination);
                presets::sub_percussion(&mut voice);

                let ui = UiApp::new(
                    "Subtractive percussion",
                    voice,
                    sub_bindings(),
                    |voice: &mut SubVoice<ParamHandle>| voice.play(),
                );
                play(engine, &device, config, channels, ui)
            }
        }
    }
}

fn play<V>(
    engine: Engine,
    device: &cpal::Device,
    config: cpal::SupportedStreamConfig,
    channels: usize,
    mut ui: UiApp<V>,
) -> EyreResult<()> {
    let renderer = engine.finish().wrap_err("failed to finish the voice graph")?;
    let (scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_CAPACITY);

    let stream = device.build_output_stream(
        &config.into(),
        output_callback(renderer, scope_tx, channels),
        |err| tracing::error!(%err, "audio stream error"),
        None,
    )?;
    stream.play()?;

    let mut terminal = ratatui::init();
    let result = ui.run(&mut terminal, scope_rx);
    ratatui::restore();

    drop(stream);
    tracing::info!("stopped");
    result
}

/// Render mono blocks and copy each sample to every channel.
fn output_callback(
    mut renderer: Renderer,
    mut scope_tx: Producer<f32>,
    channels: usize,
) -> impl FnMut(&mut [f32], &cpal::OutputCallbackInfo) + Send + 'static {
    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

    move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
        for chunk in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
            let frames = chunk.len() / channels;
            let block = &mut render_buf[..frames];
            renderer.render_block(block);

            for (frame, &sample) in chunk.chunks_mut(channels).zip(block.iter()) {
                frame.fill(sample);
                // The scope only needs recent samples; drop when it lags.
                let _ = scope_tx.push(sample);
            }
        }
    }
}
