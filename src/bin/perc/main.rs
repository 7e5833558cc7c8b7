//! perc - terminal trigger pad for the percussion voices
//!
//! Run with: cargo run --bin perc -- --preset sub

mod app;
mod ui;

use std::path::PathBuf;
use std::sync::Mutex;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::WrapErr;
use tracing_subscriber::EnvFilter;

use app::Perc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Two FM tones over steppy noise
    Fm,
    /// Two triangle tones over white noise
    Sub,
}

#[derive(Parser, Debug)]
#[command(name = "perc")]
#[command(about = "Strike and tweak envelope-driven percussion voices")]
#[command(version)]
struct Args {
    /// Factory preset to start from
    #[arg(long, value_enum, default_value = "fm")]
    preset: Preset,

    /// Log file (the terminal belongs to the UI)
    #[arg(long, default_value = "perc.log")]
    log_file: PathBuf,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let log = std::fs::File::create(&args.log_file)
        .wrap_err_with(|| format!("failed to create log file {}", args.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();

    tracing::info!(preset = ?args.preset, "starting perc");

    Perc::new(args.preset).run()
}
