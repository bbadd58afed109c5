//! fxdemo - play a loop through one effect while its parameters are swept
//!
//! Run with: cargo run --bin fxdemo -- --recipe auto-wah
//!
//! Set RUST_LOG=fx_conductor=debug to see every snapshot.

mod source;

use std::{sync::Arc, thread, time::Duration};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::WrapErr;
use fx_conductor::{
    conductor::EffectSnapshot,
    engine::CpalBackend,
    recipes::{AutoWahData, HighShelfData},
    AudioBackend, Conductor, EffectConductor, EngineConfig,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Recipe {
    AutoWah,
    HighShelf,
}

/// Sweep an effect parameter over a looping bass line
#[derive(Parser, Debug)]
#[command(name = "fxdemo")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Effect to demo
    #[arg(long, value_enum, default_value_t = Recipe::AutoWah)]
    recipe: Recipe,

    /// How long to play, in seconds
    #[arg(long, default_value_t = 8.0)]
    seconds: f32,

    /// Seconds for one full sweep up and back down
    #[arg(long, default_value_t = 4.0)]
    period: f32,

    /// Snapshots sent per second
    #[arg(long, default_value_t = 20)]
    edit_rate: u32,

    /// Ramp applied to each parameter change
    #[arg(long, default_value_t = 0.02)]
    ramp: f32,

    /// Dry/wet balance (0 = dry, 1 = wet)
    #[arg(long, default_value_t = 0.5)]
    balance: f32,

    /// Preferred output sample rate
    #[arg(long, default_value_t = 48_000.0)]
    sample_rate: f32,

    /// Largest block rendered per graph call
    #[arg(long, default_value_t = 512)]
    block_size: usize,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = EngineConfig {
        sample_rate: args.sample_rate,
        block_size: args.block_size,
        ..EngineConfig::default()
    };

    let backend = CpalBackend::new(&config).wrap_err("failed to open output device")?;
    let source: Arc<[f32]> = source::bass_loop(backend.sample_rate()).into();

    match args.recipe {
        Recipe::AutoWah => {
            let snapshot = move |sweep: f32| AutoWahData {
                wah: sweep,
                ramp_duration: args.ramp,
                balance: args.balance,
                amplitude: 1.0,
                ..AutoWahData::default()
            };
            let conductor = EffectConductor::new(snapshot(0.0), source, Box::new(backend));
            run_sweep(conductor, &args, snapshot)
        }
        Recipe::HighShelf => {
            let snapshot = move |sweep: f32| HighShelfData {
                // 200Hz..12.8kHz, exponential
                center_frequency: 200.0 * (sweep * 6.0).exp2(),
                gain: 4.0,
                ramp_duration: args.ramp,
                balance: args.balance,
                ..HighShelfData::default()
            };
            let conductor = EffectConductor::new(snapshot(0.0), source, Box::new(backend));
            run_sweep(conductor, &args, snapshot)
        }
    }
}

fn run_sweep<S: EffectSnapshot>(
    mut conductor: EffectConductor<S>,
    args: &Args,
    snapshot: impl Fn(f32) -> S,
) -> color_eyre::Result<()> {
    conductor.start().wrap_err("failed to start playback")?;
    info!(recipe = ?args.recipe, seconds = args.seconds, "playing");

    let edit_rate = args.edit_rate.max(1);
    let interval = Duration::from_secs_f32(1.0 / edit_rate as f32);
    let edits = (args.seconds.max(0.0) * edit_rate as f32) as u32;
    let period = args.period.max(0.1);

    for edit in 0..edits {
        let t = edit as f32 / edit_rate as f32;
        conductor.on_snapshot_changed(snapshot(triangle(t / period)));
        thread::sleep(interval);
    }

    conductor.stop().wrap_err("failed to stop playback")?;
    Ok(())
}

/// 0 → 1 → 0 over one unit of `phase`.
fn triangle(phase: f32) -> f32 {
    let x = phase.fract();
    if x < 0.5 {
        x * 2.0
    } else {
        2.0 - x * 2.0
    }
}
