//! Benchmarks for the conductor's graph: player → ramped effect → dry/wet.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion};
use fx_conductor::graph::{
    BalanceControl, GraphNode, LoopPlayer, NodeExt, ParamBank, PlayerMessage, RampedEffect,
    RenderCtx,
};
use fx_conductor::recipes::{AutoWah, AutoWahParam, HighShelfEq, HighShelfParam};
use rtrb::RingBuffer;

use crate::BLOCK_SIZES;

const SR: f32 = 48_000.0;

fn source() -> Arc<[f32]> {
    (0..48_000)
        .map(|i| (2.0 * std::f32::consts::PI * 110.0 * i as f32 / SR).sin())
        .collect::<Vec<_>>()
        .into()
}

fn playing(source: Arc<[f32]>) -> LoopPlayer {
    let (mut tx, rx) = RingBuffer::new(4);
    let _ = tx.push(PlayerMessage::Play);
    LoopPlayer::new(source, rx)
}

pub fn bench_drywet(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/drywet");
    let ctx = RenderCtx::new(SR);
    let source = source();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Auto-wah with the wah parameter retargeted every block
        let params = ParamBank::<AutoWahParam>::new();
        let effect = RampedEffect::new(AutoWah::new(SR), params.clone(), SR);
        let mut graph = playing(Arc::clone(&source)).dry_wet(effect, BalanceControl::new(0.5));
        let mut wah = 0.0;
        group.bench_with_input(BenchmarkId::new("auto_wah_sweeping", size), &size, |b, _| {
            b.iter(|| {
                wah = if wah > 0.9 { 0.0 } else { wah + 0.1 };
                params.set_target(AutoWahParam::Wah, wah, 0.02);
                graph.render_block(black_box(&mut buffer), &ctx);
            })
        });

        // High shelf at rest (no ramps in flight)
        let params = ParamBank::<HighShelfParam>::new();
        let effect = RampedEffect::new(HighShelfEq::new(SR), params, SR);
        let mut graph = playing(Arc::clone(&source)).dry_wet(effect, BalanceControl::new(0.5));
        group.bench_with_input(BenchmarkId::new("high_shelf_idle", size), &size, |b, _| {
            b.iter(|| graph.render_block(black_box(&mut buffer), &ctx))
        });

        // Two stages behind one mixer
        let wah = RampedEffect::new(AutoWah::new(SR), ParamBank::new(), SR);
        let shelf = RampedEffect::new(HighShelfEq::new(SR), ParamBank::new(), SR);
        let mut graph =
            playing(Arc::clone(&source)).dry_wet(wah.through(shelf), BalanceControl::new(0.7));
        group.bench_with_input(BenchmarkId::new("wah_into_shelf", size), &size, |b, _| {
            b.iter(|| graph.render_block(black_box(&mut buffer), &ctx))
        });
    }

    group.finish();
}
