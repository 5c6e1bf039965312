//! Dispatch throughput benchmarks
//!
//! Every recorded action clones the whole state for the undo history, so
//! these measure that cost as the board fills up:
//!
//! 1. **Life** - a cheap action on a four-player table
//! 2. **Board** - the same action with N permanents per player
//! 3. **Undo** - dispatch followed by undo

use commander_ledger::{
    core::PlayerId,
    game::{Action, GameOptions, PlayerSetup, Settings, Store},
    loader::CatalogCard,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn table(permanents: usize) -> (Store, Vec<PlayerId>) {
    let mut store = Store::with_seed(Settings::default(), 42);
    store.dispatch(Action::InitGame {
        players: ["Alice", "Bob", "Carol", "Dave"].into_iter().map(PlayerSetup::named).collect(),
        options: GameOptions::default(),
    });
    let ids: Vec<PlayerId> = store.state().players.iter().map(|p| p.id).collect();
    for &player_id in &ids {
        for i in 0..permanents {
            store.dispatch(Action::AddCardToBattlefield {
                player_id,
                card: CatalogCard::named(format!("Permanent {i}"), "Artifact"),
            });
        }
    }
    (store, ids)
}

fn bench_life(c: &mut Criterion) {
    let (mut store, ids) = table(0);
    c.bench_function("dispatch_update_life", |b| {
        b.iter(|| {
            black_box(store.dispatch(Action::UpdateLife {
                player_id: ids[0],
                amount: black_box(0),
            }))
        })
    });
}

fn bench_board(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch_board_size");
    for permanents in [10, 50, 200] {
        let (mut store, ids) = table(permanents);
        group.bench_with_input(BenchmarkId::from_parameter(permanents), &permanents, |b, _| {
            b.iter(|| {
                black_box(store.dispatch(Action::UpdateLife {
                    player_id: ids[1],
                    amount: black_box(0),
                }))
            })
        });
    }
    group.finish();
}

fn bench_undo(c: &mut Criterion) {
    let (mut store, ids) = table(50);
    c.bench_function("dispatch_then_undo", |b| {
        b.iter(|| {
            store.dispatch(Action::UpdateLife {
                player_id: ids[2],
                amount: -1,
            });
            black_box(store.dispatch(Action::Undo))
        })
    });
}

criterion_group!(benches, bench_life, bench_board, bench_undo);
criterion_main!(benches);
