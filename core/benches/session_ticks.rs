use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use whackamole_core::*;

fn full_session(seed: u64) -> Score {
    let mut session = Session::new(
        GameConfig::default(),
        ManualScheduler::new(),
        RandomRoll::new(seed),
        Muted,
    );
    session.start();
    while let Some((event, _)) = session.step(u64::MAX) {
        if let TimerEvent::SpawnTick = event {
            let showing = session.grid().cells().position(CellContent::is_showing);
            if let Some(cell) = showing {
                let _ = session.whack(cell);
            }
        }
    }
    session.score()
}

fn bench_sessions(c: &mut Criterion) {
    c.bench_function("full 60s session", |b| {
        b.iter(|| full_session(black_box(0x5eed)))
    });

    c.bench_function("spawn tick on busy grid", |b| {
        b.iter_batched(
            || {
                let mut session = Session::new(
                    GameConfig::default(),
                    ManualScheduler::new(),
                    RandomRoll::new(7),
                    Muted,
                );
                session.start();
                for _ in 0..8 {
                    session.handle(TimerEvent::SpawnTick);
                }
                session
            },
            |mut session| black_box(session.handle(TimerEvent::SpawnTick)),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_sessions);
criterion_main!(benches);
