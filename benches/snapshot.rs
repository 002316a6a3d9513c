use chrono::{DateTime, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use round_tracker::{Initiative, Session, TrackerConfig};

const FACTIONS: [&str; 8] = [
    "arborec",
    "winnu",
    "nomad",
    "empyrean",
    "xxcha-kingdom",
    "yin-brotherhood",
    "titans-of-ul",
    "naalu-collective",
];

fn populated_session() -> Session {
    let mut session = Session::new(TrackerConfig::default().with_id_seed(1));
    let ids: Vec<_> = FACTIONS
        .iter()
        .enumerate()
        .filter_map(|(i, faction)| session.add_player(&format!("P{i}"), faction).ok())
        .collect();
    for (i, id) in ids.iter().enumerate() {
        session.assign_card(*id, Initiative::new(i as u8 + 1));
    }
    let base = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default();
    for step in 0..100 {
        let id = ids[step % ids.len()];
        session.increment_vp_at(id, 1, base + chrono::Duration::seconds(step as i64));
    }
    session
}

fn bench_snapshot(c: &mut Criterion) {
    let session = populated_session();
    c.bench_function("snapshot(players=8,history=100)", |b| {
        b.iter(|| black_box(session.snapshot()))
    });
}

fn bench_round(c: &mut Criterion) {
    let session = populated_session();
    c.bench_function("start_new_round(players=8)", |b| {
        b.iter_batched(
            || Session::with_state(TrackerConfig::default(), session.snapshot()),
            |mut s| {
                s.start_new_round();
                black_box(s.turn_count())
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_export(c: &mut Criterion) {
    let session = populated_session();
    c.bench_function("export_bytes(players=8)", |b| {
        b.iter(|| black_box(session.export_bytes().map(|bytes| bytes.len())))
    });
}

criterion_group!(benches, bench_snapshot, bench_round, bench_export);
criterion_main!(benches);
