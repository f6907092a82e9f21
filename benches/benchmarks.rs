// benches/benchmarks.rs — Performance benchmarks (criterion)
//
//   1. Startup time: schema migration + store init
//   2. Reply parsing: well-formed and malformed score replies
//   3. History listing from a populated store

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rusqlite::Connection;

use interview_coach::interview::parser::{parse_question, parse_score};
use interview_coach::interview::prompts::scoring_prompt;
use interview_coach::memory::schema::run_migrations;
use interview_coach::memory::store::{NewSession, Store};

// ─── Helpers ────────────────────────────────────────────────────────────────

fn setup_store() -> Store {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    run_migrations(&conn).expect("run migrations");
    Store::new(conn)
}

fn populate_store(store: &Store, n: usize) {
    for i in 0..n {
        let session = NewSession {
            topic: format!("Topic {}", i % 7),
            question: format!("Question #{i}: explain state hoisting in module {}", i % 20),
            answer: "State moves up to the caller; the composable becomes stateless.".into(),
            score: (i % 10) as i32 + 1,
            label: "Developing".into(),
            summary: format!("Summary #{i}"),
        };
        store
            .insert_session_at(&session, i as i64 * 1_000)
            .expect("insert session");
    }
}

const SCORE_REPLY: &str = "SCORE: 8\n\
LABEL: Strong\n\
STRENGTHS:\n\
- Correct definition of recomposition\n\
- Mentions stability of parameters\n\
- Good example with LazyColumn keys\n\
IMPROVEMENTS:\n\
- Discuss derivedStateOf\n\
- Quantify the performance impact\n\
SUMMARY: Strong answer with a concrete example; add measurement next time.";

// ─── Benchmark: Startup ─────────────────────────────────────────────────────

fn bench_startup(c: &mut Criterion) {
    c.bench_function("startup_schema_init", |b| {
        b.iter(|| {
            let conn = Connection::open_in_memory().expect("open in-memory db");
            run_migrations(black_box(&conn)).expect("run migrations");
            Store::new(conn)
        })
    });
}

// ─── Benchmark: Parsing ─────────────────────────────────────────────────────

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.bench_function("score_well_formed", |b| {
        b.iter(|| parse_score(black_box(SCORE_REPLY)))
    });

    let rambling = "Well, the candidate said a lot of things. ".repeat(200);
    group.bench_function("score_malformed_fallback", |b| {
        b.iter(|| parse_score(black_box(&rambling)))
    });

    group.bench_function("question", |b| {
        b.iter(|| parse_question(black_box("Sure!\nQUESTION: What is a sealed interface?\n")))
    });

    group.bench_function("scoring_prompt", |b| {
        let answer = "A long answer. ".repeat(100);
        b.iter(|| scoring_prompt(black_box("What is remember?"), black_box(&answer)))
    });

    group.finish();
}

// ─── Benchmark: Store ───────────────────────────────────────────────────────

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");

    group.bench_function("insert_session", |b| {
        let store = setup_store();
        let session = NewSession {
            topic: "Kotlin".into(),
            question: "What is a coroutine?".into(),
            answer: "A suspendable computation.".into(),
            score: 7,
            label: "Strong".into(),
            summary: "Good.".into(),
        };
        b.iter(|| store.insert_session(black_box(&session)).expect("insert"))
    });

    group.bench_function("list_sessions_500", |b| {
        let store = setup_store();
        populate_store(&store, 500);
        b.iter(|| store.list_sessions().expect("list"))
    });

    group.bench_function("recent_sessions_20", |b| {
        let store = setup_store();
        populate_store(&store, 500);
        b.iter(|| store.recent_sessions(black_box(20)).expect("recent"))
    });

    group.bench_function("average_score", |b| {
        let store = setup_store();
        populate_store(&store, 500);
        b.iter(|| store.average_score().expect("average"))
    });

    group.finish();
}

// ─── Main ───────────────────────────────────────────────────────────────────

criterion_group!(benches, bench_startup, bench_parsing, bench_store);
criterion_main!(benches);
