//! Query benchmarks over a synthetic corpus
//!
//! Run with: cargo bench --bench matching

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ffip::index::{Candidate, Corpus};
use ffip::query::{parse_query, QueryExecutor, Scorer};

/// Build a corpus shaped like a mid-sized source tree
fn synthetic_corpus(n: usize) -> Corpus {
    let dirs = [
        "src",
        "src/index",
        "src/query",
        "src/server",
        "tests/fixtures",
        "docs/api/reference",
        "vendor/third_party/lib",
    ];
    let names = [
        "main", "lib", "executor", "parser", "mod", "build", "QueryPlanner", "socket_listener",
    ];
    let exts = ["rs", "md", "toml", "json"];

    let paths = (0..n).map(|i| {
        format!(
            "{}/{}_{}.{}",
            dirs[i % dirs.len()],
            names[(i / dirs.len()) % names.len()],
            i,
            exts[i % exts.len()]
        )
    });
    Corpus::from_paths(paths, n)
}

fn bench_queries(c: &mut Criterion) {
    let corpus = synthetic_corpus(50_000);
    let scorer = Scorer::with_defaults();
    let queries = ["", "m", "main", "qexec", "src/server/sock", "zzzz"];

    let mut group = c.benchmark_group("query_50k");
    for query in queries {
        let parsed = parse_query(query);
        group.bench_with_input(BenchmarkId::from_parameter(query), &parsed, |b, q| {
            b.iter(|| QueryExecutor::new(&corpus, &scorer).execute(black_box(q), 50))
        });
    }
    group.finish();
}

fn bench_sequential_vs_parallel(c: &mut Criterion) {
    let corpus = synthetic_corpus(50_000);
    let scorer = Scorer::with_defaults();
    let query = parse_query("qplan");

    let mut group = c.benchmark_group("scoring_mode");
    group.bench_function("parallel", |b| {
        b.iter(|| QueryExecutor::new(&corpus, &scorer).execute(black_box(&query), 50))
    });
    group.bench_function("sequential", |b| {
        b.iter(|| {
            QueryExecutor::new(&corpus, &scorer)
                .parallel(false)
                .execute(black_box(&query), 50)
        })
    });
    group.finish();
}

fn bench_single_score(c: &mut Criterion) {
    let candidate = Candidate::new("vendor/third_party/lib/QueryPlanner_1234.json");
    let scorer = Scorer::with_defaults();
    let query = parse_query("vtqplan");

    c.bench_function("score_one_candidate", |b| {
        b.iter(|| scorer.score(black_box(&candidate), black_box(&query.chars)))
    });
}

criterion_group!(benches, bench_queries, bench_sequential_vs_parallel, bench_single_score);
criterion_main!(benches);
