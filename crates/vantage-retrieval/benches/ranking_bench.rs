use chrono::{Duration, Utc};
use criterion::{criterion_group, criterion_main, Criterion};

use vantage_core::models::{CandidateResult, Document, SourceStrategy};
use vantage_core::text::tokenize;
use vantage_retrieval::analysis::QueryAnalyzer;
use vantage_retrieval::fusion::fuse;
use vantage_retrieval::index::{Bm25Params, LexicalIndex};
use vantage_retrieval::ranking::RankingPipeline;

const TOPICS: &[&str] = &[
    "series b funding round led by a growth investor",
    "seed round for a robotics startup",
    "ai chip market outlook and valuation trend",
    "founder interview on enterprise machine learning",
    "quarterly venture portfolio review",
];

/// 1K documents cycling through a handful of topics.
fn build_corpus(n: usize) -> Vec<Document> {
    (0..n)
        .map(|i| {
            let topic = TOPICS[i % TOPICS.len()];
            Document::new(
                format!("doc-{i}"),
                format!("Company {i} {topic}"),
                format!("Company {i} reported a {topic}. Analysts tracked the deal closely."),
            )
        })
        .collect()
}

fn build_candidates(n: usize) -> Vec<CandidateResult> {
    let now = Utc::now();
    (0..n)
        .map(|i| {
            let strategy = match i % 3 {
                0 => SourceStrategy::DenseVector,
                1 => SourceStrategy::SparseKeyword,
                _ => SourceStrategy::SemanticPattern,
            };
            CandidateResult::new(
                Some(format!("doc-{}", i % (n / 2).max(1))),
                format!("Company {i}"),
                format!("Company {i} {}", TOPICS[i % TOPICS.len()]),
                0.5,
                strategy,
            )
            .with_timestamp(Some(now - Duration::hours(i as i64 % 48)))
        })
        .collect()
}

fn bench_bm25_search(c: &mut Criterion) {
    let index = LexicalIndex::build(build_corpus(1_000));
    let terms = tokenize("series b funding round valuation");
    let params = Bm25Params::default();

    c.bench_function("bm25_search_1k_docs", |b| {
        b.iter(|| index.search(&terms, &params, None, 10));
    });
}

fn bench_fuse_and_rank(c: &mut Criterion) {
    let candidates = build_candidates(100);
    let pipeline = RankingPipeline::default();
    let now = Utc::now();

    c.bench_function("fuse_and_rank_100_candidates", |b| {
        b.iter(|| {
            let fused = fuse(candidates.clone()).candidates;
            pipeline.rank("series b funding valuation", fused, 8, None, now)
        });
    });
}

fn bench_analyze(c: &mut Criterion) {
    let analyzer = QueryAnalyzer::new();
    c.bench_function("analyze_query", |b| {
        b.iter(|| analyzer.analyze("Compare the latest funding rounds of Acme AI and Boreal Robotics"));
    });
}

criterion_group!(benches, bench_bm25_search, bench_fuse_and_rank, bench_analyze);
criterion_main!(benches);
