use std::collections::HashSet;

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use vantage_core::models::{CandidateResult, Document, LiveDataType, SourceStrategy};
use vantage_core::text::tokenize;
use vantage_retrieval::fusion::fuse;
use vantage_retrieval::index::{Bm25Params, LexicalIndex};
use vantage_retrieval::ranking::RankingPipeline;

const WORDS: &[&str] = &[
    "acme", "funding", "series", "round", "valuation", "robotics", "chip", "market", "seed",
    "investor", "ai", "trend",
];

fn strategy() -> impl Strategy<Value = SourceStrategy> {
    prop_oneof![
        Just(SourceStrategy::DenseVector),
        Just(SourceStrategy::SparseKeyword),
        Just(SourceStrategy::GraphDirect),
        Just(SourceStrategy::GraphRelated),
        Just(SourceStrategy::SemanticPattern),
        Just(SourceStrategy::Temporal),
        Just(SourceStrategy::RealTime(LiveDataType::News)),
    ]
}

fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..8).prop_map(|w| w.join(" "))
}

fn candidate() -> impl Strategy<Value = CandidateResult> {
    (
        prop::option::of(prop::sample::select(&["a", "b", "c", "d", ""][..])),
        text(),
        text(),
        0.0f64..1.0,
        strategy(),
        prop::option::of(0i64..72),
    )
        .prop_map(|(id, title, content, score, strategy, age_hours)| {
            let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
            CandidateResult::new(id.map(str::to_string), title, content, score, strategy)
                .with_timestamp(age_hours.map(|h| now - Duration::hours(h)))
        })
}

fn candidates() -> impl Strategy<Value = Vec<CandidateResult>> {
    prop::collection::vec(candidate(), 0..20)
}

proptest! {
    #[test]
    fn fusion_keys_are_unique(input in candidates()) {
        let fused = fuse(input);
        let mut keys = HashSet::new();
        for c in &fused.candidates {
            prop_assert!(keys.insert(c.identity_key()));
            prop_assert!(!c.content.trim().is_empty());
        }
        prop_assert_eq!(
            fused.total,
            fused.candidates.len() + fused.dropped_malformed + fused.duplicates
        );
    }

    #[test]
    fn fusion_is_idempotent(input in candidates()) {
        let once = fuse(input);
        let twice = fuse(once.candidates.clone());
        prop_assert_eq!(once.candidates, twice.candidates);
        prop_assert_eq!(twice.duplicates, 0);
    }

    #[test]
    fn ranking_respects_top_k_and_order(
        input in candidates(),
        query in text(),
        top_k in 0usize..10,
    ) {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let fused = fuse(input).candidates;
        let outcome = RankingPipeline::default().rank(&query, fused, top_k, None, now);

        prop_assert!(outcome.results.len() <= top_k);
        for r in &outcome.results {
            prop_assert!((0.0..=1.0).contains(&r.score));
            prop_assert_eq!(r.candidate.score, r.score);
        }
        for pair in outcome.results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn threshold_never_admits_weaker_results(input in candidates(), query in text(), threshold in 0.0f64..1.0) {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let fused = fuse(input).candidates;
        let outcome = RankingPipeline::default().rank(&query, fused, 20, Some(threshold), now);
        prop_assert!(outcome.results.iter().all(|r| r.score >= threshold));
    }

    #[test]
    fn bm25_prefers_documents_with_every_keyword(
        keywords in prop::collection::hash_set(prop::sample::select(WORDS), 1..4),
        filler in 0usize..20,
    ) {
        let keywords: Vec<&str> = keywords.into_iter().collect();
        let padding = vec!["lorem"; filler].join(" ");
        let index = LexicalIndex::build(vec![
            Document::new("full", "", format!("{} {}", keywords.join(" "), padding)),
            Document::new("none", "", format!("unrelated {padding}")),
        ]);
        let terms = tokenize(&keywords.join(" "));
        let hits = index.search(&terms, &Bm25Params::default(), None, 10);

        let score_of = |id: &str| {
            hits.iter()
                .find(|h| h.document.id.as_deref() == Some(id))
                .map_or(0.0, |h| h.score)
        };
        prop_assert!(score_of("full") > score_of("none"));
        prop_assert!(hits.iter().all(|h| h.score > 0.0 && h.score < 1.0));
    }
}
