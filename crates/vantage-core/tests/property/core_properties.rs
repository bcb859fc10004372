use std::collections::BTreeMap;

use proptest::prelude::*;
use vantage_core::config::RankingWeights;
use vantage_core::models::{
    identity_key, CandidateResult, MetadataFilter, SourceStrategy, IDENTITY_PREFIX_CHARS,
};
use vantage_core::text::{clamp_unit, jaccard, tokenize, word_set};

proptest! {
    #[test]
    fn clamp_unit_always_lands_in_range(x in any::<f64>()) {
        let c = clamp_unit(x);
        prop_assert!((0.0..=1.0).contains(&c));
        if (0.0..=1.0).contains(&x) {
            prop_assert_eq!(c, x);
        }
    }

    #[test]
    fn candidate_scores_are_clamped(score in any::<f64>()) {
        let c = CandidateResult::new(None, "t", "content", score, SourceStrategy::DenseVector);
        prop_assert!((0.0..=1.0).contains(&c.score));
        prop_assert!((0.0..=1.0).contains(&c.with_score(score * 2.0).score));
    }

    #[test]
    fn tokens_are_words_of_two_or_more_chars(s in "\\PC{0,120}") {
        for token in tokenize(&s) {
            prop_assert!(token.chars().count() > 1);
            prop_assert!(token.chars().all(|c| c.is_alphanumeric() || c == '_'));
        }
    }

    #[test]
    fn trailing_punctuation_does_not_change_words(words in prop::collection::vec("[a-z]{2,8}", 1..6)) {
        let plain = words.join(" ");
        let punctuated = words.iter().map(|w| format!("{w}?,")).collect::<Vec<_>>().join(" ");
        prop_assert_eq!(word_set(&plain), word_set(&punctuated));
    }

    #[test]
    fn jaccard_is_symmetric_and_bounded(a in "[a-e ]{0,40}", b in "[a-e ]{0,40}") {
        let (sa, sb) = (word_set(&a), word_set(&b));
        let j = jaccard(&sa, &sb);
        prop_assert!((0.0..=1.0).contains(&j));
        prop_assert_eq!(j, jaccard(&sb, &sa));
    }

    #[test]
    fn content_identity_uses_a_bounded_prefix(content in "\\PC{0,300}", tail in "\\PC{0,50}") {
        let key = identity_key(None, &content);
        let prefix: String = content.chars().take(IDENTITY_PREFIX_CHARS).collect();
        prop_assert_eq!(&key, &format!("content:{prefix}"));
        if content.chars().count() >= IDENTITY_PREFIX_CHARS {
            prop_assert_eq!(key, identity_key(Some(""), &format!("{content}{tail}")));
        }
    }

    #[test]
    fn empty_filter_matches_any_metadata(key in "[a-z]{1,8}", value in "[a-z0-9]{0,8}") {
        let metadata: BTreeMap<String, serde_json::Value> =
            [(key.clone(), serde_json::json!(value))].into_iter().collect();
        prop_assert!(MetadataFilter::new().matches(&metadata));
        prop_assert!(MetadataFilter::new().require(key, value).matches(&metadata));
    }
}

#[test]
fn default_ranking_weights_sum_to_one() {
    let total: f64 = RankingWeights::default().as_array().iter().map(|(_, w)| w).sum();
    assert!((total - 1.0).abs() < 1e-9);
}
