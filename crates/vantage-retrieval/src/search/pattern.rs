//! Category search: vote the query into a bucket, score documents against
//! that bucket's vocabulary.

use serde_json::json;
use vantage_core::models::{CandidateResult, SourceStrategy};
use vantage_core::text::{has_marker, tokenize};

use crate::index::IndexedDocument;

use super::SearchContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternBucket {
    Investment,
    Startup,
    Trend,
    Technology,
}

impl PatternBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Investment => "investment",
            Self::Startup => "startup",
            Self::Trend => "trend",
            Self::Technology => "technology",
        }
    }
}

const BUCKETS: &[(PatternBucket, &[&str])] = &[
    (
        PatternBucket::Investment,
        &["investment", "funding", "round", "valuation", "investor", "capital", "投资", "融资", "估值"],
    ),
    (
        PatternBucket::Startup,
        &["startup", "founder", "founded", "incubator", "accelerator", "创业", "初创", "创始人"],
    ),
    (
        PatternBucket::Trend,
        &["trend", "market", "growth", "outlook", "forecast", "趋势", "市场", "增长"],
    ),
    (
        PatternBucket::Technology,
        &["model", "llm", "chip", "machine learning", "deep learning", "技术", "模型", "芯片"],
    ),
];

/// Bucket with the most vocabulary hits in the query; earlier buckets win
/// ties. `None` when nothing matches.
pub fn classify(query: &str) -> Option<PatternBucket> {
    let lower = query.to_lowercase();
    let tokens = tokenize(query);
    let mut best: Option<(PatternBucket, usize)> = None;
    for (bucket, vocabulary) in BUCKETS {
        let votes = vocabulary
            .iter()
            .filter(|term| has_marker(&lower, &tokens, term))
            .count();
        if votes > best.map_or(0, |(_, v)| v) {
            best = Some((*bucket, votes));
        }
    }
    best.map(|(bucket, _)| bucket)
}

fn vocabulary(bucket: PatternBucket) -> &'static [&'static str] {
    BUCKETS
        .iter()
        .find(|(b, _)| *b == bucket)
        .map(|(_, v)| *v)
        .unwrap_or(&[])
}

/// Score in [0, 1] of one document against a vocabulary.
pub fn score_document(doc: &IndexedDocument, vocabulary: &[&str]) -> f64 {
    if vocabulary.is_empty() {
        return 0.0;
    }
    let mut score = 0.0;
    let mut hits = 0usize;
    for term in vocabulary {
        let in_content = doc.content_lower.contains(term);
        let in_title = doc.title_lower.contains(term);
        let in_keywords = doc.keywords_lower.iter().any(|k| k.contains(term));
        if in_content {
            score += 0.3;
        }
        if in_title {
            score += 0.5;
        }
        if in_keywords {
            score += 0.4;
        }
        if in_content || in_title || in_keywords {
            hits += 1;
        }
    }
    score += 0.2 * hits as f64 / vocabulary.len() as f64;
    f64::min(score, 1.0)
}

pub fn search(ctx: &SearchContext<'_>) -> Vec<CandidateResult> {
    let Some(bucket) = classify(ctx.query) else {
        return Vec::new();
    };
    let vocabulary = vocabulary(bucket);

    let mut scored: Vec<(&IndexedDocument, f64)> = ctx
        .corpus
        .entries()
        .iter()
        .filter(|doc| doc.matches(ctx.filter))
        .map(|doc| (doc, score_document(doc, vocabulary)))
        .filter(|(_, score)| *score > ctx.config.pattern_threshold)
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(ctx.config.pattern_top_k);

    scored
        .into_iter()
        .map(|(entry, score)| {
            let doc = &entry.document;
            let mut metadata = doc.candidate_metadata();
            metadata.insert("pattern".to_string(), json!(bucket.as_str()));
            CandidateResult::new(
                doc.id.clone(),
                doc.title.clone(),
                doc.content.clone(),
                score,
                SourceStrategy::SemanticPattern,
            )
            .with_metadata(metadata)
            .with_timestamp(doc.timestamp)
            .with_reasoning(format!("{} pattern match", bucket.as_str()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::LexicalIndex;
    use vantage_core::models::Document;

    #[test]
    fn classification_by_votes() {
        assert_eq!(classify("funding round valuation"), Some(PatternBucket::Investment));
        assert_eq!(classify("market growth of chips"), Some(PatternBucket::Trend));
        assert_eq!(classify("LLM chip makers"), Some(PatternBucket::Technology));
        assert_eq!(classify("大模型芯片技术"), Some(PatternBucket::Technology));
        assert_eq!(classify("hello world"), None);
    }

    #[test]
    fn ties_go_to_the_earlier_bucket() {
        // One investment hit, one startup hit.
        assert_eq!(classify("founder funding"), Some(PatternBucket::Investment));
    }

    #[test]
    fn document_scoring() {
        let index = LexicalIndex::build(vec![
            Document::new("t", "Funding news", "nothing else"),
            Document::new("c", "", "a funding round").with_keywords(&["valuation"]),
            Document::new("n", "", "unrelated"),
        ]);
        let vocab = vocabulary(PatternBucket::Investment);
        let entries = index.entries();

        // title hit 0.5 + bonus 0.2 × 1/9
        assert!((score_document(&entries[0], vocab) - (0.5 + 0.2 / 9.0)).abs() < 1e-9);
        // content hits 0.3 × 2 + keyword 0.4 → capped
        assert_eq!(score_document(&entries[1], vocab), 1.0);
        assert_eq!(score_document(&entries[2], vocab), 0.0);
    }
}
