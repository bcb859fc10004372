//! Intent classification by marker matching.

use vantage_core::intent::Intent;
use vantage_core::text::has_marker;

use super::markers::INTENT_MARKERS;

/// First intent in declared order with a matching marker; `General` otherwise.
pub fn classify(lower: &str, tokens: &[String]) -> Intent {
    INTENT_MARKERS
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| has_marker(lower, tokens, m)))
        .map(|(intent, _)| *intent)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_core::text::tokenize;

    fn classify_str(query: &str) -> Intent {
        classify(&query.to_lowercase(), &tokenize(query))
    }

    #[test]
    fn english_intents() {
        assert_eq!(classify_str("What is a SAFE note?"), Intent::Factual);
        assert_eq!(classify_str("OpenAI vs Anthropic"), Intent::Comparison);
        assert_eq!(classify_str("AI chip outlook"), Intent::Trend);
        assert_eq!(classify_str("Who backed by Sequoia"), Intent::Relationship);
        assert_eq!(classify_str("Acme raised a seed round"), Intent::Investment);
        assert_eq!(classify_str("hello there"), Intent::General);
    }

    #[test]
    fn chinese_intents() {
        assert_eq!(classify_str("什么是大模型"), Intent::Factual);
        assert_eq!(classify_str("两家公司的区别"), Intent::Comparison);
        assert_eq!(classify_str("人工智能的发展趋势"), Intent::Trend);
        assert_eq!(classify_str("红杉投资了哪些公司"), Intent::Relationship);
        assert_eq!(classify_str("这家公司完成了B轮融资"), Intent::Investment);
    }

    #[test]
    fn declared_order_breaks_ties() {
        // Both factual and investment markers present.
        assert_eq!(classify_str("What is the valuation of Acme?"), Intent::Factual);
    }
}
