//! Query markers that call for live data, and the data types they imply.

use std::collections::BTreeSet;

use vantage_core::models::LiveDataType;
use vantage_core::text::{has_marker, tokenize};

pub const TIME_MARKERS: &[&str] = &[
    "today", "latest", "recent", "now", "current", "this week", "this month", "this year",
    "今天", "最新", "最近", "现在", "当前", "本周", "本月", "今年",
];

pub const NEWS_MARKERS: &[&str] = &[
    "news", "update", "announce", "headline", "report", "新闻", "消息", "动态", "公告", "报道",
];

pub const MARKET_MARKERS: &[&str] = &[
    "valuation", "funding", "round", "raise", "stock price", "market cap", "ipo", "share price",
    "估值", "融资", "股价", "市值", "上市",
];

pub const COMPANY_MARKERS: &[&str] = &[
    "company", "startup", "founder", "ceo", "headcount", "公司", "创始人", "企业", "团队",
];

fn matches_any(lower: &str, tokens: &[String], markers: &[&str]) -> bool {
    markers.iter().any(|m| has_marker(lower, tokens, m))
}

/// Whether `query` carries a time, news or market marker.
pub fn wants_fresh_data(query: &str) -> bool {
    let lower = query.to_lowercase();
    let tokens = tokenize(query);
    matches_any(&lower, &tokens, TIME_MARKERS)
        || matches_any(&lower, &tokens, NEWS_MARKERS)
        || matches_any(&lower, &tokens, MARKET_MARKERS)
}

/// Live data types a query needs. Defaults to news.
pub fn data_types(query: &str) -> BTreeSet<LiveDataType> {
    let lower = query.to_lowercase();
    let tokens = tokenize(query);
    let mut types = BTreeSet::new();
    if matches_any(&lower, &tokens, MARKET_MARKERS) {
        types.insert(LiveDataType::Market);
    }
    if matches_any(&lower, &tokens, NEWS_MARKERS) {
        types.insert(LiveDataType::News);
    }
    if matches_any(&lower, &tokens, COMPANY_MARKERS) {
        types.insert(LiveDataType::Company);
    }
    if types.is_empty() {
        types.insert(LiveDataType::News);
    }
    types
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_query_wants_market_data() {
        assert!(wants_fresh_data("What is Acme's valuation after the round?"));
        let types = data_types("What is Acme's valuation after the round?");
        assert_eq!(types.into_iter().collect::<Vec<_>>(), vec![LiveDataType::Market]);
    }

    #[test]
    fn chinese_markers_match() {
        assert!(wants_fresh_data("最新的AI融资消息"));
        let types = data_types("最新的AI融资消息");
        assert!(types.contains(&LiveDataType::Market));
        assert!(types.contains(&LiveDataType::News));
    }

    #[test]
    fn plain_question_defaults_to_news() {
        assert!(!wants_fresh_data("Explain transformers"));
        assert_eq!(
            data_types("Explain transformers").into_iter().collect::<Vec<_>>(),
            vec![LiveDataType::News]
        );
    }

    #[test]
    fn company_marker_adds_company_type() {
        let types = data_types("Who is the founder of the startup?");
        assert!(types.contains(&LiveDataType::Company));
    }
}
