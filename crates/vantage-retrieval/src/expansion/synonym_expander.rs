//! Synonym and related-concept expansion for dense search.
//!
//! E.g. "AI investment" → "AI investment artificial intelligence machine learning funding".

use vantage_core::text::tokenize;

/// Term → synonyms. Keys are matched as whole tokens (ASCII) or substrings (CJK).
const SYNONYMS: &[(&str, &[&str])] = &[
    ("invest", &["funding", "capital", "financing"]),
    ("investment", &["funding", "capital", "financing"]),
    ("ai", &["artificial intelligence", "machine learning"]),
    ("trend", &["development", "outlook"]),
    ("company", &["startup", "enterprise"]),
    ("startup", &["company", "venture"]),
    ("投资", &["融资", "资本"]),
    ("人工智能", &["ai", "机器学习"]),
    ("趋势", &["发展", "前景"]),
    ("公司", &["企业", "初创"]),
];

/// Term → related concepts, appended after synonyms.
const RELATED: &[(&str, &[&str])] = &[
    ("valuation", &["round", "vc"]),
    ("funding", &["valuation", "round"]),
    ("deep learning", &["neural network"]),
    ("incubator", &["accelerator"]),
    ("accelerator", &["incubator"]),
    ("融资", &["估值", "轮次"]),
    ("深度学习", &["神经网络"]),
];

/// The original query plus what was appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedQuery {
    pub original: String,
    pub additions: Vec<String>,
    /// `original` followed by the additions, space-separated.
    pub text: String,
}

impl ExpandedQuery {
    pub fn unchanged(query: &str) -> Self {
        Self {
            original: query.to_string(),
            additions: Vec::new(),
            text: query.to_string(),
        }
    }

    pub fn is_expanded(&self) -> bool {
        !self.additions.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SynonymExpander {
    max_additions: usize,
}

impl SynonymExpander {
    pub fn new(max_additions: usize) -> Self {
        Self { max_additions }
    }

    pub fn expand(&self, query: &str) -> ExpandedQuery {
        let lower = query.to_lowercase();
        let tokens = tokenize(query);
        let matches = |key: &str| {
            if key.is_ascii() && !key.contains(' ') {
                tokens.iter().any(|t| t == key)
            } else {
                lower.contains(key)
            }
        };

        // Expand in order of appearance; synonyms before related concepts on ties.
        let mut hits: Vec<(usize, &[&str])> = SYNONYMS
            .iter()
            .chain(RELATED)
            .filter(|(key, _)| matches(key))
            .map(|(key, terms)| (lower.find(key).unwrap_or(usize::MAX), *terms))
            .collect();
        hits.sort_by_key(|(pos, _)| *pos);

        let mut additions: Vec<String> = Vec::new();
        for (_, terms) in hits {
            if additions.len() >= self.max_additions {
                break;
            }
            for term in terms {
                if additions.len() >= self.max_additions {
                    break;
                }
                let already = lower.contains(term) || additions.iter().any(|a| a == term);
                if !already {
                    additions.push(term.to_string());
                }
            }
        }

        if additions.is_empty() {
            return ExpandedQuery::unchanged(query);
        }
        let text = format!("{} {}", query, additions.join(" "));
        ExpandedQuery {
            original: query.to_string(),
            additions,
            text,
        }
    }
}

impl Default for SynonymExpander {
    fn default() -> Self {
        Self::new(vantage_core::config::defaults::DEFAULT_MAX_EXPANSIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_ai_investment() {
        let e = SynonymExpander::new(3).expand("AI investment");
        assert_eq!(
            e.additions,
            vec!["artificial intelligence", "machine learning", "funding"]
        );
        assert_eq!(
            e.text,
            "AI investment artificial intelligence machine learning funding"
        );
    }

    #[test]
    fn never_exceeds_the_cap() {
        let e = SynonymExpander::new(2).expand("company trend invest");
        assert_eq!(e.additions.len(), 2);
    }

    #[test]
    fn skips_terms_already_present() {
        let e = SynonymExpander::new(3).expand("startup funding and capital");
        assert!(!e.additions.iter().any(|a| a == "funding" || a == "capital"));
        assert!(e.additions.contains(&"company".to_string()));
    }

    #[test]
    fn chinese_terms_expand() {
        let e = SynonymExpander::new(3).expand("人工智能投资");
        assert_eq!(e.additions, vec!["ai", "机器学习", "融资"]);
    }

    #[test]
    fn related_concepts_follow_synonyms() {
        let e = SynonymExpander::new(3).expand("deep learning incubator");
        assert_eq!(e.additions, vec!["neural network", "accelerator"]);
    }

    #[test]
    fn unmatched_query_is_unchanged() {
        let e = SynonymExpander::new(3).expand("hello world");
        assert!(!e.is_expanded());
        assert_eq!(e.text, "hello world");
    }

    #[test]
    fn zero_cap_disables_expansion() {
        assert!(!SynonymExpander::new(0).expand("AI investment").is_expanded());
    }
}
