//! Text normalization shared by the analyzer, lexical index, and re-ranker.

use std::collections::HashSet;

/// Lowercase, strip punctuation, split on whitespace, drop single-char tokens.
///
/// CJK characters count as word characters, so mixed-language text keeps its
/// Chinese runs intact.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|t| t.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

/// Distinct [`tokenize`] tokens of `text`.
pub fn word_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

/// Jaccard similarity of two sets; 0.0 when both are empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Whether `marker` occurs in the query.
///
/// Single ASCII words match as a token prefix ("invest" matches "investors"),
/// anything else (phrases, CJK) matches as a substring of the lowercased text.
pub fn has_marker(lower_text: &str, tokens: &[String], marker: &str) -> bool {
    let is_ascii_word = marker.chars().all(|c| c.is_ascii_alphanumeric());
    if is_ascii_word {
        tokens.iter().any(|t| t.starts_with(marker))
    } else {
        lower_text.contains(marker)
    }
}

/// Clamp a score into [0, 1]. NaN maps to 0.
pub fn clamp_unit(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_strips_punctuation_and_short_tokens() {
        let tokens = tokenize("What did Acme AI raise in its Series B?");
        assert_eq!(
            tokens,
            vec!["what", "did", "acme", "ai", "raise", "in", "its", "series"]
        );
    }

    #[test]
    fn tokenize_keeps_cjk_runs() {
        let tokens = tokenize("AI创投 最新融资，估值");
        assert_eq!(tokens, vec!["ai创投", "最新融资", "估值"]);
    }

    #[test]
    fn jaccard_of_identical_sets_is_one() {
        let a = word_set("alpha beta gamma");
        assert!((jaccard(&a, &a) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn jaccard_of_empty_sets_is_zero() {
        assert_eq!(jaccard(&HashSet::new(), &HashSet::new()), 0.0);
    }

    #[test]
    fn marker_prefix_and_substring() {
        let text = "who are the investors in 智能 chips";
        let tokens = tokenize(text);
        assert!(has_marker(text, &tokens, "invest"));
        assert!(has_marker(text, &tokens, "智能"));
        assert!(!has_marker(text, &tokens, "valuation"));
    }

    #[test]
    fn clamp_handles_nan_and_bounds() {
        assert_eq!(clamp_unit(f64::NAN), 0.0);
        assert_eq!(clamp_unit(1.7), 1.0);
        assert_eq!(clamp_unit(-0.2), 0.0);
    }
}
