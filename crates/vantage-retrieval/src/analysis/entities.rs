//! Coarse entity extraction.
//!
//! Runs of capitalized words become one entity ("Acme AI", "Series B").
//! Question and function words never start a run. Domain words are entities
//! on their own when they are not already inside a run.

use std::collections::HashSet;

use super::markers::{DOMAIN_ENTITY_TERMS_ZH, DOMAIN_ENTITY_WORDS, NON_ENTITY_WORDS};

/// Whitespace-separated words with their byte offsets.
fn words_with_offsets(text: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                words.push((s, &text[s..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push((s, &text[s..]));
    }
    words
}

fn strip_word(word: &str) -> &str {
    let trimmed = word.trim_matches(|c: char| !c.is_alphanumeric());
    trimmed
        .strip_suffix("'s")
        .or_else(|| trimmed.strip_suffix("’s"))
        .unwrap_or(trimmed)
}

fn ends_clause(word: &str) -> bool {
    word.ends_with(|c: char| matches!(c, ',' | '.' | '?' | '!' | ';' | ':' | '，' | '。' | '？' | '！'))
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// Entities in order of first appearance, without case-insensitive duplicates.
pub fn extract(query: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = Vec::new();
    let mut run: Vec<&str> = Vec::new();
    let mut run_start = 0;

    let flush = |run: &mut Vec<&str>, start: usize, found: &mut Vec<(usize, String)>| {
        if !run.is_empty() {
            found.push((start, run.join(" ")));
            run.clear();
        }
    };

    for (offset, raw) in words_with_offsets(query) {
        let word = strip_word(raw);
        if word.is_empty() {
            flush(&mut run, run_start, &mut found);
            continue;
        }
        let lower = word.to_lowercase();
        let is_function_word = NON_ENTITY_WORDS.contains(&lower.as_str());

        if is_capitalized(word) && !is_function_word {
            if run.is_empty() {
                run_start = offset;
            }
            run.push(word);
        } else {
            flush(&mut run, run_start, &mut found);
            if DOMAIN_ENTITY_WORDS.contains(&lower.as_str()) {
                found.push((offset, lower));
            }
        }

        if ends_clause(raw) {
            flush(&mut run, run_start, &mut found);
        }
    }
    flush(&mut run, run_start, &mut found);

    for term in DOMAIN_ENTITY_TERMS_ZH {
        if let Some(pos) = query.find(term) {
            found.push((pos, term.to_string()));
        }
    }

    found.sort_by_key(|(pos, _)| *pos);
    let mut seen = HashSet::new();
    found
        .into_iter()
        .filter(|(_, entity)| seen.insert(entity.to_lowercase()))
        .map(|(_, entity)| entity)
        .collect()
}
