//! BM25 over the static corpus.
//!
//! IDF is the non-negative form `ln(1 + (N − df + 0.5) / (df + 0.5))`, so a
//! term present in half the corpus still contributes. Raw scores below the
//! floor are discarded; survivors map into [0, 1] via `1 − e^(−raw)`.

use std::collections::HashMap;

use vantage_core::config::RetrievalConfig;
use vantage_core::models::{Document, MetadataFilter};
use vantage_core::text::tokenize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
    /// Raw scores below this are dropped.
    pub floor: f64,
}

impl Bm25Params {
    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self {
            k1: config.bm25_k1,
            b: config.bm25_b,
            floor: config.sparse_score_floor,
        }
    }
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self::from_config(&RetrievalConfig::default())
    }
}

/// A document with its precomputed lowercase fields and term counts.
#[derive(Debug, Clone)]
pub struct IndexedDocument {
    pub document: Document,
    pub title_lower: String,
    pub content_lower: String,
    pub keywords_lower: Vec<String>,
    term_freq: HashMap<String, usize>,
    len: usize,
}

impl IndexedDocument {
    fn new(document: Document) -> Self {
        let tokens = tokenize(&format!("{} {}", document.title, document.content));
        let mut term_freq = HashMap::new();
        for token in &tokens {
            *term_freq.entry(token.clone()).or_insert(0) += 1;
        }
        Self {
            title_lower: document.title.to_lowercase(),
            content_lower: document.content.to_lowercase(),
            keywords_lower: document.keywords.iter().map(|k| k.to_lowercase()).collect(),
            term_freq,
            len: tokens.len(),
            document,
        }
    }

    pub fn matches(&self, filter: Option<&MetadataFilter>) -> bool {
        filter.map_or(true, |f| f.is_empty() || f.matches(&self.document.candidate_metadata()))
    }
}

/// One BM25 hit.
#[derive(Debug, Clone)]
pub struct LexicalHit<'a> {
    pub document: &'a Document,
    pub raw: f64,
    /// `1 − e^(−raw)`, in [0, 1).
    pub score: f64,
}

#[derive(Debug, Clone, Default)]
pub struct LexicalIndex {
    docs: Vec<IndexedDocument>,
    doc_freq: HashMap<String, usize>,
    avg_len: f64,
}

impl LexicalIndex {
    pub fn build(documents: Vec<Document>) -> Self {
        let docs: Vec<IndexedDocument> = documents.into_iter().map(IndexedDocument::new).collect();

        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for doc in &docs {
            for term in doc.term_freq.keys() {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
        }
        let total_len: usize = docs.iter().map(|d| d.len).sum();
        let avg_len = if docs.is_empty() {
            0.0
        } else {
            total_len as f64 / docs.len() as f64
        };

        Self {
            docs,
            doc_freq,
            avg_len,
        }
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn entries(&self) -> &[IndexedDocument] {
        &self.docs
    }

    pub fn idf(&self, term: &str) -> f64 {
        let n = self.docs.len() as f64;
        let df = self.doc_freq.get(term).copied().unwrap_or(0) as f64;
        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    }

    fn raw_score(&self, doc: &IndexedDocument, terms: &[String], params: &Bm25Params) -> f64 {
        let len_norm = if self.avg_len > 0.0 {
            doc.len as f64 / self.avg_len
        } else {
            0.0
        };
        terms
            .iter()
            .filter_map(|term| {
                let tf = *doc.term_freq.get(term)? as f64;
                let denom = tf + params.k1 * (1.0 - params.b + params.b * len_norm);
                Some(self.idf(term) * tf * (params.k1 + 1.0) / denom)
            })
            .sum()
    }

    /// Score every document matching `filter` against `terms`.
    ///
    /// Repeated terms count once per repetition. Best first; ties keep
    /// corpus order.
    pub fn search(
        &self,
        terms: &[String],
        params: &Bm25Params,
        filter: Option<&MetadataFilter>,
        top_k: usize,
    ) -> Vec<LexicalHit<'_>> {
        if terms.is_empty() || top_k == 0 {
            return Vec::new();
        }

        let mut hits: Vec<LexicalHit<'_>> = self
            .docs
            .iter()
            .filter(|doc| doc.matches(filter))
            .filter_map(|doc| {
                let raw = self.raw_score(doc, terms, params);
                (raw >= params.floor).then(|| LexicalHit {
                    document: &doc.document,
                    raw,
                    score: 1.0 - (-raw).exp(),
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.raw
                .partial_cmp(&a.raw)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(top_k);
        hits
    }
}
