//! Hashed term-frequency provider.
//!
//! Deterministic fixed-dimension vectors with no network or model
//! dependency. Used offline, in tests, and as a last-resort fallback.

use std::collections::HashMap;

use async_trait::async_trait;
use vantage_core::errors::VantageResult;
use vantage_core::text::tokenize;
use vantage_core::traits::IEmbeddingProvider;

pub struct TfIdfFallback {
    dimensions: usize,
}

impl TfIdfFallback {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// FNV-1a bucket for a term.
    fn hash_term(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let tokens = tokenize(text);
        let mut vec = vec![0.0f32; self.dimensions];
        if tokens.is_empty() {
            return vec;
        }

        let mut tf: HashMap<&str, f32> = HashMap::new();
        for tok in &tokens {
            *tf.entry(tok.as_str()).or_default() += 1.0;
        }

        let total = tokens.len() as f32;
        for (term, count) in &tf {
            let freq = count / total;
            // Longer terms are rarer; short ones behave like stopwords.
            let idf = 1.0 + (term.chars().count() as f32).ln();
            vec[Self::hash_term(term, self.dimensions)] += freq * idf;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

#[async_trait]
impl IEmbeddingProvider for TfIdfFallback {
    async fn embed(&self, text: &str) -> VantageResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> VantageResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "tfidf-fallback"
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[tokio::test]
    async fn empty_text_returns_zero_vector() {
        let p = TfIdfFallback::new(128);
        let v = p.embed("").await.unwrap();
        assert_eq!(v.len(), 128);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[tokio::test]
    async fn output_is_normalized() {
        let p = TfIdfFallback::new(256);
        let v = p.embed("venture capital funding round").await.unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
    }

    #[tokio::test]
    async fn deterministic_and_batch_consistent() {
        let p = TfIdfFallback::new(128);
        let texts = vec!["acme ai series b".to_string(), "投资 趋势".to_string()];
        let batch = p.embed_batch(&texts).await.unwrap();
        for (i, text) in texts.iter().enumerate() {
            assert_eq!(batch[i], p.embed(text).await.unwrap());
        }
    }

    #[tokio::test]
    async fn similar_texts_have_higher_cosine() {
        let p = TfIdfFallback::new(256);
        let a = p.embed("startup funding valuation").await.unwrap();
        let b = p.embed("startup funding round").await.unwrap();
        let c = p.embed("cooking recipes pasta").await.unwrap();
        assert!(cosine(&a, &b) > cosine(&a, &c));
    }
}
