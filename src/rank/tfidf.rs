use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;

use super::stop_words;
use crate::error::VectorizeError;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Fits a shared vector space over a batch of texts and compares vectors in it.
pub trait TextVectorizer {
    type Vector: Send + Sync;

    /// One vector per input text, in input order, all in the same space.
    fn fit_transform(&self, texts: &[&str]) -> Result<Vec<Self::Vector>, VectorizeError>;

    /// Cosine similarity of two vectors from the same `fit_transform` call;
    /// 0.0 when either vector is zero.
    fn similarity(&self, a: &Self::Vector, b: &Self::Vector) -> f64;
}

/// Sparse vector: (term index, weight) sorted by term index.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector(Vec<(usize, f64)>);

impl SparseVector {
    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    fn norm(&self) -> f64 {
        self.0.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j, mut sum) = (0, 0, 0.0);
        while i < self.0.len() && j < other.0.len() {
            let (a_idx, a_w) = self.0[i];
            let (b_idx, b_w) = other.0[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// TF-IDF over lowercased word unigrams and bigrams, English stop words removed.
///
/// Weighting follows scikit-learn defaults: raw term counts,
/// `idf = ln((1 + n) / (1 + df)) + 1`, then L2 normalisation per text.
/// Every non-zero vector is unit length, so similarity is a plain dot product.
#[derive(Debug, Clone, Copy)]
pub struct TfidfVectorizer {
    pub max_ngram: usize,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        TfidfVectorizer { max_ngram: 2 }
    }
}

impl TfidfVectorizer {
    /// Terms of one text. Stop words are dropped before n-grams are formed,
    /// so a bigram can join words that had a stop word between them.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = TOKEN_RE
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !stop_words::ENGLISH.contains(t))
            .collect();

        let mut terms = Vec::new();
        for n in 1..=self.max_ngram.max(1) {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    #[cfg(feature = "rayon")]
    fn count_all(&self, texts: &[&str]) -> Vec<HashMap<String, usize>> {
        texts.par_iter().map(|t| self.count_terms(t)).collect()
    }

    #[cfg(not(feature = "rayon"))]
    fn count_all(&self, texts: &[&str]) -> Vec<HashMap<String, usize>> {
        texts.iter().map(|t| self.count_terms(t)).collect()
    }

    fn count_terms(&self, text: &str) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for term in self.analyze(text) {
            *counts.entry(term).or_insert(0) += 1;
        }
        counts
    }
}

impl TextVectorizer for TfidfVectorizer {
    type Vector = SparseVector;

    fn fit_transform(&self, texts: &[&str]) -> Result<Vec<SparseVector>, VectorizeError> {
        let counts = self.count_all(texts);

        // document frequency per term; BTreeMap gives a sorted vocabulary
        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in &counts {
            for term in doc.keys() {
                *df.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        if df.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        let n = texts.len() as f64;
        let vocab: HashMap<&str, (usize, f64)> = df
            .iter()
            .enumerate()
            .map(|(idx, (term, &freq))| {
                let idf = ((1.0 + n) / (1.0 + freq as f64)).ln() + 1.0;
                (*term, (idx, idf))
            })
            .collect();

        let vectors = counts
            .iter()
            .map(|doc| {
                let mut weights: Vec<(usize, f64)> = doc
                    .iter()
                    .filter_map(|(term, &tf)| {
                        vocab
                            .get(term.as_str())
                            .map(|&(idx, idf)| (idx, tf as f64 * idf))
                    })
                    .collect();
                weights.sort_by_key(|&(idx, _)| idx);

                let mut v = SparseVector(weights);
                let norm = v.norm();
                if norm > 0.0 {
                    for (_, w) in &mut v.0 {
                        *w /= norm;
                    }
                }
                v
            })
            .collect();

        Ok(vectors)
    }

    fn similarity(&self, a: &SparseVector, b: &SparseVector) -> f64 {
        if a.is_zero() || b.is_zero() {
            return 0.0;
        }
        // both sides are unit length out of fit_transform
        a.dot(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_drops_stop_words_and_short_tokens() {
        let v = TfidfVectorizer::default();
        let terms = v.analyze("The Findings: X improves Y");
        assert_eq!(terms, vec!["findings", "improves", "findings improves"]);
    }

    #[test]
    fn unigrams_only_when_max_ngram_is_one() {
        let v = TfidfVectorizer { max_ngram: 1 };
        assert_eq!(v.analyze("rust parser rust"), vec!["rust", "parser", "rust"]);
    }

    #[test]
    fn empty_vocabulary_is_an_error() {
        let v = TfidfVectorizer::default();
        let err = v.fit_transform(&["the and of", "a", ""]).unwrap_err();
        assert_eq!(err, VectorizeError::EmptyVocabulary);
    }

    #[test]
    fn vectors_are_unit_length() {
        let v = TfidfVectorizer::default();
        let vecs = v.fit_transform(&["budget travel plans", "travel", "the"]).unwrap();
        assert!((vecs[0].norm() - 1.0).abs() < 1e-9);
        assert!((vecs[1].norm() - 1.0).abs() < 1e-9);
        assert!(vecs[2].is_zero());
    }

    #[test]
    fn rarer_terms_weigh_more() {
        let v = TfidfVectorizer { max_ngram: 1 };
        // "common" appears in every text, "rare" in one
        let vecs = v
            .fit_transform(&["common rare", "common", "common extra"])
            .unwrap();
        // vocabulary is sorted: common=0, extra=1, rare=2
        let weights: HashMap<usize, f64> = vecs[0].0.iter().copied().collect();
        assert!(weights[&2] > weights[&0]);
    }

    #[test]
    fn repeated_terms_weigh_more() {
        let v = TfidfVectorizer { max_ngram: 1 };
        let vecs = v.fit_transform(&["alpha alpha beta", "gamma"]).unwrap();
        // alpha=0, beta=1 share the same idf
        let weights: HashMap<usize, f64> = vecs[0].0.iter().copied().collect();
        assert!(weights[&0] > weights[&1]);
    }

    #[test]
    fn similarity_of_identical_texts_is_one() {
        let v = TfidfVectorizer::default();
        let vecs = v
            .fit_transform(&["hiking trails in the alps", "museum tickets", "hiking trails in the alps"])
            .unwrap();
        assert!((v.similarity(&vecs[0], &vecs[2]) - 1.0).abs() < 1e-9);
        assert_eq!(v.similarity(&vecs[0], &vecs[1]), 0.0);
    }

    #[test]
    fn similarity_matches_full_cosine() {
        let v = TfidfVectorizer::default();
        let vecs = v
            .fit_transform(&["budget hotels near the beach", "cheap hotels and beach bars", "ski"])
            .unwrap();
        let (a, b) = (&vecs[0], &vecs[1]);
        let cosine = a.dot(b) / (a.norm() * b.norm());
        let sim = v.similarity(a, b);
        assert!(sim > 0.0 && sim < 1.0);
        assert!((sim - cosine).abs() < 1e-12);
        assert!((v.similarity(b, a) - sim).abs() < 1e-12);
    }
}
