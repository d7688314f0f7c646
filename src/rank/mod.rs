pub mod stop_words;
pub mod tfidf;

use tracing::warn;

use crate::error::VectorizeError;
pub use tfidf::{TextVectorizer, TfidfVectorizer};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Anything with text to score against the intent query.
pub trait Scorable {
    fn text(&self) -> &str;
}

/// A unit paired with its similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<T> {
    pub item: T,
    pub score: f64,
}

/// Rank with the default TF-IDF space.
pub fn rank<T: Scorable>(query: &str, items: Vec<T>) -> Vec<Ranked<T>> {
    rank_with(&TfidfVectorizer::default(), query, items)
}

/// Score every item against `query` in one vector space fitted over all item
/// texts plus the query, then sort by descending score. The sort is stable,
/// so equal scores keep corpus order. If the space cannot be built every item
/// scores 0.0 and the input order is returned unchanged.
pub fn rank_with<V, T>(vectorizer: &V, query: &str, items: Vec<T>) -> Vec<Ranked<T>>
where
    V: TextVectorizer + Sync,
    T: Scorable,
{
    if items.is_empty() {
        return Vec::new();
    }

    let scores = match score_all(vectorizer, query, &items) {
        Ok(scores) => scores,
        Err(e) => {
            warn!("Scoring {} items fell back to zero: {}", items.len(), e);
            vec![0.0; items.len()]
        }
    };

    let mut ranked: Vec<Ranked<T>> = items
        .into_iter()
        .zip(scores)
        .map(|(item, score)| Ranked { item, score })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

fn score_all<V, T>(vectorizer: &V, query: &str, items: &[T]) -> Result<Vec<f64>, VectorizeError>
where
    V: TextVectorizer + Sync,
    T: Scorable,
{
    let texts: Vec<&str> = items
        .iter()
        .map(|item| item.text())
        .chain(std::iter::once(query))
        .collect();

    let vectors = vectorizer.fit_transform(&texts)?;
    let Some((query_vec, item_vecs)) = vectors.split_last() else {
        return Err(VectorizeError::EmptyVocabulary);
    };

    #[cfg(feature = "rayon")]
    let scores = item_vecs
        .par_iter()
        .map(|v| vectorizer.similarity(v, query_vec))
        .collect();

    #[cfg(not(feature = "rayon"))]
    let scores = item_vecs
        .iter()
        .map(|v| vectorizer.similarity(v, query_vec))
        .collect();

    Ok(scores)
}
