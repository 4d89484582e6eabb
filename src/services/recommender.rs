use crate::artifacts::{Catalog, SimilarityMatrix};
use crate::models::Recommendation;

/// Number of recommendations returned per query
pub const RESULT_COUNT: usize = 5;

/// Top-K similarity retrieval over the loaded artifacts.
///
/// Pure: borrows the immutable catalog and matrix, holds no state of its own.
pub struct Recommender<'a> {
    catalog: &'a Catalog,
    matrix: &'a SimilarityMatrix,
}

impl<'a> Recommender<'a> {
    pub fn new(catalog: &'a Catalog, matrix: &'a SimilarityMatrix) -> Self {
        Self { catalog, matrix }
    }

    /// The up-to-`RESULT_COUNT` catalog entries most similar to `title`.
    ///
    /// Results are ordered by descending score; equal scores keep ascending
    /// row order (the sort is stable over the row enumeration) and NaN scores
    /// rank below every real score. The query row is excluded explicitly
    /// rather than by trusting the diagonal to hold the maximal score. An
    /// unknown title yields an empty vec, not an error.
    pub fn recommend(&self, title: &str) -> Vec<Recommendation> {
        let Some(query_index) = self.catalog.index_of_title(title) else {
            return Vec::new();
        };
        let Some(scores) = self.matrix.row(query_index) else {
            return Vec::new();
        };

        let mut ranked: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
        // Descending by score, but NaN always sinks to the bottom (a plain
        // descending total_cmp would rank positive NaN above every real
        // score).
        ranked.sort_by(|a, b| match (a.1.is_nan(), b.1.is_nan()) {
            (false, false) => b.1.total_cmp(&a.1),
            (true, false) => std::cmp::Ordering::Greater,
            (false, true) => std::cmp::Ordering::Less,
            (true, true) => std::cmp::Ordering::Equal,
        });

        ranked
            .into_iter()
            .filter(|&(index, _)| index != query_index)
            .take(RESULT_COUNT)
            .filter_map(|(index, score)| {
                self.catalog.entry(index).map(|entry| Recommendation {
                    movie_id: entry.movie_id,
                    title: entry.title.clone(),
                    score,
                })
            })
            .collect()
    }
}
