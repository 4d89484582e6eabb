use serde::{Deserialize, Serialize};

/// One row of the movie catalog.
///
/// The position of the entry in the catalog is its row index into the
/// similarity matrix; `movie_id` is the external TMDB identifier used only
/// for poster lookups. Titles are not guaranteed unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub movie_id: u64,
    pub title: String,
}

/// A single recommendation produced by the resolver, in similarity-rank order
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub movie_id: u64,
    pub title: String,
    pub score: f32,
}
