use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::CatalogEntry;
use crate::services::{posters, Recommender};

use super::AppState;

// Request/Response types

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub movie_id: u64,
    pub title: String,
}

impl From<&CatalogEntry> for MovieResponse {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            movie_id: entry.movie_id,
            title: entry.title.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendedMovie {
    pub movie_id: u64,
    pub title: String,
    pub poster_url: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub query: String,
    pub recommendations: Vec<RecommendedMovie>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// All catalog titles, in row order; populates the client's selector
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<MovieResponse>> {
    let movies: Vec<MovieResponse> = state
        .artifacts
        .catalog()
        .entries()
        .iter()
        .map(MovieResponse::from)
        .collect();
    Json(movies)
}

/// Movies most similar to the queried title, with poster art
pub async fn get_recommendations(
    State(state): State<AppState>,
    Query(query): Query<RecommendationsQuery>,
) -> AppResult<Json<RecommendationsResponse>> {
    // Lookups are exact; trimming is only for rejecting blank input, so a
    // catalog title that happens to carry padding stays reachable.
    let title = query.title.as_str();
    if title.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Query parameter 'title' must not be empty".to_string(),
        ));
    }

    let catalog = state.artifacts.catalog();
    if catalog.index_of_title(title).is_none() {
        return Err(AppError::NotFound(format!(
            "No movie titled '{}' in the catalog",
            title
        )));
    }

    // Degraded state (matrix unreachable) surfaces here as 503, distinct
    // from the 404 above.
    let matrix = state.artifacts.matrix().await?;

    let picks = Recommender::new(catalog, matrix).recommend(title);

    let movie_ids: Vec<u64> = picks.iter().map(|pick| pick.movie_id).collect();
    let poster_urls = posters::fetch_posters(state.posters.clone(), &movie_ids).await;

    let recommendations: Vec<RecommendedMovie> = picks
        .into_iter()
        .zip(poster_urls)
        .map(|(pick, poster_url)| RecommendedMovie {
            movie_id: pick.movie_id,
            title: pick.title,
            poster_url,
        })
        .collect();

    tracing::info!(
        query = %title,
        results = recommendations.len(),
        "Recommendations served"
    );

    Ok(Json(RecommendationsResponse {
        query: title.to_string(),
        recommendations,
    }))
}
