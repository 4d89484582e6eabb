/// TMDB poster lookup
///
/// Poster art is decoration, not data: every failure mode (no credential,
/// transport error, timeout, non-2xx, missing `poster_path`) degrades to the
/// placeholder URL instead of propagating. Callers always get a usable URL.
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Bound on each poster metadata request
pub const POSTER_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Poster metadata provider abstraction
///
/// Infallible by contract: implementations resolve a movie identifier to a
/// displayable image URL or to their placeholder, never to an error.
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Displayable poster URL for the given movie identifier
    async fn poster_url(&self, movie_id: u64) -> String;

    /// The fallback URL substituted when real poster art cannot be obtained
    fn placeholder(&self) -> &str;
}

/// Poster field of the TMDB movie details response
#[derive(Debug, Deserialize)]
struct MovieDetails {
    poster_path: Option<String>,
}

#[derive(Clone)]
pub struct TmdbPosterProvider {
    http_client: HttpClient,
    timeout: Duration,
    api_key: Option<String>,
    api_url: String,
    image_base: String,
    placeholder: String,
    /// Per-identifier memo; the artifacts never change, so entries never
    /// expire. Duplicate computation under concurrent misses is tolerated.
    memo: Arc<RwLock<HashMap<u64, String>>>,
}

impl TmdbPosterProvider {
    pub fn new(config: &Config) -> Self {
        Self::with_timeout(config, POSTER_FETCH_TIMEOUT)
    }

    pub fn with_timeout(config: &Config, timeout: Duration) -> Self {
        Self {
            http_client: HttpClient::new(),
            timeout,
            api_key: config.tmdb_api_key.clone(),
            api_url: config.tmdb_api_url.clone(),
            image_base: config.tmdb_image_base.clone(),
            placeholder: config.placeholder_poster_url.clone(),
            memo: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn fetch_poster_path(&self, movie_id: u64, api_key: &str) -> AppResult<Option<String>> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", api_key), ("language", "en-US")])
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {} for movie {}",
                response.status(),
                movie_id
            )));
        }

        let details: MovieDetails = response.json().await?;
        Ok(details.poster_path.filter(|path| !path.is_empty()))
    }
}

#[async_trait::async_trait]
impl PosterProvider for TmdbPosterProvider {
    async fn poster_url(&self, movie_id: u64) -> String {
        if let Some(url) = self.memo.read().await.get(&movie_id) {
            return url.clone();
        }

        // No credential is a valid, handled state: placeholder mode, no
        // network call.
        let Some(api_key) = self.api_key.clone() else {
            return self.placeholder.clone();
        };

        match self.fetch_poster_path(movie_id, &api_key).await {
            Ok(Some(path)) => {
                let url = format!("{}{}", self.image_base, path);
                self.memo.write().await.insert(movie_id, url.clone());
                url
            }
            Ok(None) => {
                tracing::debug!(movie_id, "TMDB response had no poster_path");
                self.placeholder.clone()
            }
            Err(e) => {
                tracing::warn!(error = %e, movie_id, "Poster fetch failed, using placeholder");
                self.placeholder.clone()
            }
        }
    }

    fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

/// Fetches posters for the ranked movie ids concurrently, preserving input
/// order in the returned URLs.
pub async fn fetch_posters(provider: Arc<dyn PosterProvider>, movie_ids: &[u64]) -> Vec<String> {
    let mut tasks = Vec::with_capacity(movie_ids.len());
    for &movie_id in movie_ids {
        let provider = Arc::clone(&provider);
        tasks.push(tokio::spawn(
            async move { provider.poster_url(movie_id).await },
        ));
    }

    let mut urls = Vec::with_capacity(tasks.len());
    for task in tasks {
        match task.await {
            Ok(url) => urls.push(url),
            Err(e) => {
                tracing::error!(error = %e, "Poster fetch task failed");
                urls.push(provider.placeholder().to_string());
            }
        }
    }

    urls
}
