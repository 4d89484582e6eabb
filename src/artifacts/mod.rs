/// Static artifact loading
///
/// Two artifacts produced offline drive the whole service: the movie catalog
/// (bundled with the deployment, fail-fast when absent) and the similarity
/// matrix (large, fetched from remote object storage on first use and cached
/// on local disk for later process starts). Both are immutable once loaded.
use std::path::PathBuf;

use reqwest::Client as HttpClient;
use tokio::sync::OnceCell;

use crate::config::Config;
use crate::error::{AppError, AppResult};

pub mod catalog;
pub mod fetch;
pub mod matrix;

pub use catalog::Catalog;
pub use matrix::SimilarityMatrix;

/// Owns the loaded catalog and the lazily-resolved similarity matrix.
///
/// The matrix is behind a `OnceCell` barrier: concurrent first requests share
/// a single download, a successful load is memoized for the process lifetime,
/// and a failed load leaves the cell empty so the next request retries.
pub struct ArtifactStore {
    catalog: Catalog,
    matrix: OnceCell<SimilarityMatrix>,
    http_client: HttpClient,
    similarity_path: PathBuf,
    similarity_url: String,
}

impl ArtifactStore {
    /// Loads the catalog eagerly; a missing catalog aborts startup.
    pub fn open(config: &Config, http_client: HttpClient) -> anyhow::Result<Self> {
        let catalog = Catalog::load(config.catalog_path.as_ref())?;

        Ok(Self {
            catalog,
            matrix: OnceCell::new(),
            http_client,
            similarity_path: PathBuf::from(&config.similarity_path),
            similarity_url: config.similarity_url.clone(),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The similarity matrix, fetching and caching it on first use.
    pub async fn matrix(&self) -> AppResult<&SimilarityMatrix> {
        self.matrix.get_or_try_init(|| self.load_matrix()).await
    }

    async fn load_matrix(&self) -> AppResult<SimilarityMatrix> {
        if !self.similarity_path.exists() {
            fetch::download_artifact(
                &self.http_client,
                &self.similarity_url,
                &self.similarity_path,
            )
            .await?;
        }

        let bytes = tokio::fs::read(&self.similarity_path).await?;

        let matrix = match SimilarityMatrix::decode(&bytes) {
            Ok(matrix) => matrix,
            Err(e) => {
                self.discard_cached_artifact().await;
                return Err(e);
            }
        };

        // The artifact must align row-for-row with the catalog; anything else
        // means a stale or corrupt download.
        if matrix.side() != self.catalog.len() {
            let side = matrix.side();
            self.discard_cached_artifact().await;
            return Err(AppError::Artifact(format!(
                "Similarity matrix side {} does not match catalog size {}",
                side,
                self.catalog.len()
            )));
        }

        tracing::info!(side = matrix.side(), "Loaded similarity matrix");

        Ok(matrix)
    }

    /// Removes a rejected artifact so a corrupt download is not sticky.
    async fn discard_cached_artifact(&self) {
        if let Err(e) = tokio::fs::remove_file(&self.similarity_path).await {
            tracing::warn!(
                error = %e,
                path = %self.similarity_path.display(),
                "Failed to remove rejected similarity artifact"
            );
        }
    }
}
