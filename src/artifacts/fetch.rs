use std::path::Path;

use reqwest::Client as HttpClient;

use crate::error::{AppError, AppResult};

/// Downloads the similarity artifact to `dest`, staging through a `.part`
/// sibling so a partial download can never be mistaken for the real artifact.
pub async fn download_artifact(client: &HttpClient, url: &str, dest: &Path) -> AppResult<()> {
    tracing::info!(url = %url, dest = %dest.display(), "Fetching similarity artifact");

    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        return Err(AppError::Artifact(format!(
            "Artifact store returned status {} for {}",
            status, url
        )));
    }

    let bytes = response.bytes().await?;

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let staging = dest.with_extension("part");
    tokio::fs::write(&staging, &bytes).await?;
    tokio::fs::rename(&staging, dest).await?;

    tracing::info!(
        bytes = bytes.len(),
        dest = %dest.display(),
        "Similarity artifact cached locally"
    );

    Ok(())
}
