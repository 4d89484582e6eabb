use std::sync::Arc;

use crate::artifacts::ArtifactStore;
use crate::services::PosterProvider;

/// Shared application state
///
/// Everything here is immutable after startup apart from the poster memo
/// inside the provider, so cloning per request is cheap and read access needs
/// no locking.
#[derive(Clone)]
pub struct AppState {
    pub artifacts: Arc<ArtifactStore>,
    pub posters: Arc<dyn PosterProvider>,
}

impl AppState {
    pub fn new(artifacts: Arc<ArtifactStore>, posters: Arc<dyn PosterProvider>) -> Self {
        Self { artifacts, posters }
    }
}
