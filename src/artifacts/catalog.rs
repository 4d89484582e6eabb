use std::path::Path;

use anyhow::Context;

use crate::models::CatalogEntry;

/// The static list of recommendable movies.
///
/// Row order is the alignment key into the similarity matrix and is preserved
/// exactly as serialized. Loaded once at startup; immutable thereafter.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Loads the catalog artifact (a JSON array of `{movie_id, title}` rows).
    ///
    /// A missing or malformed catalog is fatal: the process cannot serve
    /// requests without it.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read catalog artifact at {}", path.display()))?;
        let entries: Vec<CatalogEntry> = serde_json::from_slice(&bytes)
            .with_context(|| format!("Malformed catalog artifact at {}", path.display()))?;

        tracing::info!(
            movies = entries.len(),
            path = %path.display(),
            "Loaded movie catalog"
        );

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    /// Row index of the first entry whose title matches exactly.
    ///
    /// When two entries share a title only the lower-indexed one is ever
    /// reachable; a known limitation inherited from the artifact producer.
    pub fn index_of_title(&self, title: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.title == title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::from_entries(vec![
            CatalogEntry {
                movie_id: 1,
                title: "A".to_string(),
            },
            CatalogEntry {
                movie_id: 2,
                title: "B".to_string(),
            },
            CatalogEntry {
                movie_id: 3,
                title: "A".to_string(),
            },
        ])
    }

    #[test]
    fn test_index_of_title_exact_match() {
        let catalog = sample();
        assert_eq!(catalog.index_of_title("B"), Some(1));
    }

    #[test]
    fn test_index_of_title_absent() {
        let catalog = sample();
        assert_eq!(catalog.index_of_title("Z"), None);
    }

    #[test]
    fn test_duplicate_title_resolves_to_first_row() {
        let catalog = sample();
        assert_eq!(catalog.index_of_title("A"), Some(0));
    }

    #[test]
    fn test_load_preserves_row_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[{"movie_id": 7, "title": "Heat"}, {"movie_id": 4, "title": "Alien"}]"#,
        )
        .unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entry(0).unwrap().movie_id, 7);
        assert_eq!(catalog.entry(1).unwrap().title, "Alien");
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Catalog::load(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn test_load_malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(Catalog::load(&path).is_err());
    }
}
