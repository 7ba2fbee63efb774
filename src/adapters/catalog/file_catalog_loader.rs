//! File-based Question Catalog Loader
//!
//! Reads a YAML questionnaire definition from disk at startup.

use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::interview::{CatalogError, QuestionCatalog};

/// Loads a [`QuestionCatalog`] from a YAML file
#[derive(Debug, Clone)]
pub struct FileCatalogLoader {
    path: PathBuf,
}

impl FileCatalogLoader {
    /// # Example
    /// ```ignore
    /// let catalog = FileCatalogLoader::new("./questions.yaml").load().await?;
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<QuestionCatalog, CatalogError> {
        let yaml = fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::Io(format!("{}: {}", self.path.display(), e)))?;
        QuestionCatalog::from_yaml_str(&yaml)
    }
}

/// Loads the catalog at `path`, or the built-in one when no path is configured.
pub async fn load_catalog(path: Option<&Path>) -> Result<QuestionCatalog, CatalogError> {
    match path {
        Some(path) => {
            let catalog = FileCatalogLoader::new(path).load().await?;
            tracing::info!(path = %path.display(), questions = catalog.len(), "Loaded question catalog");
            Ok(catalog)
        }
        None => {
            tracing::info!("Using built-in question catalog");
            Ok(QuestionCatalog::builtin())
        }
    }
}
