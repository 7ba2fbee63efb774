//! Catalog Adapters
//!
//! Sources for the question catalog: a YAML file on disk, or the built-in default.

mod file_catalog_loader;

pub use file_catalog_loader::{load_catalog, FileCatalogLoader};
