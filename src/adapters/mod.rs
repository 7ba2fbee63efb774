//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `catalog` - Question catalog loading (YAML file or built-in)
//! - `http` - REST and chat endpoints (axum)
//! - `storage` - Session store implementations

pub mod catalog;
pub mod http;
pub mod storage;

pub use catalog::{load_catalog, FileCatalogLoader};
pub use http::{app_router, AppState};
pub use storage::InMemorySessionStore;
