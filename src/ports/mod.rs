//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionStore` - Conversation state keyed by session id

mod session_store;

pub use session_store::{SessionStore, SessionStoreError};
