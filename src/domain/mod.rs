//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, timestamps, validation errors)
//! - `interview` - Question catalog, conversation state and the flow state machine

pub mod foundation;
pub mod interview;
