//! Interview Flow - Fixed-questionnaire conversational interview service
//!
//! Walks each session through a fixed catalog of questions, one turn at a
//! time, with canned reactions, deferred skips and progress tracking. Exposed
//! over a structured REST API and a free-form chat API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
