//! Core resolution model and services.
//!
//! - `domain`: value objects shared by the whole pipeline (coordinates,
//!   candidate URLs, retrieval outcomes, signals, aggregated results)
//! - `policies`: pure business rules (declared-license precedence)
//! - `services`: the candidate generator, repository scanner and aggregator

pub mod domain;
pub mod policies;
pub mod services;
