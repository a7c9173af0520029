//! psyscore-core: Scoring, classification and statistics for psychometric surveys.
//!
//! This crate defines the questionnaire data model and the pure functions
//! that turn raw answers into domain scores, categories, data-quality flags
//! and descriptive statistics. Storage is left to the caller.

pub mod category;
pub mod config;
pub mod dedup;
pub mod digit_span;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod quality;
pub mod report;
pub mod scoring;
pub mod session;
pub mod statistics;
pub mod validation;

#[cfg(test)]
mod test_support;
