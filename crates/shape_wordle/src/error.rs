//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, violated input preconditions (too few keywords, regions without
//! interior pixels, mismatched shape inputs).
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("at least {required} words are required, got {got}")]
    NotEnoughWords { required: usize, got: usize },

    #[error("region {region_id} has no interior pixels")]
    EmptyRegion { region_id: usize },

    #[error("shape input mismatch: {0}")]
    ShapeMismatch(String),
}
