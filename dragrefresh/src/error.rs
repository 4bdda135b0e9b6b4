//! Construction-time errors.

use thiserror::Error;

/// Misconfiguration detected while building a controller or indicator.
///
/// Runtime operations never fail; anything that can go wrong is caught here,
/// before the first scroll event arrives.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("no refresh indicator view was supplied")]
    MissingIndicator,

    #[error("no refresh channel was supplied")]
    MissingChannel,

    #[error("release threshold must be a positive finite distance, got {0}")]
    InvalidThreshold(f32),
}
