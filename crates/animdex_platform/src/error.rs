//! Platform error types

use thiserror::Error;

/// Host boundary errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Route path does not start with `/`
    #[error("Invalid route path: {0:?}")]
    InvalidPath(String),

    /// The router refused or failed a navigation
    #[error("Navigation failed: {0}")]
    Navigation(String),
}

/// Result type for host operations
pub type Result<T> = std::result::Result<T, PlatformError>;
