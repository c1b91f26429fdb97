use thiserror::Error;

/// Core error type shared across colbind crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The type graph violates structural invariants.
    #[error("invalid type graph: {0}")]
    InvalidGraph(String),
}

/// Convenience alias for results returned by colbind crates.
pub type Result<T> = std::result::Result<T, Error>;
