//! Error types for the Pokedex client
//!
//! Provides unified error handling using thiserror. The cache's `add` and
//! `get` have no failure path; everything here comes from the network,
//! decoding, terminal I/O or cache shutdown.

use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for the Pokedex client.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Connection or transport failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Request to {url} failed with status {status}")]
    HttpStatus { status: u16, url: String },

    /// Payload was not the JSON we expected
    #[error("Could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A command was invoked without its required argument
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    /// The cache reaper task panicked or was cancelled
    #[error("Cache reaper failed: {0}")]
    ReaperFailed(String),
}

impl PokedexError {
    /// Whether retrying the same request might succeed.
    ///
    /// Transport failures are retryable; bad statuses and malformed payloads
    /// are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PokedexError::Network(_))
    }
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex client.
pub type Result<T> = std::result::Result<T, PokedexError>;
