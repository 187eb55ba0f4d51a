//! PokeAPI access
//!
//! The network [`Fetcher`] and the caching [`PokeClient`] built on top of it.

mod client;
mod fetcher;

pub use client::PokeClient;
pub use fetcher::{Fetcher, HttpFetcher};
