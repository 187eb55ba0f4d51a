//! Pokedex - A PokeAPI text-menu client
//!
//! Pages through the location-area catalog and looks up areas and pokemon,
//! keeping recently fetched responses in a time-bounded cache.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pokeapi;
pub mod repl;
pub mod tasks;

pub use cache::Cache;
pub use config::Config;
pub use error::{PokedexError, Result};
pub use pokeapi::{Fetcher, HttpFetcher, PokeClient};
