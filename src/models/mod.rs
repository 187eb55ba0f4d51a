//! PokeAPI payload models
//!
//! Serde DTOs for the records the client decodes from cached or freshly
//! fetched response bodies.

pub mod location;
pub mod pokemon;

// Re-export commonly used types
pub use location::{LocationArea, LocationPage, NamedResource, PokemonEncounter};
pub use pokemon::{Pokemon, PokemonStat, PokemonType};
