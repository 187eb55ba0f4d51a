//! Location DTOs
//!
//! Shapes of the `location-area` list and detail payloads.

use serde::Deserialize;

/// A `{ name, url }` reference, used throughout PokeAPI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// One page of the paginated location-area catalog.
///
/// `next` and `previous` are `null` at the ends of the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationPage {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// Detail record for a single location area.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationArea {
    #[serde(default)]
    pub name: Option<String>,
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}

impl LocationArea {
    /// Names of every pokemon that can be encountered here.
    pub fn pokemon_names(&self) -> impl Iterator<Item = &str> {
        self.pokemon_encounters
            .iter()
            .map(|encounter| encounter.pokemon.name.as_str())
    }
}
