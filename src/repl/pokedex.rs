//! Caught pokemon collection and the catch roll

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::models::Pokemon;

/// Extra range added to the roll so weak pokemon are not guaranteed catches.
const CATCH_BONUS: u32 = 100;

/// A pokemon in the collection and when it was caught.
#[derive(Debug, Clone)]
pub struct CaughtPokemon {
    pub pokemon: Pokemon,
    pub caught_at: DateTime<Utc>,
}

/// Pokemon the user has caught, keyed by name.
#[derive(Debug, Default)]
pub struct Pokedex {
    caught: BTreeMap<String, CaughtPokemon>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a catch. Catching the same pokemon again refreshes the record.
    pub fn add(&mut self, pokemon: Pokemon) {
        self.caught.insert(
            pokemon.name.clone(),
            CaughtPokemon {
                pokemon,
                caught_at: Utc::now(),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&CaughtPokemon> {
        self.caught.get(name)
    }

    /// Caught pokemon in name order.
    pub fn iter(&self) -> impl Iterator<Item = &CaughtPokemon> {
        self.caught.values()
    }

    pub fn len(&self) -> usize {
        self.caught.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caught.is_empty()
    }
}

/// Draws a catch roll for a pokemon with the given base experience.
///
/// The roll is uniform in `[0, base_experience + 100)`; higher base
/// experience means a lower chance of success.
pub fn roll_catch<R: Rng>(rng: &mut R, base_experience: u32) -> bool {
    let roll = rng.gen_range(0..base_experience.saturating_add(CATCH_BONUS));
    catch_succeeds(roll, base_experience)
}

/// A roll catches the pokemon when it reaches the base experience.
pub fn catch_succeeds(roll: u32, base_experience: u32) -> bool {
    roll >= base_experience
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NamedResource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pokemon(name: &str, base_experience: u32) -> Pokemon {
        Pokemon {
            id: 1,
            name: name.to_string(),
            base_experience,
            height: 7,
            weight: 69,
            stats: vec![],
            types: vec![crate::models::PokemonType {
                slot: 1,
                kind: NamedResource {
                    name: "grass".to_string(),
                    url: "https://pokeapi.co/api/v2/type/12/".to_string(),
                },
            }],
        }
    }

    #[test]
    fn test_pokedex_lists_in_name_order() {
        let mut pokedex = Pokedex::new();
        pokedex.add(pokemon("squirtle", 63));
        pokedex.add(pokemon("bulbasaur", 64));
        pokedex.add(pokemon("charmander", 62));

        let names: Vec<&str> = pokedex.iter().map(|c| c.pokemon.name.as_str()).collect();
        assert_eq!(names, vec!["bulbasaur", "charmander", "squirtle"]);
    }

    #[test]
    fn test_pokedex_recatch_replaces() {
        let mut pokedex = Pokedex::new();
        pokedex.add(pokemon("pidgey", 50));
        pokedex.add(pokemon("pidgey", 50));

        assert_eq!(pokedex.len(), 1);
        assert!(pokedex.get("pidgey").is_some());
        assert!(pokedex.get("rattata").is_none());
    }

    #[test]
    fn test_catch_threshold() {
        assert!(catch_succeeds(64, 64));
        assert!(catch_succeeds(150, 64));
        assert!(!catch_succeeds(63, 64));
    }

    #[test]
    fn test_zero_base_experience_always_caught() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(roll_catch(&mut rng, 0));
        }
    }

    #[test]
    fn test_strong_pokemon_usually_escape() {
        let mut rng = StdRng::seed_from_u64(42);
        let caught = (0..1000).filter(|_| roll_catch(&mut rng, 900)).count();

        // Expected success rate is 100 / 1000
        assert!(caught > 50 && caught < 150, "caught {} of 1000", caught);
    }
}
