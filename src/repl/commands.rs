//! REPL commands
//!
//! The command table and the per-session state the commands act on.

use std::io::Write;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::error::{PokedexError, Result};
use crate::pokeapi::PokeClient;
use crate::repl::pokedex::{roll_catch, Pokedex};

// == Command Table ==
/// Every command the REPL understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
}

impl Command {
    /// Commands in the order `help` lists them.
    pub const ALL: [Command; 8] = [
        Command::Help,
        Command::Exit,
        Command::Map,
        Command::MapBack,
        Command::Explore,
        Command::Catch,
        Command::Inspect,
        Command::Pokedex,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Exit => "exit",
            Command::Map => "map",
            Command::MapBack => "mapb",
            Command::Explore => "explore",
            Command::Catch => "catch",
            Command::Inspect => "inspect",
            Command::Pokedex => "pokedex",
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            Command::Explore => "explore <area>",
            Command::Catch => "catch <pokemon>",
            Command::Inspect => "inspect <pokemon>",
            other => other.name(),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Help => "Displays a help message",
            Command::Exit => "Exit the Pokedex",
            Command::Map => "Displays the next 20 location areas",
            Command::MapBack => "Displays the previous 20 location areas",
            Command::Explore => "Lists the pokemon found in a location area",
            Command::Catch => "Tries to catch a pokemon and add it to your Pokedex",
            Command::Inspect => "Shows the details of a pokemon you have caught",
            Command::Pokedex => "Lists every pokemon in your Pokedex",
        }
    }

    pub fn parse(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == word)
    }
}

/// What the REPL loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

// == Session ==
/// State carried between commands: pagination cursors, the caught
/// collection and the catch RNG.
pub struct Session {
    client: PokeClient,
    next: Option<String>,
    previous: Option<String>,
    pokedex: Pokedex,
    rng: StdRng,
}

impl Session {
    pub fn new(client: PokeClient) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    /// Creates a session with a caller-supplied RNG for catch rolls.
    pub fn with_rng(client: PokeClient, rng: StdRng) -> Self {
        let next = Some(client.first_page_url());
        Self {
            client,
            next,
            previous: None,
            pokedex: Pokedex::new(),
            rng,
        }
    }

    pub fn client(&self) -> &PokeClient {
        &self.client
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    // == Execute ==
    /// Runs one command with its optional argument, writing output to `out`.
    pub async fn execute<W: Write>(
        &mut self,
        command: Command,
        arg: Option<&str>,
        out: &mut W,
    ) -> Result<Outcome> {
        debug!(command = command.name(), ?arg, "executing command");

        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Outcome::Exit);
            }
            Command::Map => match self.next.clone() {
                Some(url) => self.show_page(&url, out).await?,
                None => writeln!(out, "you're on the last page")?,
            },
            Command::MapBack => match self.previous.clone() {
                Some(url) => self.show_page(&url, out).await?,
                None => writeln!(out, "you're on the first page")?,
            },
            Command::Explore => {
                let area = arg.ok_or(PokedexError::MissingArgument("location area name"))?;
                self.explore(area, out).await?;
            }
            Command::Catch => {
                let name = arg.ok_or(PokedexError::MissingArgument("pokemon name"))?;
                self.catch(name, out).await?;
            }
            Command::Inspect => {
                let name = arg.ok_or(PokedexError::MissingArgument("pokemon name"))?;
                self.inspect(name, out)?;
            }
            Command::Pokedex => self.list_pokedex(out)?,
        }

        Ok(Outcome::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for command in Command::ALL {
            writeln!(out, "{}: {}", command.usage(), command.description())?;
        }
        Ok(())
    }

    /// Prints one catalog page and moves both cursors to its neighbours.
    async fn show_page<W: Write>(&mut self, url: &str, out: &mut W) -> Result<()> {
        let page = self.client.location_page(url).await?;

        self.next = page.next;
        self.previous = page.previous;

        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        Ok(())
    }

    async fn explore<W: Write>(&self, area: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Exploring {}...", area)?;
        let location = self.client.location_area(area).await?;

        let shown = location.name.as_deref().unwrap_or(area);
        writeln!(out, "Found Pokemon in {}:", shown)?;
        for name in location.pokemon_names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Throwing a Pokeball at {}...", name)?;
        let pokemon = self.client.pokemon(name).await?;

        if roll_catch(&mut self.rng, pokemon.base_experience) {
            writeln!(out, "{} was caught!", pokemon.name)?;
            writeln!(out, "You may now inspect it with the inspect command.")?;
            self.pokedex.add(pokemon);
        } else {
            writeln!(out, "{} escaped!", pokemon.name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let Some(caught) = self.pokedex.get(name) else {
            writeln!(out, "you have not caught that pokemon")?;
            return Ok(());
        };

        let pokemon = &caught.pokemon;
        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(out, "  - {}", kind.kind.name)?;
        }
        writeln!(
            out,
            "Caught: {}",
            caught.caught_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.pokedex.is_empty() {
            writeln!(out, "Your Pokedex is empty")?;
            return Ok(());
        }

        writeln!(out, "Your Pokedex:")?;
        for caught in self.pokedex.iter() {
            writeln!(out, " - {}", caught.pokemon.name)?;
        }
        Ok(())
    }
}
