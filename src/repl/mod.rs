//! Interactive REPL
//!
//! Reads commands line by line, dispatches them against a [`Session`] and
//! prints results. Command failures are reported and the loop carries on;
//! only a broken terminal ends it early.

mod commands;
mod input;
mod pokedex;

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

use crate::error::{PokedexError, Result};

pub use commands::{Command, Outcome, Session};
pub use input::clean_input;
pub use pokedex::{catch_succeeds, roll_catch, CaughtPokemon, Pokedex};

/// Prompt printed before each line of input.
pub const PROMPT: &str = "Pokedex > ";

/// Runs the REPL until `exit` or end of input.
pub async fn run<R, W>(session: &mut Session, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            info!("End of input, leaving REPL");
            return Ok(());
        };

        let words = clean_input(&line);
        let Some(first) = words.first() else {
            continue;
        };

        let Some(command) = Command::parse(first) else {
            writeln!(out, "Unknown command")?;
            continue;
        };

        match session
            .execute(command, words.get(1).map(String::as_str), out)
            .await
        {
            Ok(Outcome::Continue) => {}
            Ok(Outcome::Exit) => return Ok(()),
            Err(PokedexError::Io(e)) => return Err(PokedexError::Io(e)),
            Err(e) => {
                warn!(command = command.name(), "Command failed: {}", e);
                writeln!(out, "Error: {}", e)?;
            }
        }
    }
}
