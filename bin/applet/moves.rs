use crate::{build::Build, io::Io, setup::Setup};
use anyhow::{bail, Error as Anyhow};
use clap::Parser;
use lib::chess::Square;
use std::io::{empty, stdout};
use tracing::instrument;

/// Lists the squares a piece may legally move to.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Moves {
    /// The starting position in RON notation.
    #[clap(short, long, default_value_t)]
    setup: Setup,

    /// The square the piece stands on.
    square: Square,
}

impl Moves {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let mut game = self.setup.build()?;

        let Some(piece) = game.board()[self.square] else {
            bail!("there's no piece on `{}`", self.square);
        };

        let mut io = Io::new(stdout(), empty());
        for sq in game.legal_destinations(piece)? {
            io.send(sq)?;
        }

        io.flush()?;
        Ok(())
    }
}
