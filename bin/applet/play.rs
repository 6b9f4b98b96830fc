use crate::{build::Build, io::Io, setup::Setup};
use anyhow::Error as Anyhow;
use clap::Parser;
use derive_more::{Display, Error, From};
use lib::chess::{File, ParsePromotionError, ParseSquareError, Promotion, Rank, Square};
use lib::rules::{Board, Event, Game, Observer};
use lib::util::Integer;
use std::io::{stdin, stdout, ErrorKind, Read, Write};
use std::{fmt, str::FromStr};
use tracing::{debug, info, instrument, warn};

/// A game of chess between two players taking turns on the same terminal.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// The starting position in RON notation.
    #[clap(short, long, default_value_t)]
    setup: Setup,
}

/// The reason why parsing a [`Command`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
enum ParseCommandError {
    #[display(fmt = "expected `<from> <to> [promotion]`, `resign` or `draw`")]
    Malformed,

    #[display(fmt = "{}", _0)]
    InvalidSquare(ParseSquareError),

    #[display(fmt = "{}", _0)]
    InvalidPromotion(ParsePromotionError),
}

/// A line of input from the player to move.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Command {
    Move(Square, Square, Option<Promotion>),
    Resign,
    Draw,
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Vec::from_iter(s.split_whitespace())[..] {
            ["resign"] => Ok(Command::Resign),
            ["draw"] => Ok(Command::Draw),
            [whence, whither] => Ok(Command::Move(whence.parse()?, whither.parse()?, None)),
            [whence, whither, p] => Ok(Command::Move(
                whence.parse()?,
                whither.parse()?,
                Some(p.parse()?),
            )),
            _ => Err(ParseCommandError::Malformed),
        }
    }
}

/// Logs every change to the board.
struct Logger;

impl Observer for Logger {
    fn notify(&mut self, event: &Event) {
        debug!(%event);
    }
}

/// Renders the board as a grid, white at the bottom.
struct Diagram<'a>(&'a Board);

impl fmt::Display for Diagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{} ", rank)?;
            for file in File::iter() {
                match self.0.piece_at(Square::new(file, rank)) {
                    Some(p) => write!(f, " {}", p)?,
                    None => f.write_str(" .")?,
                }
            }

            writeln!(f)?;
        }

        f.write_str("  ")?;
        for file in File::iter() {
            write!(f, " {}", file)?;
        }

        Ok(())
    }
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let mut game = self.setup.build()?;
        game.subscribe(Logger);
        play(&mut game, &mut Io::new(stdout(), stdin()))
    }
}

fn play<W: Write, R: Read>(game: &mut Game, io: &mut Io<W, R>) -> Result<(), Anyhow> {
    loop {
        io.send(Diagram(game.board()))?;

        let turn = game.turn();
        if game.is_in_check(turn) {
            io.send(format_args!("{} is in check", turn))?;
        }

        if let Some(outcome) = game.outcome() {
            info!(%outcome, "game over");
            io.send(outcome)?;
            break;
        }

        io.send(format_args!("{} to move", turn))?;
        io.flush()?;

        let line = match io.recv() {
            Ok(line) => line,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        };

        match line.parse() {
            Err(e) => {
                warn!(%line, "{}", e);
                io.send(e)?;
            }

            Ok(Command::Resign) => {
                game.resign(turn)?;
            }

            Ok(Command::Draw) => {
                game.agree_draw()?;
            }

            Ok(Command::Move(whence, whither, promotion)) => {
                let Some(piece) = game.board()[whence] else {
                    io.send(format_args!("there's no piece on `{}`", whence))?;
                    continue;
                };

                match game.commit(piece, whither, promotion) {
                    Ok(report) => info!(%whence, %whither, kind = ?report.kind),
                    Err(e) => io.send(e)?,
                }
            }
        }
    }

    io.flush()?;
    Ok(())
}
