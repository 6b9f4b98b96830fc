use crate::setup::Setup;
use lib::rules::{Board, Game, OccupiedDestination};

/// Trait for types that build other types.
pub trait Build {
    /// The type to be built.
    type Output;

    /// The reason why [`Build::Output`] could not be built.
    type Error;

    /// Build an instance of [`Build::Output`].
    fn build(self) -> Result<Self::Output, Self::Error>;
}

impl Build for Setup {
    type Output = Game;
    type Error = OccupiedDestination;

    fn build(self) -> Result<Self::Output, Self::Error> {
        match self {
            Setup::Standard => Ok(Game::default()),

            Setup::Custom { turn, pieces } => {
                let mut board = Board::empty();
                for (team, role, sq) in pieces {
                    board.place(role, team, sq)?;
                }

                Ok(Game::new(board, turn))
            }
        }
    }
}
