use crate::chess::{PieceId, Square};
use crate::rules::board::Undo;
use crate::rules::{Board, Muted, UnknownPiece};
use arrayvec::ArrayVec;

/// A single mechanical change to the [`Board`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Mutation {
    /// Takes a piece off the board.
    Remove(PieceId),
    /// Moves a piece to a square.
    Relocate(PieceId, Square),
}

const CAPACITY: usize = 4;

/// Mutations applied to a muted board, reverted in reverse order once dropped.
struct Trial<'a> {
    board: Muted<'a>,
    applied: ArrayVec<Undo, CAPACITY>,
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        while let Some(undo) = self.applied.pop() {
            self.board.revert(undo);
        }
    }
}

impl Board {
    /// Evaluates a predicate on the board as if some mutations had been applied.
    ///
    /// The mutations are applied in order without recording any [`Event`][`crate::rules::Event`]
    /// and are reverted in reverse order before returning, even if the predicate panics.
    /// On success the board is left exactly as it was.
    ///
    /// # Panics
    ///
    /// Panics if given more than four mutations, after reverting the ones already applied.
    pub fn speculate<I, F, R>(&mut self, mutations: I, predicate: F) -> Result<R, UnknownPiece>
    where
        I: IntoIterator<Item = Mutation>,
        F: FnOnce(&mut Board) -> R,
    {
        let mut trial = Trial {
            board: self.mute(),
            applied: ArrayVec::new(),
        };

        for m in mutations {
            assert!(!trial.applied.is_full(), "at most {CAPACITY} mutations");
            let undo = trial.board.apply(m)?;
            trial.applied.push(undo);
        }

        Ok(predicate(&mut trial.board))
    }
}
