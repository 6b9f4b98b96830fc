use crate::chess::{Role, Team};
use derive_more::{Display, From};
use std::fmt::{self, Formatter};

/// Uniquely identifies a [`Piece`] for the lifetime of a game.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, From)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "#{}", _0)]
pub struct PieceId(u16);

impl PieceId {
    #[inline(always)]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A chess [piece][`Role`] owned by a [`Team`].
///
/// The piece knows nothing about where it stands, its placement is kept by the board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Piece {
    id: PieceId,
    role: Role,
    team: Team,
    moves: u32,
}

impl Piece {
    /// Constructs an unmoved [`Piece`].
    #[inline(always)]
    pub fn new(id: PieceId, role: Role, team: Team) -> Self {
        Piece {
            id,
            role,
            team,
            moves: 0,
        }
    }

    /// This piece's identity.
    #[inline(always)]
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// This piece's [`Role`].
    #[inline(always)]
    pub fn role(&self) -> Role {
        self.role
    }

    /// This piece's [`Team`].
    #[inline(always)]
    pub fn team(&self) -> Team {
        self.team
    }

    /// How many times this piece has been relocated.
    #[inline(always)]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Whether this piece is of a given [`Role`].
    #[inline(always)]
    pub fn is(&self, role: Role) -> bool {
        self.role == role
    }

    #[inline(always)]
    pub(crate) fn set_moves(&mut self, moves: u32) {
        self.moves = moves;
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.team {
            Team::White => f.write_str(&self.role.to_string().to_ascii_uppercase()),
            Team::Black => write!(f, "{}", self.role),
        }
    }
}
