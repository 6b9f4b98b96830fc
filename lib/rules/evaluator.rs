use crate::chess::{Bitboard, Outcome, PieceId, Role, Square, Team};
use crate::rules::{Board, Move, UnknownPiece};
use crate::util::Integer;
use arrayvec::ArrayVec;
use tracing::{debug, instrument};

impl Board {
    /// Whether a square is attacked by any piece of a [`Team`].
    pub fn is_attacked(&self, sq: Square, by: Team) -> bool {
        self.pieces_of(by)
            .any(|(p, _)| self.attacks(p.id()).map_or(false, |bb| bb.contains(sq)))
    }

    /// Whether the king of a [`Team`] is attacked.
    ///
    /// A team without a king is never in check.
    pub fn is_in_check(&self, team: Team) -> bool {
        self.king(team).map_or(false, |sq| self.is_attacked(sq, !team))
    }

    /// Whether a [`Team`] lacks the material to ever deliver checkmate.
    ///
    /// That is the case if it has no pawns, queens or rooks and at most either a single minor
    /// piece or two knights.
    pub fn has_insufficient_material(&self, team: Team) -> bool {
        let (mut knights, mut bishops) = (0, 0);

        for (p, _) in self.pieces_of(team) {
            match p.role() {
                Role::King => {}
                Role::Knight => knights += 1,
                Role::Bishop => bishops += 1,
                Role::Pawn | Role::Rook | Role::Queen => return false,
            }
        }

        matches!((knights, bishops), (0, 0) | (1, 0) | (0, 1) | (2, 0))
    }

    /// The moves of a piece that don't leave its own king in check.
    ///
    /// The board is muted while candidates are tried out and left exactly as it was.
    pub fn legal_moves(&mut self, id: PieceId) -> Result<Vec<Move>, UnknownPiece> {
        let team = self.piece(id)?.team();
        let mut board = self.mute();
        let mut moves = board.candidates(id)?;

        let mut legal = Vec::with_capacity(moves.len());
        for m in moves.drain(..) {
            if !board.speculate(m.mutations(), |b| b.is_in_check(team))? {
                legal.push(m);
            }
        }

        Ok(legal)
    }

    /// The squares a piece may legally move to.
    pub fn legal_destinations(&mut self, id: PieceId) -> Result<Bitboard, UnknownPiece> {
        Ok(self.legal_moves(id)?.iter().map(Move::whither).collect())
    }

    /// Whether any piece of a [`Team`] has a legal move.
    pub fn has_legal_moves(&mut self, team: Team) -> bool {
        let ids = Vec::from_iter(self.pieces_of(team).map(|(p, _)| p.id()));
        ids.into_iter()
            .any(|id| self.legal_destinations(id).map_or(false, |bb| !bb.is_empty()))
    }

    /// The outcome of the game with a [`Team`] to move, if it has ended.
    ///
    /// Insufficient material takes precedence, then the side to move is checkmated if it has no
    /// legal moves while in check, or stalemated otherwise.
    #[instrument(level = "trace", skip(self), ret)]
    pub fn outcome(&mut self, turn: Team) -> Option<Outcome> {
        let insufficient: ArrayVec<Team, 2> = Team::iter()
            .filter(|&t| self.has_insufficient_material(t))
            .collect();

        match insufficient[..] {
            [_, _] => return Some(Outcome::DrawByInsufficientMaterial),
            [team] => debug!(%team, "lacks mating material"),
            _ => {}
        }

        if self.has_legal_moves(turn) {
            None
        } else if self.is_in_check(turn) {
            Some(Outcome::Checkmate(!turn))
        } else {
            Some(Outcome::Stalemate)
        }
    }
}
