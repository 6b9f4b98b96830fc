use crate::chess::{Bitboard, Perspective, PieceId, Rank, Role, Square};
use crate::rules::{Board, Move, Mutation, RookShift, UnknownPiece};
use arrayvec::ArrayVec;

/// The rook's corner, the king's destination and the rook's destination, from white's perspective.
static CASTLES: [(Square, Square, Square); 2] = [
    (Square::H1, Square::G1, Square::F1),
    (Square::A1, Square::C1, Square::D1),
];

impl Board {
    /// Whether moving a piece to a square promotes it.
    pub fn promotes(&self, id: PieceId, whither: Square) -> Result<bool, UnknownPiece> {
        let p = self.piece(id)?;
        Ok(p.is(Role::Pawn) && whither.rank() == Rank::Eighth.perspective(p.team()))
    }

    /// The en passant capture available to a pawn, if any.
    ///
    /// Only a hostile pawn that just advanced two squares on its first move, landing right beside
    /// this pawn, may be captured en passant.
    pub fn en_passant(&self, id: PieceId) -> Result<Option<Move>, UnknownPiece> {
        let (pawn, whence) = self.locate(id)?;

        let Some(last) = self.last_touched() else {
            return Ok(None);
        };

        let Ok((victim, square)) = self.locate(last.piece) else {
            return Ok(None);
        };

        let team = victim.team();
        let eligible = pawn.is(Role::Pawn)
            && victim.is(Role::Pawn)
            && victim.moves() == 1
            && team.is_hostile_to(pawn.team())
            && square == last.square
            && square.rank() == Rank::Fourth.perspective(team)
            && square.rank() == whence.rank()
            && (square.file() - whence.file()).abs() == 1;

        if !eligible {
            return Ok(None);
        }

        let whither = Square::new(square.file(), Rank::Third.perspective(team));
        if self[whither].is_some() {
            return Ok(None);
        }

        Ok(Some(Move::capture(id, whence, whither, (last.piece, square))))
    }

    /// The castling moves available to a king.
    ///
    /// The king and the rook must both be unmoved and nothing may stand between them.
    /// The king may not castle out of, through or into check.
    pub fn castling(&mut self, id: PieceId) -> Result<ArrayVec<Move, 2>, UnknownPiece> {
        let mut moves = ArrayVec::new();
        let (&king, whence) = self.locate(id)?;
        let team = king.team();

        if !king.is(Role::King) || king.moves() != 0 || whence != Square::E1.perspective(team) {
            return Ok(moves);
        }

        if self.is_in_check(team) {
            return Ok(moves);
        }

        for (corner, destination, beside) in CASTLES {
            let (corner, whither) = (corner.perspective(team), destination.perspective(team));

            let Some(&rook) = self.piece_at(corner) else {
                continue;
            };

            if !rook.is(Role::Rook) || rook.team() != team || rook.moves() != 0 {
                continue;
            }

            if !(Bitboard::segment(whence, corner) & self.occupied()).is_empty() {
                continue;
            }

            let mut safe = true;
            for sq in Bitboard::segment(whence, whither).with(whither) {
                if self.speculate([Mutation::Relocate(id, sq)], |b| b.is_in_check(team))? {
                    safe = false;
                    break;
                }
            }

            if safe {
                let shift = RookShift {
                    rook: rook.id(),
                    whence: corner,
                    whither: beside.perspective(team),
                };

                moves.push(Move::castling(id, whence, whither, shift));
            }
        }

        Ok(moves)
    }

    /// Every move a piece could make if it were free to expose its own king.
    ///
    /// Kings are never among the captured pieces.
    pub fn candidates(&mut self, id: PieceId) -> Result<Vec<Move>, UnknownPiece> {
        let (_, whence) = self.locate(id)?;

        let kings = self
            .pieces_of(!self.piece(id)?.team())
            .filter(|(p, _)| p.is(Role::King))
            .map(|(_, sq)| sq)
            .collect::<Bitboard>();

        let targets = self.attacks(id)? & !kings;
        let mut moves = Vec::from_iter(targets.iter().map(|whither| match self[whither] {
            Some(victim) => Move::capture(id, whence, whither, (victim, whither)),
            None => Move::quiet(id, whence, whither),
        }));

        moves.extend(self.en_passant(id)?);
        moves.extend(self.castling(id)?);

        Ok(moves)
    }
}
