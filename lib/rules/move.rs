use crate::chess::{PieceId, Square};
use crate::rules::Mutation;
use arrayvec::ArrayVec;
use bitflags::bitflags;

bitflags! {
    /// Characteristics of a move.
    #[derive(Default)]
    pub struct MoveKind: u8 {
        const CAPTURE =    0b0001;
        const EN_PASSANT = 0b0010;
        const CASTLE =     0b0100;
        const PROMOTION =  0b1000;
    }
}

/// The rook's part of a castling move.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RookShift {
    pub rook: PieceId,
    pub whence: Square,
    pub whither: Square,
}

/// A candidate move of a single piece along with its side effects.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Move {
    piece: PieceId,
    whence: Square,
    whither: Square,
    capture: Option<(PieceId, Square)>,
    castling: Option<RookShift>,
}

impl Move {
    /// A move that doesn't capture.
    pub fn quiet(piece: PieceId, whence: Square, whither: Square) -> Self {
        Move {
            piece,
            whence,
            whither,
            capture: None,
            castling: None,
        }
    }

    /// A move that captures the piece standing on some square.
    ///
    /// The captured piece need not stand on the destination square, as in en passant.
    pub fn capture(piece: PieceId, whence: Square, whither: Square, victim: (PieceId, Square)) -> Self {
        Move {
            capture: Some(victim),
            ..Self::quiet(piece, whence, whither)
        }
    }

    /// A castling move of the king, which drags the rook along.
    pub fn castling(king: PieceId, whence: Square, whither: Square, rook: RookShift) -> Self {
        Move {
            castling: Some(rook),
            ..Self::quiet(king, whence, whither)
        }
    }

    /// The moving piece.
    pub fn piece(&self) -> PieceId {
        self.piece
    }

    /// The source [`Square`].
    pub fn whence(&self) -> Square {
        self.whence
    }

    /// The destination [`Square`].
    pub fn whither(&self) -> Square {
        self.whither
    }

    /// The captured piece and the square it stands on, if any.
    pub fn captured(&self) -> Option<(PieceId, Square)> {
        self.capture
    }

    /// The rook shift, if this is a castling move.
    pub fn rook_shift(&self) -> Option<RookShift> {
        self.castling
    }

    /// The characteristics of this move, promotion aside.
    pub fn kind(&self) -> MoveKind {
        let mut kind = MoveKind::empty();

        if let Some((_, sq)) = self.capture {
            kind |= MoveKind::CAPTURE;
            if sq != self.whither {
                kind |= MoveKind::EN_PASSANT;
            }
        }

        if self.castling.is_some() {
            kind |= MoveKind::CASTLE;
        }

        kind
    }

    /// The [`Mutation`]s that carry out this move, in order.
    pub fn mutations(&self) -> ArrayVec<Mutation, 3> {
        let mut mutations = ArrayVec::new();

        if let Some((victim, _)) = self.capture {
            mutations.push(Mutation::Remove(victim));
        }

        mutations.push(Mutation::Relocate(self.piece, self.whither));

        if let Some(r) = self.castling {
            mutations.push(Mutation::Relocate(r.rook, r.whither));
        }

        mutations
    }
}
