use crate::chess::{Bitboard, Outcome, PieceId, Promotion, Role, Square, Team};
use crate::rules::{Board, MoveKind, Observer, RookShift, UnknownPiece};
use derive_more::{DebugCustom, Display, Error, From};
use tracing::{debug, instrument};

/// The reason why a move was rejected.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error, From)]
pub enum MoveError {
    #[display(fmt = "{}", _0)]
    UnknownPiece(#[error(not(source))] UnknownPiece),

    #[display(fmt = "piece `{}` cannot move to `{}`", _0, _1)]
    #[from(ignore)]
    IllegalMove(PieceId, Square),

    #[display(fmt = "piece `{}` must be promoted when moving to `{}`", _0, _1)]
    #[from(ignore)]
    PromotionRequired(PieceId, Square),

    #[display(fmt = "piece `{}` cannot be promoted when moving to `{}`", _0, _1)]
    #[from(ignore)]
    PromotionNotApplicable(PieceId, Square),

    #[display(fmt = "it's not the {} player's turn", _0)]
    #[from(ignore)]
    OutOfTurn(#[error(not(source))] Team),

    #[display(fmt = "{}", _0)]
    GameOver(#[error(not(source))] GameOver),
}

/// The reason why the game can't go on.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "the game is over by {}", _0)]
pub struct GameOver(#[error(not(source))] pub Outcome);

/// A promoted pawn and the piece that replaced it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Promoted {
    pub pawn: PieceId,
    pub piece: PieceId,
    pub role: Role,
}

/// What a committed move did to the board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MoveReport {
    pub piece: PieceId,
    pub whence: Square,
    pub whither: Square,
    pub kind: MoveKind,
    pub captured: Option<PieceId>,
    pub castling: Option<RookShift>,
    pub promotion: Option<Promoted>,
}

/// A game of chess.
///
/// The game owns the [`Board`] and enforces turns, while [`Observer`]s are told about every change
/// to the board after each committed move.
#[derive(DebugCustom)]
#[debug(fmt = "Game(\"{}\", {})", board, turn)]
pub struct Game {
    board: Board,
    turn: Team,
    conclusion: Option<Outcome>,
    observers: Vec<Box<dyn Observer>>,
}

impl Default for Game {
    fn default() -> Self {
        Game::new(Board::default(), Team::White)
    }
}

impl Game {
    /// Starts a game on some [`Board`] with some [`Team`] to move.
    pub fn new(mut board: Board, turn: Team) -> Self {
        board.drain_events().for_each(drop);

        Game {
            board,
            turn,
            conclusion: None,
            observers: Vec::new(),
        }
    }

    /// The [`Board`] this game is played on.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The [`Team`] to move.
    pub fn turn(&self) -> Team {
        self.turn
    }

    /// Registers an [`Observer`] for the changes to the board.
    pub fn subscribe<O: Observer + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    /// The squares a piece may legally move to.
    ///
    /// The answer doesn't depend on whose turn it is.
    pub fn legal_destinations(&mut self, id: PieceId) -> Result<Bitboard, UnknownPiece> {
        self.board.legal_destinations(id)
    }

    /// Whether the king of a [`Team`] is attacked.
    pub fn is_in_check(&self, team: Team) -> bool {
        self.board.is_in_check(team)
    }

    /// The outcome of the game, if it has ended.
    pub fn outcome(&mut self) -> Option<Outcome> {
        match self.conclusion {
            Some(o) => Some(o),
            None => self.board.outcome(self.turn),
        }
    }

    /// Moves a piece of the [`Team`] to move and passes the turn.
    ///
    /// Pawns reaching the last rank must be promoted, other moves may not carry a promotion.
    /// Nothing on the board changes unless the move is accepted,
    /// and no move is accepted once the game is over.
    #[instrument(level = "debug", skip(self), fields(turn = %self.turn), ret, err)]
    pub fn commit(
        &mut self,
        piece: PieceId,
        whither: Square,
        promotion: Option<Promotion>,
    ) -> Result<MoveReport, MoveError> {
        if let Some(o) = self.outcome() {
            return Err(GameOver(o).into());
        }

        let (&moving, whence) = self.board.locate(piece)?;
        if moving.team() != self.turn {
            return Err(MoveError::OutOfTurn(moving.team()));
        }

        let m = self
            .board
            .legal_moves(piece)?
            .into_iter()
            .find(|m| m.whither() == whither)
            .ok_or(MoveError::IllegalMove(piece, whither))?;

        match (self.board.promotes(piece, whither)?, promotion) {
            (true, None) => return Err(MoveError::PromotionRequired(piece, whither)),
            (false, Some(_)) => return Err(MoveError::PromotionNotApplicable(piece, whither)),
            _ => {}
        }

        let mut kind = m.kind();

        let captured = match m.captured() {
            None => None,
            Some((victim, _)) => {
                self.board.remove(victim)?;
                Some(victim)
            }
        };

        self.board.relocate(piece, whither)?;

        if let Some(shift) = m.rook_shift() {
            self.board.relocate(shift.rook, shift.whither)?;
        }

        let promotion = match promotion {
            None => None,
            Some(p) => {
                kind |= MoveKind::PROMOTION;
                let role = Role::from(p);
                let promoted = self.board.promote(piece, role)?;
                Some(Promoted {
                    pawn: piece,
                    piece: promoted,
                    role,
                })
            }
        };

        let occupant = promotion.map_or(piece, |p| p.piece);
        self.board.record_last_touched(occupant, whither, moving.moves());

        self.turn = !self.turn;
        self.dispatch();

        Ok(MoveReport {
            piece,
            whence,
            whither,
            kind,
            captured,
            castling: m.rook_shift(),
            promotion,
        })
    }

    /// Concedes the game on behalf of a [`Team`].
    #[instrument(level = "debug", skip(self), ret, err)]
    pub fn resign(&mut self, team: Team) -> Result<Outcome, GameOver> {
        self.conclude(Outcome::Resignation(team))
    }

    /// Ends the game in a draw agreed by both sides.
    #[instrument(level = "debug", skip(self), ret, err)]
    pub fn agree_draw(&mut self) -> Result<Outcome, GameOver> {
        self.conclude(Outcome::DrawByAgreement)
    }

    fn conclude(&mut self, outcome: Outcome) -> Result<Outcome, GameOver> {
        if let Some(o) = self.outcome() {
            return Err(GameOver(o));
        }

        debug!(%outcome, "game concluded");
        self.conclusion = Some(outcome);
        Ok(outcome)
    }

    fn dispatch(&mut self) {
        for event in self.board.drain_events() {
            for observer in &mut self.observers {
                observer.notify(&event);
            }
        }
    }
}
