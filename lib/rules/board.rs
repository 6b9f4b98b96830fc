use crate::chess::{Bitboard, File, Perspective, Piece, PieceId, Rank, Role, Square, Team};
use crate::rules::{Event, Mutation, Pattern};
use crate::util::Integer;
use derive_more::{DebugCustom, Display, Error};
use std::fmt::{self, Write};
use std::ops::{Deref, DerefMut, Index};
use std::{str::FromStr, vec::Drain};

/// The reason why a piece could not be placed on the board.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "square `{}` is already occupied", _0)]
pub struct OccupiedDestination(#[error(not(source))] pub Square);

/// The reason why a piece could not be found on the board.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "piece `{}` is not on the board", _0)]
pub struct UnknownPiece(#[error(not(source))] pub PieceId);

/// The reason why parsing the [`Board`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum ParseBoardError {
    #[display(fmt = "expected 8 ranks separated by `/`")]
    InvalidRankCount,

    #[display(fmt = "rank `{}` doesn't span exactly 8 files", _0)]
    InvalidRank(#[error(not(source))] Rank),

    #[display(fmt = "`{}` is not a valid piece", _0)]
    InvalidPiece(#[error(not(source))] char),
}

/// The piece that last landed on a square and how many times it had moved before that.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Placement {
    pub piece: PieceId,
    pub square: Square,
    pub moves: u32,
}

/// What it takes to revert a [`Mutation`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub(crate) enum Undo {
    Remove {
        piece: PieceId,
        whence: Square,
    },
    Relocate {
        piece: PieceId,
        whence: Square,
        displaced: Option<PieceId>,
        moves: u32,
    },
}

/// The chess board.
///
/// Every [`Piece`] ever spawned on the board keeps its [`PieceId`] for the lifetime of the board,
/// even after it has been removed.
#[derive(DebugCustom, Clone, Eq, PartialEq, Hash)]
#[debug(fmt = "Board(\"{}\")", self)]
pub struct Board {
    grid: [Option<PieceId>; 64],
    pieces: Vec<Piece>,
    placements: Vec<Option<Square>>,
    last_touched: Option<Placement>,
    journal: Vec<Event>,
    muted: usize,
}

impl Default for Board {
    /// The standard starting layout.
    fn default() -> Self {
        use Role::*;

        let mut board = Board::empty();
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        for team in Team::iter() {
            for (file, role) in File::iter().zip(back) {
                board.spawn(role, team, Square::new(file, Rank::First.perspective(team)));
                board.spawn(Pawn, team, Square::new(file, Rank::Second.perspective(team)));
            }
        }

        board
    }
}

impl Board {
    /// A board without any pieces.
    pub fn empty() -> Self {
        Board {
            grid: [None; 64],
            pieces: Vec::new(),
            placements: Vec::new(),
            last_touched: None,
            journal: Vec::new(),
            muted: 0,
        }
    }

    fn spawn(&mut self, role: Role, team: Team, sq: Square) -> PieceId {
        let id = PieceId::from(self.pieces.len() as u16);
        self.pieces.push(Piece::new(id, role, team));
        self.placements.push(Some(sq));
        self.grid[sq as usize] = Some(id);
        id
    }

    /// Spawns a new unmoved piece on an empty square.
    pub fn place(&mut self, role: Role, team: Team, sq: Square) -> Result<PieceId, OccupiedDestination> {
        match self[sq] {
            Some(_) => Err(OccupiedDestination(sq)),
            None => Ok(self.spawn(role, team, sq)),
        }
    }

    /// Any piece ever spawned on this board, including removed ones.
    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    /// The square a piece stands on, if it's still on the board.
    pub fn square_of(&self, id: PieceId) -> Option<Square> {
        self.placements.get(id.index()).copied().flatten()
    }

    /// A piece that is still on the board.
    pub fn piece(&self, id: PieceId) -> Result<&Piece, UnknownPiece> {
        Ok(self.locate(id)?.0)
    }

    /// A piece that is still on the board along with the square it stands on.
    pub fn locate(&self, id: PieceId) -> Result<(&Piece, Square), UnknownPiece> {
        match (self.get(id), self.square_of(id)) {
            (Some(p), Some(sq)) => Ok((p, sq)),
            _ => Err(UnknownPiece(id)),
        }
    }

    /// The piece standing on a square, if any.
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self[sq].and_then(|id| self.get(id))
    }

    /// The [`Team`] of the piece standing on a square, if any.
    pub fn team_on(&self, sq: Square) -> Option<Team> {
        self.piece_at(sq).map(Piece::team)
    }

    /// The pieces of a [`Team`] still on the board and the squares they stand on.
    pub fn pieces_of(&self, team: Team) -> impl Iterator<Item = (&Piece, Square)> + '_ {
        self.pieces
            .iter()
            .zip(&self.placements)
            .filter(move |(p, _)| p.team() == team)
            .filter_map(|(p, sq)| Some((p, (*sq)?)))
    }

    /// The square where the king of a [`Team`] stands, if it's on the board.
    pub fn king(&self, team: Team) -> Option<Square> {
        self.pieces_of(team)
            .find(|(p, _)| p.is(Role::King))
            .map(|(_, sq)| sq)
    }

    /// The set of occupied squares.
    pub fn occupied(&self) -> Bitboard {
        Square::iter().filter(|&sq| self[sq].is_some()).collect()
    }

    /// The set of squares occupied by a [`Team`].
    pub fn by_team(&self, team: Team) -> Bitboard {
        self.pieces_of(team).map(|(_, sq)| sq).collect()
    }

    /// The piece whose move landed last, as recorded by [`Board::record_last_touched`].
    pub fn last_touched(&self) -> Option<Placement> {
        self.last_touched
    }

    /// Records which piece moved last, where it landed and how many times it had moved before.
    pub fn record_last_touched(&mut self, piece: PieceId, square: Square, moves: u32) {
        self.last_touched = Some(Placement {
            piece,
            square,
            moves,
        });
    }

    /// Moves a piece to a square and returns the square it came from.
    ///
    /// This is a mechanical operation, it never checks whether the move is legal.
    /// Any piece standing on the destination loses its square, but is not reported as removed.
    pub fn relocate(&mut self, id: PieceId, whither: Square) -> Result<Square, UnknownPiece> {
        let (piece, whence) = self.locate(id)?;
        let moves = piece.moves();

        if let Some(displaced) = self[whither].filter(|&d| d != id) {
            self.placements[displaced.index()] = None;
        }

        self.grid[whence as usize] = None;
        self.grid[whither as usize] = Some(id);
        self.placements[id.index()] = Some(whither);
        self.pieces[id.index()].set_moves(moves + 1);

        self.notify(Event::Relocated {
            piece: id,
            whence,
            whither,
        });

        Ok(whence)
    }

    /// Takes a piece off the board and returns the square it stood on.
    pub fn remove(&mut self, id: PieceId) -> Result<Square, UnknownPiece> {
        let whence = self.clear(id)?;
        self.notify(Event::Removed { piece: id, whence });
        Ok(whence)
    }

    /// Replaces a piece by a new piece of another [`Role`] on the same square.
    pub fn promote(&mut self, pawn: PieceId, role: Role) -> Result<PieceId, UnknownPiece> {
        let team = self.piece(pawn)?.team();
        let square = self.clear(pawn)?;
        let piece = self.spawn(role, team, square);
        self.notify(Event::Promoted {
            pawn,
            piece,
            square,
        });

        Ok(piece)
    }

    fn clear(&mut self, id: PieceId) -> Result<Square, UnknownPiece> {
        let whence = self.square_of(id).ok_or(UnknownPiece(id))?;
        self.grid[whence as usize] = None;
        self.placements[id.index()] = None;
        Ok(whence)
    }

    fn pattern_of(&self, id: PieceId) -> Result<(Pattern, Pattern, Square, Team), UnknownPiece> {
        let (p, sq) = self.locate(id)?;
        let (role, team) = (p.role(), p.team());
        let first = p.moves() == 0 && sq.rank() == Rank::Second.perspective(team);
        let movement = Pattern::movement(role, team, first);
        Ok((movement, Pattern::capture(role, team), sq, team))
    }

    /// The squares a piece may step on following its movement pattern.
    pub fn reachable(&self, id: PieceId) -> Result<Bitboard, UnknownPiece> {
        let (movement, _, sq, team) = self.pattern_of(id)?;
        Ok(movement.walk(sq, team, |s| self.team_on(s)))
    }

    /// The squares where a piece may capture following its capture pattern.
    pub fn capturable(&self, id: PieceId) -> Result<Bitboard, UnknownPiece> {
        let (_, capture, sq, team) = self.pattern_of(id)?;
        Ok(capture.walk(sq, team, |s| self.team_on(s)))
    }

    /// The union of [`Board::reachable`] and [`Board::capturable`].
    pub fn attacks(&self, id: PieceId) -> Result<Bitboard, UnknownPiece> {
        Ok(self.reachable(id)? | self.capturable(id)?)
    }

    /// Takes the [`Event`]s recorded since the last time they were drained.
    pub fn drain_events(&mut self) -> Drain<'_, Event> {
        self.journal.drain(..)
    }

    /// Stops recording [`Event`]s for as long as the returned guard lives.
    pub fn mute(&mut self) -> Muted<'_> {
        self.muted += 1;
        Muted(self)
    }

    /// Whether [`Event`]s are currently not being recorded.
    pub fn is_muted(&self) -> bool {
        self.muted > 0
    }

    fn notify(&mut self, event: Event) {
        if !self.is_muted() {
            self.journal.push(event);
        }
    }

    pub(crate) fn apply(&mut self, m: Mutation) -> Result<Undo, UnknownPiece> {
        match m {
            Mutation::Remove(piece) => {
                let whence = self.remove(piece)?;
                Ok(Undo::Remove { piece, whence })
            }

            Mutation::Relocate(piece, whither) => {
                let moves = self.piece(piece)?.moves();
                let displaced = self[whither].filter(|&d| d != piece);
                let whence = self.relocate(piece, whither)?;
                Ok(Undo::Relocate {
                    piece,
                    whence,
                    displaced,
                    moves,
                })
            }
        }
    }

    pub(crate) fn revert(&mut self, undo: Undo) {
        match undo {
            Undo::Remove { piece, whence } => {
                self.grid[whence as usize] = Some(piece);
                self.placements[piece.index()] = Some(whence);
            }

            Undo::Relocate {
                piece,
                whence,
                displaced,
                moves,
            } => {
                if let Some(whither) = self.placements[piece.index()].take() {
                    self.grid[whither as usize] = displaced;
                    if let Some(d) = displaced {
                        self.placements[d.index()] = Some(whither);
                    }
                }

                self.grid[whence as usize] = Some(piece);
                self.placements[piece.index()] = Some(whence);
                self.pieces[piece.index()].set_moves(moves);
            }
        }
    }
}

impl Index<Square> for Board {
    type Output = Option<PieceId>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.grid[sq as usize]
    }
}

impl fmt::Display for Board {
    /// Piece placement in the style of the FEN notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            let mut skip = 0;
            for file in File::iter() {
                match self.piece_at(Square::new(file, rank)) {
                    None => skip += 1,
                    Some(p) => {
                        if skip > 0 {
                            write!(f, "{}", skip)?;
                            skip = 0;
                        }

                        write!(f, "{}", p)?;
                    }
                }
            }

            if skip > 0 {
                write!(f, "{}", skip)?;
            }

            if rank > Rank::First {
                f.write_char('/')?;
            }
        }

        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses the piece placement field of the FEN notation, all pieces unmoved.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = Vec::from_iter(s.split('/'));
        if rows.len() != 8 {
            return Err(ParseBoardError::InvalidRankCount);
        }

        let mut board = Board::empty();
        for (rank, row) in Rank::iter().rev().zip(rows) {
            let mut file = 0i8;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file = file.saturating_add(skip as i8);
                    continue;
                }

                let role: Role = c
                    .to_ascii_lowercase()
                    .to_string()
                    .parse()
                    .map_err(|_| ParseBoardError::InvalidPiece(c))?;

                let team = match c.is_ascii_uppercase() {
                    true => Team::White,
                    false => Team::Black,
                };

                let f = File::try_new(file).ok_or(ParseBoardError::InvalidRank(rank))?;
                board.spawn(role, team, Square::new(f, rank));
                file += 1;
            }

            if file != 8 {
                return Err(ParseBoardError::InvalidRank(rank));
            }
        }

        Ok(board)
    }
}

/// A [`Board`] that doesn't record [`Event`]s.
#[derive(Debug)]
pub struct Muted<'a>(&'a mut Board);

impl Deref for Muted<'_> {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl DerefMut for Muted<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0
    }
}

impl Drop for Muted<'_> {
    fn drop(&mut self) {
        self.0.muted -= 1;
    }
}
