use crate::chess::{Bitboard, Role, Square, Team};

/// How a [`Pattern`] treats the squares it steps on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Reach {
    /// Empty squares and the first hostile occupant in each direction.
    Any,
    /// Empty squares only.
    Quiet,
    /// The first hostile occupant in each direction only.
    Capture,
}

/// A family of directional offsets walked up to a step limit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Pattern {
    offsets: &'static [(i8, i8)],
    limit: u8,
    reach: Reach,
}

static KNIGHT: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

static BISHOP: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

static ROOK: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

static ROYAL: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

static PAWN_ADVANCE: [[(i8, i8); 1]; 2] = [[(0, 1)], [(0, -1)]];

static PAWN_CAPTURE: [[(i8, i8); 2]; 2] = [[(-1, 1), (1, 1)], [(-1, -1), (1, -1)]];

impl Pattern {
    /// The farthest a sliding piece ever travels along one direction.
    pub const SLIDE: u8 = 7;

    /// The movement pattern of a [`Role`].
    ///
    /// Pawns advance two squares on their `first` move.
    pub fn movement(role: Role, team: Team, first: bool) -> Self {
        let (offsets, limit, reach): (&'static [_], _, _) = match role {
            Role::Pawn => (&PAWN_ADVANCE[team as usize][..], 1 + first as u8, Reach::Quiet),
            Role::Knight => (&KNIGHT[..], 1, Reach::Any),
            Role::Bishop => (&BISHOP[..], Self::SLIDE, Reach::Any),
            Role::Rook => (&ROOK[..], Self::SLIDE, Reach::Any),
            Role::Queen => (&ROYAL[..], Self::SLIDE, Reach::Any),
            Role::King => (&ROYAL[..], 1, Reach::Any),
        };

        Pattern {
            offsets,
            limit,
            reach,
        }
    }

    /// The capture pattern of a [`Role`].
    ///
    /// Except for pawns, it follows the same directions as the movement pattern.
    pub fn capture(role: Role, team: Team) -> Self {
        match role {
            Role::Pawn => Pattern {
                offsets: &PAWN_CAPTURE[team as usize][..],
                limit: 1,
                reach: Reach::Capture,
            },

            _ => Pattern {
                reach: Reach::Capture,
                ..Self::movement(role, team, false)
            },
        }
    }

    /// The directions this pattern steps along.
    pub fn offsets(&self) -> &'static [(i8, i8)] {
        self.offsets
    }

    /// How many steps this pattern takes at most along each direction.
    pub fn limit(&self) -> u8 {
        self.limit
    }

    /// How this pattern treats occupied squares.
    pub fn reach(&self) -> Reach {
        self.reach
    }

    /// The squares reached by a piece of some [`Team`] following this pattern.
    ///
    /// A walk stops at the first occupied square, which is included only if it may be captured.
    pub fn walk<F>(&self, whence: Square, team: Team, occupant: F) -> Bitboard
    where
        F: Fn(Square) -> Option<Team>,
    {
        let mut bitboard = Bitboard::empty();

        for &(df, dr) in self.offsets {
            let mut sq = whence;
            for _ in 0..self.limit {
                let Some(next) = sq.offset(df, dr) else {
                    break;
                };

                match occupant(next) {
                    None if self.reach != Reach::Capture => bitboard = bitboard.with(next),
                    None => {}
                    Some(t) => {
                        if t.is_hostile_to(team) && self.reach != Reach::Quiet {
                            bitboard = bitboard.with(next);
                        }

                        break;
                    }
                }

                sq = next;
            }
        }

        bitboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::Perspective;
    use test_strategy::proptest;

    fn nobody(_: Square) -> Option<Team> {
        None
    }

    #[proptest]
    fn capture_pattern_never_reaches_empty_squares(r: Role, t: Team, sq: Square) {
        assert_eq!(Pattern::capture(r, t).walk(sq, t, nobody), Bitboard::empty());
    }

    #[proptest]
    fn walk_never_reaches_friendly_squares(r: Role, t: Team, sq: Square, first: bool) {
        let friendly = |_: Square| Some(t);
        assert_eq!(Pattern::movement(r, t, first).walk(sq, t, friendly), Bitboard::empty());
        assert_eq!(Pattern::capture(r, t).walk(sq, t, friendly), Bitboard::empty());
    }

    #[proptest]
    fn walk_never_reaches_origin(r: Role, t: Team, sq: Square, first: bool) {
        assert!(!Pattern::movement(r, t, first).walk(sq, t, nobody).contains(sq));
    }

    #[proptest]
    fn capture_pattern_equals_movement_except_for_pawns(
        #[filter(#r != Role::Pawn)] r: Role,
        t: Team,
    ) {
        let m = Pattern::movement(r, t, false);
        let c = Pattern::capture(r, t);
        assert_eq!(m.offsets(), c.offsets());
        assert_eq!(m.limit(), c.limit());
        assert_eq!(c.reach(), Reach::Capture);
    }

    #[test]
    fn knight_in_the_center_reaches_eight_squares() {
        let p = Pattern::movement(Role::Knight, Team::White, false);
        assert_eq!(p.walk(Square::D4, Team::White, nobody).len(), 8);
    }

    #[test]
    fn knight_in_the_corner_reaches_two_squares() {
        let p = Pattern::movement(Role::Knight, Team::Black, false);
        assert_eq!(
            Vec::from_iter(p.walk(Square::A1, Team::Black, nobody)),
            vec![Square::C2, Square::B3]
        );
    }

    #[test]
    fn queen_in_the_center_reaches_twenty_seven_squares() {
        let p = Pattern::movement(Role::Queen, Team::White, false);
        assert_eq!(p.walk(Square::D4, Team::White, nobody).len(), 27);
    }

    #[test]
    fn rook_on_an_empty_board_reaches_fourteen_squares() {
        let p = Pattern::movement(Role::Rook, Team::White, false);
        assert_eq!(p.walk(Square::A1, Team::White, nobody).len(), 14);
    }

    #[test]
    fn king_reaches_adjacent_squares() {
        let p = Pattern::movement(Role::King, Team::White, false);
        assert_eq!(p.walk(Square::E4, Team::White, nobody).len(), 8);
        assert_eq!(p.walk(Square::E1, Team::White, nobody).len(), 5);
    }

    #[test]
    fn slider_stops_at_first_hostile_square_and_includes_it() {
        let occupant = |sq: Square| (sq == Square::A4).then_some(Team::Black);
        let p = Pattern::movement(Role::Rook, Team::White, false);
        let bb = p.walk(Square::A1, Team::White, occupant);
        assert!(bb.contains(Square::A4));
        assert!(!bb.contains(Square::A5));
        assert!(bb.contains(Square::H1));
    }

    #[test]
    fn slider_stops_before_first_friendly_square() {
        let occupant = |sq: Square| (sq == Square::C3).then_some(Team::White);
        let p = Pattern::movement(Role::Bishop, Team::White, false);
        let bb = p.walk(Square::A1, Team::White, occupant);
        assert_eq!(Vec::from_iter(bb), vec![Square::B2]);
    }

    #[proptest]
    fn pawn_advances_two_squares_only_on_its_first_move(t: Team) {
        let whence = Square::E2.perspective(t);
        let once = Square::E3.perspective(t);
        let twice = Square::E4.perspective(t);

        let first = Pattern::movement(Role::Pawn, t, true).walk(whence, t, nobody);
        assert_eq!(first, Bitboard::from_iter([once, twice]));

        let later = Pattern::movement(Role::Pawn, t, false).walk(whence, t, nobody);
        assert_eq!(later, once.bitboard());
    }

    #[proptest]
    fn pawn_advance_is_blocked_by_any_piece(t: Team, blocker: Team) {
        let whence = Square::D2.perspective(t);
        let occupant = |sq: Square| (sq == Square::D3.perspective(t)).then_some(blocker);
        let p = Pattern::movement(Role::Pawn, t, true);
        assert_eq!(p.walk(whence, t, occupant), Bitboard::empty());
    }

    #[proptest]
    fn pawn_captures_diagonally_forward(t: Team) {
        let whence = Square::D4.perspective(t);
        let occupant = |_: Square| Some(!t);
        let bb = Pattern::capture(Role::Pawn, t).walk(whence, t, occupant);
        assert_eq!(
            bb,
            Bitboard::from_iter([Square::C5.perspective(t), Square::E5.perspective(t)])
        );
    }
}
