use crate::chess::{File, Rank, Square};
use crate::util::Integer;
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign};
use derive_more::{Constructor, Deref, Not};
use std::fmt::{self, Write};

/// A set of squares on a chess board.
#[derive(
    Default,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Constructor,
    Deref,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(transparent)]
pub struct Bitboard(u64);

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('\n')?;
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                let sq = Square::new(file, rank);
                f.write_char(if self.contains(sq) { '■' } else { '◻' })?;
                f.write_char(if file < File::H { ' ' } else { '\n' })?;
            }
        }

        Ok(())
    }
}

impl Bitboard {
    /// An empty board.
    #[inline(always)]
    pub const fn empty() -> Self {
        Bitboard(0)
    }

    /// A full board.
    #[inline(always)]
    pub const fn full() -> Self {
        Bitboard(0xFFFFFFFFFFFFFFFF)
    }

    /// Fills out squares on a bitboard.
    ///
    /// Starting from a square, fills out the squares by stepping on the board in each direction.
    /// Movement in a direction stops when an occupied square is reached.
    ///
    /// # Example
    /// ```
    /// # use lib::chess::*;
    /// assert_eq!(
    ///     Vec::from_iter(Bitboard::fill(Square::E2, &[(-1, 2), (1, -1)], Square::C6.bitboard())),
    ///     vec![Square::F1, Square::E2, Square::D4, Square::C6]
    /// );
    /// ```
    pub fn fill(sq: Square, steps: &[(i8, i8)], occupied: Bitboard) -> Bitboard {
        let mut bitboard = sq.bitboard();
        for &(df, dr) in steps {
            let mut next = sq.offset(df, dr);
            while let Some(s) = next {
                bitboard = bitboard.with(s);
                next = if occupied.contains(s) {
                    None
                } else {
                    s.offset(df, dr)
                };
            }
        }

        bitboard
    }

    /// Bitboard with squares in the open segment between two squares.
    ///
    /// The segment is empty unless both squares share a file, a rank or a diagonal.
    ///
    /// # Example
    /// ```
    /// # use lib::chess::*;
    /// assert_eq!(
    ///     Vec::from_iter(Bitboard::segment(Square::B4, Square::E1)),
    ///     vec![Square::D2, Square::C3]
    /// );
    /// ```
    pub fn segment(whence: Square, whither: Square) -> Self {
        let df = whither.file() - whence.file();
        let dr = whither.rank() - whence.rank();
        if (df, dr) != (0, 0) && (df == 0 || dr == 0 || df.abs() == dr.abs()) {
            let steps = [(df.signum(), dr.signum())];
            let bb = Bitboard::fill(whence, &steps, whither.bitboard());
            bb.without(whence).without(whither)
        } else {
            Bitboard::empty()
        }
    }

    /// The number of [`Square`]s in the set.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as _
    }

    /// Whether the board is empty.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this [`Square`] is in the set.
    #[inline(always)]
    pub fn contains(&self, sq: Square) -> bool {
        !sq.bitboard().intersection(*self).is_empty()
    }

    /// Adds a [`Square`] to this bitboard.
    #[inline(always)]
    pub fn with(&self, sq: Square) -> Self {
        sq.bitboard().union(*self)
    }

    /// Removes a [`Square`]s from this bitboard.
    #[inline(always)]
    pub fn without(&self, sq: Square) -> Self {
        sq.bitboard().inverse().intersection(*self)
    }

    /// The set of [`Square`]s not in this bitboard.
    #[inline(always)]
    pub const fn inverse(&self) -> Self {
        Bitboard(!self.0)
    }

    /// The set of [`Square`]s in both bitboards.
    #[inline(always)]
    pub const fn intersection(&self, bb: Bitboard) -> Self {
        Bitboard(self.0 & bb.0)
    }

    /// The set of [`Square`]s in either bitboard.
    #[inline(always)]
    pub const fn union(&self, bb: Bitboard) -> Self {
        Bitboard(self.0 | bb.0)
    }

    /// An iterator over the [`Square`]s in this bitboard.
    #[inline(always)]
    pub fn iter(&self) -> Squares {
        Squares::new(*self)
    }
}

impl From<File> for Bitboard {
    #[inline(always)]
    fn from(f: File) -> Self {
        f.bitboard()
    }
}

impl From<Rank> for Bitboard {
    #[inline(always)]
    fn from(r: Rank) -> Self {
        r.bitboard()
    }
}

impl From<Square> for Bitboard {
    #[inline(always)]
    fn from(sq: Square) -> Self {
        sq.bitboard()
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        iter.into_iter().fold(Bitboard::empty(), |bb, sq| bb.with(sq))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = Squares;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        Squares::new(self)
    }
}

/// An iterator over the [`Square`]s in a [`Bitboard`].
#[derive(Debug, Constructor)]
pub struct Squares(Bitboard);

impl Iterator for Squares {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0.is_empty() {
            None
        } else {
            let sq = <Square as Integer>::new(self.0.trailing_zeros() as _);
            self.0 ^= sq.bitboard();
            Some(sq)
        }
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl ExactSizeIterator for Squares {
    #[inline(always)]
    fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn empty_constructs_board_with_no_squares() {
        assert_eq!(Bitboard::empty().iter().count(), 0);
    }

    #[test]
    fn full_constructs_board_with_all_squares() {
        assert_eq!(Bitboard::full().iter().count(), 64);
    }

    #[proptest]
    fn segment_does_not_contain_whence(a: Square, b: Square) {
        assert!(!Bitboard::segment(a, b).contains(a));
    }

    #[proptest]
    fn segment_does_not_contain_whither(a: Square, b: Square) {
        assert!(!Bitboard::segment(a, b).contains(b));
    }

    #[proptest]
    fn segment_is_symmetric(a: Square, b: Square) {
        assert_eq!(Bitboard::segment(a, b), Bitboard::segment(b, a));
    }

    #[test]
    fn segment_between_castling_squares() {
        assert_eq!(
            Vec::from_iter(Bitboard::segment(Square::E1, Square::A1)),
            vec![Square::B1, Square::C1, Square::D1]
        );

        assert_eq!(
            Vec::from_iter(Bitboard::segment(Square::E8, Square::H8)),
            vec![Square::F8, Square::G8]
        );
    }

    #[test]
    fn segment_is_empty_for_squares_not_in_line() {
        assert_eq!(Bitboard::segment(Square::A1, Square::B3), Bitboard::empty());
    }

    #[test]
    fn fill_stops_at_occupied_squares() {
        let bb = Bitboard::fill(Square::A1, &[(0, 1)], Square::A3.bitboard());
        assert_eq!(Vec::from_iter(bb), vec![Square::A1, Square::A2, Square::A3]);
    }

    #[proptest]
    fn len_returns_number_of_squares_on_the_board(bb: Bitboard) {
        assert_eq!(bb.len() as u32, bb.count_ones());
    }

    #[proptest]
    #[allow(clippy::len_zero)]
    fn is_empty_returns_whether_there_are_squares_on_the_board(bb: Bitboard) {
        assert_eq!(bb.is_empty(), bb.len() == 0);
    }

    #[proptest]
    fn contains_checks_whether_square_is_on_the_board(bb: Bitboard) {
        for sq in bb {
            assert!(bb.contains(sq));
        }
    }

    #[proptest]
    fn with_adds_square_to_set(bb: Bitboard, sq: Square) {
        assert!(bb.with(sq).contains(sq));
    }

    #[proptest]
    fn without_removes_square_to_set(bb: Bitboard, sq: Square) {
        assert!(!bb.without(sq).contains(sq));
    }

    #[proptest]
    fn inverse_returns_squares_not_in_set(bb: Bitboard) {
        let pp = bb.inverse();
        for sq in Square::iter() {
            assert_ne!(bb.contains(sq), pp.contains(sq));
        }
    }

    #[proptest]
    fn intersection_returns_squares_in_both_sets(a: Bitboard, b: Bitboard) {
        let c = a.intersection(b);
        for sq in Square::iter() {
            assert_eq!(c.contains(sq), a.contains(sq) && b.contains(sq));
        }
    }

    #[proptest]
    fn union_returns_squares_in_either_set(a: Bitboard, b: Bitboard) {
        let c = a.union(b);
        for sq in Square::iter() {
            assert_eq!(c.contains(sq), a.contains(sq) || b.contains(sq));
        }
    }

    #[proptest]
    fn can_iterate_over_squares_in_a_bitboard(bb: Bitboard, sq: Square) {
        let v = Vec::from_iter(bb);
        assert_eq!(bb.iter().len(), v.len());
        assert_eq!(bb.contains(sq), v.contains(&sq));
    }

    #[proptest]
    fn collecting_squares_is_the_inverse_of_iterating(bb: Bitboard) {
        assert_eq!(bb.iter().collect::<Bitboard>(), bb);
    }

    #[proptest]
    fn bitboard_can_be_created_from_file(f: File) {
        assert_eq!(Bitboard::from(f), f.bitboard());
    }

    #[proptest]
    fn bitboard_can_be_created_from_rank(r: Rank) {
        assert_eq!(Bitboard::from(r), r.bitboard());
    }

    #[proptest]
    fn bitboard_can_be_created_from_square(sq: Square) {
        assert_eq!(Bitboard::from(sq), sq.bitboard());
    }
}
