use crate::util::Integer;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::ops::Not;
use test_strategy::Arbitrary;

/// One of the two sides of a chess game.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Arbitrary, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Team {
    #[display(fmt = "white")]
    White,
    #[display(fmt = "black")]
    Black,
}

impl Team {
    /// Whether the other team is an opponent of this one.
    #[inline(always)]
    pub fn is_hostile_to(self, other: Team) -> bool {
        self != other
    }
}

unsafe impl Integer for Team {
    type Repr = u8;
    const MIN: Self::Repr = Team::White as _;
    const MAX: Self::Repr = Team::Black as _;
}

impl Not for Team {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        match self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn team_implements_not_operator(t: Team) {
        assert_eq!(!!t, t);
    }

    #[proptest]
    fn team_is_hostile_only_to_the_opponent(t: Team) {
        assert!(t.is_hostile_to(!t));
        assert!(!t.is_hostile_to(t));
    }

    #[test]
    fn there_are_exactly_two_teams() {
        assert_eq!(Vec::from_iter(Team::iter()), vec![Team::White, Team::Black]);
    }
}
