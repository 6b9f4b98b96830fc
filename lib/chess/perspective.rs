use crate::chess::Team;

/// Trait for types that can be seen from the opponent's perspective.
pub trait Perspective: Copy {
    /// Flips the perspective.
    fn flip(&self) -> Self;

    /// Sets the perspective to the side of the given [`Team`].
    #[inline(always)]
    fn perspective(&self, side: Team) -> Self {
        match side {
            Team::White => *self,
            Team::Black => self.flip(),
        }
    }
}
