use std::mem::{size_of, transmute_copy};
use std::{iter::Map, ops::RangeInclusive};

/// Trait for types that can be represented by a contiguous range of primitive integers.
///
/// # Safety
///
/// Must only be implemented for types that can be safely transmuted to and from [`Integer::Repr`].
pub unsafe trait Integer: Copy {
    /// The equivalent primitive integer type.
    type Repr: Copy + Ord;

    /// The minimum repr.
    const MIN: Self::Repr;

    /// The maximum repr.
    const MAX: Self::Repr;

    /// Casts from [`Integer::Repr`].
    #[inline(always)]
    fn new(i: Self::Repr) -> Self {
        debug_assert!(Self::in_range(i));
        debug_assert_eq!(size_of::<Self>(), size_of::<Self::Repr>());
        unsafe { transmute_copy(&i) }
    }

    /// Casts from [`Integer::Repr`] if in range.
    #[inline(always)]
    fn try_new(i: Self::Repr) -> Option<Self> {
        if Self::in_range(i) {
            Some(Self::new(i))
        } else {
            None
        }
    }

    /// Casts to [`Integer::Repr`].
    #[inline(always)]
    fn get(self) -> Self::Repr {
        unsafe { transmute_copy(&self) }
    }

    /// Whether a value is in the range `(Self::MIN..=Self::MAX)`.
    #[inline(always)]
    fn in_range(i: Self::Repr) -> bool {
        Self::MIN <= i && i <= Self::MAX
    }

    /// An iterator over all values in the range [`Integer::MIN`]..=[`Integer::MAX`].
    #[inline(always)]
    #[allow(clippy::type_complexity)]
    fn iter() -> Map<RangeInclusive<Self::Repr>, fn(Self::Repr) -> Self>
    where
        RangeInclusive<Self::Repr>: Iterator<Item = Self::Repr>,
    {
        (Self::MIN..=Self::MAX).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[derive(Debug, Copy, Clone, Eq, PartialEq)]
    #[repr(i8)]
    enum Digit {
        Zero,
        One,
        Two,
    }

    unsafe impl Integer for Digit {
        type Repr = i8;
        const MIN: Self::Repr = Digit::Zero as _;
        const MAX: Self::Repr = Digit::Two as _;
    }

    #[test]
    fn iter_visits_every_value_in_order() {
        assert_eq!(
            Vec::from_iter(Digit::iter()),
            vec![Digit::Zero, Digit::One, Digit::Two]
        );
    }

    #[proptest]
    fn try_new_fails_out_of_range(#[filter(!(0..=2).contains(&#i))] i: i8) {
        assert_eq!(Digit::try_new(i), None);
    }

    #[proptest]
    fn getting_new_value_is_an_identity(#[strategy(0i8..=2)] i: i8) {
        assert_eq!(Digit::new(i).get(), i);
    }
}
