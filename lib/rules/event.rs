use crate::chess::{PieceId, Square};
use derive_more::Display;

/// A change to the board.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Event {
    #[display(fmt = "{} relocated from {} to {}", piece, whence, whither)]
    Relocated {
        piece: PieceId,
        whence: Square,
        whither: Square,
    },

    #[display(fmt = "{} removed from {}", piece, whence)]
    Removed { piece: PieceId, whence: Square },

    #[display(fmt = "{} promoted to {} on {}", pawn, piece, square)]
    Promoted {
        pawn: PieceId,
        piece: PieceId,
        square: Square,
    },
}

/// Trait for types that want to be told about changes to the board.
#[cfg_attr(test, mockall::automock)]
pub trait Observer {
    /// Called once for every [`Event`], in the order they happened.
    fn notify(&mut self, event: &Event);
}

impl<T: Observer + ?Sized> Observer for Box<T> {
    fn notify(&mut self, event: &Event) {
        (**self).notify(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use test_strategy::proptest;

    #[proptest]
    fn boxed_observer_forwards_events(e: Event) {
        let mut mock = MockObserver::new();
        mock.expect_notify().with(eq(e)).once().return_const(());
        let mut boxed: Box<dyn Observer> = Box::new(mock);
        boxed.notify(&e);
    }

    #[test]
    fn events_have_a_readable_description() {
        let e = Event::Relocated {
            piece: PieceId::from(3),
            whence: Square::E2,
            whither: Square::E4,
        };

        assert_eq!(e.to_string(), "#3 relocated from e2 to e4");
    }
}
