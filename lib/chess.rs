mod bitboard;
mod file;
mod outcome;
mod perspective;
mod piece;
mod promotion;
mod rank;
mod role;
mod square;
mod team;

pub use bitboard::*;
pub use file::*;
pub use outcome::*;
pub use perspective::*;
pub use piece::*;
pub use promotion::*;
pub use rank::*;
pub use role::*;
pub use square::*;
pub use team::*;
