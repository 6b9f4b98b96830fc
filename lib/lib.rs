/// Chess domain types.
pub mod chess;
/// The rules of the game.
pub mod rules;
/// Assorted utilities.
pub mod util;
