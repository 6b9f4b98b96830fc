mod board;
mod catalog;
mod evaluator;
mod event;
mod game;
mod r#move;
mod sandbox;
mod special;

pub use board::*;
pub use catalog::*;
pub use event::*;
pub use game::*;
pub use r#move::*;
pub use sandbox::*;
