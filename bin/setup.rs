use derive_more::{Display, Error, From};
use lib::chess::{Role, Square, Team};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use test_strategy::Arbitrary;

/// The reason why parsing the [`Setup`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse setup")]
pub struct ParseSetupError(ron::de::SpannedError);

/// How the pieces are laid out at the start of a game.
#[derive(Debug, Display, Default, Clone, Eq, PartialEq, Arbitrary, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "lowercase")]
pub enum Setup {
    /// The standard layout with white to move.
    #[default]
    #[display(fmt = "{}", "ron::ser::to_string(self).unwrap()")]
    Standard,

    /// Unmoved pieces on arbitrary squares.
    #[display(fmt = "{}", "ron::ser::to_string(self).unwrap()")]
    Custom {
        turn: Team,
        pieces: Vec<(Team, Role, Square)>,
    },
}

impl FromStr for Setup {
    type Err = ParseSetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}
