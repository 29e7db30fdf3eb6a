//! Prompt construction for the four ideation stages.
//!
//! Each builder is a pure function from the problem text and the caller's
//! idea history to a two-message conversation (developer instruction, then
//! user context). Nothing here talks to the network.

use std::fmt;
use std::str::FromStr;

pub mod render;
mod templates;

pub use templates::{decompose_problem, diagnose_problem, reframe_problem, suggest_solution};

/// Ideation stage, addressed on the wire by its window letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// "B": list the problems hidden in the description
    Decompose,
    /// "C": explain why the problems are hard
    Diagnose,
    /// "D": look at the problem from a new angle
    Reframe,
    /// "E": propose a solution
    Suggest,
}

impl Stage {
    pub fn window_id(self) -> &'static str {
        match self {
            Stage::Decompose => "B",
            Stage::Diagnose => "C",
            Stage::Reframe => "D",
            Stage::Suggest => "E",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.window_id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStage(pub String);

impl FromStr for Stage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" => Ok(Stage::Decompose),
            "C" => Ok(Stage::Diagnose),
            "D" => Ok(Stage::Reframe),
            "E" => Ok(Stage::Suggest),
            other => Err(UnknownStage(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Stage; 4] = [
        Stage::Decompose,
        Stage::Diagnose,
        Stage::Reframe,
        Stage::Suggest,
    ];

    #[test]
    fn window_ids_round_trip() {
        for stage in ALL {
            assert_eq!(stage.window_id().parse::<Stage>(), Ok(stage));
        }
    }

    #[test]
    fn unknown_tags_are_rejected() {
        assert_eq!("A".parse::<Stage>(), Err(UnknownStage("A".to_string())));
        assert!("".parse::<Stage>().is_err());
        assert!(" B".parse::<Stage>().is_err());
    }
}
