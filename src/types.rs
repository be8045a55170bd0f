//! Core value types shared across the crate: symbols, states, directions,
//! reactions, run statuses, default labels and the error enum.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::Rule;

/// The reserved blank symbol. It may appear on the tape but never in user input.
pub const BLANK_SYMBOL: char = '_';
/// Default label of the state a machine starts in.
pub const DEFAULT_INITIAL_STATE: &str = "qStart";
/// Default label of the accepting state.
pub const DEFAULT_ACCEPT_STATE: &str = "Y";
/// Default label of the neutral halting state.
pub const DEFAULT_HALT_STATE: &str = "H";
/// Default machine title, used as the prefix when a machine is embedded unchanged.
pub const DEFAULT_TITLE: &str = "MyMachine";

/// A state label.
pub type State = String;
/// A tape symbol.
pub type Symbol = char;
/// The `(state, symbol)` pair a transition is keyed by.
pub type TransitionKey = (State, Symbol);
/// A deterministic transition table: at most one reaction per key.
pub type Table = HashMap<TransitionKey, Reaction>;

/// The possible head motions after a transition fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one cell to the left.
    Left,
    /// Move the head one cell to the right.
    Right,
    /// Keep the head where it is.
    Hold,
}

lazy_static::lazy_static! {
    /// Direction to the single-character specifier used by the textual format.
    pub static ref DIRECTION_SPECIFIERS: HashMap<Direction, char> = [
        (Direction::Left, '<'),
        (Direction::Right, '>'),
        (Direction::Hold, '-'),
    ]
    .into_iter()
    .collect();

    /// Specifier back to direction; the inverse of [`DIRECTION_SPECIFIERS`].
    pub static ref SPECIFIER_DIRECTIONS: HashMap<char, Direction> = DIRECTION_SPECIFIERS
        .iter()
        .map(|(&direction, &specifier)| (specifier, direction))
        .collect();
}

impl Direction {
    /// Returns the textual specifier for this direction (`<`, `>` or `-`).
    pub fn specifier(&self) -> char {
        DIRECTION_SPECIFIERS[self]
    }

    /// Resolves a textual specifier back to a direction.
    pub fn from_specifier(specifier: char) -> Result<Self, MachineError> {
        SPECIFIER_DIRECTIONS
            .get(&specifier)
            .copied()
            .ok_or(MachineError::UnknownDirection(specifier))
    }
}

/// What a machine does when a transition fires: enter `next_state`, write
/// `write` into the cell under the head, then move the head in `direction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    /// The state the machine enters.
    pub next_state: State,
    /// The symbol written into the cell under the head.
    pub write: Symbol,
    /// Head motion applied after the write.
    pub direction: Direction,
}

impl Reaction {
    /// Creates a reaction.
    pub fn new(next_state: impl Into<State>, write: Symbol, direction: Direction) -> Self {
        Reaction {
            next_state: next_state.into(),
            write,
            direction,
        }
    }
}

/// The observable outcome of a single simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The machine took a step and may take another.
    Running,
    /// The machine entered its accept state.
    Accept,
    /// No transition was defined for the current `(state, symbol)` pair.
    Reject,
    /// The machine entered its halt state.
    Halt,
}

impl Status {
    /// Whether the simulation is over. Only `Running` is non-terminal.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Running)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Status::Running => "running",
            Status::Accept => "accepted",
            Status::Reject => "rejected",
            Status::Halt => "halted",
        };
        write!(f, "{}", text)
    }
}

/// Errors surfaced by the textual format, the loader and the composition
/// operators. An undefined transition at runtime is not an error; it shows up
/// as [`Status::Reject`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError {
    /// The machine text is malformed: missing or misordered headers, too few
    /// fields on a line, or an empty symbol field.
    #[error("machine text error: {0}")]
    Format(#[from] Box<pest::error::Error<Rule>>),
    /// A reaction line used a direction specifier outside `<`, `>`, `-`.
    #[error("unknown direction specifier '{0}'")]
    UnknownDirection(char),
    /// A composition operator was given no machines to compose.
    #[error("{0} requires at least one machine")]
    EmptyComposition(&'static str),
    /// A file could not be read or written.
    #[error("file error: {0}")]
    File(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        let left = Direction::Left;
        let hold = Direction::Hold;

        let left_json = serde_json::to_string(&left).unwrap();
        let hold_json = serde_json::to_string(&hold).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(hold_json, "\"Hold\"");

        let left_deserialized: Direction = serde_json::from_str(&left_json).unwrap();
        let hold_deserialized: Direction = serde_json::from_str(&hold_json).unwrap();

        assert_eq!(left, left_deserialized);
        assert_eq!(hold, hold_deserialized);
    }

    #[test]
    fn test_reaction_serialization_round_trip() {
        let reaction = Reaction::new("q1", 'x', Direction::Right);

        let json = serde_json::to_string(&reaction).unwrap();
        let deserialized: Reaction = serde_json::from_str(&json).unwrap();

        assert_eq!(reaction, deserialized);
    }

    #[test]
    fn test_specifier_mapping_is_bijective() {
        for (&direction, &specifier) in DIRECTION_SPECIFIERS.iter() {
            assert_eq!(Direction::from_specifier(specifier).unwrap(), direction);
            assert_eq!(direction.specifier(), specifier);
        }
        assert_eq!(DIRECTION_SPECIFIERS.len(), SPECIFIER_DIRECTIONS.len());
    }

    #[test]
    fn test_unknown_specifier() {
        let error = Direction::from_specifier('x').unwrap_err();
        assert_eq!(error, MachineError::UnknownDirection('x'));
        assert!(error.to_string().contains("unknown direction specifier"));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Accept.to_string(), "accepted");
        assert_eq!(Status::Reject.to_string(), "rejected");
        assert_eq!(Status::Halt.to_string(), "halted");
        assert_eq!(Status::Running.to_string(), "running");
    }

    #[test]
    fn test_only_running_is_non_terminal() {
        assert!(!Status::Running.is_terminal());
        assert!(Status::Accept.is_terminal());
        assert!(Status::Reject.is_terminal());
        assert!(Status::Halt.is_terminal());
    }
}
