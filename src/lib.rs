//! This crate provides a deterministic single-tape Turing machine simulator
//! together with an algebra for composing machines: small named machines are
//! prefixed, redirected, concatenated, unioned and looped into larger ones,
//! and a line-oriented textual format round-trips them through files.

pub mod builders;
pub mod compose;
pub mod encoder;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the machine builders: movers, finders, consumers and sequence recognizers.
pub use builders::{consumer, expect, finder, mover, union_of_sequences};
/// Re-exports the composition operators and the loop variant selector.
pub use compose::{concat, multiconcat, multiunion, repeat, RepeatVariant};
/// Re-exports the textual encoder.
pub use encoder::encode;
/// Re-exports the `MachineLoader` struct from the loader module.
pub use loader::MachineLoader;
/// Re-exports the `Machine` struct from the machine module.
pub use machine::Machine;
/// Re-exports the textual parser.
pub use parser::parse;
/// Re-exports the core value types, default labels and the error enum.
pub use types::{
    Direction, MachineError, Reaction, State, Status, Symbol, Table, TransitionKey, BLANK_SYMBOL,
    DEFAULT_ACCEPT_STATE, DEFAULT_HALT_STATE, DEFAULT_INITIAL_STATE, DEFAULT_TITLE,
};
