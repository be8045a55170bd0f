//! Reader for the line-oriented machine text, built on the `pest` grammar in
//! `grammar.pest`. The format carries the initial and accept labels plus the
//! transition table; the title and halt label are not part of it and come back
//! as their defaults.

use crate::machine::Machine;
use crate::types::{Direction, MachineError, Reaction, Symbol, TransitionKey, BLANK_SYMBOL};
use pest::iterators::Pair;
use pest::Parser as PestParser;
use pest_derive::Parser as PestParser;

/// Derives the parser for the machine text grammar in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct MachineTextParser;

/// Parses machine text into a [`Machine`].
///
/// The two header lines must come first, `init:` then `accept:`. Blank lines
/// and lines starting with `//` are separators. Each transition is a key line
/// `state,symbol` followed by a reaction line `state,symbol,specifier`; field
/// counts are strict, and an unknown direction specifier is rejected by name.
pub fn parse(input: &str) -> Result<Machine, MachineError> {
    let root = MachineTextParser::parse(Rule::machine, input.trim())
        .map_err(|e| MachineError::Format(Box::new(e)))?
        .next()
        .unwrap();

    let mut machine = Machine::new();
    for pair in root.into_inner() {
        match pair.as_rule() {
            Rule::init => {
                let state = inner_text(pair);
                machine.set_initial(&state);
            }
            Rule::accept => {
                let state = inner_text(pair);
                machine.set_accept(&state);
            }
            Rule::entry => {
                let (key, reaction) = parse_entry(pair)?;
                machine.add_transition(key, reaction);
            }
            _ => {} // EOI
        }
    }

    Ok(machine)
}

/// Parses one two-line entry into a keyed reaction.
fn parse_entry(pair: Pair<Rule>) -> Result<(TransitionKey, Reaction), MachineError> {
    let mut lines = pair.into_inner();

    // key: state ~ symbol
    let mut key_fields = lines.next().unwrap().into_inner();
    let from_state = key_fields.next().unwrap().as_str().to_owned();
    let from_symbol = parse_symbol(key_fields.next().unwrap());

    // reaction: state ~ symbol ~ specifier
    let mut reaction_fields = lines.next().unwrap().into_inner();
    let next_state = reaction_fields.next().unwrap().as_str().to_owned();
    let write = parse_symbol(reaction_fields.next().unwrap());
    let specifier = parse_symbol(reaction_fields.next().unwrap());
    let direction = Direction::from_specifier(specifier)?;

    Ok((
        (from_state, from_symbol),
        Reaction {
            next_state,
            write,
            direction,
        },
    ))
}

/// Extracts the single character of a `symbol` or `specifier` pair.
fn parse_symbol(pair: Pair<Rule>) -> Symbol {
    pair.as_str().chars().next().unwrap_or(BLANK_SYMBOL)
}

/// Extracts the state label inside a header pair.
fn inner_text(pair: Pair<Rule>) -> String {
    pair.into_inner()
        .next()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_default()
}
