//! The machine-composition algebra: sequential concatenation, transition-table
//! union, and loops, all closed over [`Machine`].
//!
//! Every operator takes its operands by reference and returns a fresh machine;
//! nothing here mutates an input. Disjointness of the combined state spaces
//! rests entirely on title prefixing: concatenation prefixes each operand by
//! its own title, so operands must carry distinct titles. Union deliberately
//! skips the renaming and is used when the caller wants the overlap.

use crate::machine::Machine;
use crate::types::{Direction, MachineError, Reaction, Symbol};

/// Loop-check state introduced by [`repeat`].
const CHECK_STATE: &str = "check";
/// Loop-exit state introduced by [`repeat`]; it becomes the loop's accept.
const BREAK_STATE: &str = "break";

/// Which way the guard of a [`repeat`] loop cuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatVariant {
    /// Rerun the body while the guard symbol is under the head.
    DoWhile,
    /// Rerun the body until the guard symbol is under the head.
    DoUntil,
}

/// Runs `first` to acceptance, then `second` on the tape `first` left behind.
///
/// Both operands are embedded prefixed by their own titles, the accept state
/// of the first is turned into a through-state holding into the initial state
/// of the second, and the tables are merged. The result starts at the first
/// operand's initial state and accepts at the second's accept state.
pub fn concat(first: &Machine, second: &Machine, alphabet: &[Symbol], title: &str) -> Machine {
    let mut result = first.prefixed();
    let second = second.prefixed();

    let joint = result.accept_state().to_owned();
    result.redirect_state(&joint, second.initial_state(), alphabet);
    result.add_transitions(
        second
            .transitions()
            .iter()
            .map(|(key, reaction)| (key.clone(), reaction.clone())),
    );
    result.set_accept(second.accept_state());
    result.set_title(title);
    result
}

/// Sequential composition of any number of machines: a left fold of
/// [`concat`] seeded with the prefixed first element. A single-element
/// sequence therefore yields a prefixed, retitled copy of that element.
pub fn multiconcat(
    machines: &[Machine],
    alphabet: &[Symbol],
    title: &str,
) -> Result<Machine, MachineError> {
    let (first, rest) = machines
        .split_first()
        .ok_or(MachineError::EmptyComposition("multiconcat"))?;

    let mut result = first.prefixed();
    result.set_title(title);
    for machine in rest {
        result = concat(&result, machine, alphabet, title);
    }
    Ok(result)
}

/// Merges the transition tables of all machines into the first one, without
/// renaming and without touching accept states. The result inherits `initial`
/// and `accept` from the first machine.
///
/// Callers are expected to have disambiguated the state spaces already,
/// either by prefixing (concat sub-constructions) or by agreeing on shared
/// entry/exit labels, as the sequence recognizers do.
pub fn multiunion(machines: &[Machine], title: &str) -> Result<Machine, MachineError> {
    let (first, rest) = machines
        .split_first()
        .ok_or(MachineError::EmptyComposition("multiunion"))?;

    let mut result = first.clone();
    for machine in rest {
        result.add_transitions(
            machine
                .transitions()
                .iter()
                .map(|(key, reaction)| (key.clone(), reaction.clone())),
        );
    }
    result.set_title(title);
    Ok(result)
}

/// Loops `body`, deciding at a guard check whether to run another iteration.
///
/// The body is embedded prefixed; its accept is redirected to a fresh `check`
/// state, and `check` routes every symbol either back into the body or out to
/// a fresh `break` state, with the single `(check, guard)` entry overridden
/// the other way. The machine enters at `check`, so zero iterations are
/// possible: a `DoUntil` loop accepts immediately when the input already sits
/// on the guard, a `DoWhile` loop when it does not.
///
/// The override must come after the blanket redirect; the redirect replaces
/// whatever is installed under `(check, guard)`.
pub fn repeat(
    body: &Machine,
    variant: RepeatVariant,
    guard: Symbol,
    alphabet: &[Symbol],
    name: &str,
) -> Machine {
    let mut result = body.prefixed();
    result.set_title(name);

    let body_initial = result.initial_state().to_owned();
    let body_accept = result.accept_state().to_owned();

    result.redirect_state(&body_accept, CHECK_STATE, alphabet);
    match variant {
        RepeatVariant::DoUntil => {
            result.redirect_state(CHECK_STATE, &body_initial, alphabet);
            result.add_transition(
                (CHECK_STATE.to_owned(), guard),
                Reaction::new(BREAK_STATE, guard, Direction::Hold),
            );
        }
        RepeatVariant::DoWhile => {
            result.redirect_state(CHECK_STATE, BREAK_STATE, alphabet);
            result.add_transition(
                (CHECK_STATE.to_owned(), guard),
                Reaction::new(body_initial, guard, Direction::Hold),
            );
        }
    }

    result.set_initial(CHECK_STATE);
    result.set_accept(BREAK_STATE);
    result
}
