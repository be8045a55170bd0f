//! Parameterised builders that lower small intents (move N cells, search for
//! a symbol, consume a symbol, match a sequence) into plain transition
//! tables. Nothing here is primitive: every builder goes through the same
//! `Machine` surface and composition operators a client would use.
//!
//! Builders assume well-formed inputs (a usable alphabet, nonempty sequences,
//! one distance per gap) and do not re-validate them.

use crate::compose::{concat, multiunion};
use crate::machine::Machine;
use crate::types::{
    Direction, MachineError, Reaction, Symbol, DEFAULT_ACCEPT_STATE, DEFAULT_INITIAL_STATE,
};

/// The looping state of a [`finder`].
const SEARCH_STATE: &str = "search";

/// A straight-line machine that moves the head `cells` cells in `direction`,
/// leaving every symbol as it was. States are `"0"` through `"cells"`; the
/// machine starts at `"0"` and accepts at `"cells"`.
pub fn mover(cells: usize, direction: Direction, alphabet: &[Symbol]) -> Machine {
    let mut machine = Machine::new();
    machine.set_title("Mover");
    for step in 0..cells {
        for &symbol in alphabet {
            machine.add_transition(
                (step.to_string(), symbol),
                Reaction::new((step + 1).to_string(), symbol, direction),
            );
        }
    }
    machine.set_initial("0");
    machine.set_accept(&cells.to_string());
    machine
}

/// An unbounded search: the head walks in `direction` until `target` is under
/// it, then the machine accepts in place. Symbols other than `target` outside
/// the alphabet reject, since no transition covers them.
pub fn finder(target: Symbol, direction: Direction, alphabet: &[Symbol]) -> Machine {
    let mut machine = Machine::new();
    machine.set_title("Finder");
    let accept = machine.accept_state().to_owned();
    for &symbol in alphabet {
        let reaction = if symbol == target {
            Reaction::new(accept.clone(), symbol, Direction::Hold)
        } else {
            Reaction::new(SEARCH_STATE, symbol, direction)
        };
        machine.add_transition((SEARCH_STATE.to_owned(), symbol), reaction);
    }
    machine.set_initial(SEARCH_STATE);
    machine
}

/// A one-symbol matcher: accepts exactly `target` under the head, moving
/// `direction` past it. Anything else rejects.
pub fn consumer(target: Symbol, direction: Direction) -> Machine {
    let mut machine = Machine::new();
    machine.set_title("Consumer");
    let entry = machine.initial_state().to_owned();
    let accept = machine.accept_state().to_owned();
    machine.add_transition((entry, target), Reaction::new(accept, target, direction));
    machine
}

/// A linear recognizer for a fixed, possibly sparse symbol sequence.
///
/// The machine consumes `sequence` in `direction`, advancing `distances[i]`
/// cells between match *i* and match *i+1* (`distances` holds one entry per
/// gap, each at least 1; distance 1 means adjacent cells). Internally it is a
/// chain of carriers, `concat(mover(distance - 1), consumer(symbol))`, each
/// prefixed under a title derived from `title`.
///
/// The recognizer keeps the default initial and accept labels: a single entry
/// transition on the first symbol holds into the chain, and the chain's accept
/// is redirected back out. Sibling recognizers built with distinct titles and
/// distinct first symbols can therefore be merged with a plain union.
pub fn expect(
    sequence: &str,
    direction: Direction,
    distances: &[usize],
    alphabet: &[Symbol],
    title: &str,
) -> Machine {
    let symbols: Vec<Symbol> = sequence.chars().collect();

    let mut parts = Vec::with_capacity(symbols.len());
    let mut lead = consumer(symbols[0], direction);
    lead.set_title(&format!("{}.0", title));
    parts.push(lead);

    for (index, &symbol) in symbols.iter().enumerate().skip(1) {
        let carrier = concat(
            &mover(distances[index - 1] - 1, direction, alphabet),
            &consumer(symbol, direction),
            alphabet,
            &format!("{}.{}", title, index),
        );
        parts.push(carrier);
    }

    let mut seed = parts[0].prefixed();
    seed.set_title(title);
    let mut machine = parts[1..]
        .iter()
        .fold(seed, |chain, part| concat(&chain, part, alphabet, title));

    let chain_initial = machine.initial_state().to_owned();
    let chain_accept = machine.accept_state().to_owned();
    machine.redirect_state(&chain_accept, DEFAULT_ACCEPT_STATE, alphabet);
    machine.add_transition(
        (DEFAULT_INITIAL_STATE.to_owned(), symbols[0]),
        Reaction::new(chain_initial, symbols[0], Direction::Hold),
    );
    machine.set_initial(DEFAULT_INITIAL_STATE);
    machine.set_accept(DEFAULT_ACCEPT_STATE);
    machine
}

/// A recognizer accepting any one of several fixed sequences of a common
/// shape: the plain union of one [`expect`] per sequence, each under a
/// distinct derived title. The sequences must start with pairwise distinct
/// symbols, which keeps the shared entry state deterministic.
pub fn union_of_sequences(
    sequences: &[&str],
    direction: Direction,
    distances: &[usize],
    alphabet: &[Symbol],
    title: &str,
) -> Result<Machine, MachineError> {
    let recognizers: Vec<Machine> = sequences
        .iter()
        .enumerate()
        .map(|(index, sequence)| {
            expect(
                sequence,
                direction,
                distances,
                alphabet,
                &format!("{}-{}", title, index),
            )
        })
        .collect();

    multiunion(&recognizers, title)
}
