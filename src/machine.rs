//! This module defines the `Machine` struct: a deterministic single-tape
//! Turing machine with a value-semantics transition table, the renaming and
//! redirection primitives the composition algebra is built from, and the
//! simulation loop over a two-sided lazily grown tape.

use crate::types::{
    Direction, Reaction, State, Status, Symbol, Table, TransitionKey, BLANK_SYMBOL,
    DEFAULT_ACCEPT_STATE, DEFAULT_HALT_STATE, DEFAULT_INITIAL_STATE, DEFAULT_TITLE,
};

/// A deterministic single-tape Turing machine.
///
/// A machine is an ordinary value: it is built up by adding transitions (by
/// hand, through a builder, or through the composition operators), cloned
/// freely, and only acquires run-state once [`Machine::load_input`] is called.
/// The tape is bi-infinite, stored as two growable halves that share index 0;
/// cells are materialized as blanks on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Machine {
    transitions: Table,
    initial: State,
    accept: State,
    halt: State,
    title: String,

    // Run-state, only meaningful after `load_input`.
    tape_right: Vec<Symbol>,
    tape_left: Vec<Symbol>,
    head: isize,
    current_state: State,
    step_count: usize,
}

impl Default for Machine {
    fn default() -> Self {
        Machine::new()
    }
}

impl Machine {
    /// Creates an empty machine with the default labels and title.
    pub fn new() -> Self {
        Machine {
            transitions: Table::new(),
            initial: DEFAULT_INITIAL_STATE.to_owned(),
            accept: DEFAULT_ACCEPT_STATE.to_owned(),
            halt: DEFAULT_HALT_STATE.to_owned(),
            title: DEFAULT_TITLE.to_owned(),
            tape_right: Vec::new(),
            tape_left: Vec::new(),
            head: 0,
            current_state: DEFAULT_INITIAL_STATE.to_owned(),
            step_count: 0,
        }
    }

    /// Creates a machine from any iterator of keyed reactions. Later entries
    /// win on duplicate keys, as with repeated [`Machine::add_transition`].
    pub fn from_transitions<I>(transitions: I) -> Self
    where
        I: IntoIterator<Item = (TransitionKey, Reaction)>,
    {
        let mut machine = Machine::new();
        machine.add_transitions(transitions);
        machine
    }

    /// Returns the transition table.
    pub fn transitions(&self) -> &Table {
        &self.transitions
    }

    /// Returns the label of the initial state.
    pub fn initial_state(&self) -> &str {
        &self.initial
    }

    /// Returns the label of the accepting state.
    pub fn accept_state(&self) -> &str {
        &self.accept
    }

    /// Returns the label of the neutral halting state.
    pub fn halt_state(&self) -> &str {
        &self.halt
    }

    /// Returns the machine title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the state the simulation is currently in.
    pub fn current_state(&self) -> &str {
        &self.current_state
    }

    /// Returns the signed position of the head. Cell 0 is where the head
    /// starts after `load_input`.
    pub fn head_index(&self) -> isize {
        self.head
    }

    /// Returns the number of steps taken since the last `load_input`.
    pub fn steps(&self) -> usize {
        self.step_count
    }

    /// Inserts a transition, replacing any previous reaction for the key.
    pub fn add_transition(&mut self, key: TransitionKey, reaction: Reaction) {
        self.transitions.insert(key, reaction);
    }

    /// Inserts every transition from the iterator, in order.
    pub fn add_transitions<I>(&mut self, transitions: I)
    where
        I: IntoIterator<Item = (TransitionKey, Reaction)>,
    {
        self.transitions.extend(transitions);
    }

    /// Renames the initial state label. Does not touch the table.
    pub fn set_initial(&mut self, name: &str) {
        self.initial = name.to_owned();
    }

    /// Renames the accepting state label. Does not touch the table.
    pub fn set_accept(&mut self, name: &str) {
        self.accept = name.to_owned();
    }

    /// Retitles the machine. The title is what `prefixed` uses as prefix.
    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_owned();
    }

    /// Applies `rename` to every state label in the machine: table keys,
    /// reaction next-states, and the initial/accept/halt labels. All renaming
    /// operations funnel through here so no occurrence can be missed.
    pub fn transform_states<F>(&mut self, rename: F)
    where
        F: Fn(&str) -> State,
    {
        let table = std::mem::take(&mut self.transitions);
        self.transitions = table
            .into_iter()
            .map(|((state, symbol), reaction)| {
                let reaction = Reaction {
                    next_state: rename(&reaction.next_state),
                    ..reaction
                };
                ((rename(&state), symbol), reaction)
            })
            .collect();
        self.initial = rename(&self.initial);
        self.accept = rename(&self.accept);
        self.halt = rename(&self.halt);
    }

    /// Returns a copy of the machine with every state label `q` renamed to
    /// `[prefix]q`. The title is preserved.
    pub fn prefix(&self, prefix: &str) -> Machine {
        let mut renamed = self.clone();
        renamed.transform_states(|state| format!("[{}]{}", prefix, state));
        renamed
    }

    /// Returns a copy of the machine prefixed by its own title. Machines with
    /// distinct titles therefore end up with disjoint state spaces.
    pub fn prefixed(&self) -> Machine {
        self.prefix(&self.title)
    }

    /// Installs, for every symbol of `alphabet`, the holding transition
    /// `(from, s) -> ((to, s), Hold)`. Existing entries under other keys are
    /// untouched; entries under `(from, s)` are replaced, so a later
    /// single-symbol override must come after the blanket redirect.
    pub fn redirect_state(&mut self, from: &str, to: &str, alphabet: &[Symbol]) {
        for &symbol in alphabet {
            self.transitions.insert(
                (from.to_owned(), symbol),
                Reaction::new(to, symbol, Direction::Hold),
            );
        }
    }

    /// Resets the run-state: the head returns to cell 0, the machine to its
    /// initial state, and the tape holds `input` (a single blank when `input`
    /// is empty). May be called repeatedly to rerun.
    pub fn load_input(&mut self, input: &str) {
        self.current_state = self.initial.clone();
        self.head = 0;
        self.tape_left.clear();
        self.tape_right = input.chars().collect();
        if self.tape_right.is_empty() {
            self.tape_right.push(BLANK_SYMBOL);
        }
        self.step_count = 0;
    }

    /// Takes a single step.
    ///
    /// The cell under the head is materialized first, then the reaction for
    /// `(current_state, symbol)` is applied: write, state change, head motion.
    /// A missing reaction yields [`Status::Reject`] and leaves the machine
    /// untouched so the tape and state can be inspected.
    pub fn step(&mut self) -> Status {
        self.materialize_head_cell();
        let symbol = self.symbol_at_head();
        let reaction = match self.transitions.get(&(self.current_state.clone(), symbol)) {
            Some(reaction) => reaction.clone(),
            None => return Status::Reject,
        };

        self.write_at_head(reaction.write);
        self.current_state = reaction.next_state;
        match reaction.direction {
            Direction::Left => self.head -= 1,
            Direction::Right => self.head += 1,
            Direction::Hold => {}
        }
        self.step_count += 1;

        self.status()
    }

    /// Steps until a terminal status or the step bound is reached, and returns
    /// the last status observed. The bound guards against non-halting
    /// machines; a machine still running when it is hit reports `Running`.
    pub fn run(&mut self, max_steps: usize) -> Status {
        let mut status = Status::Running;
        for _ in 0..max_steps {
            status = self.step();
            if status.is_terminal() {
                break;
            }
        }
        status
    }

    /// Returns the whole touched tape, leftmost cell first.
    pub fn tape(&self) -> String {
        self.tape_left
            .iter()
            .rev()
            .chain(self.tape_right.iter())
            .collect()
    }

    /// Returns a display line carrying a caret under the head position of
    /// [`Machine::tape`], followed by the current state.
    pub fn head(&self) -> String {
        let offset = (self.tape_left.len() as isize + self.head).max(0) as usize;
        format!(
            "{}^ ({})",
            BLANK_SYMBOL.to_string().repeat(offset),
            self.current_state
        )
    }

    /// Returns the symbol under the head, reading virgin cells as blank.
    pub fn symbol_at_head(&self) -> Symbol {
        if self.head >= 0 {
            self.tape_right
                .get(self.head as usize)
                .copied()
                .unwrap_or(BLANK_SYMBOL)
        } else {
            self.tape_left
                .get((-self.head - 1) as usize)
                .copied()
                .unwrap_or(BLANK_SYMBOL)
        }
    }

    fn status(&self) -> Status {
        if self.current_state == self.accept {
            Status::Accept
        } else if self.current_state == self.halt {
            Status::Halt
        } else {
            Status::Running
        }
    }

    // Extends the half-tape under the head with blanks until the cell exists.
    fn materialize_head_cell(&mut self) {
        if self.head >= 0 {
            let index = self.head as usize;
            if index >= self.tape_right.len() {
                self.tape_right.resize(index + 1, BLANK_SYMBOL);
            }
        } else {
            let index = (-self.head - 1) as usize;
            if index >= self.tape_left.len() {
                self.tape_left.resize(index + 1, BLANK_SYMBOL);
            }
        }
    }

    fn write_at_head(&mut self, symbol: Symbol) {
        if self.head >= 0 {
            if let Some(cell) = self.tape_right.get_mut(self.head as usize) {
                *cell = symbol;
            }
        } else if let Some(cell) = self.tape_left.get_mut((-self.head - 1) as usize) {
            *cell = symbol;
        }
    }
}

impl FromIterator<(TransitionKey, Reaction)> for Machine {
    fn from_iter<I: IntoIterator<Item = (TransitionKey, Reaction)>>(iter: I) -> Self {
        Machine::from_transitions(iter)
    }
}

impl Extend<(TransitionKey, Reaction)> for Machine {
    fn extend<I: IntoIterator<Item = (TransitionKey, Reaction)>>(&mut self, iter: I) {
        self.add_transitions(iter);
    }
}
