//! Writer for the line-oriented machine text: the `init:`/`accept:` header, a
//! blank line, then each transition as a key line and a reaction line.
//! Entries are sorted by key so the output is deterministic and byte-stable
//! across round-trips. The title and halt label are not serialized.

use crate::machine::Machine;
use crate::types::{Reaction, TransitionKey};

/// Encodes a machine into its textual form, parseable by [`crate::parse`].
pub fn encode(machine: &Machine) -> String {
    let mut entries: Vec<(&TransitionKey, &Reaction)> = machine.transitions().iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut out = format!(
        "init: {}\naccept: {}\n",
        machine.initial_state(),
        machine.accept_state()
    );

    for ((state, symbol), reaction) in entries {
        out.push('\n');
        out.push_str(&format!(
            "{},{}\n{},{},{}\n",
            state,
            symbol,
            reaction.next_state,
            reaction.write,
            reaction.direction.specifier()
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::mover;
    use crate::compose::concat;
    use crate::parser::parse;
    use crate::types::{Direction, Status, BLANK_SYMBOL};

    #[test]
    fn test_encode_layout() {
        let mut machine = Machine::new();
        machine.add_transition(
            ("qStart".to_owned(), 'a'),
            Reaction::new("q1", 'b', Direction::Right),
        );
        machine.add_transition(
            ("q1".to_owned(), '_'),
            Reaction::new("Y", '_', Direction::Hold),
        );

        let expected = "\
init: qStart
accept: Y

q1,_
Y,_,-

qStart,a
q1,b,>
";
        assert_eq!(encode(&machine), expected);
    }

    #[test]
    fn test_encode_headers_only() {
        let machine = Machine::new();
        assert_eq!(encode(&machine), "init: qStart\naccept: Y\n");
    }

    #[test]
    fn test_round_trip_is_identity_on_the_serialized_parts() {
        let alphabet = ['a', 'b', BLANK_SYMBOL];
        let machine = mover(2, Direction::Right, &alphabet);

        let text = encode(&machine);
        let reread = parse(&text).unwrap();

        assert_eq!(reread.transitions(), machine.transitions());
        assert_eq!(reread.initial_state(), machine.initial_state());
        assert_eq!(reread.accept_state(), machine.accept_state());
        assert_eq!(encode(&reread), text);
    }

    #[test]
    fn test_round_trip_preserves_behavior_of_a_composite() {
        let alphabet = ['x', 'y', 'z', BLANK_SYMBOL];
        let mut two = mover(2, Direction::Right, &alphabet);
        two.set_title("Two");
        let mut one = mover(1, Direction::Right, &alphabet);
        one.set_title("One");
        let machine = concat(&two, &one, &alphabet, "Three");

        let reread = parse(&encode(&machine)).unwrap();

        for input in ["", "x", "xy", "xyz", "zyx", "xyzz"] {
            let mut original = machine.clone();
            let mut copy = reread.clone();
            original.load_input(input);
            copy.load_input(input);
            let expected = original.run(50);
            assert_eq!(copy.run(50), expected, "diverged on input {:?}", input);
            assert_eq!(copy.tape(), original.tape(), "tape diverged on {:?}", input);
        }
    }

    #[test]
    fn test_title_is_not_round_tripped() {
        let mut machine = Machine::new();
        machine.set_title("Special");

        let reread = parse(&encode(&machine)).unwrap();
        assert_eq!(reread.title(), "MyMachine");
    }

    #[test]
    fn test_statuses_survive_round_trip() {
        let alphabet = ['a', BLANK_SYMBOL];
        let machine = mover(1, Direction::Right, &alphabet);
        let mut reread = parse(&encode(&machine)).unwrap();

        reread.load_input("a");
        assert_eq!(reread.step(), Status::Accept);
    }
}
