use crate::{
    alphabet::Boolean,
    dfa::{DFA, DFABuilder},
    range::Range,
};
use once_cell::sync::Lazy;
use proptest::prelude::*;

/// Contains two consecutive `false` symbols. The accepting state is also the dead state.
pub static TWO_FALSES_DFA: Lazy<DFA<Boolean>> = Lazy::new(|| {
    let mut builder = DFABuilder::new(Boolean);
    let q_0 = builder.new_state();
    let q_1 = builder.new_state();
    let q_2 = builder.new_state();

    builder
        .transitions([
            (q_0, false, q_1),
            (q_0, true, q_0),
            (q_1, false, q_2),
            (q_1, true, q_0),
            (q_2, false, q_2),
            (q_2, true, q_2),
        ])
        .unwrap();
    builder.start_state(q_0).accept_states([q_2]).dead_state(Some(q_2));
    builder.build().unwrap()
});

/// Contains an even number of `true` symbols.
pub static EVEN_TRUES_DFA: Lazy<DFA<Boolean>> = Lazy::new(|| {
    let mut builder = DFABuilder::new(Boolean);
    let q_0 = builder.new_state();
    let q_1 = builder.new_state();

    builder
        .transitions([(q_0, false, q_0), (q_0, true, q_1), (q_1, false, q_1), (q_1, true, q_0)])
        .unwrap();
    builder.start_state(q_0).accept_states([q_0]);
    builder.build().unwrap()
});

pub static TWO_FALSES_OR_EVEN_TRUES_DFA: Lazy<DFA<Boolean>> =
    Lazy::new(|| TWO_FALSES_DFA.union(&*EVEN_TRUES_DFA).unwrap());

/// `a*b*c*` over `'a'..='c'`. The dead state has no outgoing transitions at all.
pub static ABC_DFA: Lazy<DFA<Range<char>>> = Lazy::new(|| {
    let mut builder = DFABuilder::new('a'..='c');
    let s_0 = builder.new_state();
    let s_1 = builder.new_state();
    let s_2 = builder.new_state();
    let s_dead = builder.new_state();

    builder
        .transitions([
            (s_0, 'a', s_0),
            (s_0, 'b', s_1),
            (s_0, 'c', s_2),
            (s_1, 'a', s_dead),
            (s_1, 'b', s_1),
            (s_1, 'c', s_2),
            (s_2, 'a', s_dead),
            (s_2, 'b', s_dead),
            (s_2, 'c', s_2),
        ])
        .unwrap();
    builder
        .start_state(s_0)
        .dead_state(Some(s_dead))
        .accept_states([s_0, s_1, s_2]);
    builder.build().unwrap()
});

pub fn two_falses(string: &[bool]) -> bool {
    string.windows(2).any(|pair| !pair[0] && !pair[1])
}

pub fn even_trues(string: &[bool]) -> bool {
    string.iter().filter(|sym| **sym).count() % 2 == 0
}

pub fn abc(string: &str) -> bool {
    string.chars().all(|c| ('a'..='c').contains(&c))
        && string.chars().zip(string.chars().skip(1)).all(|(a, b)| a <= b)
}

// A partial DFA over {0, 1, 2}, described by plain data so a reference run is easy to write.
#[derive(Debug, Clone)]
pub struct Table {
    pub transitions: Vec<Option<usize>>,
    pub accept: Vec<bool>,
    pub dead: Option<usize>,
}

pub const SYMBOLS: u8 = 3;

impl Table {
    pub fn build(&self) -> DFA<Range<u8>> {
        let mut builder = DFABuilder::new(0..SYMBOLS);
        let states: Vec<_> = self.accept.iter().map(|_| builder.new_state()).collect();
        for (idx, to) in self.transitions.iter().enumerate() {
            if let Some(to) = to {
                let from = states[idx / SYMBOLS as usize];
                let sym = (idx % SYMBOLS as usize) as u8;
                builder.transition(from, sym, states[*to]).unwrap();
            }
        }
        let accept = states.iter().zip(&self.accept).filter(|(_, accepts)| **accepts);
        builder
            .start_state(states[0])
            .dead_state(self.dead.map(|dead| states[dead]))
            .accept_states(accept.map(|(state, _)| *state));
        builder.build().unwrap()
    }

    pub fn run(&self, string: &[u8]) -> bool {
        let mut current = 0;
        for (idx, &sym) in string.iter().enumerate() {
            if sym >= SYMBOLS {
                return false;
            }
            if self.dead == Some(current) {
                return self.accept[current] && string[idx + 1..].iter().all(|&sym| sym < SYMBOLS);
            }
            match self.transitions[current * SYMBOLS as usize + sym as usize] {
                Some(next) => current = next,
                None => return false,
            }
        }
        self.accept[current]
    }
}

pub fn table() -> impl Strategy<Value = Table> {
    (1..5usize).prop_flat_map(|states| {
        (
            proptest::collection::vec(proptest::option::of(0..states), states * SYMBOLS as usize),
            proptest::collection::vec(any::<bool>(), states),
            proptest::option::of(0..states),
        )
            .prop_map(|(transitions, accept, dead)| Table {
                transitions,
                accept,
                dead,
            })
    })
}

pub fn strings() -> impl Strategy<Value = Vec<Vec<u8>>> {
    // Symbol 3 lies outside the alphabet.
    proptest::collection::vec(proptest::collection::vec(0..=SYMBOLS, 0..10), 1..24)
}

pub fn in_alphabet(string: &[u8]) -> bool {
    string.iter().all(|&sym| sym < SYMBOLS)
}
