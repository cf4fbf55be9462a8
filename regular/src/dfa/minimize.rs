use super::{DFA, DFABuilder};
use crate::{alphabet::Alphabet, error::Error, storage::DFAStorage};
use hashbrown::HashMap;
use smallvec::SmallVec;
use std::hash::Hash;

// Blocks of the successors of a state, one entry per symbol.
type Row = SmallVec<[usize; 8]>;

impl<A, S> DFA<A, S>
where
    A: Alphabet + Clone,
    S: DFAStorage<A>,
    S::State: Ord,
{
    /// Construct the minimal DFA accepting the same language.
    ///
    /// Unreachable states are dropped, and so is every state that can no longer reach an accept state: transitions into them are left out, which rejects the same way.
    /// Equivalent states are merged by Moore's partition refinement.
    pub fn minimize<S2>(&self) -> Result<DFA<A, S2>, Error>
    where
        A::Symbol: Clone,
        S::State: Hash,
        S2: DFAStorage<A>,
        S2::State: Ord,
    {
        let symbols: Vec<A::Symbol> = self.alphabet().values().collect();

        // Reachable states in breadth first order, the start is 0.
        let mut states = vec![self.start.clone()];
        let mut index: HashMap<S::State, usize> = HashMap::new();
        index.insert(self.start.clone(), 0);
        let mut targets: Vec<Vec<Option<usize>>> = Vec::new();

        let mut cursor = 0;
        while cursor < states.len() {
            let state = states[cursor].clone();
            let mut row = Vec::with_capacity(symbols.len());
            for sym in &symbols {
                row.push(self.step(&state, sym).map(|next| {
                    *index.entry(next.clone()).or_insert_with(|| {
                        states.push(next);
                        states.len() - 1
                    })
                }));
            }
            targets.push(row);
            cursor += 1;
        }

        // Missing transitions go to a virtual sink, one past the last real state.
        let sink = states.len();
        let target = |next: &Option<usize>| next.unwrap_or(sink);

        let mut block: Vec<usize> = (0..=sink)
            .map(|i| usize::from(i < sink && self.accept.contains(&states[i])))
            .collect();
        let mut blocks = 1 + usize::from(block.contains(&1));

        // Splitting never merges blocks, so an unchanged count means a stable partition.
        loop {
            let mut signatures: HashMap<(usize, Row), usize> = HashMap::new();
            let refined: Vec<usize> = (0..=sink)
                .map(|i| {
                    let row: Row = if i == sink {
                        SmallVec::from_elem(block[sink], symbols.len())
                    } else {
                        targets[i].iter().map(|next| block[target(next)]).collect()
                    };
                    let fresh = signatures.len();
                    *signatures.entry((block[i], row)).or_insert(fresh)
                })
                .collect();

            block = refined;
            if signatures.len() == blocks {
                break;
            }
            blocks = signatures.len();
        }

        let sink_block = block[sink];
        let mut builder = DFABuilder::new_with_storage(S2::from_alphabet(self.alphabet().clone()));
        let mut emitted: HashMap<usize, S2::State> = HashMap::new();
        let mut representatives = Vec::new();

        for (i, &b) in block[..sink].iter().enumerate() {
            if b != sink_block && !emitted.contains_key(&b) {
                emitted.insert(b, builder.new_state());
                representatives.push(i);
            }
        }

        let lookup = |b: usize| emitted.get(&b).cloned().ok_or(Error::StateNotFound);

        let mut accept = Vec::new();
        for &i in &representatives {
            let from = lookup(block[i])?;
            if self.accept.contains(&states[i]) {
                accept.push(from.clone());
            }
            for (sym, next) in symbols.iter().zip(&targets[i]) {
                let to_block = block[target(next)];
                if to_block != sink_block {
                    builder.transition(from.clone(), sym.clone(), lookup(to_block)?)?;
                }
            }
        }

        let start = match emitted.get(&block[0]) {
            Some(start) => start.clone(),
            // The language is empty.
            None => builder.new_state(),
        };
        let dead = self
            .dead
            .as_ref()
            .and_then(|dead| index.get(dead))
            .and_then(|&i| emitted.get(&block[i]))
            .cloned();

        log! {
            tracing::debug!(reachable = sink, minimized = emitted.len(), "minimized dfa");
        }

        builder.start_state(start).dead_state(dead).accept_states(accept);
        builder.build()
    }
}
