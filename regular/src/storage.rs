use crate::alphabet::Alphabet;
use hashbrown::HashMap;
use std::{fmt, hash::Hash, iter};

/// Backend for the DFA struct.
///
/// Separating the two lets the transition and state storage, usually the largest part of a DFA, pick its own representation.
/// See [`DefaultDFAStorage`] for a sensible default and [`DenseDFAStorage`] for small, indexable symbol types.
pub trait DFAStorage<A: Alphabet>: fmt::Debug + Clone {
    /// Type representing a state of the DFA.
    type State: fmt::Debug + Clone + Eq;

    /// Construct a new instance of this storage from the provided alphabet.
    fn from_alphabet(alphabet: A) -> Self;

    /// Return a reference to the alphabet used by this DFA.
    fn alphabet(&self) -> &A;

    /// Return a list of all the valid states of this DFA.
    fn all_states(&self) -> Vec<Self::State>;

    /// Return a list of all transitions of this DFA.
    fn all_transitions(&self) -> Vec<(Self::State, A::Symbol, Self::State)>;

    /// Return `true` if the given state is valid in this DFA.
    fn contains_state(&self, state: &Self::State) -> bool;

    /// Return `Some(end)` if there exists a transition from `current` to `end` on `sym`.
    fn transition(&self, current: &Self::State, sym: &A::Symbol) -> Option<Self::State>;

    /// Same as [`transition`](DFAStorage::transition), but implementations may skip validity checks.
    ///
    /// # Safety
    /// 1. `current` must have been returned by `add_state` on this storage.
    /// 2. `sym` must be contained in the alphabet of this storage.
    #[inline]
    unsafe fn transition_unchecked(
        &self,
        current: &Self::State,
        sym: &A::Symbol,
    ) -> Option<Self::State> {
        self.transition(current, sym)
    }

    /// Return a new unique state.
    fn add_state(&mut self) -> Self::State;

    /// Record the given transition, replacing any earlier transition from `from` on `sym`.
    fn add_transition(&mut self, from: Self::State, sym: A::Symbol, to: Self::State);
}

// MARK: Default
/// Default storage for a DFA.
///
/// States are a linear range of `usize` starting at zero, transitions live in a hashmap so the transition function may be partial.
#[derive(Debug, Clone)]
pub struct DefaultDFAStorage<A: Alphabet, Σ: Eq + Hash> {
    alphabet: A,
    next_state: usize,
    transitions: HashMap<(usize, Σ), usize>,
}

impl<A: Alphabet> DefaultDFAStorage<A, A::Symbol>
where
    A::Symbol: Eq + Hash,
{
    /// Construct a new default storage with the given alphabet.
    pub fn new(alphabet: A) -> Self {
        DefaultDFAStorage {
            alphabet,
            next_state: 0,
            transitions: HashMap::new(),
        }
    }
}

impl<A> DFAStorage<A> for DefaultDFAStorage<A, A::Symbol>
where
    A: Alphabet + fmt::Debug + Clone,
    A::Symbol: fmt::Debug + Clone + Eq + Hash,
{
    type State = usize;

    fn from_alphabet(alphabet: A) -> Self {
        Self::new(alphabet)
    }

    fn alphabet(&self) -> &A {
        &self.alphabet
    }

    fn all_states(&self) -> Vec<usize> {
        (0..self.next_state).collect()
    }

    fn all_transitions(&self) -> Vec<(usize, A::Symbol, usize)> {
        self.transitions
            .iter()
            .map(|((from, sym), to)| (*from, sym.clone(), *to))
            .collect()
    }

    fn contains_state(&self, state: &usize) -> bool {
        *state < self.next_state
    }

    fn transition(&self, current: &usize, sym: &A::Symbol) -> Option<usize> {
        // TODO: borrow the lookup key through hashbrown's `Equivalent` instead of cloning the symbol
        self.transitions.get(&(*current, sym.clone())).copied()
    }

    fn add_state(&mut self) -> usize {
        let state = self.next_state;
        self.next_state += 1;
        state
    }

    fn add_transition(&mut self, from: usize, sym: A::Symbol, to: usize) {
        self.transitions.insert((from, sym), to);
    }
}

// MARK: Dense
/// A marker trait for symbol types which are easily indexable.
pub trait Indexable {
    /// Returns the index of the symbol, always below `count()`.
    fn index(&self) -> usize;
    /// Returns the number of possible symbols.
    fn count() -> usize;
}

impl Indexable for bool {
    fn index(&self) -> usize {
        *self as usize
    }

    fn count() -> usize {
        2
    }
}

impl Indexable for () {
    fn index(&self) -> usize {
        0
    }

    fn count() -> usize {
        1
    }
}

impl Indexable for u8 {
    fn index(&self) -> usize {
        *self as usize
    }

    fn count() -> usize {
        256
    }
}

impl Indexable for i8 {
    fn index(&self) -> usize {
        (*self as u8) as usize
    }

    fn count() -> usize {
        256
    }
}

/// Storage using a complete transition table, one row per state and one column per symbol index.
///
/// Lookups are a single index into a `Vec`, intended for small symbol types such as `bool` or `u8`.
#[derive(Debug, Clone)]
pub struct DenseDFAStorage<A> {
    alphabet: A,
    stride: usize,
    table: Vec<Option<usize>>,
}

impl<A: Alphabet> DenseDFAStorage<A>
where
    A::Symbol: Indexable,
{
    /// Construct an empty table for the given alphabet.
    pub fn new(alphabet: A) -> Self {
        DenseDFAStorage {
            alphabet,
            stride: <A::Symbol as Indexable>::count(),
            table: Vec::new(),
        }
    }

    fn num_states(&self) -> usize {
        self.table.len() / self.stride
    }

    fn slot(&self, state: usize, sym: &A::Symbol) -> Option<usize> {
        let column = sym.index();
        (state < self.num_states() && column < self.stride).then(|| state * self.stride + column)
    }
}

impl<A> DFAStorage<A> for DenseDFAStorage<A>
where
    A: Alphabet + fmt::Debug + Clone,
    A::Symbol: Indexable,
{
    type State = usize;

    fn from_alphabet(alphabet: A) -> Self {
        Self::new(alphabet)
    }

    fn alphabet(&self) -> &A {
        &self.alphabet
    }

    fn all_states(&self) -> Vec<usize> {
        (0..self.num_states()).collect()
    }

    fn all_transitions(&self) -> Vec<(usize, A::Symbol, usize)> {
        let mut transitions = Vec::new();
        for from in 0..self.num_states() {
            for sym in self.alphabet.values() {
                if let Some(to) = self.transition(&from, &sym) {
                    transitions.push((from, sym, to));
                }
            }
        }
        transitions
    }

    fn contains_state(&self, state: &usize) -> bool {
        *state < self.num_states()
    }

    fn transition(&self, current: &usize, sym: &A::Symbol) -> Option<usize> {
        self.slot(*current, sym).and_then(|slot| self.table[slot])
    }

    #[inline]
    unsafe fn transition_unchecked(&self, current: &usize, sym: &A::Symbol) -> Option<usize> {
        // Safety, the caller guarantees `current` is a row of this table and `sym` indexes one of its columns.
        unsafe { *self.table.get_unchecked(*current * self.stride + sym.index()) }
    }

    fn add_state(&mut self) -> usize {
        let state = self.num_states();
        self.table.extend(iter::repeat_n(None, self.stride));
        state
    }

    fn add_transition(&mut self, from: usize, sym: A::Symbol, to: usize) {
        if let Some(slot) = self.slot(from, &sym) {
            self.table[slot] = Some(to);
        }
    }
}
