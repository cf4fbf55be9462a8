use crate::{
    accept::Accept,
    alphabet::{Alphabet, IntoAlphabet},
    error::Error,
    state_set::StateSet,
    storage::{DFAStorage, DefaultDFAStorage},
};
use std::{fmt, hash::Hash};

mod minimize;
mod product;

// MARK: DFA
/// A deterministic finite automaton.
///
/// Produced by [`DFABuilder::build`], immutable afterwards. A missing transition rejects the string, and so does any symbol outside the alphabet.
/// The optional dead state is absorbing: once a run reaches it the verdict is fixed to whether the dead state accepts.
#[derive(Debug, Clone)]
pub struct DFA<A: Alphabet, S: DFAStorage<A> = DefaultDFAStorage<A, <A as Alphabet>::Symbol>> {
    accept: StateSet<S::State>,
    dead: Option<S::State>,
    start: S::State,
    storage: S,
}

impl<A, S> DFA<A, S>
where
    A: Alphabet,
    S: DFAStorage<A>,
    S::State: Ord,
{
    /// The states of DFA that will cause it to accept a string.
    pub fn accept_states(&self) -> &[S::State] {
        self.accept.as_slice()
    }

    /// An optional absorbing state that ends the run early.
    pub fn dead_state(&self) -> Option<&S::State> {
        self.dead.as_ref()
    }

    /// The starting state of the DFA.
    pub fn start_state(&self) -> &S::State {
        &self.start
    }

    /// The storage backing this DFA.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The alphabet of this DFA.
    pub fn alphabet(&self) -> &A {
        self.storage.alphabet()
    }

    /// Returns `true` if `state` is one of the accept states.
    pub fn is_accept_state(&self, state: &S::State) -> bool {
        self.accept.contains(state)
    }

    /// Convert this DFA back into the DFABuilder form, with the start state still set.
    pub fn into_builder(self) -> DFABuilder<A, S> {
        DFABuilder {
            accept: self.accept,
            dead: self.dead,
            start: Some(self.start),
            storage: self.storage,
        }
    }

    /// The state reached from `current` on `sym`, `None` if no transition is recorded. The dead state always moves to itself.
    ///
    /// # Error
    ///
    /// Fails with `StateNotFound` if `current` is not a state of this DFA, and with `SymbolNotInAlphabet` if `sym` is outside the alphabet.
    pub fn next_state(
        &self,
        current: &S::State,
        sym: &A::Symbol,
    ) -> Result<Option<S::State>, Error> {
        if !self.storage.contains_state(current) {
            Err(Error::StateNotFound)
        } else if !self.alphabet().contains(sym) {
            Err(Error::SymbolNotInAlphabet)
        } else {
            Ok(self.step(current, sym))
        }
    }

    // Transition function with the dead state made absorbing.
    pub(crate) fn step(&self, current: &S::State, sym: &A::Symbol) -> Option<S::State> {
        if self.dead.as_ref() == Some(current) {
            Some(current.clone())
        } else {
            self.storage.transition(current, sym)
        }
    }

    /// Accept or reject a string based on the content of this DFA.
    ///
    /// Any symbol that is not in the alphabet rejects the string, including symbols read after the dead state was reached.
    pub fn accept<I: IntoIterator<Item = A::Symbol>>(&self, string: I) -> bool {
        let alphabet = self.alphabet();
        let mut current = self.start.clone();

        for sym in string {
            if !alphabet.contains(&sym) {
                return false;
            }
            if self.dead.as_ref() == Some(&current) {
                continue;
            }

            current = match self.storage.transition(&current, &sym) {
                Some(next) => next,
                None => return false,
            };
        }

        self.accept.contains(&current)
    }

    /// Accept or reject a string based on the content of this DFA, without checking the symbols against the alphabet.
    ///
    /// # Safety
    /// Every symbol of `string` must be contained in the alphabet of this DFA.
    pub unsafe fn accept_unchecked<I: IntoIterator<Item = A::Symbol>>(&self, string: I) -> bool {
        let mut current = self.start.clone();

        for sym in string {
            if self.dead.as_ref() == Some(&current) {
                break;
            }

            // Safety, `current` comes from this storage and the caller vouches for `sym`.
            current = match unsafe { self.storage.transition_unchecked(&current, &sym) } {
                Some(next) => next,
                None => return false,
            };
        }

        self.accept.contains(&current)
    }
}

impl<A, S> Accept for &DFA<A, S>
where
    A: Alphabet,
    S: DFAStorage<A>,
    S::State: Ord,
{
    type Symbol = A::Symbol;

    fn accept<I: IntoIterator<Item = A::Symbol>>(self, string: I) -> bool {
        DFA::accept(self, string)
    }
}

// MARK: Builder
/// Builder for a DFA.
///
/// States come from [`new_state`](DFABuilder::new_state), every transition is validated against the storage and alphabet as it is recorded.
#[derive(Debug, Clone)]
pub struct DFABuilder<
    A: Alphabet,
    S: DFAStorage<A> = DefaultDFAStorage<A, <A as Alphabet>::Symbol>,
> {
    accept: StateSet<S::State>,
    dead: Option<S::State>,
    start: Option<S::State>,
    storage: S,
}

impl<A> DFABuilder<A>
where
    A: Alphabet + fmt::Debug + Clone,
    A::Symbol: fmt::Debug + Clone + Eq + Hash,
{
    /// Create a new DFABuilder with the given alphabet.
    pub fn new<I: IntoAlphabet<IntoAlpha = A, Symbol = A::Symbol>>(alphabet: I) -> Self {
        Self::new_with_storage(DefaultDFAStorage::new(alphabet.into_alphabet()))
    }
}

impl<A, S> DFABuilder<A, S>
where
    A: Alphabet,
    S: DFAStorage<A>,
    S::State: Ord,
{
    /// Create a new DFABuilder with a custom storage backend.
    pub fn new_with_storage(storage: S) -> Self {
        DFABuilder {
            accept: StateSet::new(),
            dead: None,
            start: None,
            storage,
        }
    }

    /// Return a reference to the `DFAStorage` backing this builder.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Return a reference to the `Alphabet` in the storage of this builder.
    pub fn alphabet(&self) -> &A {
        self.storage.alphabet()
    }

    /// Record and return a new state.
    pub fn new_state(&mut self) -> S::State {
        self.storage.add_state()
    }

    /// Record and validate a new transition. A second transition from `from` on `sym` replaces the first.
    ///
    /// # Error
    ///
    /// Fails with `InvalidState` if either `from` or `to` was not returned by `new_state`, otherwise with `SymbolNotInAlphabet` if `sym` is outside the alphabet.
    pub fn transition(
        &mut self,
        from: S::State,
        sym: A::Symbol,
        to: S::State,
    ) -> Result<(), Error> {
        if !self.storage.contains_state(&from) || !self.storage.contains_state(&to) {
            Err(Error::InvalidState)
        } else if !self.storage.alphabet().contains(&sym) {
            Err(Error::SymbolNotInAlphabet)
        } else {
            self.storage.add_transition(from, sym, to);
            Ok(())
        }
    }

    /// Record and validate multiple transitions, stopping at the first invalid one.
    ///
    /// # Error
    ///
    /// See [`transition`](DFABuilder::transition).
    pub fn transitions(
        &mut self,
        transitions: impl IntoIterator<Item = (S::State, A::Symbol, S::State)>,
    ) -> Result<(), Error> {
        for (from, sym, to) in transitions {
            self.transition(from, sym, to)?;
        }
        Ok(())
    }

    /// Add to the set of accept states.
    pub fn accept_states(
        &mut self,
        accept_states: impl IntoIterator<Item = S::State>,
    ) -> &mut Self {
        self.accept.extend(accept_states);
        self
    }

    /// Set the starting state.
    pub fn start_state(&mut self, start: S::State) -> &mut Self {
        self.start = Some(start);
        self
    }

    /// Set the dead state.
    pub fn dead_state(&mut self, dead: Option<S::State>) -> &mut Self {
        self.dead = dead;
        self
    }

    /// Build the DFA.
    ///
    /// # Error
    ///
    /// Fails with `MissingStartState` if no start state was set, and with `InvalidState` if the start, dead or any accept state is not a state of the storage.
    pub fn build(self) -> Result<DFA<A, S>, Error> {
        let DFABuilder {
            accept,
            dead,
            start,
            storage,
        } = self;
        let start = start.ok_or(Error::MissingStartState)?;

        if !storage.contains_state(&start) {
            return Err(Error::InvalidState);
        }
        if dead.as_ref().is_some_and(|dead| !storage.contains_state(dead)) {
            return Err(Error::InvalidState);
        }
        if accept.iter().any(|state| !storage.contains_state(state)) {
            return Err(Error::InvalidState);
        }

        log! {
            tracing::trace!(
                states = storage.all_states().len(),
                accept = accept.len(),
                dead = dead.is_some(),
                "built dfa"
            );
        }

        Ok(DFA {
            accept,
            dead,
            start,
            storage,
        })
    }
}
