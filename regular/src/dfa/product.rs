use super::{DFA, DFABuilder};
use crate::{alphabet::Alphabet, error::Error, state_set::StateSet, storage::DFAStorage};
use hashbrown::{HashMap, HashSet};
use std::{collections::VecDeque, hash::Hash};

// A side of a product state. `None` is the implicit reject sink a missing transition leads to.
type Pair<L, R> = (Option<L>, Option<R>);

// Product construction over the pairs reachable from `(left.start, right.start)`.
// The transition function of the result is total, acceptance is decided by `accepts(left_accepts, right_accepts)`.
fn product<A, SL, SR, SN>(
    left: &DFA<A, SL>,
    right: &DFA<A, SR>,
    accepts: impl Fn(bool, bool) -> bool,
    #[allow(unused_variables)] operation: &'static str,
) -> Result<DFA<A, SN>, Error>
where
    A: Alphabet + PartialEq + Clone,
    A::Symbol: Clone,
    SL: DFAStorage<A>,
    SL::State: Ord + Hash,
    SR: DFAStorage<A>,
    SR::State: Ord + Hash,
    SN: DFAStorage<A>,
    SN::State: Ord,
{
    if left.alphabet() != right.alphabet() {
        return Err(Error::OperationWithNonEqualAlphabets);
    }

    let symbols: Vec<A::Symbol> = left.alphabet().values().collect();
    let mut builder = DFABuilder::new_with_storage(SN::from_alphabet(left.alphabet().clone()));
    let mut mapping: HashMap<Pair<SL::State, SR::State>, SN::State> = HashMap::new();
    let mut queue = VecDeque::new();
    let mut accept = StateSet::new();

    let start_pair = (Some(left.start.clone()), Some(right.start.clone()));
    let start = builder.new_state();
    mapping.insert(start_pair.clone(), start.clone());
    queue.push_back(start_pair);

    while let Some(pair) = queue.pop_front() {
        let from = mapping.get(&pair).cloned().ok_or(Error::StateNotFound)?;
        let (l, r) = &pair;

        let left_accepts = l.as_ref().is_some_and(|state| left.is_accept_state(state));
        let right_accepts = r.as_ref().is_some_and(|state| right.is_accept_state(state));
        if accepts(left_accepts, right_accepts) {
            accept.insert(from.clone());
        }

        for sym in &symbols {
            let next = (
                l.as_ref().and_then(|state| left.step(state, sym)),
                r.as_ref().and_then(|state| right.step(state, sym)),
            );
            let to = match mapping.get(&next) {
                Some(to) => to.clone(),
                None => {
                    let to = builder.new_state();
                    mapping.insert(next.clone(), to.clone());
                    queue.push_back(next);
                    to
                }
            };
            builder.transition(from.clone(), sym.clone(), to)?;
        }
    }

    // Both sides absorbing means the pair is absorbing, whichever way each side got stuck.
    let dead = mapping.get(&(left.dead.clone(), right.dead.clone())).cloned();

    log! {
        tracing::debug!(
            operation,
            states = mapping.len(),
            accept = accept.len(),
            "product construction"
        );
    }

    builder.start_state(start).dead_state(dead).accept_states(accept);
    builder.build()
}

// MARK: Operations
impl<A, S> DFA<A, S>
where
    A: Alphabet + Clone,
    S: DFAStorage<A>,
    S::State: Ord,
{
    /// Construct a new DFA that accepts the intersection of the languages of this DFA and `other`.
    ///
    /// # Error
    ///
    /// Fails with `OperationWithNonEqualAlphabets` if the two alphabets differ.
    pub fn intersection<S2, S3>(&self, other: &DFA<A, S2>) -> Result<DFA<A, S3>, Error>
    where
        A: PartialEq,
        A::Symbol: Clone,
        S::State: Hash,
        S2: DFAStorage<A>,
        S2::State: Ord + Hash,
        S3: DFAStorage<A>,
        S3::State: Ord,
    {
        product(self, other, |l, r| l && r, "intersection")
    }

    /// Construct a new DFA that accepts the union of the languages of this DFA and `other`.
    ///
    /// # Error
    ///
    /// Fails with `OperationWithNonEqualAlphabets` if the two alphabets differ.
    pub fn union<S2, S3>(&self, other: &DFA<A, S2>) -> Result<DFA<A, S3>, Error>
    where
        A: PartialEq,
        A::Symbol: Clone,
        S::State: Hash,
        S2: DFAStorage<A>,
        S2::State: Ord + Hash,
        S3: DFAStorage<A>,
        S3::State: Ord,
    {
        product(self, other, |l, r| l || r, "union")
    }

    /// Construct a new DFA that accepts the strings of this DFA's language that `other` rejects.
    ///
    /// # Error
    ///
    /// Fails with `OperationWithNonEqualAlphabets` if the two alphabets differ.
    pub fn difference<S2, S3>(&self, other: &DFA<A, S2>) -> Result<DFA<A, S3>, Error>
    where
        A: PartialEq,
        A::Symbol: Clone,
        S::State: Hash,
        S2: DFAStorage<A>,
        S2::State: Ord + Hash,
        S3: DFAStorage<A>,
        S3::State: Ord,
    {
        product(self, other, |l, r| l && !r, "difference")
    }

    /// Construct a new DFA that accepts the strings accepted by exactly one of this DFA and `other`.
    ///
    /// # Error
    ///
    /// Fails with `OperationWithNonEqualAlphabets` if the two alphabets differ.
    pub fn symmetric_difference<S2, S3>(&self, other: &DFA<A, S2>) -> Result<DFA<A, S3>, Error>
    where
        A: PartialEq,
        A::Symbol: Clone,
        S::State: Hash,
        S2: DFAStorage<A>,
        S2::State: Ord + Hash,
        S3: DFAStorage<A>,
        S3::State: Ord,
    {
        product(self, other, |l, r| l != r, "symmetric_difference")
    }

    /// Construct a new DFA that accepts every string over the alphabet that this DFA rejects.
    ///
    /// Missing transitions are first routed to a new absorbing sink, which becomes the dead state if there was none.
    pub fn complement(&self) -> Self
    where
        A::Symbol: Clone,
    {
        let mut complement = self.clone();
        let symbols: Vec<A::Symbol> = self.alphabet().values().collect();
        let mut sink = None;

        for state in self.storage.all_states() {
            if self.dead.as_ref() == Some(&state) {
                continue;
            }
            for sym in &symbols {
                if complement.storage.transition(&state, sym).is_none() {
                    let sink = sink.get_or_insert_with(|| complement.storage.add_state()).clone();
                    complement.storage.add_transition(state.clone(), sym.clone(), sink);
                }
            }
        }

        if let Some(sink) = &sink {
            for sym in &symbols {
                complement.storage.add_transition(sink.clone(), sym.clone(), sink.clone());
            }
            if complement.dead.is_none() {
                complement.dead = Some(sink.clone());
            }
            log! {
                tracing::debug!(sink = ?sink, "complement completed the transition function");
            }
        }

        complement.accept = complement
            .storage
            .all_states()
            .into_iter()
            .filter(|state| !self.accept.contains(state))
            .collect();

        complement
    }

    /// Returns `true` if no accept state is reachable, so the language is empty.
    pub fn is_empty(&self) -> bool
    where
        S::State: Hash,
    {
        let symbols: Vec<A::Symbol> = self.alphabet().values().collect();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(self.start.clone());
        queue.push_back(self.start.clone());

        while let Some(state) = queue.pop_front() {
            if self.accept.contains(&state) {
                return false;
            }
            for sym in &symbols {
                if let Some(next) = self.step(&state, sym)
                    && seen.insert(next.clone())
                {
                    queue.push_back(next);
                }
            }
        }

        true
    }

    /// Returns `true` if this DFA and `other` accept the same language.
    ///
    /// # Error
    ///
    /// Fails with `OperationWithNonEqualAlphabets` if the two alphabets differ.
    pub fn is_equivalent<S2>(&self, other: &DFA<A, S2>) -> Result<bool, Error>
    where
        A: PartialEq,
        S::State: Hash,
        S2: DFAStorage<A>,
        S2::State: Ord + Hash,
    {
        if self.alphabet() != other.alphabet() {
            return Err(Error::OperationWithNonEqualAlphabets);
        }

        let symbols: Vec<A::Symbol> = self.alphabet().values().collect();
        let start: Pair<S::State, S2::State> =
            (Some(self.start.clone()), Some(other.start.clone()));
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(start.clone());
        queue.push_back(start);

        while let Some((l, r)) = queue.pop_front() {
            let left_accepts = l.as_ref().is_some_and(|state| self.is_accept_state(state));
            let right_accepts = r.as_ref().is_some_and(|state| other.is_accept_state(state));
            if left_accepts != right_accepts {
                return Ok(false);
            }
            for sym in &symbols {
                let next = (
                    l.as_ref().and_then(|state| self.step(state, sym)),
                    r.as_ref().and_then(|state| other.step(state, sym)),
                );
                if seen.insert(next.clone()) {
                    queue.push_back(next);
                }
            }
        }

        Ok(true)
    }
}

// MARK: Tests
#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        alphabet::{Boolean, IntoAlphabet},
        fixtures::*,
        range::Range,
        storage::{DefaultDFAStorage, DenseDFAStorage},
    };
    use proptest::prelude::*;

    type BoolDFA = DFA<Boolean>;

    #[test]
    fn test_union_fixture() {
        let dfa = &*TWO_FALSES_OR_EVEN_TRUES_DFA;

        assert!(dfa.accept([true, true]));
        assert!(dfa.accept([true, false, false]));
        assert!(dfa.accept([false; 0]));
        assert!(!dfa.accept([true]));
        assert!(!dfa.accept([true, false, true, true]));
    }

    #[test]
    fn test_intersection_keeps_dead_state() {
        let left: BoolDFA = TWO_FALSES_DFA.clone();
        let both: BoolDFA = left.intersection(&*TWO_FALSES_DFA).unwrap();

        // Both inputs share the accepting dead state, so the product has one too.
        let dead = both.dead_state().copied().unwrap();
        assert!(both.is_accept_state(&dead));
        assert!(both.accept([false, false, true]));
        assert!(!both.accept([false, true, false]));
        assert!(both.is_equivalent(&*TWO_FALSES_DFA).unwrap());
    }

    #[test]
    fn test_only_reachable_pairs() {
        let dfa: BoolDFA = EVEN_TRUES_DFA.intersection(&*EVEN_TRUES_DFA).unwrap();

        // Two of the four pairs are reachable.
        assert_eq!(dfa.storage().all_states().len(), 2);
        assert_eq!(dfa.dead_state(), None);
    }

    #[test]
    fn test_non_equal_alphabets() {
        let mut builder = DFABuilder::new('a'..='d');
        let s_0 = builder.new_state();
        builder.start_state(s_0);
        let other = builder.build().unwrap();

        let result: Result<DFA<Range<char>>, Error> = ABC_DFA.union(&other);
        assert_eq!(result.map(|_| ()), Err(Error::OperationWithNonEqualAlphabets));
        assert_eq!(ABC_DFA.is_equivalent(&other), Err(Error::OperationWithNonEqualAlphabets));
    }

    #[test]
    fn test_partial_union() {
        // `ab` alone, everything else falls off a missing transition.
        let mut builder = DFABuilder::new('a'..='c');
        let s_0 = builder.new_state();
        let s_1 = builder.new_state();
        let s_2 = builder.new_state();
        builder.transitions([(s_0, 'a', s_1), (s_1, 'b', s_2)]).unwrap();
        builder.start_state(s_0).accept_states([s_2]);
        let exact_ab = builder.build().unwrap();

        let not_abc: DFA<Range<char>> = exact_ab.difference(&*ABC_DFA).unwrap();
        assert!(not_abc.is_empty());

        let ab_or_cb: DFA<Range<char>> = ABC_DFA.complement().union(&exact_ab).unwrap();
        assert!(ab_or_cb.accept("ab".chars()));
        assert!(ab_or_cb.accept("cb".chars()));
        assert!(!ab_or_cb.accept("bc".chars()));
        assert!(!ab_or_cb.accept("abz".chars()));
    }

    #[test]
    fn test_complement_adds_sink() {
        let mut builder = DFABuilder::new(Boolean);
        let s_0 = builder.new_state();
        builder.transition(s_0, true, s_0).unwrap();
        builder.start_state(s_0).accept_states([s_0]);
        let all_true = builder.build().unwrap();

        let complement = all_true.complement();
        let sink = complement.dead_state().copied().unwrap();

        assert_eq!(complement.storage().all_states().len(), 2);
        assert_eq!(complement.accept_states(), [sink]);
        assert!(complement.accept([true, false]));
        assert!(!complement.accept([true, true]));
        assert!(complement.complement().is_equivalent(&all_true).unwrap());
    }

    #[test]
    fn test_emptiness() {
        assert!(!ABC_DFA.is_empty());
        let nothing: BoolDFA = TWO_FALSES_DFA.difference(&*TWO_FALSES_DFA).unwrap();
        assert!(nothing.is_empty());
        assert!(!nothing.complement().is_empty());
    }

    #[test]
    fn test_dense_product() {
        let dense: DFA<Boolean, DenseDFAStorage<Boolean>> =
            TWO_FALSES_DFA.union(&*EVEN_TRUES_DFA).unwrap();
        assert!(dense.is_equivalent(&*TWO_FALSES_OR_EVEN_TRUES_DFA).unwrap());
    }

    proptest! {
        #[test]
        fn fixture_matches_reference(string in proptest::collection::vec(any::<bool>(), 0..32)) {
            prop_assert_eq!(TWO_FALSES_DFA.accept(string.iter().copied()), two_falses(&string));
            prop_assert_eq!(EVEN_TRUES_DFA.accept(string.iter().copied()), even_trues(&string));
            prop_assert_eq!(
                TWO_FALSES_OR_EVEN_TRUES_DFA.accept(string.iter().copied()),
                two_falses(&string) || even_trues(&string)
            );
        }

        #[test]
        fn abc_matches_reference(string in "[a-d]{0,12}") {
            prop_assert_eq!(ABC_DFA.accept(string.chars()), abc(&string));
            prop_assert_eq!(
                ABC_DFA.complement().accept(string.chars()),
                !string.contains('d') && !abc(&string)
            );
        }

        #[test]
        fn table_matches_reference(table in table(), strings in strings()) {
            let dfa = table.build();
            for string in &strings {
                prop_assert_eq!(dfa.accept(string.iter().copied()), table.run(string));
            }
        }

        #[test]
        fn set_operations(left in table(), right in table(), strings in strings()) {
            let (l, r) = (left.build(), right.build());
            let union: DFA<Range<u8>> = l.union(&r).unwrap();
            let intersection: DFA<Range<u8>> = l.intersection(&r).unwrap();
            let difference: DFA<Range<u8>, DefaultDFAStorage<Range<u8>, u8>> =
                l.difference(&r).unwrap();
            let symmetric: DFA<Range<u8>, DenseDFAStorage<Range<u8>>> =
                l.symmetric_difference(&r).unwrap();

            for string in &strings {
                let (a, b) = (left.run(string), right.run(string));
                let string = string.iter().copied();
                prop_assert_eq!(union.accept(string.clone()), a || b);
                prop_assert_eq!(intersection.accept(string.clone()), a && b);
                prop_assert_eq!(difference.accept(string.clone()), a && !b);
                prop_assert_eq!(symmetric.accept(string), a != b);
            }

            let reverse: DFA<Range<u8>> = r.difference(&l).unwrap();
            prop_assert_eq!(
                difference.is_empty() && reverse.is_empty(),
                l.is_equivalent(&r).unwrap()
            );
        }

        #[test]
        fn complement_and_laws(table in table(), other in table(), strings in strings()) {
            let dfa = table.build();
            let other_dfa = other.build();
            let complement = dfa.complement();

            for string in &strings {
                prop_assert_eq!(
                    complement.accept(string.iter().copied()),
                    in_alphabet(string) && !table.run(string)
                );
            }

            let nothing: DFA<Range<u8>> = dfa.intersection(&complement).unwrap();
            prop_assert!(nothing.is_empty());
            prop_assert!(complement.complement().is_equivalent(&dfa).unwrap());

            // De Morgan
            let union: DFA<Range<u8>> = dfa.union(&other_dfa).unwrap();
            let both_rejected: DFA<Range<u8>> =
                complement.intersection(&other_dfa.complement()).unwrap();
            prop_assert!(union.complement().is_equivalent(&both_rejected).unwrap());
        }
    }

    #[test]
    fn test_empty_alphabet() {
        let mut builder = DFABuilder::new((0u8..0).into_alphabet());
        let s_0 = builder.new_state();
        builder.start_state(s_0).accept_states([s_0]);
        let epsilon = builder.build().unwrap();

        let complement = epsilon.complement();
        assert!(epsilon.accept([0u8; 0]));
        assert!(!complement.accept([0u8; 0]));
        assert!(!complement.accept([0u8]));
        assert!(complement.is_empty());
    }
}
