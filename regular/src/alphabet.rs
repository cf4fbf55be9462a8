use crate::range::{Bounded, Range, Step};
use std::{
    collections::{BTreeSet, HashSet},
    hash::{BuildHasher, Hash},
    iter::{self, Once},
    marker::PhantomData,
    ops,
    vec::IntoIter,
};

/// A set of symbols.
pub trait Alphabet {
    /// The type of elements in this set.
    type Symbol;

    /// An iterator over all values in this alphabet.
    type ValueIter: Iterator<Item = Self::Symbol>;

    /// Return an iterator over all values in this alphabet.
    fn values(&self) -> Self::ValueIter;
    /// Return `true` if the given symbol is a member of this alphabet.
    fn contains(&self, sym: &Self::Symbol) -> bool;
    /// Optionally return the number of elements in this alphabet. `None` if the size would overflow a `usize`.
    fn num_values(&self) -> Option<usize>;
}

// Set-backed alphabets hand out owned copies, so `values` does not borrow the set.
macro_rules! set_alphabet {
    ($set:ty, [$($bounds:tt)*], [$($generics:tt)*]) => {
        impl<$($generics)*> Alphabet for $set
        where
            $($bounds)*
        {
            type Symbol = V;
            type ValueIter = IntoIter<V>;

            fn values(&self) -> Self::ValueIter {
                self.iter().cloned().collect::<Vec<_>>().into_iter()
            }

            fn contains(&self, sym: &V) -> bool {
                <$set>::contains(self, sym)
            }

            fn num_values(&self) -> Option<usize> {
                Some(self.len())
            }
        }
    };
}

set_alphabet!(HashSet<V, S>, [V: Hash + Eq + Clone, S: BuildHasher], [V, S]);
set_alphabet!(hashbrown::HashSet<V, S>, [V: Hash + Eq + Clone, S: BuildHasher], [V, S]);
set_alphabet!(BTreeSet<V>, [V: Ord + Clone], [V]);

impl<T: Alphabet + ?Sized> Alphabet for &T {
    type Symbol = T::Symbol;
    type ValueIter = T::ValueIter;

    fn values(&self) -> Self::ValueIter {
        T::values(self)
    }

    fn contains(&self, sym: &Self::Symbol) -> bool {
        T::contains(self, sym)
    }

    fn num_values(&self) -> Option<usize> {
        T::num_values(self)
    }
}

impl<Σ: Step> Alphabet for Range<Σ> {
    type Symbol = Σ;
    type ValueIter = Self;

    fn values(&self) -> Self {
        self.clone()
    }

    fn contains(&self, sym: &Σ) -> bool {
        Range::contains(self, sym)
    }

    fn num_values(&self) -> Option<usize> {
        self.len()
    }
}

/// Alphabet containing all booleans `{false, true}`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Boolean;

impl Alphabet for Boolean {
    type Symbol = bool;
    type ValueIter = std::array::IntoIter<bool, 2>;

    fn values(&self) -> Self::ValueIter {
        [false, true].into_iter()
    }

    fn contains(&self, _sym: &bool) -> bool {
        true
    }

    fn num_values(&self) -> Option<usize> {
        Some(2)
    }
}

/// Alphabet containing the single symbol of the unit type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Unit;

impl Alphabet for Unit {
    type Symbol = ();
    type ValueIter = Once<()>;

    fn values(&self) -> Self::ValueIter {
        iter::once(())
    }

    fn contains(&self, _sym: &()) -> bool {
        true
    }

    fn num_values(&self) -> Option<usize> {
        Some(1)
    }
}

/// Conversion into an alphabet.
pub trait IntoAlphabet {
    /// The type of symbols in the alphabet.
    type Symbol;
    /// The type of alphabet we are turning this into.
    type IntoAlpha: Alphabet<Symbol = Self::Symbol>;

    /// Create an alphabet from this value.
    fn into_alphabet(self) -> Self::IntoAlpha;
}

impl<A: Alphabet> IntoAlphabet for A {
    type Symbol = A::Symbol;
    type IntoAlpha = A;

    fn into_alphabet(self) -> A {
        self
    }
}

/// An object which can be turned into an alphabet holding every value of `Σ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FullRange<Σ>(PhantomData<Σ>);

impl<Σ> FullRange<Σ> {
    /// Every value of `Σ`.
    pub fn new() -> Self {
        FullRange(PhantomData)
    }
}

impl<Σ> Default for FullRange<Σ> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Σ: Step + Bounded> IntoAlphabet for FullRange<Σ> {
    type Symbol = Σ;
    type IntoAlpha = Range<Σ>;

    fn into_alphabet(self) -> Range<Σ> {
        Range::new(Σ::MIN, Σ::MAX)
    }
}

impl<Σ: Step> IntoAlphabet for ops::Range<Σ> {
    type Symbol = Σ;
    type IntoAlpha = Range<Σ>;

    fn into_alphabet(self) -> Range<Σ> {
        if self.start >= self.end {
            return Range::Empty;
        }
        match self.end.backward(1) {
            Some(end) => Range::new(self.start, end),
            None => Range::Empty,
        }
    }
}

impl<Σ: Step> IntoAlphabet for ops::RangeInclusive<Σ> {
    type Symbol = Σ;
    type IntoAlpha = Range<Σ>;

    fn into_alphabet(self) -> Range<Σ> {
        let (start, end) = self.into_inner();
        Range::new(start, end)
    }
}

impl<Σ: Step + Bounded> IntoAlphabet for ops::RangeFrom<Σ> {
    type Symbol = Σ;
    type IntoAlpha = Range<Σ>;

    fn into_alphabet(self) -> Range<Σ> {
        Range::new(self.start, Σ::MAX)
    }
}

impl<Σ: Step + Bounded> IntoAlphabet for ops::RangeTo<Σ> {
    type Symbol = Σ;
    type IntoAlpha = Range<Σ>;

    fn into_alphabet(self) -> Range<Σ> {
        match self.end.backward(1) {
            Some(end) => Range::new(Σ::MIN, end),
            None => Range::Empty,
        }
    }
}

impl<Σ: Step + Bounded> IntoAlphabet for ops::RangeToInclusive<Σ> {
    type Symbol = Σ;
    type IntoAlpha = Range<Σ>;

    fn into_alphabet(self) -> Range<Σ> {
        Range::new(Σ::MIN, self.end)
    }
}
