use std::mem;

/// Types with a notion of *successor* and *predecessor*, enough to enumerate a contiguous run of values.
///
/// Implementations must agree with `Ord`: `a.forward(n) == Some(b)` holds exactly when `steps_between(&a, &b) == Some(n)`, and then `a <= b`.
pub trait Step: Clone + Ord {
    /// Number of successor steps needed to get from `start` to `end`. `None` if `start > end` or the count overflows `usize`.
    fn steps_between(start: &Self, end: &Self) -> Option<usize>;

    /// The value `count` successor steps after `self`, `None` on overflow.
    fn forward(&self, count: usize) -> Option<Self>;

    /// The value `count` predecessor steps before `self`, `None` on underflow.
    fn backward(&self, count: usize) -> Option<Self>;
}

/// Types with a smallest and a largest value.
pub trait Bounded: Copy {
    /// Smallest value.
    const MIN: Self;
    /// Largest value.
    const MAX: Self;
}

macro_rules! unsigned_step {
    ($($t:ty),*) => {
        $(
            impl Step for $t {
                fn steps_between(start: &Self, end: &Self) -> Option<usize> {
                    if start <= end {
                        usize::try_from(*end - *start).ok()
                    } else {
                        None
                    }
                }

                fn forward(&self, count: usize) -> Option<Self> {
                    <$t>::try_from(count).ok().and_then(|count| self.checked_add(count))
                }

                fn backward(&self, count: usize) -> Option<Self> {
                    <$t>::try_from(count).ok().and_then(|count| self.checked_sub(count))
                }
            }

            impl Bounded for $t {
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;
            }
        )*
    };
}

// Signed steps go through i128, wide enough for every count a usize can hold.
macro_rules! signed_step {
    ($($t:ty),*) => {
        $(
            impl Step for $t {
                fn steps_between(start: &Self, end: &Self) -> Option<usize> {
                    if start <= end {
                        usize::try_from(end.abs_diff(*start)).ok()
                    } else {
                        None
                    }
                }

                fn forward(&self, count: usize) -> Option<Self> {
                    let count = i128::try_from(count).ok()?;
                    (*self as i128).checked_add(count).and_then(|value| <$t>::try_from(value).ok())
                }

                fn backward(&self, count: usize) -> Option<Self> {
                    let count = i128::try_from(count).ok()?;
                    (*self as i128).checked_sub(count).and_then(|value| <$t>::try_from(value).ok())
                }
            }

            impl Bounded for $t {
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;
            }
        )*
    };
}

unsigned_step!(u8, u16, u32, u64, u128, usize);
signed_step!(i8, i16, i32, i64, i128, isize);

const SURROGATE_START: u32 = 0xD800;
const SURROGATE_LEN: u32 = 0xE000 - 0xD800;

// Position of a char among all scalar values, with the surrogate block squeezed out.
fn scalar_index(c: char) -> u32 {
    let value = u32::from(c);
    if value >= SURROGATE_START { value - SURROGATE_LEN } else { value }
}

fn from_scalar_index(index: u32) -> Option<char> {
    let value = if index >= SURROGATE_START {
        index.checked_add(SURROGATE_LEN)?
    } else {
        index
    };
    char::from_u32(value)
}

impl Step for char {
    fn steps_between(start: &Self, end: &Self) -> Option<usize> {
        if start <= end {
            usize::try_from(scalar_index(*end) - scalar_index(*start)).ok()
        } else {
            None
        }
    }

    fn forward(&self, count: usize) -> Option<Self> {
        let count = u32::try_from(count).ok()?;
        scalar_index(*self).checked_add(count).and_then(from_scalar_index)
    }

    fn backward(&self, count: usize) -> Option<Self> {
        let count = u32::try_from(count).ok()?;
        scalar_index(*self).checked_sub(count).and_then(from_scalar_index)
    }
}

impl Bounded for char {
    const MIN: Self = '\0';
    const MAX: Self = char::MAX;
}

/// Set of contiguous elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Range<Sym: Step> {
    /// Non-empty range
    NonEmpty {
        /// Start value, inclusive
        start: Sym,
        /// End value, inclusive
        end: Sym,
    },
    /// Empty range
    Empty,
}

impl<Sym: Step> Range<Sym> {
    /// Range over `start..=end`, `Empty` when `start > end`.
    pub fn new(start: Sym, end: Sym) -> Self {
        if start <= end {
            Range::NonEmpty { start, end }
        } else {
            Range::Empty
        }
    }

    /// Returns `true` if the given element is within the range.
    pub fn contains(&self, sym: &Sym) -> bool {
        match self {
            Range::NonEmpty { start, end } => start <= sym && sym <= end,
            Range::Empty => false,
        }
    }

    /// Number of elements in the range, `None` if it does not fit in a `usize`.
    pub fn len(&self) -> Option<usize> {
        match self {
            Range::NonEmpty { start, end } => Step::steps_between(start, end)?.checked_add(1),
            Range::Empty => Some(0),
        }
    }

    /// Returns `true` for the empty range.
    pub fn is_empty(&self) -> bool {
        matches!(self, Range::Empty)
    }
}

impl<Sym: Step> Iterator for Range<Sym> {
    type Item = Sym;

    fn next(&mut self) -> Option<Sym> {
        match mem::replace(self, Range::Empty) {
            Range::NonEmpty { start, end } => {
                if start < end
                    && let Some(next) = start.forward(1)
                {
                    *self = Range::NonEmpty { start: next, end };
                }
                Some(start)
            }
            Range::Empty => None,
        }
    }
}
