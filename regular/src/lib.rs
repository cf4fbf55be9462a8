#![warn(missing_docs)]

//! Tools for manipulating regular languages. Deterministic finite automata over generic alphabets, built through a validating builder and combined with the usual language operations.
//!
//! ```
//! use regular::prelude::*;
//!
//! // Strings over {a, b} that end in `b`.
//! let mut builder = DFABuilder::new('a'..='b');
//! let s_0 = builder.new_state();
//! let s_1 = builder.new_state();
//! builder
//!     .transitions([(s_0, 'a', s_0), (s_0, 'b', s_1), (s_1, 'a', s_0), (s_1, 'b', s_1)])
//!     .unwrap();
//! builder.start_state(s_0).accept_states([s_1]);
//! let dfa = builder.build().unwrap();
//!
//! assert!(dfa.accept("aab".chars()));
//! assert!(!dfa.complement().accept("aab".chars()));
//! ```

#[macro_use]
mod macros;

/// Generalization of the accept/non-accept of regular expressions and automata. Connected to the larger concept of recognizing that some string belongs to a language.
pub mod accept;
/// Traits and implementations of generic sets of symbol, called alphabets in the context of languages and strings.
pub mod alphabet;
mod dfa;
mod error;
mod range;
mod state_set;
mod storage;

#[cfg(test)]
mod fixtures;

pub use dfa::{DFA, DFABuilder};
pub use error::Error;
pub use range::{Bounded, Range, Step};
pub use storage::{DFAStorage, DefaultDFAStorage, DenseDFAStorage, Indexable};

/// Common items to import.
///
/// ```
/// use regular::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        accept::{Accept, IterExt},
        alphabet::{Alphabet, IntoAlphabet},
        dfa::{DFA, DFABuilder},
        error::Error,
        storage::{DFAStorage, DefaultDFAStorage},
    };
}
