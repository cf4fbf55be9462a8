use thiserror::Error;

/// Errors from `regular` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Start state was not specified.
    #[error("start state was not specified")]
    MissingStartState,
    /// State specified was not valid for this automaton.
    #[error("state specified was not valid for this automaton")]
    InvalidState,
    /// Symbol not found in alphabet.
    #[error("symbol not found in alphabet")]
    SymbolNotInAlphabet,
    /// State not found.
    #[error("state not found")]
    StateNotFound,
    /// Attempted to perform operation with two different alphabets.
    #[error("attempted to perform operation with two different alphabets")]
    OperationWithNonEqualAlphabets,
}
