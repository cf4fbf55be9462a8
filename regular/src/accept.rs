/// Trait for objects that can decide whether or not a string belongs to the language they represent.
pub trait Accept {
    /// The type of symbols in the strings.
    type Symbol;

    /// Return `true` if the given string is a member of the language represented by this object.
    fn accept<I: IntoIterator<Item = Self::Symbol>>(self, string: I) -> bool;
}

/// Extension to the `Iterator` trait, lets the iterator be used directly as the string fed to an acceptor.
pub trait IterExt: Iterator {
    /// Return `true` if the string given by this iterator is a member of the language represented by `acceptor`.
    fn is_accepted<M: Accept<Symbol = Self::Item>>(self, acceptor: M) -> bool
    where
        Self: Sized,
    {
        acceptor.accept(self)
    }
}

impl<T: Iterator + ?Sized> IterExt for T {}
