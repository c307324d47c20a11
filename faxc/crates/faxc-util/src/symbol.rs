//! String interning for identifiers, keywords, numbers and string lexemes.
//!
//! Every lexeme that survives past the lexer is interned here instead of
//! carried around as an owned `String`. A [`Symbol`] is a 4-byte handle into
//! an [`Interner`]'s arena, so tokens and AST nodes stay cheap to copy and
//! compare. The pipeline is single-threaded end to end (see the system's
//! concurrency model), so the interner is a plain arena owned by the
//! [`crate::Session`] rather than a global, lock-free table.

use rustc_hash::FxHashMap;
use std::fmt;

/// Source lexemes are bounded to 100 bytes including a NUL terminator, a
/// holdover invariant from the system this was distilled from. Interning
/// enforces it rather than storing it in a fixed-size buffer.
pub const MAX_LEXEME_BYTES: usize = 99;

/// A compact, interned string handle.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// The empty string; always interned first so it is stable across
    /// every [`Interner`] instance.
    pub const EMPTY: Symbol = Symbol(0);
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// Owns the backing storage for every [`Symbol`] minted during a
/// compilation. A compiler process is short-lived and single-threaded end
/// to end, so strings are leaked to `'static` rather than reference-counted
/// — the whole table, and everything in it, dies with the process.
pub struct Interner {
    strings: Vec<&'static str>,
    lookup: FxHashMap<&'static str, Symbol>,
}

impl Interner {
    pub fn new() -> Self {
        let mut interner = Self {
            strings: Vec::new(),
            lookup: FxHashMap::default(),
        };
        let empty = interner.intern("");
        debug_assert_eq!(empty, Symbol::EMPTY);
        interner
    }

    /// Intern `text`, returning a stable handle. Callers lexing source
    /// lexemes are expected to check the [`MAX_LEXEME_BYTES`] bound
    /// themselves and turn a violation into a diagnostic.
    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(&sym) = self.lookup.get(text) {
            return sym;
        }
        let leaked: &'static str = Box::leak(text.to_string().into_boxed_str());
        let sym = Symbol(self.strings.len() as u32);
        self.strings.push(leaked);
        self.lookup.insert(leaked, sym);
        sym
    }

    pub fn resolve(&self, symbol: Symbol) -> &str {
        self.strings[symbol.0 as usize]
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_interns_to_the_same_symbol() {
        let mut i = Interner::new();
        let a = i.intern("hello");
        let b = i.intern("hello");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_text_interns_to_distinct_symbols() {
        let mut i = Interner::new();
        let a = i.intern("hello");
        let b = i.intern("world");
        assert_ne!(a, b);
        assert_eq!(i.resolve(a), "hello");
        assert_eq!(i.resolve(b), "world");
    }

    #[test]
    fn empty_string_is_reserved_first() {
        let i = Interner::new();
        assert_eq!(i.resolve(Symbol::EMPTY), "");
    }
}
