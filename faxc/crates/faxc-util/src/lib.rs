//! faxc-util - shared foundation types for the faxc pipeline.
//!
//! Every stage (lexer, parser, semantic analyzer, code generator, driver)
//! depends on this crate for three things: interned strings ([`Symbol`]),
//! source locations ([`Span`]), and the diagnostic vocabulary used to
//! report and recover from failures ([`Handler`], [`Diagnostic`]).

mod diagnostic;
mod index_vec;
mod span;
mod symbol;

pub use diagnostic::{Diagnostic, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::Span;
pub use symbol::{Interner, Symbol, MAX_LEXEME_BYTES};

pub use rustc_hash::{FxHashMap, FxHashSet};
