//! faxc-sem - scoped name resolution, type resolution and arity checks.
//!
//! The walk is fail-fast: the first error aborts the whole analysis and
//! no partial symbol-table state is consumed downstream.

mod analysis;
mod scope;
mod types;

pub use crate::analysis::Analyzer;
pub use crate::scope::{RibKind, ScopeTree};
pub use crate::types::{SymbolEntry, SymbolKind, TypeKind};

use faxc_par::Program;
use faxc_util::{Diagnostic, Handler, Interner, Span};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SemaError {
    #[error("redeclaration of '{name}'")]
    Redeclaration { name: String },
    #[error("undeclared identifier: {name}")]
    UndeclaredIdentifier { name: String },
    #[error("'{name}' is not a function")]
    NotAFunction { name: String },
    #[error("wrong number of arguments to '{name}': expected {expected}, found {found}")]
    ArityMismatch { name: String, expected: usize, found: usize },
}

/// Analyze `program` once. Returns `true` iff the whole tree is
/// consistent; on failure a single diagnostic has been pushed onto
/// `handler` and nothing downstream should treat `program` as valid.
pub fn analyze(program: &Program, interner: &Interner, handler: &mut Handler) -> bool {
    match Analyzer::new(interner).analyze(program) {
        Ok(()) => true,
        Err(err) => {
            handler.emit(Diagnostic::error("semantic", err.to_string(), Span::DUMMY));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faxc_lex::tokenize;
    use faxc_par::parse;

    fn check(source: &str) -> bool {
        let mut interner = Interner::new();
        let tokens = tokenize(source, &mut interner).expect("lexing should succeed");
        let mut handler = Handler::new();
        let program = parse(&tokens, &interner, &mut handler);
        assert!(!handler.has_errors(), "source should parse cleanly");
        analyze(&program, &interner, &mut handler)
    }

    #[test]
    fn well_formed_program_passes() {
        assert!(check("int add(int a, int b) { return a + b; } int main() { return add(2, 3); }"));
    }

    #[test]
    fn undeclared_identifier_is_rejected() {
        assert!(!check("int main() { return x; }"));
    }

    #[test]
    fn wrong_argument_count_is_rejected() {
        assert!(!check("int f(int a) {} int main() { return f(1, 2); }"));
    }

    #[test]
    fn redeclaration_in_the_same_scope_is_rejected() {
        assert!(!check("int main() { int x; int x; return 0; }"));
    }

    #[test]
    fn shadowing_a_parameter_in_a_nested_block_is_allowed() {
        assert!(check("int f(int a) { { int a; } return a; }"));
    }

    #[test]
    fn calling_a_non_function_is_rejected() {
        assert!(!check("int main() { int f; return f(1); }"));
    }

    #[test]
    fn for_loop_init_is_visible_in_condition_and_body() {
        assert!(check("int main() { int s; for (int i = 0; i < 5; i = i + 1) { s = s + i; } return s; }"));
    }

    #[test]
    fn function_prototype_is_callable() {
        assert!(check("int f(int a); int main() { return f(1); }"));
    }
}
