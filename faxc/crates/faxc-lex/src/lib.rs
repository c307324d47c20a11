//! faxc-lex - turns source text into a token stream.
//!
//! The lexer is total: every input byte is either consumed into a token
//! or skipped as whitespace/comment. It cannot fail on a malformed
//! token — a character it doesn't otherwise recognize is still emitted
//! as a one-character `Operator` token, leaving the parser to reject
//! what it cannot use. The only way lexing itself fails is an
//! unterminated string literal.

mod cursor;
mod lexer;
mod token;

pub use crate::lexer::Lexer;
pub use crate::token::{Keyword, Token, TokenKind};

use faxc_util::Interner;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString,
}

/// Tokenize `source` in full, stopping at the first [`LexError`].
/// On success the returned vector always ends with a `TokenKind::Eof`.
pub fn tokenize(source: &str, interner: &mut Interner) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source, interner);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let is_eof = matches!(token.kind, TokenKind::Eof);
        tokens.push(token);
        if is_eof {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_kinds(source: &str) -> Vec<TokenKind> {
        let mut interner = Interner::new();
        tokenize(source, &mut interner).expect("lexing should succeed").into_iter().map(|t| t.kind).collect()
    }

    fn lex_text(source: &str) -> Vec<String> {
        let mut interner = Interner::new();
        let tokens = tokenize(source, &mut interner).expect("lexing should succeed");
        tokens.iter().map(|t| interner.resolve(t.lexeme).to_string()).collect()
    }

    #[test]
    fn empty_source_is_just_eof() {
        assert_eq!(lex_kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn keywords_are_classified_not_identifiers() {
        assert_eq!(
            lex_kinds("int x"),
            vec![TokenKind::Keyword(Keyword::Int), TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn maximal_munch_prefers_longer_operators() {
        assert_eq!(lex_text("a == b"), vec!["a", "==", "b", ""]);
        assert_eq!(lex_text("a = b"), vec!["a", "=", "b", ""]);
    }

    #[test]
    fn star_and_slash_never_combine() {
        assert_eq!(lex_text("a * b / c"), vec!["a", "*", "b", "/", "c", ""]);
    }

    #[test]
    fn increment_and_subtraction_are_disambiguated_by_munch() {
        assert_eq!(lex_text("a++ - b"), vec!["a", "++", "-", "b", ""]);
    }

    #[test]
    fn line_and_block_comments_are_skipped() {
        assert_eq!(lex_kinds("// comment\nint /* mid */ x"), lex_kinds("int x"));
    }

    #[test]
    fn string_escapes_are_decoded() {
        assert_eq!(lex_text(r#""a\nb""#), vec!["a\nb", ""]);
    }

    #[test]
    fn unrecognized_escape_keeps_the_backslash_literally() {
        assert_eq!(lex_text(r#""a\qb""#), vec!["a\\qb", ""]);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let mut interner = Interner::new();
        assert_eq!(tokenize("\"abc", &mut interner), Err(LexError::UnterminatedString));
    }

    #[test]
    fn an_unrecognized_character_still_lexes_as_a_one_character_operator() {
        assert_eq!(lex_text("1 @ 2"), vec!["1", "@", "2", ""]);
    }

    #[test]
    fn punctuators_are_single_characters() {
        assert_eq!(lex_text("f(a, b);"), vec!["f", "(", "a", ",", "b", ")", ";", ""]);
    }

    #[test]
    fn identical_lexemes_intern_to_the_same_symbol() {
        let mut interner = Interner::new();
        let tokens = tokenize("x x", &mut interner).unwrap();
        assert_eq!(tokens[0].lexeme, tokens[1].lexeme);
    }
}
