use super::comment::skip_whitespace_and_comments;
use super::identifier::{lex_identifier, starts_identifier};
use super::number::lex_number;
use super::operator::{is_punctuator, lex_operator};
use super::string::lex_string;
use crate::cursor::Cursor;
use crate::token::{Keyword, Token, TokenKind};
use crate::LexError;
use faxc_util::{Interner, Span};

/// Pulls [`Token`]s one at a time out of a source string. Stops producing
/// real tokens as soon as one lexical error is hit; every call after that
/// returns `Eof`, mirroring the pipeline's fail-fast-per-stage contract.
pub struct Lexer<'src, 'intern> {
    cursor: Cursor<'src>,
    interner: &'intern mut Interner,
    failed: bool,
}

impl<'src, 'intern> Lexer<'src, 'intern> {
    pub fn new(source: &'src str, interner: &'intern mut Interner) -> Self {
        Self { cursor: Cursor::new(source), interner, failed: false }
    }

    /// Produce the next token, or `Err` the first time a lexical rule is
    /// violated. Once an error has been returned, every subsequent call
    /// yields `Eof` without re-scanning.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        if self.failed {
            return Ok(self.eof_token());
        }
        skip_whitespace_and_comments(&mut self.cursor);

        let start = self.cursor.byte_offset();
        if self.cursor.is_at_end() {
            return Ok(Token { kind: TokenKind::Eof, lexeme: self.interner.intern(""), span: Span::new(start, start) });
        }

        let c = self.cursor.current();
        let result: Result<(TokenKind, String), LexError> = if starts_identifier(c) {
            let text = lex_identifier(&mut self.cursor);
            let kind = match Keyword::from_str(&text) {
                Some(kw) => TokenKind::Keyword(kw),
                None => TokenKind::Identifier,
            };
            Ok((kind, text))
        } else if c.is_ascii_digit() {
            let text = lex_number(&mut self.cursor);
            Ok((TokenKind::Number, text))
        } else if c == '"' {
            lex_string(&mut self.cursor).map(|text| (TokenKind::String, text))
        } else if is_punctuator(c) {
            self.cursor.advance();
            Ok((TokenKind::Punctuator, c.to_string()))
        } else if is_operator_start(c) {
            let text = lex_operator(&mut self.cursor);
            Ok((TokenKind::Operator, text))
        } else {
            // Not a recognized operator-start char either: still emitted
            // as a one-character Operator token per spec.md's recognition
            // rules — the lexer cannot fail on a malformed token, only on
            // an unterminated string or comment. The parser rejects what
            // it cannot use.
            self.cursor.advance();
            Ok((TokenKind::Operator, c.to_string()))
        };

        match result {
            Ok((kind, text)) => {
                let end = self.cursor.byte_offset();
                Ok(Token { kind, lexeme: self.interner.intern(&text), span: Span::new(start, end) })
            }
            Err(err) => {
                self.failed = true;
                Err(err)
            }
        }
    }

    fn eof_token(&mut self) -> Token {
        let offset = self.cursor.byte_offset();
        Token { kind: TokenKind::Eof, lexeme: self.interner.intern(""), span: Span::new(offset, offset) }
    }
}

fn is_operator_start(c: char) -> bool {
    matches!(c, '=' | '!' | '<' | '>' | '+' | '-' | '&' | '|' | '*' | '/')
}
