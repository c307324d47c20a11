use crate::ast::*;
use crate::ParseError;
use faxc_lex::{Keyword, Token, TokenKind};
use faxc_util::{Handler, Interner, Span};

/// Recursive-descent state: a token slice with one-token lookahead and an
/// implicit one-token history (`previous`) used by productions that need
/// to look back at what they just consumed.
pub struct Parser<'t, 'i> {
    pub(crate) tokens: &'t [Token],
    pub(crate) pos: usize,
    pub(crate) interner: &'i Interner,
    pub(crate) handler: &'i mut Handler,
}

impl<'t, 'i> Parser<'t, 'i> {
    pub fn new(tokens: &'t [Token], interner: &'i Interner, handler: &'i mut Handler) -> Self {
        Self { tokens, pos: 0, interner, handler }
    }

    pub(crate) fn peek(&self) -> Token {
        self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub(crate) fn previous(&self) -> Token {
        self.tokens[self.pos.saturating_sub(1).min(self.tokens.len() - 1)]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    pub(crate) fn advance(&mut self) -> Token {
        let tok = self.peek();
        if !self.is_at_end() {
            self.pos += 1;
        }
        tok
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn check_punct(&self, c: char) -> bool {
        self.check(TokenKind::Punctuator) && self.lexeme_of(self.peek()) == c.to_string()
    }

    pub(crate) fn check_op(&self, op: &str) -> bool {
        self.check(TokenKind::Operator) && self.lexeme_of(self.peek()) == op
    }

    pub(crate) fn match_punct(&mut self, c: char) -> bool {
        if self.check_punct(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn match_op(&mut self, op: &str) -> bool {
        if self.check_op(op) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn match_keyword(&mut self, kw: Keyword) -> bool {
        if self.check(TokenKind::Keyword(kw)) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn lexeme_of(&self, token: Token) -> String {
        self.interner.resolve(token.lexeme).to_string()
    }

    pub(crate) fn expect_punct(&mut self, c: char) -> Result<(), ParseError> {
        if self.match_punct(c) {
            Ok(())
        } else {
            Err(self.unexpected(&c.to_string()))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<faxc_util::Symbol, ParseError> {
        if self.check(TokenKind::Identifier) {
            Ok(self.advance().lexeme)
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        let found = self.describe(self.peek());
        ParseError::UnexpectedToken { expected: expected.to_string(), found }
    }

    fn describe(&self, token: Token) -> String {
        match token.kind {
            TokenKind::Eof => "end of file".to_string(),
            _ => self.lexeme_of(token),
        }
    }

    /// Is the current token a declaration-starting type keyword?
    pub(crate) fn at_type_start(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Keyword(kw) if kw.is_type_start())
    }

    pub(crate) fn parse_type_name(&mut self) -> Result<TypeName, ParseError> {
        if self.match_keyword(Keyword::Int) {
            Ok(TypeName::Int)
        } else if self.match_keyword(Keyword::Char) {
            Ok(TypeName::Char)
        } else if self.match_keyword(Keyword::Void) {
            Ok(TypeName::Void)
        } else {
            Err(self.unexpected("type keyword"))
        }
    }

    /// Program ::= Declaration*
    ///
    /// Each declaration is parsed independently; a failure discards
    /// tokens up to the next type keyword (or EOF) and resumes, so a
    /// single run can surface more than one syntax error.
    pub fn parse_program(&mut self) -> Program {
        let mut decls = Vec::new();
        while !self.is_at_end() {
            match self.parse_declaration() {
                Ok(decl) => decls.push(decl),
                Err(err) => {
                    self.handler.emit(faxc_util::Diagnostic::error("parser", err.to_string(), self.peek().span));
                    self.resynchronize();
                }
            }
        }
        decls
    }

    fn resynchronize(&mut self) {
        while !self.is_at_end() && !self.at_type_start() {
            self.advance();
        }
    }

    /// Declaration ::= TypeKW Identifier FunctionTail   -- next is '('
    ///              |  TypeKW Identifier VariableTail   -- otherwise
    fn parse_declaration(&mut self) -> Result<Decl, ParseError> {
        let start = self.peek().span;
        let ty = self.parse_type_name()?;
        let name = self.expect_identifier()?;
        if self.check_punct('(') {
            self.parse_function_tail(ty, name, start)
        } else {
            let decl = self.parse_variable_tail(ty, name, start)?;
            Ok(Decl::Variable(decl))
        }
    }

    /// FunctionTail ::= '(' ParamList? ')' ( ';' | CompoundStmt )
    fn parse_function_tail(&mut self, return_type: TypeName, name: faxc_util::Symbol, start: Span) -> Result<Decl, ParseError> {
        self.expect_punct('(')?;
        let mut params = Vec::new();
        if !self.check_punct(')') {
            loop {
                let pspan = self.peek().span;
                let pty = self.parse_type_name()?;
                let pname = self.expect_identifier()?;
                params.push(Param { ty: pty, name: pname, span: pspan.to(self.previous().span) });
                if !self.match_punct(',') {
                    break;
                }
            }
        }
        self.expect_punct(')')?;
        let body = if self.match_punct(';') {
            None
        } else {
            Some(self.parse_compound_block()?)
        };
        let span = start.to(self.previous().span);
        Ok(Decl::Function(FunctionDecl { return_type, name, params, body, span }))
    }

    /// VariableTail ::= ( '=' Expression )? ';'
    fn parse_variable_tail(&mut self, ty: TypeName, name: faxc_util::Symbol, start: Span) -> Result<VariableDecl, ParseError> {
        let init = if self.match_op("=") {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect_punct(';')?;
        let span = start.to(self.previous().span);
        Ok(VariableDecl { ty, name, init, span })
    }

    /// CompoundStmt ::= '{' Statement* '}'
    pub(crate) fn parse_compound_block(&mut self) -> Result<Block, ParseError> {
        self.expect_punct('{')?;
        let mut stmts = Vec::new();
        while !self.check_punct('}') && !self.is_at_end() {
            stmts.push(self.parse_statement()?);
        }
        self.expect_punct('}')?;
        Ok(stmts)
    }
}
