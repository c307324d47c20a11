use crate::ast::*;
use crate::core::Parser;
use crate::ParseError;
use faxc_lex::Keyword;

impl<'t, 'i> Parser<'t, 'i> {
    /// Statement ::= CompoundStmt | IfStmt | WhileStmt | ForStmt | ReturnStmt
    ///            |  Declaration (if head is a type keyword) | ExpressionStmt
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        if self.check_punct('{') {
            return Ok(Stmt::Compound(self.parse_compound_block()?));
        }
        if self.at_type_start() {
            return Ok(Stmt::Decl(self.parse_local_variable_decl()?));
        }
        if self.match_keyword(Keyword::If) {
            return self.parse_if_stmt();
        }
        if self.match_keyword(Keyword::While) {
            return self.parse_while_stmt();
        }
        if self.match_keyword(Keyword::For) {
            return self.parse_for_stmt();
        }
        if self.match_keyword(Keyword::Return) {
            return self.parse_return_stmt();
        }
        self.parse_expression_stmt()
    }

    fn parse_local_variable_decl(&mut self) -> Result<VariableDecl, ParseError> {
        let start = self.peek().span;
        let ty = self.parse_type_name()?;
        let name = self.expect_identifier()?;
        let init = if self.match_op("=") {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect_punct(';')?;
        let span = start.to(self.previous().span);
        Ok(VariableDecl { ty, name, init, span })
    }

    /// IfStmt ::= 'if' '(' Expression ')' Statement ( 'else' Statement )?
    fn parse_if_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.expect_punct('(')?;
        let cond = self.parse_expression()?;
        self.expect_punct(')')?;
        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.match_keyword(Keyword::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Stmt::If(IfStmt { cond, then_branch, else_branch }))
    }

    /// WhileStmt ::= 'while' '(' Expression ')' Statement
    fn parse_while_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.expect_punct('(')?;
        let cond = self.parse_expression()?;
        self.expect_punct(')')?;
        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::While(WhileStmt { cond, body }))
    }

    /// ForStmt ::= 'for' '(' ForInit ';' Expression? ';' Expression? ')' Statement
    /// ForInit ::= ( VariableDecl | Expression | ε ) ';'
    fn parse_for_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.expect_punct('(')?;
        let init = if self.check_punct(';') {
            ForInit::Empty
        } else if self.at_type_start() {
            ForInit::Decl(self.parse_for_decl()?)
        } else {
            ForInit::Expr(self.parse_expression()?)
        };
        if !matches!(init, ForInit::Decl(_)) {
            self.expect_punct(';')?;
        }
        let cond = if self.check_punct(';') { None } else { Some(self.parse_expression()?) };
        self.expect_punct(';')?;
        let incr = if self.check_punct(')') { None } else { Some(self.parse_expression()?) };
        self.expect_punct(')')?;
        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::For(ForStmt { init, cond, incr, body }))
    }

    /// A `for` initializer declaration consumes its own trailing `;`,
    /// same as a statement-level declaration would.
    fn parse_for_decl(&mut self) -> Result<VariableDecl, ParseError> {
        self.parse_local_variable_decl()
    }

    /// ReturnStmt ::= 'return' Expression? ';'
    fn parse_return_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.previous().span;
        let value = if self.check_punct(';') { None } else { Some(self.parse_expression()?) };
        self.expect_punct(';')?;
        let span = start.to(self.previous().span);
        Ok(Stmt::Return(value, span))
    }

    /// ExpressionStmt ::= Expression? ';'
    fn parse_expression_stmt(&mut self) -> Result<Stmt, ParseError> {
        if self.match_punct(';') {
            return Ok(Stmt::Expr(None));
        }
        let expr = self.parse_expression()?;
        self.expect_punct(';')?;
        Ok(Stmt::Expr(Some(expr)))
    }
}
