use crate::ast::*;
use crate::core::Parser;
use crate::ParseError;
use faxc_lex::TokenKind;

impl<'t, 'i> Parser<'t, 'i> {
    /// Expression ::= Assignment
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_assignment()
    }

    /// Assignment ::= Equality ( '=' Assignment )?   -- right-associative
    ///
    /// An `=` whose left side did not parse to a bare identifier is a
    /// parse error; no `AssignmentExpr` is ever built with another kind
    /// of target.
    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_equality()?;
        if self.match_op("=") {
            let left_span = left.span();
            let target = match left {
                Expr::Identifier(name, _) => name,
                other => return Err(ParseError::InvalidAssignmentTarget { span: other.span() }),
            };
            let value = self.parse_assignment()?;
            let span = left_span.to(value.span());
            return Ok(Expr::Assignment(AssignmentExpr { target, value: Box::new(value), span }));
        }
        Ok(left)
    }

    /// Equality ::= Comparison ( ( '==' | '!=' ) Comparison )*
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_comparison()?;
        loop {
            let op = if self.match_op("==") {
                BinOp::Eq
            } else if self.match_op("!=") {
                BinOp::Ne
            } else {
                break;
            };
            let right = self.parse_comparison()?;
            expr = combine(expr, op, right);
        }
        Ok(expr)
    }

    /// Comparison ::= Term ( ( '<' | '<=' | '>' | '>=' ) Term )*
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_term()?;
        loop {
            let op = if self.match_op("<=") {
                BinOp::Le
            } else if self.match_op(">=") {
                BinOp::Ge
            } else if self.match_op("<") {
                BinOp::Lt
            } else if self.match_op(">") {
                BinOp::Gt
            } else {
                break;
            };
            let right = self.parse_term()?;
            expr = combine(expr, op, right);
        }
        Ok(expr)
    }

    /// Term ::= Factor ( ( '+' | '-' ) Factor )*
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_factor()?;
        loop {
            let op = if self.match_op("+") {
                BinOp::Add
            } else if self.match_op("-") {
                BinOp::Sub
            } else {
                break;
            };
            let right = self.parse_factor()?;
            expr = combine(expr, op, right);
        }
        Ok(expr)
    }

    /// Factor ::= Unary ( ( '*' | '/' ) Unary )*
    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_unary()?;
        loop {
            let op = if self.match_op("*") {
                BinOp::Mul
            } else if self.match_op("/") {
                BinOp::Div
            } else {
                break;
            };
            let right = self.parse_unary()?;
            expr = combine(expr, op, right);
        }
        Ok(expr)
    }

    /// Unary ::= ( '!' | '-' ) Unary | Primary
    ///
    /// `&` and `*` are lexically available here per the design grammar
    /// but are rejected immediately: code generation has no lowering
    /// for pointer semantics, so the parser refuses them rather than
    /// building a node no later stage can consume.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let start = self.peek().span;
        let op = if self.match_op("!") {
            Some(UnOp::Not)
        } else if self.match_op("-") {
            Some(UnOp::Neg)
        } else {
            None
        };
        if op.is_none() && (self.check_op("&") || self.check_op("*")) {
            return Err(ParseError::UnsupportedUnaryOperator { op: self.lexeme_of(self.peek()), span: self.peek().span });
        }
        match op {
            Some(op) => {
                let operand = self.parse_unary()?;
                let span = start.to(operand.span());
                Ok(Expr::Unary(UnaryExpr { op, operand: Box::new(operand), span }))
            }
            None => self.parse_primary(),
        }
    }

    /// Primary ::= Number | String | Identifier Call? | '(' Expression ')'
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek();
        match token.kind {
            TokenKind::Number => {
                self.advance();
                Ok(Expr::Number(token.lexeme, token.span))
            }
            TokenKind::String => {
                self.advance();
                Ok(Expr::String(token.lexeme, token.span))
            }
            TokenKind::Identifier => {
                self.advance();
                if self.check_punct('(') {
                    self.parse_call(token.lexeme, token.span)
                } else {
                    Ok(Expr::Identifier(token.lexeme, token.span))
                }
            }
            _ if self.match_punct('(') => {
                let expr = self.parse_expression()?;
                self.expect_punct(')')?;
                Ok(expr)
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    /// Call ::= '(' ( Expression ( ',' Expression )* )? ')'
    fn parse_call(&mut self, callee: faxc_util::Symbol, start: faxc_util::Span) -> Result<Expr, ParseError> {
        self.expect_punct('(')?;
        let mut args = Vec::new();
        if !self.check_punct(')') {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_punct(',') {
                    break;
                }
            }
        }
        self.expect_punct(')')?;
        let span = start.to(self.previous().span);
        Ok(Expr::Call(CallExpr { callee, args, span }))
    }
}

fn combine(left: Expr, op: BinOp, right: Expr) -> Expr {
    let span = left.span().to(right.span());
    Expr::Binary(BinaryExpr { op, left: Box::new(left), right: Box::new(right), span })
}
