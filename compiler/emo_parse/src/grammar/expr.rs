//! Expression productions and the precedence-climbing loop.

use emo_ir::{
    ArrayLiteral, BooleanLiteral, CallExpr, DotExpr, Expr, HashLiteral, Identifier, IfExpr,
    IndexExpr, InfixExpr, InfixOp, IntegerLiteral, NewExpr, PrefixExpr, PrefixOp, StringLiteral,
    TokenKind,
};
use emo_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser, Precedence};

impl Parser<'_> {
    /// Parse an expression whose operators bind tighter than `precedence`.
    pub(crate) fn parse_expression(&mut self, precedence: Precedence) -> Result<Expr, ParseError> {
        let depth = self.depth;
        let result = ensure_sufficient_stack(|| self.parse_expression_inner(precedence));
        self.depth = depth;
        result
    }

    fn parse_expression_inner(&mut self, precedence: Precedence) -> Result<Expr, ParseError> {
        self.enter_nesting()?;
        let Some(prefix) = self.prefix_fns.get(&self.cur.kind).copied() else {
            return Err(ParseError::NoPrefixParseFn {
                kind: self.cur.kind,
            });
        };
        let mut left = prefix(self)?;

        while !self.peek_is(TokenKind::Newline) && precedence < self.peek_precedence() {
            let Some(infix) = self.infix_fns.get(&self.peek.kind).copied() else {
                return Ok(left);
            };
            // A left-associative chain deepens the tree without recursing.
            self.enter_nesting()?;
            self.next_token();
            left = infix(self, left)?;
        }

        Ok(left)
    }

    // Prefix productions

    pub(crate) fn parse_identifier(&mut self) -> Result<Expr, ParseError> {
        Ok(Expr::Identifier(Identifier::new(self.cur.clone())))
    }

    pub(crate) fn parse_integer_literal(&mut self) -> Result<Expr, ParseError> {
        let value = self
            .cur
            .literal
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidInteger {
                literal: self.cur.literal.clone(),
            })?;
        Ok(Expr::Integer(IntegerLiteral {
            token: self.cur.clone(),
            value,
        }))
    }

    pub(crate) fn parse_string_literal(&mut self) -> Result<Expr, ParseError> {
        Ok(Expr::Str(StringLiteral {
            token: self.cur.clone(),
            value: self.cur.literal.clone(),
        }))
    }

    pub(crate) fn parse_boolean(&mut self) -> Result<Expr, ParseError> {
        Ok(Expr::Boolean(BooleanLiteral {
            token: self.cur.clone(),
            value: self.cur_is(TokenKind::True),
        }))
    }

    pub(crate) fn parse_prefix_expression(&mut self) -> Result<Expr, ParseError> {
        let token = self.cur.clone();
        let op = if token.is(TokenKind::Bang) {
            PrefixOp::Not
        } else {
            PrefixOp::Neg
        };
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;
        Ok(Expr::Prefix(PrefixExpr {
            token,
            op,
            right: Box::new(right),
        }))
    }

    pub(crate) fn parse_grouped_expression(&mut self) -> Result<Expr, ParseError> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Ok(expr)
    }

    pub(crate) fn parse_array_literal(&mut self) -> Result<Expr, ParseError> {
        let token = self.cur.clone();
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        Ok(Expr::Array(ArrayLiteral { token, elements }))
    }

    /// `{key: value, ...}`; newlines between entries are ignored.
    pub(crate) fn parse_hash_literal(&mut self) -> Result<Expr, ParseError> {
        let token = self.cur.clone();
        let mut pairs = Vec::new();

        self.skip_peek_newlines();
        while !self.peek_is(TokenKind::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;
            self.expect_peek(TokenKind::Colon)?;
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));

            self.skip_peek_newlines();
            if !self.peek_is(TokenKind::RBrace) {
                self.expect_peek(TokenKind::Comma)?;
                self.skip_peek_newlines();
            }
        }
        self.expect_peek(TokenKind::RBrace)?;

        Ok(Expr::Hash(HashLiteral { token, pairs }))
    }

    /// `if cond { ... } else { ... }`. The `else` must follow the closing
    /// brace on the same line.
    pub(crate) fn parse_if_expression(&mut self) -> Result<Expr, ParseError> {
        let token = self.cur.clone();
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        self.expect_peek(TokenKind::LBrace)?;
        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();
            self.expect_peek(TokenKind::LBrace)?;
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Ok(Expr::If(IfExpr {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    /// `new(Class)` or `new(Class, data)`.
    pub(crate) fn parse_new_expression(&mut self) -> Result<Expr, ParseError> {
        let token = self.cur.clone();
        self.expect_peek(TokenKind::LParen)?;
        self.expect_peek(TokenKind::Ident)?;
        let class = Identifier::new(self.cur.clone());

        let data = if self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.skip_peek_newlines();
            self.next_token();
            Some(Box::new(self.parse_expression(Precedence::Lowest)?))
        } else {
            None
        };
        self.skip_peek_newlines();
        self.expect_peek(TokenKind::RParen)?;

        Ok(Expr::New(NewExpr { token, class, data }))
    }

    // Infix productions

    pub(crate) fn parse_infix_expression(&mut self, left: Expr) -> Result<Expr, ParseError> {
        let token = self.cur.clone();
        let op = match token.kind {
            TokenKind::Plus => InfixOp::Add,
            TokenKind::Minus => InfixOp::Sub,
            TokenKind::Asterisk => InfixOp::Mul,
            TokenKind::Slash => InfixOp::Div,
            TokenKind::Lt => InfixOp::Lt,
            TokenKind::Gt => InfixOp::Gt,
            TokenKind::Eq => InfixOp::Eq,
            TokenKind::NotEq => InfixOp::NotEq,
            kind => return Err(ParseError::NoPrefixParseFn { kind }),
        };

        let precedence = self.cur_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;

        Ok(Expr::Infix(InfixExpr {
            token,
            op,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    pub(crate) fn parse_call_expression(&mut self, function: Expr) -> Result<Expr, ParseError> {
        let token = self.cur.clone();
        let arguments = self.parse_expression_list(TokenKind::RParen)?;
        Ok(Expr::Call(CallExpr {
            token,
            function: Box::new(function),
            arguments,
        }))
    }

    pub(crate) fn parse_index_expression(&mut self, left: Expr) -> Result<Expr, ParseError> {
        let token = self.cur.clone();
        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RBracket)?;
        Ok(Expr::Index(IndexExpr {
            token,
            left: Box::new(left),
            index: Box::new(index),
        }))
    }

    /// `left.member`. The member is a plain name, so `a.b(1)` parses as a
    /// call of `a.b` and `a.b.c` nests to the left.
    pub(crate) fn parse_dot_expression(&mut self, left: Expr) -> Result<Expr, ParseError> {
        let token = self.cur.clone();
        self.expect_peek(TokenKind::Ident)?;
        let right = Expr::Identifier(Identifier::new(self.cur.clone()));
        Ok(Expr::Dot(DotExpr {
            token,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    /// Comma-separated expressions up to `end`, with `cur` on the opening
    /// delimiter. Newlines between items are ignored.
    pub(crate) fn parse_expression_list(&mut self, end: TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut list = Vec::new();

        self.skip_peek_newlines();
        if self.peek_is(end) {
            self.next_token();
            return Ok(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        self.skip_peek_newlines();
        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.skip_peek_newlines();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
            self.skip_peek_newlines();
        }

        self.expect_peek(end)?;
        Ok(list)
    }
}
