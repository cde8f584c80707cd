//! Statement productions.
//!
//! Dispatch is keyword-driven: `import`, `define`, `var` and `return`
//! have their own productions, a bare newline or `;` is an empty
//! statement, and anything else is an expression statement.

use emo_ir::{
    is_constant_name, AssignExpr, BlockStmt, DefineStmt, Expr, ExpressionStmt, Identifier,
    ImportStmt, ReturnStmt, Stmt, TokenKind, VarStmt,
};

use crate::{ParseError, Parser, Precedence};

impl Parser<'_> {
    /// Parse one statement, recording any error and resynchronising.
    ///
    /// Returns `None` for empty statements and for failed ones.
    pub(crate) fn parse_statement_recovering(&mut self) -> Option<Stmt> {
        match self.parse_statement() {
            Ok(stmt) => stmt,
            Err(error) => {
                self.recover(error);
                None
            }
        }
    }

    fn parse_statement(&mut self) -> Result<Option<Stmt>, ParseError> {
        let stmt = match self.cur.kind {
            TokenKind::Newline | TokenKind::Semicolon => return Ok(None),
            TokenKind::Import => Stmt::Import(self.parse_import_statement()?),
            TokenKind::Define => Stmt::Define(self.parse_define_statement()?),
            TokenKind::Var => Stmt::Var(self.parse_var_statement()?),
            TokenKind::Return => Stmt::Return(self.parse_return_statement()?),
            _ => Stmt::Expression(self.parse_expression_statement()?),
        };
        Ok(Some(stmt))
    }

    fn parse_import_statement(&mut self) -> Result<ImportStmt, ParseError> {
        let token = self.cur.clone();
        self.next_token();
        let target = self.parse_expression(Precedence::Lowest)?;
        Ok(ImportStmt { token, target })
    }

    /// `define(NAME, value)`
    fn parse_define_statement(&mut self) -> Result<DefineStmt, ParseError> {
        let token = self.cur.clone();
        self.expect_peek(TokenKind::LParen)?;
        self.expect_peek(TokenKind::Ident)?;

        if !is_constant_name(&self.cur.literal) {
            return Err(ParseError::DefineNameNotUppercase {
                name: self.cur.literal.clone(),
            });
        }
        let name = Identifier::new(self.cur.clone());

        self.expect_peek(TokenKind::Comma)?;
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;

        Ok(DefineStmt { token, name, value })
    }

    /// `var name = value`
    fn parse_var_statement(&mut self) -> Result<VarStmt, ParseError> {
        let token = self.cur.clone();
        self.expect_peek(TokenKind::Ident)?;
        let name = Identifier::new(self.cur.clone());

        self.expect_peek(TokenKind::Assign)?;
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;

        Ok(VarStmt { token, name, value })
    }

    /// `return value`, or a bare `return` before a terminator or `}`.
    fn parse_return_statement(&mut self) -> Result<ReturnStmt, ParseError> {
        let token = self.cur.clone();
        if self.peek.kind.is_terminator() || self.peek_is(TokenKind::RBrace) {
            return Ok(ReturnStmt { token, value: None });
        }

        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        Ok(ReturnStmt {
            token,
            value: Some(value),
        })
    }

    /// A bare expression, or an assignment `target = value`.
    fn parse_expression_statement(&mut self) -> Result<ExpressionStmt, ParseError> {
        let token = self.cur.clone();
        let mut expression = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenKind::Assign) {
            let is_target = match &expression {
                Expr::Identifier(ident) => ident.token.kind == TokenKind::Ident,
                Expr::Dot(_) => true,
                _ => false,
            };
            if !is_target {
                return Err(ParseError::InvalidAssignTarget {
                    target: expression.to_string(),
                });
            }

            self.next_token();
            let assign_token = self.cur.clone();
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;
            expression = Expr::Assign(AssignExpr {
                token: assign_token,
                target: Box::new(expression),
                value: Box::new(value),
            });
        }

        Ok(ExpressionStmt { token, expression })
    }

    /// Parse `{ ... }` with `cur` on the opening brace. Returns with `cur`
    /// on the closing brace.
    pub(crate) fn parse_block_statement(&mut self) -> Result<BlockStmt, ParseError> {
        let depth = self.depth;
        let result = self.parse_block_statement_inner();
        self.depth = depth;
        result
    }

    fn parse_block_statement_inner(&mut self) -> Result<BlockStmt, ParseError> {
        if let Err(error) = self.enter_nesting() {
            self.skip_block();
            return Err(error);
        }
        let token = self.cur.clone();
        let mut statements = Vec::new();
        self.next_token();

        while !self.cur_is(TokenKind::RBrace) && !self.cur_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement_recovering() {
                statements.push(stmt);
            }
            self.next_token();
        }

        if self.cur_is(TokenKind::Eof) {
            return Err(ParseError::unexpected(TokenKind::RBrace, &self.cur));
        }
        Ok(BlockStmt { token, statements })
    }

    /// Skip from the `{` in `cur` to its matching `}`, so the enclosing
    /// block does not mistake that brace for its own.
    fn skip_block(&mut self) {
        let mut depth = 1usize;
        while depth > 0 && !self.cur_is(TokenKind::Eof) {
            self.next_token();
            match self.cur.kind {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth -= 1,
                _ => {}
            }
        }
    }
}
