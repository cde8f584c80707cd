//! Function literals and definitions.
//!
//! ```text
//! func add(a: Int, b: Int) -> Int { return a + b }
//! var f = func(a: Int) -> (Int, String) { ... }
//! ```

use std::rc::Rc;

use emo_ir::{
    Expr, FunctionDecl, FunctionDefinition, FunctionLiteral, Identifier, TokenKind, TypedField,
};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `func` in prefix position: a definition when a name follows,
    /// otherwise an anonymous literal.
    pub(crate) fn parse_function_expression(&mut self) -> Result<Expr, ParseError> {
        if self.peek_is(TokenKind::Ident) {
            Ok(Expr::FunctionDefinition(self.parse_function_definition()?))
        } else {
            let token = self.cur.clone();
            let decl = self.parse_function_decl()?;
            Ok(Expr::FunctionLiteral(FunctionLiteral {
                token,
                decl: Rc::new(decl),
            }))
        }
    }

    /// `func name(params) -> Ret { body }` with `cur` on `func`.
    pub(crate) fn parse_function_definition(&mut self) -> Result<FunctionDefinition, ParseError> {
        let token = self.cur.clone();
        self.expect_peek(TokenKind::Ident)?;
        let name = Identifier::new(self.cur.clone());
        let decl = self.parse_function_decl()?;
        Ok(FunctionDefinition {
            token,
            name,
            decl: Rc::new(decl),
        })
    }

    /// Everything after the optional name: parameters, return types, body.
    fn parse_function_decl(&mut self) -> Result<FunctionDecl, ParseError> {
        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_function_parameters()?;

        let return_types = if self.peek_is(TokenKind::Arrow) {
            self.next_token();
            self.parse_return_types()?
        } else {
            Vec::new()
        };

        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_statement()?;

        Ok(FunctionDecl {
            parameters,
            return_types,
            body,
        })
    }

    fn parse_function_parameters(&mut self) -> Result<Vec<TypedField>, ParseError> {
        let mut parameters = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Ok(parameters);
        }

        loop {
            self.expect_peek(TokenKind::Ident)?;
            parameters.push(self.parse_typed_field()?);
            if !self.peek_is(TokenKind::Comma) {
                break;
            }
            self.next_token();
        }

        self.expect_peek(TokenKind::RParen)?;
        Ok(parameters)
    }

    /// `Type` or `(Type, Type, ...)` with `cur` on `->`.
    fn parse_return_types(&mut self) -> Result<Vec<Identifier>, ParseError> {
        if !self.peek_is(TokenKind::LParen) {
            self.expect_peek(TokenKind::Ident)?;
            return Ok(vec![Identifier::new(self.cur.clone())]);
        }

        self.next_token();
        let mut types = Vec::new();
        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Ok(types);
        }

        loop {
            self.expect_peek(TokenKind::Ident)?;
            types.push(Identifier::new(self.cur.clone()));
            if !self.peek_is(TokenKind::Comma) {
                break;
            }
            self.next_token();
        }

        self.expect_peek(TokenKind::RParen)?;
        Ok(types)
    }

    /// `name: Type` with `cur` on the name.
    pub(crate) fn parse_typed_field(&mut self) -> Result<TypedField, ParseError> {
        let name = Identifier::new(self.cur.clone());
        self.expect_peek(TokenKind::Colon)?;
        self.expect_peek(TokenKind::Ident)?;
        let type_name = Identifier::new(self.cur.clone());
        Ok(TypedField { name, type_name })
    }
}
