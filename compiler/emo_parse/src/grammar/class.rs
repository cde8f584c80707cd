//! Class declarations.
//!
//! ```text
//! class Point {
//!     public var x: Int
//!     var secret: String
//!     func norm() -> Int { return self.x * self.x }
//!     private func helper() { ... }
//! }
//! ```
//!
//! Without a modifier, fields are private and methods are public.
//! Member names are unique across fields and methods; a duplicate is
//! reported and the first declaration wins.

use emo_ir::{ClassExpr, ClassField, ClassMethod, Expr, Identifier, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_class_expression(&mut self) -> Result<Expr, ParseError> {
        let token = self.cur.clone();
        self.expect_peek(TokenKind::Ident)?;
        let name = Identifier::new(self.cur.clone());
        self.expect_peek(TokenKind::LBrace)?;

        let mut class = ClassExpr {
            token,
            name,
            fields: Vec::new(),
            methods: Vec::new(),
        };

        loop {
            self.next_token();
            match self.cur.kind {
                TokenKind::RBrace => break,
                TokenKind::Eof => return Err(ParseError::unexpected(TokenKind::RBrace, &self.cur)),
                TokenKind::Newline | TokenKind::Semicolon => {}
                _ => {
                    if let Err(error) = self.parse_class_member(&mut class) {
                        self.recover(error);
                    }
                }
            }
        }

        Ok(Expr::Class(class))
    }

    /// One member declaration, with an optional visibility modifier.
    fn parse_class_member(&mut self, class: &mut ClassExpr) -> Result<(), ParseError> {
        let modifier = match self.cur.kind {
            TokenKind::Public => Some(true),
            TokenKind::Private => Some(false),
            _ => None,
        };
        if modifier.is_some() {
            self.skip_peek_newlines();
            self.next_token();
        }

        match self.cur.kind {
            TokenKind::Var => {
                self.expect_peek(TokenKind::Ident)?;
                let field = self.parse_typed_field()?;
                let member = ClassField {
                    public: modifier.unwrap_or(false),
                    field,
                };
                if self.check_unique_member(class, member.name()) {
                    class.fields.push(member);
                }
                Ok(())
            }
            TokenKind::Function => {
                let function = self.parse_function_definition()?;
                let member = ClassMethod {
                    public: modifier.unwrap_or(true),
                    function,
                };
                if self.check_unique_member(class, member.name()) {
                    class.methods.push(member);
                }
                Ok(())
            }
            _ => Err(ParseError::UnexpectedClassMember {
                class: class.name.value.clone(),
                found: self.cur.clone(),
            }),
        }
    }

    /// Record a duplicate-member error if `member` is already declared.
    fn check_unique_member(&mut self, class: &ClassExpr, member: &str) -> bool {
        if class.declares(member) {
            self.errors.push(ParseError::DuplicateMember {
                class: class.name.value.clone(),
                member: member.to_string(),
            });
            return false;
        }
        true
    }
}
