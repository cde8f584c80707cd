//! Pratt parser for Emo.
//!
//! The parser keeps two tokens of state, `cur` and `peek`, pulled lazily
//! from an [`emo_lexer::Lexer`]. Expressions are parsed by precedence
//! climbing: every token kind may register a prefix production (it starts
//! an expression) and an infix production (it continues one). Both tables
//! are built once in [`Parser::new`].
//!
//! Errors never abort the parse. A failed statement records its
//! [`ParseError`], the parser skips to the end of the line, and parsing
//! resumes with the next statement. Callers must not evaluate a program
//! whose [`ParseOutput`] has errors.
//!
//! # Position convention
//!
//! Every production starts with `cur` on its first token and returns with
//! `cur` on its last token. Statement loops call [`Parser::next_token`] to
//! move past it.

mod error;
mod grammar;
mod precedence;

pub use error::ParseError;
pub use precedence::Precedence;

use emo_ir::{Expr, Program, Token, TokenKind};
use emo_lexer::Lexer;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// Deepest syntax tree the parser will build.
///
/// Each prefix production, block and infix operator along one path counts
/// as a level. Deeper input fails with [`ParseError::NestingTooDeep`], which
/// keeps every later recursive walk over the tree (evaluation, display,
/// drop) within a bounded stack.
pub const MAX_NESTING_DEPTH: usize = 4096;

/// Production run when a token starts an expression.
type PrefixParseFn<'src> = fn(&mut Parser<'src>) -> Result<Expr, ParseError>;

/// Production run when a token follows a complete left operand.
type InfixParseFn<'src> = fn(&mut Parser<'src>, Expr) -> Result<Expr, ParseError>;

/// Parser state.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    cur: Token,
    peek: Token,
    errors: Vec<ParseError>,
    /// Nesting levels open on the current path.
    depth: usize,
    prefix_fns: FxHashMap<TokenKind, PrefixParseFn<'src>>,
    infix_fns: FxHashMap<TokenKind, InfixParseFn<'src>>,
}

impl<'src> Parser<'src> {
    pub fn new(mut lexer: Lexer<'src>) -> Self {
        let cur = lexer.next_token();
        let peek = lexer.next_token();

        let mut prefix_fns: FxHashMap<TokenKind, PrefixParseFn<'src>> = FxHashMap::default();
        prefix_fns.insert(TokenKind::Ident, Parser::parse_identifier);
        prefix_fns.insert(TokenKind::SelfLower, Parser::parse_identifier);
        prefix_fns.insert(TokenKind::Int, Parser::parse_integer_literal);
        prefix_fns.insert(TokenKind::String, Parser::parse_string_literal);
        prefix_fns.insert(TokenKind::True, Parser::parse_boolean);
        prefix_fns.insert(TokenKind::False, Parser::parse_boolean);
        prefix_fns.insert(TokenKind::Bang, Parser::parse_prefix_expression);
        prefix_fns.insert(TokenKind::Minus, Parser::parse_prefix_expression);
        prefix_fns.insert(TokenKind::LParen, Parser::parse_grouped_expression);
        prefix_fns.insert(TokenKind::LBracket, Parser::parse_array_literal);
        prefix_fns.insert(TokenKind::LBrace, Parser::parse_hash_literal);
        prefix_fns.insert(TokenKind::If, Parser::parse_if_expression);
        prefix_fns.insert(TokenKind::Function, Parser::parse_function_expression);
        prefix_fns.insert(TokenKind::Class, Parser::parse_class_expression);
        prefix_fns.insert(TokenKind::New, Parser::parse_new_expression);

        let mut infix_fns: FxHashMap<TokenKind, InfixParseFn<'src>> = FxHashMap::default();
        for kind in [
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Asterisk,
            TokenKind::Slash,
            TokenKind::Eq,
            TokenKind::NotEq,
            TokenKind::Lt,
            TokenKind::Gt,
        ] {
            infix_fns.insert(kind, Parser::parse_infix_expression);
        }
        infix_fns.insert(TokenKind::LParen, Parser::parse_call_expression);
        infix_fns.insert(TokenKind::LBracket, Parser::parse_index_expression);
        infix_fns.insert(TokenKind::Dot, Parser::parse_dot_expression);

        Parser {
            lexer,
            cur,
            peek,
            errors: Vec::new(),
            depth: 0,
            prefix_fns,
            infix_fns,
        }
    }

    /// Parse the whole input.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_program(mut self) -> ParseOutput {
        let mut statements = Vec::new();

        while !self.cur_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement_recovering() {
                trace!(%stmt, "parsed statement");
                statements.push(stmt);
            }
            self.next_token();
        }

        debug!(
            statements = statements.len(),
            errors = self.errors.len(),
            "parse finished"
        );
        ParseOutput {
            program: Program::new(statements),
            errors: self.errors,
        }
    }

    // Cursor

    fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.cur = std::mem::replace(&mut self.peek, next);
    }

    #[inline]
    fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur.is(kind)
    }

    #[inline]
    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    /// Advance if `peek` is `kind`, otherwise fail without moving.
    fn expect_peek(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.peek_is(kind) {
            self.next_token();
            Ok(())
        } else {
            Err(ParseError::unexpected(kind, &self.peek))
        }
    }

    /// Skip newlines in lookahead position. Used inside bracketed lists
    /// and class bodies, where line breaks carry no meaning.
    fn skip_peek_newlines(&mut self) {
        while self.peek_is(TokenKind::Newline) {
            self.next_token();
        }
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek.kind)
    }

    fn cur_precedence(&self) -> Precedence {
        Precedence::of(self.cur.kind)
    }

    // Nesting

    /// Open one nesting level. Callers restore `depth` when the
    /// production they opened it for returns.
    fn enter_nesting(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }
        self.depth += 1;
        Ok(())
    }

    // Recovery

    /// Record `error` and skip to the last token before the next statement
    /// boundary: a terminator or the `}` closing the enclosing block.
    /// Braces opened while skipping are skipped as a unit, so a broken
    /// function header does not leave its body behind as stray statements.
    fn recover(&mut self, error: ParseError) {
        trace!(%error, at = %self.cur, "recovering");
        self.errors.push(error);

        let mut depth = 0usize;
        while !self.peek_is(TokenKind::Eof) {
            if depth == 0 && (self.peek.kind.is_terminator() || self.peek_is(TokenKind::RBrace)) {
                break;
            }
            self.next_token();
            match self.cur.kind {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
    }
}

/// Result of parsing a source text.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseOutput {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse a source text.
pub fn parse(source: &str) -> ParseOutput {
    Parser::new(Lexer::new(source)).parse_program()
}

#[cfg(test)]
mod tests;
