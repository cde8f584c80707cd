//! Lexer for Emo using logos.
//!
//! [`Lexer`] is a lazy, forward-only token stream: each call to
//! [`Lexer::next_token`] scans exactly one more token. Once the input is
//! exhausted it keeps returning [`TokenKind::Eof`]. To restart from the
//! beginning, build a new `Lexer` over the same source.
//!
//! Characters that match no rule become [`TokenKind::Illegal`] tokens; the
//! lexer itself never fails. Reporting is left to the parser, which has no
//! prefix production for illegal tokens.

use emo_ir::{lookup_ident, Token, TokenKind};
use logos::Logos;

/// Raw token from logos (before keyword lookup).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r]+")] // Skip horizontal whitespace
#[logos(skip r"//[^\n]*")] // Skip line comments
enum RawToken {
    #[token("\n")]
    Newline,

    #[token("==")]
    Eq,
    #[token("=")]
    Assign,
    #[token("!=")]
    NotEq,
    #[token("!")]
    Bang,
    #[token("->")]
    Arrow,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,

    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // Decimal integer; range is checked by the parser
    #[regex(r"[0-9]+")]
    Int,

    // String literal: no escapes, may span lines
    #[regex(r#""[^"]*""#)]
    String,

    // Identifier or keyword
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Lazy token stream over a source string.
#[derive(Clone)]
pub struct Lexer<'src> {
    raw: logos::Lexer<'src, RawToken>,
    /// Set once `Eof` has been handed out through the `Iterator` impl.
    exhausted: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            raw: RawToken::lexer(source),
            exhausted: false,
        }
    }

    /// Scan the next token.
    ///
    /// Returns `Eof` at end of input, and keeps returning `Eof` on every
    /// later call.
    pub fn next_token(&mut self) -> Token {
        match self.raw.next() {
            None => Token::eof(),
            Some(Ok(raw)) => convert_token(raw, self.raw.slice()),
            Some(Err(())) => Token::new(TokenKind::Illegal, self.raw.slice()),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields every token including one trailing `Eof`, then stops.
    fn next(&mut self) -> Option<Token> {
        if self.exhausted {
            return None;
        }
        let token = self.next_token();
        if token.is(TokenKind::Eof) {
            self.exhausted = true;
        }
        Some(token)
    }
}

/// Lex a whole source string. The result always ends with one `Eof` token.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Convert a raw token to a `Token`, resolving keywords.
fn convert_token(raw: RawToken, slice: &str) -> Token {
    let kind = match raw {
        RawToken::Ident => lookup_ident(slice),
        RawToken::String => {
            let content = &slice[1..slice.len() - 1];
            return Token::new(TokenKind::String, content);
        }
        RawToken::Int => TokenKind::Int,

        RawToken::Newline => TokenKind::Newline,

        RawToken::Eq => TokenKind::Eq,
        RawToken::Assign => TokenKind::Assign,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Arrow => TokenKind::Arrow,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Asterisk => TokenKind::Asterisk,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,

        RawToken::Dot => TokenKind::Dot,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
    };
    Token::new(kind, slice)
}
