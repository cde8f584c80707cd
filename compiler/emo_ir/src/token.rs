//! Tokens for Emo.

use std::fmt;

/// Token kinds for Emo.
///
/// Kinds carry no payload; the source text of every token lives in
/// [`Token::literal`]. That keeps `TokenKind` `Copy` and usable as a
/// dispatch-table key in the parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A character the lexer does not recognise.
    Illegal,
    /// End of input. Repeats forever once reached.
    Eof,
    /// Line break. Terminates statements.
    Newline,

    Ident,
    Int,
    String,

    Assign,   // =
    Plus,     // +
    Minus,    // -
    Asterisk, // *
    Slash,    // /
    Bang,     // !

    Dot,       // .
    Comma,     // ,
    Semicolon, // ;
    Colon,     // :

    LParen,   // (
    RParen,   // )
    LBrace,   // {
    RBrace,   // }
    LBracket, // [
    RBracket, // ]

    Lt,    // <
    Gt,    // >
    Eq,    // ==
    NotEq, // !=

    Arrow, // ->

    Import,
    Function,
    Define,
    Var,
    If,
    Else,
    Return,
    True,
    False,
    Class,
    New,
    SelfLower,
    Enum,
    Public,
    Private,
}

impl TokenKind {
    /// Stable display name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Ident => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::String => "STRING",
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Bang => "!",
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Arrow => "->",
            TokenKind::Import => "IMPORT",
            TokenKind::Function => "FUNCTION",
            TokenKind::Define => "DEFINE",
            TokenKind::Var => "VAR",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Class => "CLASS",
            TokenKind::New => "NEW",
            TokenKind::SelfLower => "SELF",
            TokenKind::Enum => "ENUM",
            TokenKind::Public => "PUBLIC",
            TokenKind::Private => "PRIVATE",
        }
    }

    /// Returns `true` for tokens that end a statement.
    #[inline]
    pub fn is_terminator(self) -> bool {
        matches!(
            self,
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::Eof
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified lexical unit: kind plus the exact source text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Token {
            kind,
            literal: literal.into(),
        }
    }

    /// The end-of-input token.
    pub fn eof() -> Self {
        Token::new(TokenKind::Eof, "")
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == TokenKind::Newline {
            return f.write_str("<NEWLINE>");
        }
        write!(f, "({}):<{}>", self.kind, self.literal)
    }
}
