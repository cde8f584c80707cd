//! Syntax errors.

use emo_ir::{Token, TokenKind};

/// A syntax error recorded while parsing.
///
/// The `Display` form is the message shown to users; the driver prints it
/// as `Err: <message>`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// An `expect_peek` check failed.
    #[error("expected next token to be {expected}, got {found} instead")]
    UnexpectedToken { expected: TokenKind, found: Token },

    /// The token cannot start an expression.
    #[error("no prefix parse function for {kind} found")]
    NoPrefixParseFn { kind: TokenKind },

    #[error("could not parse {literal:?} as integer")]
    InvalidInteger { literal: String },

    #[error("define statement must have an uppercase identifier, got `{name}`")]
    DefineNameNotUppercase { name: String },

    #[error("duplicate member `{member}` in class {class}")]
    DuplicateMember { class: String, member: String },

    #[error("expected `var` or `func` in class {class}, got {found} instead")]
    UnexpectedClassMember { class: String, found: Token },

    #[error("invalid assignment target: {target}")]
    InvalidAssignTarget { target: String },

    /// Expressions and blocks nest deeper than [`MAX_NESTING_DEPTH`](crate::MAX_NESTING_DEPTH).
    #[error("expression nested too deeply (limit is {limit} levels)")]
    NestingTooDeep { limit: usize },
}

impl ParseError {
    #[cold]
    pub(crate) fn unexpected(expected: TokenKind, found: &Token) -> Self {
        ParseError::UnexpectedToken {
            expected,
            found: found.clone(),
        }
    }
}
