//! Keyword table.
//!
//! The lexer matches the longest identifier-shaped run of characters and
//! then asks [`lookup_ident`] whether the text is reserved. Anything not in
//! the table is a plain identifier.
//!
//! Lookup is bucketed by length (keywords range from 2-7 chars) so most
//! identifiers are rejected after a single comparison.

use crate::TokenKind;

/// Resolve identifier text to its token kind.
///
/// Returns [`TokenKind::Ident`] for anything that is not a reserved word.
pub fn lookup_ident(text: &str) -> TokenKind {
    keyword(text).unwrap_or(TokenKind::Ident)
}

#[inline]
fn keyword(text: &str) -> Option<TokenKind> {
    match text.len() {
        2 => match text {
            "if" => Some(TokenKind::If),
            _ => None,
        },
        3 => match text {
            "var" => Some(TokenKind::Var),
            "new" => Some(TokenKind::New),
            _ => None,
        },
        4 => match text {
            "func" => Some(TokenKind::Function),
            "else" => Some(TokenKind::Else),
            "true" => Some(TokenKind::True),
            "self" => Some(TokenKind::SelfLower),
            "enum" => Some(TokenKind::Enum),
            _ => None,
        },
        5 => match text {
            "false" => Some(TokenKind::False),
            "class" => Some(TokenKind::Class),
            _ => None,
        },
        6 => match text {
            "import" => Some(TokenKind::Import),
            "define" => Some(TokenKind::Define),
            "return" => Some(TokenKind::Return),
            "public" => Some(TokenKind::Public),
            _ => None,
        },
        7 => match text {
            "private" => Some(TokenKind::Private),
            _ => None,
        },
        _ => None,
    }
}

/// Check the naming rule for `define`d constants: one or more of `A-Z` and `_`.
pub fn is_constant_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_uppercase() || b == b'_')
}
