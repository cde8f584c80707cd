//! Binding power of infix tokens.

use emo_ir::TokenKind;

/// Precedence levels, weakest first.
///
/// An infix production only runs while the lookahead binds strictly
/// tighter than the level being parsed, which makes every binary
/// operator left-associative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    /// `==` `!=`
    Equals,
    /// `<` `>`
    LessGreater,
    /// `+` `-`
    Sum,
    /// `*` `/`
    Product,
    /// `-x` `!x`
    Prefix,
    /// `f(x)`
    Call,
    /// `a[i]`
    Index,
    /// `a.b`
    Dot,
}

impl Precedence {
    /// Precedence of `kind` in infix position. Tokens with no infix role
    /// are `Lowest`, which stops the expression loop.
    pub fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
            TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
            TokenKind::LParen => Precedence::Call,
            TokenKind::LBracket => Precedence::Index,
            TokenKind::Dot => Precedence::Dot,
            _ => Precedence::Lowest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_binding_strength() {
        assert!(Precedence::Lowest < Precedence::Equals);
        assert!(Precedence::Sum < Precedence::Product);
        assert!(Precedence::Prefix < Precedence::Call);
        assert!(Precedence::Index < Precedence::Dot);
    }

    #[test]
    fn non_operators_are_lowest() {
        assert_eq!(Precedence::of(TokenKind::Newline), Precedence::Lowest);
        assert_eq!(Precedence::of(TokenKind::Assign), Precedence::Lowest);
        assert_eq!(Precedence::of(TokenKind::Semicolon), Precedence::Lowest);
    }
}
