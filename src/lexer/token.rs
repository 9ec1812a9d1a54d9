use std::fmt;

use phf::phf_set;

/// Keywords are lexed as identifier runs and promoted afterwards, so
/// `returnx` stays a single identifier.
pub(super) static KEYWORDS: phf::Set<&'static str> = phf_set! {
    "return",
    "if",
    "else",
    "for",
    "while",
};

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// Punctuation or a keyword, matched by its exact lexeme.
    Reserved(&'static str),
    /// Decimal integer literal.
    Num(i64),
    /// Identifier.
    Ident(String),
    /// End of input.
    Eof,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Character index of the token's first character in the source.
    pub loc: usize,
}

/// The text shown for this token in diagnostics.
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Reserved(lexeme) => f.write_str(lexeme),
            TokenKind::Num(value) => write!(f, "{value}"),
            TokenKind::Ident(name) => f.write_str(name),
            TokenKind::Eof => f.write_str("EOF"),
        }
    }
}
