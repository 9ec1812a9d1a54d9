use crate::error::{CompileError, CompileResult};

use super::token::{Token, TokenKind, KEYWORDS};

/// Two-character operators must be tried before any of their
/// one-character prefixes.
const TWO_CHAR_SYMBOLS: [&str; 4] = ["==", "!=", "<=", ">="];
const ONE_CHAR_SYMBOLS: [&str; 12] = [
    "+", "-", "*", "/", "(", ")", "<", ">", "=", ";", "{", "}",
];

#[derive(Debug)]
pub struct Lexer {
    tokens: Vec<Token>,
    index: usize,
}

impl Lexer {
    fn new() -> Self {
        Self {
            tokens: vec![],
            index: 0,
        }
    }

    /// Record a token starting at the current position and advance past it.
    fn new_token(&mut self, kind: TokenKind, len: usize) {
        self.tokens.push(Token {
            kind,
            loc: self.index,
        });
        self.index += len;
    }

    fn lex_number(&mut self, chars: &[char]) -> CompileResult<()> {
        let s: String = chars.iter().take_while(|c| c.is_ascii_digit()).collect();
        let value = s.parse().map_err(|_| CompileError::Syntax {
            expected: "an integer literal".to_string(),
            found: s.clone(),
            loc: self.index,
        })?;
        self.new_token(TokenKind::Num(value), s.len());
        Ok(())
    }

    fn lex_identifier(&mut self, chars: &[char]) {
        let s: String = chars
            .iter()
            .take_while(|&&c| c.is_ascii_alphanumeric() || c == '_')
            .collect();
        let len = s.len();

        if let Some(keyword) = KEYWORDS.get_key(s.as_str()).copied() {
            self.new_token(TokenKind::Reserved(keyword), len);
        } else {
            self.new_token(TokenKind::Ident(s), len);
        }
    }

    fn scan(&mut self, source: &str) -> CompileResult<()> {
        let chars: Vec<_> = source.chars().collect();

        while self.index < chars.len() {
            let c = chars[self.index];

            if c.is_ascii_whitespace() {
                self.index += 1;
            } else if c.is_ascii_digit() {
                self.lex_number(&chars[self.index..])?;
            } else if c.is_ascii_alphabetic() || c == '_' {
                self.lex_identifier(&chars[self.index..]);
            } else {
                let rest: String = chars[self.index..].iter().take(2).collect();
                if let Some(symbol) = TWO_CHAR_SYMBOLS.into_iter().find(|sym| rest.starts_with(sym))
                {
                    self.new_token(TokenKind::Reserved(symbol), 2);
                } else if let Some(symbol) =
                    ONE_CHAR_SYMBOLS.into_iter().find(|sym| sym.starts_with(c))
                {
                    self.new_token(TokenKind::Reserved(symbol), 1);
                } else {
                    return Err(CompileError::Lex {
                        ch: c,
                        loc: self.index,
                    });
                }
            }
        }

        self.new_token(TokenKind::Eof, 0);
        Ok(())
    }

    /// Lex the whole source into an `Eof`-terminated token sequence.
    pub fn tokenize(source: &str) -> CompileResult<Vec<Token>> {
        let mut lexer = Lexer::new();
        lexer.scan(source)?;
        Ok(lexer.tokens)
    }
}
