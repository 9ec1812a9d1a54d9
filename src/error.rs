//! Error types shared by every stage of the pipeline.
//!
//! Each stage returns `CompileResult` instead of aborting; the binary is
//! the only place that turns an error into a process exit. `render` points
//! a caret at the offending character the way chibicc-style compilers do.

use snafu::Snafu;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Snafu)]
pub enum CompileError {
    /// The lexer hit a character that cannot start any token.
    #[snafu(display("unrecognized character '{ch}'"))]
    Lex { ch: char, loc: usize },

    /// The parser needed one token and found another. `expected` is
    /// display-ready: either a quoted lexeme or a phrase like
    /// "an expression".
    #[snafu(display("expected {expected}, but got \"{found}\""))]
    Syntax {
        expected: String,
        found: String,
        loc: usize,
    },

    /// The left side of an assignment was something other than a variable.
    #[snafu(display("left-hand side of an assignment is not a variable"))]
    InvalidAssignTarget,
}

impl CompileError {
    /// Character position the diagnostic points at, when one is known.
    pub fn loc(&self) -> Option<usize> {
        match self {
            CompileError::Lex { loc, .. } | CompileError::Syntax { loc, .. } => Some(*loc),
            CompileError::InvalidAssignTarget => None,
        }
    }

    /// Format the diagnostic against the source it came from.
    pub fn render(&self, source: &str) -> String {
        match self.loc() {
            Some(loc) => {
                let column = loc.min(source.chars().count()) + 1; // account for the opening quote
                format!("'{source}'\n{}^ {self}", " ".repeat(column))
            }
            None => self.to_string(),
        }
    }
}
