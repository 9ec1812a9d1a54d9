pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;

pub use error::{CompileError, CompileResult};

use codegen::Codegen;
use lexer::Lexer;
use parser::Parser;

/// Translate a source program into x86-64 assembly.
///
/// The three stages run in order and the first error aborts the run,
/// so no partial assembly is ever produced.
pub fn compile(source: &str) -> CompileResult<String> {
    let tokens = Lexer::tokenize(source)?;

    let mut parser = Parser::new(tokens);
    let program = parser.parse()?;

    Codegen::new().generate(&program)
}
