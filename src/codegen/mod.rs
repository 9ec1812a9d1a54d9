mod codegen;
mod local_variables;

pub use codegen::*;
