//! whilei - WHILE language interpreter
//!
//! Programs are `;`-separated statements over integer variables: declarations
//! (`x := 1`), assignments (`x = inc(x)`) and `WHILE (a != b) DO ... OD` loops.

pub mod ast;
pub mod config;
pub mod error;
pub mod interp;
pub mod lexer;
pub mod parser;
pub mod repl;

pub use ast::Span;
pub use error::{ErrorKind, Result, WhileError};
pub use interp::{Environment, Interpreter, Options, interpret, interpret_traced, interpret_with};
