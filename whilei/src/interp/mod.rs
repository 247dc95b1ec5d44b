//! Interpreter for WHILE programs

mod builtins;
mod env;
mod eval;
mod trace;

pub use builtins::{Builtin, DecPolicy, eval_call};
pub use env::Environment;
pub use eval::{Interpreter, Options, interpret, interpret_with};
pub use trace::{Trace, interpret_traced};
