//! Built-in functions: `zero`, `val`, `inc`, `dec`

use super::env::Environment;
use crate::error::{Result, WhileError};
use crate::lexer::{Token, tokenize};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What `dec` does below the smallest representable value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecPolicy {
    /// Two's-complement arithmetic on `i64`; `dec(0)` is `-1`
    #[default]
    Wrapping,
    /// Natural-number arithmetic; `dec(0)` is `0`, and values already below
    /// zero are left unchanged
    Saturating,
}

/// Built-in function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Zero,
    Val,
    Inc,
    Dec,
}

impl Builtin {
    pub const ALL: [Builtin; 4] = [Builtin::Zero, Builtin::Val, Builtin::Inc, Builtin::Dec];

    /// Exact-name lookup; `incx` is not `inc`.
    pub fn from_name(name: &str) -> Option<Builtin> {
        Builtin::ALL.into_iter().find(|b| b.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Zero => "zero",
            Builtin::Val => "val",
            Builtin::Inc => "inc",
            Builtin::Dec => "dec",
        }
    }

    pub fn takes_argument(self) -> bool {
        !matches!(self, Builtin::Zero)
    }

    /// Apply to an already resolved argument (ignored by `zero`).
    pub fn apply(self, arg: i64, policy: DecPolicy) -> i64 {
        match self {
            Builtin::Zero => 0,
            Builtin::Val => arg,
            Builtin::Inc => arg.wrapping_add(1),
            Builtin::Dec => match policy {
                DecPolicy::Wrapping => arg.wrapping_sub(1),
                DecPolicy::Saturating => if arg > 0 { arg - 1 } else { arg },
            },
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Evaluate a call such as `inc(x1)` or `zero()` against `env`.
///
/// The argument is an integer literal or the name of a declared variable.
pub fn eval_call(text: &str, env: &Environment, policy: DecPolicy) -> Result<i64> {
    let tokens = tokenize(text)?;

    let name = match tokens.first() {
        Some(Token::Ident(name)) => name,
        _ => return Err(WhileError::unrecognized_function(text)),
    };
    let builtin = Builtin::from_name(name).ok_or_else(|| WhileError::unrecognized_function(text))?;

    let arg = match &tokens[1..] {
        [Token::LParen, Token::RParen] => None,
        [Token::LParen, arg, Token::RParen] => Some(arg),
        _ => {
            return Err(WhileError::malformed_statement(text, "expected `name()` or `name(argument)`"));
        }
    };

    let value = match (builtin.takes_argument(), arg) {
        (false, None) => 0,
        (true, Some(Token::IntLit(n))) => *n,
        (true, Some(Token::Ident(var))) => env.lookup(var)?,
        (false, Some(_)) => {
            return Err(WhileError::malformed_statement(text, "zero() takes no argument"));
        }
        (true, None) => {
            return Err(WhileError::malformed_statement(text, "missing argument"));
        }
        (true, Some(_)) => {
            return Err(WhileError::malformed_statement(text, "argument must be a literal or a variable"));
        }
    };

    Ok(builtin.apply(value, policy))
}
