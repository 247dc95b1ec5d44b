//! Syntax definitions for WHILE programs
//!
//! WHILE source is never turned into a full tree. A program is a list of
//! [`Statement`]s (raw, trimmed text with a location); statements are
//! classified only when the executor reaches them. The only structured node
//! is the loop condition, an [`Expression`].

mod span;

pub use span::*;

use crate::error::Result;
use crate::interp::Environment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One `;`-delimited unit of source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Trimmed statement text
    pub text: String,
    /// Location of `text` in the program source
    pub span: Span,
}

impl Statement {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A named natural-number variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub value: i64,
}

impl Variable {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// A variable that is known by name only.
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self::new(name, 0)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.name, self.value)
    }
}

/// Comparison operators allowed in a loop condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    Lt,
    Gt,
    Eq,
    Ne,
}

impl CompareOp {
    /// Order in which the expression parser searches for operators.
    ///
    /// `<` and `>` are tried before `==` and `!=`; the first one found
    /// decides where the condition text is split.
    pub const SEARCH_ORDER: [CompareOp; 4] = [CompareOp::Lt, CompareOp::Gt, CompareOp::Eq, CompareOp::Ne];

    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
        }
    }

    pub fn apply(self, left: i64, right: i64) -> bool {
        match self {
            CompareOp::Lt => left < right,
            CompareOp::Gt => left > right,
            CompareOp::Eq => left == right,
            CompareOp::Ne => left != right,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A loop condition: two variables compared with one operator
///
/// The operands hold the values they had when last bound; the loop rebinds
/// them once per completed iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    pub op: CompareOp,
    pub left: Variable,
    pub right: Variable,
}

impl Expression {
    pub fn new(op: CompareOp, left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            op,
            left: Variable::unresolved(left),
            right: Variable::unresolved(right),
        }
    }

    /// Read both operand values from `env`.
    pub fn bind(&mut self, env: &Environment) -> Result<()> {
        self.left.value = env.lookup(&self.left.name)?;
        self.right.value = env.lookup(&self.right.name)?;
        Ok(())
    }

    /// Compare the currently bound operand values.
    pub fn evaluate(&self) -> bool {
        self.op.apply(self.left.value, self.right.value)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left.name, self.op, self.right.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_compare_op_apply() {
        assert!(CompareOp::Lt.apply(2, 3));
        assert!(!CompareOp::Lt.apply(3, 3));
        assert!(CompareOp::Gt.apply(3, 2));
        assert!(!CompareOp::Gt.apply(2, 2));
        assert!(CompareOp::Eq.apply(3, 3));
        assert!(!CompareOp::Eq.apply(3, 2));
        assert!(CompareOp::Ne.apply(3, 2));
        assert!(!CompareOp::Ne.apply(2, 2));
    }

    #[test]
    fn test_compare_op_search_order() {
        let symbols: Vec<_> = CompareOp::SEARCH_ORDER.iter().map(|op| op.symbol()).collect();
        assert_eq!(symbols, vec!["<", ">", "==", "!="]);
    }

    #[test]
    fn test_expression_evaluate_uses_bound_values() {
        let mut expr = Expression::new(CompareOp::Lt, "xo", "x1");
        expr.left.value = 2;
        expr.right.value = 3;
        assert!(expr.evaluate());
        expr.left.value = 3;
        assert!(!expr.evaluate());
    }

    #[test]
    fn test_expression_bind() {
        let mut env = Environment::new();
        env.declare("a", 5).unwrap();
        env.declare("b", 2).unwrap();

        let mut expr = Expression::new(CompareOp::Gt, "a", "b");
        expr.bind(&env).unwrap();
        assert_eq!(expr.left, Variable::new("a", 5));
        assert_eq!(expr.right, Variable::new("b", 2));
        assert!(expr.evaluate());
    }

    #[test]
    fn test_expression_bind_undefined() {
        let mut env = Environment::new();
        env.declare("a", 1).unwrap();
        let mut expr = Expression::new(CompareOp::Eq, "a", "missing");
        let err = expr.bind(&env).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UndefinedVariable("missing".to_string()));
    }

    #[test]
    fn test_expression_display() {
        let expr = Expression::new(CompareOp::Ne, "xo", "x1");
        assert_eq!(expr.to_string(), "xo != x1");
    }

    #[test]
    fn test_variable_display() {
        assert_eq!(Variable::new("x", 7).to_string(), "x => 7");
    }
}
