//! Environment for variable bindings

use crate::ast::Variable;
use crate::error::{Result, WhileError};
use serde::{Deserialize, Serialize};

/// Ordered variable bindings of one program or sub-program
///
/// Insertion order is kept so bindings print in declaration order. Names are
/// unique: declaring an existing name or assigning an unknown one fails.
/// Variables are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment {
    vars: Vec<Variable>,
}

impl Environment {
    pub fn new() -> Self {
        Environment { vars: Vec::new() }
    }

    /// Add a new variable
    pub fn declare(&mut self, name: &str, value: i64) -> Result<()> {
        if self.contains(name) {
            return Err(WhileError::duplicate_declaration(name));
        }
        self.vars.push(Variable::new(name, value));
        Ok(())
    }

    /// Overwrite the value of an existing variable
    pub fn assign(&mut self, name: &str, value: i64) -> Result<()> {
        match self.vars.iter_mut().find(|v| v.name == name) {
            Some(var) => {
                var.value = value;
                Ok(())
            }
            None => Err(WhileError::assign_to_undeclared(name)),
        }
    }

    /// Current value of a variable
    pub fn lookup(&self, name: &str) -> Result<i64> {
        self.get(name).ok_or_else(|| WhileError::undefined_variable(name))
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.vars.iter().find(|v| v.name == name).map(|v| v.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.iter().any(|v| v.name == name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Bindings in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.vars.iter()
    }

    pub fn into_vars(self) -> Vec<Variable> {
        self.vars
    }
}

impl<'a> IntoIterator for &'a Environment {
    type Item = &'a Variable;
    type IntoIter = std::slice::Iter<'a, Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_declare_and_lookup() {
        let mut env = Environment::new();
        env.declare("x", 42).unwrap();
        assert_eq!(env.lookup("x").unwrap(), 42);
        assert_eq!(env.get("y"), None);
    }

    #[test]
    fn test_declare_duplicate() {
        let mut env = Environment::new();
        env.declare("x", 1).unwrap();
        let err = env.declare("x", 2).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateDeclaration("x".to_string()));
        // First value survives
        assert_eq!(env.lookup("x").unwrap(), 1);
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_assign_existing_variable() {
        let mut env = Environment::new();
        env.declare("x", 1).unwrap();
        env.assign("x", 42).unwrap();
        assert_eq!(env.lookup("x").unwrap(), 42);
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_assign_undeclared() {
        let mut env = Environment::new();
        env.declare("a", 1).unwrap();
        let err = env.assign("b", 2).unwrap_err();
        assert_eq!(err.kind, ErrorKind::AssignToUndeclared("b".to_string()));
        assert!(!env.contains("b"));
        assert_eq!(env.lookup("a").unwrap(), 1);
    }

    #[test]
    fn test_lookup_undefined() {
        let env = Environment::new();
        let err = env.lookup("missing").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UndefinedVariable("missing".to_string()));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut env = Environment::new();
        for name in ["zeta", "alpha", "mid"] {
            env.declare(name, 0).unwrap();
        }
        env.assign("alpha", 3).unwrap();
        let names: Vec<_> = env.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut env = Environment::new();
        env.declare("x", 1).unwrap();
        let mut copy = env.clone();
        copy.assign("x", 99).unwrap();
        copy.declare("y", 2).unwrap();
        assert_eq!(env.lookup("x").unwrap(), 1);
        assert!(!env.contains("y"));
    }

    #[test]
    fn test_default_is_empty() {
        let env = Environment::default();
        assert!(env.is_empty());
        assert_eq!(env, Environment::new());
    }

    #[test]
    fn test_into_iterator() {
        let mut env = Environment::new();
        env.declare("a", 1).unwrap();
        env.declare("b", 2).unwrap();
        let total: i64 = (&env).into_iter().map(|v| v.value).sum();
        assert_eq!(total, 3);
        assert_eq!(env.into_vars(), vec![Variable::new("a", 1), Variable::new("b", 2)]);
    }

    #[test]
    fn test_serializes_as_list() {
        let mut env = Environment::new();
        env.declare("x", 5).unwrap();
        let json = serde_json::to_string(&env).unwrap();
        assert_eq!(json, r#"[{"name":"x","value":5}]"#);
    }
}
