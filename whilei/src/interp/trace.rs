//! Human-readable record of a program run

use super::env::Environment;
use super::eval::{Interpreter, Options};
use crate::ast::Variable;
use crate::error::Result;
use crate::parser::split_statements;
use serde::Serialize;
use std::fmt;

/// What a verbose run shows: the input, its top-level statements, and the
/// bindings it ended with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Trace {
    pub source: String,
    pub statements: Vec<String>,
    /// Final bindings in declaration order; partial if the run failed
    pub bindings: Vec<Variable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input program: {}", self.source)?;
        writeln!(f, "Code blocks:")?;
        for (i, stmt) in self.statements.iter().enumerate() {
            writeln!(f, " - {i} block: {stmt}")?;
        }
        writeln!(f, "Output:")?;
        for var in &self.bindings {
            writeln!(f, "{var}")?;
        }
        Ok(())
    }
}

/// Interpret `source` and record a [`Trace`] of the run.
pub fn interpret_traced(source: &str, options: &Options) -> (Trace, Result<Environment>) {
    let mut trace = Trace {
        source: source.to_string(),
        ..Trace::default()
    };

    let statements = match split_statements(source) {
        Ok(statements) => statements,
        Err(e) => {
            trace.error = Some(e.to_string());
            return (trace, Err(e));
        }
    };
    trace.statements = statements.iter().map(|s| s.text.clone()).collect();

    let mut interp = Interpreter::with_options(options.clone());
    let result = interp.execute(&statements);
    let env = interp.into_env();
    trace.bindings = env.iter().cloned().collect();

    match result {
        Ok(()) => (trace, Ok(env)),
        Err(e) => {
            trace.error = Some(e.to_string());
            (trace, Err(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use insta::assert_snapshot;

    #[test]
    fn test_trace_display() {
        let (trace, result) = interpret_traced(
            "xo := 2; x1 := inc(3); WHILE(xo != x1) DO xo = inc(xo) OD",
            &Options::default(),
        );
        assert!(result.is_ok());
        assert_snapshot!(trace.to_string(), @r"
        Input program: xo := 2; x1 := inc(3); WHILE(xo != x1) DO xo = inc(xo) OD
        Code blocks:
         - 0 block: xo := 2
         - 1 block: x1 := inc(3)
         - 2 block: WHILE(xo != x1) DO xo = inc(xo) OD
        Output:
        xo => 4
        x1 => 4
        ");
    }

    #[test]
    fn test_trace_keeps_partial_bindings() {
        let (trace, result) = interpret_traced("a := 1; b = 2; c := 3", &Options::default());
        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::AssignToUndeclared("b".to_string()));
        assert_eq!(trace.statements.len(), 3);
        assert_eq!(trace.bindings, vec![Variable::new("a", 1)]);
        assert_eq!(trace.error.as_deref(), Some("cannot assign to undeclared variable 'b'"));
    }

    #[test]
    fn test_trace_malformed_program() {
        let (trace, result) = interpret_traced("", &Options::default());
        assert!(result.is_err());
        assert!(trace.statements.is_empty());
        assert!(trace.bindings.is_empty());
    }

    #[test]
    fn test_trace_json() {
        let (trace, _) = interpret_traced("x := 1", &Options::default());
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["statements"][0], "x := 1");
        assert_eq!(json["bindings"][0]["name"], "x");
        assert_eq!(json["bindings"][0]["value"], 1);
        assert!(json.get("error").is_none());
    }
}
