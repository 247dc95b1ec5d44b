//! Statement executor

use super::builtins::{DecPolicy, eval_call};
use super::env::Environment;
use crate::ast::{Span, Statement};
use crate::error::{Result, WhileError};
use crate::lexer::is_identifier;
use crate::parser::{StatementKind, classify, parse_expression, split_loop, split_statements};
use tracing::{debug, trace};

/// Interpreter settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Behaviour of `dec` at the bottom of the integer range
    pub dec_policy: DecPolicy,
    /// Abort a single loop after this many iterations; `None` never aborts
    pub max_iterations: Option<u64>,
}

/// The interpreter
///
/// Owns one environment. Each call to [`Interpreter::run`] executes a whole
/// program against it, so bindings accumulate across runs (the REPL relies on
/// this). Effects of statements that ran before an error are kept.
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    env: Environment,
    options: Options,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Options) -> Self {
        Interpreter {
            env: Environment::new(),
            options,
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn into_env(self) -> Environment {
        self.env
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Drop every binding
    pub fn reset(&mut self) {
        self.env = Environment::new();
    }

    /// Split `source` and execute it.
    pub fn run(&mut self, source: &str) -> Result<()> {
        let statements = split_statements(source)?;
        self.execute(&statements)
    }

    /// Execute statements in order, stopping at the first error.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = statements.len()))]
    pub fn execute(&mut self, statements: &[Statement]) -> Result<()> {
        for stmt in statements {
            self.execute_statement(stmt).map_err(|e| e.or_span(stmt.span))?;
        }
        Ok(())
    }

    fn execute_statement(&mut self, stmt: &Statement) -> Result<()> {
        let kind = classify(&stmt.text);
        debug!(statement = %stmt.text, ?kind, "execute");

        match kind {
            StatementKind::Empty => Ok(()),
            StatementKind::Loop => self.execute_loop(stmt),
            StatementKind::Declaration { name, value } => {
                check_name(name, stmt)?;
                if self.env.contains(name) {
                    return Err(WhileError::duplicate_declaration(name));
                }
                let value = self.eval_value(value)?;
                self.env.declare(name, value)
            }
            StatementKind::Assignment { name, value } => {
                check_name(name, stmt)?;
                if !self.env.contains(name) {
                    return Err(WhileError::assign_to_undeclared(name));
                }
                let value = self.eval_value(value)?;
                self.env.assign(name, value)
            }
            StatementKind::Unrecognized => Err(WhileError::unrecognized_statement(&stmt.text)),
        }
    }

    /// Right-hand side of `:=` or `=`: an integer literal, else a call.
    fn eval_value(&self, text: &str) -> Result<i64> {
        match text.parse::<i64>() {
            Ok(value) => Ok(value),
            Err(_) => eval_call(text, &self.env, self.options.dec_policy),
        }
    }

    /// Run `WHILE (cond) DO body OD`.
    ///
    /// The body runs as a sub-program on a copy of the current environment.
    /// The condition operands are read at entry and re-read from the copy after
    /// each full pass over the body. When the loop ends, the copy replaces the
    /// current environment as a whole, so every variable the body touched is
    /// visible afterwards. The copy is kept even if the body fails.
    fn execute_loop(&mut self, stmt: &Statement) -> Result<()> {
        let parts = split_loop(&stmt.text)?;
        let mut condition = parse_expression(parts.condition)?;
        condition.bind(&self.env)?;

        let body_span = Span::new(0, parts.body.len()).shifted(stmt.span.start + parts.body_offset);
        let body = split_statements(parts.body)
            .map_err(|e| e.or_span(body_span))?
            .into_iter()
            .map(|s| Statement::new(s.text, s.span.shifted(body_span.start)))
            .collect::<Vec<_>>();

        let mut sub = Interpreter {
            env: self.env.clone(),
            options: self.options.clone(),
        };

        debug!(%condition, body = parts.body, "loop entry");
        let mut iterations: u64 = 0;
        let outcome = loop {
            if !condition.evaluate() {
                break Ok(());
            }
            if let Some(limit) = self.options.max_iterations
                && iterations >= limit
            {
                break Err(WhileError::iteration_limit(limit));
            }
            trace!(
                iteration = iterations,
                left = condition.left.value,
                right = condition.right.value,
                "loop iteration"
            );
            if let Err(e) = sub.execute(&body) {
                break Err(e);
            }
            iterations += 1;
            if let Err(e) = condition.bind(&sub.env) {
                break Err(e);
            }
        };

        self.env = sub.env;
        debug!(iterations, "loop exit");
        outcome
    }
}

/// Interpret `source` with default options.
/// Only names a call could later refer to may be bound.
fn check_name(name: &str, stmt: &Statement) -> Result<()> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(WhileError::malformed_statement(&stmt.text, "invalid variable name"))
    }
}

pub fn interpret(source: &str) -> Result<Environment> {
    interpret_with(source, &Options::default())
}

/// Interpret `source` and return the final environment.
pub fn interpret_with(source: &str, options: &Options) -> Result<Environment> {
    let mut interp = Interpreter::with_options(options.clone());
    interp.run(source)?;
    Ok(interp.into_env())
}
