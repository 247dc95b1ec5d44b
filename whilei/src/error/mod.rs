//! Error types and reporting

use crate::ast::Span;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, WhileError>;

/// What went wrong
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("program contains no statements")]
    MalformedProgram,

    #[error("no recognized operator in expression '{0}'")]
    UnrecognizedOperator(String),

    #[error("undefined variable '{0}'")]
    UndefinedVariable(String),

    #[error("variable '{0}' is already declared")]
    DuplicateDeclaration(String),

    #[error("cannot assign to undeclared variable '{0}'")]
    AssignToUndeclared(String),

    #[error("unrecognized function call '{0}'")]
    UnrecognizedFunction(String),

    /// A loop or call with a broken shape
    #[error("malformed statement '{0}': {1}")]
    MalformedStatement(String, &'static str),

    /// Non-empty text that is neither a loop, a declaration nor an assignment
    #[error("unrecognized statement '{0}'")]
    UnrecognizedStatement(String),

    /// Only raised when the caller asked for an iteration cap
    #[error("loop did not terminate within {0} iterations")]
    IterationLimit(u64),
}

impl ErrorKind {
    /// Short category name used as the diagnostic title
    pub fn category(&self) -> &'static str {
        match self {
            ErrorKind::MalformedProgram => "Malformed program",
            ErrorKind::UnrecognizedOperator(_) => "Unrecognized operator",
            ErrorKind::UndefinedVariable(_) => "Undefined variable",
            ErrorKind::DuplicateDeclaration(_) => "Duplicate declaration",
            ErrorKind::AssignToUndeclared(_) => "Assignment to undeclared variable",
            ErrorKind::UnrecognizedFunction(_) => "Unrecognized function",
            ErrorKind::MalformedStatement(..) => "Malformed statement",
            ErrorKind::UnrecognizedStatement(_) => "Unrecognized statement",
            ErrorKind::IterationLimit(_) => "Iteration limit",
        }
    }
}

/// Interpreter error, optionally located in the program source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct WhileError {
    pub kind: ErrorKind,
    pub span: Option<Span>,
}

impl WhileError {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, span: None }
    }

    pub fn malformed_program() -> Self {
        Self::new(ErrorKind::MalformedProgram)
    }

    pub fn unrecognized_operator(expr: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnrecognizedOperator(expr.into()))
    }

    pub fn undefined_variable(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedVariable(name.into()))
    }

    pub fn duplicate_declaration(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateDeclaration(name.into()))
    }

    pub fn assign_to_undeclared(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::AssignToUndeclared(name.into()))
    }

    pub fn unrecognized_function(call: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnrecognizedFunction(call.into()))
    }

    pub fn malformed_statement(text: impl Into<String>, reason: &'static str) -> Self {
        Self::new(ErrorKind::MalformedStatement(text.into(), reason))
    }

    pub fn unrecognized_statement(text: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnrecognizedStatement(text.into()))
    }

    pub fn iteration_limit(limit: u64) -> Self {
        Self::new(ErrorKind::IterationLimit(limit))
    }

    /// Attach `span` unless a more precise location is already known.
    pub fn or_span(mut self, span: Span) -> Self {
        self.span.get_or_insert(span);
        self
    }
}

impl From<ErrorKind> for WhileError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Report error with ariadne
pub fn report_error(filename: &str, source: &str, error: &WhileError) -> std::io::Result<()> {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let title = error.kind.category();

    if let Some(span) = error.span {
        let range: std::ops::Range<usize> = span.into();
        Report::build(ReportKind::Error, (filename, range.clone()))
            .with_message(format!("{title} error"))
            .with_label(
                Label::new((filename, range))
                    .with_message(error.to_string())
                    .with_color(Color::Red),
            )
            .finish()
            .eprint((filename, Source::from(source)))
    } else {
        Report::build(ReportKind::Error, (filename, 0..0))
            .with_message(format!("{title} error: {error}"))
            .finish()
            .eprint((filename, Source::from(source)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_variable_message_format() {
        let err = WhileError::undefined_variable("x1");
        assert_eq!(err.to_string(), "undefined variable 'x1'");
        assert_eq!(err.kind, ErrorKind::UndefinedVariable("x1".to_string()));
        assert_eq!(err.span, None);
    }

    #[test]
    fn test_duplicate_declaration_message_format() {
        let err = WhileError::duplicate_declaration("xo");
        assert_eq!(err.to_string(), "variable 'xo' is already declared");
    }

    #[test]
    fn test_assign_to_undeclared_message_format() {
        let err = WhileError::assign_to_undeclared("y");
        assert_eq!(err.to_string(), "cannot assign to undeclared variable 'y'");
    }

    #[test]
    fn test_unrecognized_operator_message_format() {
        let err = WhileError::unrecognized_operator("xo");
        assert_eq!(err.to_string(), "no recognized operator in expression 'xo'");
    }

    #[test]
    fn test_malformed_statement_message_format() {
        let err = WhileError::malformed_statement("WHILE(x < y) x = inc(x)", "missing DO");
        assert_eq!(err.to_string(), "malformed statement 'WHILE(x < y) x = inc(x)': missing DO");
    }

    #[test]
    fn test_iteration_limit_message_format() {
        let err = WhileError::iteration_limit(10);
        assert_eq!(err.to_string(), "loop did not terminate within 10 iterations");
    }

    #[test]
    fn test_or_span_sets_missing_span() {
        let err = WhileError::malformed_program().or_span(Span::new(3, 9));
        assert_eq!(err.span, Some(Span::new(3, 9)));
    }

    #[test]
    fn test_or_span_keeps_inner_span() {
        let err = WhileError::undefined_variable("x")
            .or_span(Span::new(20, 25))
            .or_span(Span::new(0, 40));
        assert_eq!(err.span, Some(Span::new(20, 25)));
    }

    #[test]
    fn test_from_error_kind() {
        let err: WhileError = ErrorKind::MalformedProgram.into();
        assert_eq!(err.kind, ErrorKind::MalformedProgram);
        assert_eq!(err.to_string(), "program contains no statements");
    }

    #[test]
    fn test_category_distinct() {
        let kinds = [
            ErrorKind::MalformedProgram,
            ErrorKind::UnrecognizedOperator(String::new()),
            ErrorKind::UndefinedVariable(String::new()),
            ErrorKind::DuplicateDeclaration(String::new()),
            ErrorKind::AssignToUndeclared(String::new()),
            ErrorKind::UnrecognizedFunction(String::new()),
            ErrorKind::MalformedStatement(String::new(), ""),
            ErrorKind::UnrecognizedStatement(String::new()),
            ErrorKind::IterationLimit(0),
        ];
        for i in 0..kinds.len() {
            for j in (i + 1)..kinds.len() {
                assert_ne!(kinds[i].category(), kinds[j].category());
            }
        }
    }

    #[test]
    fn test_error_is_std_error() {
        let err = WhileError::malformed_program();
        let std_err: &dyn std::error::Error = &err;
        assert!(std_err.source().is_none());
    }
}
