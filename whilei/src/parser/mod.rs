//! Statement splitting and recognition
//!
//! WHILE has no grammar-driven parser: the source is cut on `;`, and each
//! statement is recognized by the keywords and operators it contains.

use crate::ast::{CompareOp, Expression, Span, Statement};
use crate::error::{Result, WhileError};


const STATEMENT_DELIMITER: char = ';';
const WHILE_KEYWORD: &str = "WHILE";
const DO_KEYWORD: &str = "DO";
const OD_KEYWORD: &str = "OD";
const DECLARE_OP: &str = ":=";
const ASSIGN_OP: &str = "=";

/// How a statement will be executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind<'a> {
    /// Nothing but whitespace between two delimiters
    Empty,
    /// `WHILE (cond) DO body OD`
    Loop,
    /// `name := value`
    Declaration { name: &'a str, value: &'a str },
    /// `name = value`
    Assignment { name: &'a str, value: &'a str },
    /// Anything else
    Unrecognized,
}

/// The pieces of a loop statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopParts<'a> {
    /// Text between the parentheses after `WHILE`, trimmed
    pub condition: &'a str,
    /// Text between `DO` and `OD`, trimmed
    pub body: &'a str,
    /// Byte offset of `body` within the statement text
    pub body_offset: usize,
}

/// Split source text into trimmed statements.
///
/// Empty pieces are kept (a trailing `;` yields one) so statement indices
/// match the source. Spans point at the trimmed text.
pub fn split_statements(source: &str) -> Result<Vec<Statement>> {
    if source.trim().is_empty() {
        return Err(WhileError::malformed_program());
    }

    let mut statements = Vec::new();
    let mut offset = 0;
    for piece in source.split(STATEMENT_DELIMITER) {
        let leading = piece.len() - piece.trim_start().len();
        let text = piece.trim();
        let start = offset + leading;
        statements.push(Statement::new(text, Span::new(start, start + text.len())));
        offset += piece.len() + STATEMENT_DELIMITER.len_utf8();
    }

    Ok(statements)
}

/// Decide what kind of statement `text` is.
///
/// Loops are checked first, then declarations, then assignments, so a loop
/// whose body assigns is still a loop and `:=` is never mistaken for `=`.
pub fn classify(text: &str) -> StatementKind<'_> {
    if text.is_empty() {
        StatementKind::Empty
    } else if text.contains(WHILE_KEYWORD) {
        StatementKind::Loop
    } else if let Some(pos) = text.find(DECLARE_OP) {
        StatementKind::Declaration {
            name: text[..pos].trim(),
            value: text[pos + DECLARE_OP.len()..].trim(),
        }
    } else if let Some(pos) = text.find(ASSIGN_OP) {
        StatementKind::Assignment {
            name: text[..pos].trim(),
            value: text[pos + ASSIGN_OP.len()..].trim(),
        }
    } else {
        StatementKind::Unrecognized
    }
}

/// Cut a loop statement into condition and body.
///
/// The body runs from the first `DO` after `WHILE` to the last `OD`, which
/// lets a body be a loop itself.
pub fn split_loop(text: &str) -> Result<LoopParts<'_>> {
    let malformed = |reason: &'static str| WhileError::malformed_statement(text, reason);

    let while_pos = text.find(WHILE_KEYWORD).ok_or_else(|| malformed("missing WHILE"))?;
    let head_start = while_pos + WHILE_KEYWORD.len();
    let do_pos = text[head_start..]
        .find(DO_KEYWORD)
        .map(|pos| head_start + pos)
        .ok_or_else(|| malformed("missing DO"))?;

    let head = &text[head_start..do_pos];
    let open = head.find('(').ok_or_else(|| malformed("missing '(' after WHILE"))?;
    let close = head[open..]
        .find(')')
        .map(|pos| open + pos)
        .ok_or_else(|| malformed("missing ')' before DO"))?;
    let condition = head[open + 1..close].trim();

    let body_start = do_pos + DO_KEYWORD.len();
    let od_pos = text
        .rfind(OD_KEYWORD)
        .filter(|&pos| pos >= body_start)
        .ok_or_else(|| malformed("missing OD"))?;
    let raw_body = &text[body_start..od_pos];
    let body_offset = body_start + (raw_body.len() - raw_body.trim_start().len());

    Ok(LoopParts {
        condition,
        body: raw_body.trim(),
        body_offset,
    })
}

/// Condition text of a loop statement, e.g. `xo != x1`.
pub fn loop_condition(text: &str) -> Result<&str> {
    split_loop(text).map(|parts| parts.condition)
}

/// Body text of a loop statement, e.g. `xo = inc(xo)`.
pub fn loop_body(text: &str) -> Result<&str> {
    split_loop(text).map(|parts| parts.body)
}

/// Parse a loop condition into an [`Expression`] with unresolved operands.
///
/// Operators are searched in [`CompareOp::SEARCH_ORDER`] by plain substring
/// search; the first hit splits the text into left and right operand names.
pub fn parse_expression(text: &str) -> Result<Expression> {
    for op in CompareOp::SEARCH_ORDER {
        if let Some(pos) = text.find(op.symbol()) {
            let left = text[..pos].trim();
            let right = text[pos + op.symbol().len()..].trim();
            return Ok(Expression::new(op, left, right));
        }
    }
    Err(WhileError::unrecognized_operator(text.trim()))
}
