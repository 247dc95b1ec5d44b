//! Lexer implementation using logos

mod token;

pub use token::Token;

use crate::error::{Result, WhileError};
use logos::Logos;

/// Tokenize the text of a function call.
///
/// Any character outside the call alphabet makes the whole text an
/// unrecognized call.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Token::lexer(source)
        .map(|result| result.map_err(|()| WhileError::unrecognized_function(source.trim())))
        .collect()
}

/// Whether `text` is exactly one identifier, the only names a call can refer to.
pub fn is_identifier(text: &str) -> bool {
    let mut lexer = Token::lexer(text);
    matches!(lexer.next(), Some(Ok(Token::Ident(_)))) && lexer.next().is_none()
}
