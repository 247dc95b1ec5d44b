//! Token definitions

use logos::Logos;
use std::fmt;

/// Token of a built-in function call such as `inc(x1)`
///
/// Only the right-hand side of a declaration or assignment is tokenized;
/// statements and loop conditions are recognized on raw text.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    // Out-of-range literals fail to lex
    #[regex(r"[+-]?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    IntLit(i64),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::IntLit(n) => write!(f, "{n}"),
            Token::Ident(s) => write!(f, "{s}"),
        }
    }
}
