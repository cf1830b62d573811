//! Token definitions for pto data lines
//!
//! The section keyword at the start of a line is read by the parser itself;
//! these tokens cover everything after it. The tokens are defined using the
//! logos derive macro.
use logos::Logos;
use serde::Serialize;
use std::fmt;

/// All tokens that can appear in the body of a pto line
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    // Parameter names and bareword flags
    #[regex(r"[A-Za-z_]+")]
    Word,

    // Integer and floating point literals, always with '.' as decimal point
    #[regex(r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?")]
    Number,

    // Cross-image reference marker
    #[token("=")]
    Equals,

    #[token(",")]
    Comma,

    #[regex(r#""[^"]*""#)]
    Quoted,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Token::Word => "<word>",
            Token::Number => "<number>",
            Token::Equals => "<equals>",
            Token::Comma => "<comma>",
            Token::Quoted => "<quoted>",
        };
        write!(f, "{}", name)
    }
}
