//! Lexer module for pto scripts
//!
//! A pto script is line oriented: every statement is one physical line, the
//! first character names the section and the rest is a list of parameters.
//! The lexer only ever sees that rest, one line at a time. Spans are reported
//! relative to the whole line so diagnostics can point into the source.

pub mod tokens;

use logos::Logos;
use std::ops::Range;
use tracing::trace;

use crate::pto::error::Diagnostic;
pub use tokens::Token;

/// A token with its text and its byte span in the source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub token: Token,
    pub text: &'a str,
    pub span: Range<usize>,
}

/// Tokenize `source`, which starts at byte `offset` of its line
///
/// Stops at the first character sequence that is not a token and reports it.
pub fn scan(source: &str, offset: usize) -> Result<Vec<Lexeme<'_>>, Diagnostic> {
    let mut lexer = Token::lexer(source);
    let mut lexemes = Vec::new();

    while let Some(result) = lexer.next() {
        let local = lexer.span();
        let span = local.start + offset..local.end + offset;
        match result {
            Ok(token) => {
                trace!(?token, text = lexer.slice(), "lexeme");
                lexemes.push(Lexeme {
                    token,
                    text: lexer.slice(),
                    span,
                });
            }
            Err(()) => {
                let message = if lexer.slice().starts_with('"') {
                    "unterminated quoted string"
                } else {
                    "unexpected character"
                };
                return Err(Diagnostic::new(span, message));
            }
        }
    }

    Ok(lexemes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_are_line_relative() {
        let lexemes = scan(" w10 n\"a.jpg\"", 1).unwrap();
        let found: Vec<(Token, &str, Range<usize>)> = lexemes
            .into_iter()
            .map(|l| (l.token, l.text, l.span))
            .collect();
        assert_eq!(
            found,
            vec![
                (Token::Word, "w", 2..3),
                (Token::Number, "10", 3..5),
                (Token::Word, "n", 6..7),
                (Token::Quoted, "\"a.jpg\"", 7..14),
            ]
        );
    }

    #[test]
    fn test_empty_rest() {
        assert!(scan("", 1).unwrap().is_empty());
        assert!(scan("   \t", 1).unwrap().is_empty());
    }

    #[test]
    fn test_unexpected_character() {
        let err = scan(" y-", 1).unwrap_err();
        assert_eq!(err.message, "unexpected character");
        assert_eq!(err.span.start, 3);
    }

    #[test]
    fn test_unterminated_quote() {
        let err = scan(" n\"abc", 1).unwrap_err();
        assert_eq!(err.message, "unterminated quoted string");
        assert_eq!(err.span.start, 3);
    }
}
