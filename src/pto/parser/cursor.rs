//! Entry cursor over the lexemes of one line
//!
//! Groups the flat token list of a data line into parameter entries. An entry
//! is a parameter name optionally followed by its value:
//!
//!     w3000            number
//!     a=0              reference to image 0
//!     n"image.jpg"     quoted string
//!     S0,100,0,50      number list
//!     flag             bareword
//!     zz=abc           bareword after '=', an error only for known keys
//!
//! A word glued to the end of an entry (`K0a1`) makes the whole run one
//! opaque entry that no section recognises.
//!
//! Typed accessors on [`Entry`] turn the value into what a section expects and
//! report a [`Diagnostic`] pointing at the offending token otherwise.

use std::ops::Range;

use crate::pto::error::Diagnostic;
use crate::pto::lexer::{Lexeme, Token};
use crate::pto::script::LinkedParam;

/// The value part of an entry
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EntryValue<'a> {
    Number(&'a str, Range<usize>),
    List(Vec<(&'a str, Range<usize>)>),
    Reference(usize, Range<usize>),
    /// Text after `=` that is not an image index, empty when nothing follows
    Bare(&'a str, Range<usize>),
    Quoted(&'a str, Range<usize>),
    Flag,
    Opaque,
}

/// One `name[value]` group of a data line
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Entry<'a> {
    pub key: &'a str,
    pub key_span: Range<usize>,
    pub value: EntryValue<'a>,
    /// Source text of the whole entry
    pub raw: &'a str,
}

pub(crate) struct Cursor<'a> {
    line: &'a str,
    lexemes: Vec<Lexeme<'a>>,
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(line: &'a str, lexemes: Vec<Lexeme<'a>>) -> Self {
        Self {
            line,
            lexemes,
            position: 0,
        }
    }

    fn peek(&self) -> Option<&Lexeme<'a>> {
        self.lexemes.get(self.position)
    }

    fn peek_token(&self) -> Option<Token> {
        self.peek().map(|l| l.token)
    }

    fn take(&mut self) -> Option<Lexeme<'a>> {
        let lexeme = self.lexemes.get(self.position).cloned();
        if lexeme.is_some() {
            self.position += 1;
        }
        lexeme
    }

    /// Read the next entry, `None` at end of line
    pub fn next_entry(&mut self) -> Result<Option<Entry<'a>>, Diagnostic> {
        let Some(key) = self.take() else {
            return Ok(None);
        };
        if key.token != Token::Word {
            return Err(Diagnostic::new(
                key.span,
                format!("expected a parameter name, found '{}'", key.text),
            ));
        }

        let (value, mut end) = match self.peek_token() {
            Some(Token::Number) => self.number_or_list()?,
            Some(Token::Quoted) => {
                let lexeme = self.take().ok_or_else(|| eol(&key))?;
                let inner = &lexeme.text[1..lexeme.text.len() - 1];
                let end = lexeme.span.end;
                (EntryValue::Quoted(inner, lexeme.span), end)
            }
            Some(Token::Equals) => self.reference()?,
            Some(Token::Comma) => {
                let comma = self.take().ok_or_else(|| eol(&key))?;
                return Err(Diagnostic::new(comma.span, "unexpected ','"));
            }
            Some(Token::Word) | None => (EntryValue::Flag, key.span.end),
        };

        if self
            .peek()
            .is_some_and(|next| next.span.start == end && next.token == Token::Word)
        {
            end = self.glued_run(end);
            let raw = &self.line[key.span.start..end];
            return Ok(Some(Entry {
                key: raw,
                key_span: key.span,
                value: EntryValue::Opaque,
                raw,
            }));
        }

        Ok(Some(Entry {
            key: key.text,
            key_span: key.span.clone(),
            raw: &self.line[key.span.start..end],
            value,
        }))
    }

    fn number_or_list(&mut self) -> Result<(EntryValue<'a>, usize), Diagnostic> {
        let Some(first) = self.take() else {
            return Err(Diagnostic::new(self.line.len()..self.line.len(), "missing value"));
        };
        if self.peek_token() != Some(Token::Comma) {
            let end = first.span.end;
            return Ok((EntryValue::Number(first.text, first.span), end));
        }

        let mut end = first.span.end;
        let mut items = vec![(first.text, first.span)];
        while self.peek_token() == Some(Token::Comma) {
            let comma = self.take().ok_or_else(|| Diagnostic::new(end..end, "missing value"))?;
            match self.take() {
                Some(item) if item.token == Token::Number => {
                    end = item.span.end;
                    items.push((item.text, item.span));
                }
                Some(other) => {
                    return Err(Diagnostic::new(
                        other.span,
                        format!("expected a number after ',', found '{}'", other.text),
                    ))
                }
                None => return Err(Diagnostic::new(comma.span, "list ends with ','")),
            }
        }
        Ok((EntryValue::List(items), end))
    }

    fn reference(&mut self) -> Result<(EntryValue<'a>, usize), Diagnostic> {
        let Some(equals) = self.take() else {
            return Err(Diagnostic::new(self.line.len()..self.line.len(), "missing value"));
        };
        let target = match self.peek() {
            Some(next)
                if next.span.start == equals.span.end
                    && matches!(next.token, Token::Number | Token::Word | Token::Quoted) =>
            {
                next.clone()
            }
            _ => {
                let end = equals.span.end;
                return Ok((EntryValue::Bare("", equals.span), end));
            }
        };
        self.position += 1;

        if target.token == Token::Number {
            let glued = self
                .peek()
                .is_some_and(|next| next.span.start == target.span.end);
            if let (Ok(index), false) = (target.text.parse::<usize>(), glued) {
                let end = target.span.end;
                return Ok((EntryValue::Reference(index, target.span), end));
            }
        }
        let start = target.span.start;
        let end = self.glued_run(target.span.end);
        Ok((EntryValue::Bare(&self.line[start..end], start..end), end))
    }

    /// Consume every lexeme that directly continues the text ending at `end`
    fn glued_run(&mut self, mut end: usize) -> usize {
        while let Some(next) = self.peek() {
            if next.span.start != end {
                break;
            }
            end = next.span.end;
            self.position += 1;
        }
        end
    }
}

fn bad_reference(text: &str, span: &Range<usize>) -> Diagnostic {
    if text.is_empty() {
        Diagnostic::new(span.clone(), "expected image index after '='")
    } else {
        Diagnostic::new(span.clone(), format!("'{}' is not an image index", text))
    }
}

fn eol(key: &Lexeme<'_>) -> Diagnostic {
    Diagnostic::new(key.span.clone(), "unexpected end of line")
}

impl<'a> Entry<'a> {
    fn value_span(&self) -> Range<usize> {
        match &self.value {
            EntryValue::Number(_, span)
            | EntryValue::Reference(_, span)
            | EntryValue::Bare(_, span)
            | EntryValue::Quoted(_, span) => span.clone(),
            EntryValue::List(items) => {
                let start = items.first().map(|(_, s)| s.start).unwrap_or(self.key_span.end);
                let end = items.last().map(|(_, s)| s.end).unwrap_or(self.key_span.end);
                start..end
            }
            EntryValue::Flag => self.key_span.clone(),
            EntryValue::Opaque => self.key_span.start..self.key_span.start + self.raw.len(),
        }
    }

    /// Whether this entry is a glued run no section can interpret
    pub fn is_opaque(&self) -> bool {
        matches!(self.value, EntryValue::Opaque)
    }

    fn expected(&self, what: &str) -> Diagnostic {
        match &self.value {
            EntryValue::Flag => Diagnostic::new(
                self.key_span.clone(),
                format!("parameter '{}' needs {}", self.key, what),
            ),
            _ => Diagnostic::new(
                self.value_span(),
                format!("parameter '{}' expects {}", self.key, what),
            ),
        }
    }

    /// A floating point value
    pub fn float(&self) -> Result<f64, Diagnostic> {
        match &self.value {
            EntryValue::Number(text, span) => parse_float(text, span),
            _ => Err(self.expected("a number")),
        }
    }

    /// An integer value that fits `T`
    pub fn integer<T: TryFrom<i64>>(&self) -> Result<T, Diagnostic> {
        match &self.value {
            EntryValue::Number(text, span) => parse_integer(text, span),
            _ => Err(self.expected("an integer")),
        }
    }

    /// A plain integer or an `=<image>` reference
    pub fn linked_integer(&self) -> Result<LinkedParam<i32>, Diagnostic> {
        match &self.value {
            EntryValue::Reference(index, _) => Ok(LinkedParam {
                value: 0,
                reference: Some(*index),
            }),
            EntryValue::Number(text, span) => {
                Ok(LinkedParam::with_value(parse_integer(text, span)?))
            }
            EntryValue::Bare(text, span) => Err(bad_reference(text, span)),
            _ => Err(self.expected("an integer or an image reference")),
        }
    }

    /// A plain number or an `=<image>` reference
    pub fn linked_float(&self) -> Result<LinkedParam<f64>, Diagnostic> {
        match &self.value {
            EntryValue::Reference(index, _) => Ok(LinkedParam {
                value: 0.0,
                reference: Some(*index),
            }),
            EntryValue::Number(text, span) => Ok(LinkedParam::with_value(parse_float(text, span)?)),
            EntryValue::Bare(text, span) => Err(bad_reference(text, span)),
            _ => Err(self.expected("a number or an image reference")),
        }
    }

    /// A quoted string, without its quotes
    pub fn string(&self) -> Result<&'a str, Diagnostic> {
        match &self.value {
            EntryValue::Quoted(text, _) => Ok(text),
            _ => Err(self.expected("a quoted string")),
        }
    }

    /// Four comma separated integers
    pub fn crop(&self) -> Result<[i32; 4], Diagnostic> {
        match &self.value {
            EntryValue::List(items) if items.len() == 4 => {
                let mut crop = [0; 4];
                for (slot, (text, span)) in crop.iter_mut().zip(items) {
                    *slot = parse_integer(text, span)?;
                }
                Ok(crop)
            }
            _ => Err(self.expected("four comma separated integers")),
        }
    }

    /// The numbers inside a quoted string, separated by whitespace
    pub fn quoted_numbers(&self) -> Result<Vec<f64>, Diagnostic> {
        let EntryValue::Quoted(text, span) = &self.value else {
            return Err(self.expected("a quoted list of numbers"));
        };
        // skip the opening quote
        let base = span.start + 1;
        let mut numbers = Vec::new();
        let mut offset = 0;
        for word in text.split_whitespace() {
            let start = offset + text[offset..].find(word).unwrap_or(0);
            offset = start + word.len();
            let word_span = base + start..base + offset;
            numbers.push(parse_float(word, &word_span)?);
        }
        Ok(numbers)
    }
}

fn parse_float(text: &str, span: &Range<usize>) -> Result<f64, Diagnostic> {
    text.parse::<f64>()
        .map_err(|_| Diagnostic::new(span.clone(), format!("'{}' is not a number", text)))
}

fn parse_integer<T: TryFrom<i64>>(text: &str, span: &Range<usize>) -> Result<T, Diagnostic> {
    let value = text
        .parse::<i64>()
        .map_err(|_| Diagnostic::new(span.clone(), format!("'{}' is not an integer", text)))?;
    T::try_from(value)
        .map_err(|_| Diagnostic::new(span.clone(), format!("{} is out of range", value)))
}
