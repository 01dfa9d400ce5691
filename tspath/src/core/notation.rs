//! Textual notation for cadences and logical forms.
//!
//! ```text
//! <x,y>                 point
//! leftonto(C)           step left onto C
//! rightonto(C)          step right onto C
//! coordres              resolution of the enclosing coordination
//! (C1 & C2 & ...)(R)    coordination of C1, C2, ... onto R
//! [C1, C2, ...]         logical form (brackets optional at top level)
//! ```

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::core::cadence::{Cadence, LogicalForm};
use crate::core::coordinate::COORDINATE_LIMIT;

/// Deepest nesting of cadences accepted by the parser.
pub const MAX_DEPTH: usize = 256;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<int>-?\d+)|(?P<ident>[A-Za-z_]+)|(?P<sym>[<>,()\[\]&]))")
        .expect("token regex is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at offset {offset}")]
pub struct NotationError {
    pub message: String,
    pub offset: usize,
}

impl NotationError {
    fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Int(i64),
    Ident(String),
    Sym(char),
}

/// Parse a single cadence.
pub fn parse_cadence<const N: usize>(text: &str) -> Result<Cadence<N>, NotationError> {
    let mut parser = Parser::new(text)?;
    let cadence = parser.cadence()?;
    parser.finish()?;
    Ok(cadence)
}

/// Parse a logical form: `[C1, C2, ...]` or a bare comma-separated list.
pub fn parse_form<const N: usize>(text: &str) -> Result<LogicalForm<N>, NotationError> {
    let mut parser = Parser::new(text)?;
    let mut cadences = Vec::new();
    if parser.peek() == Some(&Token::Sym('[')) {
        parser.advance();
        if parser.peek() != Some(&Token::Sym(']')) {
            cadences = parser.separated(',', Parser::cadence)?;
        }
        parser.expect(']')?;
    } else if parser.peek().is_some() {
        cadences = parser.separated(',', Parser::cadence)?;
    }
    parser.finish()?;
    Ok(LogicalForm::new(cadences))
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    end: usize,
    depth: usize,
}

impl Parser {
    fn new(text: &str) -> Result<Self, NotationError> {
        Ok(Self {
            tokens: tokenize(text)?,
            pos: 0,
            end: text.len(),
            depth: 0,
        })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(_, offset)| *offset)
            .unwrap_or(self.end)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(token, _)| token.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, symbol: char) -> Result<(), NotationError> {
        let offset = self.offset();
        match self.advance() {
            Some(Token::Sym(found)) if found == symbol => Ok(()),
            Some(other) => Err(NotationError::new(
                format!("expected '{symbol}', found {}", describe(&other)),
                offset,
            )),
            None => Err(NotationError::new(
                format!("expected '{symbol}', found end of input"),
                offset,
            )),
        }
    }

    fn finish(&self) -> Result<(), NotationError> {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(NotationError::new(
                format!("unexpected {}", describe(token)),
                self.offset(),
            )),
        }
    }

    fn separated<T>(
        &mut self,
        separator: char,
        mut item: impl FnMut(&mut Self) -> Result<T, NotationError>,
    ) -> Result<Vec<T>, NotationError> {
        let mut items = vec![item(self)?];
        while self.peek() == Some(&Token::Sym(separator)) {
            self.advance();
            items.push(item(self)?);
        }
        Ok(items)
    }

    fn cadence<const N: usize>(&mut self) -> Result<Cadence<N>, NotationError> {
        if self.depth >= MAX_DEPTH {
            return Err(NotationError::new(
                format!("nesting too deep (limit {MAX_DEPTH})"),
                self.offset(),
            ));
        }
        self.depth += 1;
        let cadence = self.node();
        self.depth -= 1;
        cadence
    }

    fn node<const N: usize>(&mut self) -> Result<Cadence<N>, NotationError> {
        let offset = self.offset();
        match self.advance() {
            Some(Token::Sym('<')) => {
                let values = self.separated(',', Parser::int)?;
                self.expect('>')?;
                let count = values.len();
                let values: [i64; N] = values.try_into().map_err(|_| {
                    NotationError::new(
                        format!("point has {count} coordinates, expected {N}"),
                        offset,
                    )
                })?;
                Ok(Cadence::point(values))
            }
            Some(Token::Ident(name)) => match name.as_str() {
                "leftonto" => Ok(Cadence::leftonto(self.argument()?)),
                "rightonto" => Ok(Cadence::rightonto(self.argument()?)),
                "coordres" => Ok(Cadence::CoordRes),
                _ => Err(NotationError::new(format!("unknown name '{name}'"), offset)),
            },
            Some(Token::Sym('(')) => {
                let parts = if self.peek() == Some(&Token::Sym(')')) {
                    Vec::new()
                } else {
                    self.separated('&', Parser::cadence)?
                };
                self.expect(')')?;
                let resolution = self.argument()?;
                Ok(Cadence::coord(parts, resolution))
            }
            Some(other) => Err(NotationError::new(
                format!("expected a cadence, found {}", describe(&other)),
                offset,
            )),
            None => Err(NotationError::new(
                "expected a cadence, found end of input",
                offset,
            )),
        }
    }

    fn argument<const N: usize>(&mut self) -> Result<Cadence<N>, NotationError> {
        self.expect('(')?;
        let inner = self.cadence()?;
        self.expect(')')?;
        Ok(inner)
    }

    fn int(&mut self) -> Result<i64, NotationError> {
        let offset = self.offset();
        match self.advance() {
            Some(Token::Int(value)) => Ok(value),
            Some(other) => Err(NotationError::new(
                format!("expected an integer, found {}", describe(&other)),
                offset,
            )),
            None => Err(NotationError::new(
                "expected an integer, found end of input",
                offset,
            )),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<(Token, usize)>, NotationError> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        let rest = &text[pos..];
        let trimmed = rest.trim_start();
        pos += rest.len() - trimmed.len();
        if trimmed.is_empty() {
            break;
        }
        let captures = TOKEN
            .captures(trimmed)
            .ok_or_else(|| NotationError::new("unrecognised character", pos))?;
        let token = if let Some(int) = captures.name("int") {
            let value = int
                .as_str()
                .parse::<i64>()
                .ok()
                .filter(|value| value.unsigned_abs() <= COORDINATE_LIMIT.unsigned_abs())
                .ok_or_else(|| {
                    NotationError::new(
                        format!("integer out of range (limit ±{COORDINATE_LIMIT})"),
                        pos,
                    )
                })?;
            Token::Int(value)
        } else if let Some(ident) = captures.name("ident") {
            Token::Ident(ident.as_str().to_ascii_lowercase())
        } else {
            let symbol = captures
                .name("sym")
                .and_then(|sym| sym.as_str().chars().next())
                .ok_or_else(|| NotationError::new("unrecognised character", pos))?;
            Token::Sym(symbol)
        };
        tokens.push((token, pos));
        pos += captures.get(0).map_or(0, |whole| whole.len());
    }
    Ok(tokens)
}

fn describe(token: &Token) -> String {
    match token {
        Token::Int(value) => format!("integer {value}"),
        Token::Ident(name) => format!("'{name}'"),
        Token::Sym(symbol) => format!("'{symbol}'"),
    }
}
