//! Responsible with converting source text into a token stream

use crate::error::{YolocError, YolocResult};
use crate::lexer::token_parsing::{insignificant_len, parse_token, TokenError};
use thiserror::Error;
use tracing::trace;
use yolo_tokens::spanned::{Span, Spanned};
use yolo_tokens::token::{Token, TokenKind};

mod token_parsing;

/// Responsible with converting source text into a token stream.
///
/// A lexer only moves forward. Once the source is exhausted, [`next_token`](Lexer::next_token)
/// keeps returning [`TokenKind::Eof`], and a new lexer must be created to tokenize the source again.
#[derive(Debug)]
pub struct Lexer {
    source: String,
    offset: usize,
    line: usize,
    column: usize,
    exhausted: bool,
}

impl Lexer {
    /// Creates a new lexer.
    ///
    /// A line terminator is appended to the source so the final statement is always terminated.
    pub fn new(source: &str) -> Self {
        Self {
            source: format!("{source}\n"),
            offset: 0,
            line: 1,
            column: 1,
            exhausted: false,
        }
    }

    /// Gets the next token, advancing past it
    pub fn next_token(&mut self) -> YolocResult<Token> {
        let skipped = insignificant_len(&self.source[self.offset..]);
        self.advance(skipped);

        let rest = &self.source[self.offset..];
        match parse_token(rest) {
            Ok((remaining, (kind, text))) => {
                let len = rest.len() - remaining.len();
                let token = Token::new(
                    text,
                    kind,
                    Span::new(self.offset, len, self.line, self.column),
                );
                self.advance(len);
                trace!("lexed {token:?} at {}", token.span());
                Ok(token)
            }
            Err(nom::Err::Failure(TokenError {
                input,
                fault: Some(fault),
            })) => {
                let at = self.offset + (rest.len() - input.len());
                Err(YolocError::new(fault, self.locate(at)))
            }
            Err(_) => {
                let found = rest.chars().next().unwrap_or('\0');
                Err(YolocError::new(
                    LexingError::UnknownToken(found),
                    self.locate(self.offset),
                ))
            }
        }
    }

    fn advance(&mut self, len: usize) {
        let (line, column) = step(self.line, self.column, &self.source[self.offset..][..len]);
        self.line = line;
        self.column = column;
        self.offset += len;
    }

    /// Gets a one character span at an offset at or after the cursor
    fn locate(&self, offset: usize) -> Span {
        let (line, column) = step(self.line, self.column, &self.source[self.offset..offset]);
        let len = self.source[offset..]
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(0);
        Span::new(offset, len, line, column)
    }
}

/// Moves a line and column past some text
fn step(mut line: usize, mut column: usize, text: &str) -> (usize, usize) {
    for c in text.chars() {
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

impl Iterator for Lexer {
    type Item = YolocResult<Token>;

    /// Yields every token before the end of input. Stops after the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.is(TokenKind::Eof) => {
                self.exhausted = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(e) => {
                self.exhausted = true;
                Some(Err(e))
            }
        }
    }
}

/// Tokenizes an entire source, excluding the final [`TokenKind::Eof`]
pub fn tokenize(source: &str) -> YolocResult<Vec<Token>> {
    Lexer::new(source).collect()
}

/// A fault in the characters of a source file. Lexing can't continue past one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexingError {
    #[error("expected \"!=\", got \"!\" followed by {0:?}")]
    ExpectedNotEq(char),
    #[error("illegal character in string: {0:?}")]
    IllegalStringChar(char),
    #[error("unterminated string")]
    UnterminatedString,
    #[error("number required after decimal point")]
    MissingDecimalDigits,
    #[error("unknown token: {0:?}")]
    UnknownToken(char),
}
