//! A yoloc compilation error

use crate::lexer::LexingError;
use crate::parser::error::{SemanticErrorKind, SyntaxErrorKind};
use std::io;
use thiserror::Error;
use yolo_tokens::spanned::Span;
use yolo_tokens::{Rendered, SpannedError};

/// The kind of error
#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("lexing error: {0}")]
    Lex(#[from] LexingError),
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxErrorKind),
    #[error("semantic error: {0}")]
    Semantic(#[from] SemanticErrorKind),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// An error occurred while attempting to compile a yolo program.
///
/// Every error is fatal, compilation never continues past the first one.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct YolocError(SpannedError<ErrorKind>);

impl YolocError {
    /// Creates a new [YolocError] using a quick constructor
    #[inline]
    pub fn new(error: impl Into<ErrorKind>, location: impl Into<Option<Span>>) -> Self {
        Self(SpannedError::new(error.into(), location))
    }

    /// Gets the kind of error
    pub fn kind(&self) -> &ErrorKind {
        self.0.error()
    }

    /// Gets where this error occurred in the source
    pub fn location(&self) -> Option<Span> {
        self.0.location()
    }

    /// Renders this error with the surrounding lines of the source it was found in
    pub fn render<'a>(&'a self, source: &'a str) -> Rendered<'a, ErrorKind> {
        self.0.render(source)
    }
}

impl From<io::Error> for YolocError {
    fn from(value: io::Error) -> Self {
        Self::new(value, None)
    }
}

/// A type alias for general results in yoloc
pub type YolocResult<T> = Result<T, YolocError>;
