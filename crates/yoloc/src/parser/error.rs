//! Errors found while walking the grammar

use thiserror::Error;
use yolo_tokens::token::{Keyword, TokenKind};

/// The token stream doesn't match the grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("expected {expected}, got {found}")]
    ExpectedToken { expected: TokenKind, found: TokenKind },
    #[error("expected a new line after statement, got {found}")]
    MissingNewline { found: TokenKind },
    #[error("invalid statement at {text:?} ({kind})")]
    InvalidStatement { text: String, kind: TokenKind },
    #[error("expected comparison operator at {text:?}")]
    ExpectedComparison { text: String },
    #[error("unexpected token at {text:?} ({kind})")]
    UnexpectedToken { text: String, kind: TokenKind },
    #[error("reached end of file before {expected}")]
    UnterminatedBlock { expected: Keyword },
}

/// The program is well formed but breaks a naming rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticErrorKind {
    #[error("referencing variable before assignment: {0}")]
    UndeclaredVariable(String),
    #[error("label already exists: {0}")]
    DuplicateLabel(String),
    #[error("attempting to GOTO to undeclared label: {0}")]
    UndeclaredLabel(String),
}
