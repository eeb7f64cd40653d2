//! A lexical token from a source file

use crate::spanned::{Span, Spanned};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use strum::{EnumIter, EnumString, IntoStaticStr};

/// A lexical token from a source file.
///
/// The text of a token is kept verbatim; numbers are never parsed into values.
#[derive(Clone)]
pub struct Token {
    text: String,
    kind: TokenKind,
    span: Span,
}

impl Token {
    /// Creates a new token
    pub fn new(text: impl Into<String>, kind: TokenKind, span: Span) -> Self {
        Self {
            text: text.into(),
            kind,
            span,
        }
    }

    /// The lexeme this token was created from
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Checks whether this token is of the given kind
    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({:?})", self.kind, self.text)
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}

impl Eq for Token {}

/// A reserved word of the language. Matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter, strum::Display)]
pub enum Keyword {
    #[strum(serialize = "LABEL")]
    Label,
    #[strum(serialize = "GOTO")]
    Goto,
    #[strum(serialize = "PRINT")]
    Print,
    #[strum(serialize = "INPUT")]
    Input,
    #[strum(serialize = "LET")]
    Let,
    #[strum(serialize = "IF")]
    If,
    #[strum(serialize = "THEN")]
    Then,
    #[strum(serialize = "ENDIF")]
    EndIf,
    #[strum(serialize = "WHILE")]
    While,
    #[strum(serialize = "REPEAT")]
    Repeat,
    #[strum(serialize = "ENDWHILE")]
    EndWhile,
    #[strum(serialize = "FOR")]
    For,
    #[strum(serialize = "ENDFOR")]
    EndFor,
}

/// The kind for this token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// end of input, returned forever once the source is exhausted
    Eof,
    /// new line, which terminates statements
    Newline,

    // literals
    Number,
    Identifier,
    String,
    Boolean,

    Keyword(Keyword),

    /// =
    Eq,
    Plus,
    Minus,
    Asterisk,
    Slash,
    /// ==
    EqEq,
    /// !=
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    LParen,
    RParen,
    SemiColon,
}

impl TokenKind {
    /// Classifies an identifier-shaped word.
    ///
    /// An exact keyword match wins, then `true`/`false` in any case are booleans, anything
    /// else is an identifier.
    pub fn classify_word(word: &str) -> Self {
        if let Ok(keyword) = Keyword::from_str(word) {
            TokenKind::Keyword(keyword)
        } else if word.eq_ignore_ascii_case("true") || word.eq_ignore_ascii_case("false") {
            TokenKind::Boolean
        } else {
            TokenKind::Identifier
        }
    }

    /// `==`, `!=`, `<`, `<=`, `>` or `>=`
    pub fn is_comparison_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::EqEq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::LtEq
                | TokenKind::Gt
                | TokenKind::GtEq
        )
    }
}

impl From<Keyword> for TokenKind {
    fn from(value: Keyword) -> Self {
        TokenKind::Keyword(value)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Eof => "EOF",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Number => "NUMBER",
            TokenKind::Identifier => "IDENT",
            TokenKind::String => "STRING",
            TokenKind::Boolean => "BOOLEAN",
            TokenKind::Keyword(keyword) => (*keyword).into(),
            TokenKind::Eq => "EQ",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Asterisk => "ASTERISK",
            TokenKind::Slash => "SLASH",
            TokenKind::EqEq => "EQEQ",
            TokenKind::NotEq => "NOTEQ",
            TokenKind::Lt => "LT",
            TokenKind::LtEq => "LTEQ",
            TokenKind::Gt => "GT",
            TokenKind::GtEq => "GTEQ",
            TokenKind::LParen => "OPEN_PAREN",
            TokenKind::RParen => "CLOSE_PAREN",
            TokenKind::SemiColon => "SEMICOLON",
        };
        f.write_str(name)
    }
}
