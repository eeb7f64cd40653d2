//! The grammar walk that drives code emission.
//!
//! ```text
//! program      ::= { statement }
//! statement    ::= "PRINT" ( expression | string ) nl
//!                | "IF" "(" comparison ")" "THEN" nl { statement } "ENDIF" nl
//!                | "WHILE" "(" comparison ")" "REPEAT" nl { statement } "ENDWHILE" nl
//!                | "FOR" "(" for_init ";" comparison ";" for_step ")" "REPEAT" nl { statement } "ENDFOR" nl
//!                | "LABEL" ident nl
//!                | "GOTO" ident nl
//!                | "LET" ident "=" expression nl
//!                | "INPUT" ident nl
//! for_init     ::= "LET" ident "=" expression
//! for_step     ::= ident "=" expression
//! comparison   ::= expression comparison_op expression { comparison_op expression }
//! expression   ::= term { ("+" | "-") term }
//! term         ::= unary { ("*" | "/") unary }
//! unary        ::= [ "+" | "-" ] primary
//! primary      ::= number | ident | "(" expression ")"
//! nl           ::= newline { newline }
//! ```

use crate::emitter::Emitter;
use crate::error::{ErrorKind, YolocError, YolocResult};
use crate::lexer::Lexer;
use crate::visualizer::{NoObserver, ParseObserver};
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};
use yolo_tokens::spanned::{Span, Spanned};
use yolo_tokens::token::{Token, TokenKind};

pub mod error;
mod expr;
mod statement;

pub use error::{SemanticErrorKind, SyntaxErrorKind};

/// Translates a token stream into C, writing into an [Emitter] as each grammar rule is recognized.
///
/// # Examples
/// ```
/// # use yoloc::emitter::Emitter;
/// # use yoloc::lexer::Lexer;
/// # use yoloc::parser::Parser;
/// let mut emitter = Emitter::new("out.c");
/// let parser = Parser::new(Lexer::new("LET a = 1\n"), &mut emitter).unwrap();
/// parser.program().unwrap();
/// assert!(emitter.code().starts_with("a = 1;\n"));
/// ```
#[derive(Debug)]
pub struct Parser<'e, O: ParseObserver = NoObserver> {
    lexer: Lexer,
    emitter: &'e mut Emitter,
    observer: O,
    current: Token,
    peek: Token,
    symbols: IndexSet<String>,
    labels_declared: IndexSet<String>,
    labels_gotoed: IndexMap<String, Span>,
}

/// The variables and labels declared by a successfully parsed program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    /// variables, in the order they were declared
    pub variables: IndexSet<String>,
    /// labels, in the order they were declared
    pub labels: IndexSet<String>,
    /// labels used by a `GOTO`, with the first place they were used
    pub gotos: IndexMap<String, Span>,
}

impl<'e> Parser<'e> {
    /// Creates a new parser with a given lexer, writing into `emitter`
    pub fn new(lexer: Lexer, emitter: &'e mut Emitter) -> YolocResult<Self> {
        Self::with_observer(lexer, emitter, NoObserver)
    }
}

impl<'e, O: ParseObserver> Parser<'e, O> {
    /// Creates a new parser that reports every rule it enters to an observer
    pub fn with_observer(mut lexer: Lexer, emitter: &'e mut Emitter, observer: O) -> YolocResult<Self> {
        let current = lexer.next_token()?;
        let peek = lexer.next_token()?;
        Ok(Self {
            lexer,
            emitter,
            observer,
            current,
            peek,
            symbols: IndexSet::new(),
            labels_declared: IndexSet::new(),
            labels_gotoed: IndexMap::new(),
        })
    }

    /// Parses an entire program.
    ///
    /// Fails on the first lexical, syntax or semantic fault. On failure the emitter holds a
    /// partial translation that must not be used.
    pub fn program(mut self) -> YolocResult<Declarations> {
        self.rule("PROGRAM", |p| {
            p.emitter.header_line("#include <stdio.h>");
            p.emitter.header_line("int main(){");

            while p.check(TokenKind::Newline) {
                p.next_token()?;
            }
            while !p.check(TokenKind::Eof) {
                p.statement()?;
            }

            p.emitter.emit_line("return 0;");
            p.emitter.emit_line("}");
            p.check_labels()
        })?;
        debug!(
            "parsed program with {} variables and {} labels",
            self.symbols.len(),
            self.labels_declared.len()
        );
        Ok(Declarations {
            variables: self.symbols,
            labels: self.labels_declared,
            gotos: self.labels_gotoed,
        })
    }

    /// Every label used by a `GOTO` must be declared somewhere in the program
    fn check_labels(&self) -> YolocResult<()> {
        match self
            .labels_gotoed
            .iter()
            .find(|(label, _)| !self.labels_declared.contains(*label))
        {
            Some((label, span)) => Err(YolocError::new(
                SemanticErrorKind::UndeclaredLabel(label.clone()),
                *span,
            )),
            None => Ok(()),
        }
    }

    /// Runs a grammar rule, reporting it to the observer
    fn rule<T, F>(&mut self, name: &'static str, func: F) -> YolocResult<T>
    where
        F: FnOnce(&mut Self) -> YolocResult<T>,
    {
        trace!("{name} at {:?}", self.current);
        self.observer.enter_rule(name);
        let ret = func(self);
        self.observer.exit_rule();
        ret
    }

    /// Checks if the current token is of a given kind
    fn check(&self, kind: impl Into<TokenKind>) -> bool {
        self.current.is(kind.into())
    }

    /// Advances the lookahead window by one token
    fn next_token(&mut self) -> YolocResult<()> {
        let next = self.lexer.next_token()?;
        let consumed = std::mem::replace(&mut self.current, std::mem::replace(&mut self.peek, next));
        self.observer.token(&consumed);
        Ok(())
    }

    /// Consumes the current token if it's of the given kind, otherwise fails
    fn expect(&mut self, kind: impl Into<TokenKind>) -> YolocResult<Token> {
        let kind = kind.into();
        if !self.check(kind) {
            return Err(self.error(SyntaxErrorKind::ExpectedToken {
                expected: kind,
                found: self.current.kind(),
            }));
        }
        let token = self.current.clone();
        self.next_token()?;
        Ok(token)
    }

    /// Emits the text of the current token, then advances
    fn emit_current(&mut self) -> YolocResult<()> {
        self.emitter.emit(self.current.text());
        self.next_token()
    }

    /// Declares a variable, emitting its declaration the first time it's seen
    fn declare(&mut self, name: &str) {
        if self.symbols.insert(name.to_string()) {
            self.emitter.header_line(&format!("float {name};"));
        }
    }

    /// `nl ::= newline { newline }`
    fn nl(&mut self) -> YolocResult<()> {
        self.rule("NEWLINE", |p| {
            if !p.check(TokenKind::Newline) {
                return Err(p.error(SyntaxErrorKind::MissingNewline {
                    found: p.current.kind(),
                }));
            }
            while p.check(TokenKind::Newline) {
                p.next_token()?;
            }
            Ok(())
        })
    }

    /// Creates an error located at the current token
    fn error(&self, error: impl Into<ErrorKind>) -> YolocError {
        YolocError::new(error, self.current.span())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::visualizer::{ParseGraph, ParseNode};
    use test_log::test;

    /// Parses a source, returning the emitted code on success
    pub fn parse(source: &str) -> YolocResult<(Emitter, Declarations)> {
        let mut emitter = Emitter::new("out.c");
        let declarations = Parser::new(Lexer::new(source), &mut emitter)?.program()?;
        Ok((emitter, declarations))
    }

    /// Parses a source that must fail
    pub fn parse_error(source: &str) -> YolocError {
        match parse(source) {
            Ok((emitter, _)) => panic!("should not parse, emitted {}", emitter.output()),
            Err(e) => e,
        }
    }

    /// Parses a source that must fail with a syntax error
    pub fn syntax_error(source: &str) -> SyntaxErrorKind {
        match parse_error(source).kind() {
            ErrorKind::Syntax(e) => e.clone(),
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    /// Parses a source that must fail with a semantic error
    pub fn semantic_error(source: &str) -> SemanticErrorKind {
        match parse_error(source).kind() {
            ErrorKind::Semantic(e) => e.clone(),
            other => panic!("expected a semantic error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_program() {
        let (emitter, declarations) = parse("").unwrap();
        assert_eq!(emitter.header(), "#include <stdio.h>\nint main(){\n");
        assert_eq!(emitter.code(), "return 0;\n}\n");
        assert_eq!(declarations, Declarations::default());
    }

    #[test]
    fn test_leading_newlines_are_skipped() {
        let (emitter, _) = parse("\n\n\nLET a = 1\n").unwrap();
        assert_eq!(emitter.code(), "a = 1;\nreturn 0;\n}\n");
    }

    #[test]
    fn test_statements_need_newlines() {
        assert_eq!(
            syntax_error("LET a = 1 LET b = 2\n"),
            SyntaxErrorKind::MissingNewline {
                found: TokenKind::Keyword(yolo_tokens::token::Keyword::Let)
            }
        );
    }

    #[test]
    fn test_lexing_errors_abort_parsing() {
        assert!(matches!(
            parse_error("LET a = 1.\n").kind(),
            ErrorKind::Lex(crate::lexer::LexingError::MissingDecimalDigits)
        ));
    }

    #[test]
    fn test_observer_sees_rules() {
        let mut emitter = Emitter::new("out.c");
        let mut graph = ParseGraph::new();
        Parser::with_observer(Lexer::new("LET a = 1\n"), &mut emitter, &mut graph)
            .unwrap()
            .program()
            .unwrap();
        let root = graph.root().expect("should have root");
        assert_eq!(graph.graph()[root], ParseNode::Rule("PROGRAM"));
        assert_eq!(
            graph.children(root),
            vec![&ParseNode::Rule("STATEMENT-LET")]
        );
    }

    #[test]
    fn test_observer_does_not_change_output() {
        let source = "LET a = 1\nWHILE (a < 4) REPEAT\nLET a = a + 1\nENDWHILE\nPRINT a\n";
        let (plain, _) = parse(source).unwrap();
        let mut observed = Emitter::new("out.c");
        let mut graph = ParseGraph::new();
        Parser::with_observer(Lexer::new(source), &mut observed, &mut graph)
            .unwrap()
            .program()
            .unwrap();
        assert_eq!(plain.output(), observed.output());
    }
}
