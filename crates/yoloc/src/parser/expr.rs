//! Comparison and arithmetic rules. Operators are emitted exactly as written, with no spacing.

use super::{Parser, SemanticErrorKind, SyntaxErrorKind};
use crate::error::YolocResult;
use crate::visualizer::ParseObserver;
use yolo_tokens::token::TokenKind;

impl<'e, O: ParseObserver> Parser<'e, O> {
    /// `expression comparison_op expression { comparison_op expression }`
    pub(super) fn comparison(&mut self) -> YolocResult<()> {
        self.rule("COMPARISON", |p| {
            p.expression()?;
            if !p.current.kind().is_comparison_operator() {
                return Err(p.error(SyntaxErrorKind::ExpectedComparison {
                    text: p.current.text().to_string(),
                }));
            }
            while p.current.kind().is_comparison_operator() {
                p.emit_current()?;
                p.expression()?;
            }
            Ok(())
        })
    }

    /// `term { ("+" | "-") term }`
    pub(super) fn expression(&mut self) -> YolocResult<()> {
        self.rule("EXPRESSION", |p| {
            p.term()?;
            while p.check(TokenKind::Plus) || p.check(TokenKind::Minus) {
                p.emit_current()?;
                p.term()?;
            }
            Ok(())
        })
    }

    /// `unary { ("*" | "/") unary }`
    fn term(&mut self) -> YolocResult<()> {
        self.rule("TERM", |p| {
            p.unary()?;
            while p.check(TokenKind::Asterisk) || p.check(TokenKind::Slash) {
                p.emit_current()?;
                p.unary()?;
            }
            Ok(())
        })
    }

    /// `[ "+" | "-" ] primary`
    fn unary(&mut self) -> YolocResult<()> {
        self.rule("UNARY", |p| {
            if p.check(TokenKind::Plus) || p.check(TokenKind::Minus) {
                p.emit_current()?;
            }
            p.primary()
        })
    }

    /// `number | ident | "(" expression ")"`
    fn primary(&mut self) -> YolocResult<()> {
        self.rule("PRIMARY", |p| match p.current.kind() {
            TokenKind::Number => p.emit_current(),
            TokenKind::Identifier => {
                if !p.symbols.contains(p.current.text()) {
                    return Err(p.error(SemanticErrorKind::UndeclaredVariable(
                        p.current.text().to_string(),
                    )));
                }
                p.emit_current()
            }
            TokenKind::LParen => {
                p.emit_current()?;
                p.expression()?;
                p.expect(TokenKind::RParen)?;
                p.emitter.emit(")");
                Ok(())
            }
            kind => Err(p.error(SyntaxErrorKind::UnexpectedToken {
                text: p.current.text().to_string(),
                kind,
            })),
        })
    }
}
