//! Statement rules

use super::{Parser, SemanticErrorKind, SyntaxErrorKind};
use crate::error::{YolocError, YolocResult};
use crate::visualizer::ParseObserver;
use yolo_tokens::spanned::Spanned;
use yolo_tokens::token::{Keyword, TokenKind};

impl<'e, O: ParseObserver> Parser<'e, O> {
    /// Parses a single statement, including the new lines after it
    pub(super) fn statement(&mut self) -> YolocResult<()> {
        let (name, func): (&'static str, fn(&mut Self) -> YolocResult<()>) = match self.current.kind() {
            TokenKind::Keyword(Keyword::Print) => ("STATEMENT-PRINT", Self::print_statement),
            TokenKind::Keyword(Keyword::If) => ("STATEMENT-IF", Self::if_statement),
            TokenKind::Keyword(Keyword::While) => ("STATEMENT-WHILE", Self::while_statement),
            TokenKind::Keyword(Keyword::For) => ("STATEMENT-FOR", Self::for_statement),
            TokenKind::Keyword(Keyword::Label) => ("STATEMENT-LABEL", Self::label_statement),
            TokenKind::Keyword(Keyword::Goto) => ("STATEMENT-GOTO", Self::goto_statement),
            TokenKind::Keyword(Keyword::Let) => ("STATEMENT-LET", Self::let_statement),
            TokenKind::Keyword(Keyword::Input) => ("STATEMENT-INPUT", Self::input_statement),
            kind => {
                return Err(self.error(SyntaxErrorKind::InvalidStatement {
                    text: self.current.text().to_string(),
                    kind,
                }))
            }
        };
        self.rule(name, |p| {
            func(p)?;
            p.nl()
        })
    }

    /// `"PRINT" ( expression | string )`
    fn print_statement(&mut self) -> YolocResult<()> {
        self.next_token()?;
        if self.check(TokenKind::String) {
            self.emitter
                .emit_line(&format!("printf(\"{}\\n\");", self.current.text()));
            self.next_token()
        } else {
            self.emitter.emit("printf(\"%.2f\\n\", (float)(");
            self.expression()?;
            self.emitter.emit_line("));");
            Ok(())
        }
    }

    /// `"IF" "(" comparison ")" "THEN" nl { statement } "ENDIF"`
    fn if_statement(&mut self) -> YolocResult<()> {
        self.next_token()?;
        self.expect(TokenKind::LParen)?;
        self.emitter.emit("if(");
        self.comparison()?;
        self.expect(TokenKind::RParen)?;
        self.expect(Keyword::Then)?;
        self.nl()?;
        self.emitter.emit_line("){");
        self.block(Keyword::EndIf)?;
        self.emitter.emit_line("}");
        Ok(())
    }

    /// `"WHILE" "(" comparison ")" "REPEAT" nl { statement } "ENDWHILE"`
    fn while_statement(&mut self) -> YolocResult<()> {
        self.next_token()?;
        self.expect(TokenKind::LParen)?;
        self.emitter.emit("while(");
        self.comparison()?;
        self.expect(TokenKind::RParen)?;
        self.expect(Keyword::Repeat)?;
        self.nl()?;
        self.emitter.emit_line("){");
        self.block(Keyword::EndWhile)?;
        self.emitter.emit_line("}");
        Ok(())
    }

    /// `"FOR" "(" for_init ";" comparison ";" for_step ")" "REPEAT" nl { statement } "ENDFOR"`
    fn for_statement(&mut self) -> YolocResult<()> {
        self.next_token()?;
        self.expect(TokenKind::LParen)?;
        self.emitter.emit("for(");
        self.rule("FOR-INIT", Self::for_init)?;
        self.expect(TokenKind::SemiColon)?;
        self.emitter.emit(";");
        self.comparison()?;
        self.expect(TokenKind::SemiColon)?;
        self.emitter.emit(";");
        self.rule("FOR-STEP", Self::for_step)?;
        self.expect(TokenKind::RParen)?;
        self.expect(Keyword::Repeat)?;
        self.nl()?;
        self.emitter.emit_line("){");
        self.block(Keyword::EndFor)?;
        self.emitter.emit_line("}");
        Ok(())
    }

    /// `"LET" ident "=" expression`
    fn for_init(&mut self) -> YolocResult<()> {
        self.expect(Keyword::Let)?;
        let ident = self.expect(TokenKind::Identifier)?;
        self.declare(ident.text());
        self.emitter.emit(&format!("int {} = ", ident.text()));
        self.expect(TokenKind::Eq)?;
        self.expression()
    }

    /// `ident "=" expression`, where the identifier is already declared
    fn for_step(&mut self) -> YolocResult<()> {
        let ident = self.expect(TokenKind::Identifier)?;
        if !self.symbols.contains(ident.text()) {
            return Err(YolocError::new(
                SemanticErrorKind::UndeclaredVariable(ident.text().to_string()),
                ident.span(),
            ));
        }
        self.emitter.emit(&format!("{} = ", ident.text()));
        self.expect(TokenKind::Eq)?;
        self.expression()
    }

    /// Parses statements until `terminator`, consuming it
    fn block(&mut self, terminator: Keyword) -> YolocResult<()> {
        while !self.check(terminator) {
            if self.check(TokenKind::Eof) {
                return Err(self.error(SyntaxErrorKind::UnterminatedBlock {
                    expected: terminator,
                }));
            }
            self.statement()?;
        }
        self.next_token()
    }

    /// `"LABEL" ident`
    fn label_statement(&mut self) -> YolocResult<()> {
        self.next_token()?;
        let ident = self.expect(TokenKind::Identifier)?;
        if !self.labels_declared.insert(ident.text().to_string()) {
            return Err(YolocError::new(
                SemanticErrorKind::DuplicateLabel(ident.text().to_string()),
                ident.span(),
            ));
        }
        self.emitter.emit_line(&format!("{}:", ident.text()));
        Ok(())
    }

    /// `"GOTO" ident`
    fn goto_statement(&mut self) -> YolocResult<()> {
        self.next_token()?;
        let ident = self.expect(TokenKind::Identifier)?;
        self.labels_gotoed
            .entry(ident.text().to_string())
            .or_insert(ident.span());
        self.emitter.emit_line(&format!("goto {};", ident.text()));
        Ok(())
    }

    /// `"LET" ident "=" expression`
    fn let_statement(&mut self) -> YolocResult<()> {
        self.next_token()?;
        let ident = self.expect(TokenKind::Identifier)?;
        self.declare(ident.text());
        self.emitter.emit(&format!("{} = ", ident.text()));
        self.expect(TokenKind::Eq)?;
        self.expression()?;
        self.emitter.emit_line(";");
        Ok(())
    }

    /// `"INPUT" ident`
    ///
    /// A failed read zeroes the variable and discards the rest of the line.
    fn input_statement(&mut self) -> YolocResult<()> {
        self.next_token()?;
        let ident = self.expect(TokenKind::Identifier)?;
        let name = ident.text();
        self.declare(name);
        self.emitter
            .emit_line(&format!("if(0==scanf(\"%f\", &{name})) {{"));
        self.emitter.emit_line(&format!("{name} = 0;"));
        self.emitter.emit_line("scanf(\"%*s\");");
        self.emitter.emit_line("}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::tests::{parse, semantic_error, syntax_error};
    use crate::parser::{SemanticErrorKind, SyntaxErrorKind};
    use test_log::test;
    use yolo_tokens::token::{Keyword, TokenKind};

    fn code(source: &str) -> String {
        let (emitter, _) = parse(source).expect("could not parse");
        emitter
            .code()
            .strip_suffix("return 0;\n}\n")
            .expect("missing closing boilerplate")
            .to_string()
    }

    #[test]
    fn test_print_string() {
        assert_eq!(code("PRINT \"hello, world!\"\n"), "printf(\"hello, world!\\n\");\n");
    }

    #[test]
    fn test_print_expression() {
        assert_eq!(
            code("LET a = 2\nPRINT a * (1 + 2)\n"),
            "a = 2;\nprintf(\"%.2f\\n\", (float)(a*(1+2)));\n"
        );
    }

    #[test]
    fn test_if() {
        assert_eq!(
            code("LET a = 1\nIF (a >= 1) THEN\nPRINT \"yes\"\nENDIF\n"),
            "a = 1;\nif(a>=1){\nprintf(\"yes\\n\");\n}\n"
        );
    }

    #[test]
    fn test_while() {
        assert_eq!(
            code("LET a = 0\nWHILE (a < 3) REPEAT\nLET a = a + 1\nENDWHILE\n"),
            "a = 0;\nwhile(a<3){\na = a+1;\n}\n"
        );
    }

    #[test]
    fn test_for() {
        let (emitter, declarations) =
            parse("FOR (LET i = 0; i < 3; i = i + 1) REPEAT\nPRINT i\nENDFOR\n").expect("could not parse");
        assert!(emitter.header().ends_with("float i;\n"));
        assert!(emitter.code().starts_with(
            "for(int i = 0;i<3;i = i+1){\nprintf(\"%.2f\\n\", (float)(i));\n}\n"
        ));
        assert!(declarations.variables.contains("i"));
    }

    #[test]
    fn test_for_step_must_be_declared() {
        assert_eq!(
            semantic_error("FOR (LET i = 0; i < 3; j = i + 1) REPEAT\nENDFOR\n"),
            SemanticErrorKind::UndeclaredVariable("j".to_string())
        );
    }

    #[test]
    fn test_nested_blocks() {
        assert_eq!(
            code("LET a = 0\nWHILE (a < 3) REPEAT\nIF (a == 1) THEN\nPRINT a\nENDIF\nLET a = a + 1\nENDWHILE\n"),
            "a = 0;\nwhile(a<3){\nif(a==1){\nprintf(\"%.2f\\n\", (float)(a));\n}\na = a+1;\n}\n"
        );
    }

    #[test]
    fn test_unterminated_block() {
        assert_eq!(
            syntax_error("LET a = 1\nIF (a > 0) THEN\nPRINT a\n"),
            SyntaxErrorKind::UnterminatedBlock {
                expected: Keyword::EndIf
            }
        );
    }

    #[test]
    fn test_label_and_goto() {
        let (emitter, declarations) = parse("GOTO end\nLABEL end\n").expect("could not parse");
        assert_eq!(emitter.code(), "goto end;\nend:\nreturn 0;\n}\n");
        assert!(declarations.labels.contains("end"));
        assert!(declarations.gotos.contains_key("end"));
    }

    #[test]
    fn test_duplicate_label() {
        assert_eq!(
            semantic_error("LABEL x\nLABEL x\n"),
            SemanticErrorKind::DuplicateLabel("x".to_string())
        );
    }

    #[test]
    fn test_undeclared_label() {
        assert_eq!(
            semantic_error("GOTO first\nGOTO second\nLABEL second\n"),
            SemanticErrorKind::UndeclaredLabel("first".to_string())
        );
    }

    #[test]
    fn test_let_declares_once() {
        let (emitter, _) = parse("LET a = 1\nLET a = a + 1\n").expect("could not parse");
        assert_eq!(emitter.header().matches("float a;").count(), 1);
        assert_eq!(emitter.code(), "a = 1;\na = a+1;\nreturn 0;\n}\n");
    }

    #[test]
    fn test_let_can_reference_itself() {
        let (emitter, _) = parse("LET a = a\n").expect("could not parse");
        assert_eq!(emitter.code(), "a = a;\nreturn 0;\n}\n");
    }

    #[test]
    fn test_input() {
        let (emitter, _) = parse("INPUT x\n").expect("could not parse");
        assert!(emitter.header().ends_with("float x;\n"));
        assert_eq!(
            emitter.code(),
            "if(0==scanf(\"%f\", &x)) {\nx = 0;\nscanf(\"%*s\");\n}\nreturn 0;\n}\n"
        );
    }

    #[test]
    fn test_invalid_statement() {
        assert_eq!(
            syntax_error("a = 1\n"),
            SyntaxErrorKind::InvalidStatement {
                text: "a".to_string(),
                kind: TokenKind::Identifier
            }
        );
    }

    #[test]
    fn test_if_requires_parens() {
        assert_eq!(
            syntax_error("LET a = 1\nIF a > 0 THEN\nENDIF\n"),
            SyntaxErrorKind::ExpectedToken {
                expected: TokenKind::LParen,
                found: TokenKind::Identifier
            }
        );
    }
}
