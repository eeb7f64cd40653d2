use crate::lexer::LexingError;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_till, take_while};
use nom::character::complete::{char, digit1, satisfy};
use nom::combinator::{consumed, eof, map, opt, recognize, value};
use nom::error::{ErrorKind, ParseError};
use nom::sequence::{pair, preceded, terminated};
use nom::{IResult, Parser};
use yolo_tokens::token::TokenKind;

type Result<'a, O> = IResult<&'a str, O, TokenError<'a>>;

/// The error produced while recognizing a single token.
///
/// `fault` is only set when a token was started but is malformed, plain mismatches leave it empty.
#[derive(Debug, PartialEq)]
pub struct TokenError<'a> {
    pub input: &'a str,
    pub fault: Option<LexingError>,
}

impl<'a> TokenError<'a> {
    fn fault(input: &'a str, fault: LexingError) -> Self {
        Self {
            input,
            fault: Some(fault),
        }
    }
}

impl<'a> ParseError<&'a str> for TokenError<'a> {
    fn from_error_kind(input: &'a str, _kind: ErrorKind) -> Self {
        Self { input, fault: None }
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }

    fn or(self, other: Self) -> Self {
        if self.fault.is_some() {
            self
        } else {
            other
        }
    }
}

/// Like `cut`, but the failure records why the token is malformed
fn expect<'a, O, P>(mut parser: P, fault: LexingError) -> impl FnMut(&'a str) -> Result<'a, O>
where
    P: Parser<&'a str, O, TokenError<'a>>,
{
    move |input| {
        parser
            .parse(input)
            .map_err(|_| nom::Err::Failure(TokenError::fault(input, fault.clone())))
    }
}

/// Parses a single token, returning its kind along with its text.
///
/// Leading whitespace and comments must already be skipped.
pub fn parse_token(src: &str) -> Result<(TokenKind, &str)> {
    alt((
        map(parse_string, |text| (TokenKind::String, text)),
        map(
            consumed(alt((
                parse_eof,
                parse_newline,
                parse_number,
                parse_word,
                parse_operator,
                parse_punctuation,
            ))),
            |(text, kind)| (kind, text),
        ),
    ))(src)
}

/// Gets the length of the whitespace and comment run at the start of `src`.
///
/// New lines are significant and are never skipped.
pub fn insignificant_len(src: &str) -> usize {
    let skipped: Result<&str> = recognize(pair(
        take_while(|c: char| matches!(c, ' ' | '\t' | '\r')),
        opt(pair(char('#'), take_till(|c: char| c == '\n'))),
    ))(src);
    skipped.map(|(_, skipped)| skipped.len()).unwrap_or(0)
}

fn parse_eof(src: &str) -> Result<TokenKind> {
    value(TokenKind::Eof, eof)(src)
}

fn parse_newline(src: &str) -> Result<TokenKind> {
    value(TokenKind::Newline, char('\n'))(src)
}

fn parse_number(src: &str) -> Result<TokenKind> {
    value(
        TokenKind::Number,
        pair(
            digit1,
            opt(preceded(
                char('.'),
                expect(digit1, LexingError::MissingDecimalDigits),
            )),
        ),
    )(src)
}

fn parse_word(src: &str) -> Result<TokenKind> {
    map(
        recognize(pair(
            satisfy(char::is_alphabetic),
            take_while(char::is_alphanumeric),
        )),
        TokenKind::classify_word,
    )(src)
}

fn parse_operator(src: &str) -> Result<TokenKind> {
    alt((
        value(TokenKind::EqEq, tag("==")),
        value(TokenKind::Eq, char('=')),
        value(TokenKind::NotEq, tag("!=")),
        parse_lone_bang,
        value(TokenKind::LtEq, tag("<=")),
        value(TokenKind::Lt, char('<')),
        value(TokenKind::GtEq, tag(">=")),
        value(TokenKind::Gt, char('>')),
        value(TokenKind::Plus, char('+')),
        value(TokenKind::Minus, char('-')),
        value(TokenKind::Asterisk, char('*')),
        value(TokenKind::Slash, char('/')),
    ))(src)
}

/// `!` is only valid as the start of `!=`
fn parse_lone_bang(src: &str) -> Result<TokenKind> {
    let (rest, _) = char::<_, TokenError>('!')(src)?;
    let found = rest.chars().next().unwrap_or('\0');
    Err(nom::Err::Failure(TokenError::fault(
        src,
        LexingError::ExpectedNotEq(found),
    )))
}

fn parse_punctuation(src: &str) -> Result<TokenKind> {
    alt((
        value(TokenKind::LParen, char('(')),
        value(TokenKind::RParen, char(')')),
        value(TokenKind::SemiColon, char(';')),
    ))(src)
}

/// Characters that can't appear in a string literal, as strings are emitted into printf formats
fn is_reserved_in_string(c: char) -> bool {
    c.is_control() || c == '\\' || c == '%'
}

fn parse_string(src: &str) -> Result<&str> {
    preceded(
        char('"'),
        terminated(
            parse_string_body,
            expect(char('"'), LexingError::UnterminatedString),
        ),
    )(src)
}

fn parse_string_body(src: &str) -> Result<&str> {
    let (rest, body) =
        take_till::<_, _, TokenError>(|c: char| c == '"' || is_reserved_in_string(c))(src)?;
    match rest.chars().next() {
        Some('\n') | None => Err(nom::Err::Failure(TokenError::fault(
            rest,
            LexingError::UnterminatedString,
        ))),
        Some(c) if c != '"' => Err(nom::Err::Failure(TokenError::fault(
            rest,
            LexingError::IllegalStringChar(c),
        ))),
        _ => Ok((rest, body)),
    }
}
