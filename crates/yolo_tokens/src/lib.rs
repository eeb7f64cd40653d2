#![doc = include_str!("../README.md")]

use crate::spanned::Span;
use std::fmt::{Display, Formatter};

pub mod spanned;
pub mod token;

/// An error with a location
#[derive(Debug, thiserror::Error)]
pub struct SpannedError<E> {
    error: E,
    location: Option<Span>,
}

impl<E> SpannedError<E> {
    pub fn new(error: E, location: impl Into<Option<Span>>) -> Self {
        Self {
            error,
            location: location.into(),
        }
    }

    /// The error itself, without location info
    pub fn error(&self) -> &E {
        &self.error
    }

    /// Where in the source this error occurred, if known
    pub fn location(&self) -> Option<Span> {
        self.location
    }

    /// Creates a displayable report of this error that quotes the lines of `source`
    /// surrounding its location.
    pub fn render<'a>(&'a self, source: &'a str) -> Rendered<'a, E> {
        Rendered {
            error: self,
            source,
        }
    }
}

impl<E: Display> Display for SpannedError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(location) = &self.location {
            write!(f, "\n  -> {location}")?;
        }
        Ok(())
    }
}

/// A [SpannedError] paired with the source it was created from.
#[derive(Debug)]
pub struct Rendered<'a, E> {
    error: &'a SpannedError<E>,
    source: &'a str,
}

impl<E: Display> Display for Rendered<'_, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.error)?;
        let Some(location) = self.error.location else {
            return Ok(());
        };
        let lines = self.source.lines().collect::<Vec<_>>();
        let Some(last_line) = lines.last() else {
            return Ok(());
        };
        // errors at the end of input point just past the last line of the source
        let (base_line, column, len) = if location.line() > lines.len() {
            (lines.len(), last_line.trim_end().chars().count() + 1, 0)
        } else {
            (location.line(), location.column(), location.len())
        };
        let first = base_line.saturating_sub(2).max(1);
        let last = (base_line + 1).min(lines.len());
        let width = last.to_string().len();
        for line in first..=last {
            let src = lines.get(line - 1).copied().unwrap_or_default();
            writeln!(f, "{:width$} | {}", line, src.trim_end())?;
            if line == base_line {
                let indent = " ".repeat(width + 3 + column.saturating_sub(1));
                if len > 0 {
                    writeln!(f, "{indent}{}", "~".repeat(len))?;
                } else {
                    writeln!(f, "{indent}^")?;
                }
            }
        }
        Ok(())
    }
}
