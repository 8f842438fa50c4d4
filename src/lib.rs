#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod cli;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Byte offset into a named source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line holding byte `position`.
///
/// Returns the 1-based line number, the line text and the offset of
/// `position` inside that line. A position at the very end of the source
/// resolves to the end of the last line.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        start = end;
        line_number += 1;
    }

    // EOF: point just past the final line
    let last = content.split_inclusive('\n').last().unwrap_or("");
    if last.ends_with('\n') || content.is_empty() {
        Some((line_number, String::new(), 0))
    } else {
        Some((line_number - 1, last.to_string(), last.len()))
    }
}

/// A diagnostic paired with the source it was raised in.
///
/// ```text
/// Error: UnexpectedToken (expected next token to be Assignment, got Number instead)
/// -> main.mk
///    |
///  1 | let x 5;
///    | ------^
/// ```
pub struct RenderedError<'a> {
    pub error: &'a Error,
    pub source: &'a str,
    pub file: &'a str,
}

impl Display for RenderedError<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let error = self.error;

        if let ErrorTip::None = error.get_tip() {
            writeln!(f, "Error: {}", error.get_error_name())?;
        } else {
            writeln!(f, "Error: {} ({})", error.get_error_name(), error.get_tip())?;
        }
        writeln!(f, "-> {}", self.file)?;

        let Some((line, line_text, line_pos)) =
            get_line_at_position(self.source, error.get_position().0)
        else {
            return writeln!(f, "   {}", error);
        };

        let line_string = line.to_string();
        let padding = line_string.len() + 2;

        writeln!(f, "{:>padding$}", "|")?;

        let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
        writeln!(f, "{} | {}", line_string, line_text_removed.trim_end())?;

        let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

        writeln!(f, "{:>padding$} {:->arrows$}", "|", "^")
    }
}

/// Renders a diagnostic against the source it was raised in.
pub fn render_error(error: &Error, source: &str, file: &str) -> String {
    RenderedError {
        error,
        source,
        file,
    }
    .to_string()
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();

    (String::from(&string[start..]), start)
}
