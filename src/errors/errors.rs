use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

/// A recorded, non-fatal parse failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_inner(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_kind(&self) -> DiagnosticKind {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnterminatedBlock { .. }
            | ErrorImpl::NestingTooDeep { .. } => DiagnosticKind::Structural,
            ErrorImpl::NoPrefixHandler { .. } => DiagnosticKind::UnsupportedToken,
            ErrorImpl::NumberParseError { .. } => DiagnosticKind::LiteralConversion,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnterminatedBlock { .. } => "UnterminatedBlock",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::NoPrefixHandler { .. } => "NoPrefixHandler",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { expected, found, .. } => ErrorTip::Suggestion(format!(
                "expected next token to be {}, got {} instead",
                expected, found
            )),
            ErrorImpl::UnterminatedBlock { .. } => {
                ErrorTip::Suggestion(String::from("did you forget a closing `}`?"))
            }
            ErrorImpl::NestingTooDeep { .. } => ErrorTip::Suggestion(String::from(
                "split the expression with intermediate `let` bindings",
            )),
            ErrorImpl::NoPrefixHandler { .. } => ErrorTip::None,
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit or not valid octal?",
                token
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

/// Failure taxonomy reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// An expected token kind was missing, or the input nests too deeply.
    Structural,
    /// No prefix handler exists for the token in expression position.
    UnsupportedToken,
    /// An integer literal is malformed or does not fit in an `i64`.
    LiteralConversion,
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("expected next token to be {expected}, got {found} ({token:?}) instead")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        token: String,
    },
    #[error("block opened with {opened:?} is never closed")]
    UnterminatedBlock { opened: String },
    #[error("expression nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("no prefix parse function for {kind} ({token:?}) found")]
    NoPrefixHandler { kind: TokenKind, token: String },
    #[error("could not parse {token:?} as integer")]
    NumberParseError { token: String },
}
