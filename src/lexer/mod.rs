//! Lexical analysis module.
//!
//! Converts source text into the token stream the parser pulls from. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Token position tracking for error reporting
//! - Comments and whitespace handling
//!
//! Characters no pattern accepts become `Illegal` tokens; the lexer itself
//! never fails.

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
