//! Parser state and entry points.
//!
//! The parser pulls tokens one at a time and keeps two of them in view: the
//! current token and one token of lookahead ("peek"). Statement routines and
//! the Pratt expression parser are reached through lookup tables keyed by
//! token kind:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix positions
//! - LED (left denotation) handlers for infix positions
//! - Binding powers for operator precedence
//!
//! The tables are filled once per parser and never change afterwards.
//!
//! Expressions may nest at most [`MAX_NESTING_DEPTH`] levels, counting both
//! recursive descents and infix folds, so every tree the parser hands out can
//! be printed and dropped without exhausting the stack.

use std::collections::HashMap;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::{Lexer, TokenSource},
        tokens::{Token, TokenKind},
    },
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// Deepest expression tree the parser will build.
pub const MAX_NESTING_DEPTH: usize = 256;

/// The main parser structure that maintains parsing state.
///
/// One instance parses exactly one token stream, front to back.
pub struct Parser {
    /// Where tokens are pulled from
    tokens: Box<dyn TokenSource>,
    /// The token being parsed
    current: Token,
    /// One token of lookahead
    peek: Token,
    /// Diagnostics in the order they were raised
    errors: Vec<Error>,
    /// Nesting of the expression being built
    depth: usize,
    /// Set while an over-nested expression unwinds
    nesting_exceeded: bool,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a parser over `source` with every lookup table registered.
    pub fn new(source: impl TokenSource + 'static) -> Self {
        let mut tokens: Box<dyn TokenSource> = Box::new(source);
        let current = tokens.next_token();
        let peek = tokens.next_token();

        let mut parser = Parser {
            tokens,
            current,
            peek,
            errors: vec![],
            depth: 0,
            nesting_exceeded: false,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);
        parser
    }

    /// Creates a parser that lexes `source` on demand.
    pub fn from_source(source: String, file: Option<String>) -> Self {
        Parser::new(Lexer::new(source, file))
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn peek_token(&self) -> &Token {
        &self.peek
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    pub fn current_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Shifts the lookahead into the current slot and pulls a new lookahead.
    pub fn advance(&mut self) {
        self.current = std::mem::replace(&mut self.peek, self.tokens.next_token());
    }

    /// Advances only if the lookahead has the expected kind.
    ///
    /// Otherwise records a structural diagnostic and leaves the parser where
    /// it is.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> bool {
        if self.peek_is(expected_kind) {
            self.advance();
            return true;
        }

        let error = Error::new(
            ErrorImpl::UnexpectedToken {
                expected: expected_kind,
                found: self.peek.kind,
                token: self.peek.value.clone(),
            },
            self.peek.span.start.clone(),
        );
        self.push_error(error);
        false
    }

    pub fn push_error(&mut self, error: Error) {
        // follow-on failures of an over-nested expression are noise
        if self.nesting_exceeded {
            return;
        }
        tracing::debug!(kind = ?error.get_kind(), offset = error.get_position().0, "{}", error);
        self.errors.push(error);
    }

    pub fn nesting_depth(&self) -> usize {
        self.depth
    }

    /// Steps one level deeper into the expression being built.
    ///
    /// Past [`MAX_NESTING_DEPTH`] this records a single `NestingTooDeep`
    /// diagnostic and returns `false`. Every later call fails quietly until
    /// the outermost expression has unwound.
    pub fn descend(&mut self) -> bool {
        if self.nesting_exceeded {
            return false;
        }

        self.depth += 1;
        if self.depth <= MAX_NESTING_DEPTH {
            return true;
        }

        let error = Error::new(
            ErrorImpl::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            },
            self.current.span.start.clone(),
        );
        self.push_error(error);
        self.nesting_exceeded = true;
        false
    }

    /// Restores the depth saved on entry to an expression.
    ///
    /// When the outermost expression of an over-nested statement unwinds,
    /// the rest of that statement is skipped so its leftover closing tokens
    /// do not start statements of their own.
    pub fn unwind(&mut self, depth: usize) {
        self.depth = depth;

        if depth == 0 && self.nesting_exceeded {
            while !self.peek_is(TokenKind::Semicolon) && !self.peek_is(TokenKind::EOF) {
                self.advance();
            }
            self.nesting_exceeded = false;
        }
    }

    /// Diagnostics in the order they were raised. Empty on a clean parse.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Diagnostics as plain messages.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    /// Binding power of the lookahead; tokens without one bind at `Lowest`.
    pub fn peek_binding_power(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.peek.kind)
            .copied()
            .unwrap_or(BindingPower::Lowest)
    }

    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.current.kind)
            .copied()
            .unwrap_or(BindingPower::Lowest)
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub(super) fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Prefix registration leaves the binding power table alone, so `(` and
    /// `[` keep their infix precedence.
    pub(super) fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub(super) fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Parses statements until the end of the stream.
    ///
    /// Statements that fail outright are dropped; their diagnostics stay in
    /// [`Parser::errors`] and parsing resumes with the next token.
    #[tracing::instrument(skip_all)]
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.current_is(TokenKind::EOF) {
            if let Some(stmt) = parse_stmt(self) {
                program.statements.push(stmt);
            }
            self.advance();
        }

        tracing::debug!(
            statements = program.len(),
            errors = self.errors.len(),
            "parsed program"
        );
        program
    }
}

/// Parses a whole source text.
///
/// This is the main entry point for parsing. It creates a parser instance
/// with all lookup tables, and parses all statements until EOF.
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance, holding the diagnostics raised while parsing
/// - The parsed Program; only trust it when the diagnostics are empty
pub fn parse(source: String, file: Option<String>) -> (Parser, Program) {
    let mut parser = Parser::from_source(source, file);
    let program = parser.parse_program();

    (parser, program)
}
