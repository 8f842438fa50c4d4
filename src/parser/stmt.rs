use crate::{
    ast::{
        ast::{Expression, Node, Statement},
        expressions::Identifier,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

/// Parses the statement starting at the current token.
///
/// On return the current token is the last one the statement consumed.
pub fn parse_stmt(parser: &mut Parser) -> Option<Statement> {
    if let Some(handler) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Option<Statement> {
    let token = parser.current_token().clone();
    let value = parse_expr(parser, BindingPower::Lowest);

    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Some(Statement::Expression(ExpressionStmt { token, value: value? }))
}

pub fn parse_let_stmt(parser: &mut Parser) -> Option<Statement> {
    let token = parser.current_token().clone();

    if !parser.expect_peek(TokenKind::Identifier) {
        return None;
    }
    let name_token = parser.current_token().clone();
    let name = Identifier {
        value: name_token.value.clone(),
        token: name_token,
    };

    if !parser.expect_peek(TokenKind::Assignment) {
        return None;
    }
    parser.advance();

    let mut value = parse_expr(parser, BindingPower::Lowest);
    if let Some(Expression::Function(function)) = value.as_mut() {
        function.name = Some(name.value.clone());
    }

    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Some(Statement::Let(LetStmt { token, name, value }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Option<Statement> {
    let token = parser.current_token().clone();
    parser.advance();

    let value = parse_expr(parser, BindingPower::Lowest);

    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Some(Statement::Return(ReturnStmt { token, value }))
}

/// Parses `{ ... }` with the current token on the opening brace.
///
/// Stops on the closing brace. Reaching the end of the stream first records
/// an `UnterminatedBlock` diagnostic and keeps what was parsed.
pub fn parse_block_stmt(parser: &mut Parser) -> BlockStmt {
    let token = parser.current_token().clone();
    parser.advance();

    let mut body = Vec::new();
    while !parser.current_is(TokenKind::CloseCurly) && !parser.current_is(TokenKind::EOF) {
        if let Some(stmt) = parse_stmt(parser) {
            body.push(stmt);
        }
        parser.advance();
    }

    let block = BlockStmt { token, body };

    if parser.current_is(TokenKind::EOF) {
        let error = Error::new(
            ErrorImpl::UnterminatedBlock {
                opened: block.leading_literal().to_string(),
            },
            block.token.span.start.clone(),
        );
        parser.push_error(error);
    }

    block
}
