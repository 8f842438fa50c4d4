use crate::{
    ast::{
        ast::Expression,
        expressions::{
            ArrayLiteral, BooleanLiteral, CallExpr, FunctionLiteral, HashLiteral, Identifier,
            IfExpr, IndexExpr, InfixExpr, IntegerLiteral, PrefixExpr, StringLiteral,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block_stmt};

/// Pratt loop.
///
/// Folds infix operators into `left` while the lookahead binds tighter than
/// `bp`. The comparison is strict, so an operator never captures an operand
/// of equal precedence and same-level chains associate to the left.
///
/// Entering and every fold each count one level of nesting.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Option<Expression> {
    let depth = parser.nesting_depth();
    let expr = if parser.descend() {
        parse_pratt(parser, bp)
    } else {
        None
    };
    parser.unwind(depth);

    expr
}

fn parse_pratt(parser: &mut Parser, bp: BindingPower) -> Option<Expression> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        let token = parser.current_token();
        let error = Error::new(
            ErrorImpl::NoPrefixHandler {
                kind: token_kind,
                token: token.value.clone(),
            },
            token.span.start.clone(),
        );
        parser.push_error(error);
        return None;
    };

    let mut left = nud(parser)?;

    while !parser.peek_is(TokenKind::Semicolon) && bp < parser.peek_binding_power() {
        let Some(led) = parser.get_led_lookup().get(&parser.peek_token_kind()).copied() else {
            return Some(left);
        };

        if !parser.descend() {
            return None;
        }
        parser.advance();
        let led_bp = parser.current_binding_power();
        left = led(parser, left, led_bp)?;
    }

    Some(left)
}

/// A leading `0` marks an octal literal: `010` is 8 and `08` is rejected.
fn parse_integer(text: &str) -> Option<i64> {
    match text.strip_prefix('0') {
        Some(octal) if !octal.is_empty() => i64::from_str_radix(octal, 8).ok(),
        _ => text.parse::<i64>().ok(),
    }
}

pub fn parse_primary_expr(parser: &mut Parser) -> Option<Expression> {
    let token = parser.current_token().clone();

    match token.kind {
        TokenKind::Number => match parse_integer(&token.value) {
            Some(value) => Some(Expression::Integer(IntegerLiteral { token, value })),
            None => {
                let error = Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.span.start,
                );
                parser.push_error(error);
                None
            }
        },
        TokenKind::Identifier => Some(Expression::Identifier(Identifier {
            value: token.value.clone(),
            token,
        })),
        TokenKind::String => Some(Expression::String(StringLiteral {
            value: token.value.clone(),
            token,
        })),
        TokenKind::True | TokenKind::False => Some(Expression::Boolean(BooleanLiteral {
            value: token.kind == TokenKind::True,
            token,
        })),
        _ => {
            let error = Error::new(
                ErrorImpl::NoPrefixHandler {
                    kind: token.kind,
                    token: token.value.clone(),
                },
                token.span.start,
            );
            parser.push_error(error);
            None
        }
    }
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Option<Expression> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, BindingPower::Prefix)?;

    Some(Expression::Prefix(PrefixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        right: Box::new(right),
    }))
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expression,
    bp: BindingPower,
) -> Option<Expression> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, bp)?;

    Some(Expression::Infix(InfixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Option<Expression> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Lowest);

    if !parser.expect_peek(TokenKind::CloseParen) {
        return None;
    }

    expr
}

pub fn parse_if_expr(parser: &mut Parser) -> Option<Expression> {
    // if (<condition>) { <consequence> } else { <alternative> }
    let token = parser.current_token().clone();

    if !parser.expect_peek(TokenKind::OpenParen) {
        return None;
    }
    parser.advance();
    let condition = parse_expr(parser, BindingPower::Lowest);

    if !parser.expect_peek(TokenKind::CloseParen) || !parser.expect_peek(TokenKind::OpenCurly) {
        return None;
    }
    let consequence = parse_block_stmt(parser);

    let alternative = if parser.peek_is(TokenKind::Else) {
        parser.advance();
        if !parser.expect_peek(TokenKind::OpenCurly) {
            return None;
        }
        Some(parse_block_stmt(parser))
    } else {
        None
    };

    Some(Expression::If(IfExpr {
        token,
        condition: Box::new(condition?),
        consequence,
        alternative,
    }))
}

pub fn parse_fn_literal(parser: &mut Parser) -> Option<Expression> {
    let token = parser.current_token().clone();

    if !parser.expect_peek(TokenKind::OpenParen) {
        return None;
    }
    let parameters = parse_fn_params(parser)?;

    if !parser.expect_peek(TokenKind::OpenCurly) {
        return None;
    }
    let body = parse_block_stmt(parser);

    Some(Expression::Function(FunctionLiteral {
        token,
        parameters,
        body,
        name: None,
    }))
}

/// Parses `a, b, c)` with the current token on the opening `(`.
fn parse_fn_params(parser: &mut Parser) -> Option<Vec<Identifier>> {
    let mut parameters = Vec::new();

    if parser.peek_is(TokenKind::CloseParen) {
        parser.advance();
        return Some(parameters);
    }

    loop {
        if !parser.expect_peek(TokenKind::Identifier) {
            return None;
        }
        let token = parser.current_token().clone();
        parameters.push(Identifier {
            value: token.value.clone(),
            token,
        });

        if !parser.peek_is(TokenKind::Comma) {
            break;
        }
        parser.advance();
    }

    if !parser.expect_peek(TokenKind::CloseParen) {
        return None;
    }

    Some(parameters)
}

/// Parses a comma separated list closed by `end`, starting on the opening token.
///
/// A failed element does not stop the scan; the list still consumes its
/// closing token and then comes back absent.
fn parse_expr_list(parser: &mut Parser, end: TokenKind) -> Option<Vec<Expression>> {
    let mut list = Vec::new();
    let mut complete = true;

    if parser.peek_is(end) {
        parser.advance();
        return Some(list);
    }

    parser.advance();
    loop {
        match parse_expr(parser, BindingPower::Lowest) {
            Some(expr) => list.push(expr),
            None => complete = false,
        }

        if !parser.peek_is(TokenKind::Comma) {
            break;
        }
        parser.advance();
        parser.advance();
    }

    if !parser.expect_peek(end) {
        return None;
    }

    complete.then_some(list)
}

pub fn parse_call_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Option<Expression> {
    let token = parser.current_token().clone();
    let arguments = parse_expr_list(parser, TokenKind::CloseParen)?;

    Some(Expression::Call(CallExpr {
        token,
        callee: Box::new(left),
        arguments,
    }))
}

pub fn parse_index_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Option<Expression> {
    let token = parser.current_token().clone();
    parser.advance();
    let index = parse_expr(parser, BindingPower::Lowest);

    if !parser.expect_peek(TokenKind::CloseBracket) {
        return None;
    }

    Some(Expression::Index(IndexExpr {
        token,
        collection: Box::new(left),
        index: Box::new(index?),
    }))
}

pub fn parse_array_literal(parser: &mut Parser) -> Option<Expression> {
    let token = parser.current_token().clone();
    let elements = parse_expr_list(parser, TokenKind::CloseBracket)?;

    Some(Expression::Array(ArrayLiteral { token, elements }))
}

pub fn parse_hash_literal(parser: &mut Parser) -> Option<Expression> {
    // { <key>: <value>, ... }
    let token = parser.current_token().clone();
    let mut pairs = Vec::new();
    let mut complete = true;

    while !parser.peek_is(TokenKind::CloseCurly) {
        parser.advance();
        let key = parse_expr(parser, BindingPower::Lowest);

        if !parser.expect_peek(TokenKind::Colon) {
            return None;
        }

        parser.advance();
        let value = parse_expr(parser, BindingPower::Lowest);

        match (key, value) {
            (Some(key), Some(value)) => pairs.push((key, value)),
            _ => complete = false,
        }

        if !parser.peek_is(TokenKind::CloseCurly) && !parser.expect_peek(TokenKind::Comma) {
            return None;
        }
    }

    if !parser.expect_peek(TokenKind::CloseCurly) {
        return None;
    }

    if !complete {
        return None;
    }

    Some(Expression::Hash(HashLiteral { token, pairs }))
}
