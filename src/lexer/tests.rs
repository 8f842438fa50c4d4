//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Integer and string literals
//! - Operators and punctuation
//! - Comments
//! - Illegal characters and end of stream

use super::{
    lexer::{tokenize, Lexer, TokenBuffer, TokenSource},
    tokens::TokenKind,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.mk".to_string()))
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("fn let true false if else return"),
        vec![
            TokenKind::Fn,
            TokenKind::Let,
            TokenKind::True,
            TokenKind::False,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::Return,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore letter".to_string();
    let tokens = tokenize(source, Some("test.mk".to_string()));

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].value, "_underscore");
    // keyword prefix does not make a keyword
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "letter");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 0 9223372036854775808".to_string();
    let tokens = tokenize(source, Some("test.mk".to_string()));

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "0");
    // range checking belongs to the parser
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[2].value, "9223372036854775808");
}

#[test]
fn test_tokenize_strings() {
    let source = r#""foobar" "foo bar" """#.to_string();
    let tokens = tokenize(source, Some("test.mk".to_string()));

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "foobar");
    assert_eq!(tokens[1].value, "foo bar");
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].value, "");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_string_escapes() {
    let source = r#""hello\nworld" "tab\there" "back\\" "quote\"test""#.to_string();
    let tokens = tokenize(source, Some("test.mk".to_string()));

    assert_eq!(tokens[0].value, "hello\nworld");
    assert_eq!(tokens[1].value, "tab\there");
    assert_eq!(tokens[2].value, "back\\");
    assert_eq!(tokens[3].value, "quote\"test");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_unterminated_string() {
    let source = r#"let s = "never closed"#.to_string();
    let tokens = tokenize(source, Some("test.mk".to_string()));

    assert_eq!(tokens[3].kind, TokenKind::String);
    assert_eq!(tokens[3].value, "never closed");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("=+-!*/<> == != a!=b"),
        vec![
            TokenKind::Assignment,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Not,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Identifier,
            TokenKind::NotEquals,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } [ ] , ; :"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    let source = "let x = 5 // this is a comment\nlet y = 10".to_string();
    let tokens = tokenize(source, Some("test.mk".to_string()));

    assert_eq!(tokens[3].value, "5");
    assert_eq!(tokens[4].kind, TokenKind::Let);
    assert_eq!(tokens[5].value, "y");
    assert_eq!(tokens[8].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_program() {
    let source = "let add = fn(x, y) {\n  x + y;\n};\nlet result = add(five, ten);".to_string();
    let tokens = tokenize(source, Some("test.mk".to_string()));
    let expected = [
        (TokenKind::Let, "let"),
        (TokenKind::Identifier, "add"),
        (TokenKind::Assignment, "="),
        (TokenKind::Fn, "fn"),
        (TokenKind::OpenParen, "("),
        (TokenKind::Identifier, "x"),
        (TokenKind::Comma, ","),
        (TokenKind::Identifier, "y"),
        (TokenKind::CloseParen, ")"),
        (TokenKind::OpenCurly, "{"),
        (TokenKind::Identifier, "x"),
        (TokenKind::Plus, "+"),
        (TokenKind::Identifier, "y"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::CloseCurly, "}"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::Let, "let"),
        (TokenKind::Identifier, "result"),
        (TokenKind::Assignment, "="),
        (TokenKind::Identifier, "add"),
        (TokenKind::OpenParen, "("),
        (TokenKind::Identifier, "five"),
        (TokenKind::Comma, ","),
        (TokenKind::Identifier, "ten"),
        (TokenKind::CloseParen, ")"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::EOF, ""),
    ];

    assert_eq!(tokens.len(), expected.len());
    for (i, (kind, value)) in expected.iter().enumerate() {
        assert_eq!(tokens[i].kind, *kind, "token {} kind", i);
        assert_eq!(tokens[i].value, *value, "token {} value", i);
    }
}

#[test]
fn test_illegal_characters_become_tokens() {
    let tokens = tokenize("a @ é".to_string(), None);

    assert_eq!(tokens[1].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].value, "@");
    assert_eq!(tokens[2].kind, TokenKind::Illegal);
    assert_eq!(tokens[2].value, "é");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_token_spans() {
    let tokens = tokenize("let  answer".to_string(), Some("test.mk".to_string()));

    assert_eq!(tokens[1].span.start.0, 5);
    assert_eq!(tokens[1].span.end.0, 11);
    assert_eq!(tokens[1].span.start.1.as_str(), "test.mk");
    assert_eq!(tokens[2].span.start.0, 11);
}

#[test]
fn test_eof_repeats_forever() {
    let mut lexer = Lexer::new("x".to_string(), None);

    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    for _ in 0..3 {
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::EOF);
        assert_eq!(token.value, "");
    }
}

#[test]
fn test_token_buffer_ends_with_eof() {
    let tokens = tokenize("1 2".to_string(), None);
    let mut buffer = TokenBuffer::new(tokens[..2].to_vec());

    assert_eq!(buffer.next_token().value, "1");
    assert_eq!(buffer.next_token().value, "2");
    assert_eq!(buffer.next_token().kind, TokenKind::EOF);
    assert_eq!(buffer.next_token().kind, TokenKind::EOF);
}
