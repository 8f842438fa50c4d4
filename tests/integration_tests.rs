//! Integration tests for the front end.
//!
//! These tests drive the public API the way the binary does: source text in,
//! then either a re-printed program or rendered diagnostics out.

use std::{fs, path::PathBuf};

use pretty_assertions::assert_eq;

use monkey::{
    ast::ast::{Expression, Node, Statement},
    cli::{lex_file, parse_file, start_repl, CliError},
    errors::errors::DiagnosticKind,
    lexer::lexer::{tokenize, TokenBuffer},
    parser::parser::{parse, Parser},
    render_error,
};

fn print_program(source: &str) -> String {
    let (parser, program) = parse(source.to_string(), Some("main.mk".to_string()));
    assert!(
        parser.errors().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.messages()
    );
    program.print()
}

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("monkey_tests_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_parse_full_program() {
    let source = r#"
        let five = 5;
        let ten = 10;

        let add = fn(x, y) {
            x + y;
        };

        let result = add(five, ten);
        let items = [1, "two", true];
        let lookup = {"one": 1, "two": 2};
        return lookup["one"] + items[0];
    "#;

    let (parser, program) = parse(source.to_string(), Some("main.mk".to_string()));

    assert!(parser.errors().is_empty(), "{:?}", parser.messages());
    assert_eq!(program.len(), 7);
    assert_eq!(
        program.print(),
        concat!(
            "let five = 5;",
            "let ten = 10;",
            "let add = fn(x, y) (x + y);",
            "let result = add(five, ten);",
            "let items = [1, \"two\", true];",
            "let lookup = {\"one\": 1, \"two\": 2};",
            "return ((lookup[\"one\"]) + (items[0]));",
        )
    );

    match &program.statements[2] {
        Statement::Let(stmt) => match &stmt.value {
            Some(Expression::Function(function)) => {
                assert_eq!(function.name.as_deref(), Some("add"))
            }
            other => panic!("expected function literal, got {:?}", other),
        },
        other => panic!("expected let statement, got {:?}", other),
    }
}

#[test]
fn test_parse_conditionals_and_closures() {
    assert_eq!(
        print_program("if (x > 0) { x } else { 0 - x }"),
        "if(x > 0) xelse (0 - x)"
    );
    assert_eq!(
        print_program("let adder = fn(a) { fn(b) { a + b } }; adder(1)(2);"),
        "let adder = fn(a) fn(b) (a + b);adder(1)(2)"
    );
    assert_eq!(print_program("if (a) { return 1; }"), "ifa return 1;");
}

#[test]
fn test_comments_are_ignored() {
    assert_eq!(
        print_program("// leading\nlet x = 1; // trailing\nx"),
        "let x = 1;x"
    );
}

#[test]
fn test_print_round_trip() {
    // Blocks print without braces, so only brace-free inputs survive a reparse.
    let inputs = [
        "let x = 1 + 2 * 3;",
        "return -a * !b;",
        "a + b(c)[0]",
        "let s = \"tab\\there \\\"quoted\\\"\";",
        "let h = {\"a\": [1, 2][0], 2: add(3, 4)};",
        "x == y != z < w > v",
        "[[1, 2], [3]][0][1]",
    ];

    for input in inputs {
        let first = print_program(input);
        let second = print_program(&first);
        assert_eq!(first, second, "input: {:?}", input);
    }
}

#[test]
fn test_diagnostics_accumulate_in_order() {
    let source = "let x 5;\nlet y = @;\nlet z = 99999999999999999999;\nif (z) { z";
    let (parser, program) = parse(source.to_string(), Some("main.mk".to_string()));

    let kinds: Vec<DiagnosticKind> = parser.errors().iter().map(|e| e.get_kind()).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::Structural,
            DiagnosticKind::UnsupportedToken,
            DiagnosticKind::LiteralConversion,
            DiagnosticKind::Structural,
        ]
    );

    let offsets: Vec<u32> = parser.errors().iter().map(|e| e.get_position().0).collect();
    assert!(offsets.windows(2).all(|pair| pair[0] < pair[1]), "{:?}", offsets);

    // every statement that could be salvaged is still there
    assert_eq!(program.print(), "5let y = ;let z = ;ifz z");
}

#[test]
fn test_render_error_points_at_token() {
    let source = "let a = 1;\n  let x 5;";
    let (parser, _) = parse(source.to_string(), Some("main.mk".to_string()));
    assert_eq!(parser.errors().len(), 1);

    let rendered = render_error(&parser.errors()[0], source, "main.mk");
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Error: UnexpectedToken (expected next token to be Assignment, got Number instead)",
            "-> main.mk",
            "  |",
            "2 | let x 5;",
            "  | ------^",
        ]
    );
}

#[test]
fn test_parse_from_prelexed_tokens() {
    let source = "let total = [1, 2][0] + 3;";

    let mut parser = Parser::new(TokenBuffer::new(tokenize(source.to_string(), None)));
    let from_tokens = parser.parse_program();
    assert!(parser.errors().is_empty());

    assert_eq!(from_tokens.print(), print_program(source));
    assert_eq!(from_tokens.leading_literal(), "let");
}

#[test]
fn test_parse_file_command() {
    let path = scratch_file("ok.mk", "let x = 1 + 2;\nx * 3\n");
    let mut out = Vec::new();
    let mut err = Vec::new();

    parse_file(&path, &mut out, &mut err).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "let x = (1 + 2);(x * 3)\n");
    assert!(err.is_empty());
}

#[test]
fn test_parse_file_command_reports_diagnostics() {
    let path = scratch_file("bad.mk", "let x 5;\n");
    let mut out = Vec::new();
    let mut err = Vec::new();

    let result = parse_file(&path, &mut out, &mut err);

    assert!(matches!(result, Err(CliError::Diagnostics { count: 1 })));
    assert!(out.is_empty());
    let err = String::from_utf8(err).unwrap();
    assert!(err.starts_with("Error: UnexpectedToken"), "{}", err);
    assert!(err.contains("-> bad.mk"), "{}", err);
}

#[test]
fn test_parse_file_command_missing_file() {
    let path = std::env::temp_dir().join("monkey_tests_does_not_exist.mk");
    let result = parse_file(&path, &mut Vec::new(), &mut Vec::new());

    assert!(matches!(result, Err(CliError::Read { .. })));
}

#[test]
fn test_lex_file_command() {
    let path = scratch_file("lex.mk", "let x = 5;");
    let mut out = Vec::new();

    lex_file(&path, &mut out).unwrap();

    let out = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "Let ()");
    assert_eq!(lines[1], "Identifier (x)");
    assert_eq!(lines[3], "Number (5)");
    assert_eq!(lines[5], "EOF ()");
}

#[test]
fn test_repl_session() {
    let input = "let a = 1;\nlet b 2;\n@\n[1, 2][0]\n";
    let mut output = Vec::new();

    start_repl(input.as_bytes(), &mut output).unwrap();

    assert_eq!(
        String::from_utf8(output).unwrap(),
        concat!(
            ">> let a = 1;\n",
            ">> parser errors:\n",
            "\texpected next token to be Assignment, got Number (\"2\") instead\n",
            ">> parser errors:\n",
            "\tno prefix parse function for Illegal (\"@\") found\n",
            ">> ([1, 2][0])\n",
            ">> ",
        )
    );
}
