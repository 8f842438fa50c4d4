//! Command line front end.
//!
//! - `monkey FILE` parses a file and prints the program back
//! - `monkey --lex FILE` dumps the token stream
//! - `monkey` with no arguments starts a line-by-line REPL
//!
//! Commands return `CliResult`; only `main` turns an error into an exit code.

use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use clap::Parser as ClapParser;
use thiserror::Error;

use crate::{lexer::lexer::tokenize, parser::parser::parse, render_error};

pub const PROMPT: &str = ">> ";

#[derive(ClapParser, Debug)]
#[command(name = "monkey")]
#[command(version, about = "Parser front end for the Monkey language", long_about = None)]
pub struct Cli {
    /// Source file to parse
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Print the tokens of a file instead of parsing it
    #[arg(long = "lex", value_name = "FILE", conflicts_with = "file")]
    pub lex_file: Option<PathBuf>,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("could not read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("aborting due to {count} parse error(s)")]
    Diagnostics { count: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type CliResult<T> = Result<T, CliError>;

pub fn run(cli: Cli) -> CliResult<()> {
    if let Some(path) = cli.lex_file {
        return lex_file(&path, &mut io::stdout().lock());
    }

    match cli.file {
        Some(path) => parse_file(&path, &mut io::stdout().lock(), &mut io::stderr().lock()),
        None => {
            let stdin = io::stdin();
            start_repl(stdin.lock(), io::stdout().lock())
        }
    }
}

fn read_source(path: &Path) -> CliResult<String> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Writes one line per token, the final EOF included.
pub fn lex_file<W: Write>(path: &Path, out: &mut W) -> CliResult<()> {
    let source = read_source(path)?;

    for token in tokenize(source, Some(file_label(path))) {
        writeln!(out, "{}", token.debug())?;
    }

    Ok(())
}

/// Parses a file and writes the program to `out`.
///
/// Diagnostics go to `err`, each rendered against its source line, and the
/// program is not printed.
pub fn parse_file<W: Write, E: Write>(path: &Path, out: &mut W, err: &mut E) -> CliResult<()> {
    let source = read_source(path)?;
    let label = file_label(path);

    let (parser, program) = parse(source.clone(), Some(label.clone()));

    if !parser.errors().is_empty() {
        for error in parser.errors() {
            writeln!(err, "{}", render_error(error, &source, &label))?;
        }
        return Err(CliError::Diagnostics {
            count: parser.errors().len(),
        });
    }

    writeln!(out, "{}", program)?;
    Ok(())
}

/// Reads lines from `input` until it runs dry, parsing each one on its own.
pub fn start_repl<R: BufRead, W: Write>(input: R, mut output: W) -> CliResult<()> {
    let mut lines = input.lines();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;

        let (parser, program) = parse(line, None);

        if !parser.errors().is_empty() {
            write_parser_errors(&mut output, &parser.messages())?;
            continue;
        }

        writeln!(output, "{}", program)?;
    }
}

fn write_parser_errors<W: Write>(output: &mut W, messages: &[String]) -> io::Result<()> {
    writeln!(output, "parser errors:")?;
    for message in messages {
        writeln!(output, "\t{}", message)?;
    }
    Ok(())
}
