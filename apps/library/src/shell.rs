//! Line-oriented interactive session over one controller.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use storage::SnapshotStore;

use crate::cli::CatalogCommand;
use crate::commands::LibraryCommand;
use crate::controller::Controller;
use crate::report;

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: CatalogCommand,
}

const PROMPT: &str = "library> ";

pub fn run<P, R, W>(controller: &mut Controller<P>, input: R, mut output: W) -> Result<()>
where
    P: SnapshotStore,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", controller.view().table())?;
    write!(output, "{PROMPT}")?;
    output.flush()?;

    for line in input.lines() {
        let line = line.context("failed to read from stdin")?;
        let trimmed = line.trim();
        if matches!(trimmed, "quit" | "exit") {
            break;
        }
        if !trimmed.is_empty() {
            match parse_line(trimmed) {
                Ok(command) => {
                    report::write_report(&mut output, controller, &LibraryCommand::from(command))?;
                }
                Err(err) => writeln!(output, "{err}")?,
            }
        }
        write!(output, "{PROMPT}")?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(())
}

fn parse_line(line: &str) -> Result<CatalogCommand> {
    let words = split_words(line)?;
    let parsed = ShellLine::try_parse_from(words)
        .map_err(|err| anyhow::anyhow!(err.render().to_string()))?;
    Ok(parsed.command)
}

/// Whitespace splitting that keeps single- or double-quoted runs together.
pub fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(open) = quote {
        bail!("unterminated {open} quote");
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
