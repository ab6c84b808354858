/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Line parser for shell input.

use crate::dispatch::Command;
use crate::error::ParseError;
use crate::sequence::SortOrder;

/// A parsed, non-empty input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellInput {
    /// A command for the dispatcher.
    Submit(Command),
    /// Print the help text.
    Help,
    /// End the session.
    Exit,
}

/// Parses one line of input.
///
/// Blank lines yield `Ok(None)`. Tokens after the required arguments are
/// ignored.
///
/// # Errors
///
/// Returns [`ParseError::UnknownCommand`] for an unrecognised first token and
/// [`ParseError::InvalidArguments`] when required arguments are missing or
/// are not integers (or not `asc`/`desc` for `sort`).
///
/// # Examples
///
/// ```
/// use seqshell::Command;
/// use seqshell::shell::{ShellInput, parse_line};
///
/// assert_eq!(
///     parse_line("insert 0 5"),
///     Ok(Some(ShellInput::Submit(Command::Insert { pos: 0, value: 5 })))
/// );
/// assert_eq!(parse_line("   "), Ok(None));
/// assert!(parse_line("sort sideways").is_err());
/// ```
pub fn parse_line(line: &str) -> Result<Option<ShellInput>, ParseError> {
    let mut tokens = line.split_whitespace();
    let Some(name) = tokens.next() else {
        return Ok(None);
    };

    let invalid = || ParseError::InvalidArguments(name.to_string());
    let mut int_arg = || -> Result<i64, ParseError> {
        tokens
            .next()
            .and_then(|token| token.parse().ok())
            .ok_or_else(invalid)
    };

    let input = match name {
        "exit" | "q" => ShellInput::Exit,
        "help" => ShellInput::Help,
        "insert" => {
            let pos = int_arg()?;
            let value = int_arg()?;
            ShellInput::Submit(Command::Insert { pos, value })
        }
        "remove" => ShellInput::Submit(Command::Remove { pos: int_arg()? }),
        "sort" => {
            let order = match tokens.next() {
                Some("asc") => SortOrder::Ascending,
                Some("desc") => SortOrder::Descending,
                _ => return Err(invalid()),
            };
            ShellInput::Submit(Command::sort(order))
        }
        "reverse" => ShellInput::Submit(Command::Reverse),
        "read" => ShellInput::Submit(Command::Read),
        "count" => ShellInput::Submit(Command::CountParity),
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Some(input))
}
