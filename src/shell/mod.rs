/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Interactive front end.
//!
//! Reads lines, turns them into [`Command`]s and hands them to a
//! [`Dispatcher`]. Parse errors are answered here and never reach a queue;
//! everything the workers produce goes through the dispatcher's sink.

mod parser;

pub use parser::{ShellInput, parse_line};

use crate::dispatch::{Dispatcher, ShutdownReport};
use crate::error::ShellError;
use clap::ValueEnum;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

/// Help text printed for the `help` command.
pub const HELP: &str = "\
Available commands:
  insert <pos> <val> - Insert value at position
  remove <pos>       - Remove element
  sort asc|desc      - Sort ascending/descending
  reverse            - Reverse buffer
  read               - Print buffer
  count              - Count even/odd positions
  exit|q             - Exit program";

/// How worker output is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per executed command.
    Json,
}

/// Session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Prompt printed before each line when interactive.
    pub prompt: String,
    /// Whether to print the prompt.
    pub interactive: bool,
    /// Rendering used by the dispatcher's sink.
    ///
    /// In [`OutputFormat::Json`] mode help text and parse errors go to the
    /// diagnostic stream so that `out` carries nothing but JSON lines.
    pub format: OutputFormat,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            interactive: false,
            format: OutputFormat::Text,
        }
    }
}

/// Runs a session until `exit`, `q` or end of input, then shuts the
/// dispatcher down.
///
/// Help text and parse errors are written to `out` (or to `diag` in JSON
/// mode). The prompt always goes to `diag`, so `out` only ever receives whole
/// lines and worker output cannot be glued onto a prompt.
///
/// The dispatcher is shut down on every exit path, including errors, so
/// every command accepted during the session has run by the time this
/// returns. Reads from `input` block the calling thread; drive this with
/// `block_on` rather than from a runtime worker when `input` is a terminal.
///
/// # Errors
///
/// Returns [`ShellError::Io`] if reading `input` or writing `out`/`diag`
/// fails and [`ShellError::Dispatch`] if the dispatcher refuses a command or
/// a worker fails to join. A session error takes precedence over a shutdown
/// error.
pub async fn run<R, W, D>(
    input: R,
    mut out: W,
    mut diag: D,
    dispatcher: Dispatcher,
    config: &ShellConfig,
) -> Result<ShutdownReport, ShellError>
where
    R: BufRead,
    W: Write,
    D: Write,
{
    let session = read_commands(input, &mut out, &mut diag, &dispatcher, config);
    if let Err(e) = &session {
        warn!(error = %e, "session aborted, draining queued commands");
    }

    let shutdown = dispatcher.shutdown().await;
    let submitted = session?;
    info!(submitted, "session ended");
    Ok(shutdown?)
}

/// Reads, parses and submits lines. Returns the number of submitted commands.
fn read_commands<R, W, D>(
    mut input: R,
    out: &mut W,
    diag: &mut D,
    dispatcher: &Dispatcher,
    config: &ShellConfig,
) -> Result<u64, ShellError>
where
    R: BufRead,
    W: Write,
    D: Write,
{
    let mut buf = Vec::new();
    let mut submitted = 0u64;

    loop {
        if config.interactive {
            write!(diag, "{}", config.prompt)?;
            diag.flush()?;
        }

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            debug!("end of input");
            break;
        }
        // Undecodable bytes become U+FFFD and fail to parse as a command.
        let line = String::from_utf8_lossy(&buf);

        let messages: &mut dyn Write = match config.format {
            OutputFormat::Text => &mut *out,
            OutputFormat::Json => &mut *diag,
        };
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(ShellInput::Exit)) => break,
            Ok(Some(ShellInput::Help)) => writeln!(messages, "{HELP}")?,
            Ok(Some(ShellInput::Submit(command))) => {
                dispatcher.submit(command)?;
                submitted += 1;
            }
            Err(e) => {
                debug!(error = %e, "rejected input line");
                writeln!(messages, "{e}")?;
            }
        }
    }

    out.flush()?;
    Ok(submitted)
}
