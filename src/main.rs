/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

use clap::Parser;
use seqshell::shell::{self, OutputFormat, ShellConfig};
use seqshell::{Dispatcher, JsonSink, OutputSink, TextSink};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "seqshell", version)]
#[command(about = "Interactive shell over a shared integer sequence", long_about = None)]
struct Cli {
    /// Prompt shown before each interactive line
    #[arg(long, default_value = "> ")]
    prompt: String,

    /// Rendering of command output
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Read commands from a file instead of standard input
    #[arg(short, long)]
    script: Option<PathBuf>,
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "seqshell failed");
            eprintln!("seqshell: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("seqshell-worker")
        .enable_all()
        .build()?;

    let sink: Arc<dyn OutputSink> = match cli.format {
        OutputFormat::Text => Arc::new(TextSink::stdout()),
        OutputFormat::Json => Arc::new(JsonSink::stdout()),
    };

    let script = match &cli.script {
        Some(path) => {
            info!(script = %path.display(), "running script");
            Some(BufReader::new(File::open(path)?))
        }
        None => None,
    };

    let dispatcher = {
        let _guard = runtime.enter();
        Dispatcher::builder(sink).spawn()
    };

    let stdout = io::stdout();
    let report = match script {
        Some(input) => {
            let config = ShellConfig {
                prompt: cli.prompt,
                interactive: false,
                format: cli.format,
            };
            runtime.block_on(shell::run(input, stdout, io::stderr(), dispatcher, &config))?
        }
        None => {
            let stdin = io::stdin();
            let config = ShellConfig {
                prompt: cli.prompt,
                interactive: stdin.is_terminal(),
                format: cli.format,
            };
            runtime.block_on(shell::run(
                stdin.lock(),
                stdout,
                io::stderr(),
                dispatcher,
                &config,
            ))?
        }
    };

    info!(
        writes = report.writer.executed,
        reads = report.reader.executed,
        rejected = report.writer.rejected + report.reader.rejected,
        "shutdown complete"
    );
    Ok(())
}
