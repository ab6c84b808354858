use seqshell::shell::{self, HELP, OutputFormat, ShellConfig};
use seqshell::{Dispatcher, MemorySink, SharedSequence, ShellError, ShutdownReport};
use std::io::{self, Cursor, Write};
use std::sync::Arc;

#[cfg(test)]
mod tests {
    use super::*;

    struct Session {
        out: String,
        diag: String,
        lines: Vec<String>,
        report: ShutdownReport,
    }

    async fn run_session(
        input: impl Into<Vec<u8>>,
        sequence: Arc<SharedSequence>,
        config: &ShellConfig,
    ) -> Session {
        let sink = Arc::new(MemorySink::new());
        let dispatcher = Dispatcher::builder(sink.clone())
            .with_sequence(sequence)
            .spawn();

        let mut out = Vec::new();
        let mut diag = Vec::new();
        let report = shell::run(
            Cursor::new(input.into()),
            &mut out,
            &mut diag,
            dispatcher,
            config,
        )
        .await
        .unwrap();

        Session {
            out: String::from_utf8(out).unwrap(),
            diag: String::from_utf8(diag).unwrap(),
            lines: sink.lines(),
            report,
        }
    }

    /// Accepts nothing; every write fails like a closed pipe.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_session_applies_writer_commands() {
        let sequence = Arc::new(SharedSequence::new());
        let script = "insert 0 5\ninsert 1 3\ninsert 0 9\nsort asc\n";

        let session = run_session(script, Arc::clone(&sequence), &ShellConfig::default()).await;

        assert!(session.out.is_empty());
        assert!(session.diag.is_empty());
        assert_eq!(sequence.snapshot(), vec![3, 5, 9]);
        assert_eq!(session.report.writer.executed, 4);
        assert_eq!(
            session.lines,
            vec![
                "[LOG] Inserted 5 at position 0",
                "[LOG] Inserted 3 at position 1",
                "[LOG] Inserted 9 at position 0",
                "[LOG] Sorted buffer in ascending order",
            ]
        );
    }

    #[tokio::test]
    async fn test_parse_errors_answered_by_shell() {
        let script = "frobnicate\ninsert 1\nsort sideways\n\nread\n";
        let session = run_session(
            script,
            Arc::new(SharedSequence::from_elements(vec![1, 2])),
            &ShellConfig::default(),
        )
        .await;

        assert_eq!(
            session.out,
            "Unknown command: frobnicate\n\
             Type 'help' for available commands\n\
             Invalid arguments for command 'insert'. Type 'help' for usage.\n\
             Invalid arguments for command 'sort'. Type 'help' for usage.\n"
        );
        assert_eq!(session.lines, vec!["Buffer: [1, 2]"]);
        assert_eq!(session.report.writer.executed, 0);
        assert_eq!(session.report.reader.executed, 1);
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_unknown_command() {
        let sequence = Arc::new(SharedSequence::new());
        let input: &[u8] = b"insert 0 1\n\xff\xfe\ninsert 0 2\n";

        let session = run_session(input, Arc::clone(&sequence), &ShellConfig::default()).await;

        assert_eq!(sequence.snapshot(), vec![2, 1]);
        assert_eq!(session.report.writer.executed, 2);
        assert!(session.out.starts_with("Unknown command: "), "{}", session.out);
    }

    #[tokio::test]
    async fn test_output_failure_still_drains_queued_commands() {
        let sequence = Arc::new(SharedSequence::new());
        let dispatcher = Dispatcher::builder(Arc::new(MemorySink::new()))
            .with_sequence(Arc::clone(&sequence))
            .spawn();

        // The parse error on line three cannot be written, which ends the
        // session after two inserts were queued.
        let input = "insert 0 1\ninsert 1 2\nbogus\ninsert 0 3\n";
        let result = shell::run(
            Cursor::new(input),
            ClosedPipe,
            io::sink(),
            dispatcher,
            &ShellConfig::default(),
        )
        .await;

        assert!(matches!(result, Err(ShellError::Io(_))));
        assert_eq!(sequence.snapshot(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_exit_stops_reading() {
        let sequence = Arc::new(SharedSequence::new());
        let script = "insert 0 1\nq\ninsert 0 2\n";

        let session = run_session(script, Arc::clone(&sequence), &ShellConfig::default()).await;

        assert_eq!(sequence.snapshot(), vec![1]);
        assert_eq!(session.lines.len(), 1);
        assert_eq!(session.report.writer.executed, 1);
    }

    #[tokio::test]
    async fn test_prompt_goes_to_diagnostic_stream() {
        let config = ShellConfig {
            prompt: "seq> ".to_string(),
            interactive: true,
            ..ShellConfig::default()
        };
        let session = run_session("help\nexit\n", Arc::new(SharedSequence::new()), &config).await;

        assert_eq!(session.out, format!("{HELP}\n"));
        assert_eq!(session.diag, "seq> seq> ");
    }

    #[tokio::test]
    async fn test_json_mode_keeps_messages_off_output() {
        let config = ShellConfig {
            format: OutputFormat::Json,
            ..ShellConfig::default()
        };
        let session = run_session(
            "help\npush 1\nread\n",
            Arc::new(SharedSequence::new()),
            &config,
        )
        .await;

        assert!(session.out.is_empty());
        assert!(session.diag.starts_with(HELP));
        assert!(session.diag.contains("Unknown command: push"));
        assert_eq!(session.report.reader.executed, 1);
    }

    #[tokio::test]
    async fn test_out_of_range_remove_keeps_session_alive() {
        let sequence = Arc::new(SharedSequence::from_elements(vec![1, 2, 3, 4, 5]));
        let session = run_session(
            "remove 10\nremove 2\n",
            Arc::clone(&sequence),
            &ShellConfig::default(),
        )
        .await;

        assert_eq!(sequence.snapshot(), vec![1, 2, 4, 5]);
        assert_eq!(session.report.writer.rejected, 1);
        assert_eq!(
            session.lines,
            vec![
                "[ERROR] invalid position 10 for remove: sequence length is 5",
                "[LOG] Removed element at position 2",
            ]
        );
    }

    #[tokio::test]
    async fn test_script_file_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "insert 0 4").unwrap();
        writeln!(file, "insert 0 8").unwrap();
        writeln!(file, "reverse").unwrap();
        file.flush().unwrap();

        let input = io::BufReader::new(std::fs::File::open(file.path()).unwrap());
        let sequence = Arc::new(SharedSequence::new());
        let dispatcher = Dispatcher::builder(Arc::new(MemorySink::new()))
            .with_sequence(Arc::clone(&sequence))
            .spawn();

        let report = shell::run(
            input,
            io::sink(),
            io::sink(),
            dispatcher,
            &ShellConfig::default(),
        )
        .await
        .unwrap();

        assert_eq!(report.writer.executed, 3);
        assert_eq!(sequence.snapshot(), vec![4, 8]);
    }
}
