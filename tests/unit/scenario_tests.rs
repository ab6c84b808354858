use seqshell::{Command, Dispatcher, ExecutionEvent, JsonSink, SharedSequence, TextSink};
use std::io::Write;
use std::sync::{Arc, Mutex};

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_parity_lines_never_split() {
        let buffer = SharedBuffer::default();
        let dispatcher = Dispatcher::builder(Arc::new(TextSink::new(buffer.clone())))
            .with_sequence(Arc::new(SharedSequence::from_elements(vec![1, 2, 3])))
            .spawn();

        for i in 0..100 {
            dispatcher.submit(Command::CountParity).unwrap();
            dispatcher.submit(Command::Insert { pos: 0, value: i }).unwrap();
        }
        dispatcher.shutdown().await.unwrap();

        let contents = buffer.contents();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 300);
        for (i, line) in lines.iter().enumerate() {
            if line.starts_with("Even positions:") {
                assert!(lines[i + 1].starts_with("Odd positions:"), "split at {i}");
            }
        }
    }

    #[tokio::test]
    async fn test_json_output_stream() {
        let buffer = SharedBuffer::default();
        let dispatcher = Dispatcher::builder(Arc::new(JsonSink::new(buffer.clone()))).spawn();

        dispatcher.submit(Command::Insert { pos: 0, value: 5 }).unwrap();
        dispatcher.submit(Command::Remove { pos: 3 }).unwrap();
        dispatcher.shutdown().await.unwrap();

        let contents = buffer.contents();
        let events: Vec<serde_json::Value> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["outcome"]["outcome"], "inserted");
        assert_eq!(events[1]["outcome"]["outcome"], "rejected");
        assert_eq!(events[1]["outcome"]["error"]["kind"], "position_out_of_range");
        assert_eq!(events[1]["outcome"]["error"]["len"], 1);
        assert_eq!(events[1]["sequence_num"], 2);
    }

    #[tokio::test]
    async fn test_listener_sees_every_event() {
        let seen: Arc<Mutex<Vec<ExecutionEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let dispatcher = Dispatcher::builder(Arc::new(TextSink::new(std::io::sink())))
            .add_listener(move |event| seen_clone.lock().unwrap().push(event.clone()))
            .spawn();

        dispatcher.submit(Command::Reverse).unwrap();
        dispatcher.submit(Command::Read).unwrap();
        dispatcher.submit(Command::SortDescending).unwrap();
        dispatcher.shutdown().await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|event| event.outcome.is_success()));
    }
}
