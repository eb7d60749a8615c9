// ABOUTME: Async stdin line reader backed by a dedicated blocking thread
// ABOUTME: Reads one line per request so inquire prompts can own the terminal in between

use std::io::{BufRead, Write};

use tokio::sync::mpsc;

/// Reads lines from stdin without blocking the async runtime.
///
/// The backing thread only touches stdin after an explicit request, so
/// interactive prompts (inquire) can take over the terminal between lines.
pub struct LineReader {
    requests: std::sync::mpsc::Sender<()>,
    lines: mpsc::UnboundedReceiver<Option<String>>,
    pending: bool,
}

impl LineReader {
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = std::sync::mpsc::channel::<()>();
        let (line_tx, line_rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            while request_rx.recv().is_ok() {
                let mut buffer = String::new();
                let line = match stdin.lock().read_line(&mut buffer) {
                    Ok(0) => None,
                    Ok(_) => Some(buffer.trim_end_matches(['\r', '\n']).to_string()),
                    Err(_) => None,
                };
                let eof = line.is_none();
                if line_tx.send(line).is_err() || eof {
                    break;
                }
            }
        });

        Self {
            requests: request_tx,
            lines: line_rx,
            pending: false,
        }
    }

    /// Prints `prompt` and waits for the next line. Returns `None` on EOF.
    ///
    /// Cancel-safe: if the future is dropped mid-read, the next call picks up
    /// the already-requested line instead of asking the thread again.
    pub async fn read_line(&mut self, prompt: &str) -> Option<String> {
        if !self.pending {
            print!("{prompt}");
            let _ = std::io::stdout().flush();
            if self.requests.send(()).is_err() {
                return None;
            }
            self.pending = true;
        }
        let line = self.lines.recv().await.flatten();
        self.pending = false;
        line
    }
}
