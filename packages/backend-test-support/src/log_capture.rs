//! In-memory log sink for asserting on JSON log output.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use tracing_subscriber::fmt::MakeWriter;

/// Collects everything a `fmt` layer writes. Clones share one buffer.
#[derive(Clone, Default)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        // A test that panicked mid-write still left readable bytes behind.
        self.buf.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Raw captured text.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Captured lines parsed as JSON; lines that are not JSON are skipped.
    pub fn json_lines(&self) -> Vec<Value> {
        self.contents()
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    /// JSON events whose `fields.message` equals `message`.
    pub fn events_with_message(&self, message: &str) -> Vec<Value> {
        self.json_lines()
            .into_iter()
            .filter(|line| line["fields"]["message"] == message)
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_clones_share_the_buffer() {
        let capture = LogCapture::new();
        let mut writer = capture.make_writer();

        writer
            .write_all(b"{\"fields\":{\"message\":\"one\"}}\nplain text\n")
            .unwrap();

        assert_eq!(capture.json_lines().len(), 1);
        assert_eq!(capture.events_with_message("one").len(), 1);
        assert!(capture.events_with_message("two").is_empty());
        assert!(capture.contents().contains("plain text"));
    }
}
