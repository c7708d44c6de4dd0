use chrono::Local;
use std::fmt::Write as _;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Append-only transcript of one session.
///
/// Every prompt, user response and reported message is recorded as
/// `<timestamp> | <message>`; the `log` action dumps it to a file.
#[derive(Debug, Default)]
pub struct SessionLog {
    buffer: String,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, message: &str) {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        let _ = writeln!(self.buffer, "{} | {}", timestamp, message);
    }

    pub fn contents(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
