//! The observable output channel.
//!
//! The bootstrap emits exactly one result line on success. [`ConsoleSink`]
//! writes it to stdout; [`MemorySink`] captures it for assertions.

use parking_lot::Mutex;

/// Destination for the emitted result line.
pub trait ResultSink: Send + Sync {
    /// Emit one line.
    fn emit(&self, line: &str);
}

/// Writes result lines to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ResultSink for ConsoleSink {
    fn emit(&self, line: &str) {
        println!("{line}");
    }
}

/// Captures result lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines emitted so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl ResultSink for MemorySink {
    fn emit(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_captures_lines() {
        let sink = MemorySink::new();

        sink.emit("first");
        sink.emit("second");

        assert_eq!(sink.lines(), vec!["first", "second"]);
    }

    #[test]
    fn test_memory_sink_starts_empty() {
        let sink = MemorySink::new();
        assert!(sink.lines().is_empty());
    }
}
