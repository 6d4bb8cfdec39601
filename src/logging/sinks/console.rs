use std::{
    io::{self, Write},
    sync::Arc,
};

use parking_lot::Mutex;

/// Консольная цель: получает уже отформатированную строку без перевода
/// строки.
///
/// Реализации не паникуют: ошибка вывода игнорируется.
pub trait ConsoleSink: Send + Sync {
    fn write_line(
        &self,
        line: &str,
    );
}

/// Вывод в stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

/// Вывод в stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

/// Буфер в памяти, в основном для тестов.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl ConsoleSink for StdoutSink {
    fn write_line(
        &self,
        line: &str,
    ) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{line}");
    }
}

impl ConsoleSink for StderrSink {
    fn write_line(
        &self,
        line: &str,
    ) {
        let mut out = io::stderr().lock();
        let _ = writeln!(out, "{line}");
    }
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Копия всех записанных строк.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl ConsoleSink for MemorySink {
    fn write_line(
        &self,
        line: &str,
    ) {
        self.lines.lock().push(line.to_string());
    }
}

impl<S: ConsoleSink + ?Sized> ConsoleSink for Arc<S> {
    fn write_line(
        &self,
        line: &str,
    ) {
        (**self).write_line(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_shares_buffer_between_clones() {
        let sink = MemorySink::new();
        let clone = sink.clone();

        clone.write_line("one");
        sink.write_line("two");

        assert_eq!(sink.lines(), vec!["one".to_string(), "two".to_string()]);
        assert_eq!(clone.len(), 2);

        sink.clear();
        assert!(clone.is_empty());
    }

    /// Вывод в stdout/stderr не паникует.
    #[test]
    fn test_std_sinks_write_without_panic() {
        StdoutSink.write_line("stdout sink smoke test");
        StderrSink.write_line("stderr sink smoke test");
    }

    #[test]
    fn test_arc_sink_forwards() {
        let inner = MemorySink::new();
        let shared: Arc<dyn ConsoleSink> = Arc::new(inner.clone());

        shared.write_line("via arc");

        assert_eq!(inner.lines(), vec!["via arc".to_string()]);
    }
}
