use std::sync::atomic::{AtomicU64, Ordering};

/// Счётчики логгера.
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Записи, прошедшие фильтр verbosity
    pub emitted: AtomicU64,
    /// Записи, отброшенные фильтром
    pub suppressed: AtomicU64,
    /// Успешные записи в файловые цели
    pub file_writes: AtomicU64,
    /// Неудачные записи в файловые цели
    pub write_failures: AtomicU64,
}

/// Снимок [`LoggerMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoggerStats {
    pub emitted: u64,
    pub suppressed: u64,
    pub file_writes: u64,
    pub write_failures: u64,
}

/// Счётчики файловой цели.
#[derive(Debug, Default)]
pub struct WriterMetrics {
    /// Кол-во дописанных строк
    pub lines_written: AtomicU64,
    /// Кол-во дописанных байт (включая перевод строки)
    pub bytes_written: AtomicU64,
    /// Кол-во удалений файла по превышению размера
    pub rotations: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    pub lines_written: u64,
    pub bytes_written: u64,
    pub rotations: u64,
}

impl LoggerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_emitted(&self) {
        self.emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_suppressed(&self) {
        self.suppressed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_file_write(&self) {
        self.file_writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_write_failure(&self) {
        self.write_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> LoggerStats {
        LoggerStats {
            emitted: self.emitted.load(Ordering::Relaxed),
            suppressed: self.suppressed.load(Ordering::Relaxed),
            file_writes: self.file_writes.load(Ordering::Relaxed),
            write_failures: self.write_failures.load(Ordering::Relaxed),
        }
    }
}

impl WriterMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_line(
        &self,
        bytes: u64,
    ) {
        self.lines_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_rotation(&self) {
        self.rotations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> WriterStats {
        WriterStats {
            lines_written: self.lines_written.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            rotations: self.rotations.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_metrics_snapshot() {
        let m = LoggerMetrics::new();
        m.record_emitted();
        m.record_emitted();
        m.record_suppressed();
        m.record_file_write();
        m.record_write_failure();

        assert_eq!(
            m.get_stats(),
            LoggerStats {
                emitted: 2,
                suppressed: 1,
                file_writes: 1,
                write_failures: 1,
            }
        );
    }

    #[test]
    fn test_writer_metrics_snapshot() {
        let m = WriterMetrics::new();
        m.record_line(10);
        m.record_line(5);
        m.record_rotation();

        let stats = m.get_stats();
        assert_eq!(stats.lines_written, 2);
        assert_eq!(stats.bytes_written, 15);
        assert_eq!(stats.rotations, 1);
    }
}
