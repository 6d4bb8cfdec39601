use std::path::{Path, PathBuf};

use glyphlog_error::{WriterError, WriterResult};

use super::{
    directory::{LogsDirectory, WriterState},
    paths,
};
use crate::logging::metrics::{WriterMetrics, WriterStats};

/// Расширение файлов в multi-file режиме.
pub const LOG_FILE_EXTENSION: &str = "log";

/// Запись в набор файлов, по одному на scope.
///
/// Имя файла приходит от вызывающего кода (обычно `<дата>-<scope>`), к нему
/// добавляется `.log`. Ротации нет, файлы растут без ограничений.
#[derive(Debug, Default)]
pub struct MultiFileWriter {
    directory: LogsDirectory,
    metrics: WriterMetrics,
}

impl MultiFileWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_directory(
        &mut self,
        path: &Path,
    ) -> WriterResult<()> {
        self.directory.set_path(path)
    }

    pub fn directory(&self) -> &Path {
        self.directory.path()
    }

    pub fn state(&self) -> WriterState {
        self.directory.state()
    }

    pub fn stats(&self) -> WriterStats {
        self.metrics.get_stats()
    }

    /// Путь к файлу для `base_name`.
    pub fn file_path(
        &self,
        base_name: &str,
    ) -> WriterResult<PathBuf> {
        let dir = self.directory.require_ready()?;
        paths::validate_file_name(base_name)?;
        Ok(dir.join(format!("{base_name}.{LOG_FILE_EXTENSION}")))
    }

    pub fn write(
        &self,
        line: &str,
        base_name: &str,
    ) -> WriterResult<()> {
        let path = self.file_path(base_name)?;

        paths::append_line(&path, line).map_err(|e| WriterError::write_failure(&path, &e))?;
        self.metrics.record_line(line.len() as u64 + 1);
        Ok(())
    }
}
